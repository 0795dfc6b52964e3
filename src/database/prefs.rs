use anyhow::{Context, Result};
use rusqlite::{OptionalExtension, params};

use super::connection::DbConn;

pub fn get_pref(conn: &DbConn, name: &str) -> Result<Option<String>> {
    let sql = "SELECT value FROM prefs WHERE name = ?1";

    conn.query_row(sql, params![name], |row| row.get(0))
        .optional()
        .context("Failed to query preference")
}

pub fn set_pref(conn: &DbConn, name: &str, value: &str) -> Result<()> {
    let sql = "INSERT INTO prefs (name, value) VALUES (?1, ?2) ON CONFLICT(name) DO UPDATE SET value = excluded.value";

    conn.execute(sql, params![name, value])
        .context("Failed to set preference")?;
    Ok(())
}

/// The `last_names` preference switches displays to last names only;
/// anything else (including no preference) means full names.
pub fn use_full_names(conn: &DbConn) -> Result<bool> {
    Ok(get_pref(conn, "last_names")?.as_deref() != Some("yes"))
}
