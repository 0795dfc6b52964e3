use anyhow::{Context, Result};
use rusqlite::{OptionalExtension, params};

use super::connection::DbConn;
use crate::domain::{Player, PlayerId};

pub fn insert_player(
    conn: &DbConn,
    first_name: &str,
    last_name: &str,
    grade: i32,
) -> Result<Player> {
    let sql = "INSERT INTO players (deleted, first_name, last_name, grade) VALUES (0, ?1, ?2, ?3) RETURNING id, deleted, first_name, last_name, grade";

    conn.query_row(sql, params![first_name, last_name, grade], parse_player_row)
        .context("Failed to insert player")
}

pub fn update_player(
    conn: &DbConn,
    id: PlayerId,
    first_name: &str,
    last_name: &str,
    grade: i32,
) -> Result<Option<Player>> {
    let sql = "UPDATE players SET first_name = ?1, last_name = ?2, grade = ?3 WHERE id = ?4 RETURNING id, deleted, first_name, last_name, grade";

    conn.query_row(sql, params![first_name, last_name, grade, id], parse_player_row)
        .optional()
        .context("Failed to update player")
}

/// Soft delete. The row stays so historical matches keep resolving, but the
/// player disappears from listings and rankings.
pub fn remove_player(conn: &DbConn, id: PlayerId) -> Result<bool> {
    let sql = "UPDATE players SET deleted = 1 WHERE id = ?1";

    let changed = conn
        .execute(sql, params![id])
        .context("Failed to remove player")?;
    Ok(changed > 0)
}

pub fn find_by_id(conn: &DbConn, id: PlayerId) -> Result<Option<Player>> {
    let sql = "SELECT id, deleted, first_name, last_name, grade FROM players WHERE id = ?1";

    conn.query_row(sql, params![id], parse_player_row)
        .optional()
        .context("Failed to query player by id")
}

pub fn list_active(conn: &DbConn) -> Result<Vec<Player>> {
    let sql = "SELECT id, deleted, first_name, last_name, grade FROM players WHERE deleted != 1 ORDER BY last_name, first_name";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map([], parse_player_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

fn parse_player_row(row: &rusqlite::Row) -> rusqlite::Result<Player> {
    Ok(Player {
        id: row.get(0)?,
        deleted: row.get(1)?,
        first_name: row.get(2)?,
        last_name: row.get(3)?,
        grade: row.get(4)?,
    })
}
