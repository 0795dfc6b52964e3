pub mod connection;
pub mod matches;
pub mod players;
pub mod prefs;
pub mod setup;
pub mod store;

pub use connection::{DbConn, DbPool, create_pool, get_connection};
pub use store::SqliteStore;

use rusqlite::ToSql;
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef};

use crate::domain::Outcome;

// Outcomes live in the matches table as plain integers 0..=3.
impl ToSql for Outcome {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(self.as_i64().into())
    }
}

impl FromSql for Outcome {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let raw = value.as_i64()?;
        Outcome::from_i64(raw).ok_or(FromSqlError::OutOfRange(raw))
    }
}
