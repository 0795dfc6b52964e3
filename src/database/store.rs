use anyhow::Result;

use super::connection::DbConn;
use super::{matches, players};
use crate::domain::{Match, Player, PlayerId};
use crate::store::MatchStore;

/// Sqlite-backed implementation of the core's read interface.
pub struct SqliteStore<'a> {
    conn: &'a DbConn,
}

impl<'a> SqliteStore<'a> {
    pub fn new(conn: &'a DbConn) -> Self {
        Self { conn }
    }
}

impl MatchStore for SqliteStore<'_> {
    fn list_active_players(&self) -> Result<Vec<Player>> {
        players::list_active(self.conn)
    }

    fn find_player(&self, id: PlayerId) -> Result<Option<Player>> {
        players::find_by_id(self.conn, id)
    }

    fn list_enabled_matches(
        &self,
        involving: Option<PlayerId>,
        restricted_to: Option<&[PlayerId]>,
    ) -> Result<Vec<Match>> {
        matches::list_enabled(self.conn, involving, restricted_to)
    }
}
