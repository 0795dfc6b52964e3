use anyhow::Result;

use crate::domain::{Match, Player, PlayerId};

/// Read-side interface the ranking core consumes. The sqlite layer is the
/// production implementation; tests supply an in-memory one.
pub trait MatchStore {
    /// All non-deleted players, ordered by (last_name, first_name).
    fn list_active_players(&self) -> Result<Vec<Player>>;

    /// Look up a player by id, including soft-deleted ones.
    fn find_player(&self, id: PlayerId) -> Result<Option<Player>>;

    /// Enabled matches ordered by timestamp. With `involving`, only matches
    /// where that player held either color. With `restricted_to`, the other
    /// side must be in the set (or, without `involving`, both sides must).
    fn list_enabled_matches(
        &self,
        involving: Option<PlayerId>,
        restricted_to: Option<&[PlayerId]>,
    ) -> Result<Vec<Match>>;
}
