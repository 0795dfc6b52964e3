use anyhow::Result;

use crate::domain::{Outcome, PlayerId, PlayerStats};
use crate::errors::RankingError;
use crate::store::MatchStore;

/// Aggregate win/loss/draw/stalemate counts for one player over all enabled
/// matches, optionally restricted to games against `opponents`.
///
/// Exactly one bucket is incremented per qualifying match, based on the
/// subject's color and the outcome; stalemates and draws count regardless
/// of color. `total` always equals the number of qualifying matches.
pub fn compute_stats<S: MatchStore>(
    store: &S,
    player_id: PlayerId,
    opponents: Option<&[PlayerId]>,
) -> Result<PlayerStats> {
    if store.find_player(player_id)?.is_none() {
        return Err(RankingError::UnknownPlayer(player_id).into());
    }
    if let Some(restriction) = opponents {
        if restriction.is_empty() {
            return Err(RankingError::EmptyOpponentRestriction.into());
        }
    }

    let matches = store.list_enabled_matches(Some(player_id), opponents)?;

    let mut stats = PlayerStats::default();
    for game in &matches {
        let as_white = game.white_player == player_id;
        match (as_white, game.outcome) {
            (true, Outcome::WhiteWin) => stats.white_wins += 1,
            (true, Outcome::BlackWin) => stats.white_losses += 1,
            (false, Outcome::BlackWin) => stats.black_wins += 1,
            (false, Outcome::WhiteWin) => stats.black_losses += 1,
            (_, Outcome::Stalemate) => stats.stalemates += 1,
            (_, Outcome::Draw) => stats.draws += 1,
        }
        stats.total += 1;
    }

    Ok(stats)
}
