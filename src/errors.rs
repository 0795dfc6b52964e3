use thiserror::Error;

use crate::domain::PlayerId;

/// Precondition failures rejected at the API boundary. Everything else in
/// the core (no games played, irresolvable ties, recursion ceiling) is a
/// designed outcome, not an error.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RankingError {
    #[error("unknown player: {0}")]
    UnknownPlayer(PlayerId),
    #[error("empty player set")]
    EmptyPlayerSet,
    #[error("opponent restriction must not be empty")]
    EmptyOpponentRestriction,
}
