pub mod engine;
pub mod grand_table;
pub mod stats;
pub mod summary;

#[cfg(test)]
pub(crate) mod testutil;

pub use engine::{Rankings, get_rankings, rank_players, resolve_tie};
pub use grand_table::{GrandTable, grand_table};
pub use stats::compute_stats;
pub use summary::{ClubSummary, club_summary};
