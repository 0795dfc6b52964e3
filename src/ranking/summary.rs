use anyhow::Result;
use serde::Serialize;

use crate::domain::Outcome;
use crate::store::MatchStore;

/// Club-wide outcome totals over all enabled matches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClubSummary {
    pub white_wins: u32,
    pub black_wins: u32,
    pub stalemates: u32,
    pub draws: u32,
    pub matches: u32,
}

/// Relative outcome frequencies; all zero when no matches are recorded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutcomeFrequencies {
    pub white: f64,
    pub black: f64,
    pub stalemate: f64,
    pub draw: f64,
}

impl ClubSummary {
    pub fn frequencies(&self) -> OutcomeFrequencies {
        if self.matches == 0 {
            return OutcomeFrequencies::default();
        }
        let total = f64::from(self.matches);
        OutcomeFrequencies {
            white: f64::from(self.white_wins) / total,
            black: f64::from(self.black_wins) / total,
            stalemate: f64::from(self.stalemates) / total,
            draw: f64::from(self.draws) / total,
        }
    }
}

pub fn club_summary<S: MatchStore>(store: &S) -> Result<ClubSummary> {
    let matches = store.list_enabled_matches(None, None)?;

    let mut summary = ClubSummary::default();
    for game in &matches {
        match game.outcome {
            Outcome::WhiteWin => summary.white_wins += 1,
            Outcome::BlackWin => summary.black_wins += 1,
            Outcome::Stalemate => summary.stalemates += 1,
            Outcome::Draw => summary.draws += 1,
        }
        summary.matches += 1;
    }
    Ok(summary)
}
