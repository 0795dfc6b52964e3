use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

pub type PlayerId = i64;

/// Club roster entry. Players are soft-deleted so that historical matches
/// can still resolve both participants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub first_name: String,
    pub last_name: String,
    pub grade: i32,
    pub deleted: bool,
}

impl Player {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn display_name(&self, full_names: bool) -> String {
        if full_names {
            self.full_name()
        } else {
            self.last_name.clone()
        }
    }
}

/// Result of a match, stored as integers 0..=3 in the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    WhiteWin,
    BlackWin,
    Stalemate,
    Draw,
}

impl Outcome {
    pub fn as_i64(self) -> i64 {
        match self {
            Outcome::WhiteWin => 0,
            Outcome::BlackWin => 1,
            Outcome::Stalemate => 2,
            Outcome::Draw => 3,
        }
    }

    pub fn from_i64(value: i64) -> Option<Self> {
        match value {
            0 => Some(Outcome::WhiteWin),
            1 => Some(Outcome::BlackWin),
            2 => Some(Outcome::Stalemate),
            3 => Some(Outcome::Draw),
            _ => None,
        }
    }
}

/// A recorded game. Disabled matches stay stored but are invisible to
/// statistics and rankings; matches are the one entity that hard-deletes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Match {
    pub id: i64,
    pub enabled: bool,
    pub timestamp: NaiveDateTime,
    pub white_player: PlayerId,
    pub black_player: PlayerId,
    pub outcome: Outcome,
}

/// Win/loss/draw/stalemate counts for one player, split by color.
/// Derived, never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PlayerStats {
    pub white_wins: u32,
    pub white_losses: u32,
    pub black_wins: u32,
    pub black_losses: u32,
    pub stalemates: u32,
    pub draws: u32,
    pub total: u32,
}

impl PlayerStats {
    pub fn wins(&self) -> u32 {
        self.white_wins + self.black_wins
    }

    pub fn losses(&self) -> u32 {
        self.white_losses + self.black_losses
    }
}

/// One row of ranked output. `tie_break_depth` is 0 when the base score
/// alone placed the player, otherwise the number of head-to-head
/// resolution levels it took to separate them from their bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingEntry {
    pub player_id: PlayerId,
    pub score: f64,
    pub tie_break_depth: usize,
}
