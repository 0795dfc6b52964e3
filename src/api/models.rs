use serde::{Deserialize, Serialize};

use crate::domain::{Outcome, Player, PlayerId, PlayerStats};
use crate::ranking::summary::{ClubSummary, OutcomeFrequencies};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerListItem {
    pub player_id: PlayerId,
    pub first_name: String,
    pub last_name: String,
    pub grade: i32,
}

impl From<Player> for PlayerListItem {
    fn from(player: Player) -> Self {
        Self {
            player_id: player.id,
            first_name: player.first_name,
            last_name: player.last_name,
            grade: player.grade,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPlayer {
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub grade: i32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMatch {
    pub white_player: PlayerId,
    pub black_player: PlayerId,
    pub outcome: Outcome,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStatsResponse {
    pub player_id: PlayerId,
    pub wins: u32,
    pub losses: u32,
    pub white_wins: u32,
    pub white_losses: u32,
    pub black_wins: u32,
    pub black_losses: u32,
    pub stalemates: u32,
    pub draws: u32,
    pub total: u32,
}

impl PlayerStatsResponse {
    pub fn new(player_id: PlayerId, stats: PlayerStats) -> Self {
        Self {
            player_id,
            wins: stats.wins(),
            losses: stats.losses(),
            white_wins: stats.white_wins,
            white_losses: stats.white_losses,
            black_wins: stats.black_wins,
            black_losses: stats.black_losses,
            stalemates: stats.stalemates,
            draws: stats.draws,
            total: stats.total,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingRow {
    pub rank: usize,
    pub player_id: PlayerId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tie_break_depth: Option<usize>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingsResponse {
    pub items: Vec<RankingRow>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponse {
    pub totals: ClubSummary,
    pub outcomes: OutcomeFrequencies,
}
