use anyhow::Result;
use chrono::NaiveDateTime;

use crate::domain::{Match, Outcome, Player, PlayerId};
use crate::store::MatchStore;

/// In-memory store for exercising the core without sqlite.
#[derive(Default)]
pub struct MemoryStore {
    players: Vec<Player>,
    matches: Vec<Match>,
}

impl MemoryStore {
    pub fn add_player(&mut self, id: PlayerId, first: &str, last: &str, grade: i32) {
        self.players.push(Player {
            id,
            first_name: first.to_string(),
            last_name: last.to_string(),
            grade,
            deleted: false,
        });
    }

    pub fn remove_player(&mut self, id: PlayerId) {
        if let Some(player) = self.players.iter_mut().find(|p| p.id == id) {
            player.deleted = true;
        }
    }

    pub fn add_match(&mut self, white: PlayerId, black: PlayerId, outcome: Outcome) -> i64 {
        let id = self.matches.len() as i64 + 1;
        self.matches.push(Match {
            id,
            enabled: true,
            timestamp: NaiveDateTime::default(),
            white_player: white,
            black_player: black,
            outcome,
        });
        id
    }

    pub fn disable_match(&mut self, id: i64) {
        if let Some(game) = self.matches.iter_mut().find(|m| m.id == id) {
            game.enabled = false;
        }
    }
}

impl MatchStore for MemoryStore {
    fn list_active_players(&self) -> Result<Vec<Player>> {
        Ok(self.players.iter().filter(|p| !p.deleted).cloned().collect())
    }

    fn find_player(&self, id: PlayerId) -> Result<Option<Player>> {
        Ok(self.players.iter().find(|p| p.id == id).cloned())
    }

    fn list_enabled_matches(
        &self,
        involving: Option<PlayerId>,
        restricted_to: Option<&[PlayerId]>,
    ) -> Result<Vec<Match>> {
        let qualifies = |m: &Match| {
            if !m.enabled {
                return false;
            }
            match (involving, restricted_to) {
                (Some(p), Some(set)) => {
                    (m.white_player == p && set.contains(&m.black_player))
                        || (m.black_player == p && set.contains(&m.white_player))
                }
                (Some(p), None) => m.white_player == p || m.black_player == p,
                (None, Some(set)) => {
                    set.contains(&m.white_player) && set.contains(&m.black_player)
                }
                (None, None) => true,
            }
        };
        Ok(self.matches.iter().filter(|m| qualifies(m)).cloned().collect())
    }
}
