use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::api::handlers::{
    AppState, create_match, create_player, get_player_stats, get_players, get_rankings,
    get_summary, get_table,
};

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/players", get(get_players).post(create_player))
        .route("/api/player/:id/stats", get(get_player_stats))
        .route("/api/rankings", get(get_rankings))
        .route("/api/table", get(get_table))
        .route("/api/summary", get(get_summary))
        .route("/api/matches", post(create_match))
        .with_state(state)
}
