use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Deserialize;
use std::sync::Arc;

use crate::api::models::{
    NewMatch, NewPlayer, PlayerListItem, PlayerStatsResponse, RankingRow, RankingsResponse,
    SummaryResponse,
};
use crate::config::settings::AppConfig;
use crate::database::{self, DbConn, DbPool, SqliteStore};
use crate::domain::PlayerId;
use crate::errors::RankingError;
use crate::ranking;

pub struct AppState {
    pub pool: DbPool,
    pub config: AppConfig,
}

#[derive(Deserialize)]
pub struct RankingParams {
    scores: Option<bool>,
}

#[derive(Deserialize)]
pub struct StatsParams {
    /// Comma-separated opponent ids restricting the stats.
    vs: Option<String>,
}

pub async fn get_players(State(state): State<Arc<AppState>>) -> Response {
    let conn = match connection(&state) {
        Ok(conn) => conn,
        Err(response) => return response,
    };

    match database::players::list_active(&conn) {
        Ok(players) => {
            let items: Vec<PlayerListItem> =
                players.into_iter().map(PlayerListItem::from).collect();
            Json(items).into_response()
        }
        Err(e) => query_error(e),
    }
}

pub async fn create_player(
    State(state): State<Arc<AppState>>,
    Json(body): Json<NewPlayer>,
) -> Response {
    let conn = match connection(&state) {
        Ok(conn) => conn,
        Err(response) => return response,
    };

    match database::players::insert_player(&conn, &body.first_name, &body.last_name, body.grade) {
        Ok(player) => (StatusCode::CREATED, Json(PlayerListItem::from(player))).into_response(),
        Err(e) => query_error(e),
    }
}

pub async fn get_player_stats(
    State(state): State<Arc<AppState>>,
    Path(player_id): Path<PlayerId>,
    Query(params): Query<StatsParams>,
) -> Response {
    let conn = match connection(&state) {
        Ok(conn) => conn,
        Err(response) => return response,
    };

    let opponents = match params.vs.as_deref().map(parse_id_list) {
        None => None,
        Some(Ok(ids)) => Some(ids),
        Some(Err(raw)) => {
            return (StatusCode::BAD_REQUEST, format!("Invalid player id: {raw}")).into_response();
        }
    };

    let store = SqliteStore::new(&conn);
    match ranking::compute_stats(&store, player_id, opponents.as_deref()) {
        Ok(stats) => Json(PlayerStatsResponse::new(player_id, stats)).into_response(),
        Err(e) => core_error(e),
    }
}

pub async fn get_rankings(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RankingParams>,
) -> Response {
    let conn = match connection(&state) {
        Ok(conn) => conn,
        Err(response) => return response,
    };
    let include_scores = params.scores.unwrap_or(false);

    let store = SqliteStore::new(&conn);
    let entries = match ranking::rank_players(&store, &state.config.ranking) {
        Ok(entries) => entries,
        Err(e) => return core_error(e),
    };

    let mut items = Vec::with_capacity(entries.len());
    for (idx, entry) in entries.iter().enumerate() {
        let name = match database::players::find_by_id(&conn, entry.player_id) {
            Ok(Some(player)) => player.full_name(),
            Ok(None) => format!("Player {}", entry.player_id),
            Err(e) => return query_error(e),
        };
        items.push(RankingRow {
            rank: idx + 1,
            player_id: entry.player_id,
            name,
            score: include_scores.then_some(entry.score),
            tie_break_depth: include_scores.then_some(entry.tie_break_depth),
        });
    }

    Json(RankingsResponse { items }).into_response()
}

pub async fn get_table(State(state): State<Arc<AppState>>) -> Response {
    let conn = match connection(&state) {
        Ok(conn) => conn,
        Err(response) => return response,
    };

    let full_names = match database::prefs::use_full_names(&conn) {
        Ok(full_names) => full_names,
        Err(e) => return query_error(e),
    };

    let store = SqliteStore::new(&conn);
    match ranking::grand_table(&store, full_names) {
        Ok(table) => Json(table).into_response(),
        Err(e) => core_error(e),
    }
}

pub async fn get_summary(State(state): State<Arc<AppState>>) -> Response {
    let conn = match connection(&state) {
        Ok(conn) => conn,
        Err(response) => return response,
    };

    let store = SqliteStore::new(&conn);
    match ranking::club_summary(&store) {
        Ok(summary) => {
            Json(SummaryResponse { totals: summary, outcomes: summary.frequencies() })
                .into_response()
        }
        Err(e) => core_error(e),
    }
}

pub async fn create_match(
    State(state): State<Arc<AppState>>,
    Json(body): Json<NewMatch>,
) -> Response {
    let conn = match connection(&state) {
        Ok(conn) => conn,
        Err(response) => return response,
    };

    for id in [body.white_player, body.black_player] {
        match database::players::find_by_id(&conn, id) {
            Ok(Some(_)) => {}
            Ok(None) => {
                return (StatusCode::NOT_FOUND, format!("unknown player: {id}")).into_response();
            }
            Err(e) => return query_error(e),
        }
    }

    match database::matches::insert_match(
        &conn,
        body.white_player,
        body.black_player,
        body.outcome,
        None,
    ) {
        Ok(game) => (StatusCode::CREATED, Json(game)).into_response(),
        Err(e) => query_error(e),
    }
}

fn connection(state: &AppState) -> Result<DbConn, Response> {
    state.pool.get().map_err(|_| {
        (StatusCode::INTERNAL_SERVER_ERROR, "DB Connection Error").into_response()
    })
}

fn parse_id_list(raw: &str) -> Result<Vec<PlayerId>, String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<PlayerId>().map_err(|_| s.to_string()))
        .collect()
}

/// Precondition failures from the core map to client errors; anything else
/// is a server fault.
fn core_error(err: anyhow::Error) -> Response {
    match err.downcast_ref::<RankingError>() {
        Some(RankingError::UnknownPlayer(_)) => {
            (StatusCode::NOT_FOUND, err.to_string()).into_response()
        }
        Some(_) => (StatusCode::BAD_REQUEST, err.to_string()).into_response(),
        None => query_error(err),
    }
}

fn query_error(err: anyhow::Error) -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, format!("Query Error: {err}")).into_response()
}
