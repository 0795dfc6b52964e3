use anyhow::{Context, Result};
use chrono::{NaiveDateTime, Utc};
use rusqlite::{OptionalExtension, params, params_from_iter};

use super::connection::DbConn;
use crate::domain::{Match, Outcome, PlayerId};

const MATCH_COLUMNS: &str = "id, enabled, timestamp, white_player, black_player, outcome";

pub fn insert_match(
    conn: &DbConn,
    white_player: PlayerId,
    black_player: PlayerId,
    outcome: Outcome,
    timestamp: Option<NaiveDateTime>,
) -> Result<Match> {
    let timestamp = timestamp.unwrap_or_else(|| Utc::now().naive_utc());
    let sql = format!(
        "INSERT INTO matches (enabled, timestamp, white_player, black_player, outcome) VALUES (1, ?1, ?2, ?3, ?4) RETURNING {MATCH_COLUMNS}"
    );

    conn.query_row(&sql, params![timestamp, white_player, black_player, outcome], parse_match_row)
        .context("Failed to insert match")
}

pub fn set_enabled(conn: &DbConn, id: i64, enabled: bool) -> Result<bool> {
    let sql = "UPDATE matches SET enabled = ?1 WHERE id = ?2";

    let changed = conn
        .execute(sql, params![enabled, id])
        .context("Failed to update match enabled flag")?;
    Ok(changed > 0)
}

pub fn update_outcome(conn: &DbConn, id: i64, outcome: Outcome) -> Result<bool> {
    let sql = "UPDATE matches SET outcome = ?1 WHERE id = ?2";

    let changed = conn
        .execute(sql, params![outcome, id])
        .context("Failed to update match outcome")?;
    Ok(changed > 0)
}

/// Matches hard-delete, unlike players.
pub fn delete_match(conn: &DbConn, id: i64) -> Result<bool> {
    let changed = conn
        .execute("DELETE FROM matches WHERE id = ?1", params![id])
        .context("Failed to delete match")?;
    Ok(changed > 0)
}

pub fn find_by_id(conn: &DbConn, id: i64) -> Result<Option<Match>> {
    let sql = format!("SELECT {MATCH_COLUMNS} FROM matches WHERE id = ?1");

    conn.query_row(&sql, params![id], parse_match_row)
        .optional()
        .context("Failed to query match by id")
}

pub fn list_all(conn: &DbConn, exclude_disabled: bool) -> Result<Vec<Match>> {
    let filter = if exclude_disabled { "WHERE enabled = 1 " } else { "" };
    let sql = format!("SELECT {MATCH_COLUMNS} FROM matches {filter}ORDER BY timestamp");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map([], parse_match_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

/// Enabled matches, optionally narrowed to one player's games and further
/// to games against a fixed opponent set (the shape the stats aggregator
/// queries through).
pub fn list_enabled(
    conn: &DbConn,
    involving: Option<PlayerId>,
    restricted_to: Option<&[PlayerId]>,
) -> Result<Vec<Match>> {
    let (clause, values) = filter_clause(involving, restricted_to);
    let sql = format!("SELECT {MATCH_COLUMNS} FROM matches WHERE enabled = 1{clause} ORDER BY timestamp");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params_from_iter(values), parse_match_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

fn filter_clause(
    involving: Option<PlayerId>,
    restricted_to: Option<&[PlayerId]>,
) -> (String, Vec<i64>) {
    match (involving, restricted_to) {
        (Some(player), Some(set)) => {
            let in_list = placeholders(set.len());
            let clause = format!(
                " AND ((white_player = ? AND black_player IN ({in_list})) OR (black_player = ? AND white_player IN ({in_list})))"
            );
            let mut values = vec![player];
            values.extend_from_slice(set);
            values.push(player);
            values.extend_from_slice(set);
            (clause, values)
        }
        (Some(player), None) => {
            (" AND (white_player = ? OR black_player = ?)".to_string(), vec![player, player])
        }
        (None, Some(set)) => {
            let in_list = placeholders(set.len());
            let clause =
                format!(" AND white_player IN ({in_list}) AND black_player IN ({in_list})");
            let mut values = set.to_vec();
            values.extend_from_slice(set);
            (clause, values)
        }
        (None, None) => (String::new(), Vec::new()),
    }
}

fn placeholders(count: usize) -> String {
    vec!["?"; count].join(",")
}

fn parse_match_row(row: &rusqlite::Row) -> rusqlite::Result<Match> {
    Ok(Match {
        id: row.get(0)?,
        enabled: row.get(1)?,
        timestamp: row.get(2)?,
        white_player: row.get(3)?,
        black_player: row.get(4)?,
        outcome: row.get(5)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{connection, players, setup};

    fn test_conn() -> DbConn {
        let pool = connection::create_memory_pool().unwrap();
        let conn = connection::get_connection(&pool).unwrap();
        setup::init_schema(&conn).unwrap();
        conn
    }

    fn roster(conn: &DbConn) -> Vec<PlayerId> {
        ["Abbott", "Burke", "Cole"]
            .iter()
            .map(|last| players::insert_player(conn, "Kid", last, 7).unwrap().id)
            .collect()
    }

    #[test]
    fn insert_defaults_to_enabled_with_timestamp() {
        let conn = test_conn();
        let ids = roster(&conn);

        let game = insert_match(&conn, ids[0], ids[1], Outcome::WhiteWin, None).unwrap();
        assert!(game.enabled);
        assert_eq!(game.outcome, Outcome::WhiteWin);

        let found = find_by_id(&conn, game.id).unwrap().unwrap();
        assert_eq!(found.white_player, ids[0]);
        assert_eq!(found.timestamp, game.timestamp);
    }

    #[test]
    fn disabled_matches_stay_stored_but_drop_out_of_listings() {
        let conn = test_conn();
        let ids = roster(&conn);
        let game = insert_match(&conn, ids[0], ids[1], Outcome::Draw, None).unwrap();

        assert!(set_enabled(&conn, game.id, false).unwrap());
        assert!(list_enabled(&conn, None, None).unwrap().is_empty());
        assert_eq!(list_all(&conn, false).unwrap().len(), 1);
        assert!(list_all(&conn, true).unwrap().is_empty());
    }

    #[test]
    fn involving_filter_matches_either_color() {
        let conn = test_conn();
        let ids = roster(&conn);
        insert_match(&conn, ids[0], ids[1], Outcome::WhiteWin, None).unwrap();
        insert_match(&conn, ids[2], ids[0], Outcome::BlackWin, None).unwrap();
        insert_match(&conn, ids[1], ids[2], Outcome::Stalemate, None).unwrap();

        let games = list_enabled(&conn, Some(ids[0]), None).unwrap();
        assert_eq!(games.len(), 2);
    }

    #[test]
    fn opponent_restriction_applies_to_the_other_side() {
        let conn = test_conn();
        let ids = roster(&conn);
        insert_match(&conn, ids[0], ids[1], Outcome::WhiteWin, None).unwrap();
        insert_match(&conn, ids[2], ids[0], Outcome::BlackWin, None).unwrap();
        insert_match(&conn, ids[1], ids[2], Outcome::Stalemate, None).unwrap();

        let versus_burke = list_enabled(&conn, Some(ids[0]), Some(&[ids[1]])).unwrap();
        assert_eq!(versus_burke.len(), 1);
        assert_eq!(versus_burke[0].black_player, ids[1]);

        let versus_both = list_enabled(&conn, Some(ids[0]), Some(&[ids[1], ids[2]])).unwrap();
        assert_eq!(versus_both.len(), 2);
    }

    #[test]
    fn outcome_update_and_hard_delete() {
        let conn = test_conn();
        let ids = roster(&conn);
        let game = insert_match(&conn, ids[0], ids[1], Outcome::WhiteWin, None).unwrap();

        assert!(update_outcome(&conn, game.id, Outcome::Draw).unwrap());
        assert_eq!(find_by_id(&conn, game.id).unwrap().unwrap().outcome, Outcome::Draw);

        assert!(delete_match(&conn, game.id).unwrap());
        assert!(find_by_id(&conn, game.id).unwrap().is_none());
        assert!(!delete_match(&conn, game.id).unwrap());
    }
}
