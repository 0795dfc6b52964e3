use anyhow::Result;
use serde::Serialize;

use crate::domain::PlayerId;
use crate::ranking::stats::compute_stats;
use crate::store::MatchStore;

/// Players × players cross-table. `rows[i][j]` is player i's score against
/// player j: wins + 0.5 per stalemate or draw. `None` marks a pair with no
/// qualifying matches, which is not the same thing as a score of zero.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrandTable {
    pub row_headers: Vec<TableHeader>,
    pub column_headers: Vec<TableHeader>,
    pub rows: Vec<Vec<Option<f64>>>,
    /// Per-row totals ("total wins" column).
    pub row_totals: Vec<f64>,
    /// Per-column totals ("total losses" row).
    pub column_totals: Vec<f64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableHeader {
    pub player_id: PlayerId,
    pub name: String,
}

/// Build the cross-table over the active roster. Reuses the stats
/// aggregator with a single-opponent restriction per cell.
pub fn grand_table<S: MatchStore>(store: &S, full_names: bool) -> Result<GrandTable> {
    let players = store.list_active_players()?;

    let mut rows = Vec::with_capacity(players.len());
    let mut row_totals = Vec::with_capacity(players.len());
    let mut column_totals = vec![0.0; players.len()];

    for player in &players {
        let mut row = Vec::with_capacity(players.len());
        let mut row_total = 0.0;
        for (column, opponent) in players.iter().enumerate() {
            let stats = compute_stats(store, player.id, Some(&[opponent.id]))?;
            if stats.total > 0 {
                let score = f64::from(stats.wins())
                    + 0.5 * f64::from(stats.stalemates)
                    + 0.5 * f64::from(stats.draws);
                row_total += score;
                column_totals[column] += score;
                row.push(Some(score));
            } else {
                row.push(None);
            }
        }
        rows.push(row);
        row_totals.push(row_total);
    }

    let headers: Vec<TableHeader> = players
        .iter()
        .map(|p| TableHeader { player_id: p.id, name: p.display_name(full_names) })
        .collect();

    Ok(GrandTable {
        row_headers: headers.clone(),
        column_headers: headers,
        rows,
        row_totals,
        column_totals,
    })
}
