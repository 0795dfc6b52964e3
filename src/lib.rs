pub mod api;
pub mod cli;
pub mod config;
pub mod database;
pub mod domain;
pub mod errors;
pub mod ranking;
pub mod services;
pub mod store;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use crate::cli::{Cli, Command};
use crate::config::settings::{self, AppConfig};
use crate::database::{DbConn, SqliteStore};
use crate::services::server::ServerService;
use crate::store::MatchStore;

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub fn handle_serve(port: u16) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let config = AppConfig::new();
        let service = ServerService::new(port, config);
        service.run().await
    })
}

pub fn handle_init() -> Result<()> {
    let conn = open_database()?;
    database::setup::init_schema(&conn)
}

pub fn handle_rankings(show_scores: bool) -> Result<()> {
    let conn = open_database()?;
    let store = SqliteStore::new(&conn);
    let config = AppConfig::new();

    let entries = ranking::rank_players(&store, &config.ranking)?;
    println!("{}", "Club rankings".bold());
    for (idx, entry) in entries.iter().enumerate() {
        let name = player_name(&store, entry.player_id)?;
        let rank = format!("{:>3}.", idx + 1).green();
        if show_scores {
            println!("{rank} {name} ({:.4})", entry.score);
        } else {
            println!("{rank} {name}");
        }
    }
    Ok(())
}

pub fn handle_table() -> Result<()> {
    let conn = open_database()?;
    let store = SqliteStore::new(&conn);
    let full_names = database::prefs::use_full_names(&conn)?;

    let table = ranking::grand_table(&store, full_names)?;
    let name_width = table
        .row_headers
        .iter()
        .map(|h| h.name.len())
        .max()
        .unwrap_or(0)
        .max("TOTAL LOSSES".len());

    print!("{:>name_width$} ", "");
    for header in &table.column_headers {
        print!("{:>10}", format!("vs. {}", header.name));
    }
    println!("{:>12}", "TOTAL WINS");

    for (row_idx, row) in table.rows.iter().enumerate() {
        print!("{:>name_width$} ", table.row_headers[row_idx].name);
        for cell in row {
            match cell {
                Some(score) => print!("{:>10.1}", score),
                None => print!("{:>10}", "-"),
            }
        }
        println!("{:>12.1}", table.row_totals[row_idx]);
    }

    print!("{:>name_width$} ", "TOTAL LOSSES");
    for total in &table.column_totals {
        print!("{:>10.1}", total);
    }
    println!();
    Ok(())
}

pub fn handle_summary() -> Result<()> {
    let conn = open_database()?;
    let store = SqliteStore::new(&conn);

    let summary = ranking::club_summary(&store)?;
    let frequencies = summary.frequencies();
    println!("{}", "Club summary".bold());
    println!("  Matches:    {}", summary.matches);
    println!("  White wins: {} ({:.0}%)", summary.white_wins, frequencies.white * 100.0);
    println!("  Black wins: {} ({:.0}%)", summary.black_wins, frequencies.black * 100.0);
    println!("  Stalemates: {} ({:.0}%)", summary.stalemates, frequencies.stalemate * 100.0);
    println!("  Draws:      {} ({:.0}%)", summary.draws, frequencies.draw * 100.0);
    Ok(())
}

fn open_database() -> Result<DbConn> {
    let pool = database::create_pool(&settings::database_path())?;
    database::get_connection(&pool)
}

fn player_name(store: &SqliteStore<'_>, id: domain::PlayerId) -> Result<String> {
    Ok(store
        .find_player(id)?
        .map(|p| p.full_name())
        .unwrap_or_else(|| format!("Player {id}")))
}
