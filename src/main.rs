use anyhow::Result;

use chess_club_ranking::cli::Command;
use chess_club_ranking::{
    handle_init, handle_rankings, handle_serve, handle_summary, handle_table, interpret,
};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(&command)
}

fn execute_command(command: &Command) -> Result<()> {
    match command {
        Command::Serve { port } => handle_serve(*port),
        Command::Init => handle_init(),
        Command::Rankings { scores } => handle_rankings(*scores),
        Command::Table => handle_table(),
        Command::Summary => handle_summary(),
    }
}
