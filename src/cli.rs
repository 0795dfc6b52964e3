use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about = "chess club ranking backend")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Start the backend server
    Serve {
        /// Port number (optional, defaults to 3000)
        #[arg(short, long, default_value_t = 3000)]
        port: u16,
    },
    /// Create the database schema
    Init,
    /// Print the roster in ranked order
    Rankings {
        /// Include internal scores
        #[arg(long)]
        scores: bool,
    },
    /// Print the grand cross-table
    Table,
    /// Print club-wide outcome totals
    Summary,
}
