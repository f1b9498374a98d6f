//! Command-line argument definitions.

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "stopper",
    version,
    about = "Stop-on-stopper ladder wagering table",
    long_about = None
)]
pub struct StopperCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play interactively, one command per line on stdin
    Play {
        #[arg(long)]
        seed: Option<u64>,
        /// Paytable id (see `stopper paytables`)
        #[arg(long)]
        paytable: Option<String>,
        /// Start with side bets enabled
        #[arg(long)]
        advanced: bool,
        /// Deal without pausing between cards
        #[arg(long)]
        fast: bool,
    },
    /// Play N rounds with a fixed layout
    Sim {
        #[arg(long)]
        rounds: u64,
        /// Chip to place before the first round, repeatable
        #[arg(long = "bet", value_name = "KEY:UNITS")]
        bets: Vec<String>,
        /// JSONL run log to write
        #[arg(long)]
        output: Option<String>,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        paytable: Option<String>,
        #[arg(long)]
        advanced: bool,
    },
    /// Aggregate run logs (file or directory, .jsonl or .jsonl.zst)
    Stats {
        #[arg(long)]
        input: String,
    },
    /// Check the accounting of every record in a run log
    Verify {
        #[arg(long)]
        input: Option<String>,
    },
    /// Shuffle one deck and show the cards up to the first stopper
    Deal {
        #[arg(long)]
        seed: Option<u64>,
        /// Aces stop the draw instead of paying number bets
        #[arg(long)]
        ace_stopper: bool,
    },
    /// Show the resolved configuration and where each value came from
    Cfg,
    /// Print uniform samples from the shuffling source
    Rng {
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, default_value_t = 5)]
        count: usize,
    },
    /// List the built-in paytables
    Paytables,
}
