//! # Stopper CLI Library
//!
//! Command-line driver for the stop-on-stopper ladder wagering table:
//! interactive play, batch simulation, run-log statistics and verification.
//!
//! ## Main Entry Point
//!
//! The primary entry point is the [`run`] function, which parses command-line arguments
//! and executes the appropriate subcommand.
//!
//! ```no_run
//! use std::io;
//! let args = vec!["stopper", "sim", "--rounds", "100", "--bet", "7:10"];
//! let code = stopper_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Available Subcommands
//!
//! - `play`: Interactive table on stdin
//! - `sim`: Play N rounds with a fixed layout, optionally writing a run log
//! - `stats`: Aggregate run logs (JSONL or .jsonl.zst)
//! - `verify`: Check the accounting of every record in a run log
//! - `deal`: Shuffle one deck and show it up to the first stopper
//! - `cfg`: Display the resolved configuration
//! - `rng`: Sample the shuffling RNG
//! - `paytables`: List the built-in ladders

use clap::Parser;
use std::io::Write;
pub mod cli;
pub mod commands;
mod config;
mod error;
mod exit_code;
pub mod io_utils;
pub mod logging;
pub mod ui;
pub mod validation;

use cli::{Commands, StopperCli};
use commands::{
    handle_cfg_command, handle_deal_command, handle_paytables_command, handle_play_command,
    handle_rng_command, handle_sim_command, handle_stats_command, handle_verify_command,
};

pub use error::{BatchValidationError, CliError};

const COMMANDS: &[&str] = &[
    "play",
    "sim",
    "stats",
    "verify",
    "deal",
    "cfg",
    "rng",
    "paytables",
];

/// Main entry point for the CLI application.
///
/// # Arguments
///
/// * `args` - Iterator over command-line arguments (typically `std::env::args()`)
/// * `out` - Output stream for normal output (typically `stdout`)
/// * `err` - Output stream for error messages (typically `stderr`)
///
/// # Returns
///
/// Exit code: `0` for success, `2` for errors, `130` for interruptions
///
/// # Example
///
/// ```
/// use std::io;
/// let args = vec!["stopper", "deal", "--seed", "42"];
/// let code = stopper_cli::run(args, &mut io::stdout(), &mut io::stderr());
/// assert_eq!(code, 0);
/// ```
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match StopperCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => return usage_error(e, out, err),
    };

    let result = match cli.cmd {
        Commands::Play {
            seed,
            paytable,
            advanced,
            fast,
        } => {
            let stdin = std::io::stdin();
            let mut stdin_lock = stdin.lock();
            handle_play_command(seed, paytable, advanced, fast, out, err, &mut stdin_lock)
        }
        Commands::Sim {
            rounds,
            bets,
            output,
            seed,
            paytable,
            advanced,
        } => handle_sim_command(rounds, bets, output, seed, paytable, advanced, out, err),
        Commands::Stats { input } => handle_stats_command(input, out, err),
        Commands::Verify { input } => {
            let Some(path) = input else {
                let _ = ui::write_error(err, "input required");
                return exit_code::ERROR;
            };
            handle_verify_command(path, out, err)
        }
        Commands::Deal { seed, ace_stopper } => handle_deal_command(seed, ace_stopper, out),
        Commands::Cfg => handle_cfg_command(out, err),
        Commands::Rng { seed, count } => handle_rng_command(seed, count, out),
        Commands::Paytables => handle_paytables_command(out),
    };

    let code = exit_code::for_result(&result);
    if let Err(e) = &result
        && !matches!(e, CliError::Interrupted(_))
        && writeln!(err, "Error: {}", e).is_err()
    {
        return exit_code::ERROR;
    }
    code
}

/// Help and version go to `out` with exit code 0; anything else clap rejects
/// is printed with the command list and exits 2.
fn usage_error(e: clap::Error, out: &mut dyn Write, err: &mut dyn Write) -> i32 {
    use clap::error::ErrorKind;

    match e.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            if write!(out, "{}", e).is_err() {
                return exit_code::ERROR;
            }
            exit_code::SUCCESS
        }
        _ => {
            if writeln!(err, "{}", e).is_err()
                || writeln!(err).is_err()
                || writeln!(err, "Stopper CLI").is_err()
                || writeln!(err, "Usage: stopper <command> [options]\n").is_err()
                || writeln!(err, "Commands:").is_err()
            {
                return exit_code::ERROR;
            }
            for c in COMMANDS {
                if writeln!(err, "  {}", c).is_err() {
                    return exit_code::ERROR;
                }
            }
            let _ = writeln!(err, "\nFor full help, run: stopper --help");
            exit_code::ERROR
        }
    }
}
