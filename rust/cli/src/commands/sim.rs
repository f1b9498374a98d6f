//! Simulation command handler.
//!
//! Plays N rounds back to back with one fixed layout: the bets are placed
//! before the first round and every later round is a rebet. Stops early when
//! the bankroll can no longer cover the layout.
//!
//! # Environment Variables
//!
//! - `STOPPER_SIM_BREAK_AFTER`: Break after N rounds (for testing)
//!
//! # Examples
//!
//! ```no_run
//! use stopper_cli::commands::sim::handle_sim_command;
//! use std::io;
//!
//! let mut out = io::stdout();
//! let mut err = io::stderr();
//!
//! // 1000 rounds of 10 units on the seven, seed 42
//! handle_sim_command(1000, vec!["7:10".into()], Some("data/sim.jsonl".into()), Some(42), None, false, &mut out, &mut err).unwrap();
//! ```

use crate::config;
use crate::error::CliError;
use crate::io_utils::ensure_parent_dir;
use crate::ui;
use crate::validation::parse_bet_spec;
use std::io::Write;
use stopper_engine::engine::GameSession;
use stopper_engine::errors::GameError;
use stopper_engine::logger::JsonlRunLog;

const DEFAULT_LAYOUT: &str = "7:10";

/// Handle the sim command.
///
/// # Arguments
///
/// * `rounds` - Number of rounds to play
/// * `bets` - Layout as `KEY:UNITS` specs; `7:10` when empty
/// * `output` - JSONL run log to write (truncated first)
/// * `seed` - RNG seed; falls back to the configured seed, then a random one
/// * `paytable` - Paytable id overriding the configured one
/// * `advanced` - Enable side bets
/// * `out` - Output stream for progress and the summary
/// * `err` - Output stream for error messages
#[allow(clippy::too_many_arguments)]
pub fn handle_sim_command(
    rounds: u64,
    bets: Vec<String>,
    output: Option<String>,
    seed: Option<u64>,
    paytable: Option<String>,
    advanced: bool,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    if rounds == 0 {
        ui::write_error(err, "rounds must be >= 1")?;
        return Err(CliError::InvalidInput("rounds must be >= 1".to_string()));
    }

    let mut layout = Vec::new();
    let specs = if bets.is_empty() {
        vec![DEFAULT_LAYOUT.to_string()]
    } else {
        bets
    };
    for spec in &specs {
        match parse_bet_spec(spec) {
            Ok(bet) => layout.push(bet),
            Err(e) => {
                ui::write_error(err, &e)?;
                return Err(CliError::InvalidInput(e));
            }
        }
    }

    let resolved = match config::load_with_sources() {
        Ok(r) => r,
        Err(e) => {
            ui::write_error(err, &format!("Invalid configuration: {}", e))?;
            return Err(CliError::Config(e.to_string()));
        }
    };
    let mut game_config = resolved.config.game_config();
    if let Some(id) = paytable {
        game_config.paytable = id;
    }
    if advanced {
        game_config.advanced_mode = true;
    }
    let base_seed = seed
        .or(resolved.config.seed)
        .unwrap_or_else(rand::random);

    let mut session = match GameSession::with_seed(game_config, base_seed) {
        Ok(s) => s,
        Err(e) => {
            ui::write_error(err, &e.to_string())?;
            return Err(CliError::from(e));
        }
    };

    if let Some(p) = output.as_ref().map(std::path::PathBuf::from) {
        if let Err(e) = ensure_parent_dir(&p) {
            ui::write_error(err, &e)?;
            return Err(CliError::Io(std::io::Error::other(e)));
        }
        match JsonlRunLog::create(&p) {
            Ok(sink) => session.set_sink(sink),
            Err(e) => {
                ui::write_error(err, &format!("Failed to open {}: {}", p.display(), e))?;
                return Err(CliError::Io(e));
            }
        }
    }

    for (key, units) in &layout {
        if let Err(e) = session.place_wager(key, *units) {
            ui::write_error(err, &format!("Cannot place {}:{}: {}", key, units, e))?;
            return Err(CliError::from(e));
        }
    }

    let break_after = std::env::var("STOPPER_SIM_BREAK_AFTER")
        .ok()
        .and_then(|v| v.parse::<u64>().ok());

    let mut completed = 0u64;
    let mut sink_warnings = 0u64;
    while completed < rounds {
        if completed > 0 {
            match session.rebet() {
                Ok(()) => {}
                Err(GameError::InsufficientFunds { requested, available }) => {
                    writeln!(
                        out,
                        "Bankroll exhausted after {} rounds: layout needs {}, {} left",
                        completed, requested, available
                    )?;
                    break;
                }
                Err(e) => {
                    ui::write_error(err, &e.to_string())?;
                    return Err(CliError::from(e));
                }
            }
        }

        session.start_round()?;
        let summary = session.run_to_completion()?;
        if summary.sink_warning.is_some() {
            sink_warnings += 1;
        }
        completed += 1;

        if let Some(b) = break_after
            && completed == b
        {
            writeln!(out, "Interrupted: saved {}/{}", completed, rounds)?;
            return Err(CliError::Interrupted(format!(
                "Interrupted: saved {}/{}",
                completed, rounds
            )));
        }
    }

    if sink_warnings > 0 {
        ui::display_warning(
            err,
            &format!("{} round(s) could not be written to the run log", sink_warnings),
        )?;
    }

    let stats = session.stats();
    tracing::info!(
        rounds = completed,
        seed = base_seed,
        bankroll = session.bankroll(),
        "simulation finished"
    );
    let summary = serde_json::json!({
        "rounds": stats.hands_played,
        "seed": base_seed,
        "paytable": session.paytable().id,
        "total_wagered": stats.total_wagered,
        "total_paid": stats.total_paid,
        "hold": stats.hold(),
        "house_edge": stats.house_edge_display(),
        "bankroll": session.bankroll(),
    });
    writeln!(out, "Simulated: {} rounds", completed)?;
    let json_str = serde_json::to_string_pretty(&summary).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}
