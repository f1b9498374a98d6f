//! # Play Command
//!
//! Interactive table driven one line at a time from stdin.
//!
//! The session never sleeps on its own; `deal` and `run` pace the draw with
//! the configured deal delay unless `--fast` is given. Engine errors (locked
//! spot, short bankroll, wrong state) are reported and the prompt continues.

use crate::commands::paytables::handle_paytables_command;
use crate::config;
use crate::error::CliError;
use crate::io_utils::read_stdin_line;
use crate::ui;
use crate::validation::{PLAY_HELP, ParseResult, PlayCommand, parse_play_command};
use std::io::{BufRead, Write};
use stopper_engine::engine::{GameSession, RoundEvent, RoundState};
use stopper_engine::errors::GameError;
use stopper_engine::ledger::Units;

/// Handle the play command: interactive wagering session
///
/// # Arguments
///
/// * `seed` - RNG seed; falls back to the configured seed, then a random one
/// * `paytable` - Paytable id overriding the configured one
/// * `advanced` - Open the table with side bets enabled
/// * `fast` - Skip the pause between dealt cards
/// * `out` - Output stream for the table display
/// * `err` - Error stream for rejected commands and warnings
/// * `stdin` - Input stream for commands
///
/// # Examples
///
/// ```ignore
/// use stopper_cli::commands::handle_play_command;
/// use std::io::{stdin, stdout, stderr};
///
/// let mut input = stdin().lock();
/// handle_play_command(Some(7), None, false, true, &mut stdout(), &mut stderr(), &mut input).unwrap();
/// ```
pub fn handle_play_command(
    seed: Option<u64>,
    paytable: Option<String>,
    advanced: bool,
    fast: bool,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<(), CliError> {
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
    let seed = seed
        .or(resolved.config.seed)
        .unwrap_or_else(rand::random);

    let mut session = match GameSession::with_seed(game_config, seed) {
        Ok(s) => s,
        Err(e) => {
            ui::write_error(err, &e.to_string())?;
            return Err(CliError::from(e));
        }
    };

    writeln!(
        out,
        "play: seed={} paytable={} bankroll={}",
        seed,
        session.paytable().id,
        session.bankroll()
    )?;
    writeln!(out, "Type 'help' for commands, 'quit' to leave")?;

    let mut chip: Units = session.config().denominations.first().copied().unwrap_or(5);

    loop {
        write!(out, "[{} | chip {}] > ", session.bankroll(), chip)?;
        out.flush()?;
        let Some(line) = read_stdin_line(stdin) else {
            writeln!(out)?;
            break;
        };
        if line.is_empty() {
            continue;
        }
        let cmd = match parse_play_command(&line) {
            ParseResult::Command(cmd) => cmd,
            ParseResult::Quit => break,
            ParseResult::Invalid(msg) => {
                ui::write_error(err, &msg)?;
                continue;
            }
        };
        if let PlayCommand::Chip(units) = cmd {
            if session.config().denominations.contains(&units) {
                chip = units;
                writeln!(out, "Chip: {}", chip)?;
            } else {
                ui::write_error(err, &GameError::InvalidChip { units }.to_string())?;
            }
            continue;
        }
        match apply(&mut session, cmd, chip, fast, out, err) {
            Ok(()) => {}
            Err(PlayError::Game(e)) => ui::write_error(err, &e.to_string())?,
            Err(PlayError::Io(e)) => return Err(CliError::Io(e)),
        }
    }

    if session.state() != RoundState::Idle {
        ui::display_warning(err, "left with a round in progress")?;
    }
    writeln!(out, "Session over")?;
    ui::write_stats(out, session.stats())?;
    writeln!(out, "Bankroll: {}", session.bankroll())?;
    Ok(())
}

/// Runs one table command. Engine refusals come back as `PlayError::Game`.
fn apply(
    session: &mut GameSession,
    cmd: PlayCommand,
    chip: Units,
    fast: bool,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), PlayError> {
    match cmd {
        PlayCommand::Chip(_) => {}
        PlayCommand::Bet(key) => {
            let wager = session.place_wager(&key, chip)?;
            writeln!(
                out,
                "{}: {} on the spot | bankroll {}",
                wager.key,
                wager.units,
                session.bankroll()
            )?;
        }
        PlayCommand::Clear => {
            let returned = session.clear_wagers()?;
            writeln!(out, "Returned {} | bankroll {}", returned, session.bankroll())?;
        }
        PlayCommand::Deal => {
            session.start_round()?;
            deal_to_stopper(session, fast, out, err)?;
        }
        PlayCommand::Start => {
            session.start_round()?;
            writeln!(out, "Round started")?;
        }
        PlayCommand::Next => {
            let event = session.step()?;
            write_event(&event, out, err)?;
        }
        PlayCommand::Run => deal_to_stopper(session, fast, out, err)?,
        PlayCommand::Pause => {
            session.pause()?;
            writeln!(out, "Paused")?;
        }
        PlayCommand::Resume => {
            session.resume()?;
            writeln!(out, "Resumed")?;
        }
        PlayCommand::Rebet => {
            session.rebet()?;
            ui::write_wagers(out, session.wagers())?;
        }
        PlayCommand::Paytable(id) => {
            let p = session.select_paytable(&id)?;
            writeln!(out, "Paytable: {} ({})", p.id, p.summary())?;
        }
        PlayCommand::Advanced(enabled) => {
            session.set_advanced_mode(enabled)?;
            writeln!(
                out,
                "Advanced mode: {}",
                if enabled { "on" } else { "off" }
            )?;
        }
        PlayCommand::Bets => ui::write_wagers(out, session.wagers())?,
        PlayCommand::Stats => {
            ui::write_stats(out, session.stats())?;
            writeln!(out, "Bankroll: {}", session.bankroll())?;
        }
        PlayCommand::Paytables => {
            handle_paytables_command(out)
                .map_err(|e| PlayError::Io(std::io::Error::other(e.to_string())))?
        }
        PlayCommand::Reset => {
            session.reset_account()?;
            writeln!(out, "Account reset | bankroll {}", session.bankroll())?;
        }
        PlayCommand::Help => writeln!(out, "{}", PLAY_HELP)?,
    }
    Ok(())
}

/// Steps until the stopper lands or the deal is refused (paused, no round).
fn deal_to_stopper(
    session: &mut GameSession,
    fast: bool,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), PlayError> {
    loop {
        let event = session.step()?;
        write_event(&event, out, err)?;
        if matches!(event, RoundEvent::Settled(_)) {
            return Ok(());
        }
        if !fast {
            std::thread::sleep(session.deal_delay());
        }
    }
}

fn write_event(
    event: &RoundEvent,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> std::io::Result<()> {
    match event {
        RoundEvent::CardDealt { card, draw, hits } => {
            if hits.is_empty() {
                writeln!(out, "Card {}: {}", draw, card)
            } else {
                let paid: Vec<String> = hits.iter().map(ui::format_hit).collect();
                writeln!(out, "Card {}: {}  {}", draw, card, paid.join("  "))
            }
        }
        RoundEvent::Settled(summary) => {
            ui::write_summary(out, summary)?;
            if let Some(warning) = &summary.sink_warning {
                ui::display_warning(err, warning)?;
            }
            Ok(())
        }
    }
}

/// A refused command, or an output failure that ends the session.
#[derive(Debug)]
enum PlayError {
    Game(GameError),
    Io(std::io::Error),
}

impl From<GameError> for PlayError {
    fn from(e: GameError) -> Self {
        PlayError::Game(e)
    }
}

impl From<std::io::Error> for PlayError {
    fn from(e: std::io::Error) -> Self {
        PlayError::Io(e)
    }
}
