//! Input parsing for the interactive table and the `sim --bet` flag.

use stopper_engine::ledger::Units;

/// A line typed at the `play` prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayCommand {
    /// Select the chip used by subsequent `bet`s
    Chip(Units),
    /// Place the selected chip on a spot
    Bet(String),
    Clear,
    /// Start a round and deal it to the stopper
    Deal,
    /// Start a round without dealing
    Start,
    /// Draw one card
    Next,
    Pause,
    Resume,
    /// Deal the round in progress to the stopper
    Run,
    Rebet,
    Paytable(String),
    Advanced(bool),
    /// Show the layout
    Bets,
    Stats,
    Paytables,
    Reset,
    Help,
}

#[derive(Debug, PartialEq)]
pub enum ParseResult {
    Command(PlayCommand),
    /// `q` or `quit`
    Quit,
    Invalid(String),
}

pub const PLAY_HELP: &str = "\
Commands:
  chip <N>            select a chip (5, 10, 25, 100)
  bet <KEY>           place the selected chip on a spot (7, A, bust-hearts, count-3, ...)
  clear               take every chip back
  deal                start a round and deal to the stopper
  start | next | run  start a round, draw one card, draw to the stopper
  pause | resume      suspend or continue the deal
  rebet               repeat last round's opening bets
  paytable <ID>       switch ladder (between rounds)
  advanced on|off     enable side bets
  bets | stats | paytables | reset | help | quit";

/// Parses one prompt line (case-insensitive).
///
/// ```rust
/// # use stopper_cli::validation::{parse_play_command, ParseResult, PlayCommand};
/// assert_eq!(parse_play_command("chip 25"), ParseResult::Command(PlayCommand::Chip(25)));
/// assert_eq!(parse_play_command("BET bust-Hearts"), ParseResult::Command(PlayCommand::Bet("bust-hearts".into())));
/// assert_eq!(parse_play_command("q"), ParseResult::Quit);
/// ```
pub fn parse_play_command(input: &str) -> ParseResult {
    let input = input.trim().to_lowercase();
    let parts: Vec<&str> = input.split_whitespace().collect();

    let Some(&head) = parts.first() else {
        return ParseResult::Invalid("Empty input".to_string());
    };
    if head == "q" || head == "quit" {
        return ParseResult::Quit;
    }

    let arg = parts.get(1).copied();
    let cmd = match (head, arg) {
        ("chip", Some(n)) => match n.parse::<Units>() {
            Ok(units) if units > 0 => PlayCommand::Chip(units),
            _ => return ParseResult::Invalid(format!("Invalid chip '{}'", n)),
        },
        ("chip", None) => {
            return ParseResult::Invalid("chip requires a value (e.g., 'chip 25')".to_string());
        }
        ("bet" | "b", Some(key)) => PlayCommand::Bet(normalize_key(key)),
        ("bet" | "b", None) => {
            return ParseResult::Invalid("bet requires a spot (e.g., 'bet 7')".to_string());
        }
        ("paytable", Some(id)) => PlayCommand::Paytable(id.to_string()),
        ("paytable", None) => {
            return ParseResult::Invalid(
                "paytable requires an id (e.g., 'paytable paytable-2')".to_string(),
            );
        }
        ("advanced", Some(flag)) => match flag {
            "on" | "true" | "1" => PlayCommand::Advanced(true),
            "off" | "false" | "0" => PlayCommand::Advanced(false),
            _ => return ParseResult::Invalid("advanced takes on|off".to_string()),
        },
        ("advanced", None) => return ParseResult::Invalid("advanced takes on|off".to_string()),
        ("clear", _) => PlayCommand::Clear,
        ("deal" | "d", _) => PlayCommand::Deal,
        ("start", _) => PlayCommand::Start,
        ("next" | "n", _) => PlayCommand::Next,
        ("pause", _) => PlayCommand::Pause,
        ("resume", _) => PlayCommand::Resume,
        ("run", _) => PlayCommand::Run,
        ("rebet" | "r", _) => PlayCommand::Rebet,
        ("bets", _) => PlayCommand::Bets,
        ("stats", _) => PlayCommand::Stats,
        ("paytables", _) => PlayCommand::Paytables,
        ("reset", _) => PlayCommand::Reset,
        ("help" | "h" | "?", _) => PlayCommand::Help,
        _ => {
            return ParseResult::Invalid(format!(
                "Unrecognized command '{}'. Type 'help' for the list",
                head
            ));
        }
    };
    ParseResult::Command(cmd)
}

/// Catalog keys are lowercase except the face/ace number labels.
fn normalize_key(key: &str) -> String {
    match key {
        "a" => "A".to_string(),
        other => other.to_string(),
    }
}

/// Parses `KEY:UNITS` as given to `sim --bet`.
pub fn parse_bet_spec(spec: &str) -> Result<(String, Units), String> {
    let (key, units) = spec
        .rsplit_once(':')
        .ok_or_else(|| format!("Invalid bet '{}': expected KEY:UNITS", spec))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("Invalid bet '{}': missing key", spec));
    }
    let units = units
        .trim()
        .parse::<Units>()
        .map_err(|_| format!("Invalid bet '{}': units must be a number", spec))?;
    Ok((key.to_string(), units))
}
