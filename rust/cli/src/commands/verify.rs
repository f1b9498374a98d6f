//! Verify command handler module.
//!
//! Checks every record of a run log for accounting and rule consistency:
//!
//! - Valid round ids (format: YYYYMMDD-NNNNNN)
//! - `net_result == total_paid - total_wagered`
//! - Totals equal the per-bet sums; each bet's units equal its chips
//! - The stopper card is flagged as a stopper and ends the count
//! - Number-bet hits stay within the ladder and the cards drawn, and pay
//!   exactly the ladder sum
//! - Bankroll continuity between consecutive records
//!
//! Errors are collected using the shared `BatchValidationError` pattern for structured reporting.

use crate::error::{BatchValidationError, CliError};
use crate::io_utils::read_text_auto;
use crate::ui;
use std::collections::HashSet;
use std::io::Write;
use stopper_engine::bets::BetType;
use stopper_engine::logger::RoundRecord;
use stopper_engine::paytable::Paytable;

/// The `usize` context is the 1-based record number.
type VerifyError = BatchValidationError<usize>;

/// Handle the verify command - validate run log integrity.
///
/// # Arguments
///
/// * `input` - Path to a JSONL (or .jsonl.zst) run log
/// * `out` - Output stream for the verdict
/// * `err` - Output stream for the error report
///
/// # Returns
///
/// `Ok(())` if all checks pass, otherwise an `Err` that maps to exit code `2`.
///
/// # Example
///
/// ```no_run
/// # use std::io;
/// # use stopper_cli::commands::handle_verify_command;
/// let input = "data/runs/session.jsonl".to_string();
/// let result = handle_verify_command(input, &mut io::stdout(), &mut io::stderr());
/// ```
pub fn handle_verify_command(
    input: String,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let content = match read_text_auto(&input) {
        Ok(c) => c,
        Err(e) => {
            ui::write_error(err, &format!("Failed to read {}: {}", input, e))?;
            return Err(CliError::Config(format!("Failed to read {}: {}", input, e)));
        }
    };

    let mut errors: Vec<VerifyError> = Vec::new();
    let mut rounds = 0usize;
    let mut seen_ids = HashSet::new();
    let mut prev_bankroll: Option<u64> = None;

    for line in content.lines().filter(|l| !l.trim().is_empty()) {
        rounds += 1;
        let rec: RoundRecord = match serde_json::from_str(line) {
            Ok(r) => r,
            Err(e) => {
                errors.push(VerifyError {
                    item_context: rounds,
                    message: format!("Invalid record: {}", e),
                });
                prev_bankroll = None;
                continue;
            }
        };

        for message in check_record(&rec) {
            errors.push(VerifyError {
                item_context: rounds,
                message,
            });
        }

        if !seen_ids.insert(rec.round_id.clone()) {
            errors.push(VerifyError {
                item_context: rounds,
                message: format!("Duplicate round_id {}", rec.round_id),
            });
        }

        if let Some(before) = prev_bankroll {
            let expected = i128::from(before) - i128::from(rec.total_wagered)
                + i128::from(rec.total_paid);
            if expected != i128::from(rec.bankroll_after) {
                errors.push(VerifyError {
                    item_context: rounds,
                    message: format!(
                        "Bankroll discontinuity: {} - {} + {} = {}, recorded {}",
                        before, rec.total_wagered, rec.total_paid, expected, rec.bankroll_after
                    ),
                });
            }
        }
        prev_bankroll = Some(rec.bankroll_after);
    }

    if errors.is_empty() {
        writeln!(out, "Verify: OK (rounds={})", rounds)?;
        Ok(())
    } else {
        writeln!(out, "Verify: FAIL (rounds={})", rounds)?;
        writeln!(err)?;
        writeln!(err, "Errors found:")?;
        for error in &errors {
            writeln!(err, "  Round {}: {}", error.item_context, error.message)?;
        }
        writeln!(err)?;
        let invalid: HashSet<usize> = errors.iter().map(|e| e.item_context).collect();
        writeln!(
            err,
            "Summary: {} error(s) in {} rounds ({} invalid rounds)",
            errors.len(),
            rounds,
            invalid.len()
        )?;
        Err(CliError::InvalidInput(format!(
            "{} validation errors found",
            errors.len()
        )))
    }
}

fn valid_round_id(s: &str) -> bool {
    let Some((date, seq)) = s.split_once('-') else {
        return false;
    };
    date.len() == 8
        && seq.len() == 6
        && date.bytes().all(|b| b.is_ascii_digit())
        && seq.bytes().all(|b| b.is_ascii_digit())
}

/// `None` when the sum does not fit in a `u64`.
fn checked_total(values: impl IntoIterator<Item = u64>) -> Option<u64> {
    values.into_iter().try_fold(0u64, |acc, v| acc.checked_add(v))
}

/// Self-contained checks on one record.
fn check_record(rec: &RoundRecord) -> Vec<String> {
    let mut problems = Vec::new();

    if !valid_round_id(&rec.round_id) {
        problems.push(format!("Invalid round_id '{}'", rec.round_id));
    }
    if i128::from(rec.net_result) != i128::from(rec.total_paid) - i128::from(rec.total_wagered) {
        problems.push(format!(
            "net_result {} does not match paid {} - wagered {}",
            rec.net_result, rec.total_paid, rec.total_wagered
        ));
    }
    if !rec.stopper.stopper {
        problems.push(format!("Round ended on non-stopper {}", rec.stopper));
    }
    if rec.non_stopper_count.checked_add(1) != Some(rec.total_cards) {
        problems.push(format!(
            "total_cards {} should be non_stopper_count {} + 1",
            rec.total_cards, rec.non_stopper_count
        ));
    }

    match checked_total(rec.bets.iter().map(|b| b.units)) {
        Some(units) if units != rec.total_wagered => problems.push(format!(
            "total_wagered {} does not match bets {}",
            rec.total_wagered, units
        )),
        Some(_) => {}
        None => problems.push("bet units overflow".to_string()),
    }
    match checked_total(rec.bets.iter().map(|b| b.paid)) {
        Some(paid) if paid != rec.total_paid => problems.push(format!(
            "total_paid {} does not match bets {}",
            rec.total_paid, paid
        )),
        Some(_) => {}
        None => problems.push("bet payouts overflow".to_string()),
    }

    let ladder = Paytable::by_id(&rec.paytable);
    if ladder.is_none() {
        problems.push(format!("Unknown paytable {}", rec.paytable));
    }

    for bet in &rec.bets {
        if checked_total(bet.chips.iter().copied()) != Some(bet.units) {
            problems.push(format!("{}: chips do not add up to {}", bet.key, bet.units));
        }
        if bet.bet_type != BetType::Number {
            if bet.hits != 0 {
                problems.push(format!("{}: side bet recorded ladder hits", bet.key));
            }
            continue;
        }
        if bet.hits > rec.non_stopper_count {
            problems.push(format!(
                "{}: {} hits with only {} cards drawn",
                bet.key, bet.hits, rec.non_stopper_count
            ));
        }
        let Some(ladder) = &ladder else { continue };
        if bet.hits > ladder.len() {
            problems.push(format!(
                "{}: {} hits exceed the {}-step ladder",
                bet.key,
                bet.hits,
                ladder.len()
            ));
            continue;
        }
        let Some(expected) = checked_total(ladder.steps[..bet.hits as usize].iter().copied())
            .and_then(|ladder_sum| ladder_sum.checked_mul(bet.units))
        else {
            problems.push(format!("{}: ladder payout overflows", bet.key));
            continue;
        };
        if bet.paid != expected {
            problems.push(format!(
                "{}: paid {} but {} hits on {} pay {}",
                bet.key, bet.paid, bet.hits, ladder.id, expected
            ));
        }
    }

    problems
}
