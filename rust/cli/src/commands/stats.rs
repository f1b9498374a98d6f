//! Statistics aggregation over run logs.
//!
//! Sums wagered and paid units across every record, derives hold and house
//! edge, and reports how often each rank stopped the draw.

use crate::error::CliError;
use crate::io_utils::{collect_run_logs, parse_run_log, read_text_auto};
use crate::ui;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;
use stopper_engine::stats::RoundStats;

/// Aggregates statistics from run logs.
///
/// # Arguments
///
/// * `input` - JSONL / .jsonl.zst file, or a directory searched recursively
/// * `out` - Output stream for the JSON report
/// * `err` - Output stream for skipped-line warnings and errors
///
/// # Returns
///
/// `Ok(())` when every counted record is self-consistent. A single file with
/// no readable record, or a record whose `net_result` disagrees with its
/// totals, maps to exit code `2`.
pub fn handle_stats_command(
    input: String,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let path = Path::new(&input);
    if !path.exists() {
        ui::write_error(err, &format!("Failed to read {}: not found", input))?;
        return Err(CliError::Config(format!("Failed to read {}: not found", input)));
    }

    let mut totals = RoundStats::default();
    let mut stoppers: BTreeMap<String, u64> = BTreeMap::new();
    let mut cards_drawn = 0u64;
    let mut corrupted = 0usize;
    let mut truncated = 0usize;
    let mut stats_ok = true;

    for file in collect_run_logs(path) {
        let content = match read_text_auto(&file.to_string_lossy()) {
            Ok(c) => c,
            Err(e) => {
                if !path.is_dir() {
                    ui::write_error(err, &format!("Failed to read {}: {}", input, e))?;
                    return Err(CliError::Config(format!("Failed to read {}: {}", input, e)));
                }
                ui::display_warning(err, &format!("Skipping {}: {}", file.display(), e))?;
                continue;
            }
        };
        let parsed = parse_run_log(&content);
        corrupted += parsed.corrupted.len();
        if parsed.truncated {
            truncated += 1;
        }
        for (line_no, rec) in parsed.records {
            if i128::from(rec.net_result)
                != i128::from(rec.total_paid) - i128::from(rec.total_wagered)
            {
                stats_ok = false;
                ui::write_error(
                    err,
                    &format!(
                        "{}:{}: net_result does not match paid - wagered in round {}",
                        file.display(),
                        line_no,
                        rec.round_id
                    ),
                )?;
                continue;
            }
            if totals
                .checked_record(rec.total_wagered, rec.total_paid)
                .is_none()
            {
                stats_ok = false;
                ui::write_error(
                    err,
                    &format!(
                        "{}:{}: totals overflow at round {}",
                        file.display(),
                        line_no,
                        rec.round_id
                    ),
                )?;
                continue;
            }
            cards_drawn = cards_drawn.saturating_add(u64::from(rec.total_cards));
            *stoppers
                .entry(rec.stopper.rank.label().to_string())
                .or_insert(0) += 1;
        }
    }

    if corrupted > 0 {
        ui::write_error(err, &format!("Skipped {} corrupted record(s)", corrupted))?;
    }
    if truncated > 0 {
        ui::write_error(
            err,
            &format!("Discarded {} incomplete final line(s)", truncated),
        )?;
    }
    if !path.is_dir() && totals.hands_played == 0 && (corrupted > 0 || truncated > 0) {
        ui::write_error(err, "Invalid record")?;
        return Err(CliError::InvalidInput("Invalid record".to_string()));
    }

    let mean_cards = if totals.hands_played == 0 {
        0.0
    } else {
        cards_drawn as f64 / totals.hands_played as f64
    };
    let summary = serde_json::json!({
        "rounds": totals.hands_played,
        "total_wagered": totals.total_wagered,
        "total_paid": totals.total_paid,
        "hold": totals.hold(),
        "house_edge": totals.house_edge_display(),
        "stoppers": stoppers,
        "mean_cards": (mean_cards * 100.0).round() / 100.0,
    });
    let json_output = serde_json::to_string_pretty(&summary)
        .map_err(|e| CliError::InvalidInput(format!("Failed to serialize stats: {}", e)))?;
    writeln!(out, "{}", json_output)?;
    if stats_ok {
        Ok(())
    } else {
        Err(CliError::InvalidInput(
            "Statistics validation failed".to_string(),
        ))
    }
}
