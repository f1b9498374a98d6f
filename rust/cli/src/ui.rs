//! Terminal output helpers shared by the commands.

use std::io::Write;

use stopper_engine::engine::{NumberHit, RoundSummary};
use stopper_engine::ledger::Wager;
use stopper_engine::stats::RoundStats;

pub fn write_error(err: &mut dyn Write, msg: &str) -> std::io::Result<()> {
    writeln!(err, "Error: {}", msg)
}

/// Display a warning message to stderr with "WARNING:" prefix
pub fn display_warning(err: &mut dyn Write, message: &str) -> std::io::Result<()> {
    writeln!(err, "WARNING: {}", message)
}

/// `+60`, `-10`, `0`
pub fn signed(n: i64) -> String {
    if n > 0 {
        format!("+{}", n)
    } else {
        n.to_string()
    }
}

pub fn format_hit(hit: &NumberHit) -> String {
    format!(
        "+{} on {} (hit {}, {}×)",
        hit.payout, hit.key, hit.hit, hit.multiplier
    )
}

/// One line per wager: key, chips, total.
pub fn write_wagers(out: &mut dyn Write, wagers: &[Wager]) -> std::io::Result<()> {
    if wagers.is_empty() {
        return writeln!(out, "No wagers on the layout");
    }
    for w in wagers {
        let chips: Vec<String> = w.chips.iter().map(|c| c.to_string()).collect();
        writeln!(out, "  {:<10} {:>5}  [{}]", w.key, w.units, chips.join(" "))?;
    }
    Ok(())
}

pub fn write_summary(out: &mut dyn Write, summary: &RoundSummary) -> std::io::Result<()> {
    let r = &summary.record;
    writeln!(
        out,
        "Stopper: {} after {} card(s)",
        r.stopper, r.total_cards
    )?;
    for p in &summary.side_bet_payouts {
        writeln!(out, "  +{} on {}", p.payout, p.key)?;
    }
    writeln!(
        out,
        "Round {}: wagered {} paid {} net {} | bankroll {}",
        r.round_id,
        r.total_wagered,
        r.total_paid,
        signed(r.net_result),
        r.bankroll_after
    )
}

pub fn write_stats(out: &mut dyn Write, stats: &RoundStats) -> std::io::Result<()> {
    writeln!(
        out,
        "Hands: {} | wagered {} | paid {} | hold {} | house edge {}",
        stats.hands_played,
        stats.total_wagered,
        stats.total_paid,
        stats.hold(),
        stats.house_edge_display()
    )
}
