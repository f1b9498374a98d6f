use serde::{Deserialize, Serialize};

use crate::ledger::Units;

/// Lifetime totals until the account is reset.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct RoundStats {
    pub hands_played: u64,
    pub total_wagered: Units,
    pub total_paid: Units,
}

impl RoundStats {
    pub fn record(&mut self, wagered: Units, paid: Units) {
        self.hands_played += 1;
        self.total_wagered += wagered;
        self.total_paid += paid;
    }

    /// Like [`record`](Self::record) for totals read back from a log.
    /// Leaves the stats untouched and returns `None` if a counter would overflow.
    pub fn checked_record(&mut self, wagered: Units, paid: Units) -> Option<()> {
        let hands_played = self.hands_played.checked_add(1)?;
        let total_wagered = self.total_wagered.checked_add(wagered)?;
        let total_paid = self.total_paid.checked_add(paid)?;
        *self = Self {
            hands_played,
            total_wagered,
            total_paid,
        };
        Some(())
    }

    /// Wagered minus paid; negative when the player is ahead.
    pub fn hold(&self) -> i64 {
        let hold = i128::from(self.total_wagered) - i128::from(self.total_paid);
        hold.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64
    }

    pub fn house_edge_percent(&self) -> f64 {
        if self.total_wagered == 0 {
            return 0.0;
        }
        self.hold() as f64 / self.total_wagered as f64 * 100.0
    }

    /// House edge rounded to two decimals, e.g. `"12.50%"`.
    pub fn house_edge_display(&self) -> String {
        format!("{:.2}%", self.house_edge_percent())
    }
}
