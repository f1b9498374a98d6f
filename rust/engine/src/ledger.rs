use serde::{Deserialize, Serialize};

use crate::bets::{BetCatalog, BetDefinition, BetTarget, BetType};
use crate::errors::GameError;

/// Chip units. All accounting is integral.
pub type Units = u64;

/// Chip denominations offered at the table.
pub const DENOMINATIONS: [Units; 4] = [5, 10, 25, 100];

/// Stake and round progress on a single bet spot.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Wager {
    /// Bet spot key from the catalog
    pub key: String,
    pub bet_type: BetType,
    pub target: BetTarget,
    /// Every chip placed on the spot, in placement order
    pub chips: Vec<Units>,
    /// Sum of `chips`
    pub units: Units,
    /// Ladder hits this round (number bets only)
    pub hits: u32,
    /// Total credited to the bankroll for this wager this round
    pub paid: Units,
}

/// What the table currently allows a placement to do.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct BettingGate {
    /// No round in progress
    pub betting_open: bool,
    pub advanced_mode: bool,
    /// Unlocked side bets may join a round in progress
    pub allow_in_hand: bool,
}

impl BettingGate {
    pub fn open(advanced_mode: bool) -> Self {
        Self {
            betting_open: true,
            advanced_mode,
            allow_in_hand: false,
        }
    }

    pub fn check(&self, def: &BetDefinition) -> Result<(), GameError> {
        if !self.betting_open {
            let locked = def.lock_during_hand || def.bet_type() == BetType::Number;
            if locked || !self.allow_in_hand {
                return Err(GameError::BettingClosed {
                    key: def.key.clone(),
                });
            }
        }
        if def.bet_type().requires_advanced() && !self.advanced_mode {
            return Err(GameError::ModeDisabled {
                key: def.key.clone(),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct LayoutEntry {
    pub key: String,
    pub chips: Vec<Units>,
}

/// Chip-level picture of the wagers, replayed by rebet.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct BetLayout {
    pub entries: Vec<LayoutEntry>,
}

impl BetLayout {
    pub fn total_units(&self) -> Units {
        self.entries.iter().flat_map(|e| e.chips.iter()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn needs_advanced(&self, catalog: &BetCatalog) -> bool {
        self.entries.iter().any(|e| {
            catalog
                .get(&e.key)
                .is_some_and(|d| d.bet_type().requires_advanced())
        })
    }
}

/// Bankroll plus the open wagers of the current round.
#[derive(Debug, Clone)]
pub struct Ledger {
    bankroll: Units,
    wagers: Vec<Wager>,
    denominations: Vec<Units>,
}

impl Ledger {
    pub fn new(bankroll: Units, denominations: &[Units]) -> Self {
        Self {
            bankroll,
            wagers: Vec::new(),
            denominations: denominations.to_vec(),
        }
    }

    pub fn bankroll(&self) -> Units {
        self.bankroll
    }

    pub fn wagers(&self) -> &[Wager] {
        &self.wagers
    }

    /// Stakes currently on the layout.
    pub fn outstanding(&self) -> Units {
        self.wagers.iter().map(|w| w.units).sum()
    }

    pub fn total_paid(&self) -> Units {
        self.wagers.iter().map(|w| w.paid).sum()
    }

    /// Adds one chip to a bet spot. On any error nothing changes.
    pub fn place(
        &mut self,
        def: &BetDefinition,
        units: Units,
        gate: BettingGate,
    ) -> Result<&Wager, GameError> {
        if units == 0 || !self.denominations.contains(&units) {
            return Err(GameError::InvalidChip { units });
        }
        gate.check(def)?;
        if units > self.bankroll {
            return Err(GameError::InsufficientFunds {
                requested: units,
                available: self.bankroll,
            });
        }

        self.bankroll -= units;
        let idx = match self.wagers.iter().position(|w| w.key == def.key) {
            Some(i) => {
                let w = &mut self.wagers[i];
                w.units += units;
                w.chips.push(units);
                i
            }
            None => {
                self.wagers.push(Wager {
                    key: def.key.clone(),
                    bet_type: def.bet_type(),
                    target: def.target,
                    chips: vec![units],
                    units,
                    hits: 0,
                    paid: 0,
                });
                self.wagers.len() - 1
            }
        };
        Ok(&self.wagers[idx])
    }

    /// Refunds every stake and empties the layout. Returns the refund.
    pub fn clear(&mut self, betting_open: bool) -> Result<Units, GameError> {
        if !betting_open {
            return Err(GameError::InvalidState("bets cannot be cleared during a hand"));
        }
        let refund = self.outstanding();
        self.bankroll += refund;
        self.wagers.clear();
        Ok(refund)
    }

    pub fn snapshot(&self) -> BetLayout {
        BetLayout {
            entries: self
                .wagers
                .iter()
                .map(|w| LayoutEntry {
                    key: w.key.clone(),
                    chips: w.chips.clone(),
                })
                .collect(),
        }
    }

    /// Replays `layout` chip by chip on top of the current wagers. Everything
    /// is validated first, so a failing restore leaves the ledger untouched.
    pub fn restore(
        &mut self,
        layout: &BetLayout,
        catalog: &BetCatalog,
        gate: BettingGate,
    ) -> Result<(), GameError> {
        let mut defs = Vec::with_capacity(layout.entries.len());
        for entry in &layout.entries {
            let def = catalog.get(&entry.key).ok_or_else(|| GameError::UnknownBet {
                key: entry.key.clone(),
            })?;
            gate.check(def)?;
            if let Some(&bad) = entry
                .chips
                .iter()
                .find(|c| **c == 0 || !self.denominations.contains(c))
            {
                return Err(GameError::InvalidChip { units: bad });
            }
            defs.push(def);
        }
        let needed = layout.total_units();
        if needed > self.bankroll {
            return Err(GameError::InsufficientFunds {
                requested: needed,
                available: self.bankroll,
            });
        }
        for (entry, def) in layout.entries.iter().zip(defs) {
            for &chip in &entry.chips {
                self.place(def, chip, gate)?;
            }
        }
        Ok(())
    }

    /// Start-of-round reset: stakes stay, hits and payouts go back to zero.
    pub fn reset_round_counters(&mut self) {
        for w in &mut self.wagers {
            w.hits = 0;
            w.paid = 0;
        }
    }

    /// Credits a payout to the wager at `index` and to the bankroll in one step.
    pub(crate) fn credit(&mut self, index: usize, amount: Units) {
        if let Some(w) = self.wagers.get_mut(index) {
            w.paid += amount;
            self.bankroll += amount;
        }
    }

    pub(crate) fn record_hit(&mut self, index: usize, amount: Units) {
        if let Some(w) = self.wagers.get_mut(index) {
            w.hits += 1;
        }
        self.credit(index, amount);
    }

    /// Ends the round: wagers leave the layout with no refund.
    pub(crate) fn close_round(&mut self) -> Vec<Wager> {
        std::mem::take(&mut self.wagers)
    }

    pub(crate) fn reset(&mut self, bankroll: Units) {
        self.bankroll = bankroll;
        self.wagers.clear();
    }
}
