use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::cards::DeckConfig;
use crate::ledger::{Units, DENOMINATIONS};
use crate::paytable::DEFAULT_PAYTABLE_ID;
use crate::settlement::SideBetRules;

pub const INITIAL_BANKROLL: Units = 1000;
pub const DEAL_DELAY_MS: u64 = 420;

/// Table configuration. Read when a round starts and fixed until it settles.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Rank/suit universe
    pub deck: DeckConfig,
    /// Chip values a placement may use
    pub denominations: Vec<Units>,
    /// Id of the paytable active when the session opens
    pub paytable: String,
    /// Unlocks bust and count wagers
    pub advanced_mode: bool,
    /// Allows pausing a deal and adding unlocked side bets mid-round
    pub allow_pause: bool,
    /// Presentation pacing between non-stopper cards, in milliseconds
    pub deal_delay_ms: u64,
    pub initial_bankroll: Units,
    pub side_bets: SideBetRules,
}

impl GameConfig {
    pub fn deal_delay(&self) -> Duration {
        Duration::from_millis(self.deal_delay_ms)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            deck: DeckConfig::standard(),
            denominations: DENOMINATIONS.to_vec(),
            paytable: DEFAULT_PAYTABLE_ID.to_string(),
            advanced_mode: false,
            allow_pause: true,
            deal_delay_ms: DEAL_DELAY_MS,
            initial_bankroll: INITIAL_BANKROLL,
            side_bets: SideBetRules::default(),
        }
    }
}
