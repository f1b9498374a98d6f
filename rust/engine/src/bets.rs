use serde::{Deserialize, Serialize};

use crate::cards::{DeckConfig, Rank, Suit};

/// Kind of wager; every kind except `Number` needs advanced mode.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BetType {
    /// Pays along the ladder on every matching non-stopper card
    Number,
    /// Pays if the stopper has the bound suit
    BustSuit,
    /// Pays if the stopper has the bound face rank
    BustRank,
    /// Pays if the stopper is the Joker
    BustJoker,
    /// Pays on the number of cards drawn when the stopper lands
    Count,
}

impl BetType {
    pub fn requires_advanced(self) -> bool {
        self != BetType::Number
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BetType::Number => "number",
            BetType::BustSuit => "bust-suit",
            BetType::BustRank => "bust-rank",
            BetType::BustJoker => "bust-joker",
            BetType::Count => "count",
        }
    }
}

/// What a bet spot is bound to.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BetTarget {
    Number(Rank),
    BustSuit(Suit),
    BustRank(Rank),
    BustJoker,
    /// `max: None` is unbounded.
    Count { min: u32, max: Option<u32> },
}

impl BetTarget {
    pub fn bet_type(&self) -> BetType {
        match self {
            BetTarget::Number(_) => BetType::Number,
            BetTarget::BustSuit(_) => BetType::BustSuit,
            BetTarget::BustRank(_) => BetType::BustRank,
            BetTarget::BustJoker => BetType::BustJoker,
            BetTarget::Count { .. } => BetType::Count,
        }
    }
}

/// One bet spot on the layout.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct BetDefinition {
    /// Stable key used by placement, layouts and run-log records
    pub key: String,
    /// Human readable name
    pub label: String,
    pub target: BetTarget,
    /// Locked bets can only be placed while betting is open
    pub lock_during_hand: bool,
    /// Side-bet multiplier applied to the stake; unused by number bets
    pub payout: u64,
}

impl BetDefinition {
    pub fn bet_type(&self) -> BetType {
        self.target.bet_type()
    }

    pub fn announce(&self) -> String {
        match self.target {
            BetTarget::Number(rank) => format!("Bet on {}", rank.describe()),
            BetTarget::Count { .. } => format!("{} card count", self.label),
            BetTarget::BustSuit(suit) => format!("Bust suit {}", suit.name()),
            BetTarget::BustRank(rank) => format!("Bust {}", rank.label()),
            BetTarget::BustJoker => "Bust Joker".to_string(),
        }
    }
}

/// The full set of bet spots for one deck universe.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct BetCatalog {
    definitions: Vec<BetDefinition>,
}

const BUST_SUIT_PAYOUT: u64 = 3;
const BUST_RANK_PAYOUT: u64 = 2;
const BUST_JOKER_PAYOUT: u64 = 11;

const COUNT_SPOTS: [(&str, &str, u32, Option<u32>, u64); 6] = [
    ("count-1", "1", 1, Some(1), 3),
    ("count-2", "2", 2, Some(2), 4),
    ("count-3", "3", 3, Some(3), 5),
    ("count-4-6", "4-6", 4, Some(6), 2),
    ("count-7-9", "7-9", 7, Some(9), 4),
    ("count-10+", "10+", 10, None, 6),
];

impl BetCatalog {
    /// Number spots for every numeric rank, bust spots for every suit and
    /// face, the Joker spot and the card-count spots.
    pub fn standard(deck: &DeckConfig) -> Self {
        let mut defs = Vec::new();
        for &rank in &deck.numeric_ranks {
            defs.push(BetDefinition {
                key: rank.label().to_string(),
                label: rank.label().to_string(),
                target: BetTarget::Number(rank),
                lock_during_hand: true,
                payout: 0,
            });
        }
        for &suit in &deck.suits {
            defs.push(BetDefinition {
                key: format!("bust-{}", suit.name().to_ascii_lowercase()),
                label: format!("Bust {}", suit.symbol()),
                target: BetTarget::BustSuit(suit),
                lock_during_hand: false,
                payout: BUST_SUIT_PAYOUT,
            });
        }
        for &face in &deck.face_ranks {
            defs.push(BetDefinition {
                key: format!("bust-{}", face.label().to_ascii_lowercase()),
                label: format!("Bust {}", face.label()),
                target: BetTarget::BustRank(face),
                lock_during_hand: false,
                payout: BUST_RANK_PAYOUT,
            });
        }
        defs.push(BetDefinition {
            key: "bust-joker".to_string(),
            label: "Bust Joker".to_string(),
            target: BetTarget::BustJoker,
            lock_during_hand: false,
            payout: BUST_JOKER_PAYOUT,
        });
        for (key, label, min, max, payout) in COUNT_SPOTS {
            defs.push(BetDefinition {
                key: key.to_string(),
                label: label.to_string(),
                target: BetTarget::Count { min, max },
                lock_during_hand: true,
                payout,
            });
        }
        Self { definitions: defs }
    }

    pub fn get(&self, key: &str) -> Option<&BetDefinition> {
        self.definitions.iter().find(|d| d.key == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &BetDefinition> {
        self.definitions.iter()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}
