use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four suits. The Joker carries no suit.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Suit {
    /// Spades (♠)
    Spades,
    /// Hearts (♥)
    Hearts,
    /// Diamonds (♦)
    Diamonds,
    /// Clubs (♣)
    Clubs,
}

impl Suit {
    pub fn symbol(self) -> &'static str {
        match self {
            Suit::Spades => "♠",
            Suit::Hearts => "♥",
            Suit::Diamonds => "♦",
            Suit::Clubs => "♣",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Suit::Spades => "Spades",
            Suit::Hearts => "Hearts",
            Suit::Diamonds => "Diamonds",
            Suit::Clubs => "Clubs",
        }
    }
}

/// Rank of a card. Numeric ranks feed the number bets, faces and the Joker
/// end the draw (which ranks stop depends on the [`DeckConfig`]).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Rank {
    /// Ace (numeric in the standard deck, a stopper in the ace-stopper deck)
    Ace,
    /// Rank 2
    Two,
    /// Rank 3
    Three,
    /// Rank 4
    Four,
    /// Rank 5
    Five,
    /// Rank 6
    Six,
    /// Rank 7
    Seven,
    /// Rank 8
    Eight,
    /// Rank 9
    Nine,
    /// Rank 10
    Ten,
    /// Jack
    Jack,
    /// Queen
    Queen,
    /// King
    King,
    /// The single Joker, always a stopper
    Joker,
}

impl Rank {
    /// Short label used for bet keys and display (`A`, `2`..`10`, `J`, `Q`, `K`, `Joker`).
    pub fn label(self) -> &'static str {
        match self {
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Joker => "Joker",
        }
    }

    /// Spoken form: the Ace reads as "Ace", everything else as its label.
    pub fn describe(self) -> &'static str {
        match self {
            Rank::Ace => "Ace",
            other => other.label(),
        }
    }

    pub fn from_label(s: &str) -> Option<Rank> {
        let rank = match s.trim().to_ascii_uppercase().as_str() {
            "A" | "ACE" => Rank::Ace,
            "2" => Rank::Two,
            "3" => Rank::Three,
            "4" => Rank::Four,
            "5" => Rank::Five,
            "6" => Rank::Six,
            "7" => Rank::Seven,
            "8" => Rank::Eight,
            "9" => Rank::Nine,
            "10" => Rank::Ten,
            "J" | "JACK" => Rank::Jack,
            "Q" | "QUEEN" => Rank::Queen,
            "K" | "KING" => Rank::King,
            "JOKER" => Rank::Joker,
            _ => return None,
        };
        Some(rank)
    }
}

/// A single drawn card. `stopper` is fixed at deck-build time from the
/// deck's face ranks, so the same rank may stop in one deck and not in another.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Card {
    /// Rank of the card
    pub rank: Rank,
    /// Suit, `None` only for the Joker
    pub suit: Option<Suit>,
    /// Whether drawing this card ends the round
    pub stopper: bool,
}

impl Card {
    pub fn joker() -> Self {
        Self {
            rank: Rank::Joker,
            suit: None,
            stopper: true,
        }
    }

    pub fn is_joker(&self) -> bool {
        self.rank == Rank::Joker
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.suit {
            Some(s) if !self.is_joker() => write!(f, "{}{}", self.rank.label(), s.symbol()),
            _ => f.write_str("Joker"),
        }
    }
}

/// The rank/suit universe a deck is built from.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct DeckConfig {
    /// Ranks that pay number bets
    pub numeric_ranks: Vec<Rank>,
    /// Ranks that stop the draw (the Joker is always added on top of these)
    pub face_ranks: Vec<Rank>,
    pub suits: Vec<Suit>,
}

impl DeckConfig {
    /// `A, 2..10` numeric, `J, Q, K` stoppers: 53 cards, 13 stoppers.
    pub fn standard() -> Self {
        Self {
            numeric_ranks: vec![
                Rank::Ace,
                Rank::Two,
                Rank::Three,
                Rank::Four,
                Rank::Five,
                Rank::Six,
                Rank::Seven,
                Rank::Eight,
                Rank::Nine,
                Rank::Ten,
            ],
            face_ranks: vec![Rank::Jack, Rank::Queen, Rank::King],
            suits: all_suits().to_vec(),
        }
    }

    /// `2..10` numeric, `J, Q, K, A` stoppers: 53 cards, 17 stoppers.
    pub fn ace_stopper() -> Self {
        Self {
            numeric_ranks: vec![
                Rank::Two,
                Rank::Three,
                Rank::Four,
                Rank::Five,
                Rank::Six,
                Rank::Seven,
                Rank::Eight,
                Rank::Nine,
                Rank::Ten,
            ],
            face_ranks: vec![Rank::Jack, Rank::Queen, Rank::King, Rank::Ace],
            suits: all_suits().to_vec(),
        }
    }

    pub fn deck_len(&self) -> usize {
        self.suits.len() * (self.numeric_ranks.len() + self.face_ranks.len()) + 1
    }

    pub fn stopper_count(&self) -> usize {
        self.suits.len() * self.face_ranks.len() + 1
    }

    pub fn is_numeric(&self, rank: Rank) -> bool {
        self.numeric_ranks.contains(&rank)
    }
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self::standard()
    }
}

pub fn all_suits() -> [Suit; 4] {
    [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs]
}

/// Builds the unshuffled deck: numeric ranks then faces, each rank across all
/// suits in order, the Joker last.
pub fn build_deck(config: &DeckConfig) -> Vec<Card> {
    let mut v = Vec::with_capacity(config.deck_len());
    for &r in &config.numeric_ranks {
        for &s in &config.suits {
            v.push(Card {
                rank: r,
                suit: Some(s),
                stopper: false,
            });
        }
    }
    for &r in &config.face_ranks {
        for &s in &config.suits {
            v.push(Card {
                rank: r,
                suit: Some(s),
                stopper: true,
            });
        }
    }
    v.push(Card::joker());
    v
}
