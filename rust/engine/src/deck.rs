use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::cards::{build_deck, Card, DeckConfig};

/// Uniform `[0, 1)` generator consumed by [`shuffle`], one draw per swap.
pub trait RandomSource {
    fn uniform(&mut self) -> f64;
}

/// Seeded ChaCha20 source; same seed, same sequence of shuffles.
#[derive(Debug, Clone)]
pub struct ChaChaSource {
    rng: ChaCha20Rng,
}

impl ChaChaSource {
    pub fn new_with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for ChaChaSource {
    fn uniform(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}

/// In-place Fisher-Yates: walks from the back, swapping each slot with a
/// uniformly chosen index at or before it.
pub fn shuffle<T, R: RandomSource + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = ((rng.uniform() * (i + 1) as f64) as usize).min(i);
        items.swap(i, j);
    }
}

/// A deck being consumed front to back during one round.
///
/// # Examples
///
/// ```
/// use stopper_engine::cards::DeckConfig;
/// use stopper_engine::deck::{ChaChaSource, Deck};
///
/// let mut rng = ChaChaSource::new_with_seed(42);
/// let mut deck = Deck::shuffled(&DeckConfig::standard(), &mut rng);
/// assert_eq!(deck.remaining(), 53);
/// let first = deck.deal_card().expect("fresh deck");
/// assert_eq!(deck.remaining(), 52);
/// let _ = first.stopper;
/// ```
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
    position: usize,
}

impl Deck {
    pub fn shuffled<R: RandomSource + ?Sized>(config: &DeckConfig, rng: &mut R) -> Self {
        let mut cards = build_deck(config);
        shuffle(&mut cards, rng);
        Self { cards, position: 0 }
    }

    /// A deck in exactly the given order.
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards, position: 0 }
    }

    pub fn deal_card(&mut self) -> Option<Card> {
        let c = self.cards.get(self.position).copied()?;
        self.position += 1;
        Some(c)
    }

    pub fn remaining(&self) -> usize {
        self.cards.len().saturating_sub(self.position)
    }

    pub fn dealt(&self) -> &[Card] {
        &self.cards[..self.position]
    }

    pub fn has_stopper(&self) -> bool {
        self.cards[self.position..].iter().any(|c| c.stopper)
    }
}
