//! # stopper-engine: Stop-on-Stopper Ladder Engine
//!
//! A single-player wagering engine. Cards are drawn from a freshly shuffled
//! deck until the first stopper (a face card or the Joker) lands. Number bets
//! climb a paytable ladder each time their rank appears; side bets are
//! decided once against the stopper.
//!
//! ## Core Modules
//!
//! - [`cards`] - Suit, Rank, Card and deck construction from a [`cards::DeckConfig`]
//! - [`deck`] - Seeded shuffling through the [`deck::RandomSource`] seam
//! - [`bets`] - The bet catalog: keys, targets, payouts and lock flags
//! - [`paytable`] - Built-in payout ladders
//! - [`ledger`] - Bankroll, wagers, chip placement and rebet layouts
//! - [`settlement`] - Side-bet evaluation against the stopper
//! - [`engine`] - [`engine::GameSession`], the round state machine
//! - [`stats`] - Lifetime totals and house edge
//! - [`logger`] - RoundRecord and the JSONL run log
//! - [`config`] - Table configuration
//! - [`errors`] - Error types for game operations
//!
//! ## Quick Start
//!
//! ```rust
//! use stopper_engine::cards::{Card, Rank, Suit};
//! use stopper_engine::config::GameConfig;
//! use stopper_engine::engine::GameSession;
//!
//! let mut session = GameSession::with_seed(GameConfig::default(), 42).unwrap();
//! session.place_wager("7", 10).unwrap();
//!
//! let seven = |suit| Card { rank: Rank::Seven, suit: Some(suit), stopper: false };
//! let king = Card { rank: Rank::King, suit: Some(Suit::Clubs), stopper: true };
//! session
//!     .start_round_with_deck(vec![seven(Suit::Hearts), seven(Suit::Spades), king])
//!     .unwrap();
//!
//! let summary = session.run_to_completion().unwrap();
//! // 3x then 4x on a 10-unit stake
//! assert_eq!(summary.record.total_paid, 70);
//! assert_eq!(session.bankroll(), 1060);
//! ```
//!
//! ## Deterministic Gameplay
//!
//! Shuffles are reproducible from a seed:
//!
//! ```rust
//! use stopper_engine::cards::DeckConfig;
//! use stopper_engine::deck::{ChaChaSource, Deck};
//!
//! let a = Deck::shuffled(&DeckConfig::standard(), &mut ChaChaSource::new_with_seed(42));
//! let b = Deck::shuffled(&DeckConfig::standard(), &mut ChaChaSource::new_with_seed(42));
//! assert_eq!(a.remaining(), b.remaining());
//! ```

pub mod bets;
pub mod cards;
pub mod config;
pub mod deck;
pub mod engine;
pub mod errors;
pub mod ledger;
pub mod logger;
pub mod paytable;
pub mod settlement;
pub mod stats;
