use std::collections::VecDeque;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::bets::{BetCatalog, BetTarget};
use crate::cards::Card;
use crate::config::GameConfig;
use crate::deck::{ChaChaSource, Deck, RandomSource};
use crate::errors::GameError;
use crate::ledger::{BetLayout, BettingGate, Ledger, Units, Wager};
use crate::logger::{format_round_id, today, BetSummary, NullSink, RoundRecord, RunLogSink};
use crate::paytable::Paytable;
use crate::settlement::{self, RoundContext, SideBetPayout};
use crate::stats::RoundStats;

/// Settled rounds kept for display.
pub const HISTORY_LEN: usize = 8;
/// Bankroll points kept for charting.
pub const MAX_BANKROLL_POINTS: usize = 500;

/// Where the table is in the round lifecycle.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum RoundState {
    /// Betting open, no round in progress
    Idle,
    /// Cards are being drawn
    Dealing,
    /// Dealing suspended until resumed
    Paused,
}

/// A number wager paid by the card just drawn.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct NumberHit {
    pub key: String,
    /// 1-based hit count on this wager after the payout
    pub hit: u32,
    pub multiplier: u64,
    pub payout: Units,
}

/// Result of one settled round.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct RoundSummary {
    pub record: RoundRecord,
    pub side_bet_payouts: Vec<SideBetPayout>,
    /// Set when the run log refused the record; the round still stands
    pub sink_warning: Option<String>,
}

impl RoundSummary {
    pub fn net_result(&self) -> i64 {
        self.record.net_result
    }

    pub fn stopper(&self) -> Card {
        self.record.stopper
    }
}

/// What a single [`GameSession::step`] produced.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum RoundEvent {
    /// A non-stopper card; `draw` is its 1-based position in the round
    CardDealt {
        card: Card,
        draw: u32,
        hits: Vec<NumberHit>,
    },
    /// The stopper landed and the round is closed
    Settled(RoundSummary),
}

#[derive(Debug)]
struct ActiveRound {
    deck: Deck,
    context: RoundContext,
    opening_layout: BetLayout,
    paytable: Paytable,
    paused: bool,
}

/// One player's table: bankroll, wagers, round state and lifetime stats.
///
/// The session is a plain state machine. It never sleeps; callers drive the
/// deal with [`step`](Self::step) and apply [`deal_delay`](Self::deal_delay)
/// between cards themselves.
///
/// # Examples
///
/// ```
/// use stopper_engine::config::GameConfig;
/// use stopper_engine::engine::{GameSession, RoundEvent};
///
/// let mut session = GameSession::with_seed(GameConfig::default(), 7).unwrap();
/// session.place_wager("7", 10).unwrap();
/// assert_eq!(session.bankroll(), 990);
///
/// session.start_round().unwrap();
/// let summary = loop {
///     match session.step().unwrap() {
///         RoundEvent::CardDealt { .. } => continue,
///         RoundEvent::Settled(summary) => break summary,
///     }
/// };
/// assert!(summary.stopper().stopper);
/// assert_eq!(session.stats().hands_played, 1);
/// ```
pub struct GameSession<R: RandomSource = ChaChaSource> {
    config: GameConfig,
    catalog: BetCatalog,
    paytable: Paytable,
    advanced_mode: bool,
    ledger: Ledger,
    round: Option<ActiveRound>,
    stats: RoundStats,
    history: VecDeque<RoundRecord>,
    last_layout: BetLayout,
    bankroll_history: VecDeque<Units>,
    rng: R,
    sink: Box<dyn RunLogSink>,
    date: String,
    round_seq: u32,
}

impl GameSession<ChaChaSource> {
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self, GameError> {
        Self::new(config, ChaChaSource::new_with_seed(seed))
    }
}

impl<R: RandomSource> GameSession<R> {
    pub fn new(config: GameConfig, rng: R) -> Result<Self, GameError> {
        let paytable = Paytable::by_id(&config.paytable).ok_or_else(|| {
            GameError::UnknownPaytable {
                id: config.paytable.clone(),
            }
        })?;
        let catalog = BetCatalog::standard(&config.deck);
        let ledger = Ledger::new(config.initial_bankroll, &config.denominations);
        let mut bankroll_history = VecDeque::new();
        bankroll_history.push_back(config.initial_bankroll);
        Ok(Self {
            advanced_mode: config.advanced_mode,
            catalog,
            paytable,
            ledger,
            round: None,
            stats: RoundStats::default(),
            history: VecDeque::new(),
            last_layout: BetLayout::default(),
            bankroll_history,
            rng,
            sink: Box::new(NullSink),
            date: today(),
            round_seq: 0,
            config,
        })
    }

    pub fn with_sink<S: RunLogSink + 'static>(mut self, sink: S) -> Self {
        self.sink = Box::new(sink);
        self
    }

    pub fn set_sink<S: RunLogSink + 'static>(&mut self, sink: S) {
        self.sink = Box::new(sink);
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
    pub fn catalog(&self) -> &BetCatalog {
        &self.catalog
    }
    pub fn paytable(&self) -> &Paytable {
        &self.paytable
    }
    pub fn advanced_mode(&self) -> bool {
        self.advanced_mode
    }
    pub fn bankroll(&self) -> Units {
        self.ledger.bankroll()
    }
    pub fn wagers(&self) -> &[Wager] {
        self.ledger.wagers()
    }
    pub fn outstanding(&self) -> Units {
        self.ledger.outstanding()
    }
    pub fn stats(&self) -> &RoundStats {
        &self.stats
    }
    pub fn last_layout(&self) -> &BetLayout {
        &self.last_layout
    }
    pub fn deal_delay(&self) -> Duration {
        self.config.deal_delay()
    }

    /// Most recent settled rounds, newest first.
    pub fn history(&self) -> impl Iterator<Item = &RoundRecord> {
        self.history.iter()
    }

    pub fn bankroll_history(&self) -> impl Iterator<Item = Units> + '_ {
        self.bankroll_history.iter().copied()
    }

    pub fn state(&self) -> RoundState {
        match &self.round {
            None => RoundState::Idle,
            Some(r) if r.paused => RoundState::Paused,
            Some(_) => RoundState::Dealing,
        }
    }

    pub fn betting_open(&self) -> bool {
        self.round.is_none()
    }

    pub fn round_context(&self) -> Option<RoundContext> {
        self.round.as_ref().map(|r| r.context)
    }

    /// Cards drawn so far in the round in progress.
    pub fn dealt_cards(&self) -> &[Card] {
        self.round.as_ref().map(|r| r.deck.dealt()).unwrap_or(&[])
    }

    fn gate(&self) -> BettingGate {
        BettingGate {
            betting_open: self.betting_open(),
            advanced_mode: self.advanced_mode,
            allow_in_hand: self.config.allow_pause,
        }
    }

    /// Adds one chip of `units` to the spot `key`.
    pub fn place_wager(&mut self, key: &str, units: Units) -> Result<Wager, GameError> {
        let def = self
            .catalog
            .get(key)
            .ok_or_else(|| GameError::UnknownBet {
                key: key.to_string(),
            })?;
        let gate = self.gate();
        let wager = self.ledger.place(def, units, gate)?.clone();
        debug!(key, units, total = wager.units, bankroll = self.ledger.bankroll(), "wager placed");
        Ok(wager)
    }

    /// Refunds every stake. Only between rounds.
    pub fn clear_wagers(&mut self) -> Result<Units, GameError> {
        let refund = self.ledger.clear(self.betting_open())?;
        debug!(refund, "wagers cleared");
        Ok(refund)
    }

    pub fn snapshot_layout(&self) -> BetLayout {
        self.ledger.snapshot()
    }

    /// Replays a layout chip by chip on top of the current wagers.
    pub fn restore_layout(&mut self, layout: &BetLayout) -> Result<(), GameError> {
        let gate = self.gate();
        self.ledger.restore(layout, &self.catalog, gate)
    }

    pub fn select_paytable(&mut self, id: &str) -> Result<&Paytable, GameError> {
        if !self.betting_open() {
            return Err(GameError::InvalidState(
                "paytable can only change while betting is open",
            ));
        }
        self.paytable = Paytable::by_id(id).ok_or_else(|| GameError::UnknownPaytable {
            id: id.to_string(),
        })?;
        Ok(&self.paytable)
    }

    pub fn set_advanced_mode(&mut self, enabled: bool) -> Result<(), GameError> {
        if !self.betting_open() {
            return Err(GameError::InvalidState(
                "advanced mode can only change while betting is open",
            ));
        }
        self.advanced_mode = enabled;
        Ok(())
    }

    /// Opens a round on a freshly shuffled deck.
    pub fn start_round(&mut self) -> Result<(), GameError> {
        self.check_can_start()?;
        let deck = Deck::shuffled(&self.config.deck, &mut self.rng);
        self.open_round(deck);
        Ok(())
    }

    /// Opens a round on a deck in exactly the given order.
    pub fn start_round_with_deck(&mut self, cards: Vec<Card>) -> Result<(), GameError> {
        self.check_can_start()?;
        let deck = Deck::from_cards(cards);
        if !deck.has_stopper() {
            return Err(GameError::InvalidState("deck has no stopper card"));
        }
        self.open_round(deck);
        Ok(())
    }

    fn check_can_start(&self) -> Result<(), GameError> {
        if !self.betting_open() {
            return Err(GameError::InvalidState("a round is already in progress"));
        }
        if self.ledger.wagers().is_empty() {
            return Err(GameError::InvalidState("place a wager before dealing"));
        }
        Ok(())
    }

    fn open_round(&mut self, deck: Deck) {
        let opening_layout = self.ledger.snapshot();
        self.ledger.reset_round_counters();
        debug!(
            wagers = self.ledger.wagers().len(),
            staked = self.ledger.outstanding(),
            paytable = %self.paytable.id,
            "round started"
        );
        self.round = Some(ActiveRound {
            deck,
            context: RoundContext::default(),
            opening_layout,
            paytable: self.paytable.clone(),
            paused: false,
        });
    }

    /// Draws the next card.
    pub fn step(&mut self) -> Result<RoundEvent, GameError> {
        let round = self
            .round
            .as_mut()
            .ok_or(GameError::InvalidState("no round in progress"))?;
        if round.paused {
            return Err(GameError::InvalidState("dealing is paused"));
        }
        let card = round
            .deck
            .deal_card()
            .ok_or(GameError::InvalidState("deck exhausted before a stopper"))?;
        round.context.total_cards += 1;
        if card.stopper {
            return Ok(RoundEvent::Settled(self.settle(card)));
        }
        round.context.non_stopper_count += 1;
        let draw = round.context.total_cards;

        let mut hits = Vec::new();
        for i in 0..self.ledger.wagers().len() {
            let w = &self.ledger.wagers()[i];
            if w.target != BetTarget::Number(card.rank) {
                continue;
            }
            let Some(multiplier) = round.paytable.step(w.hits) else {
                continue;
            };
            let payout = multiplier * w.units;
            let hit = NumberHit {
                key: w.key.clone(),
                hit: w.hits + 1,
                multiplier,
                payout,
            };
            self.ledger.record_hit(i, payout);
            hits.push(hit);
        }
        if !hits.is_empty() {
            debug!(card = %card, hits = hits.len(), "number hit");
        }
        Ok(RoundEvent::CardDealt { card, draw, hits })
    }

    /// Steps until the stopper and returns the settlement.
    pub fn run_to_completion(&mut self) -> Result<RoundSummary, GameError> {
        loop {
            if let RoundEvent::Settled(summary) = self.step()? {
                return Ok(summary);
            }
        }
    }

    pub fn pause(&mut self) -> Result<(), GameError> {
        if !self.config.allow_pause {
            return Err(GameError::InvalidState("pausing is not enabled"));
        }
        let round = self
            .round
            .as_mut()
            .ok_or(GameError::InvalidState("no round in progress"))?;
        round.paused = true;
        Ok(())
    }

    pub fn resume(&mut self) -> Result<(), GameError> {
        let round = self
            .round
            .as_mut()
            .ok_or(GameError::InvalidState("no round in progress"))?;
        round.paused = false;
        Ok(())
    }

    fn settle(&mut self, stopper: Card) -> RoundSummary {
        // only reachable from step(), which holds an active round
        let (context, opening_layout, paytable) = match self.round.take() {
            Some(r) => (r.context, r.opening_layout, r.paytable.id),
            None => (RoundContext::default(), BetLayout::default(), self.paytable.id.clone()),
        };

        let payouts = settlement::settle(
            &stopper,
            &context,
            self.ledger.wagers(),
            &self.catalog,
            &self.config.side_bets,
        );
        for p in &payouts {
            if let Some(i) = self.ledger.wagers().iter().position(|w| w.key == p.key) {
                self.ledger.credit(i, p.payout);
            }
        }

        let total_wagered = self.ledger.outstanding();
        let total_paid = self.ledger.total_paid();
        let net_result = total_paid as i64 - total_wagered as i64;
        self.stats.record(total_wagered, total_paid);

        let bets = self
            .ledger
            .close_round()
            .into_iter()
            .map(|w| BetSummary {
                key: w.key,
                bet_type: w.bet_type,
                chips: w.chips,
                units: w.units,
                hits: w.hits,
                paid: w.paid,
            })
            .collect();

        self.round_seq += 1;
        let record = RoundRecord {
            round_id: format_round_id(&self.date, self.round_seq),
            paytable,
            stopper,
            total_cards: context.total_cards,
            non_stopper_count: context.non_stopper_count,
            bets,
            total_wagered,
            total_paid,
            net_result,
            bankroll_after: self.ledger.bankroll(),
            ts: None,
        };

        self.history.push_front(record.clone());
        self.history.truncate(HISTORY_LEN);
        self.last_layout = opening_layout;
        self.bankroll_history.push_back(self.ledger.bankroll());
        while self.bankroll_history.len() > MAX_BANKROLL_POINTS {
            self.bankroll_history.pop_front();
        }

        info!(
            round_id = %record.round_id,
            stopper = %stopper,
            cards = context.total_cards,
            net = net_result,
            bankroll = record.bankroll_after,
            "round settled"
        );

        let sink_warning = match self.sink.record(&record) {
            Ok(()) => None,
            Err(e) => {
                warn!(round_id = %record.round_id, error = %e, "run log delivery failed");
                Some(e.to_string())
            }
        };

        RoundSummary {
            record,
            side_bet_payouts: payouts,
            sink_warning,
        }
    }

    /// Re-places last round's opening layout, chip for chip.
    pub fn rebet(&mut self) -> Result<(), GameError> {
        if !self.betting_open() {
            return Err(GameError::InvalidState("rebet is only available between rounds"));
        }
        let needed = self.last_layout.total_units();
        if self.last_layout.is_empty() || needed == 0 {
            return Err(GameError::InvalidState("no prior wagers to rebet"));
        }
        let available = self.ledger.bankroll() + self.ledger.outstanding();
        if needed > available {
            return Err(GameError::InsufficientFunds {
                requested: needed,
                available,
            });
        }
        if self.last_layout.needs_advanced(&self.catalog) {
            self.advanced_mode = true;
        }
        self.ledger.clear(true)?;
        let layout = self.last_layout.clone();
        let gate = self.gate();
        self.ledger.restore(&layout, &self.catalog, gate)?;
        debug!(units = needed, "previous wagers restored");
        Ok(())
    }

    /// Back to a fresh account. Only between rounds.
    pub fn reset_account(&mut self) -> Result<(), GameError> {
        if !self.betting_open() {
            return Err(GameError::InvalidState("cannot reset during a hand"));
        }
        self.ledger.reset(self.config.initial_bankroll);
        self.stats = RoundStats::default();
        self.history.clear();
        self.last_layout = BetLayout::default();
        self.bankroll_history.clear();
        self.bankroll_history.push_back(self.config.initial_bankroll);
        info!(bankroll = self.config.initial_bankroll, "account reset");
        Ok(())
    }
}
