use stopper_engine::cards::{Card, Rank, Suit};
use stopper_engine::config::GameConfig;
use stopper_engine::engine::GameSession;
use stopper_engine::errors::GameError;
use stopper_engine::settlement::{CountBasis, CountMatch, SideBetReturn, SideBetRules};

fn num(rank: Rank) -> Card {
    Card {
        rank,
        suit: Some(Suit::Diamonds),
        stopper: false,
    }
}

fn stop(rank: Rank, suit: Suit) -> Card {
    Card {
        rank,
        suit: Some(suit),
        stopper: true,
    }
}

fn advanced(rules: SideBetRules) -> GameSession {
    let cfg = GameConfig {
        advanced_mode: true,
        side_bets: rules,
        ..GameConfig::default()
    };
    GameSession::with_seed(cfg, 1).unwrap()
}

/// `n` numeric cards followed by `stopper`.
fn deck_of(n: usize, stopper: Card) -> Vec<Card> {
    let mut cards = vec![num(Rank::Two); n];
    cards.push(stopper);
    cards
}

#[test]
fn side_bets_need_advanced_mode() {
    let mut s = GameSession::with_seed(GameConfig::default(), 1).unwrap();
    assert_eq!(
        s.place_wager("bust-hearts", 10).unwrap_err(),
        GameError::ModeDisabled {
            key: "bust-hearts".into()
        }
    );
    assert!(matches!(
        s.place_wager("count-3", 10),
        Err(GameError::ModeDisabled { .. })
    ));
    s.set_advanced_mode(true).unwrap();
    s.place_wager("bust-hearts", 10).unwrap();
}

#[test]
fn bust_suit_returns_stake_and_profit_by_default() {
    let mut s = advanced(SideBetRules::default());
    s.place_wager("bust-hearts", 10).unwrap();
    s.start_round_with_deck(deck_of(1, stop(Rank::King, Suit::Hearts)))
        .unwrap();
    let summary = s.run_to_completion().unwrap();
    assert_eq!(summary.side_bet_payouts.len(), 1);
    assert_eq!(summary.side_bet_payouts[0].payout, 40);
    assert_eq!(s.bankroll(), 1030);
}

#[test]
fn profit_only_keeps_the_stake() {
    let mut s = advanced(SideBetRules {
        stake_return: SideBetReturn::ProfitOnly,
        ..SideBetRules::default()
    });
    s.place_wager("bust-hearts", 10).unwrap();
    s.start_round_with_deck(deck_of(0, stop(Rank::Queen, Suit::Hearts)))
        .unwrap();
    let summary = s.run_to_completion().unwrap();
    assert_eq!(summary.record.total_paid, 30);
    assert_eq!(s.bankroll(), 1020);
}

#[test]
fn bust_rank_and_joker_spots() {
    let mut s = advanced(SideBetRules::default());
    s.place_wager("bust-k", 10).unwrap();
    s.place_wager("bust-joker", 5).unwrap();
    s.start_round_with_deck(deck_of(2, stop(Rank::King, Suit::Clubs)))
        .unwrap();
    let summary = s.run_to_completion().unwrap();
    let keys: Vec<&str> = summary
        .side_bet_payouts
        .iter()
        .map(|p| p.key.as_str())
        .collect();
    assert_eq!(keys, vec!["bust-k"]);
    assert_eq!(summary.record.total_paid, 30);

    s.place_wager("bust-joker", 5).unwrap();
    s.place_wager("bust-spades", 5).unwrap();
    s.start_round_with_deck(vec![Card::joker()]).unwrap();
    let summary = s.run_to_completion().unwrap();
    // joker pays 11x, the suitless joker never wins a suit bust
    assert_eq!(summary.record.total_paid, 60);
    assert_eq!(summary.side_bet_payouts.len(), 1);
}

#[test]
fn count_counts_every_card_including_the_stopper() {
    let mut s = advanced(SideBetRules::default());
    s.place_wager("count-3", 10).unwrap();
    s.place_wager("count-2", 10).unwrap();
    s.start_round_with_deck(deck_of(2, stop(Rank::Jack, Suit::Spades)))
        .unwrap();
    let summary = s.run_to_completion().unwrap();
    assert_eq!(summary.side_bet_payouts.len(), 1);
    assert_eq!(summary.side_bet_payouts[0].key, "count-3");
    assert_eq!(summary.side_bet_payouts[0].payout, 60);
}

#[test]
fn non_stopper_basis_ignores_the_stopper() {
    let mut s = advanced(SideBetRules {
        count_basis: CountBasis::NonStopper,
        ..SideBetRules::default()
    });
    s.place_wager("count-3", 10).unwrap();
    s.place_wager("count-2", 10).unwrap();
    s.start_round_with_deck(deck_of(2, stop(Rank::Jack, Suit::Spades)))
        .unwrap();
    let summary = s.run_to_completion().unwrap();
    assert_eq!(summary.side_bet_payouts.len(), 1);
    assert_eq!(summary.side_bet_payouts[0].key, "count-2");
    assert_eq!(summary.side_bet_payouts[0].payout, 50);
}

#[test]
fn bounded_count_spots_match_only_at_their_max_by_default() {
    let mut s = advanced(SideBetRules::default());
    s.place_wager("count-4-6", 10).unwrap();
    s.start_round_with_deck(deck_of(4, stop(Rank::Jack, Suit::Spades)))
        .unwrap();
    assert!(s.run_to_completion().unwrap().side_bet_payouts.is_empty());

    s.place_wager("count-4-6", 10).unwrap();
    s.start_round_with_deck(deck_of(5, stop(Rank::Jack, Suit::Spades)))
        .unwrap();
    let summary = s.run_to_completion().unwrap();
    assert_eq!(summary.side_bet_payouts[0].payout, 30);
}

#[test]
fn range_matching_pays_anywhere_inside_the_band() {
    let mut s = advanced(SideBetRules {
        count_match: CountMatch::Range,
        ..SideBetRules::default()
    });
    s.place_wager("count-4-6", 10).unwrap();
    s.start_round_with_deck(deck_of(4, stop(Rank::Jack, Suit::Spades)))
        .unwrap();
    let summary = s.run_to_completion().unwrap();
    assert_eq!(summary.record.total_cards, 5);
    assert_eq!(summary.side_bet_payouts[0].payout, 30);
}

#[test]
fn open_ended_count_wins_at_or_above_its_floor() {
    let mut s = advanced(SideBetRules::default());
    s.place_wager("count-10+", 5).unwrap();
    s.start_round_with_deck(deck_of(12, stop(Rank::Queen, Suit::Clubs)))
        .unwrap();
    let summary = s.run_to_completion().unwrap();
    assert_eq!(summary.side_bet_payouts[0].payout, 35);
}

#[test]
fn unlocked_side_bets_can_join_a_round_in_progress() {
    let mut s = advanced(SideBetRules::default());
    s.place_wager("7", 10).unwrap();
    s.start_round_with_deck(deck_of(2, stop(Rank::King, Suit::Hearts)))
        .unwrap();
    s.step().unwrap();
    s.place_wager("bust-hearts", 10).unwrap();
    assert_eq!(
        s.place_wager("count-3", 10).unwrap_err(),
        GameError::BettingClosed {
            key: "count-3".into()
        }
    );
    let summary = s.run_to_completion().unwrap();
    assert_eq!(summary.record.total_wagered, 20);
    assert_eq!(summary.record.total_paid, 40);
    // the rebet layout is the one the round opened with
    assert_eq!(s.last_layout().entries.len(), 1);
    assert_eq!(s.last_layout().entries[0].key, "7");
}

#[test]
fn mid_round_side_bets_need_pause_support() {
    let cfg = GameConfig {
        advanced_mode: true,
        allow_pause: false,
        ..GameConfig::default()
    };
    let mut s = GameSession::with_seed(cfg, 1).unwrap();
    s.place_wager("7", 10).unwrap();
    s.start_round_with_deck(deck_of(2, stop(Rank::King, Suit::Hearts)))
        .unwrap();
    assert_eq!(
        s.place_wager("bust-hearts", 10).unwrap_err(),
        GameError::BettingClosed {
            key: "bust-hearts".into()
        }
    );
}

#[test]
fn advanced_mode_is_fixed_during_a_round() {
    let mut s = advanced(SideBetRules::default());
    s.place_wager("7", 10).unwrap();
    s.start_round_with_deck(deck_of(1, stop(Rank::King, Suit::Hearts)))
        .unwrap();
    assert!(matches!(
        s.set_advanced_mode(false),
        Err(GameError::InvalidState(_))
    ));
    assert!(s.advanced_mode());
}
