use std::time::Duration;

use stopper_engine::cards::{Card, Rank, Suit};
use stopper_engine::config::GameConfig;
use stopper_engine::engine::{GameSession, NumberHit, RoundEvent, RoundState};
use stopper_engine::errors::GameError;

fn num(rank: Rank, suit: Suit) -> Card {
    Card {
        rank,
        suit: Some(suit),
        stopper: false,
    }
}

fn face(rank: Rank, suit: Suit) -> Card {
    Card {
        rank,
        suit: Some(suit),
        stopper: true,
    }
}

fn session() -> GameSession {
    GameSession::with_seed(GameConfig::default(), 42).unwrap()
}

#[test]
fn two_sevens_then_king_pays_three_then_four() {
    let mut s = session();
    s.place_wager("7", 10).unwrap();
    assert_eq!(s.bankroll(), 990);

    s.start_round_with_deck(vec![
        num(Rank::Three, Suit::Spades),
        num(Rank::Seven, Suit::Hearts),
        num(Rank::Seven, Suit::Spades),
        face(Rank::King, Suit::Clubs),
    ])
    .unwrap();
    assert_eq!(s.state(), RoundState::Dealing);

    match s.step().unwrap() {
        RoundEvent::CardDealt { draw, hits, .. } => {
            assert_eq!(draw, 1);
            assert!(hits.is_empty());
        }
        other => panic!("unexpected {other:?}"),
    }
    match s.step().unwrap() {
        RoundEvent::CardDealt { hits, .. } => assert_eq!(
            hits,
            vec![NumberHit {
                key: "7".into(),
                hit: 1,
                multiplier: 3,
                payout: 30
            }]
        ),
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(s.bankroll(), 1020, "ladder payouts are credited immediately");
    match s.step().unwrap() {
        RoundEvent::CardDealt { hits, .. } => {
            assert_eq!(hits[0].multiplier, 4);
            assert_eq!(hits[0].payout, 40);
        }
        other => panic!("unexpected {other:?}"),
    }
    let summary = match s.step().unwrap() {
        RoundEvent::Settled(summary) => summary,
        other => panic!("unexpected {other:?}"),
    };

    assert_eq!(summary.record.total_wagered, 10);
    assert_eq!(summary.record.total_paid, 70);
    assert_eq!(summary.net_result(), 60);
    assert_eq!(summary.record.total_cards, 4);
    assert_eq!(summary.record.non_stopper_count, 3);
    assert_eq!(summary.stopper().rank, Rank::King);
    assert_eq!(summary.record.bankroll_after, 1060);
    assert_eq!(s.bankroll(), 1060);
    assert_eq!(s.state(), RoundState::Idle);
    assert!(s.wagers().is_empty(), "stakes are consumed at settlement");
    assert_eq!(s.stats().hands_played, 1);
    assert_eq!(s.stats().total_wagered, 10);
    assert_eq!(s.stats().total_paid, 70);
}

#[test]
fn ladder_stops_paying_once_exhausted() {
    let mut s = session();
    s.place_wager("7", 10).unwrap();
    let mut deck: Vec<Card> = [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades]
        .into_iter()
        .map(|suit| num(Rank::Seven, suit))
        .collect();
    deck.push(face(Rank::Queen, Suit::Hearts));
    s.start_round_with_deck(deck).unwrap();

    let summary = s.run_to_completion().unwrap();
    // 3x + 4x + 15x + 50x; the fifth seven pays nothing
    assert_eq!(summary.record.total_paid, 720);
    assert_eq!(summary.record.bets[0].hits, 4);
    assert_eq!(s.bankroll(), 1000 - 10 + 720);
}

#[test]
fn stopper_first_loses_everything_and_ends_the_round() {
    let mut s = session();
    s.place_wager("7", 25).unwrap();
    s.place_wager("A", 5).unwrap();
    s.start_round_with_deck(vec![
        Card::joker(),
        num(Rank::Seven, Suit::Hearts),
        num(Rank::Ace, Suit::Hearts),
    ])
    .unwrap();

    let summary = s.run_to_completion().unwrap();
    assert!(summary.stopper().is_joker());
    assert_eq!(summary.record.total_cards, 1);
    assert_eq!(summary.record.non_stopper_count, 0);
    assert_eq!(summary.net_result(), -30);
    assert_eq!(s.bankroll(), 970);
    assert_eq!(
        s.step().unwrap_err(),
        GameError::InvalidState("no round in progress")
    );
}

#[test]
fn each_rank_climbs_its_own_ladder() {
    let mut s = session();
    s.place_wager("7", 10).unwrap();
    s.place_wager("2", 10).unwrap();
    s.start_round_with_deck(vec![
        num(Rank::Seven, Suit::Hearts),
        num(Rank::Two, Suit::Hearts),
        num(Rank::Two, Suit::Clubs),
        face(Rank::Jack, Suit::Clubs),
    ])
    .unwrap();
    let summary = s.run_to_completion().unwrap();
    let seven = summary.record.bets.iter().find(|b| b.key == "7").unwrap();
    let two = summary.record.bets.iter().find(|b| b.key == "2").unwrap();
    assert_eq!((seven.hits, seven.paid), (1, 30));
    assert_eq!((two.hits, two.paid), (2, 70));
}

#[test]
fn round_uses_the_paytable_selected_before_the_deal() {
    let mut s = session();
    s.select_paytable("paytable-2").unwrap();
    s.place_wager("9", 10).unwrap();
    s.start_round_with_deck(vec![num(Rank::Nine, Suit::Hearts), face(Rank::King, Suit::Hearts)])
        .unwrap();
    assert!(matches!(
        s.select_paytable("paytable-3"),
        Err(GameError::InvalidState(_))
    ));
    let summary = s.run_to_completion().unwrap();
    assert_eq!(summary.record.paytable, "paytable-2");
    assert_eq!(summary.record.total_paid, 20);
}

#[test]
fn unknown_paytable_is_rejected() {
    let mut s = session();
    assert_eq!(
        s.select_paytable("paytable-9").unwrap_err(),
        GameError::UnknownPaytable {
            id: "paytable-9".into()
        }
    );
    let cfg = GameConfig {
        paytable: "nope".into(),
        ..GameConfig::default()
    };
    assert!(GameSession::with_seed(cfg, 1).is_err());
}

#[test]
fn a_round_needs_wagers_and_a_stopper() {
    let mut s = session();
    assert_eq!(
        s.start_round().unwrap_err(),
        GameError::InvalidState("place a wager before dealing")
    );
    s.place_wager("5", 5).unwrap();
    assert_eq!(
        s.start_round_with_deck(vec![num(Rank::Five, Suit::Clubs)])
            .unwrap_err(),
        GameError::InvalidState("deck has no stopper card")
    );
    assert_eq!(s.state(), RoundState::Idle);
    s.start_round().unwrap();
    assert_eq!(
        s.start_round().unwrap_err(),
        GameError::InvalidState("a round is already in progress")
    );
}

#[test]
fn number_bets_lock_once_dealing_starts() {
    let mut s = session();
    s.place_wager("7", 10).unwrap();
    s.start_round_with_deck(vec![num(Rank::Two, Suit::Clubs), face(Rank::King, Suit::Clubs)])
        .unwrap();
    assert_eq!(
        s.place_wager("8", 10).unwrap_err(),
        GameError::BettingClosed { key: "8".into() }
    );
    assert!(matches!(
        s.clear_wagers(),
        Err(GameError::InvalidState(_))
    ));
    assert_eq!(s.bankroll(), 990);
}

#[test]
fn seeded_rounds_keep_the_bankroll_identity() {
    let mut s = GameSession::with_seed(GameConfig::default(), 7).unwrap();
    let mut rounds = 0;
    for _ in 0..200 {
        if s.bankroll() < 10 {
            break;
        }
        s.place_wager("A", 5).unwrap();
        s.place_wager("10", 5).unwrap();
        s.start_round().unwrap();
        let summary = s.run_to_completion().unwrap();
        assert!(summary.stopper().stopper);
        assert_eq!(
            summary.record.total_cards,
            summary.record.non_stopper_count + 1
        );
        rounds += 1;
    }
    let stats = *s.stats();
    assert_eq!(stats.hands_played, rounds);
    assert_eq!(
        s.bankroll() as i64,
        1000 - stats.total_wagered as i64 + stats.total_paid as i64
    );
    assert!(s.history().count() <= 8);
    assert_eq!(s.bankroll_history().count() as u64, rounds + 1);
    assert_eq!(s.bankroll_history().last(), Some(s.bankroll()));
}

#[test]
fn history_is_newest_first_and_capped() {
    let mut s = session();
    for _ in 0..10 {
        s.place_wager("3", 5).unwrap();
        s.start_round_with_deck(vec![face(Rank::Jack, Suit::Spades)])
            .unwrap();
        s.run_to_completion().unwrap();
    }
    let ids: Vec<String> = s.history().map(|r| r.round_id.clone()).collect();
    assert_eq!(ids.len(), 8);
    assert!(ids[0].ends_with("-000010"));
    assert!(ids[7].ends_with("-000003"));
}

#[test]
fn deal_delay_defaults_to_420ms() {
    let s = session();
    assert_eq!(s.deal_delay(), Duration::from_millis(420));
}

#[test]
fn dealt_cards_track_the_round_in_progress() {
    let mut s = session();
    s.place_wager("4", 5).unwrap();
    assert!(s.dealt_cards().is_empty());
    s.start_round_with_deck(vec![num(Rank::Four, Suit::Spades), face(Rank::King, Suit::Spades)])
        .unwrap();
    s.step().unwrap();
    assert_eq!(s.dealt_cards(), &[num(Rank::Four, Suit::Spades)]);
    let ctx = s.round_context().unwrap();
    assert_eq!((ctx.total_cards, ctx.non_stopper_count), (1, 1));
    s.step().unwrap();
    assert!(s.dealt_cards().is_empty());
    assert!(s.round_context().is_none());
}
