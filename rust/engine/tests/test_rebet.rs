use stopper_engine::cards::Card;
use stopper_engine::config::GameConfig;
use stopper_engine::engine::GameSession;
use stopper_engine::errors::GameError;

fn session_with(bankroll: u64) -> GameSession {
    let cfg = GameConfig {
        initial_bankroll: bankroll,
        ..GameConfig::default()
    };
    GameSession::with_seed(cfg, 11).unwrap()
}

fn lose_round(s: &mut GameSession) {
    s.start_round_with_deck(vec![Card::joker()]).unwrap();
    s.run_to_completion().unwrap();
}

#[test]
fn rebet_without_history_is_refused() {
    let mut s = session_with(100);
    assert_eq!(
        s.rebet().unwrap_err(),
        GameError::InvalidState("no prior wagers to rebet")
    );
}

#[test]
fn rebet_replays_the_opening_layout() {
    let mut s = session_with(100);
    s.place_wager("7", 10).unwrap();
    s.place_wager("8", 5).unwrap();
    s.place_wager("8", 5).unwrap();
    lose_round(&mut s);
    assert_eq!(s.bankroll(), 80);

    s.rebet().unwrap();
    assert_eq!(s.bankroll(), 60);
    assert_eq!(s.wagers().len(), 2);
    assert_eq!(s.wagers()[1].chips, vec![5, 5]);
}

#[test]
fn rebet_replaces_what_is_already_on_the_layout() {
    let mut s = session_with(100);
    s.place_wager("7", 10).unwrap();
    lose_round(&mut s);
    s.place_wager("A", 25).unwrap();

    s.rebet().unwrap();
    assert_eq!(s.wagers().len(), 1);
    assert_eq!(s.wagers()[0].key, "7");
    assert_eq!(s.bankroll(), 80);
}

#[test]
fn rebet_counts_current_stakes_toward_funds() {
    let mut s = session_with(30);
    s.place_wager("7", 25).unwrap();
    lose_round(&mut s);
    assert_eq!(s.bankroll(), 5);
    s.place_wager("A", 5).unwrap();
    // 0 in hand plus the 5 that would be refunded is still short of 25
    assert_eq!(
        s.rebet().unwrap_err(),
        GameError::InsufficientFunds {
            requested: 25,
            available: 5
        }
    );
    assert_eq!(s.wagers()[0].key, "A", "failed rebet leaves the layout alone");
}

#[test]
fn rebet_switches_advanced_mode_back_on() {
    let cfg = GameConfig {
        advanced_mode: true,
        ..GameConfig::default()
    };
    let mut s = GameSession::with_seed(cfg, 3).unwrap();
    s.place_wager("bust-clubs", 10).unwrap();
    s.start_round_with_deck(vec![Card::joker()]).unwrap();
    s.run_to_completion().unwrap();

    s.set_advanced_mode(false).unwrap();
    s.rebet().unwrap();
    assert!(s.advanced_mode());
    assert_eq!(s.wagers()[0].key, "bust-clubs");
}

#[test]
fn rebet_is_only_available_between_rounds() {
    let mut s = session_with(100);
    s.place_wager("7", 10).unwrap();
    lose_round(&mut s);
    s.place_wager("7", 10).unwrap();
    s.start_round().unwrap();
    assert!(matches!(s.rebet(), Err(GameError::InvalidState(_))));
}
