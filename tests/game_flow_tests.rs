//! Game flow tests - swaps, reverts, timing and the score display

use std::cell::RefCell;
use std::rc::Rc;

use tui_match3::core::{layout, GameConfig, ScoreView};
use tui_match3::engine::{Game, GameEvent};
use tui_match3::types::{Direction, Position, TurnState};

/// No match anywhere; swapping (0, 0) right does not create one either.
const STALE: &str = "RGB\n\
                     GBR\n\
                     BRG";

/// Swapping (0, 0) right completes a blue column at x = 1.
const READY: &str = "GBRY\n\
                     RBYG\n\
                     BGBR";

fn ready_game(config: GameConfig) -> Game {
    Game::from_layout(config.with_board(4, 3), READY, 21).unwrap()
}

#[derive(Clone, Default)]
struct Recorder(Rc<RefCell<Vec<f32>>>);

impl ScoreView for Recorder {
    fn set_score(&mut self, value: f32) {
        self.0.borrow_mut().push(value);
    }
}

#[test]
fn test_matching_swap_resolves_and_settles() {
    let mut g = ready_game(GameConfig::instant());
    assert!(g.on_swap_gesture(Position::new(0, 0), Direction::Right));
    g.run_until_settled();

    let events = g.drain_events();
    assert_eq!(
        events.first(),
        Some(&GameEvent::Swapped {
            from: Position::new(0, 0),
            to: Position::new(1, 0),
        })
    );
    assert!(matches!(
        events.get(1),
        Some(GameEvent::MatchesFound { cascade: 0, .. })
    ));
    assert!(matches!(events.last(), Some(GameEvent::Settled { .. })));
    assert!(!events
        .iter()
        .any(|e| matches!(e, GameEvent::SwapReverted { .. })));

    assert_eq!(g.state(), TurnState::Move);
    assert!(g.is_settled());
    assert!(g.score() >= 30);
    assert!(g.grid().is_full());
}

#[test]
fn test_stale_swap_reverts_with_event_order() {
    let config = GameConfig::instant().with_board(3, 3);
    let mut g = Game::from_layout(config, STALE, 2).unwrap();
    assert!(g.on_swap_gesture(Position::new(0, 0), Direction::Right));
    g.run_until_settled();

    let from = Position::new(0, 0);
    let to = Position::new(1, 0);
    assert_eq!(
        g.drain_events(),
        vec![
            GameEvent::Swapped { from, to },
            GameEvent::SwapReverted { from, to },
            GameEvent::Settled { cascades: 0 },
        ]
    );
    assert_eq!(layout::render(g.grid()), "RGB\nGBR\nBRG\n");
}

#[test]
fn test_revert_takes_both_settle_windows() {
    let config = GameConfig::default().with_board(3, 3);
    let mut g = Game::from_layout(config, STALE, 2).unwrap();
    assert!(g.on_swap_gesture(Position::new(0, 0), Direction::Right));

    g.step(499);
    // Still swapped: the check has not run yet.
    assert_eq!(layout::render(g.grid()), "RGB\nGBR\nRBG\n");
    g.step(1);
    assert_eq!(layout::render(g.grid()), "RGB\nGBR\nBRG\n");
    assert_eq!(g.state(), TurnState::Wait);

    g.step(499);
    assert_eq!(g.state(), TurnState::Wait);
    g.step(1);
    assert_eq!(g.state(), TurnState::Move);
}

#[test]
fn test_input_is_ignored_until_the_cycle_ends() {
    let mut g = ready_game(GameConfig::default());
    assert!(g.on_swap_gesture(Position::new(0, 0), Direction::Right));

    let mut elapsed = 0;
    while !g.is_settled() {
        assert!(!g.on_swap_gesture(Position::new(2, 2), Direction::Left));
        g.step(16);
        elapsed += 16;
        assert!(elapsed < 120_000, "cycle never settled");
    }
    assert!(g.grid().is_full());
    assert!(g.on_swap_gesture(Position::new(2, 2), Direction::Left));
}

#[test]
fn test_score_view_eases_towards_the_total() {
    let mut g = ready_game(GameConfig::instant());
    let recorder = Recorder::default();
    g.set_score_view(Box::new(recorder.clone()));

    assert!(g.on_swap_gesture(Position::new(0, 0), Direction::Right));
    g.run_until_settled();
    assert!(g.score() >= 30);
    assert_eq!(g.displayed_score(), 0.0);

    g.step(1000);
    assert_eq!(recorder.0.borrow().last(), Some(&5.0));
    assert_eq!(g.displayed_score(), 5.0);
}

#[test]
fn test_cancelled_score_view_stops_updating() {
    let mut g = ready_game(GameConfig::instant());
    let recorder = Recorder::default();
    g.set_score_view(Box::new(recorder.clone()));

    assert!(g.on_swap_gesture(Position::new(0, 0), Direction::Right));
    g.run_until_settled();
    g.step(1000);
    let seen = recorder.0.borrow().len();

    g.cancel_token().cancel();
    g.step(1000);
    g.step(1000);
    assert_eq!(recorder.0.borrow().len(), seen);
    assert_eq!(g.displayed_score(), 5.0);
}

#[test]
fn test_same_seed_deals_the_same_board() {
    let mut a = Game::new(GameConfig::default(), 99).unwrap();
    let mut b = Game::new(GameConfig::default(), 99).unwrap();
    a.start();
    b.start();
    assert_eq!(layout::render(a.grid()), layout::render(b.grid()));
    assert_eq!(a.seed(), 99);
}

#[test]
fn test_restart_resets_score_and_refills() {
    let mut g = ready_game(GameConfig::instant());
    assert!(g.on_swap_gesture(Position::new(0, 0), Direction::Right));
    g.run_until_settled();
    assert!(g.score() > 0);

    g.restart();
    assert_eq!(g.score(), 0);
    assert_eq!(g.displayed_score(), 0.0);
    assert_eq!(g.state(), TurnState::Move);
    assert!(g.events().is_empty());
    assert!(g.grid().is_full());
}

#[test]
fn test_snapshot_reflects_state() {
    let mut g = ready_game(GameConfig::instant());
    let mut snap = g.snapshot();
    assert_eq!((snap.width, snap.height), (4, 3));
    assert!(snap.accepting_input());

    g.on_swap_gesture(Position::new(0, 0), Direction::Right);
    g.snapshot_into(&mut snap);
    assert_eq!(snap.state, TurnState::Wait);
    assert_eq!(snap.seed, 21);
}

#[test]
fn test_drain_empties_the_event_queue() {
    let mut g = ready_game(GameConfig::instant());
    assert!(g.on_swap_gesture(Position::new(0, 0), Direction::Right));
    g.run_until_settled();

    assert!(!g.drain_events().is_empty());
    assert!(g.events().is_empty());
    assert!(g.drain_events().is_empty());
}
