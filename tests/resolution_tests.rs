//! Resolution tests - what one cycle destroys, scores and creates
//!
//! Most tests run with every pause at zero except the one before gravity, so a
//! single `step(0)` performs the destruction and stops with the board frozen
//! just before pieces start to fall.

use tui_match3::core::{layout, GameConfig, Palette};
use tui_match3::engine::{Game, GameEvent, Step};
use tui_match3::types::{BombColor, PieceColor, PieceKind, Position, TurnState};

fn frozen_before_gravity(width: u8, height: u8) -> GameConfig {
    GameConfig {
        gravity_start_delay_ms: 1_000,
        ..GameConfig::instant().with_board(width, height)
    }
}

fn game(width: u8, height: u8, text: &str) -> Game {
    Game::from_layout(frozen_before_gravity(width, height), text, 11).unwrap()
}

fn bombs_created(events: &[GameEvent]) -> Vec<(Position, BombColor)> {
    events
        .iter()
        .filter_map(|e| match e {
            GameEvent::BombCreated { position, color } => Some((*position, *color)),
            _ => None,
        })
        .collect()
}

fn score_deltas(events: &[GameEvent]) -> u32 {
    events
        .iter()
        .filter_map(|e| match e {
            GameEvent::ScoreDelta(d) => Some(*d),
            _ => None,
        })
        .sum()
}

#[test]
fn test_run_of_three_destroys_three() {
    let mut g = game(
        5,
        3,
        "GBYGB\n\
         BYGBY\n\
         RRRYG",
    );
    assert!(g.resolve_board());
    g.step(0);

    assert_eq!(layout::render(g.grid()), "GBYGB\nBYGBY\n...YG\n");
    assert_eq!(g.score(), 30);
    assert!(bombs_created(g.events()).is_empty());
    assert_eq!(g.state(), TurnState::Wait);
}

#[test]
fn test_four_in_a_row_creates_bomb_at_first_matched_cell() {
    let mut g = game(
        5,
        3,
        "GBYGB\n\
         BYGBY\n\
         RRRRY",
    );
    assert!(g.resolve_board());
    g.step(0);

    // (1, 0) is the first cell the scan matched.
    assert_eq!(layout::render(g.grid()), "GBYGB\nBYGBY\n.r..Y\n");
    assert_eq!(
        bombs_created(g.events()),
        vec![(Position::new(1, 0), BombColor::Color(PieceColor::Red))]
    );
    // The source makes way for the bomb without scoring.
    assert_eq!(g.score(), 30);
    assert_eq!(score_deltas(g.events()), 30);
}

#[test]
fn test_run_of_five_creates_one_bomb() {
    let mut g = game(
        5,
        3,
        "GBYGB\n\
         BYGBY\n\
         GGGGG",
    );
    g.resolve_board();
    g.step(0);

    assert_eq!(layout::render(g.grid()), "GBYGB\nBYGBY\n.g...\n");
    assert_eq!(g.score(), 40);
}

#[test]
fn test_single_bomb_blast_with_bomb_creation() {
    let mut g = game(
        5,
        5,
        "GBYGB\n\
         BYGBY\n\
         RRrYG\n\
         YGBGB\n\
         GBYBY",
    );
    assert!(g.resolve_board());
    g.step(0);

    // The red bomb completes the row and pulls its 3x3 square into the match: nine
    // regular pieces and one bomb resolve, and the first matched red becomes a bomb.
    assert_eq!(
        layout::render(g.grid()),
        "GBYGB\nB...Y\n.r..G\nY...B\nGBYBY\n"
    );
    assert_eq!(
        bombs_created(g.events()),
        vec![(Position::new(1, 2), BombColor::Color(PieceColor::Red))]
    );
    assert_eq!(g.score(), 90);
}

#[test]
fn test_single_bomb_blast_is_clipped_at_the_corner() {
    let mut g = game(
        3,
        3,
        "GBY\n\
         BGY\n\
         rRR",
    );
    assert!(g.resolve_board());
    g.step(0);

    assert_eq!(layout::render(g.grid()), "GBY\n..Y\n.r.\n");
    assert_eq!(g.score(), 40);
}

#[test]
fn test_single_bomb_without_enough_regulars_creates_nothing() {
    let mut g = game(
        3,
        3,
        "GBY\n\
         ..G\n\
         rRR",
    );
    assert!(g.resolve_board());
    g.step(0);

    assert_eq!(layout::render(g.grid()), "GBY\n..G\n...\n");
    assert!(bombs_created(g.events()).is_empty());
    assert_eq!(g.score(), 30);
}

#[test]
fn test_double_bomb_clears_the_whole_board() {
    let mut g = game(
        3,
        3,
        "GBY\n\
         BYG\n\
         **R",
    );
    assert!(g.resolve_board());
    g.step(0);

    assert_eq!(g.grid().pieces().count(), 0);
    assert_eq!(g.score(), 90);
    let events = g.drain_events();
    assert!(events.contains(&GameEvent::BoardCleared));
    assert!(bombs_created(&events).is_empty());
}

#[test]
fn test_two_bombs_of_different_colors_clear_the_board() {
    let mut g = game(
        3,
        3,
        "GBY\n\
         BYG\n\
         brR",
    );
    assert!(g.resolve_board());
    // Neither bomb accepts the other's color, yet adjacent bombs still pair up.
    assert_eq!(g.grid().current_matches().len(), 2);
    g.step(0);

    assert_eq!(g.grid().pieces().count(), 0);
    assert_eq!(g.score(), 90);
    let events = g.drain_events();
    assert!(events.contains(&GameEvent::BoardCleared));
    assert!(bombs_created(&events).is_empty());
}

#[test]
fn test_bomb_phases_follow_their_pauses() {
    let config = GameConfig {
        bomb_blast_delay_ms: 200,
        bomb_self_destroy_delay_ms: 100,
        gravity_start_delay_ms: 1_000,
        ..GameConfig::instant().with_board(3, 3)
    };
    let mut g = Game::from_layout(config, "GBY\n..G\nrRR", 5).unwrap();
    assert!(g.resolve_board());

    g.step(0);
    // Regular matches go first; the bomb waits for its blast delay.
    assert_eq!(layout::render(g.grid()), "GBY\n..G\nr..\n");
    g.step(199);
    assert_eq!(layout::render(g.grid()), "GBY\n..G\nr..\n");
    g.step(1);
    g.step(99);
    assert_eq!(layout::render(g.grid()), "GBY\n..G\nr..\n");
    g.step(1);
    assert_eq!(layout::render(g.grid()), "GBY\n..G\n...\n");
}

#[test]
fn test_cycle_ends_with_full_board_and_move_state() {
    let mut g = Game::from_layout(
        GameConfig::instant().with_board(5, 3),
        "GBYGB\n\
         BYGBY\n\
         RRRYG",
        3,
    )
    .unwrap();
    assert!(g.resolve_board());
    g.run_until_settled();

    assert!(g.grid().is_full());
    assert_eq!(g.state(), TurnState::Move);
    assert!(g.grid_mut().find_all_matches().is_empty());
    assert!(g.score() >= 30);
    assert!(matches!(
        g.events().last(),
        Some(GameEvent::Settled { .. })
    ));
}

#[test]
fn test_gravity_then_refill_fill_every_hole() {
    let mut g = Game::from_layout(
        GameConfig::instant().with_board(3, 3),
        "G.Y\n\
         ..G\n\
         B.R",
        8,
    )
    .unwrap();

    g.apply_step(Step::Collapse);
    g.run_until_settled();
    assert_eq!(layout::render(g.grid()), "..Y\nG.G\nB.R\n");

    g.apply_step(Step::Refill);
    g.run_until_settled();
    assert!(g.grid().is_full());
}

#[test]
fn test_refill_keeps_last_pick_when_retries_run_out() {
    let mut config = GameConfig::instant().with_board(3, 3);
    let red = Palette::standard()
        .regular
        .into_iter()
        .find(|t| {
            t.kind
                == PieceKind::Regular {
                    color: PieceColor::Red,
                }
        })
        .unwrap();
    config.palette.regular = vec![red];

    let mut g = Game::from_layout(
        config,
        "...\n\
         ...\n\
         RR.",
        6,
    )
    .unwrap();

    // Every pick completes a run, so each cell exhausts its retries and spawns red anyway.
    g.apply_step(Step::Refill);
    g.run_until_settled();

    assert!(g.grid().is_full());
    assert_eq!(g.grid().empty_cells().count(), 0);
    assert_eq!(layout::render(g.grid()), "RRR\nRRR\nRRR\n");
}
