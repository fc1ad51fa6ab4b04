//! Property tests - detection, gravity and full cycles on random boards

use proptest::prelude::*;

use tui_match3::core::{GameConfig, Grid, Layout, Palette, PiecePool, Spawner};
use tui_match3::engine::{Game, Step};
use tui_match3::types::{PieceKind, Position, TurnState};

const SYMBOLS: &[char] = &['B', 'G', 'R', 'P', 'Y', 'B', 'G', 'R', '.', '*', 'r', 'b'];

/// Board text (top row first) plus its size.
fn board() -> impl Strategy<Value = (u8, u8, String)> {
    (3u8..=6, 3u8..=6).prop_flat_map(|(w, h)| {
        prop::collection::vec(prop::sample::select(SYMBOLS), w as usize * h as usize).prop_map(
            move |symbols| {
                let text = symbols
                    .chunks(w as usize)
                    .map(|row| row.iter().collect::<String>())
                    .collect::<Vec<_>>()
                    .join("\n");
                (w, h, text)
            },
        )
    })
}

fn grid(text: &str) -> Grid {
    let layout = Layout::parse(text, 1).unwrap();
    let palette = Palette::standard();
    let mut pool = PiecePool::new();
    let mut grid = Grid::new(layout.width() as u8, layout.height() as u8);
    for (pos, kind) in layout.pieces() {
        let mut piece = pool.spawn(palette.template_for(&kind).unwrap(), pos);
        piece.set_bomb_color(kind.logical_color());
        grid.set(pos, piece);
    }
    grid
}

fn column(grid: &Grid, x: i8) -> Vec<Option<PieceKind>> {
    (0..grid.height() as i8)
        .map(|y| grid.get(Position::new(x, y)).map(|p| p.kind))
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Detection twice on an unchanged board yields the same set.
    #[test]
    fn prop_detection_is_idempotent((_w, _h, text) in board()) {
        let mut g = grid(&text);
        let first = g.find_all_matches().to_vec();
        let second = g.find_all_matches().to_vec();
        prop_assert_eq!(first, second);
    }

    /// Every matched flag is backed by an entry in the match set and vice versa.
    #[test]
    fn prop_flags_agree_with_match_set((_w, _h, text) in board()) {
        let mut g = grid(&text);
        let matches = g.find_all_matches().to_vec();
        let flagged = g.pieces().filter(|p| p.is_matched).count();
        prop_assert_eq!(flagged, matches.len());
        for handle in matches {
            prop_assert!(g.resolve(handle).is_some_and(|p| p.is_matched));
        }
    }

    /// Gravity compacts every column and keeps the pieces' vertical order.
    #[test]
    fn prop_collapse_compacts_in_order((w, _h, text) in board()) {
        let mut g = grid(&text);
        let before: Vec<Vec<PieceKind>> = (0..w as i8)
            .map(|x| column(&g, x).into_iter().flatten().collect())
            .collect();

        g.collapse_columns();

        for x in 0..w as i8 {
            let after = column(&g, x);
            let filled = after.iter().take_while(|c| c.is_some()).count();
            prop_assert!(after[filled..].iter().all(Option::is_none));
            let kinds: Vec<PieceKind> = after.into_iter().flatten().collect();
            prop_assert_eq!(&kinds, &before[x as usize]);
        }
        prop_assert!(g.collapse_step().is_none());
    }

    /// Gravity plus refill always leave a full board.
    #[test]
    fn prop_refill_fills_the_board((w, h, text) in board(), seed in any::<u64>()) {
        let config = GameConfig::instant().with_board(w, h);
        let mut game = Game::from_layout(config, &text, seed).unwrap();
        game.apply_step(Step::Collapse);
        game.apply_step(Step::Refill);
        game.run_until_settled();
        prop_assert!(game.grid().is_full());
    }

    /// A resolution cycle always ends in Move with a full board and no match left.
    #[test]
    fn prop_cycle_ends_settled((w, h, text) in board(), seed in any::<u64>()) {
        let config = GameConfig::instant().with_board(w, h);
        let mut game = Game::from_layout(config, &text, seed).unwrap();
        game.apply_step(Step::Collapse);
        game.apply_step(Step::Refill);
        game.run_until_settled();

        if game.resolve_board() {
            game.run_until_settled();
        }
        prop_assert_eq!(game.state(), TurnState::Move);
        prop_assert!(game.grid().is_full());
        prop_assert!(game.grid_mut().find_all_matches().is_empty());
    }
}
