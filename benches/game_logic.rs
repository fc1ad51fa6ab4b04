use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use tui_match3::core::GameConfig;
use tui_match3::engine::Game;
use tui_match3::types::{Direction, Position, TICK_MS};

fn filled_game(seed: u64) -> Game {
    let mut game = Game::new(GameConfig::instant(), seed).unwrap();
    game.start();
    game
}

fn bench_find_all_matches(c: &mut Criterion) {
    let mut game = filled_game(12345);

    c.bench_function("find_all_matches_7x7", |b| {
        b.iter(|| {
            black_box(game.grid_mut().find_all_matches().len());
        })
    });
}

fn bench_collapse(c: &mut Criterion) {
    c.bench_function("collapse_half_empty_board", |b| {
        b.iter_batched(
            || {
                let mut game = filled_game(7);
                let holes: Vec<Position> = game
                    .grid()
                    .positions()
                    .filter(|p| (p.x + p.y) % 2 == 0)
                    .collect();
                for pos in holes {
                    game.grid_mut().take(pos);
                }
                game
            },
            |mut game| black_box(game.grid_mut().collapse_columns().len()),
            BatchSize::SmallInput,
        )
    });
}

fn bench_full_cycle(c: &mut Criterion) {
    c.bench_function("swap_and_settle", |b| {
        b.iter_batched(
            || filled_game(99),
            |mut game| {
                // Try swaps until one is accepted; most boards revert, some cascade.
                let positions: Vec<Position> = game.grid().positions().collect();
                for pos in positions {
                    if game.on_swap_gesture(pos, Direction::Up) {
                        game.run_until_settled();
                    }
                }
                black_box(game.score())
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_step(c: &mut Criterion) {
    let mut game = filled_game(4242);

    c.bench_function("game_step_16ms", |b| {
        b.iter(|| {
            game.step(black_box(TICK_MS));
        })
    });
}

criterion_group!(
    benches,
    bench_find_all_matches,
    bench_collapse,
    bench_full_cycle,
    bench_step
);
criterion_main!(benches);
