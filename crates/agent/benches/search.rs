//! Benchmark for greedy move selection
//!
//! Measures GreedyAgent::best_move on an opening board and on a crowded
//! mid-game board where most candidate moves trigger cascades.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use quantum_squares_agent::{Agent, GreedyAgent, RandomAgent};
use quantum_squares_engine::{new_game, place, GameConfig, GameState};

/// Advance a fresh game with random moves
fn midgame(board_size: usize, plies: usize, seed: u64) -> GameState {
    let config = GameConfig {
        board_size,
        win_threshold: i32::MAX,
        ..Default::default()
    };
    let mut state = new_game(config).expect("valid config");
    let mut rng = StdRng::seed_from_u64(seed);
    let mut agent = RandomAgent::new();
    for _ in 0..plies {
        let player = state.current_player;
        let Some(pos) = agent.select_move(&state, player, &mut rng) else {
            break;
        };
        let _ = place(&mut state, pos.row as isize, pos.col as isize);
    }
    state
}

fn bench_best_move(c: &mut Criterion) {
    let mut group = c.benchmark_group("greedy_best_move");
    let agent = GreedyAgent::new();

    for (label, plies) in [("opening", 0usize), ("midgame", 60)] {
        for size in [5usize, 9] {
            let state = midgame(size, plies, 42);
            group.bench_with_input(
                BenchmarkId::new(label, size),
                &state,
                |b, state| b.iter(|| black_box(agent.best_move(black_box(state), state.current_player))),
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_best_move);
criterion_main!(benches);
