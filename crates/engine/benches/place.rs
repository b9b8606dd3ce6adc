//! Benchmark for placement and cascading collapse
//!
//! Measures `place` on a quiet board and on a board primed for a full-board cascade.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use quantum_squares_engine::{new_game, place, Cell, GameConfig, GameState};

/// Every cell one short of capacity, so any placement topples the whole board
fn loaded_state(board_size: usize) -> GameState {
    let config = GameConfig {
        board_size,
        win_threshold: i32::MAX,
        ..Default::default()
    };
    let mut state = new_game(config).expect("valid config");
    for pos in state.board.positions().collect::<Vec<_>>() {
        *state.board.cell_mut(pos) = Cell {
            particles: config.capacity - 1,
            owner: Some(((pos.row + pos.col) % 2) as u8),
        };
    }
    state
}

fn bench_quiet_place(c: &mut Criterion) {
    c.bench_function("place_no_collapse", |b| {
        let state = GameState::default();
        b.iter(|| {
            let mut s = state.clone();
            black_box(place(&mut s, black_box(2), black_box(2)).ok())
        })
    });
}

fn bench_cascade(c: &mut Criterion) {
    let mut group = c.benchmark_group("place_full_cascade");

    for size in [5usize, 9, 15] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let state = loaded_state(size);
            b.iter(|| {
                let mut s = state.clone();
                black_box(place(&mut s, 0, 0).ok())
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_quiet_place, bench_cascade);
criterion_main!(benches);
