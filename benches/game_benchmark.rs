//! Benchmarks for running complete games and look-ahead primitives.
//!
//! A search agent spends its time cloning states, listing moves and advancing
//! phases, so those are benchmarked alongside whole driven games.

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use sylva::game::{GameState, Phase};
use sylva::tournament::{PolicyKind, TournamentConfig, run_game};

/// A generated game advanced to its first action pass.
fn opening(seed: u64) -> GameState {
    let mut state = GameState::generate(seed).unwrap();
    state.advance_to(Phase::Actions).unwrap();
    state
}

fn bench_single_game(c: &mut Criterion) {
    let config = TournamentConfig::default();

    c.bench_function("single_game_greedy_vs_random", |b| {
        b.iter(|| {
            let result = run_game(
                black_box(42),
                black_box([PolicyKind::Greedy, PolicyKind::Random]),
                black_box(config),
            );
            black_box(result)
        });
    });
}

fn bench_game_batch(c: &mut Criterion) {
    // Benchmark running 10 games sequentially (without parallel overhead)
    let config = TournamentConfig::default();

    c.bench_function("10_games_sequential", |b| {
        b.iter(|| {
            for seed in 0..10u64 {
                let result = run_game(black_box(seed), [PolicyKind::Random; 2], config);
                let _ = black_box(result);
            }
        });
    });
}

fn bench_legal_moves(c: &mut Criterion) {
    let state = opening(7);

    c.bench_function("legal_moves", |b| {
        b.iter(|| black_box(black_box(&state).legal_moves(0)));
    });
}

fn bench_clone_and_advance(c: &mut Criterion) {
    let state = opening(7);

    c.bench_function("clone_and_play_out", |b| {
        b.iter(|| {
            let mut copy = black_box(state);
            while copy.advance().is_ok() {}
            black_box(copy)
        });
    });
}

fn bench_generate(c: &mut Criterion) {
    c.bench_function("generate_map", |b| {
        b.iter(|| black_box(GameState::generate(black_box(99))));
    });
}

criterion_group!(
    benches,
    bench_single_game,
    bench_game_batch,
    bench_legal_moves,
    bench_clone_and_advance,
    bench_generate
);
criterion_main!(benches);
