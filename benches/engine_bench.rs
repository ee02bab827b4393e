use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::time::Duration;

use morris::board::Board;
use morris::config::GameConfig;
use morris::game::Game;
use morris::movegen::legal_actions;
use morris::protocol::snapshot::{encode_snapshot, parse_snapshot};

/// A midgame board: both teams have placed and Cat is about to move.
fn midgame() -> Board {
    let mut game = Game::new(&GameConfig::new(4).unwrap());
    for idx in [0, 9, 1, 10, 5, 13, 8, 22] {
        game.action(idx);
    }
    game.current().clone()
}

fn bench_check_mill(c: &mut Criterion) {
    let board = midgame();
    c.bench_function("check_mill_all_positions", |b| {
        b.iter(|| {
            for i in 0..24 {
                black_box(board.graph().check_mill(black_box(i)));
            }
        })
    });
}

fn bench_recompute_counters(c: &mut Criterion) {
    let board = midgame();
    c.bench_function("recompute_mill_counters", |b| {
        b.iter(|| {
            let mut graph = board.graph().clone();
            graph.recompute_mill_counters();
            black_box(graph)
        })
    });
}

fn bench_legal_actions(c: &mut Criterion) {
    let board = midgame();
    c.bench_function("legal_actions_midgame", |b| {
        b.iter(|| legal_actions(black_box(&board)))
    });
}

fn bench_action_undo(c: &mut Criterion) {
    let mut game = Game::from_board(midgame());
    let index = legal_actions(game.current())[0];
    c.bench_function("action_then_undo", |b| {
        b.iter(|| {
            game.action(black_box(index));
            game.undo();
        })
    });
}

fn bench_snapshot(c: &mut Criterion) {
    let board = midgame();
    let json = encode_snapshot(&board).unwrap();
    c.bench_function("encode_snapshot", |b| {
        b.iter(|| encode_snapshot(black_box(&board)))
    });
    c.bench_function("parse_snapshot", |b| {
        b.iter(|| parse_snapshot(black_box(&json)))
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default().measurement_time(Duration::from_secs(5));
    targets = bench_check_mill, bench_recompute_counters, bench_legal_actions,
              bench_action_undo, bench_snapshot
}
criterion_main!(benches);
