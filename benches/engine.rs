//! 引擎基准测试：走法生成、局面快照与浅层搜索

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use hexcheckers_ai::test_positions::*;
use hexcheckers_ai::{AIConfig, AIEngine, Board, Color, SearchMode};

fn bench_movegen_start(c: &mut Criterion) {
    let board = Board::from_fen(START_8X8).unwrap();
    c.bench_function("movegen_start_8x8", |b| {
        b.iter(|| black_box(board.available_moves()))
    });
}

fn bench_movegen_captures(c: &mut Criterion) {
    let king_web = Board::from_fen(KING_WEB_6X6).unwrap();
    let long_chain = Board::from_fen(LONG_CHAIN_6X6).unwrap();
    c.bench_function("movegen_king_web", |b| {
        b.iter(|| black_box(king_web.available_moves_for_color(Color::A)))
    });
    c.bench_function("movegen_long_chain", |b| {
        b.iter(|| black_box(long_chain.available_moves_for_color(Color::A)))
    });
}

fn bench_state(c: &mut Criterion) {
    let board = Board::from_fen(AI_DEFENCE_6X6).unwrap();
    c.bench_function("position_state", |b| b.iter(|| black_box(board.state())));
}

fn bench_search(c: &mut Criterion) {
    let board = Board::from_fen(AI_DEFENCE_6X6).unwrap();
    for (name, mode) in [
        ("search_alphabeta_d2", SearchMode::AlphaBeta),
        ("search_exhaustive_d2", SearchMode::Exhaustive),
    ] {
        let ai = AIEngine::minimax(&AIConfig {
            depth: 2,
            mode,
            seed: Some(1),
            ..Default::default()
        });
        c.bench_function(name, |b| {
            b.iter(|| black_box(ai.find_best_move(&board, Color::B).unwrap()))
        });
    }
}

criterion_group!(
    benches,
    bench_movegen_start,
    bench_movegen_captures,
    bench_state,
    bench_search,
);
criterion_main!(benches);
