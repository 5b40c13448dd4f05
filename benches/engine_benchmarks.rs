//! Criterion benchmarks over a fixed set of positions that each stress one
//! rule: castling, en passant, promotion, and a sparse rook ending.

use std::sync::atomic::AtomicBool;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use mailbox_engine::board::{
    search, Board, Evaluator, GenMode, MaterialEvaluator, MaterialOnly, SearchConfig, SearchState,
};

/// Name, FEN, and the perft depth that keeps one sample under a second.
const POSITIONS: [(&str, &str, usize); 5] = [
    ("opening", "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1", 4),
    ("castling", "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1", 3),
    ("en_passant", "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3", 4),
    ("promotion", "n1n5/PPPk4/8/8/8/8/4Kppp/5N1N b - - 0 1", 3),
    ("rook_ending", "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1", 5),
];

fn boards() -> impl Iterator<Item = (&'static str, Board, usize)> {
    POSITIONS
        .iter()
        .map(|&(name, fen, depth)| (name, Board::from_fen(fen), depth))
}

fn bench_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("generation");
    for (name, mut board, _) in boards() {
        group.bench_function(BenchmarkId::new("legal", name), |b| {
            b.iter(|| black_box(board.generate_legal_moves()))
        });
        group.bench_function(BenchmarkId::new("quiescence", name), |b| {
            b.iter(|| black_box(board.generate_moves_in(GenMode::Quiescence)))
        });
    }
    group.finish();
}

/// Incremental key updates through make/unmake against a full recompute.
fn bench_hashing(c: &mut Criterion) {
    let mut group = c.benchmark_group("hashing");
    for (name, mut board, _) in boards() {
        let moves = board.generate_legal_moves();
        group.bench_function(BenchmarkId::new("make_unmake", name), |b| {
            b.iter(|| {
                let mut acc = 0u64;
                for mv in &moves {
                    board.make_move(mv);
                    acc ^= board.hash();
                    board.unmake_move(mv);
                }
                black_box(acc)
            })
        });
        group.bench_function(BenchmarkId::new("recompute", name), |b| {
            b.iter(|| black_box(board.compute_hash()))
        });
    }
    group.finish();
}

fn bench_perft(c: &mut Criterion) {
    let mut group = c.benchmark_group("perft");
    group.sample_size(10);
    for (name, mut board, depth) in boards() {
        group.bench_with_input(BenchmarkId::new(name, depth), &depth, |b, &depth| {
            b.iter(|| board.perft(black_box(depth)))
        });
    }
    group.finish();
}

/// Cold runs allocate a fresh table every iteration; warm runs reuse one.
fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");
    group.sample_size(10);
    let stop = AtomicBool::new(false);
    let config = SearchConfig::depth(5);

    for (name, board, _) in boards() {
        group.bench_function(BenchmarkId::new("cold", name), |b| {
            b.iter(|| {
                let mut board = board.clone();
                let mut state = SearchState::new(4);
                search(&mut board, &mut state, &config, &stop).score
            })
        });

        let mut state = SearchState::new(4);
        group.bench_function(BenchmarkId::new("warm", name), |b| {
            b.iter(|| {
                let mut board = board.clone();
                search(&mut board, &mut state, &config, &stop).score
            })
        });
    }
    group.finish();
}

fn bench_evaluation(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluation");
    for (name, board, _) in boards() {
        group.bench_function(BenchmarkId::new("tapered", name), |b| {
            b.iter(|| black_box(MaterialEvaluator.evaluate(&board)))
        });
        group.bench_function(BenchmarkId::new("material_only", name), |b| {
            b.iter(|| black_box(MaterialOnly.evaluate(&board)))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_generation,
    bench_hashing,
    bench_perft,
    bench_search,
    bench_evaluation
);
criterion_main!(benches);
