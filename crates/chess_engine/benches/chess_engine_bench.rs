//! Chess Engine Benchmarks
//!
//! Performance benchmarks for move generation and the check oracle using Criterion.

use chess_engine::utils::parse_move;
use chess_engine::{Board, ChessGame, Colour};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn bench_new_board(c: &mut Criterion) {
    c.bench_function("new_board", |b| b.iter(|| black_box(Board::new())));
}

fn bench_available_moves_starting(c: &mut Criterion) {
    let board = Board::new();
    let pieces = board.pieces_of(Colour::White);

    c.bench_function("available_moves_starting_position", |b| {
        b.iter(|| {
            let total: usize = pieces
                .iter()
                .map(|&id| board.available_moves(id).len())
                .sum();
            black_box(total)
        })
    });
}

fn bench_is_mate_starting(c: &mut Criterion) {
    let mut board = Board::new();

    c.bench_function("is_mate_starting_position", |b| {
        b.iter(|| black_box(board.is_mate(Colour::White)))
    });
}

fn bench_fools_mate_game(c: &mut Criterion) {
    let moves: Vec<_> = ["f2f3", "e7e6", "g2g4", "d8h4"]
        .iter()
        .map(|mv| parse_move(mv).unwrap())
        .collect();

    c.bench_function("fools_mate_full_game", |b| {
        b.iter(|| {
            let mut game = ChessGame::new();
            for &(from, to) in &moves {
                black_box(game.make_move(from, to));
            }
            game
        })
    });
}

criterion_group!(
    benches,
    bench_new_board,
    bench_available_moves_starting,
    bench_is_mate_starting,
    bench_fools_mate_game
);
criterion_main!(benches);
