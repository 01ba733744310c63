//! Integration tests for the rule engine
//!
//! Plays short games through the public API and checks move generation,
//! the check oracle and outcome classification against known positions.

use chess_engine::utils::parse_move;
use chess_engine::{Board, ChessGame, Colour, MoveOutcome, PieceKind, Position};

fn sq(name: &str) -> Position {
    name.parse().unwrap()
}

fn board(layout: &[(PieceKind, Colour, &str)]) -> Board {
    let layout: Vec<_> = layout
        .iter()
        .map(|&(kind, colour, name)| (kind, colour, sq(name)))
        .collect();
    Board::from_pieces(&layout).unwrap()
}

/// Plays coordinate-notation moves, returning each outcome
fn play(game: &mut ChessGame, moves: &[&str]) -> Vec<MoveOutcome> {
    moves
        .iter()
        .map(|mv| {
            let (from, to) = parse_move(mv).unwrap();
            game.make_move(from, to)
        })
        .collect()
}

// ============================================================================
// Move generation
// ============================================================================

#[test]
fn test_initial_available_moves() {
    //! Pawns have their two pushes, knights two jumps, everything else is
    //! boxed in.

    let board = Board::new();
    for (id, piece) in board.live_pieces() {
        let moves = board.available_moves(id);
        let expected = match piece.kind {
            PieceKind::Pawn | PieceKind::Knight => 2,
            _ => 0,
        };
        assert_eq!(moves.len(), expected, "{piece}");
    }

    let e2 = board.piece_id_at(sq("e2")).unwrap();
    assert_eq!(board.available_moves(e2), vec![sq("e3"), sq("e4")]);
    let g8 = board.piece_id_at(sq("g8")).unwrap();
    let mut knight = board.available_moves(g8);
    knight.sort();
    assert_eq!(knight, vec![sq("f6"), sq("h6")]);
}

#[test]
fn test_blocked_pawn_has_no_push() {
    let board = board(&[
        (PieceKind::King, Colour::White, "e1"),
        (PieceKind::King, Colour::Black, "e8"),
        (PieceKind::Pawn, Colour::White, "d2"),
        (PieceKind::Knight, Colour::Black, "d3"),
        (PieceKind::Pawn, Colour::White, "a2"),
        (PieceKind::Bishop, Colour::Black, "a4"),
        (PieceKind::Rook, Colour::Black, "c3"),
    ]);
    let d2 = board.piece_id_at(sq("d2")).unwrap();
    assert_eq!(board.available_moves(d2), vec![sq("c3")]);
    let a2 = board.piece_id_at(sq("a2")).unwrap();
    assert_eq!(board.available_moves(a2), vec![sq("a3")]);
}

#[test]
fn test_slider_stops_at_first_piece() {
    let board = board(&[
        (PieceKind::King, Colour::White, "h1"),
        (PieceKind::King, Colour::Black, "h8"),
        (PieceKind::Rook, Colour::White, "d4"),
        (PieceKind::Pawn, Colour::White, "d6"),
        (PieceKind::Pawn, Colour::Black, "f4"),
    ]);
    let rook = board.piece_id_at(sq("d4")).unwrap();
    let moves = board.available_moves(rook);
    assert!(moves.contains(&sq("d5")));
    assert!(!moves.contains(&sq("d6")));
    assert!(moves.contains(&sq("f4")));
    assert!(!moves.contains(&sq("g4")));
    assert_eq!(moves.len(), 3 + 1 + 3 + 2);
}

#[test]
fn test_king_avoids_attacked_squares() {
    let board = board(&[
        (PieceKind::King, Colour::White, "e1"),
        (PieceKind::Rook, Colour::Black, "d8"),
        (PieceKind::King, Colour::Black, "h8"),
    ]);
    let king = board.king(Colour::White);
    let moves = board.available_moves(king);
    assert!(!moves.contains(&sq("d1")));
    assert!(!moves.contains(&sq("d2")));
    assert!(moves.contains(&sq("f2")));
    assert_eq!(moves.len(), 3);
}

// ============================================================================
// Check oracle
// ============================================================================

#[test]
fn test_simulation_leaves_board_identical() {
    //! Every candidate move of every piece, including castling, captures and
    //! promotion, is simulated and the board must compare equal afterwards.

    let mut board = board(&[
        (PieceKind::King, Colour::White, "e1"),
        (PieceKind::Rook, Colour::White, "a1"),
        (PieceKind::Rook, Colour::White, "h1"),
        (PieceKind::Pawn, Colour::White, "b7"),
        (PieceKind::Knight, Colour::White, "d4"),
        (PieceKind::Queen, Colour::White, "d1"),
        (PieceKind::King, Colour::Black, "e8"),
        (PieceKind::Rook, Colour::Black, "a8"),
        (PieceKind::Bishop, Colour::Black, "b4"),
        (PieceKind::Pawn, Colour::Black, "e5"),
        (PieceKind::Queen, Colour::Black, "h4"),
    ]);
    let before = board.clone();

    for colour in [Colour::White, Colour::Black] {
        for id in board.pieces_of(colour) {
            for to in board.available_moves(id) {
                board.is_move_forbidden(id, to);
                assert_eq!(board, before, "simulating {} -> {to}", board.piece(id));
            }
        }
        board.is_mate(colour);
        assert_eq!(board, before);
    }
}

#[test]
fn test_pinned_knight_cannot_move() {
    let mut game = ChessGame::from_board(
        board(&[
            (PieceKind::King, Colour::White, "e1"),
            (PieceKind::Knight, Colour::White, "d2"),
            (PieceKind::Bishop, Colour::Black, "a5"),
            (PieceKind::King, Colour::Black, "h8"),
        ]),
        Colour::White,
    );
    assert!(game.legal_moves(sq("d2")).is_empty());
    assert_eq!(game.make_move(sq("d2"), sq("f3")), MoveOutcome::IllegalMove);
    assert_eq!(game.make_move(sq("e1"), sq("e2")), MoveOutcome::Continue);
}

// ============================================================================
// Outcomes
// ============================================================================

#[test]
fn test_fools_mate() {
    let mut game = ChessGame::new();
    let outcomes = play(&mut game, &["f2f3", "e7e6", "g2g4", "d8h4"]);
    assert_eq!(
        outcomes,
        vec![
            MoveOutcome::Continue,
            MoveOutcome::Continue,
            MoveOutcome::Continue,
            MoveOutcome::BlackWin
        ]
    );

    let mut board = game.board().clone();
    assert!(board.is_check(Colour::White));
    assert!(board.is_mate(Colour::White));
    assert_eq!(game.outcome(), Some(MoveOutcome::BlackWin));
}

#[test]
fn test_scholars_mate() {
    let mut game = ChessGame::new();
    let outcomes = play(
        &mut game,
        &["e2e4", "e7e5", "f1c4", "b8c6", "d1h5", "g8f6", "h5f7"],
    );
    assert_eq!(outcomes.last(), Some(&MoveOutcome::WhiteWin));
    assert!(outcomes[..6].iter().all(|o| *o == MoveOutcome::Continue));
}

#[test]
fn test_stalemate_is_not_a_win() {
    //! Black king cornered on h8 with no move and no check

    let mut game = ChessGame::from_board(
        board(&[
            (PieceKind::King, Colour::White, "f7"),
            (PieceKind::Queen, Colour::White, "g5"),
            (PieceKind::King, Colour::Black, "h8"),
        ]),
        Colour::White,
    );
    assert_eq!(game.make_move(sq("g5"), sq("g6")), MoveOutcome::Stalemate);

    let mut board = game.board().clone();
    assert!(board.is_mate(Colour::Black));
    assert!(!board.is_check(Colour::Black));
}

#[test]
fn test_finished_game_rejects_moves() {
    let mut game = ChessGame::new();
    play(&mut game, &["f2f3", "e7e6", "g2g4", "d8h4"]);
    assert!(game.is_over());
    let before = game.board().clone();
    assert_eq!(game.make_move(sq("a2"), sq("a3")), MoveOutcome::IllegalMove);
    assert_eq!(game.board(), &before);
}

// ============================================================================
// Special moves
// ============================================================================

fn castling_board(extra: &[(PieceKind, Colour, &str)]) -> Board {
    let mut layout = vec![
        (PieceKind::King, Colour::White, "e1"),
        (PieceKind::Rook, Colour::White, "a1"),
        (PieceKind::Rook, Colour::White, "h1"),
        (PieceKind::King, Colour::Black, "e8"),
    ];
    layout.extend_from_slice(extra);
    board(&layout)
}

#[test]
fn test_castling_both_sides_available() {
    let board = castling_board(&[]);
    let moves = board.available_moves(board.king(Colour::White));
    assert!(moves.contains(&sq("g1")));
    assert!(moves.contains(&sq("b1")));
    assert!(!moves.contains(&sq("c1")));
}

#[test]
fn test_kingside_castle_moves_both_pieces() {
    let mut game = ChessGame::from_board(castling_board(&[]), Colour::White);
    assert_eq!(game.make_move(sq("e1"), sq("g1")), MoveOutcome::Continue);

    let king = game.board().piece_at(sq("g1")).unwrap();
    let rook = game.board().piece_at(sq("f1")).unwrap();
    assert_eq!(king.kind, PieceKind::King);
    assert_eq!(rook.kind, PieceKind::Rook);
    assert!(king.has_moved && rook.has_moved);
    assert!(!game.board().has_piece_at(sq("h1")));
    assert!(!game.board().has_piece_at(sq("e1")));
}

#[test]
fn test_queenside_castle_moves_both_pieces() {
    let mut game = ChessGame::from_board(castling_board(&[]), Colour::White);
    assert_eq!(game.make_move(sq("e1"), sq("b1")), MoveOutcome::Continue);

    let king = game.board().piece_at(sq("b1")).unwrap();
    let rook = game.board().piece_at(sq("c1")).unwrap();
    assert_eq!(king.kind, PieceKind::King);
    assert_eq!(rook.kind, PieceKind::Rook);
    assert!(king.has_moved && rook.has_moved);
    assert!(!game.board().has_piece_at(sq("a1")));
    assert!(!game.board().has_piece_at(sq("d1")));
}

#[test]
fn test_queenside_castle_checks_b_c_and_d_files() {
    for attacker in ["b8", "c8", "d8"] {
        let board = castling_board(&[(PieceKind::Rook, Colour::Black, attacker)]);
        let moves = board.available_moves(board.king(Colour::White));
        assert!(!moves.contains(&sq("b1")), "castled past a rook on {attacker}");
        assert!(moves.contains(&sq("g1")));
    }
}

#[test]
fn test_castling_through_attack_refused() {
    let board = castling_board(&[(PieceKind::Rook, Colour::Black, "f8")]);
    let moves = board.available_moves(board.king(Colour::White));
    assert!(!moves.contains(&sq("g1")));
    assert!(moves.contains(&sq("b1")));
}

#[test]
fn test_castling_out_of_check_refused() {
    let board = castling_board(&[(PieceKind::Queen, Colour::Black, "e5")]);
    let moves = board.available_moves(board.king(Colour::White));
    assert!(!moves.contains(&sq("g1")));
    assert!(!moves.contains(&sq("b1")));
}

#[test]
fn test_castling_blocked_by_piece() {
    let board = castling_board(&[(PieceKind::Knight, Colour::White, "b1")]);
    let moves = board.available_moves(board.king(Colour::White));
    assert!(moves.contains(&sq("g1")));
    assert!(!moves.contains(&sq("b1")));
}

#[test]
fn test_castling_after_rook_moved_refused() {
    let mut game = ChessGame::from_board(castling_board(&[]), Colour::White);
    play(&mut game, &["h1h2", "e8d8", "h2h1", "d8e8"]);
    let moves = game.legal_moves(sq("e1"));
    assert!(!moves.contains(&sq("g1")));
    assert!(moves.contains(&sq("b1")));
}

#[test]
fn test_promotion_to_queen() {
    let mut game = ChessGame::from_board(
        board(&[
            (PieceKind::King, Colour::White, "h1"),
            (PieceKind::Pawn, Colour::White, "a7"),
            (PieceKind::King, Colour::Black, "h5"),
        ]),
        Colour::White,
    );
    let pawn = game.board().piece_id_at(sq("a7")).unwrap();
    assert_eq!(game.make_move(sq("a7"), sq("a8")), MoveOutcome::Continue);

    let queen = game.board().piece_at(sq("a8")).unwrap();
    assert_eq!(queen.kind, PieceKind::Queen);
    assert_eq!(queen.colour, Colour::White);
    assert!(!game.board().is_live(pawn));
    assert_eq!(game.board().live_count(), 3);
}

#[test]
fn test_black_promotes_by_capture() {
    let mut game = ChessGame::from_board(
        board(&[
            (PieceKind::King, Colour::White, "h8"),
            (PieceKind::Knight, Colour::White, "c1"),
            (PieceKind::Pawn, Colour::Black, "b2"),
            (PieceKind::King, Colour::Black, "a5"),
        ]),
        Colour::Black,
    );
    assert_eq!(game.make_move(sq("b2"), sq("c1")), MoveOutcome::Continue);
    let queen = game.board().piece_at(sq("c1")).unwrap();
    assert_eq!((queen.kind, queen.colour), (PieceKind::Queen, Colour::Black));
    assert_eq!(game.board().pieces_of(Colour::White).len(), 1);
}
