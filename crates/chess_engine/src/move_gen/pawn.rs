//! Pawn move generation
//!
//! Handles pawn-specific move generation including:
//! - Single and double forward pushes
//! - Diagonal captures
//!
//! Promotion is not a generation concern: any pawn landing on the last rank
//! is replaced by a queen when the move is applied (see `make_unmake.rs`).
//! En passant is not supported.

use crate::board::Board;
use crate::types::*;

/// Generate pawn moves from the pawn's square
///
/// Pushes require empty squares; the double push is only offered from the
/// starting rank with both squares empty. Diagonals are only offered onto
/// opposing pieces.
pub fn generate_pawn_moves(board: &Board, piece: &Piece, moves: &mut Vec<Position>) {
    let dir = piece.colour.forward();

    let one = piece.pos.offset(0, dir);
    if one.is_on_board() && !board.has_piece_at(one) {
        moves.push(one);
        let two = piece.pos.offset(0, 2 * dir);
        if piece.pos.y == piece.colour.pawn_rank() && !board.has_piece_at(two) {
            moves.push(two);
        }
    }

    for dx in [-1, 1] {
        let diagonal = piece.pos.offset(dx, dir);
        if board.has_coloured_piece_at(diagonal, !piece.colour) {
            moves.push(diagonal);
        }
    }
}

/// Pawns threaten both forward diagonals regardless of occupancy
pub fn can_pawn_hit(piece: &Piece, target: Position) -> bool {
    target.y == piece.pos.y + piece.colour.forward() && (target.x - piece.pos.x).abs() == 1
}
