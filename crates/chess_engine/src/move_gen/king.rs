//! King move generation
//!
//! Handles king-specific move generation. Kings move one square in any direction
//! (horizontally, vertically, or diagonally).
//!
//! ## King Movement Rules
//!
//! - Kings move one square in any direction (8 possible destinations)
//! - Cannot move to squares occupied by own pieces
//! - Cannot move to squares attacked by any opposing piece
//! - Can capture opponent pieces on destination squares
//!
//! ## Castling
//!
//! Offered after the ordinary steps, once per eligible rook. The side is
//! inferred from the rook's file (0 is queenside, 7 is kingside). Requirements:
//! - King unmoved on its home square, rook unmoved on the same rank
//! - Every square between them empty
//! - The king's current square, the square it passes and its destination
//!   all safe from attack
//!
//! The destination reported is the king's landing square: the g-file
//! kingside, the b-file queenside (rook to f or c).

use super::attack::is_endangered;
use crate::board::Board;
use crate::constants::*;
use crate::types::*;

/// Generate king moves, including castling when eligible
pub fn generate_king_moves(board: &Board, piece: &Piece, moves: &mut Vec<Position>) {
    moves.extend(
        KING_OFFSETS
            .iter()
            .map(|&(dx, dy)| piece.pos.offset(dx, dy))
            .filter(|&to| {
                to.is_on_board()
                    && !board.has_coloured_piece_at(to, piece.colour)
                    && !is_endangered(board, to, piece.colour)
            }),
    );

    if piece.has_moved || piece.pos != Position::new(KING_FILE, piece.colour.home_rank()) {
        return;
    }

    for (_, rook) in board.rooks(piece.colour) {
        if let Some(to) = castle_destination(board, piece, rook) {
            moves.push(to);
        }
    }
}

/// Landing square of the king when castling with `rook`, if allowed
fn castle_destination(board: &Board, king: &Piece, rook: &Piece) -> Option<Position> {
    let rank = king.colour.home_rank();
    if rook.has_moved || rook.pos.y != rank {
        return None;
    }

    let king_to = match rook.pos.x {
        QUEENSIDE_ROOK_FILE => QUEENSIDE_KING_TO,
        KINGSIDE_ROOK_FILE => KINGSIDE_KING_TO,
        _ => return None,
    };

    let (low, high) = (king.pos.x.min(rook.pos.x), king.pos.x.max(rook.pos.x));
    if ((low + 1)..high).any(|x| board.has_piece_at(Position::new(x, rank))) {
        return None;
    }

    let step = (king_to - king.pos.x).signum();
    let mut x = king.pos.x;
    loop {
        if is_endangered(board, Position::new(x, rank), king.colour) {
            return None;
        }
        if x == king_to {
            break;
        }
        x += step;
    }

    Some(Position::new(king_to, rank))
}

/// Kings threaten the eight adjacent squares; castling is never a threat
pub fn can_king_hit(piece: &Piece, target: Position) -> bool {
    let dx = (target.x - piece.pos.x).abs();
    let dy = (target.y - piece.pos.y).abs();
    dx <= 1 && dy <= 1 && (dx, dy) != (0, 0)
}
