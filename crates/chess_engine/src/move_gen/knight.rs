//! Knight move generation
//!
//! Handles knight-specific move generation. Knights move in an L-shape pattern:
//! 2 squares in one direction, then 1 square perpendicular (or vice versa).
//!
//! ## Knight Movement Rules
//!
//! - Knights can jump over pieces (unlike sliding pieces)
//! - 8 possible destinations from most squares (fewer near edges)
//! - Cannot move to squares occupied by own pieces
//! - Can capture opponent pieces on destination squares

use crate::board::Board;
use crate::constants::KNIGHT_OFFSETS;
use crate::types::*;

/// Generate knight moves from the knight's square
///
/// # Arguments
///
/// * `board` - The current board
/// * `piece` - The knight
/// * `moves` - Output vector to append valid moves to
pub fn generate_knight_moves(board: &Board, piece: &Piece, moves: &mut Vec<Position>) {
    moves.extend(
        KNIGHT_OFFSETS
            .iter()
            .map(|&(dx, dy)| piece.pos.offset(dx, dy))
            .filter(|&to| to.is_on_board() && !board.has_coloured_piece_at(to, piece.colour)),
    );
}

pub fn can_knight_hit(piece: &Piece, target: Position) -> bool {
    let dx = (target.x - piece.pos.x).abs();
    let dy = (target.y - piece.pos.y).abs();
    (dx == 2 && dy == 1) || (dx == 1 && dy == 2)
}
