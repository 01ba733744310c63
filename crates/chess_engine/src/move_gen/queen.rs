//! Queen move generation
//!
//! Handles queen-specific move generation. Queens combine the movement patterns
//! of bishops and rooks.
//!
//! ## Queen Movement Rules
//!
//! - Queens move like bishops (diagonally) OR rooks (horizontally/vertically)
//! - Cannot jump over pieces
//! - Movement stops when blocked by any piece, capturing if it is an opponent's

use super::sliding::{generate_sliding_moves, ray_reaches};
use crate::board::Board;
use crate::constants::QUEEN_DIRS;
use crate::types::*;

/// Generate queen moves: the four straight rays, then the four diagonals
pub fn generate_queen_moves(board: &Board, piece: &Piece, moves: &mut Vec<Position>) {
    generate_sliding_moves(board, piece, &QUEEN_DIRS, moves);
}

pub fn can_queen_hit(board: &Board, piece: &Piece, target: Position) -> bool {
    ray_reaches(board, piece.pos, target, &QUEEN_DIRS)
}
