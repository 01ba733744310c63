//! Rook move generation
//!
//! Rooks slide along ranks and files. Castling eligibility of a rook is
//! decided on the king's side, see `king.rs`.

use super::sliding::{generate_sliding_moves, ray_reaches};
use crate::board::Board;
use crate::constants::ROOK_DIRS;
use crate::types::*;

pub fn generate_rook_moves(board: &Board, piece: &Piece, moves: &mut Vec<Position>) {
    generate_sliding_moves(board, piece, &ROOK_DIRS, moves);
}

pub fn can_rook_hit(board: &Board, piece: &Piece, target: Position) -> bool {
    ray_reaches(board, piece.pos, target, &ROOK_DIRS)
}
