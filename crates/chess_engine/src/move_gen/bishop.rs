//! Bishop move generation
//!
//! Bishops slide diagonally and therefore never leave their square colour;
//! the attack test rejects mismatched colours before walking the ray.

use super::sliding::{generate_sliding_moves, ray_reaches};
use crate::board::Board;
use crate::constants::BISHOP_DIRS;
use crate::types::*;

pub fn generate_bishop_moves(board: &Board, piece: &Piece, moves: &mut Vec<Position>) {
    generate_sliding_moves(board, piece, &BISHOP_DIRS, moves);
}

pub fn can_bishop_hit(board: &Board, piece: &Piece, target: Position) -> bool {
    piece.pos.square_colour() == target.square_colour()
        && ray_reaches(board, piece.pos, target, &BISHOP_DIRS)
}
