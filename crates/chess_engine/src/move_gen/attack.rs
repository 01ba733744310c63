//! Attack detection and square checking
//!
//! Provides functions to check if squares are under attack and if kings are in check.
//! This module is critical for move legality validation and check detection.
//!
//! ## Algorithm
//!
//! To check if a square is attacked, we iterate through all opponent pieces
//! and ask each whether it can hit the target square. This is cheaper than
//! generating every opposing move and never recurses into castling, since
//! [`can_hit`] excludes it.

use super::can_hit;
use crate::board::Board;
use crate::types::*;

/// Check if a square is under attack by pieces not of `colour`
///
/// # Arguments
///
/// * `board` - The current board
/// * `pos` - Square to test
/// * `colour` - Side asking; its own pieces are ignored
///
/// # Returns
///
/// `true` if any live opposing piece can hit `pos`
///
/// # Examples
///
/// ```rust,ignore
/// let board = Board::new();
/// assert!(is_endangered(&board, "f3".parse()?, Colour::White) == false);
/// assert!(is_endangered(&board, "f6".parse()?, Colour::White));
/// ```
pub fn is_endangered(board: &Board, pos: Position, colour: Colour) -> bool {
    board
        .live_pieces()
        .any(|(id, piece)| piece.colour != colour && can_hit(board, id, pos))
}

/// True iff `colour`'s king square is attacked
pub fn is_check(board: &Board, colour: Colour) -> bool {
    let king = board.piece(board.king(colour));
    is_endangered(board, king.pos, colour)
}
