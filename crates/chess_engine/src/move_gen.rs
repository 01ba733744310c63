//! Move generation
//!
//! Per-kind move rules dispatched on [`PieceKind`]. Two queries exist per
//! piece:
//!
//! - [`available_moves`] - destinations reachable on the next move, ignoring
//!   whether the move leaves the mover's own king attacked. The king is the
//!   exception: it never steps onto an attacked square and only castles
//!   through safe squares.
//! - [`can_hit`] - whether the piece attacks a square. Pawns attack
//!   diagonally whether or not anything stands there, and castling never
//!   counts as an attack.
//!
//! Both are pure reads over the [`Board`].

pub mod attack;
pub mod bishop;
pub mod king;
pub mod knight;
pub mod pawn;
pub mod queen;
pub mod rook;
pub mod sliding;

use crate::board::Board;
use crate::types::*;

pub use attack::{is_check, is_endangered};

/// Geometrically legal destinations for the piece, in generation order
pub fn available_moves(board: &Board, id: PieceId) -> Vec<Position> {
    let piece = board.piece(id);
    let mut moves = Vec::new();
    match piece.kind {
        PieceKind::Pawn => pawn::generate_pawn_moves(board, piece, &mut moves),
        PieceKind::Knight => knight::generate_knight_moves(board, piece, &mut moves),
        PieceKind::Bishop => bishop::generate_bishop_moves(board, piece, &mut moves),
        PieceKind::Rook => rook::generate_rook_moves(board, piece, &mut moves),
        PieceKind::Queen => queen::generate_queen_moves(board, piece, &mut moves),
        PieceKind::King => king::generate_king_moves(board, piece, &mut moves),
    }
    moves
}

/// True iff the piece could capture on `target` with its next move
pub fn can_hit(board: &Board, id: PieceId, target: Position) -> bool {
    let piece = board.piece(id);
    if !target.is_on_board() || piece.pos == target {
        return false;
    }
    match piece.kind {
        PieceKind::Pawn => pawn::can_pawn_hit(piece, target),
        PieceKind::Knight => knight::can_knight_hit(piece, target),
        PieceKind::Bishop => bishop::can_bishop_hit(board, piece, target),
        PieceKind::Rook => rook::can_rook_hit(board, piece, target),
        PieceKind::Queen => queen::can_queen_hit(board, piece, target),
        PieceKind::King => king::can_king_hit(piece, target),
    }
}

impl Board {
    /// See [`available_moves`]
    pub fn available_moves(&self, id: PieceId) -> Vec<Position> {
        available_moves(self, id)
    }

    /// See [`can_hit`]
    pub fn can_hit(&self, id: PieceId, target: Position) -> bool {
        can_hit(self, id, target)
    }

    /// True iff a piece not of `colour` attacks `pos`
    pub fn is_endangered(&self, pos: Position, colour: Colour) -> bool {
        is_endangered(self, pos, colour)
    }

    /// True iff `colour`'s king is attacked
    pub fn is_check(&self, colour: Colour) -> bool {
        is_check(self, colour)
    }
}
