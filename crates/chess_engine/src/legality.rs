//! Check oracle
//!
//! Answers "would this move leave my king attacked?" by applying the move to
//! the live board, asking [`Board::is_check`], and reverting. Any structural
//! failure while applying counts as forbidden.

use crate::board::Board;
use crate::types::*;
use tracing::warn;

impl Board {
    /// True iff moving `id` to `to` would leave its own king in check
    ///
    /// Kings are never capturable, so a king on `to` makes the move forbidden
    /// outright. The board is identical before and after the call.
    pub fn is_move_forbidden(&mut self, id: PieceId, to: Position) -> bool {
        if !self.is_live(id) {
            return true;
        }
        if self
            .piece_at(to)
            .is_some_and(|target| target.kind == PieceKind::King)
        {
            return true;
        }

        let piece = self.piece(id);
        let (from, colour) = (piece.pos, piece.colour);
        match self.apply_move(from, to) {
            Ok(sim) => {
                let check = self.is_check(colour);
                self.revert_move(sim);
                check
            }
            Err(err) => {
                let board: &Board = self;
                warn!(%err, %from, %to, %board, "move simulation failed, treating as forbidden");
                true
            }
        }
    }

    /// Moves of `id` that are geometrically legal and not forbidden
    pub fn legal_moves(&mut self, id: PieceId) -> Vec<Position> {
        let mut moves = self.available_moves(id);
        moves.retain(|&to| !self.is_move_forbidden(id, to));
        moves
    }

    /// True iff `colour` has no move that is not forbidden
    ///
    /// Checkmate and stalemate both satisfy this; callers tell them apart
    /// with [`Board::is_check`].
    pub fn is_mate(&mut self, colour: Colour) -> bool {
        for id in self.pieces_of(colour) {
            for to in self.available_moves(id) {
                if !self.is_move_forbidden(id, to) {
                    return false;
                }
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Position {
        name.parse().unwrap()
    }

    #[test]
    fn test_pinned_piece_is_forbidden() {
        let mut board = Board::from_pieces(&[
            (PieceKind::King, Colour::White, sq("e1")),
            (PieceKind::Bishop, Colour::White, sq("e2")),
            (PieceKind::Rook, Colour::Black, sq("e8")),
            (PieceKind::King, Colour::Black, sq("a8")),
        ])
        .unwrap();
        let bishop = board.piece_id_at(sq("e2")).unwrap();
        let before = board.clone();

        assert!(board.is_move_forbidden(bishop, sq("d3")));
        assert!(board.legal_moves(bishop).is_empty());
        assert_eq!(board, before);
    }

    #[test]
    fn test_capturing_the_checker_is_allowed() {
        let mut board = Board::from_pieces(&[
            (PieceKind::King, Colour::White, sq("e1")),
            (PieceKind::Rook, Colour::White, sq("a2")),
            (PieceKind::Queen, Colour::Black, sq("e2")),
            (PieceKind::King, Colour::Black, sq("a8")),
        ])
        .unwrap();
        let rook = board.piece_id_at(sq("a2")).unwrap();
        let king = board.king(Colour::White);
        assert!(board.is_check(Colour::White));
        assert!(!board.is_move_forbidden(rook, sq("e2")));
        // Queen on e2 is protected by nothing, the king may take it too
        assert!(!board.is_move_forbidden(king, sq("e2")));
        assert!(board.is_move_forbidden(rook, sq("a3")));
    }

    #[test]
    fn test_king_destination_is_forbidden() {
        let mut board = Board::from_pieces(&[
            (PieceKind::King, Colour::White, sq("e1")),
            (PieceKind::Queen, Colour::White, sq("e2")),
            (PieceKind::King, Colour::Black, sq("e8")),
        ])
        .unwrap();
        let queen = board.piece_id_at(sq("e2")).unwrap();
        let before = board.clone();
        assert!(board.is_move_forbidden(queen, sq("e8")));
        assert_eq!(board, before);
    }

    #[test]
    fn test_simulation_error_fails_safe() {
        // No rook on h1, so the castling geometry cannot be applied
        let mut board = Board::from_pieces(&[
            (PieceKind::King, Colour::White, sq("e1")),
            (PieceKind::King, Colour::Black, sq("e8")),
        ])
        .unwrap();
        let king = board.king(Colour::White);
        let before = board.clone();
        assert!(board.is_move_forbidden(king, sq("g1")));
        assert_eq!(board, before);
    }

    #[test]
    fn test_start_position_is_not_mate() {
        let mut board = Board::new();
        assert!(!board.is_mate(Colour::White));
        assert!(!board.is_mate(Colour::Black));
    }
}
