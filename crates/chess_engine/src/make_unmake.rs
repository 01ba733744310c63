//! Move application with undo records
//!
//! [`Board::apply_move`] mutates the board in place and returns a
//! [`SimulatedMove`] holding everything needed to put it back;
//! [`Board::revert_move`] consumes that record and restores the exact prior
//! state (grid, live set, arena and moved flags). Executing a move for real is
//! the same call with the record dropped.
//!
//! Side effects covered:
//! - captures (the victim leaves the live set but keeps its square)
//! - castling, detected as a king moving more than one file
//! - promotion of a pawn reaching rank 0 or 7 to a queen

use crate::board::Board;
use crate::constants::*;
use crate::error::{ChessEngineError, ChessEngineResult};
use crate::types::*;

/// Rook half of a castling move
#[derive(Debug, Clone, PartialEq, Eq)]
struct CastleUndo {
    rook: PieceId,
    rook_from: Position,
    rook_to: Position,
    rook_had_moved: bool,
}

/// Undo record for one applied move
#[must_use = "an applied move must be reverted or explicitly dropped"]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulatedMove {
    piece: PieceId,
    from: Position,
    to: Position,
    captured: Option<PieceId>,
    mover_had_moved: bool,
    promoted_to: Option<PieceId>,
    castle: Option<CastleUndo>,
}

impl SimulatedMove {
    pub fn from(&self) -> Position {
        self.from
    }

    pub fn to(&self) -> Position {
        self.to
    }

    pub fn captured(&self) -> Option<PieceId> {
        self.captured
    }

    pub fn was_promotion(&self) -> bool {
        self.promoted_to.is_some()
    }

    pub fn was_castle(&self) -> bool {
        self.castle.is_some()
    }
}

impl Board {
    /// Applies `from -> to` without any legality check beyond the structural
    /// ones below. The board is untouched when an error is returned.
    ///
    /// # Errors
    ///
    /// * [`ChessEngineError::OffBoard`] - either square outside the board
    /// * [`ChessEngineError::NoPieceAtSquare`] - `from` is empty
    /// * [`ChessEngineError::KingCapture`] - `to` holds a king
    /// * [`ChessEngineError::FriendlyCapture`] - `to` holds a piece of the mover's colour
    /// * [`ChessEngineError::MissingCastleRook`] - castling geometry without its rook
    pub fn apply_move(&mut self, from: Position, to: Position) -> ChessEngineResult<SimulatedMove> {
        for position in [from, to] {
            if !position.is_on_board() {
                return Err(ChessEngineError::OffBoard { position });
            }
        }
        let piece = self
            .piece_id_at(from)
            .ok_or(ChessEngineError::NoPieceAtSquare { square: from })?;
        let mover = self.piece(piece).clone();

        let captured = self.piece_id_at(to);
        if let Some(target) = captured.map(|id| self.piece(id)) {
            if target.kind == PieceKind::King {
                return Err(ChessEngineError::KingCapture { square: to });
            }
            if target.colour == mover.colour {
                return Err(ChessEngineError::FriendlyCapture { from, to });
            }
        }

        let castle = if mover.kind == PieceKind::King && (to.x - from.x).abs() > 1 {
            Some(self.castle_rook(&mover, to)?)
        } else {
            None
        };

        // Validation done, mutate from here on
        if let Some(id) = captured {
            self.take(id);
        }
        self.relocate(piece, to);
        self.piece_mut(piece).has_moved = true;

        if let Some(castle) = &castle {
            self.relocate(castle.rook, castle.rook_to);
            self.piece_mut(castle.rook).has_moved = true;
        }

        let promoted_to = if mover.kind == PieceKind::Pawn && (to.y == 0 || to.y == BOARD_SIZE - 1)
        {
            self.take(piece);
            let mut queen = Piece::new(PieceKind::Queen, mover.colour, to);
            queen.has_moved = true;
            Some(self.spawn(queen))
        } else {
            None
        };

        Ok(SimulatedMove {
            piece,
            from,
            to,
            captured,
            mover_had_moved: mover.has_moved,
            promoted_to,
            castle,
        })
    }

    /// Restores the board to its state before the matching `apply_move`.
    /// Records must be reverted in reverse order of application.
    pub fn revert_move(&mut self, sim: SimulatedMove) {
        if let Some(queen) = sim.promoted_to {
            self.take(queen);
            self.despawn_last(queen);
            self.restore(sim.piece);
        }
        self.relocate(sim.piece, sim.from);
        self.piece_mut(sim.piece).has_moved = sim.mover_had_moved;

        if let Some(castle) = sim.castle {
            self.relocate(castle.rook, castle.rook_from);
            self.piece_mut(castle.rook).has_moved = castle.rook_had_moved;
        }

        if let Some(captured) = sim.captured {
            self.restore(captured);
        }
    }

    /// Locates the rook that travels with a castling king landing on `king_to`
    fn castle_rook(&self, king: &Piece, king_to: Position) -> ChessEngineResult<CastleUndo> {
        let rank = king.pos.y;
        let (rook_file, rook_file_to) = if king_to.x == KINGSIDE_KING_TO {
            (KINGSIDE_ROOK_FILE, KINGSIDE_ROOK_TO)
        } else {
            (QUEENSIDE_ROOK_FILE, QUEENSIDE_ROOK_TO)
        };
        let rook_from = Position::new(rook_file, rank);
        let rook_to = Position::new(rook_file_to, rank);

        let rook = self
            .piece_id_at(rook_from)
            .filter(|&id| {
                let rook = self.piece(id);
                rook.kind == PieceKind::Rook && rook.colour == king.colour
            })
            .ok_or(ChessEngineError::MissingCastleRook { square: rook_from })?;
        if self.has_piece_at(rook_to) {
            return Err(ChessEngineError::SquareOccupied { square: rook_to });
        }

        Ok(CastleUndo {
            rook,
            rook_from,
            rook_to,
            rook_had_moved: self.piece(rook).has_moved,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Position {
        name.parse().unwrap()
    }

    #[test]
    fn test_apply_then_revert_restores_board() {
        let mut board = Board::new();
        let before = board.clone();
        let sim = board.apply_move(sq("e2"), sq("e4")).unwrap();
        assert_ne!(board, before);
        board.revert_move(sim);
        assert_eq!(board, before);
    }

    #[test]
    fn test_capture_is_restored() {
        let mut board = Board::from_pieces(&[
            (PieceKind::King, Colour::White, sq("e1")),
            (PieceKind::King, Colour::Black, sq("e8")),
            (PieceKind::Rook, Colour::White, sq("a1")),
            (PieceKind::Knight, Colour::Black, sq("a7")),
        ])
        .unwrap();
        let before = board.clone();
        let sim = board.apply_move(sq("a1"), sq("a7")).unwrap();
        assert!(sim.captured().is_some());
        assert_eq!(board.live_count(), 3);
        board.revert_move(sim);
        assert_eq!(board, before);
    }

    #[test]
    fn test_king_and_friendly_captures_rejected() {
        let mut board = Board::from_pieces(&[
            (PieceKind::King, Colour::White, sq("e1")),
            (PieceKind::King, Colour::Black, sq("e8")),
            (PieceKind::Rook, Colour::White, sq("e2")),
        ])
        .unwrap();
        let before = board.clone();
        assert_eq!(
            board.apply_move(sq("e2"), sq("e8")),
            Err(ChessEngineError::KingCapture { square: sq("e8") })
        );
        assert_eq!(
            board.apply_move(sq("e1"), sq("e2")),
            Err(ChessEngineError::FriendlyCapture {
                from: sq("e1"),
                to: sq("e2")
            })
        );
        assert_eq!(
            board.apply_move(sq("d4"), sq("d5")),
            Err(ChessEngineError::NoPieceAtSquare { square: sq("d4") })
        );
        assert_eq!(board, before);
    }

    #[test]
    fn test_promotion_spawns_queen_and_reverts() {
        let mut board = Board::from_pieces(&[
            (PieceKind::King, Colour::White, sq("e1")),
            (PieceKind::King, Colour::Black, sq("a8")),
            (PieceKind::Pawn, Colour::White, sq("g7")),
        ])
        .unwrap();
        let before = board.clone();
        let pawn = board.piece_id_at(sq("g7")).unwrap();

        let sim = board.apply_move(sq("g7"), sq("g8")).unwrap();
        assert!(sim.was_promotion());
        let queen = board.piece_at(sq("g8")).unwrap();
        assert_eq!(queen.kind, PieceKind::Queen);
        assert_eq!(queen.colour, Colour::White);
        assert!(!board.is_live(pawn));

        board.revert_move(sim);
        assert_eq!(board, before);
    }

    #[test]
    fn test_castle_moves_rook_and_reverts() {
        let mut board = Board::from_pieces(&[
            (PieceKind::King, Colour::Black, sq("e8")),
            (PieceKind::Rook, Colour::Black, sq("a8")),
            (PieceKind::King, Colour::White, sq("e1")),
        ])
        .unwrap();
        let before = board.clone();

        let sim = board.apply_move(sq("e8"), sq("b8")).unwrap();
        assert!(sim.was_castle());
        assert_eq!(board.piece_at(sq("b8")).unwrap().kind, PieceKind::King);
        assert_eq!(board.piece_at(sq("c8")).unwrap().kind, PieceKind::Rook);
        assert!(board.piece_at(sq("c8")).unwrap().has_moved);
        assert!(board.piece_at(sq("a8")).is_none());

        board.revert_move(sim);
        assert_eq!(board, before);
    }

    #[test]
    fn test_castle_without_rook_fails_untouched() {
        let mut board = Board::from_pieces(&[
            (PieceKind::King, Colour::White, sq("e1")),
            (PieceKind::King, Colour::Black, sq("e8")),
        ])
        .unwrap();
        let before = board.clone();
        assert_eq!(
            board.apply_move(sq("e1"), sq("g1")),
            Err(ChessEngineError::MissingCastleRook { square: sq("h1") })
        );
        assert_eq!(board, before);
    }
}
