//! Game lifecycle management

use super::state::MoveOutcome;
use crate::board::Board;
use crate::types::*;

/// A game in progress: board, turn and outcome
#[derive(Debug, Clone)]
pub struct ChessGame {
    pub(super) board: Board,
    pub(super) current: Colour,
    pub(super) outcome: Option<MoveOutcome>,
}

impl Default for ChessGame {
    fn default() -> Self {
        ChessGame::new()
    }
}

impl ChessGame {
    /// Standard setup, white to move
    pub fn new() -> Self {
        ChessGame::from_board(Board::new(), Colour::White)
    }

    /// Starts from an arbitrary position with `to_move` on turn
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let board = Board::from_pieces(&[
    ///     (PieceKind::King, Colour::White, "e1".parse()?),
    ///     (PieceKind::King, Colour::Black, "e8".parse()?),
    /// ])?;
    /// let game = ChessGame::from_board(board, Colour::Black);
    /// ```
    pub fn from_board(board: Board, to_move: Colour) -> Self {
        ChessGame {
            board,
            current: to_move,
            outcome: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Side whose move is awaited
    pub fn current_player(&self) -> Colour {
        self.current
    }

    /// Terminal outcome, once reached
    pub fn outcome(&self) -> Option<MoveOutcome> {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }
}
