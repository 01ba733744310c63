//! Move execution and validation

use super::game::ChessGame;
use super::state::MoveOutcome;
use crate::types::*;
use tracing::{debug, warn};

impl ChessGame {
    /// Submit a move for the side to move
    ///
    /// # Arguments
    ///
    /// * `from` - Square of the piece to move
    /// * `to` - Destination square; the king's landing square when castling
    ///
    /// # Returns
    ///
    /// [`MoveOutcome::IllegalMove`] with nothing changed when the game is
    /// over, a square is off the board, `from` is empty or holds the wrong
    /// colour, `to` is not an available move, or the move would leave the
    /// mover's king attacked. Otherwise the move is executed (promotion and
    /// castling included), the turn passes, and the outcome for the new side
    /// to move is returned.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let mut game = ChessGame::new();
    /// assert_eq!(game.make_move("e2".parse()?, "e4".parse()?), MoveOutcome::Continue);
    /// assert_eq!(game.make_move("e4".parse()?, "e5".parse()?), MoveOutcome::IllegalMove);
    /// ```
    pub fn make_move(&mut self, from: Position, to: Position) -> MoveOutcome {
        if let Some(outcome) = self.outcome {
            debug!(%outcome, "move submitted after the game ended");
            return MoveOutcome::IllegalMove;
        }
        if !from.is_on_board() || !to.is_on_board() {
            debug!(%from, %to, "move off the board");
            return MoveOutcome::IllegalMove;
        }
        let Some(id) = self.board.piece_id_at(from) else {
            debug!(%from, "no piece on source square");
            return MoveOutcome::IllegalMove;
        };
        let colour = self.board.piece(id).colour;
        if colour != self.current {
            debug!(%from, %colour, "piece does not belong to the side to move");
            return MoveOutcome::IllegalMove;
        }
        if !self.board.available_moves(id).contains(&to) {
            debug!(%from, %to, "destination not available");
            return MoveOutcome::IllegalMove;
        }
        if self.board.is_move_forbidden(id, to) {
            debug!(%from, %to, "move leaves the king in check");
            return MoveOutcome::IllegalMove;
        }

        if let Err(err) = self.board.apply_move(from, to) {
            warn!(%err, %from, %to, "validated move could not be applied");
            return MoveOutcome::IllegalMove;
        }

        self.current = !self.current;
        if self.board.is_mate(self.current) {
            let outcome = MoveOutcome::no_moves_left(self.current, self.board.is_check(self.current));
            self.outcome = Some(outcome);
            return outcome;
        }
        MoveOutcome::Continue
    }

    /// Destinations the piece on `from` may move to right now, for the side
    /// to move only. Empty for an empty square or an opposing piece.
    pub fn legal_moves(&mut self, from: Position) -> Vec<Position> {
        match self.board.piece_id_at(from) {
            Some(id) if self.board.piece(id).colour == self.current && self.outcome.is_none() => {
                self.board.legal_moves(id)
            }
            _ => Vec::new(),
        }
    }

    pub fn is_check(&self) -> bool {
        self.board.is_check(self.current)
    }
}
