//! Move outcome classification

use crate::types::Colour;
use std::fmt;

/// Result of submitting a move to [`ChessGame::make_move`](super::ChessGame::make_move)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveOutcome {
    /// Rejected; the board and turn are unchanged
    IllegalMove,
    Continue,
    WhiteWin,
    BlackWin,
    Stalemate,
}

impl MoveOutcome {
    /// Outcome for `to_move` having no permitted move
    pub(crate) fn no_moves_left(to_move: Colour, in_check: bool) -> Self {
        match (in_check, to_move) {
            (false, _) => MoveOutcome::Stalemate,
            (true, Colour::White) => MoveOutcome::BlackWin,
            (true, Colour::Black) => MoveOutcome::WhiteWin,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            MoveOutcome::WhiteWin | MoveOutcome::BlackWin | MoveOutcome::Stalemate
        )
    }

    pub fn winner(self) -> Option<Colour> {
        match self {
            MoveOutcome::WhiteWin => Some(Colour::White),
            MoveOutcome::BlackWin => Some(Colour::Black),
            _ => None,
        }
    }
}

impl fmt::Display for MoveOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            MoveOutcome::IllegalMove => "illegal move",
            MoveOutcome::Continue => "continue",
            MoveOutcome::WhiteWin => "white wins",
            MoveOutcome::BlackWin => "black wins",
            MoveOutcome::Stalemate => "stalemate",
        };
        f.write_str(text)
    }
}
