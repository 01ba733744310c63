//! Error types for chess engine
//!
//! Provides custom error types for board construction and move application.
//! None of these escape the check oracle: a failed simulation is reported as a
//! forbidden move instead.

use crate::types::{Colour, Position};
use thiserror::Error;

/// Errors that can occur in the chess engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessEngineError {
    /// Coordinate outside the 8x8 board
    #[error("Square {position} is off the board")]
    OffBoard { position: Position },

    /// No piece at source square
    #[error("No piece at source square {square}")]
    NoPieceAtSquare { square: Position },

    /// Destination holds a king
    #[error("Logic error: king on {square} cannot be captured")]
    KingCapture { square: Position },

    /// Destination holds a piece of the mover's colour
    #[error("Logic error: piece on {from} cannot capture friendly piece on {to}")]
    FriendlyCapture { from: Position, to: Position },

    /// Castling geometry without a rook on the expected corner
    #[error("No castling rook on {square}")]
    MissingCastleRook { square: Position },

    /// Two pieces placed on the same square during setup
    #[error("Square {square} is already occupied")]
    SquareOccupied { square: Position },

    /// Setup without exactly one king of a colour
    #[error("Board must hold exactly one {colour} king, found {found}")]
    KingCount { colour: Colour, found: usize },

    /// Unparseable algebraic square
    #[error("Invalid square name: {name:?}")]
    InvalidSquareName { name: String },
}

/// Result type alias for chess engine operations
pub type ChessEngineResult<T> = Result<T, ChessEngineError>;
