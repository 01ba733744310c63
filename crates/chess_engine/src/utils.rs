//! Utility functions and helpers
//!
//! Coordinate notation helpers shared by logs, tests and benchmarks.

use crate::error::{ChessEngineError, ChessEngineResult};
use crate::types::Position;

/// Parse a move in coordinate notation such as `"e2e4"`
///
/// # Examples
///
/// ```rust,ignore
/// let (from, to) = parse_move("g1f3")?;
/// assert_eq!(from, Position::new(6, 0));
/// ```
pub fn parse_move(text: &str) -> ChessEngineResult<(Position, Position)> {
    let text = text.trim();
    match (text.get(..2), text.get(2..)) {
        (Some(from), Some(to)) if text.len() == 4 => Ok((from.parse()?, to.parse()?)),
        _ => Err(ChessEngineError::InvalidSquareName {
            name: text.to_string(),
        }),
    }
}

/// Render a move in coordinate notation
pub fn format_move(from: Position, to: Position) -> String {
    format!("{from}{to}")
}
