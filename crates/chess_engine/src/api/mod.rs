//! Public API for the chess engine
//!
//! [`ChessGame`] owns a [`Board`](crate::board::Board), the side to move and
//! the terminal outcome once one is reached. It is the only entry point that
//! enforces turn order.
//!
//! ## Module Organization
//!
//! - `game` - Game lifecycle and accessors
//! - `moves` - Move acceptance (`make_move`, `legal_moves`)
//! - `state` - Outcome classification (`MoveOutcome`)

mod game;
mod moves;
mod state;

pub use game::ChessGame;
pub use state::MoveOutcome;
