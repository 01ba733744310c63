//! Chess rule engine
//!
//! Validates and applies moves supplied by human players. There is no search
//! or evaluation: the engine answers which moves are legal, executes accepted
//! ones, and classifies the position as ongoing, won or stalemated.
//!
//! ## Layers
//!
//! - [`types`], [`board`] - positions, pieces and the occupancy grid
//! - [`move_gen`] - per-kind move and attack rules
//! - `make_unmake`, `legality` - simulate/revert and the check oracle
//! - [`api`] - [`ChessGame`], turn order and outcomes

pub mod api;
pub mod board;
pub mod constants;
pub mod error;
mod legality;
mod make_unmake;
pub mod move_gen;
pub mod types;
pub mod utils;

pub use api::{ChessGame, MoveOutcome};
pub use board::Board;
pub use error::{ChessEngineError, ChessEngineResult};
pub use make_unmake::SimulatedMove;
pub use types::{Colour, Piece, PieceId, PieceKind, Position};
