//! Wire types shared by the game server and its clients
//!
//! - [`buffer`] - little-endian primitive reader/writer
//! - [`protocol`] - the opcode-tagged [`Message`] vocabulary

pub mod buffer;
pub mod error;
pub mod protocol;

pub use buffer::Buffer;
pub use error::DecodeError;
pub use protocol::{Message, Opcode};
