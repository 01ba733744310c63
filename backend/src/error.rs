//! Error types for the game server

use shared::{DecodeError, Opcode};
use thiserror::Error;

/// Failures scoped to one connection. All of them end the session.
#[derive(Error, Debug)]
pub enum SessionError {
    /// The session exited or its transport is gone
    #[error("session closed")]
    Closed,

    #[error("handshake failed: expected Hello, received {opcode}")]
    Handshake { opcode: Opcode },

    #[error("malformed frame: {0}")]
    Decode(#[from] DecodeError),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("peer did not answer in time")]
    Timeout,
}

#[derive(Error, Debug)]
pub enum MatchmakerError {
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("game {code} has already started")]
    AlreadyStarted { code: String },

    /// Every 16-bit code is in use
    #[error("no free game codes")]
    CodesExhausted,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}
