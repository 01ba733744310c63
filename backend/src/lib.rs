//! Two-player chess game server
//!
//! - [`session`]: handshake, listeners and heartbeat for one connection
//! - [`matchmaker`]: game codes, pending games and pairing
//! - [`game`]: the turn loop between two paired sessions
//! - [`api`]: HTTP routes and the WebSocket endpoint

pub mod api;
pub mod chat;
pub mod config;
pub mod connection;
pub mod error;
pub mod game;
pub mod matchmaker;
pub mod session;
