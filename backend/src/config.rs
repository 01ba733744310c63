//! Server configuration
//!
//! Read from environment variables (after `.env` is loaded by the binary).
//! Durations use humantime syntax (`5s`, `250ms`, `1m 30s`). A variable that
//! is set but malformed is an error; unset variables take the defaults below.
//!
//! | Variable | Default |
//! |---|---|
//! | `CHESS_BIND_ADDR` | `0.0.0.0:8080` |
//! | `CHESS_PING_INTERVAL` | `5s` |
//! | `CHESS_PING_TIMEOUT` | `10s` |
//! | `CHESS_PENDING_TTL` | `30s` |
//! | `CHESS_SWEEP_INTERVAL` | `30s` |
//! | `CHESS_START_DELAY` | `10s` |
//! | `CHESS_EXIT_GRACE` | `2s` |

use crate::error::ConfigError;
use std::net::SocketAddr;
use std::time::Duration;

/// Liveness timings for one connection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Pause between heartbeat pings
    pub ping_interval: Duration,
    /// How long a ping echo (and the opening Hello) may take
    pub ping_timeout: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            ping_interval: Duration::from_secs(5),
            ping_timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchmakerConfig {
    /// Lifetime of a pending game nobody is waiting in
    pub pending_ttl: Duration,
    pub sweep_interval: Duration,
}

impl Default for MatchmakerConfig {
    fn default() -> Self {
        MatchmakerConfig {
            pending_ttl: Duration::from_secs(30),
            sweep_interval: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Chat time between colour assignment and the first move
    pub start_delay: Duration,
    /// Wait between broadcasting Exit and closing both transports
    pub exit_grace: Duration,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            start_delay: Duration::from_secs(10),
            exit_grace: Duration::from_secs(2),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub session: SessionConfig,
    pub matchmaker: MatchmakerConfig,
    pub game: GameConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            session: SessionConfig::default(),
            matchmaker: MatchmakerConfig::default(),
            game: GameConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key/value source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = ServerConfig::default();
        let duration = |key: &'static str, default: Duration| -> Result<Duration, ConfigError> {
            match lookup(key) {
                None => Ok(default),
                Some(value) => humantime::parse_duration(value.trim()).map_err(|err| {
                    ConfigError::Invalid {
                        key,
                        value,
                        reason: err.to_string(),
                    }
                }),
            }
        };

        let bind_addr = match lookup("CHESS_BIND_ADDR") {
            None => defaults.bind_addr,
            Some(value) => value.trim().parse().map_err(|err: std::net::AddrParseError| {
                ConfigError::Invalid {
                    key: "CHESS_BIND_ADDR",
                    value,
                    reason: err.to_string(),
                }
            })?,
        };

        Ok(ServerConfig {
            bind_addr,
            session: SessionConfig {
                ping_interval: duration("CHESS_PING_INTERVAL", defaults.session.ping_interval)?,
                ping_timeout: duration("CHESS_PING_TIMEOUT", defaults.session.ping_timeout)?,
            },
            matchmaker: MatchmakerConfig {
                pending_ttl: duration("CHESS_PENDING_TTL", defaults.matchmaker.pending_ttl)?,
                sweep_interval: duration("CHESS_SWEEP_INTERVAL", defaults.matchmaker.sweep_interval)?,
            },
            game: GameConfig {
                start_delay: duration("CHESS_START_DELAY", defaults.game.start_delay)?,
                exit_grace: duration("CHESS_EXIT_GRACE", defaults.game.exit_grace)?,
            },
        })
    }
}
