//! Matchmaker / pairing service
//!
//! ## Game codes
//!
//! Codes come from a wrapping 16-bit counter seeded at random. Each value is
//! bit-rotated before rendering so consecutive games do not get adjacent
//! codes, then printed as four lowercase hex digits. Codes still in use are
//! skipped.
//!
//! ## Pending games
//!
//! A [`PendingGame`] is created by [`Matchmaker::create_pending_game`] and
//! waits for two sessions. The first to [`PendingGame::enter`] is seated as
//! host; the second is paired with it into a [`Game`] and the pending record
//! is replaced by the game. A host leaving before that reopens the record.
//! Records nobody is waiting in expire after `pending_ttl`.
//!
//! Locking: the registry mutex guards both collections and is never held
//! across an `.await`; each pending game serializes `enter` with its own
//! async seat lock.

use crate::chat::sanitize;
use crate::config::{GameConfig, MatchmakerConfig};
use crate::error::MatchmakerError;
use crate::game::Game;
use crate::session::Session;
use parking_lot::Mutex;
use shared::{Message, Opcode};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU16, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info};

#[derive(Default)]
struct Registry {
    pending: HashMap<String, Arc<PendingGame>>,
    games: HashMap<String, Arc<Game>>,
}

impl Registry {
    fn in_use(&self, code: &str) -> bool {
        self.pending.contains_key(code) || self.games.contains_key(code)
    }
}

pub struct Matchmaker {
    registry: Mutex<Registry>,
    counter: AtomicU16,
    config: MatchmakerConfig,
    game_config: GameConfig,
}

impl Matchmaker {
    pub fn new(config: MatchmakerConfig, game_config: GameConfig) -> Arc<Matchmaker> {
        Arc::new(Matchmaker {
            registry: Mutex::new(Registry::default()),
            counter: AtomicU16::new(rand::random()),
            config,
            game_config,
        })
    }

    /// Registers a new pending game and returns its code
    ///
    /// # Errors
    ///
    /// [`MatchmakerError::CodesExhausted`] when all 65536 codes are taken.
    pub fn create_pending_game(&self) -> Result<String, MatchmakerError> {
        let mut registry = self.registry.lock();
        for _ in 0..=u16::MAX {
            let code = self.next_code();
            if registry.in_use(&code) {
                continue;
            }
            registry
                .pending
                .insert(code.clone(), PendingGame::new(code.clone()));
            info!(code = %code, "created pending game");
            return Ok(code);
        }
        Err(MatchmakerError::CodesExhausted)
    }

    fn next_code(&self) -> String {
        let value = self.counter.fetch_add(1, Ordering::Relaxed);
        format!("{:04x}", value.rotate_left(7))
    }

    pub fn pending(&self, code: &str) -> Option<Arc<PendingGame>> {
        self.registry.lock().pending.get(code).cloned()
    }

    pub fn game(&self, code: &str) -> Option<Arc<Game>> {
        self.registry.lock().games.get(code).cloned()
    }

    pub fn pending_count(&self) -> usize {
        self.registry.lock().pending.len()
    }

    /// Replaces the pending record with the running game
    fn promote(&self, code: &str, game: Arc<Game>) {
        let mut registry = self.registry.lock();
        registry.pending.remove(code);
        registry.games.insert(code.to_string(), game);
    }

    /// Forgets a finished or abandoned game
    pub fn end_game(&self, code: &str) {
        if self.registry.lock().games.remove(code).is_some() {
            debug!(code = %code, "game removed");
        }
    }

    /// Drops pending games that have had no host for longer than the TTL
    /// and returns their codes
    pub fn sweep_expired(&self) -> Vec<String> {
        let ttl = self.config.pending_ttl;
        let mut expired = Vec::new();
        self.registry.lock().pending.retain(|code, pending| {
            if pending.is_expired(ttl) {
                expired.push(code.clone());
                false
            } else {
                true
            }
        });
        for code in &expired {
            info!(code = %code, "pending game expired");
        }
        expired
    }

    /// Runs [`Matchmaker::sweep_expired`] every `sweep_interval` until the
    /// matchmaker is dropped
    pub fn spawn_sweeper(self: &Arc<Self>) -> JoinHandle<()> {
        let matchmaker = Arc::downgrade(self);
        let period = self.config.sweep_interval.max(Duration::from_millis(1));
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let Some(matchmaker) = matchmaker.upgrade() else {
                    return;
                };
                matchmaker.sweep_expired();
            }
        })
    }
}

struct Status {
    created_at: Instant,
    /// No host is seated
    is_pending: bool,
    /// A guest arrived and the game was created
    promoted: bool,
}

/// Host waiting for a guest, with the listeners attached while it waits
struct HostSeat {
    session: Arc<Session>,
    chat: JoinHandle<()>,
    exit: JoinHandle<()>,
}

impl HostSeat {
    fn detach(self) -> Arc<Session> {
        self.chat.abort();
        self.exit.abort();
        self.session
    }
}

pub struct PendingGame {
    code: String,
    status: Mutex<Status>,
    seat: tokio::sync::Mutex<Option<HostSeat>>,
}

impl PendingGame {
    fn new(code: String) -> Arc<PendingGame> {
        Arc::new(PendingGame {
            code,
            status: Mutex::new(Status {
                created_at: Instant::now(),
                is_pending: true,
                promoted: false,
            }),
            seat: tokio::sync::Mutex::new(None),
        })
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    /// True while nobody is waiting in this game
    pub fn is_pending(&self) -> bool {
        self.status.lock().is_pending
    }

    fn is_expired(&self, ttl: Duration) -> bool {
        let status = self.status.lock();
        status.is_pending && !status.promoted && status.created_at.elapsed() > ttl
    }

    /// Seats `session` as host, or pairs it with the waiting host and starts
    /// the game
    ///
    /// Waits for the session's handshake first. Concurrent callers are
    /// served one at a time.
    ///
    /// # Errors
    ///
    /// - [`MatchmakerError::Session`] if the session closed before it was ready
    /// - [`MatchmakerError::AlreadyStarted`] if another guest won the race
    pub async fn enter(
        self: &Arc<Self>,
        matchmaker: &Arc<Matchmaker>,
        session: Arc<Session>,
    ) -> Result<(), MatchmakerError> {
        session.wait_ready().await?;

        let mut seat = self.seat.lock().await;
        if self.status.lock().promoted {
            return Err(MatchmakerError::AlreadyStarted {
                code: self.code.clone(),
            });
        }

        match seat.take() {
            Some(host) if !host.session.is_closed() => {
                let host = host.detach();
                if let Err(err) = host.send(&Message::GuestJoined) {
                    debug!(code = %self.code, %err, "host gone while pairing");
                }
                self.status.lock().promoted = true;

                let game = Game::new(
                    self.code.clone(),
                    host,
                    session,
                    Arc::downgrade(matchmaker),
                    matchmaker.game_config.clone(),
                );
                matchmaker.promote(&self.code, Arc::clone(&game));
                info!(code = %self.code, "guest joined");
                tokio::spawn(game.run());
            }
            stale => {
                if let Some(stale) = stale {
                    stale.detach();
                }
                *seat = Some(self.seat_host(session));
                self.status.lock().is_pending = false;
                info!(code = %self.code, "host waiting for guest");
            }
        }
        Ok(())
    }

    fn seat_host(self: &Arc<Self>, session: Arc<Session>) -> HostSeat {
        let mut chat_lines = session.listen_for(Opcode::Chat);
        let host = Arc::clone(&session);
        let code = self.code.clone();
        let chat = tokio::spawn(async move {
            while let Some(message) = chat_lines.recv().await {
                let Message::Chat { message, .. } = message else {
                    continue;
                };
                if let Some(line) = sanitize(&message) {
                    info!(code = %code, author = "Host", message = %line, "chat");
                    if host.send(&Message::chat("Host", line)).is_err() {
                        return;
                    }
                }
            }
        });

        let mut exit_signal = session.once(Opcode::Exit);
        let pending = Arc::downgrade(self);
        let host = Arc::clone(&session);
        let exit = tokio::spawn(async move {
            exit_signal.recv().await;
            if let Some(pending) = pending.upgrade() {
                pending.host_left(&host).await;
            }
        });

        HostSeat {
            session,
            chat,
            exit,
        }
    }

    /// Reopens the guest slot after the seated host exited
    async fn host_left(&self, host: &Arc<Session>) {
        let mut seat = self.seat.lock().await;
        let seated = seat
            .as_ref()
            .is_some_and(|current| Arc::ptr_eq(&current.session, host));
        if !seated {
            return;
        }
        if let Some(current) = seat.take() {
            // this runs on the exit task itself, so only the chat task is aborted
            current.chat.abort();
        }

        let mut status = self.status.lock();
        status.is_pending = true;
        status.created_at = Instant::now();
        drop(status);

        info!(code = %self.code, "host disconnected before a guest joined");
        host.disconnect();
    }
}

impl std::fmt::Debug for PendingGame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingGame")
            .field("code", &self.code)
            .field("is_pending", &self.is_pending())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn matchmaker(pending_ttl: Duration) -> Arc<Matchmaker> {
        Matchmaker::new(
            MatchmakerConfig {
                pending_ttl,
                sweep_interval: Duration::from_secs(3600),
            },
            GameConfig::default(),
        )
    }

    #[test]
    fn test_codes_are_four_hex_digits() {
        let matchmaker = matchmaker(Duration::from_secs(30));
        for _ in 0..100 {
            let code = matchmaker.create_pending_game().unwrap();
            assert_eq!(code.len(), 4);
            assert!(code.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        }
    }

    #[test]
    fn test_codes_are_unique() {
        let matchmaker = matchmaker(Duration::from_secs(30));
        let codes: HashSet<String> = (0..1000)
            .map(|_| matchmaker.create_pending_game().unwrap())
            .collect();
        assert_eq!(codes.len(), 1000);
        assert_eq!(matchmaker.pending_count(), 1000);
    }

    #[test]
    fn test_codes_skip_those_in_use() {
        let matchmaker = matchmaker(Duration::from_secs(30));
        matchmaker.counter.store(0, Ordering::Relaxed);
        let first = matchmaker.create_pending_game().unwrap();
        assert_eq!(first, "0000");

        // wrap around onto the code still registered
        matchmaker.counter.store(0, Ordering::Relaxed);
        let second = matchmaker.create_pending_game().unwrap();
        assert_eq!(second, format!("{:04x}", 1u16.rotate_left(7)));
    }

    #[test]
    fn test_new_pending_game_has_no_host() {
        let matchmaker = matchmaker(Duration::from_secs(30));
        let code = matchmaker.create_pending_game().unwrap();
        let pending = matchmaker.pending(&code).unwrap();
        assert_eq!(pending.code(), code);
        assert!(pending.is_pending());
        assert!(matchmaker.pending("zzzz").is_none());
        assert!(matchmaker.game(&code).is_none());
    }

    #[tokio::test]
    async fn test_sweep_removes_only_expired_games() {
        let fresh = matchmaker(Duration::from_secs(3600));
        fresh.create_pending_game().unwrap();
        assert!(fresh.sweep_expired().is_empty());
        assert_eq!(fresh.pending_count(), 1);

        let stale = matchmaker(Duration::ZERO);
        let code = stale.create_pending_game().unwrap();
        tokio::time::sleep(Duration::from_millis(5)).await;
        assert_eq!(stale.sweep_expired(), vec![code.clone()]);
        assert!(stale.pending(&code).is_none());
    }

    #[tokio::test]
    async fn test_sweeper_task_runs_periodically() {
        let matchmaker = Matchmaker::new(
            MatchmakerConfig {
                pending_ttl: Duration::ZERO,
                sweep_interval: Duration::from_millis(10),
            },
            GameConfig::default(),
        );
        let sweeper = matchmaker.spawn_sweeper();
        matchmaker.create_pending_game().unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(matchmaker.pending_count(), 0);
        sweeper.abort();
    }
}
