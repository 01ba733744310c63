//! Per-connection protocol driver
//!
//! A [`Session`] wraps one participant's transport (any byte-frame
//! `Sink` + `Stream` pair) and runs the connection state machine:
//!
//! ```text
//! Uninitialized --Hello/Hello--> Ready --Exit, timeout, close--> Closed
//! ```
//!
//! ## Listeners
//!
//! Received messages are dispatched through a registry of subscriptions keyed
//! by [`Opcode`]. A subscription is a channel: [`Session::listen_for`] keeps
//! receiving every matching message, [`Session::once`] is removed from the
//! registry after its first delivery, and [`Session::wait_for`] awaits a
//! single message. Dropping a [`Listener`] unsubscribes it.
//!
//! When the session exits, the `Exit` message is delivered first and then
//! every subscription is closed, so all waiters wake up.
//!
//! ## Liveness
//!
//! Once ready, a heartbeat task pings the peer on a fixed `ping_interval`
//! period and expects the echo within `ping_timeout`; a missing echo
//! synthesizes `Exit`.

use crate::config::SessionConfig;
use crate::error::SessionError;
use futures::{Sink, SinkExt, Stream, StreamExt};
use parking_lot::Mutex;
use shared::{Message, Opcode};
use std::collections::HashMap;
use std::fmt::Display;
use std::pin::{pin, Pin};
use std::sync::{Arc, Weak};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval, timeout, Duration, MissedTickBehavior};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Uninitialized,
    Ready,
    Closed,
}

enum Outbound {
    Frame(Vec<u8>),
    Close,
}

struct Subscription {
    id: u64,
    once: bool,
    sender: mpsc::UnboundedSender<Message>,
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    closed: bool,
    subscriptions: HashMap<Opcode, Vec<Subscription>>,
}

impl Registry {
    /// A closed registry hands out receivers that are already closed
    fn subscribe(&mut self, opcode: Opcode, once: bool) -> (u64, mpsc::UnboundedReceiver<Message>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let id = self.next_id;
        self.next_id += 1;
        if !self.closed {
            self.subscriptions
                .entry(opcode)
                .or_default()
                .push(Subscription { id, once, sender });
        }
        (id, receiver)
    }

    fn unsubscribe(&mut self, opcode: Opcode, id: u64) {
        if let Some(subscriptions) = self.subscriptions.get_mut(&opcode) {
            subscriptions.retain(|sub| sub.id != id);
        }
    }

    fn dispatch(&mut self, message: &Message) {
        if let Some(subscriptions) = self.subscriptions.get_mut(&message.opcode()) {
            subscriptions.retain(|sub| sub.sender.send(message.clone()).is_ok() && !sub.once);
        }
    }

    fn close(&mut self) {
        self.closed = true;
        self.subscriptions.clear();
    }
}

/// Subscription handle returned by [`Session::listen_for`] and [`Session::once`]
pub struct Listener {
    session: Weak<Session>,
    opcode: Opcode,
    id: u64,
    receiver: mpsc::UnboundedReceiver<Message>,
}

impl Listener {
    /// Next matching message, or `None` once the subscription is finished
    /// (one-shot already delivered, or the session closed)
    pub async fn recv(&mut self) -> Option<Message> {
        self.receiver.recv().await
    }

    pub fn opcode(&self) -> Opcode {
        self.opcode
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        if let Some(session) = self.session.upgrade() {
            session.registry.lock().unsubscribe(self.opcode, self.id);
        }
    }
}

/// Aborts the wrapped task when dropped
struct AbortOnDrop(JoinHandle<()>);

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        self.0.abort();
    }
}

pub struct Session {
    code: String,
    config: SessionConfig,
    outbound: mpsc::UnboundedSender<Outbound>,
    registry: Mutex<Registry>,
    state: watch::Sender<SessionState>,
}

impl Session {
    /// Wraps the sending half of a transport. Frames are written by a
    /// background task in the order [`Session::send`] was called.
    pub fn new<S>(code: impl Into<String>, sink: S, config: SessionConfig) -> Arc<Session>
    where
        S: Sink<Vec<u8>> + Send + 'static,
        S::Error: Display,
    {
        let (outbound, queue) = mpsc::unbounded_channel();
        let session = Arc::new(Session {
            code: code.into(),
            config,
            outbound,
            registry: Mutex::new(Registry::default()),
            state: watch::channel(SessionState::Uninitialized).0,
        });
        tokio::spawn(write_frames(Arc::downgrade(&session), sink, queue));
        session
    }

    /// Game code this connection was opened for
    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn state(&self) -> SessionState {
        *self.state.borrow()
    }

    pub fn is_closed(&self) -> bool {
        self.state() == SessionState::Closed
    }

    /// Drives the connection until it closes: handshake, heartbeat and the
    /// receive loop. Whatever ends the loop, `Exit` is raised locally before
    /// returning.
    pub async fn run<St, E>(self: Arc<Self>, incoming: St) -> Result<(), SessionError>
    where
        St: Stream<Item = Result<Vec<u8>, E>> + Send,
        E: Display + Send,
    {
        let incoming = pin!(incoming);
        let result = self.drive(incoming).await;
        if let Err(err) = &result {
            debug!(code = %self.code, %err, "session ended with error");
        }
        self.notify(Message::Exit);
        result
    }

    async fn drive<St, E>(self: &Arc<Self>, mut incoming: Pin<&mut St>) -> Result<(), SessionError>
    where
        St: Stream<Item = Result<Vec<u8>, E>> + Send,
        E: Display + Send,
    {
        self.send(&Message::Hello)?;
        let first = match timeout(self.config.ping_timeout, incoming.next()).await {
            Err(_) => return Err(SessionError::Timeout),
            Ok(None) => return Err(SessionError::Closed),
            Ok(Some(Err(err))) => return Err(SessionError::Transport(err.to_string())),
            Ok(Some(Ok(frame))) => frame,
        };
        match Message::decode(&first)? {
            Message::Hello => {}
            other => {
                return Err(SessionError::Handshake {
                    opcode: other.opcode(),
                })
            }
        }

        let became_ready = self.state.send_if_modified(|state| {
            if *state == SessionState::Uninitialized {
                *state = SessionState::Ready;
                true
            } else {
                false
            }
        });
        if !became_ready {
            return Err(SessionError::Closed);
        }
        debug!(code = %self.code, "handshake complete");
        self.notify(Message::Ready);

        let _heartbeat = AbortOnDrop(tokio::spawn(heartbeat(
            Arc::downgrade(self),
            self.config.clone(),
        )));

        loop {
            let frame = tokio::select! {
                frame = incoming.next() => frame,
                _ = self.closed() => return Ok(()),
            };
            match frame {
                None => return Ok(()),
                Some(Err(err)) => return Err(SessionError::Transport(err.to_string())),
                Some(Ok(frame)) if frame.is_empty() => continue,
                Some(Ok(frame)) => match Message::decode(&frame) {
                    Ok(message) => self.notify(message),
                    Err(err) => {
                        warn!(code = %self.code, %err, "undecodable frame, closing session");
                        return Err(err.into());
                    }
                },
            }
        }
    }

    /// Queues a message for the peer. Sending `Exit` also exits locally.
    pub fn send(&self, message: &Message) -> Result<(), SessionError> {
        self.outbound
            .send(Outbound::Frame(message.encode()))
            .map_err(|_| SessionError::Closed)?;
        if *message == Message::Exit {
            self.notify(Message::Exit);
        }
        Ok(())
    }

    /// Delivers a message to local listeners as if it had been received
    ///
    /// The first `Exit` closes the session; later ones are ignored.
    pub fn notify(&self, message: Message) {
        if message != Message::Exit {
            self.registry.lock().dispatch(&message);
            return;
        }

        let first_exit = self.state.send_if_modified(|state| {
            if *state == SessionState::Closed {
                false
            } else {
                *state = SessionState::Closed;
                true
            }
        });
        if first_exit {
            let mut registry = self.registry.lock();
            registry.dispatch(&message);
            registry.close();
        }
    }

    /// Every `opcode` message from now until the listener is dropped
    pub fn listen_for(self: &Arc<Self>, opcode: Opcode) -> Listener {
        self.subscribe(opcode, false)
    }

    /// The next `opcode` message only
    pub fn once(self: &Arc<Self>, opcode: Opcode) -> Listener {
        self.subscribe(opcode, true)
    }

    fn subscribe(self: &Arc<Self>, opcode: Opcode, once: bool) -> Listener {
        let (id, receiver) = self.registry.lock().subscribe(opcode, once);
        Listener {
            session: Arc::downgrade(self),
            opcode,
            id,
            receiver,
        }
    }

    /// Suspends until the next `opcode` message arrives
    ///
    /// No timeout of its own; wrap it in one when needed.
    ///
    /// # Errors
    ///
    /// [`SessionError::Closed`] when the session exits first.
    pub async fn wait_for(self: &Arc<Self>, opcode: Opcode) -> Result<Message, SessionError> {
        self.once(opcode).recv().await.ok_or(SessionError::Closed)
    }

    /// Resolves once the handshake completed, or fails if the session closed
    /// before that
    pub async fn wait_ready(&self) -> Result<(), SessionError> {
        let mut state = self.state.subscribe();
        let reached = state
            .wait_for(|state| *state != SessionState::Uninitialized)
            .await
            .map(|state| *state)
            .map_err(|_| SessionError::Closed)?;
        match reached {
            SessionState::Ready => Ok(()),
            _ => Err(SessionError::Closed),
        }
    }

    /// Resolves once the session has exited
    pub async fn closed(&self) {
        let mut state = self.state.subscribe();
        let _ = state.wait_for(|state| *state == SessionState::Closed).await;
    }

    /// Exits and closes the transport after already queued frames are written
    pub fn disconnect(&self) {
        self.notify(Message::Exit);
        let _ = self.outbound.send(Outbound::Close);
    }
}

async fn write_frames<S>(
    session: Weak<Session>,
    sink: S,
    mut queue: mpsc::UnboundedReceiver<Outbound>,
) where
    S: Sink<Vec<u8>> + Send + 'static,
    S::Error: Display,
{
    let mut sink = pin!(sink);
    while let Some(Outbound::Frame(frame)) = queue.recv().await {
        if let Err(err) = sink.send(frame).await {
            if let Some(session) = session.upgrade() {
                debug!(code = %session.code, %err, "transport write failed");
                session.notify(Message::Exit);
            }
            break;
        }
    }
    let _ = sink.close().await;
}

/// Pings on a fixed period. A slow echo does not push later pings back.
async fn heartbeat(session: Weak<Session>, config: SessionConfig) {
    let mut ticker = interval(config.ping_interval.max(Duration::from_millis(1)));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    ticker.tick().await;
    loop {
        ticker.tick().await;
        let Some(session) = session.upgrade() else {
            return;
        };

        let mut echo = session.once(Opcode::Ping);
        if session.send(&Message::Ping).is_err() {
            return;
        }
        match timeout(config.ping_timeout, echo.recv()).await {
            Ok(Some(_)) => {}
            Ok(None) => return,
            Err(_) => {
                warn!(
                    code = %session.code,
                    timeout = %humantime::format_duration(config.ping_timeout),
                    "ping not answered, closing session"
                );
                session.notify(Message::Exit);
                return;
            }
        }
    }
}
