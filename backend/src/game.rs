//! Game driver
//!
//! Owns the two paired sessions and runs one game between them:
//!
//! 1. colours are announced (`PieceColour`), chat relays and exit watchers
//!    are attached
//! 2. after the start delay `StartGame` is broadcast
//! 3. the turn loop prompts the side to move with `YourMove`, validates its
//!    `BasicMove` and forwards accepted moves to the opponent
//!
//! An `Exit` from either side (received, synthesized by a timeout, or caused
//! by a broken transport) ends the game for both. A finished game leaves the
//! sessions open so the players can keep chatting.

use crate::chat::sanitize;
use crate::config::GameConfig;
use crate::matchmaker::Matchmaker;
use crate::session::Session;
use chess_engine::{ChessGame, Colour, MoveOutcome, Position};
use shared::{Message, Opcode};
use std::sync::{Arc, Weak};
use tokio::sync::watch;
use tokio::time::sleep;
use tracing::{debug, info, warn};

/// How [`Game::run`] finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEnd {
    /// Checkmate or stalemate
    Finished(MoveOutcome),
    /// A player left before the game was decided
    Exited,
}

pub struct Game {
    code: String,
    white: Arc<Session>,
    black: Arc<Session>,
    ended: watch::Sender<bool>,
    matchmaker: Weak<Matchmaker>,
    config: GameConfig,
}

impl Game {
    /// Pairs host and guest with randomly assigned colours
    pub fn new(
        code: impl Into<String>,
        host: Arc<Session>,
        guest: Arc<Session>,
        matchmaker: Weak<Matchmaker>,
        config: GameConfig,
    ) -> Arc<Game> {
        let (white, black) = if rand::random::<bool>() {
            (host, guest)
        } else {
            (guest, host)
        };
        Game::with_colours(code, white, black, matchmaker, config)
    }

    pub fn with_colours(
        code: impl Into<String>,
        white: Arc<Session>,
        black: Arc<Session>,
        matchmaker: Weak<Matchmaker>,
        config: GameConfig,
    ) -> Arc<Game> {
        Arc::new(Game {
            code: code.into(),
            white,
            black,
            ended: watch::channel(false).0,
            matchmaker,
            config,
        })
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn player(&self, colour: Colour) -> &Arc<Session> {
        match colour {
            Colour::White => &self.white,
            Colour::Black => &self.black,
        }
    }

    pub fn is_ended(&self) -> bool {
        *self.ended.borrow()
    }

    /// Sends to both players. Per-player failures are logged and skipped.
    pub fn broadcast(&self, message: &Message) {
        for colour in [Colour::White, Colour::Black] {
            if let Err(err) = self.player(colour).send(message) {
                debug!(code = %self.code, %colour, %err, %message, "broadcast skipped player");
            }
        }
    }

    pub async fn run(self: Arc<Self>) -> GameEnd {
        info!(code = %self.code, "game started");
        for colour in [Colour::White, Colour::Black] {
            let is_white = colour == Colour::White;
            if let Err(err) = self.player(colour).send(&Message::PieceColour { is_white }) {
                debug!(code = %self.code, %colour, %err, "could not announce colour");
            }
            self.relay_chat(colour);
            self.watch_exit(colour);
        }

        tokio::select! {
            _ = sleep(self.config.start_delay) => {}
            _ = self.wait_ended() => return GameEnd::Exited,
        }
        self.broadcast(&Message::StartGame);

        let end = tokio::select! {
            end = self.play() => end,
            _ = self.wait_ended() => GameEnd::Exited,
        };
        if end == GameEnd::Exited {
            self.end().await;
        }
        end
    }

    async fn play(&self) -> GameEnd {
        let mut chess = ChessGame::new();
        loop {
            let mover = chess.current_player();
            let player = self.player(mover);

            let mut next_move = player.once(Opcode::BasicMove);
            if player.send(&Message::YourMove).is_err() {
                return GameEnd::Exited;
            }
            let Some(message) = next_move.recv().await else {
                return GameEnd::Exited;
            };
            let Message::BasicMove { x, y, x1, y1 } = message else {
                continue;
            };

            let (from, to) = (Position::from_wire(x, y), Position::from_wire(x1, y1));
            let outcome = chess.make_move(from, to);
            if outcome == MoveOutcome::IllegalMove {
                warn!(code = %self.code, colour = %mover, %from, %to, "illegal move ignored");
                continue;
            }

            if let Err(err) = self.player(!mover).send(&message) {
                debug!(code = %self.code, %err, "could not forward move");
            }
            if outcome.is_terminal() {
                info!(code = %self.code, %outcome, "game over");
                return GameEnd::Finished(outcome);
            }
        }
    }

    fn relay_chat(self: &Arc<Self>, colour: Colour) {
        let mut chat = self.player(colour).listen_for(Opcode::Chat);
        let game = Arc::clone(self);
        tokio::spawn(async move {
            while let Some(message) = chat.recv().await {
                let Message::Chat { message, .. } = message else {
                    continue;
                };
                if let Some(line) = sanitize(&message) {
                    info!(code = %game.code, author = %colour, message = %line, "chat");
                    game.broadcast(&Message::chat(colour.to_string(), line));
                }
            }
        });
    }

    fn watch_exit(self: &Arc<Self>, colour: Colour) {
        let mut exit = self.player(colour).once(Opcode::Exit);
        let game = Arc::clone(self);
        tokio::spawn(async move {
            exit.recv().await;
            if !game.is_ended() {
                info!(code = %game.code, %colour, "player exited early");
            }
            game.end().await;
        });
    }

    async fn wait_ended(&self) {
        let mut ended = self.ended.subscribe();
        let _ = ended.wait_for(|ended| *ended).await;
    }

    /// Tears the game down: `Exit` to both players, removal from the
    /// matchmaker, grace delay, then both transports are closed. Only the
    /// first call does anything.
    pub async fn end(&self) {
        let first = self.ended.send_if_modified(|ended| !std::mem::replace(ended, true));
        if !first {
            return;
        }

        self.broadcast(&Message::Exit);
        if let Some(matchmaker) = self.matchmaker.upgrade() {
            matchmaker.end_game(&self.code);
        }
        sleep(self.config.exit_grace).await;
        self.white.disconnect();
        self.black.disconnect();
        debug!(code = %self.code, "game closed");
    }
}
