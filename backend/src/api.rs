//! HTTP surface
//!
//! | Route | Response |
//! |---|---|
//! | `GET /new-game` | creates a pending game, `303` to `/game/{code}` |
//! | `GET /game/{code}` | `{"code", "invited"}` or `404` |
//! | `GET /ws/{code}` | WebSocket upgrade carrying binary protocol frames, or `404` |

use crate::config::SessionConfig;
use crate::connection::serve_connection;
use crate::matchmaker::{Matchmaker, PendingGame};
use axum::{
    extract::{
        ws::{rejection::WebSocketUpgradeRejection, Message as WsMessage, WebSocket, WebSocketUpgrade},
        Json, Path, State,
    },
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use futures::{future, SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;

#[derive(Clone)]
pub struct AppState {
    pub matchmaker: Arc<Matchmaker>,
    pub session_config: SessionConfig,
}

impl AppState {
    pub fn new(matchmaker: Arc<Matchmaker>, session_config: SessionConfig) -> Self {
        AppState {
            matchmaker,
            session_config,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameInfo {
    pub code: String,
    /// A host is already waiting, so the visitor joins as guest
    pub invited: bool,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/new-game", get(new_game))
        .route("/game/{code}", get(game_info))
        .route("/ws/{code}", get(game_socket))
        .with_state(state)
}

async fn new_game(State(state): State<AppState>) -> Result<Redirect, StatusCode> {
    let code = state.matchmaker.create_pending_game().map_err(|err| {
        warn!(%err, "could not create game");
        StatusCode::SERVICE_UNAVAILABLE
    })?;
    Ok(Redirect::to(&format!("/game/{code}")))
}

async fn game_info(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<GameInfo>, StatusCode> {
    let pending = state.matchmaker.pending(&code).ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(GameInfo {
        invited: !pending.is_pending(),
        code,
    }))
}

async fn game_socket(
    State(state): State<AppState>,
    Path(code): Path<String>,
    upgrade: Result<WebSocketUpgrade, WebSocketUpgradeRejection>,
) -> Response {
    let Some(pending) = state.matchmaker.pending(&code) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    match upgrade {
        Ok(upgrade) => upgrade.on_upgrade(move |socket| handle_socket(state, pending, socket)),
        Err(rejection) => rejection.into_response(),
    }
}

/// Adapts the socket to whole binary frames. Text and control frames are
/// ignored; a close frame ends the stream.
async fn handle_socket(state: AppState, pending: Arc<PendingGame>, socket: WebSocket) {
    let (sink, stream) = socket.split();
    let sink = sink.with(|frame: Vec<u8>| async move {
        Ok::<_, axum::Error>(WsMessage::Binary(frame.into()))
    });
    let stream = stream
        .take_while(|message| future::ready(!matches!(message, Ok(WsMessage::Close(_)))))
        .filter_map(|message| {
            future::ready(match message {
                Ok(WsMessage::Binary(bytes)) => Some(Ok(bytes.to_vec())),
                Ok(_) => None,
                Err(err) => Some(Err(err)),
            })
        });
    serve_connection(
        state.matchmaker,
        pending,
        sink,
        stream,
        state.session_config,
    )
    .await;
}
