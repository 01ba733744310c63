//! Hands one accepted transport to the session layer and the matchmaker

use crate::config::SessionConfig;
use crate::matchmaker::{Matchmaker, PendingGame};
use crate::session::Session;
use futures::{Sink, Stream};
use std::fmt::Display;
use std::sync::Arc;
use tracing::{debug, info};

/// Runs a participant connection for `pending` until it closes
///
/// `sink` and `stream` carry whole binary frames. The session handshake runs
/// concurrently with [`PendingGame::enter`], which waits for it.
pub async fn serve_connection<S, St, E>(
    matchmaker: Arc<Matchmaker>,
    pending: Arc<PendingGame>,
    sink: S,
    stream: St,
    config: SessionConfig,
) where
    S: Sink<Vec<u8>> + Send + 'static,
    S::Error: Display,
    St: Stream<Item = Result<Vec<u8>, E>> + Send + 'static,
    E: Display + Send + 'static,
{
    let code = pending.code().to_string();
    info!(code = %code, "received connection");

    let session = Session::new(code.clone(), sink, config);
    let runner = tokio::spawn(Arc::clone(&session).run(stream));

    if let Err(err) = pending.enter(&matchmaker, Arc::clone(&session)).await {
        info!(code = %code, %err, "connection refused");
        session.disconnect();
    }

    match runner.await {
        Ok(Ok(())) => debug!(code = %code, "connection closed"),
        Ok(Err(err)) => debug!(code = %code, %err, "connection closed with error"),
        Err(err) => debug!(code = %code, %err, "session task failed"),
    }
}
