use anyhow::Context;
use backend::api::{self, AppState};
use backend::config::ServerConfig;
use backend::matchmaker::Matchmaker;
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    dotenv::dotenv().ok();

    let config = ServerConfig::from_env().context("Invalid server configuration")?;

    let matchmaker = Matchmaker::new(config.matchmaker.clone(), config.game.clone());
    let _sweeper = matchmaker.spawn_sweeper();

    let app = api::router(AppState::new(matchmaker, config.session.clone()));
    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;
    info!(addr = %config.bind_addr, "chess server listening");

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
