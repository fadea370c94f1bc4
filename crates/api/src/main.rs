//! Waypoint relay server binary.

use std::sync::Arc;

use api::{router, AppState, Config};
use orchestrator::{ConversationState, Orchestrator};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;

    let conversation = Arc::new(ConversationState::new());
    let orchestrator = Orchestrator::from_env(conversation)?;
    let state = AppState::new(orchestrator);

    let app = router(state, &config);

    info!(addr = %config.addr, "Waypoint relay listening");
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
