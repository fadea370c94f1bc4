//! Console chat example.
//!
//! Drives the orchestrator from stdin so routing and generation can be tried
//! without the WebSocket server.
//!
//! Run with: cargo run -p orchestrator --example console_chat
//!
//! Configuration via .env file or environment variables:
//!   GOOGLE_API_KEY        - API key for Gemini (required)
//!   MAPBOX_ACCESS_TOKEN   - Mapbox token (needed for route requests)

use std::sync::Arc;

use orchestrator::{ConversationState, InboundMessage, Orchestrator};
use tokio::io::{AsyncBufReadExt, BufReader};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("orchestrator=debug".parse()?)
                .add_directive("gemini_brain=info".parse()?)
                .add_directive("mapbox_tools=info".parse()?),
        )
        .init();

    let state = Arc::new(ConversationState::new());
    let orchestrator = Arc::new(Orchestrator::from_env(state)?);

    println!("Waypoint console. Try:");
    println!("  - \"I want to travel from Paris to Berlin\"");
    println!("  - \"how long will it take?\"");
    println!("  - \"what should I pack?\"");
    println!("Ctrl+D to quit.\n");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let reply = orchestrator
            .clone()
            .spawn_turn(InboundMessage::new(line))
            .await;
        println!("{}\n", reply.message);
    }

    Ok(())
}
