//! WebSocket chat transport.
//!
//! # Connection Flow
//! 1. Client upgrades `GET /ws/chat`
//! 2. Client sends `{"message": "..."}` text frames
//! 3. Each frame runs one orchestrator turn; the reply is sent back as
//!    `{"type":"assistant","message":"...","timestamp":"..."}`
//! 4. Malformed frames are logged and dropped; the connection stays open
//!
//! Frames on one connection are handled strictly in order. A turn that is
//! in flight when the client disconnects still completes and updates the
//! shared conversation state.

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::Response;
use futures::{SinkExt, StreamExt};
use relay_core::{InboundMessage, OutboundReply};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::state::AppState;

/// Errors decoding an inbound frame.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FrameError {
    /// The frame was not a JSON object with an optional string `message`.
    #[error("malformed inbound frame: {0}")]
    Malformed(String),
}

/// Decode an inbound text frame.
///
/// A missing or `null` `message` field is treated as an empty message.
pub fn parse_inbound_frame(text: &str) -> Result<InboundMessage, FrameError> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| FrameError::Malformed(e.to_string()))?;

    let object = value
        .as_object()
        .ok_or_else(|| FrameError::Malformed("expected a JSON object".to_string()))?;

    match object.get("message") {
        None | Some(Value::Null) => Ok(InboundMessage::default()),
        Some(Value::String(message)) => Ok(InboundMessage::new(message.as_str())),
        Some(_) => Err(FrameError::Malformed(
            "\"message\" must be a string".to_string(),
        )),
    }
}

/// Handle WebSocket upgrade for chat.
///
/// Route: `GET /ws/chat`
pub async fn chat_ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| handle_chat_socket(socket, state))
}

/// Read loop for one connection.
async fn handle_chat_socket(socket: WebSocket, state: AppState) {
    let connection_id = Uuid::new_v4();
    let (mut sender, mut receiver) = socket.split();

    info!(%connection_id, "WebSocket connection established");

    while let Some(result) = receiver.next().await {
        match result {
            Ok(Message::Text(text)) => {
                let inbound = match parse_inbound_frame(&text) {
                    Ok(inbound) => inbound,
                    Err(e) => {
                        warn!(%connection_id, "Dropping frame: {}", e);
                        continue;
                    }
                };

                debug!(%connection_id, chars = inbound.text.len(), "Received message");

                let reply = state.orchestrator.clone().spawn_turn(inbound).await;
                if send_reply(&mut sender, &reply).await.is_err() {
                    debug!(%connection_id, "Client went away before reply was sent");
                    break;
                }
            }
            Ok(Message::Close(_)) => {
                debug!(%connection_id, "Client closed connection");
                break;
            }
            Ok(Message::Ping(data)) => {
                if sender.send(Message::Pong(data)).await.is_err() {
                    break;
                }
            }
            Ok(_) => {} // Binary and pong frames are ignored
            Err(e) => {
                debug!(%connection_id, "WebSocket error: {}", e);
                break;
            }
        }
    }

    info!(%connection_id, "WebSocket connection closed");
}

/// Serialize and send a reply frame.
async fn send_reply<S>(sender: &mut S, reply: &OutboundReply) -> Result<(), ()>
where
    S: SinkExt<Message> + Unpin,
{
    let frame = match serde_json::to_string(reply) {
        Ok(frame) => frame,
        Err(e) => {
            error!("Failed to serialize reply: {}", e);
            return Ok(());
        }
    };

    sender.send(Message::Text(frame)).await.map_err(|_| ())
}
