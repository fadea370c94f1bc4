//! Message types exchanged with the transport.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// A chat message received from a client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InboundMessage {
    pub text: String,
}

impl InboundMessage {
    /// Create an inbound message.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// A reply sent back to the client.
///
/// Serializes directly as the outbound wire frame:
/// `{"type":"assistant","message":"...","timestamp":"..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundReply {
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
    /// ISO-8601 / RFC 3339 UTC timestamp.
    pub timestamp: String,
}

impl OutboundReply {
    /// Create an assistant reply stamped with the current time.
    pub fn assistant(message: impl Into<String>) -> Self {
        Self {
            kind: "assistant".to_string(),
            message: message.into(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}
