//! Conversation state shared by every turn.
//!
//! This module provides the rolling transcript and the most recently
//! resolved route. All mutation goes through a single lock so concurrent
//! turns never observe a half-written route or lose an appended turn.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::RwLock;

/// Default number of turns included in a transcript view.
pub const DEFAULT_TRANSCRIPT_TURNS: usize = 10;

/// Who said a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    /// Label used when rendering a transcript line.
    pub fn label(&self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Assistant => "ASSISTANT",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single message in the conversation history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationTurn {
    pub role: Role,
    pub content: String,
}

impl ConversationTurn {
    /// Create a user turn.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Create an assistant turn.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

impl fmt::Display for ConversationTurn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.role, self.content)
    }
}

/// Headline facts about the last successfully resolved route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteSummary {
    pub origin: String,
    pub destination: String,
    /// Travel time, rounded to one decimal.
    pub duration_minutes: f64,
    /// Travel distance, rounded to one decimal.
    pub distance_km: f64,
}

impl RouteSummary {
    /// Compact one-line description used as a prompt hint.
    pub fn hint(&self) -> String {
        format!(
            "{} -> {}, {:.1} minutes, {:.1} km",
            self.origin, self.destination, self.duration_minutes, self.distance_km
        )
    }
}

#[derive(Debug, Default)]
struct StateInner {
    history: Vec<ConversationTurn>,
    last_route: Option<RouteSummary>,
    last_directions: Option<Arc<Value>>,
}

/// Process-wide conversation state.
///
/// Created once at startup and shared by reference with every turn handler.
/// History grows without bound; only the transcript *view* is truncated.
///
/// # Example
///
/// ```rust
/// use relay_core::{ConversationState, ConversationTurn};
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() {
///     let state = ConversationState::new();
///
///     state.append_turn(ConversationTurn::user("Hello")).await;
///     state.append_turn(ConversationTurn::assistant("Hi there!")).await;
///
///     assert_eq!(state.recent_transcript(10).await, "USER: Hello\nASSISTANT: Hi there!");
/// }
/// ```
#[derive(Debug, Default)]
pub struct ConversationState {
    inner: RwLock<StateInner>,
}

impl ConversationState {
    /// Create empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a turn to the history.
    pub async fn append_turn(&self, turn: ConversationTurn) {
        let mut inner = self.inner.write().await;
        inner.history.push(turn);
    }

    /// The last `k` turns in arrival order.
    pub async fn recent_turns(&self, k: usize) -> Vec<ConversationTurn> {
        let inner = self.inner.read().await;
        let start = inner.history.len().saturating_sub(k);
        inner.history[start..].to_vec()
    }

    /// The last `k` turns rendered as `ROLE: content` lines.
    pub async fn recent_transcript(&self, k: usize) -> String {
        self.recent_turns(k)
            .await
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Total number of stored turns.
    pub async fn turn_count(&self) -> usize {
        self.inner.read().await.history.len()
    }

    /// The most recently resolved route, if any.
    pub async fn last_route(&self) -> Option<RouteSummary> {
        self.inner.read().await.last_route.clone()
    }

    /// Whether a route has been resolved yet.
    pub async fn has_last_route(&self) -> bool {
        self.inner.read().await.last_route.is_some()
    }

    /// Replace the last route and its raw directions payload together.
    pub async fn set_last_route(&self, summary: RouteSummary, directions: Value) {
        let mut inner = self.inner.write().await;
        inner.last_route = Some(summary);
        inner.last_directions = Some(Arc::new(directions));
    }

    /// Snapshot of the raw directions payload for the last route.
    pub async fn last_directions(&self) -> Option<Arc<Value>> {
        self.inner.read().await.last_directions.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn summary(origin: &str, destination: &str) -> RouteSummary {
        RouteSummary {
            origin: origin.to_string(),
            destination: destination.to_string(),
            duration_minutes: 90.0,
            distance_km: 120.5,
        }
    }

    #[tokio::test]
    async fn test_transcript_format() {
        let state = ConversationState::new();

        state.append_turn(ConversationTurn::user("Hello")).await;
        state.append_turn(ConversationTurn::assistant("Hi there!")).await;

        let transcript = state.recent_transcript(10).await;
        assert_eq!(transcript, "USER: Hello\nASSISTANT: Hi there!");
    }

    #[tokio::test]
    async fn test_transcript_view_truncates_oldest_only() {
        let state = ConversationState::new();
        for i in 0..15 {
            state.append_turn(ConversationTurn::user(format!("msg {}", i))).await;
        }

        let turns = state.recent_turns(10).await;
        assert_eq!(turns.len(), 10);
        assert_eq!(turns[0].content, "msg 5");
        assert_eq!(turns[9].content, "msg 14");

        // Stored history is untouched
        assert_eq!(state.turn_count().await, 15);
        assert_eq!(state.recent_turns(100).await.len(), 15);
    }

    #[tokio::test]
    async fn test_empty_transcript() {
        let state = ConversationState::new();
        assert!(state.recent_turns(10).await.is_empty());
        assert_eq!(state.recent_transcript(10).await, "");
        assert!(state.recent_turns(0).await.is_empty());
    }

    #[tokio::test]
    async fn test_last_route_is_replaced_not_merged() {
        let state = ConversationState::new();
        assert!(!state.has_last_route().await);
        assert!(state.last_directions().await.is_none());

        state
            .set_last_route(summary("Paris", "Berlin"), json!({"routes": [1]}))
            .await;
        state
            .set_last_route(summary("Rome", "Milan"), json!({"routes": [2]}))
            .await;

        assert_eq!(state.last_route().await, Some(summary("Rome", "Milan")));
        let raw = state.last_directions().await.unwrap();
        assert_eq!(*raw, json!({"routes": [2]}));
    }

    #[tokio::test]
    async fn test_concurrent_appends_are_not_lost() {
        let state = Arc::new(ConversationState::new());

        let mut handles = Vec::new();
        for i in 0..50 {
            let state = state.clone();
            handles.push(tokio::spawn(async move {
                state.append_turn(ConversationTurn::user(format!("{}", i))).await;
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(state.turn_count().await, 50);
    }

    #[test]
    fn test_route_hint() {
        assert_eq!(
            summary("Paris", "Berlin").hint(),
            "Paris -> Berlin, 90.0 minutes, 120.5 km"
        );
    }
}
