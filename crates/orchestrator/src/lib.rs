//! Turn orchestrator for the Waypoint travel relay.
//!
//! This crate provides the [`Orchestrator`] type which decides, for each
//! inbound chat message, whether to resolve a route, answer from the last
//! resolved route, or ask the generation provider.
//!
//! # Features
//!
//! - Classifies messages with a declarative keyword/phrase table
//! - Extracts route endpoints with the model, falling back to a lexical split
//! - Geocodes both endpoints concurrently and fetches directions
//! - Answers duration follow-ups from the cached route without external calls
//! - Feeds the recent transcript and last route into general prompts
//! - Bounds every external call and turns every failure into reply text
//!
//! # Architecture
//!
//! ```text
//! InboundMessage (from the WebSocket transport)
//!          ↓
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      ORCHESTRATOR                           │
//! │                                                             │
//! │  1. Append USER turn to ConversationState                   │
//! │         ↓                                                   │
//! │  2. Classify intent (keywords, hasLastRoute)                │
//! │         ↓                                                   │
//! │  3. Dispatch:                                               │
//! │     • ROUTE_REQUEST → extract → geocode ×2 → directions     │
//! │       (success overwrites lastRoute + raw directions)       │
//! │     • DURATION_FOLLOWUP → template from lastRoute           │
//! │     • GENERAL → preamble + transcript + hint → generator    │
//! │         ↓                                                   │
//! │  4. Append ASSISTANT turn                                   │
//! │         ↓                                                   │
//! │  5. Return OutboundReply                                    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use orchestrator::{ConversationState, InboundMessage, Orchestrator};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let state = Arc::new(ConversationState::new());
//!     let orchestrator = Orchestrator::from_env(state)?;
//!
//!     let reply = orchestrator
//!         .handle_turn(InboundMessage::new("I want to travel from Paris to Berlin"))
//!         .await;
//!
//!     println!("{}", reply.message);
//!     Ok(())
//! }
//! ```

mod error;
mod formatting;
mod intent;
mod orchestrator;
mod prompt;
mod resolver;

pub use error::{OrchestratorError, ResolutionError, RouteSide};
pub use formatting::{format_duration_reply, format_route_reply, summarize};
pub use intent::{Intent, IntentRules, DEFAULT_TRAVEL_KEYWORDS, DURATION_PHRASES};
pub use orchestrator::{Orchestrator, OrchestratorConfig};
pub use prompt::{
    build_general_prompt, load_system_prompt, DEFAULT_PROMPT_FILE, DEFAULT_SYSTEM_PROMPT,
    FALLBACK_REPLY,
};
pub use resolver::{lexical_split, Endpoints, ResolvedRoute, RouteResolver, DEFAULT_CALL_TIMEOUT};

// Re-export relay-core types for convenience
pub use relay_core::{
    ConversationState, ConversationTurn, InboundMessage, MappingProvider, OutboundReply,
    RouteSummary, TextGenerator,
};
