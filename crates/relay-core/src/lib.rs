//! Core traits and types for the Waypoint travel relay.
//!
//! This crate provides the shared interface between the relay's decision
//! logic and the external services it talks to. It defines:
//!
//! - [`TextGenerator`] - The trait that generation providers implement
//! - [`MappingProvider`] - The trait that geocoding/directions providers implement
//! - [`ConversationState`] - The shared transcript and last-resolved route
//! - [`InboundMessage`] / [`OutboundReply`] - Wire-level message types
//! - [`ProviderError`] - Errors reported by either provider
//!
//! # Example
//!
//! ```rust
//! use relay_core::{async_trait, GenerationOptions, ProviderError, TextGenerator};
//!
//! struct Parrot;
//!
//! #[async_trait]
//! impl TextGenerator for Parrot {
//!     async fn generate(
//!         &self,
//!         prompt: &str,
//!         _options: &GenerationOptions,
//!     ) -> Result<String, ProviderError> {
//!         Ok(prompt.to_string())
//!     }
//!
//!     fn name(&self) -> &str {
//!         "Parrot"
//!     }
//! }
//! ```

mod conversation;
mod deadline;
mod error;
mod generation;
mod mapping;
mod message;
mod prompt;

pub use conversation::{
    ConversationState, ConversationTurn, Role, RouteSummary, DEFAULT_TRANSCRIPT_TURNS,
};
pub use deadline::with_deadline;
pub use error::ProviderError;
pub use generation::{GenerationOptions, TextGenerator};
pub use mapping::{
    Coordinates, Directions, DirectionsOptions, DirectionsRoute, GeocodeFeature,
    IsochroneRequest, MappingProvider, RouteProfile,
};
pub use message::{InboundMessage, OutboundReply};
pub use prompt::hash_prompt;

// Re-export async_trait for convenience
pub use async_trait::async_trait;
