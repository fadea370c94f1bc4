//! Mock providers for testing the Waypoint relay without network access.
//!
//! This crate provides in-memory implementations of the relay's capability
//! traits:
//! - `ScriptedGenerator` - Replays queued generation results and records prompts
//! - `FailingGenerator` - Always fails with a given error
//! - `DelayedGenerator` - Wraps another generator with artificial delay
//! - `StaticMapping` - Answers geocoding/directions from fixed tables
//!
//! # Example
//!
//! ```rust
//! use mock_providers::{GenerationOptions, ScriptedGenerator, TextGenerator};
//!
//! #[tokio::main]
//! async fn main() {
//!     let generator = ScriptedGenerator::new().then_reply("Bonjour!");
//!
//!     let text = generator
//!         .generate("Say hello", &GenerationOptions::conversational())
//!         .await
//!         .unwrap();
//!     assert_eq!(text, "Bonjour!");
//!     assert_eq!(generator.prompts()[0], "Say hello");
//! }
//! ```

mod delayed;
mod generator;
mod mapping;

// Re-export relay-core types for convenience
pub use relay_core::{
    async_trait, Coordinates, Directions, DirectionsOptions, GenerationOptions, MappingProvider,
    ProviderError, RouteProfile, TextGenerator,
};

pub use delayed::DelayedGenerator;
pub use generator::{FailingGenerator, ScriptedGenerator};
pub use mapping::{MappingCalls, StaticMapping};
