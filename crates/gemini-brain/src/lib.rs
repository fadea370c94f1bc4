//! Google Gemini text generation client.
//!
//! This crate provides a [`TextGenerator`] implementation backed by the
//! Gemini `generateContent` REST endpoint.
//!
//! # Features
//!
//! - Uses `gemini-2.5-flash` by default
//! - Per-call temperature and output token limits
//! - Optional JSON response mode for structured extraction
//! - Bounded request timeout (30 seconds by default)
//! - Configurable via environment variables
//!
//! # Usage
//!
//! ```rust,no_run
//! use gemini_brain::{GeminiBrain, GenerationOptions, TextGenerator};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let brain = GeminiBrain::from_env()?;
//!     let text = brain
//!         .generate("Say hello in French.", &GenerationOptions::conversational())
//!         .await?;
//!     println!("{}", text);
//!     Ok(())
//! }
//! ```

mod api_types;
mod brain;
mod config;

pub use brain::GeminiBrain;
pub use config::{GeminiBrainConfig, GeminiBrainConfigBuilder};

// Re-export relay-core types for convenience
pub use relay_core::{async_trait, GenerationOptions, ProviderError, TextGenerator};
