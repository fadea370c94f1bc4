//! Text generation capability.

use async_trait::async_trait;

use crate::error::ProviderError;

/// Sampling parameters for a single generation call.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationOptions {
    /// Sampling temperature (0.0 - 2.0).
    pub temperature: f32,
    /// Maximum tokens to generate.
    pub max_tokens: u32,
    /// Ask the provider for JSON output.
    pub structured_output: bool,
}

impl GenerationOptions {
    /// Options for free-form conversational replies.
    pub fn conversational() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 1000,
            structured_output: false,
        }
    }

    /// Options for deterministic structured extraction.
    pub fn extraction() -> Self {
        Self {
            temperature: 0.0,
            max_tokens: 256,
            structured_output: true,
        }
    }
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self::conversational()
    }
}

/// A stateless text generation provider.
///
/// Implementations take a fully-built prompt and return generated text.
/// They keep no conversation history of their own; callers embed whatever
/// context they want into the prompt.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate text for the given prompt.
    async fn generate(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<String, ProviderError>;

    /// Get a human-readable name for this provider.
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_options() {
        let conversational = GenerationOptions::conversational();
        assert_eq!(conversational.temperature, 0.7);
        assert_eq!(conversational.max_tokens, 1000);
        assert!(!conversational.structured_output);

        let extraction = GenerationOptions::extraction();
        assert_eq!(extraction.temperature, 0.0);
        assert!(extraction.structured_output);

        assert_eq!(GenerationOptions::default(), conversational);
    }
}
