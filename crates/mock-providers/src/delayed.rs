//! Delayed generator - wraps another generator with artificial delay.

use std::time::Duration;

use relay_core::{async_trait, GenerationOptions, ProviderError, TextGenerator};
use tokio::time::sleep;

/// A generator that wraps another generator and adds artificial delay.
///
/// Useful for testing timeout handling and simulating provider latency.
pub struct DelayedGenerator<G: TextGenerator> {
    inner: G,
    delay: Duration,
}

impl<G: TextGenerator> DelayedGenerator<G> {
    /// Create a new DelayedGenerator wrapping the given generator.
    pub fn new(inner: G, delay: Duration) -> Self {
        Self { inner, delay }
    }

    /// Create a generator with a delay in milliseconds.
    pub fn with_millis(inner: G, millis: u64) -> Self {
        Self::new(inner, Duration::from_millis(millis))
    }

    /// Get the wrapped generator.
    pub fn inner(&self) -> &G {
        &self.inner
    }
}

#[async_trait]
impl<G: TextGenerator> TextGenerator for DelayedGenerator<G> {
    async fn generate(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<String, ProviderError> {
        sleep(self.delay).await;
        self.inner.generate(prompt, options).await
    }

    fn name(&self) -> &str {
        "DelayedGenerator"
    }
}
