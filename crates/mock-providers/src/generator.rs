//! Scripted and failing generators.

use std::collections::VecDeque;
use std::sync::Mutex;

use relay_core::{async_trait, GenerationOptions, ProviderError, TextGenerator};

/// Default reply once the script runs out.
const DEFAULT_REPLY: &str = "OK";

/// A generator that replays queued results in order.
///
/// Every call is recorded (prompt and options) so tests can assert on what
/// was sent. Once the queue is empty, calls return the fallback reply.
#[derive(Debug)]
pub struct ScriptedGenerator {
    script: Mutex<VecDeque<Result<String, ProviderError>>>,
    fallback: String,
    calls: Mutex<Vec<(String, GenerationOptions)>>,
}

impl Default for ScriptedGenerator {
    fn default() -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            fallback: DEFAULT_REPLY.to_string(),
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl ScriptedGenerator {
    /// Create an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful reply.
    pub fn then_reply(self, text: impl Into<String>) -> Self {
        self.push(Ok(text.into()));
        self
    }

    /// Queue a failure.
    pub fn then_fail(self, error: ProviderError) -> Self {
        self.push(Err(error));
        self
    }

    /// Set the reply used once the script is exhausted.
    pub fn with_fallback(mut self, text: impl Into<String>) -> Self {
        self.fallback = text.into();
        self
    }

    fn push(&self, result: Result<String, ProviderError>) {
        if let Ok(mut script) = self.script.lock() {
            script.push_back(result);
        }
    }

    /// Number of generate calls made so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|calls| calls.len()).unwrap_or(0)
    }

    /// Prompts received, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.calls
            .lock()
            .map(|calls| calls.iter().map(|(prompt, _)| prompt.clone()).collect())
            .unwrap_or_default()
    }

    /// Options received, in call order.
    pub fn options(&self) -> Vec<GenerationOptions> {
        self.calls
            .lock()
            .map(|calls| calls.iter().map(|(_, options)| options.clone()).collect())
            .unwrap_or_default()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<String, ProviderError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((prompt.to_string(), options.clone()));
        }

        let next = self.script.lock().ok().and_then(|mut script| script.pop_front());
        next.unwrap_or_else(|| Ok(self.fallback.clone()))
    }

    fn name(&self) -> &str {
        "ScriptedGenerator"
    }
}

/// A generator that always fails.
#[derive(Debug, Clone)]
pub struct FailingGenerator {
    error: ProviderError,
}

impl FailingGenerator {
    /// Fail every call with the given error.
    pub fn new(error: ProviderError) -> Self {
        Self { error }
    }

    /// Fail every call as a timeout.
    pub fn timing_out() -> Self {
        Self::new(ProviderError::timeout("mock"))
    }
}

impl Default for FailingGenerator {
    fn default() -> Self {
        Self::new(ProviderError::failed("mock", "scripted failure"))
    }
}

#[async_trait]
impl TextGenerator for FailingGenerator {
    async fn generate(
        &self,
        _prompt: &str,
        _options: &GenerationOptions,
    ) -> Result<String, ProviderError> {
        Err(self.error.clone())
    }

    fn name(&self) -> &str {
        "FailingGenerator"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_script_order_and_fallback() {
        let generator = ScriptedGenerator::new()
            .then_reply("first")
            .then_fail(ProviderError::failed("mock", "nope"))
            .with_fallback("later");
        let options = GenerationOptions::conversational();

        assert_eq!(generator.generate("a", &options).await.unwrap(), "first");
        assert!(generator.generate("b", &options).await.is_err());
        assert_eq!(generator.generate("c", &options).await.unwrap(), "later");

        assert_eq!(generator.call_count(), 3);
        assert_eq!(generator.prompts(), vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_records_options() {
        let generator = ScriptedGenerator::new();
        generator
            .generate("x", &GenerationOptions::extraction())
            .await
            .unwrap();

        assert_eq!(generator.options(), vec![GenerationOptions::extraction()]);
    }

    #[tokio::test]
    async fn test_failing_generator() {
        let generator = FailingGenerator::timing_out();
        let err = generator
            .generate("x", &GenerationOptions::default())
            .await
            .unwrap_err();
        assert!(err.is_timeout());
        assert_eq!(generator.name(), "FailingGenerator");
    }
}
