//! GeminiBrain implementation using the Gemini REST API.

use relay_core::{async_trait, GenerationOptions, ProviderError, TextGenerator};
use reqwest::Client;
use tracing::{debug, info, warn};

use crate::api_types::{
    ApiError, Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
};
use crate::config::{GeminiBrainConfig, PROVIDER};

/// A text generator backed by Google's Gemini API.
///
/// GeminiBrain is stateless: every call sends exactly one prompt, and any
/// conversation context must already be embedded in it.
pub struct GeminiBrain {
    client: Client,
    config: GeminiBrainConfig,
}

impl GeminiBrain {
    /// Create a new GeminiBrain with the given configuration.
    pub fn new(config: GeminiBrainConfig) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                ProviderError::configuration(PROVIDER, format!("Failed to create HTTP client: {}", e))
            })?;

        info!(
            "GeminiBrain initialized with model: {}, timeout: {:?}",
            config.model, config.timeout
        );

        Ok(Self { client, config })
    }

    /// Create a GeminiBrain from environment variables.
    ///
    /// See [`GeminiBrainConfig::from_env`] for required environment variables.
    pub fn from_env() -> Result<Self, ProviderError> {
        let config = GeminiBrainConfig::from_env()?;
        Self::new(config)
    }

    /// Get the configuration.
    pub fn config(&self) -> &GeminiBrainConfig {
        &self.config
    }

    /// Build the request body for a prompt.
    fn build_request(prompt: &str, options: &GenerationOptions) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content::user(prompt)],
            generation_config: GenerationConfig {
                temperature: options.temperature,
                max_output_tokens: options.max_tokens,
                response_mime_type: options
                    .structured_output
                    .then(|| "application/json".to_string()),
            },
        }
    }

    /// Make a `generateContent` request.
    async fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, ProviderError> {
        let url = self.config.generate_url();

        debug!("Sending request to Gemini API: {}", url);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(request)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();

            if let Ok(api_error) = serde_json::from_str::<ApiError>(&error_text) {
                return Err(ProviderError::failed(
                    PROVIDER,
                    format!("API error ({}): {}", status.as_u16(), api_error.error.message),
                ));
            }

            return Err(ProviderError::failed(
                PROVIDER,
                format!("API error ({}): {}", status.as_u16(), error_text),
            ));
        }

        response.json().await.map_err(|e| {
            if e.is_timeout() {
                ProviderError::timeout(PROVIDER)
            } else {
                ProviderError::failed(PROVIDER, format!("Failed to parse response: {}", e))
            }
        })
    }
}

fn map_transport_error(e: reqwest::Error) -> ProviderError {
    if e.is_timeout() {
        ProviderError::timeout(PROVIDER)
    } else {
        ProviderError::failed(PROVIDER, format!("Failed to send request: {}", e))
    }
}

#[async_trait]
impl TextGenerator for GeminiBrain {
    async fn generate(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<String, ProviderError> {
        let request = Self::build_request(prompt, options);
        let completion = self.generate_content(&request).await?;

        if let Some(usage) = &completion.usage_metadata {
            debug!(
                "Token usage - prompt: {}, completion: {}, total: {}",
                usage.prompt_token_count, usage.candidates_token_count, usage.total_token_count
            );
        }

        match completion.first_text() {
            Some(text) => Ok(text),
            None => {
                let reason = completion
                    .prompt_feedback
                    .and_then(|feedback| feedback.block_reason)
                    .unwrap_or_else(|| "no candidates returned".to_string());
                warn!("Gemini returned no candidates: {}", reason);
                Err(ProviderError::failed(PROVIDER, reason))
            }
        }
    }

    fn name(&self) -> &str {
        "GeminiBrain"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brain_name() {
        let config = GeminiBrainConfig::builder().api_key("test-key").build();

        let brain = GeminiBrain::new(config).unwrap();
        assert_eq!(brain.name(), "GeminiBrain");
    }

    #[test]
    fn test_build_request_structured() {
        let request = GeminiBrain::build_request("extract", &GenerationOptions::extraction());

        assert_eq!(request.generation_config.temperature, 0.0);
        assert_eq!(
            request.generation_config.response_mime_type.as_deref(),
            Some("application/json")
        );
        assert_eq!(request.contents.len(), 1);
        assert_eq!(request.contents[0].parts[0].text.as_deref(), Some("extract"));
    }

    #[test]
    fn test_build_request_conversational() {
        let request = GeminiBrain::build_request("hello", &GenerationOptions::conversational());

        assert_eq!(request.generation_config.temperature, 0.7);
        assert_eq!(request.generation_config.max_output_tokens, 1000);
        assert!(request.generation_config.response_mime_type.is_none());
    }

    #[tokio::test]
    async fn test_unreachable_api_is_provider_error() {
        let config = GeminiBrainConfig::builder()
            .api_key("test-key")
            .api_url("http://127.0.0.1:9")
            .timeout(std::time::Duration::from_secs(2))
            .build();
        let brain = GeminiBrain::new(config).unwrap();

        let err = brain
            .generate("hello", &GenerationOptions::conversational())
            .await
            .unwrap_err();
        assert_eq!(err.provider(), "gemini");
    }

    #[tokio::test]
    #[ignore] // Requires GOOGLE_API_KEY; run with: cargo test -- --ignored
    async fn test_live_generate() {
        let _ = dotenvy::dotenv();
        let brain = GeminiBrain::from_env().unwrap();
        let text = brain
            .generate("Reply with the single word: pong", &GenerationOptions::conversational())
            .await
            .unwrap();
        assert!(!text.is_empty());
    }
}
