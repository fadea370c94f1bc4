//! Error types for provider calls.

use thiserror::Error;

/// Errors reported by an external capability (generation or mapping).
///
/// The `provider` field names the service that failed (e.g. `"gemini"`,
/// `"mapbox"`) so that rendered errors say where the failure came from.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// The provider is missing required configuration (e.g. credentials).
    #[error("{provider} is not configured: {reason}")]
    Configuration { provider: String, reason: String },

    /// The request was sent but failed, or the response was unusable.
    #[error("{provider} request failed: {cause}")]
    Failed { provider: String, cause: String },

    /// The request did not complete within the allowed time.
    #[error("{provider} did not respond in time")]
    Timeout { provider: String },
}

impl ProviderError {
    /// Create a configuration error.
    pub fn configuration(provider: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Configuration {
            provider: provider.into(),
            reason: reason.into(),
        }
    }

    /// Create a request failure.
    pub fn failed(provider: impl Into<String>, cause: impl Into<String>) -> Self {
        Self::Failed {
            provider: provider.into(),
            cause: cause.into(),
        }
    }

    /// Create a timeout error.
    pub fn timeout(provider: impl Into<String>) -> Self {
        Self::Timeout {
            provider: provider.into(),
        }
    }

    /// Name of the provider that produced this error.
    pub fn provider(&self) -> &str {
        match self {
            Self::Configuration { provider, .. }
            | Self::Failed { provider, .. }
            | Self::Timeout { provider } => provider,
        }
    }

    /// Whether this error is a timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}
