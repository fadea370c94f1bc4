//! Error types for Mapbox operations.

use relay_core::ProviderError;
use thiserror::Error;

/// Provider name used when converting into [`ProviderError`].
pub(crate) const PROVIDER: &str = "mapbox";

/// Errors that can occur while calling Mapbox.
#[derive(Debug, Error)]
pub enum MapboxError {
    /// No access token was configured.
    #[error("MAPBOX_ACCESS_TOKEN not set")]
    MissingToken,

    /// Invalid request input; nothing was sent.
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    /// HTTP request failed. The request URL is stripped, since it carries the token.
    #[error("HTTP error: {0}")]
    Http(reqwest::Error),

    /// Mapbox answered with a non-success status.
    #[error("Mapbox returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// JSON parsing failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<reqwest::Error> for MapboxError {
    fn from(err: reqwest::Error) -> Self {
        MapboxError::Http(err.without_url())
    }
}

impl From<MapboxError> for ProviderError {
    fn from(err: MapboxError) -> Self {
        match err {
            MapboxError::MissingToken => {
                ProviderError::configuration(PROVIDER, "MAPBOX_ACCESS_TOKEN not set")
            }
            MapboxError::Http(ref e) if e.is_timeout() => ProviderError::timeout(PROVIDER),
            other => ProviderError::failed(PROVIDER, other.to_string()),
        }
    }
}
