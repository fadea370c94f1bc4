//! Configuration for the Mapbox client.

use std::env;
use std::time::Duration;

/// Default Mapbox API URL.
pub const DEFAULT_API_URL: &str = "https://api.mapbox.com";

/// Default HTTP timeout for API requests.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Mapbox client configuration.
#[derive(Debug, Clone)]
pub struct MapboxConfig {
    /// Mapbox API URL.
    pub api_url: String,
    /// Access token. Checked on first request, not at construction.
    pub access_token: Option<String>,
    /// HTTP timeout per request.
    pub timeout: Duration,
}

impl Default for MapboxConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            access_token: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl MapboxConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `MAPBOX_ACCESS_TOKEN` | Access token | (checked lazily) |
    /// | `MAPBOX_API_URL` | API URL | `https://api.mapbox.com` |
    /// | `MAPBOX_TIMEOUT_SECS` | Request timeout | `30` |
    pub fn from_env() -> Self {
        let access_token = env::var("MAPBOX_ACCESS_TOKEN")
            .ok()
            .filter(|token| !token.trim().is_empty());

        let api_url = env::var("MAPBOX_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let timeout = env::var("MAPBOX_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS));

        Self {
            api_url,
            access_token,
            timeout,
        }
    }

    /// Set the access token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Set the API URL.
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_env_scenarios() {
        use std::sync::Mutex;
        static ENV_LOCK: Mutex<()> = Mutex::new(());
        let _guard = ENV_LOCK.lock().unwrap();

        fn clear_all_mapbox_vars() {
            std::env::remove_var("MAPBOX_ACCESS_TOKEN");
            std::env::remove_var("MAPBOX_API_URL");
            std::env::remove_var("MAPBOX_TIMEOUT_SECS");
        }

        // Missing token is not an error at load time
        clear_all_mapbox_vars();
        let config = MapboxConfig::from_env();
        assert!(config.access_token.is_none());
        assert_eq!(config.api_url, "https://api.mapbox.com");
        assert_eq!(config.timeout, Duration::from_secs(30));

        // Blank token counts as missing
        std::env::set_var("MAPBOX_ACCESS_TOKEN", "  ");
        assert!(MapboxConfig::from_env().access_token.is_none());

        clear_all_mapbox_vars();
        std::env::set_var("MAPBOX_ACCESS_TOKEN", "pk.test");
        std::env::set_var("MAPBOX_API_URL", "http://localhost:9999");
        std::env::set_var("MAPBOX_TIMEOUT_SECS", "5");
        let config = MapboxConfig::from_env();
        assert_eq!(config.access_token.as_deref(), Some("pk.test"));
        assert_eq!(config.api_url, "http://localhost:9999");
        assert_eq!(config.timeout, Duration::from_secs(5));

        clear_all_mapbox_vars();
    }
}
