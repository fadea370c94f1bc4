//! Configuration loaded from environment variables.

use std::env;
use std::net::SocketAddr;

use axum::http::HeaderValue;

/// Default bind address.
pub const DEFAULT_ADDR: &str = "0.0.0.0:8000";

/// Default browser origins allowed by CORS.
pub const DEFAULT_CORS_ORIGINS: &[&str] = &[
    "http://localhost:3000",
    "http://localhost:3001",
    "http://localhost:3002",
];

/// Relay server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address.
    pub addr: SocketAddr,
    /// Origins allowed to call the HTTP surface from a browser.
    pub cors_origins: Vec<HeaderValue>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], 8000)),
            cors_origins: DEFAULT_CORS_ORIGINS
                .iter()
                .copied()
                .map(HeaderValue::from_static)
                .collect(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `WAYPOINT_ADDR` | Server bind address | `0.0.0.0:8000` |
    /// | `WAYPOINT_CORS_ORIGINS` | Comma-separated allowed origins | `http://localhost:3000..3002` |
    ///
    /// Provider credentials are read by the provider clients themselves.
    pub fn from_env() -> Result<Self, ConfigError> {
        let addr = env::var("WAYPOINT_ADDR")
            .unwrap_or_else(|_| DEFAULT_ADDR.to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidAddr)?;

        let cors_origins = match env::var("WAYPOINT_CORS_ORIGINS") {
            Ok(list) => parse_origins(&list)?,
            Err(_) => Self::default().cors_origins,
        };

        Ok(Self { addr, cors_origins })
    }
}

fn parse_origins(list: &str) -> Result<Vec<HeaderValue>, ConfigError> {
    list.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(|origin| {
            HeaderValue::from_str(origin).map_err(|_| ConfigError::InvalidCorsOrigin(origin.to_string()))
        })
        .collect()
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid WAYPOINT_ADDR format")]
    InvalidAddr,

    #[error("Invalid origin in WAYPOINT_CORS_ORIGINS: {0}")]
    InvalidCorsOrigin(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn clear_env() {
        env::remove_var("WAYPOINT_ADDR");
        env::remove_var("WAYPOINT_CORS_ORIGINS");
    }

    #[test]
    fn test_defaults() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();

        let config = Config::from_env().unwrap();
        assert_eq!(config.addr.to_string(), DEFAULT_ADDR);
        assert_eq!(config.cors_origins.len(), 3);
        assert_eq!(config.cors_origins[0], "http://localhost:3000");
    }

    #[test]
    fn test_overrides() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();

        env::set_var("WAYPOINT_ADDR", "127.0.0.1:9000");
        env::set_var("WAYPOINT_CORS_ORIGINS", "https://app.example.com, ,http://localhost:5173");
        let config = Config::from_env().unwrap();
        assert_eq!(config.addr.port(), 9000);
        assert_eq!(config.cors_origins.len(), 2);
        assert_eq!(config.cors_origins[1], "http://localhost:5173");

        clear_env();
    }

    #[test]
    fn test_invalid_addr() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();

        env::set_var("WAYPOINT_ADDR", "not-an-address");
        assert!(matches!(Config::from_env(), Err(ConfigError::InvalidAddr)));

        clear_env();
    }
}
