//! Waypoint relay server.
//!
//! Serves the chat WebSocket at `/ws/chat` plus a few plain HTTP endpoints:
//! - `GET /` - static readiness payload
//! - `GET /health` - health check
//! - `GET /last-route` - raw directions payload of the last resolved route (or 204)
//! - `GET /isochrone` - reachable-area pass-through to the mapping provider

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod ws;

pub use config::{Config, ConfigError};
pub use error::ApiError;
pub use routes::router;
pub use state::AppState;
pub use ws::{parse_inbound_frame, FrameError};
