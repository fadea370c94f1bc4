//! Route handlers for the relay server.

pub mod isochrone;
pub mod last_route;
pub mod status;

use axum::routing::get;
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::config::Config;
use crate::state::AppState;
use crate::ws;

/// Build the router with all routes and CORS applied.
pub fn router(state: AppState, config: &Config) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(config.cors_origins.iter().cloned()))
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(status::root))
        .route("/health", get(status::health))
        .route("/last-route", get(last_route::last_route))
        .route("/isochrone", get(isochrone::isochrone))
        // Chat
        .route("/ws/chat", get(ws::chat_ws_handler))
        .layer(cors)
        .with_state(state)
}
