//! Readiness and health endpoints.

use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct Status {
    pub message: String,
}

#[derive(Serialize)]
pub struct Health {
    pub status: String,
}

/// Static readiness payload.
pub async fn root() -> Json<Status> {
    Json(Status {
        message: "Waypoint relay ready".to_string(),
    })
}

/// Health check endpoint.
pub async fn health() -> Json<Health> {
    Json(Health {
        status: "ok".to_string(),
    })
}
