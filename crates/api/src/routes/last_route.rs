//! Raw directions payload of the last resolved route.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::state::AppState;

/// `200` with the cached directions payload, or `204` when no route exists yet.
pub async fn last_route(State(state): State<AppState>) -> Response {
    match state.conversation().last_directions().await {
        Some(payload) => Json(payload.as_ref().clone()).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}
