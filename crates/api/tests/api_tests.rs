//! Integration tests for the relay HTTP surface.
//!
//! Each test builds its own router over in-memory providers.

use std::sync::Arc;

use api::{router, AppState, Config};
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use mock_providers::{Coordinates, ProviderError, ScriptedGenerator, StaticMapping};
use orchestrator::{ConversationState, InboundMessage, Orchestrator};
use serde_json::Value;
use tower::ServiceExt;

// =============================================================================
// Helpers
// =============================================================================

fn europe() -> StaticMapping {
    StaticMapping::new()
        .with_place("Paris", Coordinates::new(2.3522, 48.8566))
        .with_place("Berlin", Coordinates::new(13.405, 52.52))
        .with_route(12_600.0, 1_050_000.0)
}

fn make_state(mapping: StaticMapping) -> AppState {
    let orchestrator = Orchestrator::new(
        Arc::new(ScriptedGenerator::new()),
        Arc::new(mapping),
        Arc::new(ConversationState::new()),
    );
    AppState::new(orchestrator)
}

fn make_app(state: AppState) -> Router {
    router(state, &Config::default())
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

// =============================================================================
// Status
// =============================================================================

#[tokio::test]
async fn test_root_ready() {
    let response = make_app(make_state(europe())).oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["message"], "Waypoint relay ready");
}

#[tokio::test]
async fn test_health() {
    let response = make_app(make_state(europe()))
        .oneshot(get("/health"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "ok");
}

// =============================================================================
// Last route
// =============================================================================

#[tokio::test]
async fn test_last_route_empty_is_no_content() {
    let response = make_app(make_state(europe()))
        .oneshot(get("/last-route"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert!(bytes.is_empty());
}

#[tokio::test]
async fn test_last_route_after_resolution() {
    let state = make_state(europe());
    state
        .orchestrator
        .handle_turn(InboundMessage::new("I want to travel from Paris to Berlin"))
        .await;

    let response = make_app(state).oneshot(get("/last-route")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["code"], "Ok");
    assert_eq!(body["routes"][0]["duration"], 12_600.0);
    assert_eq!(body["routes"][0]["distance"], 1_050_000.0);
}

#[tokio::test]
async fn test_last_route_unchanged_by_failed_resolution() {
    let state = make_state(europe());
    state
        .orchestrator
        .handle_turn(InboundMessage::new("travel from Paris to Atlantis"))
        .await;

    let response = make_app(state).oneshot(get("/last-route")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

// =============================================================================
// Isochrone
// =============================================================================

#[tokio::test]
async fn test_isochrone_pass_through() {
    let response = make_app(make_state(europe()))
        .oneshot(get(
            "/isochrone?longitude=13.405&latitude=52.52&minutes=10,20&profile=walking",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["type"], "FeatureCollection");
    assert_eq!(body["features"].as_array().unwrap().len(), 2);
    assert_eq!(body["features"][0]["properties"]["profile"], "walking");
}

#[tokio::test]
async fn test_isochrone_does_not_touch_conversation() {
    let state = make_state(europe());
    let conversation = state.conversation().clone();

    make_app(state)
        .oneshot(get("/isochrone?longitude=13.405&latitude=52.52&minutes=10"))
        .await
        .unwrap();

    assert_eq!(conversation.turn_count().await, 0);
    assert!(conversation.last_route().await.is_none());
}

#[tokio::test]
async fn test_isochrone_bad_input() {
    for uri in [
        "/isochrone?longitude=13.405&latitude=52.52&minutes=0",
        "/isochrone?longitude=13.405&latitude=52.52&minutes=10&profile=teleport",
        "/isochrone?longitude=200&latitude=52.52&minutes=10",
        "/isochrone?latitude=52.52&minutes=10",
    ] {
        let response = make_app(make_state(europe())).oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", uri);
    }
}

#[tokio::test]
async fn test_isochrone_provider_failure_is_bad_gateway() {
    let mapping = europe().failing_with(ProviderError::failed("mapbox", "HTTP 503"));
    let response = make_app(make_state(mapping))
        .oneshot(get("/isochrone?longitude=13.405&latitude=52.52&minutes=10"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("HTTP 503"));
}

// =============================================================================
// CORS
// =============================================================================

#[tokio::test]
async fn test_cors_allows_configured_origin() {
    let request = Request::get("/health")
        .header("origin", "http://localhost:3001")
        .body(Body::empty())
        .unwrap();
    let response = make_app(make_state(europe())).oneshot(request).await.unwrap();

    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap(),
        "http://localhost:3001"
    );
}

#[tokio::test]
async fn test_cors_ignores_unknown_origin() {
    let request = Request::get("/health")
        .header("origin", "https://evil.example.com")
        .body(Body::empty())
        .unwrap();
    let response = make_app(make_state(europe())).oneshot(request).await.unwrap();

    assert!(response.headers().get("access-control-allow-origin").is_none());
}

// =============================================================================
// Chat
// =============================================================================

#[tokio::test]
async fn test_ws_route_requires_upgrade() {
    let response = make_app(make_state(europe()))
        .oneshot(get("/ws/chat"))
        .await
        .unwrap();
    assert!(response.status().is_client_error());
}
