//! Shared helpers for API integration tests.
//!
//! Tests run without a database: the pipeline's state is in-memory, so
//! the full router is exercised with `pool: None` and paused Tokio
//! time. Generation runs use the real latency constants; tests advance
//! the clock past them instead of waiting.

#![allow(dead_code)]

use std::sync::{Arc, RwLock};

use axum::body::Body;
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use tower::ServiceExt;

use fabula_api::config::ServerConfig;
use fabula_api::engine::{GenerationDelays, GenerationEngine};
use fabula_api::router::build_app_router;
use fabula_api::state::AppState;
use fabula_core::navigation::Navigator;
use fabula_core::settings::ProviderSettings;
use fabula_core::store::ProjectStore;
use fabula_core::timeline::Transport;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev
/// default) and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
    }
}

/// Build the full application router with all middleware layers and an
/// empty project store.
///
/// This mirrors the router construction in `main.rs` so integration
/// tests exercise the same middleware stack (CORS, request ID, timeout,
/// tracing, panic recovery) that production uses.
pub fn build_test_app() -> Router {
    build_app(false)
}

/// Same as [`build_test_app`] but with the sample projects seeded.
pub fn build_seeded_test_app() -> Router {
    build_app(true)
}

fn build_app(seed: bool) -> Router {
    let config = test_config();
    let store = Arc::new(ProjectStore::new());
    if seed {
        fabula_core::seed::sample_projects(&store);
    }
    let event_bus = Arc::new(fabula_events::EventBus::default());
    let engine = Arc::new(GenerationEngine::new(
        Arc::clone(&store),
        Arc::clone(&event_bus),
        GenerationDelays::default(),
    ));

    let state = AppState {
        store,
        engine,
        navigator: Arc::new(RwLock::new(Navigator::new())),
        transport: Arc::new(RwLock::new(Transport::new())),
        settings: Arc::new(RwLock::new(ProviderSettings::default())),
        pool: None,
        config: Arc::new(config.clone()),
        event_bus,
    };

    build_app_router(state, &config)
}

/// Let in-flight generation runs finish by advancing paused time past
/// the longest mock latency.
pub async fn settle() {
    tokio::time::sleep(std::time::Duration::from_millis(3_100)).await;
}

/// Issue a GET request against the app.
pub async fn get(app: Router, path: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .uri(path)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Issue a request with a JSON body against the app.
pub async fn send_json(
    app: Router,
    method: Method,
    path: &str,
    body: serde_json::Value,
) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method(method)
            .uri(path)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Issue a POST request with an empty JSON object body.
pub async fn post_empty(app: Router, path: &str) -> Response<Body> {
    send_json(app, Method::POST, path, serde_json::json!({})).await
}

/// Read a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Assert a response status and return its JSON body.
pub async fn expect_json(response: Response<Body>, status: StatusCode) -> serde_json::Value {
    assert_eq!(response.status(), status);
    body_json(response).await
}
