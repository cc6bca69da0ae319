//! Shared test harness.
//!
//! Builds the application router with the same middleware stack as
//! `main.rs`, against a seeded project directory and an unroutable
//! Tator endpoint: requests that would reach the network fail fast, so
//! these tests exercise exactly the paths that decide before the first
//! upstream call.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use mantis_api::config::ServerConfig;
use mantis_api::jobs::JobRegistry;
use mantis_api::routes;
use mantis_api::state::AppState;
use mantis_db::DbParams;
use mantis_tator::models::Project;
use mantis_tator::{ProjectDirectory, TatorClient};

/// Unroutable endpoint: connections are refused immediately.
const DEAD_TATOR: &str = "http://127.0.0.1:9";

/// Projects seeded into the test directory.
pub fn seeded_projects() -> Vec<Project> {
    vec![
        Project {
            id: 4,
            name: "901902-uavs".to_string(),
        },
        Project {
            id: 7,
            name: "i2map".to_string(),
        },
    ]
}

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        tator_host: DEAD_TATOR.to_string(),
        tator_token: "test-token".to_string(),
        default_project: "901902-uavs".to_string(),
        db: DbParams {
            name: "tator_online".to_string(),
            user: "django".to_string(),
            password: String::new(),
            host: "127.0.0.1".to_string(),
            port: 9,
        },
    }
}

/// Build the full application router with all middleware layers, given
/// the project directory contents.
///
/// This mirrors the router construction in `main.rs` so integration
/// tests exercise the same middleware stack (CORS, request ID, timeout,
/// panic recovery) that production uses.
pub fn build_test_app(projects: Vec<Project>) -> Router {
    let config = test_config();
    let pool = mantis_db::create_pool(&config.db);

    let state = AppState {
        config: Arc::new(config),
        tator: Arc::new(TatorClient::new(DEAD_TATOR, "test-token")),
        directory: Arc::new(ProjectDirectory::new(projects)),
        pool,
        jobs: JobRegistry::new(),
    };

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:5173".parse().unwrap()])
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::app_router())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

/// Issue a GET request.
pub async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

/// Issue a request with a JSON body.
#[allow(dead_code)]
pub async fn request_json(
    app: Router,
    method: Method,
    uri: &str,
    body: serde_json::Value,
) -> Response {
    app.oneshot(
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Collect the response body as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
