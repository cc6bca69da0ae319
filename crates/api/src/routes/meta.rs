//! Service banner, health, and project listing.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};

use crate::response::{Message, Projects};
use crate::state::AppState;

/// GET / -- service banner.
async fn root() -> Json<Message> {
    Json(Message::new(format!(
        "mantis-api {}",
        env!("CARGO_PKG_VERSION")
    )))
}

/// GET /health -- readiness based on a non-empty project directory.
///
/// Attempts a refresh first so a recovered Tator connection brings the
/// service back without a restart; a failed refresh keeps the previous
/// snapshot.
async fn health(State(state): State<AppState>) -> Response {
    if let Err(e) = state.directory.refresh(&state.tator).await {
        tracing::warn!(error = %e, "Project directory refresh failed");
    }

    if state.directory.is_empty().await {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(Message::new("no projects available")),
        )
            .into_response();
    }

    Json(Message::new("OK")).into_response()
}

/// GET /projects -- names of all known projects.
async fn projects(State(state): State<AppState>) -> Response {
    if let Err(e) = state.directory.refresh(&state.tator).await {
        tracing::warn!(error = %e, "Project directory refresh failed");
    }

    let names = state.directory.names().await;
    if names.is_empty() {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(Message::new("no projects available")),
        )
            .into_response();
    }

    Json(Projects { projects: names }).into_response()
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/projects", get(projects))
}
