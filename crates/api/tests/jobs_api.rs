//! Integration tests for the deferred-job status endpoint.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, get, seeded_projects};

#[tokio::test]
async fn unknown_job_returns_404() {
    let app = build_test_app(seeded_projects());
    let response = get(
        app,
        "/jobs/00000000-0000-0000-0000-000000000000",
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert!(json["message"]
        .as_str()
        .unwrap()
        .contains("not found"));
}

#[tokio::test]
async fn malformed_job_id_is_rejected() {
    let app = build_test_app(seeded_projects());
    let response = get(app, "/jobs/not-a-uuid").await;

    // Path deserialization failure is handled by the framework.
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
