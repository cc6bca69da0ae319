//! Integration tests for the validation and not-found paths of the
//! bulk-operation endpoints — everything that answers before the first
//! upstream call.

mod common;

use axum::http::{Method, StatusCode};
use common::{body_json, build_test_app, request_json, seeded_projects};
use serde_json::json;

// ---------------------------------------------------------------------------
// Test: unknown project maps to 404 with the standard message
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_project_returns_404_body() {
    let app = build_test_app(seeded_projects());
    let response = common::get(app, "/labels/does-not-exist").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(
        json["message"],
        "does-not-exist project not found. Is does-not-exist the correct project?"
    );
}

#[tokio::test]
async fn unknown_project_on_mutation_endpoint_returns_404() {
    let app = build_test_app(seeded_projects());
    let response = request_json(
        app,
        Method::POST,
        "/label/cluster/Kelp",
        json!({ "cluster_name": "C3", "project_name": "does-not-exist" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Test: invalid filter tags are reported in a 200 body
// ---------------------------------------------------------------------------

#[tokio::test]
async fn invalid_filter_type_is_embedded_in_200() {
    let app = build_test_app(seeded_projects());
    let response = request_json(
        app,
        Method::POST,
        "/media_count_by_filename",
        json!({ "filter_media": "StartsWith", "media_name": "a.jpg" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Invalid filter type StartsWith");
}

#[tokio::test]
async fn invalid_filter_type_on_delete_endpoint() {
    let app = build_test_app(seeded_projects());
    let response = request_json(
        app,
        Method::DELETE,
        "/localizations/filename",
        json!({ "filter_media": "Near", "media_name": "a.jpg" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Invalid filter type Near");
}

// ---------------------------------------------------------------------------
// Test: blank required fields are reported in a 200 body
// ---------------------------------------------------------------------------

#[tokio::test]
async fn blank_media_name_is_rejected() {
    let app = build_test_app(seeded_projects());
    let response = request_json(
        app,
        Method::POST,
        "/media_count_by_filename",
        json!({ "media_name": "   " }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "No media name provided");
}

#[tokio::test]
async fn blank_label_name_is_rejected() {
    let app = build_test_app(seeded_projects());
    let response = request_json(
        app,
        Method::DELETE,
        "/localizations/filename_label",
        json!({ "media_name": "a.jpg", "label_name": "" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "No label name provided");
}

#[tokio::test]
async fn missing_saliency_value_is_rejected() {
    let app = build_test_app(seeded_projects());
    let response = request_json(
        app,
        Method::DELETE,
        "/localizations/filename_saliency",
        json!({ "media_name": "a.jpg" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "No saliency value provided");
}

#[tokio::test]
async fn blank_cluster_name_on_delete_is_rejected() {
    let app = build_test_app(seeded_projects());
    let response = request_json(
        app,
        Method::DELETE,
        "/localizations/filename_cluster",
        json!({ "media_name": "a.jpg", "cluster_name": " " }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "No cluster name provided");
}
