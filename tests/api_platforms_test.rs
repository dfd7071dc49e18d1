//! Tests for the read-only endpoints: platforms, health and the upload page.

mod common;

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use common::TestApp;

#[tokio::test]
async fn test_platforms_lists_profiles() {
    let app = TestApp::new();

    let response = app.get("/api/platforms").await;

    common::assert_ok(&response);
    let json: serde_json::Value = response.json();
    assert_eq!(
        json,
        json!([
            { "id": "ebay", "label": "eBay", "size": 1600 },
            { "id": "poshmark", "label": "Poshmark", "size": 1080 },
            { "id": "mercari", "label": "Mercari", "size": 1200 },
        ])
    );
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();

    let response = app.get("/health").await;

    common::assert_ok(&response);
    assert_eq!(response.text(), "OK");
}

#[tokio::test]
async fn test_index_page() {
    let app = TestApp::new();

    let response = app.get("/").await;

    common::assert_ok(&response);
    assert_eq!(
        response.header("content-type"),
        Some("text/html; charset=utf-8")
    );
    assert!(response.text().contains("/api/batch"));
}

#[tokio::test]
async fn test_missing_static_file() {
    let app = TestApp::new();

    let response = app.get("/static/nope.css").await;

    common::assert_status(&response, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_batch_endpoint_rejects_get() {
    let app = TestApp::new();

    let response = app.get("/api/batch").await;

    common::assert_status(&response, StatusCode::METHOD_NOT_ALLOWED);
}
