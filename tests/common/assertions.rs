//! Assertion helpers for tests.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use super::app::TestResponse;

/// Assert response has expected status code
pub fn assert_status(response: &TestResponse, expected: StatusCode) {
    assert_eq!(
        response.status,
        expected,
        "Expected status {}, got {}. Body: {}",
        expected,
        response.status,
        response.text()
    );
}

/// Assert response is OK (200)
pub fn assert_ok(response: &TestResponse) {
    assert_status(response, StatusCode::OK);
}

/// Assert response is a JPEG image
pub fn assert_jpeg(response: &TestResponse) {
    assert_ok(response);
    assert!(
        response.is_jpeg(),
        "Expected JPEG image, got {} bytes starting with {:?}",
        response.body.len(),
        &response.body[..8.min(response.body.len())]
    );
    assert_eq!(
        response.header("content-type"),
        Some("image/jpeg"),
        "Expected Content-Type: image/jpeg"
    );
}

/// Assert response is a zip archive download
pub fn assert_zip(response: &TestResponse) {
    assert_ok(response);
    assert!(
        response.is_zip(),
        "Expected zip archive, got {} bytes starting with {:?}",
        response.body.len(),
        &response.body[..8.min(response.body.len())]
    );
    assert_eq!(
        response.header("content-type"),
        Some("application/zip"),
        "Expected Content-Type: application/zip"
    );
}

/// Assert a JSON error body with the given status and a message containing `needle`
pub fn assert_json_error(response: &TestResponse, expected: StatusCode, needle: &str) {
    assert_status(response, expected);
    let json: serde_json::Value = response.json();
    assert_eq!(
        json["status"].as_u64(),
        Some(expected.as_u16() as u64),
        "Full response: {}",
        serde_json::to_string_pretty(&json).unwrap()
    );
    let message = json["error"].as_str().unwrap_or_default();
    assert!(
        message.contains(needle),
        "Expected error containing {needle:?}, got {message:?}"
    );
}

/// Assert the batch count headers
pub fn assert_batch_counts(response: &TestResponse, processed: usize, failed: usize) {
    assert_eq!(
        response.header("x-batch-processed"),
        Some(processed.to_string().as_str()),
        "X-Batch-Processed"
    );
    assert_eq!(
        response.header("x-batch-failed"),
        Some(failed.to_string().as_str()),
        "X-Batch-Failed"
    );
}
