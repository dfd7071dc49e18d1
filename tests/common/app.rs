//! Test application factory for integration tests.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use std::io::Cursor;
use tower::ServiceExt;

use photobatcher::assets::AssetLoader;
use photobatcher::models::AppConfig;
use photobatcher::server::{build_router, create_app_state, create_app_state_with_config};

use super::fixtures::MultipartBody;

/// Test application wrapping the production router
pub struct TestApp {
    router: axum::Router,
}

impl TestApp {
    /// Create a new test application using the embedded config
    pub fn new() -> Self {
        let state =
            create_app_state(&AssetLoader::new(None)).expect("Failed to create app state");
        Self {
            router: build_router(state),
        }
    }

    /// Create a test application with a custom config
    pub fn with_config(config: AppConfig) -> Self {
        let state = create_app_state_with_config(config).expect("Failed to create app state");
        Self {
            router: build_router(state),
        }
    }

    /// Make a GET request to the given path
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request(Request::get(path).body(Body::empty()).unwrap())
            .await
    }

    /// Make a multipart POST request
    pub async fn post_multipart(&self, path: &str, form: MultipartBody) -> TestResponse {
        let content_type = form.content_type();
        let request = Request::post(path)
            .header("Content-Type", content_type)
            .body(Body::from(form.finish()))
            .unwrap();
        self.request(request).await
    }

    /// Send a request to the router
    async fn request(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes()
            .to_vec();

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Test response with convenience methods
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    /// Parse body as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body).expect("Failed to parse JSON response")
    }

    /// Get body as string
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }

    /// Get a header value as a string
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Check if response is a JPEG image
    pub fn is_jpeg(&self) -> bool {
        self.body.len() >= 3 && self.body[0..3] == [0xFF, 0xD8, 0xFF]
    }

    /// Check if response is a zip archive (possibly empty)
    pub fn is_zip(&self) -> bool {
        self.body.starts_with(b"PK\x03\x04") || self.body.starts_with(b"PK\x05\x06")
    }

    /// Open the body as a zip archive
    pub fn zip(&self) -> zip::ZipArchive<Cursor<Vec<u8>>> {
        zip::ZipArchive::new(Cursor::new(self.body.clone())).expect("Body is not a zip archive")
    }

    /// Sorted entry names of the zip body
    pub fn zip_entries(&self) -> Vec<String> {
        let mut names: Vec<String> = self.zip().file_names().map(str::to_string).collect();
        names.sort();
        names
    }
}
