use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use photo_pipeline::{PipelineError, Platform};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Batch error: {0}")]
    Batch(#[from] BatchError),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Upload error: {0}")]
    Multipart(#[from] MultipartError),

    #[error("Preview error: {0}")]
    Preview(#[from] PipelineError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(e: tokio::task::JoinError) -> Self {
        ApiError::Internal(e.to_string())
    }
}

/// Request-level batch failures
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("No platforms selected")]
    NoPlatforms,

    #[error("No images uploaded")]
    NoImages,

    #[error("Too many images: {count} (max {max})")]
    TooManyImages { count: usize, max: usize },

    #[error("Unknown platform: {0:?}")]
    UnknownPlatform(String),

    #[error("Failed to process {file_name} for {platform}: {source}")]
    Pair {
        file_name: String,
        platform: Platform,
        #[source]
        source: PipelineError,
    },

    #[error("Archive error: {0}")]
    Archive(String),
}

impl From<photo_pipeline::UnknownPlatform> for BatchError {
    fn from(e: photo_pipeline::UnknownPlatform) -> Self {
        BatchError::UnknownPlatform(e.0)
    }
}

impl From<crate::services::archive::ArchiveError> for BatchError {
    fn from(e: crate::services::archive::ArchiveError) -> Self {
        BatchError::Archive(e.to_string())
    }
}

impl BatchError {
    pub fn status(&self) -> StatusCode {
        match self {
            BatchError::NoPlatforms
            | BatchError::NoImages
            | BatchError::TooManyImages { .. }
            | BatchError::UnknownPlatform(_) => StatusCode::BAD_REQUEST,
            BatchError::Pair { source, .. } => pipeline_status(source),
            BatchError::Archive(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Undecodable input is the client's fault, a failed encode is ours
fn pipeline_status(e: &PipelineError) -> StatusCode {
    if e.is_decode() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Batch(e) => (e.status(), e.to_string()),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::Multipart(e) => (e.status(), self.to_string()),
            ApiError::Preview(e) => (pipeline_status(e), e.to_string()),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
        };

        if status.is_server_error() {
            tracing::error!(error = %message, "Request failed");
        }

        let body = Json(json!({
            "status": status.as_u16(),
            "error": message,
        }));

        (status, body).into_response()
    }
}
