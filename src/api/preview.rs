use axum::{
    body::Bytes,
    extract::{Multipart, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use utoipa::ToSchema;

use super::form::read_preview_form;
use crate::error::ApiError;
use crate::services::PreviewService;

/// Multipart body of a preview upload
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct PreviewUpload {
    /// One product photo
    #[schema(value_type = String, format = Binary)]
    file: Vec<u8>,
    /// Platform id to size the preview for; 1080x1080 if omitted
    platform: Option<String>,
}

/// Preview the cleanup on a single photo
///
/// Uses stronger enhancement than the archived outputs so the effect is
/// easy to see side by side with the original.
#[utoipa::path(
    post,
    path = "/api/preview",
    request_body(content = PreviewUpload, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Enhanced JPEG (image/jpeg)"),
        (status = 400, description = "Missing file, undecodable image or unknown platform"),
    ),
    tag = "Preview"
)]
pub async fn handle_preview(
    State(service): State<Arc<PreviewService>>,
    multipart: Multipart,
) -> Result<Response, ApiError> {
    let form = read_preview_form(multipart).await?;

    tracing::info!(
        file = %form.file_name,
        size_bytes = form.bytes.len(),
        platform = ?form.platform,
        "Preview request received"
    );

    let jpeg =
        tokio::task::spawn_blocking(move || service.render(&form.bytes, form.platform)).await??;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "image/jpeg"),
            (header::CONTENT_LENGTH, &jpeg.len().to_string()),
            (header::CACHE_CONTROL, "no-cache"),
        ],
        Bytes::from(jpeg),
    )
        .into_response())
}
