use axum::{
    body::Bytes,
    extract::{Multipart, State},
    http::{header, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use utoipa::ToSchema;

use super::form::read_batch_form;
use crate::error::{ApiError, BatchError};
use crate::models::AppConfig;
use crate::services::{archive_root, build_archive, download_file_name, BatchService};

/// Number of uploads with at least one output in the archive
pub const PROCESSED_HEADER: HeaderName = HeaderName::from_static("x-batch-processed");
/// Number of uploads with at least one failed (image, platform) pair
pub const FAILED_HEADER: HeaderName = HeaderName::from_static("x-batch-failed");

/// Multipart body of a batch upload
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct BatchUpload {
    /// Product photos, one part per file
    #[schema(value_type = Vec<String>, format = Binary)]
    files: Vec<Vec<u8>>,
    /// Platform ids, repeated or comma-separated (ebay, poshmark, mercari)
    platforms: Vec<String>,
    /// Used to name the archive
    title: Option<String>,
}

/// Process a batch of product photos
///
/// Every uploaded image is cleaned up and resized for every selected
/// platform. The response is a zip archive with one folder per platform.
/// Images that cannot be decoded are left out and counted in
/// `X-Batch-Failed`; the rest of the batch still succeeds.
#[utoipa::path(
    post,
    path = "/api/batch",
    request_body(content = BatchUpload, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Zip archive (application/zip)",
            headers(
                ("X-Batch-Processed" = usize, description = "Images with outputs"),
                ("X-Batch-Failed" = usize, description = "Images with failed outputs"),
            )),
        (status = 400, description = "No platforms, no images, too many images or unknown platform"),
        (status = 413, description = "Upload too large"),
    ),
    tag = "Batch"
)]
pub async fn handle_batch(
    State(config): State<Arc<AppConfig>>,
    State(service): State<Arc<BatchService>>,
    multipart: Multipart,
) -> Result<Response, ApiError> {
    let request = read_batch_form(multipart).await?;

    tracing::info!(
        images = request.images.len(),
        platforms = ?request.platforms,
        "Batch request received"
    );

    // Reject before any CPU work is scheduled
    let batch = service.validate(request)?;

    let now = chrono::Local::now().naive_local();
    let root = archive_root(batch.title.as_deref(), &config.product_name, now.date());
    let download_name = download_file_name(batch.title.as_deref(), &config.product_name, now);

    let (archive, processed, failed) = tokio::task::spawn_blocking(move || {
        let outcome = service.process(&batch)?;
        let archive = build_archive(&root, &outcome.entries)?;
        Ok::<_, BatchError>((archive, outcome.processed_images(), outcome.failed_images()))
    })
    .await??;

    tracing::info!(
        size_bytes = archive.len(),
        processed,
        failed,
        file = %download_name,
        "Archive ready"
    );

    let disposition = HeaderValue::from_str(&format!("attachment; filename=\"{download_name}\""))
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("application/zip")),
            (header::CONTENT_DISPOSITION, disposition),
            (PROCESSED_HEADER, HeaderValue::from(processed)),
            (FAILED_HEADER, HeaderValue::from(failed)),
        ],
        Bytes::from(archive),
    )
        .into_response())
}
