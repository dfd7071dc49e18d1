//! Multipart form parsing for batch and preview uploads.

use axum::extract::Multipart;
use photo_pipeline::Platform;

use crate::error::ApiError;
use crate::models::{BatchRequest, UploadedImage};

/// Split a platforms value that may hold several comma-separated ids.
pub fn split_platforms(value: &str) -> impl Iterator<Item = String> + '_ {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Collects batch form fields in arrival order.
#[derive(Debug, Default)]
pub struct BatchForm {
    request: BatchRequest,
}

impl BatchForm {
    pub fn push_text(&mut self, name: &str, value: &str) {
        match name {
            "platforms" | "platform" => self.request.platforms.extend(split_platforms(value)),
            "title" => self.request.title = Some(value.to_string()),
            other => tracing::debug!(field = other, "Ignoring unknown form field"),
        }
    }

    pub fn push_file(&mut self, file_name: &str, bytes: Vec<u8>) {
        // Browsers send an empty part when no file was chosen
        if file_name.is_empty() && bytes.is_empty() {
            return;
        }
        self.request.images.push(UploadedImage::new(file_name, bytes));
    }

    pub fn into_request(self) -> BatchRequest {
        self.request
    }
}

/// Read a batch upload: repeated `files`, repeated or comma-separated
/// `platforms`, optional `title`.
pub async fn read_batch_form(mut multipart: Multipart) -> Result<BatchRequest, ApiError> {
    let mut form = BatchForm::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match (name.as_str(), field.file_name().map(str::to_string)) {
            ("files" | "file", Some(file_name)) => {
                let bytes = field.bytes().await?;
                form.push_file(&file_name, bytes.to_vec());
            }
            (_, Some(_)) => {
                tracing::debug!(field = %name, "Ignoring unexpected file part");
            }
            (_, None) => {
                let value = field.text().await?;
                form.push_text(&name, &value);
            }
        }
    }

    let request = form.into_request();
    tracing::debug!(
        images = request.images.len(),
        platforms = ?request.platforms,
        title = ?request.title,
        "Batch form received"
    );
    Ok(request)
}

/// A preview upload: one `file` and an optional `platform`.
#[derive(Debug)]
pub struct PreviewForm {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub platform: Option<Platform>,
}

pub async fn read_preview_form(mut multipart: Multipart) -> Result<PreviewForm, ApiError> {
    let mut file = None;
    let mut platform = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" | "files" if file.is_none() => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await?;
                file = Some((file_name, bytes.to_vec()));
            }
            "platform" => {
                let value = field.text().await?;
                let value = value.trim();
                if !value.is_empty() {
                    let parsed: Platform = value
                        .parse()
                        .map_err(|e: photo_pipeline::UnknownPlatform| {
                            ApiError::BadRequest(e.to_string())
                        })?;
                    platform = Some(parsed);
                }
            }
            _ => tracing::debug!(field = %name, "Ignoring form field"),
        }
    }

    let (file_name, bytes) = file
        .filter(|(_, bytes)| !bytes.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Missing file".to_string()))?;

    Ok(PreviewForm {
        file_name,
        bytes,
        platform,
    })
}
