//! Single-image preview with the stronger preview tone factors.

use photo_pipeline::{Pipeline, PipelineError, Platform};

use crate::models::AppConfig;

/// Output size when no platform is requested
pub const DEFAULT_PREVIEW_SIZE: u32 = 1080;

#[derive(Debug, Clone)]
pub struct PreviewService {
    pipeline: Pipeline,
}

impl PreviewService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            pipeline: Pipeline::new(config.preview_options()),
        }
    }

    /// Run the full pipeline on one upload and return a JPEG.
    pub fn render(
        &self,
        bytes: &[u8],
        platform: Option<Platform>,
    ) -> Result<Vec<u8>, PipelineError> {
        let jpeg = match platform {
            Some(platform) => self.pipeline.process(bytes, platform)?,
            None => self.pipeline.process_to_size(bytes, DEFAULT_PREVIEW_SIZE)?,
        };
        tracing::debug!(
            platform = ?platform.map(Platform::id),
            bytes = jpeg.len(),
            "Preview rendered"
        );
        Ok(jpeg)
    }
}
