//! The full per-image pipeline.
//!
//! ```text
//! bytes --decode_oriented--> RgbImage
//!       --level_background--> --crop_to_content--> --square_canvas--> --enhance-->  (prepared)
//!       --resize_for(platform)--> --encode_jpeg--> bytes
//! ```
//!
//! Everything up to and including tone enhancement is independent of the
//! target platform, so batch callers can [`Pipeline::prepare`] once per
//! upload and [`Pipeline::render`] once per platform. The result is the same
//! as running [`Pipeline::process`] for each pair.

use image::RgbImage;

use crate::canvas::square_canvas;
use crate::crop::{crop_to_content, CropOptions};
use crate::encode::{encode_jpeg, EXPORT_QUALITY, PREVIEW_QUALITY};
use crate::enhance::{enhance, ToneOptions};
use crate::error::PipelineError;
use crate::level::{level_background, LevelOptions};
use crate::orient::{decode_oriented, DEFAULT_MAX_PIXELS};
use crate::platform::{resize_for, resize_to, Platform, ResizeMode};

/// Configuration for every stage of the pipeline.
///
/// Use [`PipelineOptions::export`] for archived outputs and
/// [`PipelineOptions::preview`] for the interactive preview.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOptions {
    /// Pixel budget checked against the header before decoding.
    pub max_pixels: u64,
    pub level: LevelOptions,
    pub crop: CropOptions,
    pub tone: ToneOptions,
    pub resize_mode: ResizeMode,
    /// JPEG quality, 1..=100.
    pub quality: u8,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self::export()
    }
}

impl PipelineOptions {
    pub fn export() -> Self {
        Self {
            max_pixels: DEFAULT_MAX_PIXELS,
            level: LevelOptions::default(),
            crop: CropOptions::default(),
            tone: ToneOptions::export(),
            resize_mode: ResizeMode::Exact,
            quality: EXPORT_QUALITY,
        }
    }

    pub fn preview() -> Self {
        Self {
            tone: ToneOptions::preview(),
            quality: PREVIEW_QUALITY,
            ..Self::export()
        }
    }

    #[inline]
    pub fn max_pixels(mut self, max_pixels: u64) -> Self {
        self.max_pixels = max_pixels;
        self
    }

    #[inline]
    pub fn resize_mode(mut self, mode: ResizeMode) -> Self {
        self.resize_mode = mode;
        self
    }
}

/// Stateless runner for [`PipelineOptions`]. Cheap to clone, safe to share.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    options: PipelineOptions,
}

impl Pipeline {
    pub fn new(options: PipelineOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Decode with orientation applied.
    pub fn decode(&self, bytes: &[u8]) -> Result<RgbImage, PipelineError> {
        decode_oriented(bytes, self.options.max_pixels)
    }

    /// Level, crop, square and enhance a decoded image.
    pub fn prepare(&self, image: RgbImage) -> RgbImage {
        let leveled = level_background(image, &self.options.level);
        let cropped = crop_to_content(leveled, &self.options.crop);
        let squared = square_canvas(cropped);
        enhance(squared, &self.options.tone)
    }

    /// Resize a prepared image for `platform` and encode it.
    pub fn render(
        &self,
        prepared: &RgbImage,
        platform: Platform,
    ) -> Result<Vec<u8>, PipelineError> {
        let resized = resize_for(prepared.clone(), platform, self.options.resize_mode);
        encode_jpeg(&resized, self.options.quality)
    }

    /// Run every stage for one (image, platform) pair.
    pub fn process(&self, bytes: &[u8], platform: Platform) -> Result<Vec<u8>, PipelineError> {
        let prepared = self.prepare(self.decode(bytes)?);
        self.render(&prepared, platform)
    }

    /// Run every stage, resizing to `size` instead of a platform profile.
    pub fn process_to_size(&self, bytes: &[u8], size: u32) -> Result<Vec<u8>, PipelineError> {
        let prepared = self.prepare(self.decode(bytes)?);
        let resized = resize_to(prepared, size, self.options.resize_mode);
        encode_jpeg(&resized, self.options.quality)
    }
}
