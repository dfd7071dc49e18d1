//! JPEG serialization.

use image::RgbImage;
use jpeg_encoder::{ColorType, Encoder};

use crate::error::PipelineError;

/// Quality used for archived outputs.
pub const EXPORT_QUALITY: u8 = 85;
/// Quality used for the interactive preview.
pub const PREVIEW_QUALITY: u8 = 90;

/// Encode `image` as a progressive JPEG with optimized Huffman tables at
/// `quality` (1..=100).
///
/// Output is deterministic for identical pixels and quality. No metadata
/// (EXIF, ICC) is written. JPEG caps each side at 65535 pixels.
pub fn encode_jpeg(image: &RgbImage, quality: u8) -> Result<Vec<u8>, PipelineError> {
    let quality = quality.clamp(1, 100);
    let (width, height) = match (u16::try_from(image.width()), u16::try_from(image.height())) {
        (Ok(w), Ok(h)) => (w, h),
        _ => {
            return Err(PipelineError::Encode(format!(
                "{}x{} exceeds the JPEG size limit",
                image.width(),
                image.height()
            )))
        }
    };

    let mut buf = Vec::with_capacity(image.as_raw().len() / 8);
    let mut encoder = Encoder::new(&mut buf, quality);
    encoder.set_progressive(true);
    encoder.set_optimized_huffman_tables(true);
    encoder
        .encode(image.as_raw(), width, height, ColorType::Rgb)
        .map_err(|e| PipelineError::Encode(e.to_string()))?;
    Ok(buf)
}
