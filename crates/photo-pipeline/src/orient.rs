//! Orientation normalization and color flattening.
//!
//! Uploads arrive as encoded bytes straight from phones and cameras. Most
//! phone JPEGs store landscape sensor data plus an EXIF orientation tag, so
//! the pixels must be physically rotated before any geometry (cropping,
//! framing) is computed. The decoded image is then flattened to 8-bit RGB:
//! transparency is composited onto white, never carried further.

use std::io::Cursor;

use image::metadata::Orientation;
use image::{DynamicImage, ImageDecoder, ImageReader, Rgb, RgbImage};

use crate::error::PipelineError;

/// Default upper bound on decoded pixels (decompression-bomb guard).
pub const DEFAULT_MAX_PIXELS: u64 = 50_000_000;

/// Decode `bytes`, apply the embedded orientation and flatten to RGB.
///
/// Dimensions are read from the header first; inputs with more than
/// `max_pixels` pixels are rejected before the pixel buffer is allocated.
/// The returned image carries no metadata, so the orientation tag is
/// effectively cleared.
pub fn decode_oriented(bytes: &[u8], max_pixels: u64) -> Result<RgbImage, PipelineError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| PipelineError::Decode(e.to_string()))?;

    let mut decoder = reader
        .into_decoder()
        .map_err(|e| PipelineError::Decode(e.to_string()))?;

    let (width, height) = decoder.dimensions();
    if u64::from(width) * u64::from(height) > max_pixels {
        return Err(PipelineError::TooLarge {
            width,
            height,
            max_pixels,
        });
    }

    // Unreadable EXIF is not fatal: treat it as "no transform".
    let orientation = decoder.orientation().unwrap_or(Orientation::NoTransforms);

    let mut image =
        DynamicImage::from_decoder(decoder).map_err(|e| PipelineError::Decode(e.to_string()))?;

    if orientation != Orientation::NoTransforms {
        image.apply_orientation(orientation);
    }

    Ok(flatten_to_rgb(image))
}

/// Convert any color type to 8-bit RGB, compositing alpha onto white.
pub fn flatten_to_rgb(image: DynamicImage) -> RgbImage {
    if !image.color().has_alpha() {
        return image.into_rgb8();
    }

    let rgba = image.into_rgba8();
    RgbImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        let [r, g, b, a] = rgba.get_pixel(x, y).0;
        let a = u16::from(a);
        let over_white = |c: u8| ((u16::from(c) * a + 255 * (255 - a) + 127) / 255) as u8;
        Rgb([over_white(r), over_white(g), over_white(b)])
    })
}
