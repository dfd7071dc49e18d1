//! Content-aware cropping.
//!
//! Finds the region of the photo that differs from a pure-white backdrop and
//! crops to it with a proportional margin:
//!
//! 1. Luminance (ITU-R 601 weights) of every pixel.
//! 2. Absolute difference against a uniform white reference, i.e. `255 - L`.
//! 3. Contrast stretch of the difference map around its own mean, so the
//!    faint residue of a leveled backdrop drops to zero.
//! 4. Bounding box of the non-zero pixels, padded by `padding_ratio` of the
//!    box size on each side and clamped to the image.
//!
//! A blank (all-white) input has no non-zero difference and is returned
//! unchanged.

use image::{imageops, GrayImage, Luma, RgbImage};

/// Axis-aligned rectangle in source pixel coordinates.
///
/// `left`/`top` are inclusive, `right`/`bottom` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl BoundingBox {
    pub fn width(&self) -> u32 {
        self.right.saturating_sub(self.left)
    }

    pub fn height(&self) -> u32 {
        self.bottom.saturating_sub(self.top)
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// True if the box lies entirely inside a `width` x `height` image.
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        self.right <= width && self.bottom <= height
    }

    /// Grow by `ratio` of the box's own width/height on each side, clamped
    /// to a `width` x `height` image.
    pub fn padded(&self, ratio: f32, width: u32, height: u32) -> Self {
        let pad_x = (self.width() as f32 * ratio) as u32;
        let pad_y = (self.height() as f32 * ratio) as u32;
        Self {
            left: self.left.saturating_sub(pad_x),
            top: self.top.saturating_sub(pad_y),
            right: self.right.saturating_add(pad_x).min(width),
            bottom: self.bottom.saturating_add(pad_y).min(height),
        }
    }
}

/// Options for [`crop_to_content`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropOptions {
    /// Contrast factor applied to the difference map.
    pub contrast: f32,
    /// Margin added on each side, as a fraction of the content box.
    pub padding_ratio: f32,
}

impl Default for CropOptions {
    fn default() -> Self {
        Self {
            contrast: 2.0,
            padding_ratio: 0.06,
        }
    }
}

impl CropOptions {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn padding_ratio(mut self, ratio: f32) -> Self {
        self.padding_ratio = ratio;
        self
    }

    #[inline]
    pub fn contrast(mut self, factor: f32) -> Self {
        self.contrast = factor;
        self
    }
}

/// 8-bit luminance using the ITU-R 601-2 weights.
pub fn luminance(image: &RgbImage) -> GrayImage {
    GrayImage::from_fn(image.width(), image.height(), |x, y| {
        let [r, g, b] = image.get_pixel(x, y).0;
        let l = (u32::from(r) * 299 + u32::from(g) * 587 + u32::from(b) * 114 + 500) / 1000;
        Luma([l as u8])
    })
}

/// `|L - 255|` against a uniform white reference, contrast-stretched around
/// the map's own mean.
fn difference_map(image: &RgbImage, contrast: f32) -> GrayImage {
    let mut diff = luminance(image);
    for p in diff.pixels_mut() {
        p.0[0] = 255 - p.0[0];
    }

    let mean = mean_level(&diff);
    for p in diff.pixels_mut() {
        let v = mean + contrast * (f32::from(p.0[0]) - mean);
        p.0[0] = v.round().clamp(0.0, 255.0) as u8;
    }
    diff
}

/// Mean gray level, rounded to an integer level.
pub(crate) fn mean_level(image: &GrayImage) -> f32 {
    let count = u64::from(image.width()) * u64::from(image.height());
    if count == 0 {
        return 0.0;
    }
    let sum: u64 = image.pixels().map(|p| u64::from(p.0[0])).sum();
    (sum as f64 / count as f64).round() as f32
}

/// Smallest box enclosing all non-zero pixels, or `None` if there are none.
pub fn nonzero_bbox(map: &GrayImage) -> Option<BoundingBox> {
    let mut bbox: Option<BoundingBox> = None;
    for (x, y, p) in map.enumerate_pixels() {
        if p.0[0] == 0 {
            continue;
        }
        let b = bbox.get_or_insert(BoundingBox {
            left: x,
            top: y,
            right: x + 1,
            bottom: y + 1,
        });
        b.left = b.left.min(x);
        b.top = b.top.min(y);
        b.right = b.right.max(x + 1);
        b.bottom = b.bottom.max(y + 1);
    }
    bbox
}

/// Padded content box for `image`, or `None` for a blank image.
pub fn content_bbox(image: &RgbImage, options: &CropOptions) -> Option<BoundingBox> {
    let map = difference_map(image, options.contrast);
    nonzero_bbox(&map)
        .map(|b| b.padded(options.padding_ratio, image.width(), image.height()))
}

/// Crop `image` to its padded content box.
pub fn crop_to_content(image: RgbImage, options: &CropOptions) -> RgbImage {
    match content_bbox(&image, options) {
        Some(b) => imageops::crop_imm(&image, b.left, b.top, b.width(), b.height()).to_image(),
        None => image,
    }
}
