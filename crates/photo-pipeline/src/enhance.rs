//! Tone enhancement.
//!
//! Four linear adjustments applied in a fixed order, each of the form
//! `out = baseline + factor * (in - baseline)`:
//!
//! | Step       | Baseline                                           |
//! |------------|----------------------------------------------------|
//! | brightness | black                                              |
//! | contrast   | uniform gray at the image's mean luminance         |
//! | color      | the pixel's own luminance (grayscale copy)         |
//! | sharpness  | 3x3 smoothed copy (edge pixels are their own blur) |
//!
//! Each step sees the output of the previous one, so the order is part of
//! the result. A factor of exactly `1.0` is the identity and is skipped.

use image::{Rgb, RgbImage};

use crate::crop::{luminance, mean_level};

/// Enhancement factors. `1.0` means unchanged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneOptions {
    pub brightness: f32,
    pub contrast: f32,
    /// Saturation step; `None` skips it entirely.
    pub color: Option<f32>,
    pub sharpness: f32,
}

impl Default for ToneOptions {
    fn default() -> Self {
        Self::export()
    }
}

impl ToneOptions {
    /// Conservative, marketplace-safe factors used for archived outputs.
    pub const fn export() -> Self {
        Self {
            brightness: 1.05,
            contrast: 1.08,
            color: Some(1.04),
            sharpness: 1.05,
        }
    }

    /// Stronger factors used for the interactive before/after preview.
    pub const fn preview() -> Self {
        Self {
            brightness: 1.09,
            contrast: 1.15,
            color: Some(1.10),
            sharpness: 1.18,
        }
    }

    /// All factors at `1.0`.
    pub const fn identity() -> Self {
        Self {
            brightness: 1.0,
            contrast: 1.0,
            color: None,
            sharpness: 1.0,
        }
    }
}

#[inline]
fn blend(baseline: f32, value: u8, factor: f32) -> u8 {
    (baseline + factor * (f32::from(value) - baseline))
        .round()
        .clamp(0.0, 255.0) as u8
}

pub fn adjust_brightness(mut image: RgbImage, factor: f32) -> RgbImage {
    for p in image.pixels_mut() {
        for c in p.0.iter_mut() {
            *c = blend(0.0, *c, factor);
        }
    }
    image
}

pub fn adjust_contrast(mut image: RgbImage, factor: f32) -> RgbImage {
    let mean = mean_level(&luminance(&image));
    for p in image.pixels_mut() {
        for c in p.0.iter_mut() {
            *c = blend(mean, *c, factor);
        }
    }
    image
}

pub fn adjust_color(mut image: RgbImage, factor: f32) -> RgbImage {
    let gray = luminance(&image);
    for (x, y, p) in image.enumerate_pixels_mut() {
        let l = f32::from(gray.get_pixel(x, y).0[0]);
        for c in p.0.iter_mut() {
            *c = blend(l, *c, factor);
        }
    }
    image
}

/// Smoothing kernel: center weight 5, neighbors 1, normalized by 13.
fn smoothed(image: &RgbImage) -> RgbImage {
    let (w, h) = image.dimensions();
    let mut out = image.clone();
    if w < 3 || h < 3 {
        return out;
    }
    for y in 1..h - 1 {
        for x in 1..w - 1 {
            let mut acc = [0u32; 3];
            for dy in 0..3 {
                for dx in 0..3 {
                    let weight = if dx == 1 && dy == 1 { 5 } else { 1 };
                    let p = image.get_pixel(x + dx - 1, y + dy - 1);
                    for (a, &c) in acc.iter_mut().zip(p.0.iter()) {
                        *a += weight * u32::from(c);
                    }
                }
            }
            out.put_pixel(
                x,
                y,
                Rgb(acc.map(|a| ((a as f32) / 13.0).round().clamp(0.0, 255.0) as u8)),
            );
        }
    }
    out
}

pub fn adjust_sharpness(mut image: RgbImage, factor: f32) -> RgbImage {
    let blurred = smoothed(&image);
    for (x, y, p) in image.enumerate_pixels_mut() {
        let base = blurred.get_pixel(x, y).0;
        for (c, b) in p.0.iter_mut().zip(base) {
            *c = blend(f32::from(b), *c, factor);
        }
    }
    image
}

/// Apply brightness, contrast, color and sharpness in that order.
pub fn enhance(mut image: RgbImage, options: &ToneOptions) -> RgbImage {
    if options.brightness != 1.0 {
        image = adjust_brightness(image, options.brightness);
    }
    if options.contrast != 1.0 {
        image = adjust_contrast(image, options.contrast);
    }
    if let Some(color) = options.color.filter(|&f| f != 1.0) {
        image = adjust_color(image, color);
    }
    if options.sharpness != 1.0 {
        image = adjust_sharpness(image, options.sharpness);
    }
    image
}
