//! Background leveling.
//!
//! Studio and kitchen-table backdrops photograph as a dull off-white. This
//! stage classifies each pixel in HSV space and lifts the value of bright,
//! nearly unsaturated pixels toward pure white. Colored or dark pixels (the
//! product) are left bit-identical. The pass is strictly per-pixel: no
//! neighborhood or morphology.
//!
//! HSV uses the 8-bit convention: `V = max(r, g, b)` and
//! `S = 255 * (max - min) / max`. Changing only V and converting back is the
//! same as scaling all three channels by `V' / V`, since hue and saturation
//! are ratios of the channel spread to the maximum.

use image::RgbImage;

/// Thresholds and gain for [`level_background`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelOptions {
    /// Pixels must have value strictly above this to count as background.
    pub value_threshold: u8,
    /// Pixels must have saturation strictly below this to count as background.
    pub saturation_threshold: u8,
    /// Multiplier applied to the value of background pixels.
    pub gain: f32,
    /// Flat amount added after the gain.
    pub offset: f32,
}

impl Default for LevelOptions {
    fn default() -> Self {
        Self {
            value_threshold: 200,
            saturation_threshold: 60,
            gain: 1.08,
            offset: 10.0,
        }
    }
}

impl LevelOptions {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn value_threshold(mut self, threshold: u8) -> Self {
        self.value_threshold = threshold;
        self
    }

    #[inline]
    pub fn saturation_threshold(mut self, threshold: u8) -> Self {
        self.saturation_threshold = threshold;
        self
    }

    #[inline]
    pub fn gain(mut self, gain: f32, offset: f32) -> Self {
        self.gain = gain;
        self.offset = offset;
        self
    }

    /// Returns true if an RGB triple is classified as background.
    pub fn is_background(&self, rgb: [u8; 3]) -> bool {
        let (value, saturation) = value_saturation(rgb);
        value > self.value_threshold && saturation < self.saturation_threshold
    }
}

/// HSV value and saturation of an 8-bit RGB triple, both on 0..=255.
pub fn value_saturation([r, g, b]: [u8; 3]) -> (u8, u8) {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    if max == 0 {
        return (0, 0);
    }
    let saturation = (255.0 * f32::from(max - min) / f32::from(max)).round() as u8;
    (max, saturation)
}

/// Lift near-white, low-saturation pixels toward white.
///
/// Output channels are always within `0..=255`: the new value is clamped
/// before channels are rescaled, and the maximum channel maps exactly onto it.
pub fn level_background(mut image: RgbImage, options: &LevelOptions) -> RgbImage {
    for pixel in image.pixels_mut() {
        if !options.is_background(pixel.0) {
            continue;
        }
        let value = pixel.0[0].max(pixel.0[1]).max(pixel.0[2]);
        let lifted = (f32::from(value) * options.gain + options.offset).clamp(0.0, 255.0);
        let ratio = lifted / f32::from(value);
        for channel in pixel.0.iter_mut() {
            *channel = (f32::from(*channel) * ratio).round().clamp(0.0, 255.0) as u8;
        }
    }
    image
}
