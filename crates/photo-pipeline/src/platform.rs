//! Platform profiles and resizing.
//!
//! The set of marketplaces is closed and lives in [`Platform`]; adding a
//! marketplace means adding a variant and its row in [`Platform::ALL`].

use std::fmt;
use std::str::FromStr;

use image::imageops::{self, FilterType};
use image::RgbImage;

use crate::error::UnknownPlatform;

/// A target marketplace with a fixed square output size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Platform {
    Ebay,
    Poshmark,
    Mercari,
}

impl Platform {
    /// Every supported platform, in display order.
    pub const ALL: [Platform; 3] = [Platform::Ebay, Platform::Poshmark, Platform::Mercari];

    /// Identifier used in requests and archive folder names.
    pub const fn id(self) -> &'static str {
        match self {
            Platform::Ebay => "ebay",
            Platform::Poshmark => "poshmark",
            Platform::Mercari => "mercari",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Platform::Ebay => "eBay",
            Platform::Poshmark => "Poshmark",
            Platform::Mercari => "Mercari",
        }
    }

    /// Side length of the square output, in pixels.
    pub const fn target_size(self) -> u32 {
        match self {
            Platform::Ebay => 1600,
            Platform::Poshmark => 1080,
            Platform::Mercari => 1200,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Platform {
    type Err = UnknownPlatform;

    /// Case-insensitive, surrounding whitespace ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Platform::ALL
            .into_iter()
            .find(|p| p.id().eq_ignore_ascii_case(needle))
            .ok_or_else(|| UnknownPlatform(s.to_string()))
    }
}

/// How the target size is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResizeMode {
    /// Exactly `size` x `size`. Non-square input is stretched.
    #[default]
    Exact,
    /// Shrink to fit inside `size` x `size`, keeping aspect ratio.
    /// Never upscales.
    Bounded,
}

/// What to do with an identifier that is not in the profile table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownPlatformPolicy {
    /// Return [`UnknownPlatform`].
    #[default]
    Reject,
    /// Return the image unchanged.
    PassThrough,
}

/// Resize `image` to `size` according to `mode` using Lanczos3.
pub fn resize_to(image: RgbImage, size: u32, mode: ResizeMode) -> RgbImage {
    let (width, height) = image.dimensions();
    match mode {
        ResizeMode::Exact => {
            if width == size && height == size {
                return image;
            }
            imageops::resize(&image, size, size, FilterType::Lanczos3)
        }
        ResizeMode::Bounded => {
            if width <= size && height <= size {
                return image;
            }
            let (w, h) = fit_within(width, height, size);
            imageops::resize(&image, w, h, FilterType::Lanczos3)
        }
    }
}

/// Largest dimensions with the same aspect ratio fitting in `size` x `size`.
fn fit_within(width: u32, height: u32, size: u32) -> (u32, u32) {
    if width >= height {
        let h = (u64::from(height) * u64::from(size) + u64::from(width) / 2) / u64::from(width);
        (size, (h as u32).max(1))
    } else {
        let w = (u64::from(width) * u64::from(size) + u64::from(height) / 2) / u64::from(height);
        ((w as u32).max(1), size)
    }
}

/// Resize for a known platform.
pub fn resize_for(image: RgbImage, platform: Platform, mode: ResizeMode) -> RgbImage {
    resize_to(image, platform.target_size(), mode)
}

/// Resize for a platform given by identifier.
pub fn resize_for_id(
    image: RgbImage,
    id: &str,
    mode: ResizeMode,
    policy: UnknownPlatformPolicy,
) -> Result<RgbImage, UnknownPlatform> {
    match (id.parse::<Platform>(), policy) {
        (Ok(platform), _) => Ok(resize_for(image, platform, mode)),
        (Err(_), UnknownPlatformPolicy::PassThrough) => Ok(image),
        (Err(e), UnknownPlatformPolicy::Reject) => Err(e),
    }
}
