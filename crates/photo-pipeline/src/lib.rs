//! photo-pipeline: listing-ready product photos for online marketplaces
//!
//! Turns an arbitrary upload into a square, white-background JPEG sized for a
//! marketplace.
//!
//! # Quick Start
//!
//! The [`Pipeline`] runner is the primary entry point:
//!
//! ```
//! use image::{Rgb, RgbImage};
//! use photo_pipeline::{encode_jpeg, Pipeline, Platform};
//!
//! let upload = RgbImage::from_pixel(64, 48, Rgb([200, 40, 40]));
//! let bytes = encode_jpeg(&upload, 95).unwrap();
//!
//! let jpeg = Pipeline::default().process(&bytes, Platform::Poshmark).unwrap();
//! assert_eq!(&jpeg[..2], &[0xFF, 0xD8]);
//! ```
//!
//! # Stages
//!
//! | Stage      | Function               | Platform dependent |
//! |------------|------------------------|--------------------|
//! | decode     | [`decode_oriented`]    | no                 |
//! | level      | [`level_background`]   | no                 |
//! | crop       | [`crop_to_content`]    | no                 |
//! | frame      | [`square_canvas`]      | no                 |
//! | enhance    | [`enhance`]            | no                 |
//! | resize     | [`resize_for`]         | yes                |
//! | encode     | [`encode_jpeg`]        | no                 |
//!
//! Only resizing depends on the platform. [`Pipeline::prepare`] runs the
//! first five stages once, [`Pipeline::render`] runs the rest per platform.
//!
//! # Decoding
//!
//! EXIF orientation is applied to the pixels during decode and never written
//! back out. Alpha is composited onto white. Images whose header declares
//! more than [`PipelineOptions::max_pixels`] pixels are rejected before any
//! pixel data is decoded.
//!
//! # Background Leveling
//!
//! Pixels that are bright and nearly unsaturated are considered background
//! and lifted toward white, keeping their hue. Everything else is untouched.
//! See [`LevelOptions`] for the thresholds.

pub mod canvas;
pub mod crop;
pub mod encode;
pub mod enhance;
pub mod error;
pub mod level;
pub mod orient;
pub mod pipeline;
pub mod platform;

#[cfg(test)]
mod test_support;

pub use canvas::square_canvas;
pub use crop::{content_bbox, crop_to_content, BoundingBox, CropOptions};
pub use encode::{encode_jpeg, EXPORT_QUALITY, PREVIEW_QUALITY};
pub use enhance::{enhance, ToneOptions};
pub use error::{PipelineError, UnknownPlatform};
pub use level::{level_background, LevelOptions};
pub use orient::{decode_oriented, DEFAULT_MAX_PIXELS};
pub use pipeline::{Pipeline, PipelineOptions};
pub use platform::{resize_for, resize_for_id, resize_to, Platform, ResizeMode, UnknownPlatformPolicy};
