//! Error types for the photo pipeline.
//!
//! [`PipelineError`] covers everything that can go wrong while turning one
//! encoded upload into one encoded output. Failures are scoped to a single
//! image; callers decide whether to skip or abort.

use std::fmt;

/// Failure while processing a single image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    /// The bytes could not be read as a supported raster format.
    Decode(String),
    /// The declared dimensions exceed the configured pixel budget.
    ///
    /// Raised from the header, before any pixel buffer is allocated.
    TooLarge {
        width: u32,
        height: u32,
        max_pixels: u64,
    },
    /// Serializing the finished image failed.
    Encode(String),
}

impl PipelineError {
    /// True for errors caused by the input bytes rather than the encoder.
    pub fn is_decode(&self) -> bool {
        matches!(self, PipelineError::Decode(_) | PipelineError::TooLarge { .. })
    }
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::Decode(msg) => write!(f, "decode error: {}", msg),
            PipelineError::TooLarge {
                width,
                height,
                max_pixels,
            } => write!(
                f,
                "decode error: image is {}x{} pixels (max {} pixels)",
                width, height, max_pixels
            ),
            PipelineError::Encode(msg) => write!(f, "encode error: {}", msg),
        }
    }
}

impl std::error::Error for PipelineError {}

/// A platform identifier with no entry in the platform profile table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPlatform(pub String);

impl fmt::Display for UnknownPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown platform: {:?}", self.0)
    }
}

impl std::error::Error for UnknownPlatform {}
