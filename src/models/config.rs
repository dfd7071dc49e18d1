use crate::assets::AssetLoader;
use crate::services::slugify;
use photo_pipeline::{PipelineOptions, ResizeMode};
use serde::Deserialize;

/// Application configuration loaded from config.yaml
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    /// Used in archive folder and download names
    #[serde(default = "default_product_name")]
    pub product_name: String,

    /// Request and image limits
    #[serde(default)]
    pub limits: Limits,

    /// What to do when one (image, platform) pair fails
    #[serde(default)]
    pub failure_policy: FailurePolicy,

    /// How platform sizes are applied
    #[serde(default)]
    pub resize_mode: ResizeSetting,
}

fn default_product_name() -> String {
    "PhotoBatcher".to_string()
}

/// Bounds on a single request
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Limits {
    /// Maximum images per batch
    pub max_images: usize,

    /// Maximum decoded pixels per image (width * height)
    pub max_image_pixels: u64,

    /// Maximum request body size in bytes
    pub max_upload_bytes: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_images: 24,
            max_image_pixels: photo_pipeline::DEFAULT_MAX_PIXELS,
            max_upload_bytes: 200 * 1024 * 1024,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Log the failed pair, leave it out of the archive, keep going
    #[default]
    Isolate,
    /// Fail the whole batch on the first failed pair
    Abort,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ResizeSetting {
    #[default]
    Exact,
    Bounded,
}

impl From<ResizeSetting> for ResizeMode {
    fn from(setting: ResizeSetting) -> Self {
        match setting {
            ResizeSetting::Exact => ResizeMode::Exact,
            ResizeSetting::Bounded => ResizeMode::Bounded,
        }
    }
}

impl AppConfig {
    /// Load configuration from AssetLoader (embedded or external)
    pub fn load_from_assets(loader: &AssetLoader) -> Self {
        match loader.read_config_string() {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    let config = Self::sanitized(config);
                    tracing::info!(
                        product_name = %config.product_name,
                        max_images = config.limits.max_images,
                        failure_policy = ?config.failure_policy,
                        resize_mode = ?config.resize_mode,
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    /// Restrict `product_name` to characters that are safe in archive
    /// paths and the `Content-Disposition` header.
    pub fn sanitized(mut self) -> Self {
        if self.product_name.trim().is_empty() {
            self.product_name = default_product_name();
            return self;
        }

        let slug = slugify(&self.product_name);
        if slug != self.product_name {
            tracing::warn!(
                configured = %self.product_name,
                using = %slug,
                "product_name contains unsafe characters"
            );
            self.product_name = slug;
        }
        self
    }

    /// Pipeline settings for archived outputs
    pub fn export_options(&self) -> PipelineOptions {
        PipelineOptions::export()
            .max_pixels(self.limits.max_image_pixels)
            .resize_mode(self.resize_mode.into())
    }

    /// Pipeline settings for the interactive preview
    pub fn preview_options(&self) -> PipelineOptions {
        PipelineOptions::preview()
            .max_pixels(self.limits.max_image_pixels)
            .resize_mode(self.resize_mode.into())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            product_name: default_product_name(),
            limits: Limits::default(),
            failure_policy: FailurePolicy::default(),
            resize_mode: ResizeSetting::default(),
        }
    }
}
