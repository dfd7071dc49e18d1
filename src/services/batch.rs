//! Batch orchestration: validate, process every (image, platform) pair,
//! collect outputs and failures.
//!
//! Each image is decoded and prepared once, then rendered for each platform.
//! Only one prepared image is held in memory at a time.

use photo_pipeline::{Pipeline, Platform};
use std::collections::HashSet;
use std::path::Path;

use crate::error::BatchError;
use crate::models::{
    AppConfig, ArchiveEntry, BatchOutcome, BatchRequest, FailurePolicy, PairFailure,
    UploadedImage,
};

/// A batch that passed validation. Platforms are known and deduplicated.
#[derive(Debug, Clone)]
pub struct ValidatedBatch {
    pub images: Vec<UploadedImage>,
    pub platforms: Vec<Platform>,
    pub title: Option<String>,
}

/// Runs batches against a fixed pipeline configuration.
#[derive(Debug, Clone)]
pub struct BatchService {
    pipeline: Pipeline,
    max_images: usize,
    failure_policy: FailurePolicy,
}

impl BatchService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            pipeline: Pipeline::new(config.export_options()),
            max_images: config.limits.max_images,
            failure_policy: config.failure_policy,
        }
    }

    pub fn max_images(&self) -> usize {
        self.max_images
    }

    /// Check a request before any image work is done.
    pub fn validate(&self, request: BatchRequest) -> Result<ValidatedBatch, BatchError> {
        if request.platforms.is_empty() {
            return Err(BatchError::NoPlatforms);
        }

        let mut platforms = Vec::with_capacity(request.platforms.len());
        for id in &request.platforms {
            let platform: Platform = id.parse()?;
            if !platforms.contains(&platform) {
                platforms.push(platform);
            }
        }

        if request.images.is_empty() {
            return Err(BatchError::NoImages);
        }
        if request.images.len() > self.max_images {
            return Err(BatchError::TooManyImages {
                count: request.images.len(),
                max: self.max_images,
            });
        }

        let title = request
            .title
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        Ok(ValidatedBatch {
            images: request.images,
            platforms,
            title,
        })
    }

    /// Process every (image, platform) pair of a validated batch.
    pub fn process(&self, batch: &ValidatedBatch) -> Result<BatchOutcome, BatchError> {
        let request_id = new_request_id();
        let span = tracing::info_span!(
            "batch",
            request_id = %request_id,
            images = batch.images.len(),
            platforms = batch.platforms.len()
        );
        let _guard = span.enter();

        let mut outcome = BatchOutcome::default();
        let mut names = OutputNames::default();

        for image in &batch.images {
            let output_name = names.next(&image.file_name);

            let prepared = match self.pipeline.decode(&image.bytes) {
                Ok(decoded) => self.pipeline.prepare(decoded),
                Err(e) => {
                    for &platform in &batch.platforms {
                        self.record_failure(
                            &mut outcome,
                            image,
                            &output_name,
                            platform,
                            e.clone(),
                        )?;
                    }
                    continue;
                }
            };

            for &platform in &batch.platforms {
                match self.pipeline.render(&prepared, platform) {
                    Ok(bytes) => {
                        tracing::debug!(
                            file = %image.file_name,
                            platform = %platform,
                            bytes = bytes.len(),
                            "Processed image"
                        );
                        outcome.entries.push(ArchiveEntry {
                            platform,
                            file_name: output_name.clone(),
                            bytes,
                        });
                    }
                    Err(e) => {
                        self.record_failure(&mut outcome, image, &output_name, platform, e)?
                    }
                }
            }
        }

        tracing::info!(
            entries = outcome.entries.len(),
            failures = outcome.failures.len(),
            "Batch processed"
        );

        Ok(outcome)
    }

    /// Validate and process in one step.
    pub fn run(&self, request: BatchRequest) -> Result<(ValidatedBatch, BatchOutcome), BatchError> {
        let batch = self.validate(request)?;
        let outcome = self.process(&batch)?;
        Ok((batch, outcome))
    }

    fn record_failure(
        &self,
        outcome: &mut BatchOutcome,
        image: &UploadedImage,
        output_name: &str,
        platform: Platform,
        error: photo_pipeline::PipelineError,
    ) -> Result<(), BatchError> {
        tracing::warn!(
            file = %image.file_name,
            platform = %platform,
            error = %error,
            "Image failed"
        );

        match self.failure_policy {
            FailurePolicy::Isolate => {
                outcome.failures.push(PairFailure {
                    file_name: image.file_name.clone(),
                    output_name: output_name.to_string(),
                    platform,
                    error,
                });
                Ok(())
            }
            FailurePolicy::Abort => Err(BatchError::Pair {
                file_name: image.file_name.clone(),
                platform,
                source: error,
            }),
        }
    }
}

fn new_request_id() -> String {
    use rand::Rng;
    format!("{:08x}", rand::thread_rng().gen::<u32>())
}

/// Basename without directories or extension, with `.jpg` appended.
pub fn output_file_name(original: &str) -> String {
    format!("{}.jpg", output_stem(original))
}

fn output_stem(original: &str) -> &str {
    // Clients on Windows send backslash paths
    let base = original.rsplit(['/', '\\']).next().unwrap_or(original);
    Path::new(base)
        .file_stem()
        .and_then(|s| s.to_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or("image")
}

/// Hands out unique output names within one batch.
#[derive(Debug, Default)]
struct OutputNames {
    /// Lowercased stems already handed out
    used: HashSet<String>,
}

impl OutputNames {
    fn next(&mut self, original: &str) -> String {
        let stem = output_stem(original);

        let mut candidate = stem.to_string();
        let mut n = 1;
        while self.used.contains(&candidate.to_lowercase()) {
            n += 1;
            candidate = format!("{stem}_{n}");
        }
        self.used.insert(candidate.to_lowercase());
        format!("{candidate}.jpg")
    }
}
