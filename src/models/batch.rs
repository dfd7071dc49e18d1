use photo_pipeline::{PipelineError, Platform};

/// One uploaded file, fully buffered
#[derive(Debug, Clone)]
pub struct UploadedImage {
    /// Name as sent by the client, possibly with directory parts
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl UploadedImage {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }
}

/// A batch as received, before validation
#[derive(Debug, Clone, Default)]
pub struct BatchRequest {
    pub images: Vec<UploadedImage>,
    /// Platform identifiers as sent by the client
    pub platforms: Vec<String>,
    /// Free text, only used for naming the archive
    pub title: Option<String>,
}

/// One processed output
#[derive(Debug, Clone)]
pub struct ArchiveEntry {
    pub platform: Platform,
    /// Output name, unique within its platform folder
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ArchiveEntry {
    /// Path below the archive root
    pub fn path(&self) -> String {
        format!("{}/{}", self.platform.id(), self.file_name)
    }
}

/// A pair that was left out of the archive
#[derive(Debug)]
pub struct PairFailure {
    /// Original upload name
    pub file_name: String,
    /// Name the output would have had, unique within the batch
    pub output_name: String,
    pub platform: Platform,
    pub error: PipelineError,
}

/// Result of processing a validated batch
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub entries: Vec<ArchiveEntry>,
    pub failures: Vec<PairFailure>,
}

impl BatchOutcome {
    /// Number of distinct uploads with at least one output
    pub fn processed_images(&self) -> usize {
        let mut names: Vec<&str> = self.entries.iter().map(|e| e.file_name.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        names.len()
    }

    /// Number of distinct uploads with at least one failed pair
    pub fn failed_images(&self) -> usize {
        let mut names: Vec<&str> = self
            .failures
            .iter()
            .map(|f| f.output_name.as_str())
            .collect();
        names.sort_unstable();
        names.dedup();
        names.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failure(platform: Platform, file_name: &str, output_name: &str) -> PairFailure {
        PairFailure {
            file_name: file_name.to_string(),
            output_name: output_name.to_string(),
            platform,
            error: PipelineError::Decode("bad".to_string()),
        }
    }

    fn entry(platform: Platform, name: &str) -> ArchiveEntry {
        ArchiveEntry {
            platform,
            file_name: name.to_string(),
            bytes: vec![],
        }
    }

    #[test]
    fn test_entry_path() {
        assert_eq!(entry(Platform::Mercari, "shoe.jpg").path(), "mercari/shoe.jpg");
    }

    #[test]
    fn test_counts_are_per_image() {
        let outcome = BatchOutcome {
            entries: vec![
                entry(Platform::Ebay, "a.jpg"),
                entry(Platform::Poshmark, "a.jpg"),
                entry(Platform::Ebay, "b.jpg"),
            ],
            failures: vec![
                failure(Platform::Ebay, "c.png", "c.jpg"),
                failure(Platform::Poshmark, "c.png", "c.jpg"),
            ],
        };

        assert_eq!(outcome.processed_images(), 2);
        assert_eq!(outcome.failed_images(), 1);
    }

    #[test]
    fn test_failed_uploads_with_same_name_count_separately() {
        let outcome = BatchOutcome {
            entries: vec![],
            failures: vec![
                failure(Platform::Ebay, "image.jpg", "image.jpg"),
                failure(Platform::Ebay, "image.jpg", "image_2.jpg"),
            ],
        };

        assert_eq!(outcome.failed_images(), 2);
    }
}
