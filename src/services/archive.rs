//! Archive assembly and naming.
//!
//! Layout inside the zip:
//!
//! ```text
//! <slug>_<product>_<YYYY-MM-DD>/<platform>/<name>.jpg
//! ```

use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;
use std::io::{Cursor, Write};
use std::sync::OnceLock;
use thiserror::Error;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::models::ArchiveEntry;

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Make free text safe for file and folder names.
///
/// Keeps `[A-Za-z0-9_-]`, turns spaces into underscores, collapses runs of
/// underscores and trims them from both ends. Empty results become `Batch`.
pub fn slugify(title: &str) -> String {
    static DISALLOWED: OnceLock<Regex> = OnceLock::new();
    static UNDERSCORES: OnceLock<Regex> = OnceLock::new();

    let disallowed = DISALLOWED.get_or_init(|| Regex::new(r"[^A-Za-z0-9_-]").unwrap());
    let underscores = UNDERSCORES.get_or_init(|| Regex::new(r"_{2,}").unwrap());

    let spaced = title.trim().replace(' ', "_");
    let stripped = disallowed.replace_all(&spaced, "");
    let collapsed = underscores.replace_all(&stripped, "_");
    let slug = collapsed.trim_matches('_');

    if slug.is_empty() {
        "Batch".to_string()
    } else {
        slug.to_string()
    }
}

/// Top-level folder inside the archive
pub fn archive_root(title: Option<&str>, product_name: &str, date: NaiveDate) -> String {
    format!(
        "{}_{}_{}",
        slugify(title.unwrap_or_default()),
        product_name,
        date.format("%Y-%m-%d")
    )
}

/// Suggested name for the downloaded archive
pub fn download_file_name(title: Option<&str>, product_name: &str, at: NaiveDateTime) -> String {
    format!(
        "{}_{}_{}.zip",
        product_name,
        slugify(title.unwrap_or_default()),
        at.format("%Y%m%d_%H%M%S")
    )
}

/// Writes entries into an in-memory zip under a common root folder.
pub struct ArchiveBuilder {
    root: String,
    writer: ZipWriter<Cursor<Vec<u8>>>,
    options: SimpleFileOptions,
    entries: usize,
}

impl ArchiveBuilder {
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            writer: ZipWriter::new(Cursor::new(Vec::new())),
            options: SimpleFileOptions::default().compression_method(CompressionMethod::Deflated),
            entries: 0,
        }
    }

    pub fn add(&mut self, entry: &ArchiveEntry) -> Result<(), ArchiveError> {
        let path = format!("{}/{}", self.root, entry.path());
        tracing::trace!(path = %path, bytes = entry.bytes.len(), "Adding archive entry");
        self.writer.start_file(path, self.options)?;
        self.writer.write_all(&entry.bytes)?;
        self.entries += 1;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries == 0
    }

    pub fn finish(self) -> Result<Vec<u8>, ArchiveError> {
        let cursor = self.writer.finish()?;
        Ok(cursor.into_inner())
    }
}

/// Build a complete archive from `entries`.
pub fn build_archive(root: &str, entries: &[ArchiveEntry]) -> Result<Vec<u8>, ArchiveError> {
    let mut builder = ArchiveBuilder::new(root);
    for entry in entries {
        builder.add(entry)?;
    }
    tracing::debug!(root = %root, entries = builder.len(), "Archive built");
    builder.finish()
}
