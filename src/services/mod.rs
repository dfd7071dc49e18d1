pub mod archive;
pub mod batch;
pub mod preview;

pub use archive::{
    archive_root, build_archive, download_file_name, slugify, ArchiveBuilder, ArchiveError,
};
pub use batch::{output_file_name, BatchService, ValidatedBatch};
pub use preview::{PreviewService, DEFAULT_PREVIEW_SIZE};
