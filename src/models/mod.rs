pub mod batch;
pub mod config;

pub use batch::{ArchiveEntry, BatchOutcome, BatchRequest, PairFailure, UploadedImage};
pub use config::{AppConfig, FailurePolicy, Limits, ResizeSetting};
