pub mod batch;
pub mod form;
pub mod index;
pub mod platforms;
pub mod preview;

pub use batch::{handle_batch, BatchUpload, FAILED_HEADER, PROCESSED_HEADER, __path_handle_batch};
pub use index::{handle_index, handle_static};
pub use platforms::{handle_platforms, PlatformInfo, __path_handle_platforms};
pub use preview::{handle_preview, PreviewUpload, __path_handle_preview};
