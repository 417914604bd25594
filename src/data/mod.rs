//! Data module - Cost sheet loading and upload file handling

mod files;
mod loader;

pub use files::{FileKind, SelectedFile, CHART_SOURCE_EXTENSIONS, UPLOAD_EXTENSIONS};
pub use loader::{CostSheetLoader, LoaderError};
