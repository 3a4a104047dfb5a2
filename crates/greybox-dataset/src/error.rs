//! Error types for greybox-dataset

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur during dataset preparation
#[derive(Debug, Error)]
pub enum DatasetError {
    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Archive format the extractor cannot handle
    #[error("unsupported archive format: {0}")]
    UnsupportedArchive(PathBuf),

    /// Image read/write failure
    #[error("image error: {0}")]
    Image(#[from] greybox_io::IoError),

    /// Region extraction failure
    #[error("extraction error: {0}")]
    Extract(#[from] greybox_extract::ExtractError),
}

/// Result type for dataset operations
pub type DatasetResult<T> = Result<T, DatasetError>;
