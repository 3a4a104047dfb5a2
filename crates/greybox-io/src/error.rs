//! Error types for greybox-io

use thiserror::Error;

/// Errors that can occur while reading, writing, or converting images
#[derive(Debug, Error)]
pub enum IoError {
    /// Core buffer error
    #[error("core error: {0}")]
    Core(#[from] greybox_core::Error),

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Decode or encode failure in the image codec
    #[error("image codec error: {0}")]
    Codec(#[from] image::ImageError),
}

/// Result type for I/O operations
pub type IoResult<T> = Result<T, IoError>;
