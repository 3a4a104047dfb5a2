//! Error types for greybox-extract

use thiserror::Error;

/// Errors that can occur during region extraction
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Core buffer or geometry error
    #[error("core error: {0}")]
    Core(#[from] greybox_core::Error),

    /// Channel layout unsupported for the requested mode
    #[error("unsupported channel layout: expected {expected}, got {actual} channels")]
    UnsupportedLayout { expected: &'static str, actual: u8 },
}

/// Result type for extraction operations
pub type ExtractResult<T> = Result<T, ExtractError>;
