//! Error types for WAV operations.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, WavError>;

#[derive(Error, Debug)]
pub enum WavError {
    /// A parameter was out of range or not allowed. Raised before any
    /// storage is allocated.
    #[error("wav: invalid argument: {0}")]
    Validation(String),

    #[error("wav: not a file: {}", .0.display())]
    NotFound(PathBuf),

    #[error("wav: file already exists: {}", .0.display())]
    AlreadyExists(PathBuf),

    /// The container holds data this crate cannot represent.
    #[error("wav: unsupported: {0}")]
    Unsupported(String),

    #[error("wav: io error: {0}")]
    Io(#[from] io::Error),

    #[error("wav: codec error: {0}")]
    Codec(#[from] hound::Error),
}

impl WavError {
    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        WavError::Validation(msg.into())
    }
}
