//! Crate-wide error and result types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the split/join engine and the size parser.
#[derive(Error, Debug)]
pub enum FsplitError {
    /// Read, write, or create failure at any stage of an operation.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Source file or parts directory is absent, or is not the expected
    /// file type.
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// A caller-supplied parameter failed validation.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A size string could not be parsed.
    #[error("invalid size: {0:?}")]
    InvalidFormat(String),

    /// The operation was cancelled between part iterations.
    #[error("operation cancelled")]
    Cancelled,
}

// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, FsplitError>;
