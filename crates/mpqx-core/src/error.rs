//! Error types for archive listing and extraction operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `ExtractError`.
pub type Result<T> = std::result::Result<T, ExtractError>;

/// Errors that can occur while listing or extracting archive entries.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// The archive or an output file could not be opened.
    #[error("cannot open '{path}'")]
    OpenFailed {
        /// The path that failed to open.
        path: PathBuf,
    },

    /// An entry index was out of range or a label lookup failed.
    #[error("no such entry: {index}")]
    NotFound {
        /// The offending 0-based entry index.
        index: u32,
    },

    /// An entry buffer could not be allocated.
    #[error("buffer allocation of {size} bytes failed")]
    OutOfMemory {
        /// The allocation size that failed, in bytes.
        size: u64,
    },

    /// The collaborator reported corrupt or undecodable archive data.
    #[error("archive data corrupt: {0}")]
    Corrupt(String),

    /// An output file failed to flush and close.
    #[error("failed to close '{path}'")]
    CloseFailed {
        /// The output file path.
        path: PathBuf,
    },

    /// Directory creation was denied.
    #[error("not allowed to create directory '{path}'")]
    PermissionDenied {
        /// The directory that could not be created.
        path: PathBuf,
    },

    /// A path component exists but is not a directory.
    #[error("path component exists and is not a directory: '{path}'")]
    NotADirectory {
        /// The conflicting component.
        path: PathBuf,
    },

    /// Any other I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ExtractError {
    /// Returns `true` if a bulk operation may skip the entry that raised
    /// this error and continue with the next index.
    ///
    /// Only `NotFound` qualifies; every other error aborts the run.
    #[must_use]
    pub const fn is_skippable(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
