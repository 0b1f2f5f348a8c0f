//! Decompression Error Types
//!
//! Structured errors using `exn` for automatic location tracking and error
//! tree construction.

use derive_more::{Display, Error};
use std::path::PathBuf;

/// A decompression error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for decompression operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The file could not be opened.
    #[display("failed to open {}", _0.display())]
    Open(#[error(not(source))] PathBuf),
    /// The raw bytes at the start of a stream could not be read.
    #[display("failed to read stream header")]
    Read,
    /// In-memory compression failed.
    #[display("failed to compress data")]
    Encode,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Open(_) | Self::Read)
    }
}
