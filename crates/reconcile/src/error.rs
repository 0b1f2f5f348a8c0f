//! Reconcile Error Types
//!
//! Structured errors using `exn` for automatic location tracking and error
//! tree construction.

use derive_more::{Display, Error};
use std::path::PathBuf;

/// A reconcile error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for reconcile operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The report directory for this run already exists; nothing was written.
    #[display("report directory already exists: {}", _0.display())]
    OutputExists(#[error(not(source))] PathBuf),
    /// The report directory could not be created.
    #[display("failed to create report directory: {}", _0.display())]
    CreateDirectory(#[error(not(source))] PathBuf),
    /// A report file could not be written.
    #[display("failed to write report file: {}", _0.display())]
    Write(#[error(not(source))] PathBuf),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::CreateDirectory(_) | Self::Write(_))
    }
}
