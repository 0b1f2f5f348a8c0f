//! Core Error Types
//!
//! Structured errors using `exn` for automatic location tracking and error
//! tree construction.

use derive_more::{Display, Error};
use std::path::PathBuf;

/// A core error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// The discovery root could not be turned into an absolute path.
    #[display("invalid discovery root: {}", _0.display())]
    InvalidRoot(#[error(not(source))] PathBuf),
    /// A directory (or entry within it) could not be read during discovery.
    #[display("failed to walk directory: {}", _0.display())]
    Discovery(#[error(not(source))] PathBuf),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Discovery(_))
    }
}
