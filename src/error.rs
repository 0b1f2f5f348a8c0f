//! Application Error Types
//!
//! Structured errors using `exn` for automatic location tracking and error
//! tree construction.

use derive_more::{Display, Error};
use std::path::PathBuf;

/// An application error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for application operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// Settings are missing or have invalid values; fix the arguments or the
    /// environment.
    #[display("invalid configuration")]
    Config,
    /// A configured folder doesn't exist or isn't a directory.
    #[display("not a usable directory: {}", _0.display())]
    InvalidDirectory(#[error(not(source))] PathBuf),
    /// The index files could not be loaded.
    #[display("failed to load CDX entries")]
    Index,
    /// The archive files could not be loaded.
    #[display("failed to load WARC entries")]
    Archive,
    /// The results could not be written.
    #[display("failed to write results")]
    Report,
    /// The log subscriber could not be installed.
    #[display("failed to initialize logging")]
    Logging,
}
