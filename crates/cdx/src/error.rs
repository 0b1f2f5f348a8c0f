//! Index Reader Error Types
//!
//! Structured errors using `exn` for automatic location tracking and error
//! tree construction.

use derive_more::{Display, Error};
use std::path::PathBuf;

/// An index reader error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for index reader operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The index file could not be opened.
    #[display("failed to open index file: {}", _0.display())]
    Open(#[error(not(source))] PathBuf),
    /// A line could not be read: an I/O problem, corrupt compression, or
    /// text that isn't valid UTF-8.
    #[display("failed to read line {line} of index file: {}", path.display())]
    Read {
        path: PathBuf,
        line: usize,
    },
    /// A line has too few fields to contain a URL and a checksum.
    #[display("malformed line {line} of index file {}: expected at least {} fields, found {fields}", path.display(), crate::MIN_FIELDS)]
    MalformedLine {
        path: PathBuf,
        line: usize,
        fields: usize,
    },
    /// A malformed-line policy name was not recognized.
    #[display("unknown malformed line policy: {_0} (expected `abort` or `skip`)")]
    UnknownPolicy(#[error(not(source))] String),
    /// The index directory could not be walked.
    #[display("failed to discover index files")]
    Discovery,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Open(_) | Self::Read { .. } | Self::Discovery)
    }
}
