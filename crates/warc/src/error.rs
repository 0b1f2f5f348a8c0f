//! Archive Reader Error Types
//!
//! Structured errors using `exn` for automatic location tracking and error
//! tree construction.

use derive_more::{Display, Error};
use std::path::PathBuf;

/// An archive reader error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for archive reader operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
/// Only [`InvalidContainer`](Self::InvalidContainer) is a problem with one
/// file's contents; see [`is_container_failure`](Self::is_container_failure).
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The archive file could not be opened.
    #[display("failed to open archive file: {}", _0.display())]
    Open(#[error(not(source))] PathBuf),
    /// The file is not a readable WARC container: corrupt compression, a
    /// truncated record, or something that isn't WARC at all.
    #[display("invalid WARC container: {_0}")]
    InvalidContainer(#[error(not(source))] String),
    /// A `response` record lacks a header needed to build an entry.
    #[display("response record is missing the {_0} header")]
    MissingHeader(#[error(not(source))] &'static str),
    /// The archive directory could not be walked.
    #[display("failed to discover archive files")]
    Discovery,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Open(_) | Self::Discovery)
    }

    /// Returns `true` if the error condemns only the file being read, so the
    /// caller may record it and move on to the next file.
    pub fn is_container_failure(&self) -> bool {
        matches!(self, Self::InvalidContainer(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(ErrorKind::Open(PathBuf::from("/a.warc.gz")), false)]
    #[case(ErrorKind::InvalidContainer("truncated".to_string()), true)]
    #[case(ErrorKind::MissingHeader("WARC-Payload-Digest"), false)]
    #[case(ErrorKind::Discovery, false)]
    fn test_container_failure(#[case] kind: ErrorKind, #[case] expected: bool) {
        assert_eq!(kind.is_container_failure(), expected);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            ErrorKind::MissingHeader("WARC-Target-URI").to_string(),
            "response record is missing the WARC-Target-URI header"
        );
    }
}
