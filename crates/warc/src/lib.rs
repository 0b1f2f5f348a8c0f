//! Reader for WARC archive files.
//!
//! Only as much of the WARC format is understood as is needed to pull the
//! target URI and payload digest out of `response` records: the version line,
//! the named header fields, and `Content-Length` to skip over each block.
//! Blocks themselves (the captured HTTP messages) are never parsed.
//!
//! A file that isn't a well-formed WARC container is not fatal to
//! [`read_directory`]; it is reported back in [`ArchiveLoad::failed_files`].

pub mod error;
mod reader;
mod record;

pub use crate::reader::{ArchiveLoad, ArchiveReader, read_directory, read_file};
pub use crate::record::{RecordReader, WarcRecord};

/// File name suffix of the archive files picked up by [`read_directory`].
pub const ARCHIVE_SUFFIX: &str = "warc.gz";

/// Header names, as they appear in WARC files.
pub mod headers {
    pub const CONTENT_LENGTH: &str = "Content-Length";
    pub const WARC_TYPE: &str = "WARC-Type";
    pub const WARC_TARGET_URI: &str = "WARC-Target-URI";
    pub const WARC_PAYLOAD_DIGEST: &str = "WARC-Payload-Digest";
}
