//! Transparent decompression for index and archive files.
//!
//! Web archive tooling hands us files that are (almost always) gzipped, but
//! the occasional index gets written uncompressed or recompressed with bzip2.
//! This crate hides that behind a single [`Compression`] enum:
//!
//! - **Format detection** from file extensions ([`Compression::from_path`]) or
//!   magic bytes ([`Compression::from_magic_bytes`])
//! - **Streaming** decompression via wrapped readers ([`Compression::wrap_reader`])
//! - **Sniffing** via [`PeekableReader`], which reads just enough of a stream
//!   to detect its format without losing those bytes
//! - **Opening** a path with [`open_file`], which combines all of the above
//!
//! Gzip decoding is multi-member aware: a `.warc.gz` file is a concatenation
//! of one gzip member per record, and a plain gzip decoder would stop after
//! the first one.

mod detect;
pub mod error;
mod ops;
mod peekable;

pub use crate::ops::{DecodedReader, open_file};
pub use crate::peekable::PeekableReader;

/// How a file's bytes are encoded on disk.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Compression {
    #[default]
    None,
    Bzip2,
    /// Possibly multi-member.
    Gzip,
}
