//! Reader for CDX index files.
//!
//! A CDX file is a (usually gzipped) text file with one capture per line and
//! a legend on the first line, e.g. ` CDX N b a m s k r M S V g`. Fields are
//! separated by whitespace; only two of them matter here:
//!
//! | index | letter | meaning                          |
//! |-------|--------|----------------------------------|
//! | 2     | `a`    | original URL (percent-encoded)   |
//! | 5     | `k`    | new-style checksum (payload hash)|
//!
//! See <https://iipc.github.io/warc-specifications/specifications/cdx-format/cdx-2015/>.

pub mod error;
mod line;
mod policy;
mod reader;

pub use crate::line::{IndexLine, MIN_FIELDS};
pub use crate::policy::MalformedLinePolicy;
pub use crate::reader::{IndexReader, read_directory, read_file};

/// File name suffix of the index files picked up by [`read_directory`].
pub const INDEX_SUFFIX: &str = ".cdx.gz";
