use std::path::PathBuf;
use warcdiff_core::{Entry, decode_url};

/// Fewest fields a line can have and still contain the checksum.
pub const MIN_FIELDS: usize = 6;
const URL_FIELD: usize = 2;
const CHECKSUM_FIELD: usize = 5;

/// The two fields of a CDX line that identify a capture, borrowed from the
/// raw line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexLine<'a> {
    /// Field `a`, still percent-encoded.
    pub original_url: &'a str,
    /// Field `k`, used as-is.
    pub checksum: &'a str,
}
impl<'a> IndexLine<'a> {
    /// Split a line on runs of whitespace and pick out the URL and checksum.
    ///
    /// Returns the number of fields found when there are fewer than
    /// [`MIN_FIELDS`]. Fields past the checksum are never looked at.
    pub fn parse(line: &'a str) -> Result<Self, usize> {
        let mut original_url = None;
        let mut checksum = None;
        let mut count = 0;
        for (index, field) in line.split_whitespace().take(MIN_FIELDS).enumerate() {
            match index {
                URL_FIELD => original_url = Some(field),
                CHECKSUM_FIELD => checksum = Some(field),
                _ => {},
            }
            count = index + 1;
        }
        match (original_url, checksum) {
            (Some(original_url), Some(checksum)) => Ok(Self { original_url, checksum }),
            _ => Err(count),
        }
    }

    pub fn into_entry(self, found_in_file: impl Into<PathBuf>) -> Entry {
        Entry::index(decode_url(self.original_url), self.checksum, found_in_file)
    }
}
