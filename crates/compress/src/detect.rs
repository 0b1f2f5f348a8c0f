use crate::Compression;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::Path;

/// Leading bytes of each compressed format, checked in order.
const SIGNATURES: [(&[u8], Compression); 2] = [(b"BZh", Compression::Bzip2), (&[0x1F, 0x8B], Compression::Gzip)];

/// How many bytes [`Compression::detect`] wants to see.
pub(crate) const MAGIC_LEN: usize = 3;

impl Compression {
    /// Guess from the file name alone; anything but `.gz`/`.bz2` is plain.
    #[must_use]
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let Some(extension) = path.as_ref().extension().and_then(|ext| ext.to_str()) else {
            return Self::None;
        };
        if extension.eq_ignore_ascii_case("gz") {
            Self::Gzip
        } else if extension.eq_ignore_ascii_case("bz2") {
            Self::Bzip2
        } else {
            Self::None
        }
    }

    /// Recognize a compressed stream by its first bytes. Too few bytes, or
    /// bytes that match nothing, mean [`None`](Self::None).
    #[must_use]
    pub fn from_magic_bytes(head: &[u8]) -> Self {
        SIGNATURES
            .iter()
            .find(|(signature, _)| head.starts_with(signature))
            .map_or(Self::None, |(_, format)| *format)
    }

    /// Pick a format for a file, trusting the content over the name.
    ///
    /// The extension is only consulted when the leading bytes are not a
    /// known compression header. A `.gz` file full of plain text is then
    /// still handed to the gzip decoder, which reports the corruption when
    /// read instead of silently passing garbage through.
    #[must_use]
    pub fn detect(path: impl AsRef<Path>, head: &[u8]) -> Self {
        match Self::from_magic_bytes(head) {
            Self::None => Self::from_path(path),
            sniffed => sniffed,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Bzip2 => "bzip2",
            Self::Gzip => "gzip",
        }
    }
}

impl Display for Compression {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}
