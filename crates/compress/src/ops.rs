use crate::Compression;
use crate::detect::MAGIC_LEN;
use crate::error::{ErrorKind, Result};
use crate::peekable::PeekableReader;
use bzip2::{Compression as BzCompression, read::BzDecoder, write::BzEncoder};
use exn::ResultExt;
use flate2::{Compression as GzCompression, read::MultiGzDecoder, write::GzEncoder};
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;
use tracing::instrument;

/// A buffered reader over the decompressed contents of a file.
pub type DecodedReader = BufReader<Box<dyn Read>>;

impl Compression {
    /// Compress a byte slice in memory.
    ///
    /// Mostly useful for building fixtures: each call produces exactly one
    /// gzip member, so concatenating the output of several calls yields a
    /// multi-member stream, the same shape as a `.warc.gz` file.
    ///
    /// # Examples
    ///
    /// ```
    /// use warcdiff_compress::Compression;
    ///
    /// let data = b"WARC/1.0\r\n";
    /// let compressed = Compression::Gzip.compress(data).unwrap();
    /// assert_ne!(compressed.as_slice(), data.as_slice());
    /// ```
    #[instrument(skip(input), fields(format = %self, input_size = input.len()))]
    pub fn compress(&self, input: &[u8]) -> Result<Vec<u8>> {
        let mut output = Vec::new();
        match self {
            Compression::None => output.extend_from_slice(input),
            Compression::Bzip2 => {
                let mut encoder = BzEncoder::new(&mut output, BzCompression::best());
                encoder.write_all(input).or_raise(|| ErrorKind::Encode)?;
                encoder.finish().or_raise(|| ErrorKind::Encode)?;
            },
            Compression::Gzip => {
                let mut encoder = GzEncoder::new(&mut output, GzCompression::best());
                encoder.write_all(input).or_raise(|| ErrorKind::Encode)?;
                encoder.finish().or_raise(|| ErrorKind::Encode)?;
            },
        }
        Ok(output)
    }

    /// Wrap a reader with the appropriate decompression layer.
    ///
    /// Decoding errors surface as [`std::io::Error`]s from `read` calls on the
    /// returned reader, usually with kind `InvalidData` or `InvalidInput`.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io::{Cursor, Read};
    /// use warcdiff_compress::Compression;
    ///
    /// let mut stream = Compression::Gzip.compress(b"first ").unwrap();
    /// stream.extend(Compression::Gzip.compress(b"second").unwrap());
    /// let mut reader = Compression::Gzip.wrap_reader(Cursor::new(stream));
    /// let mut decompressed = String::new();
    /// reader.read_to_string(&mut decompressed).unwrap();
    /// assert_eq!(decompressed, "first second");
    /// ```
    pub fn wrap_reader<'a, R: Read + 'a>(&self, reader: R) -> Box<dyn Read + 'a> {
        match self {
            Compression::None => Box::new(reader),
            Compression::Bzip2 => Box::new(BzDecoder::new(reader)),
            Compression::Gzip => Box::new(MultiGzDecoder::new(reader)),
        }
    }
}

/// Open a file and wrap it in whichever decoder its contents call for.
///
/// A 0-byte file reads as empty, even when its name ends in `.gz`.
/// Only opening the file and sniffing its first bytes can fail here. Errors
/// in the compressed stream itself show up later, while reading.
#[instrument(skip(path), fields(path = %path.as_ref().display(), format))]
pub fn open_file(path: impl AsRef<Path>) -> Result<DecodedReader> {
    let path = path.as_ref();
    let file = File::open(path).or_raise(|| ErrorKind::Open(path.to_path_buf()))?;
    let mut peekable = PeekableReader::new(BufReader::new(file));
    let head = peekable.peek(MAGIC_LEN)?;
    // An empty file is empty whatever its name says.
    let format = if head.is_empty() { Compression::None } else { Compression::detect(path, head) };
    tracing::Span::current().record("format", format.as_str());
    Ok(BufReader::new(format.wrap_reader(peekable.into_reader())))
}
