use crate::error::{ErrorKind, Result};
use crate::headers;
use exn::ResultExt;
use std::io::{self, BufRead, Read};
use tracing::instrument;

const VERSION_PREFIX: &[u8] = b"WARC/";

/// The header section of one WARC record. The block that follows it has
/// already been skipped by the time a record is handed out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WarcRecord {
    /// Version from the first line, e.g. `1.0` for `WARC/1.0`.
    pub version: String,
    /// Header fields in file order, names as written.
    pub headers: Vec<(String, String)>,
    pub content_length: u64,
}
impl WarcRecord {
    /// Look up a header value. Names are matched case-insensitively, and the
    /// first occurrence wins.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// The `WARC-Type` of the record (`response`, `request`, `warcinfo`, ...).
    pub fn record_type(&self) -> Option<&str> {
        self.header(headers::WARC_TYPE)
    }

    pub fn is_response(&self) -> bool {
        self.record_type().is_some_and(|kind| kind.eq_ignore_ascii_case("response"))
    }
}

/// Streams [`WarcRecord`]s out of a decompressed WARC file.
///
/// Every error is an [`InvalidContainer`](ErrorKind::InvalidContainer):
/// once the stream stops looking like WARC there is no way to find the next
/// record boundary, so the iterator ends after yielding it.
pub struct RecordReader<R> {
    reader: R,
    line: Vec<u8>,
    failed: bool,
}

impl<R: BufRead> RecordReader<R> {
    pub fn new(reader: R) -> Self {
        Self { reader, line: Vec::new(), failed: false }
    }

    /// Read one line into the internal buffer with the line ending removed.
    /// Returns `false` at end of stream.
    fn read_line(&mut self) -> Result<bool> {
        self.line.clear();
        let read = self
            .reader
            .read_until(b'\n', &mut self.line)
            .or_raise(|| ErrorKind::InvalidContainer("failed to read from stream".to_string()))?;
        while matches!(self.line.last(), Some(b'\n' | b'\r')) {
            self.line.pop();
        }
        Ok(read > 0)
    }

    fn invalid(reason: impl Into<String>) -> crate::error::Error {
        exn::Exn::from(ErrorKind::InvalidContainer(reason.into()))
    }

    #[instrument(level = "trace", skip(self))]
    fn read_record(&mut self) -> Result<Option<WarcRecord>> {
        // Records are separated by two CRLFs; be lenient about how many.
        loop {
            if !self.read_line()? {
                return Ok(None);
            }
            if !self.line.is_empty() {
                break;
            }
        }
        let Some(version) = self.line.strip_prefix(VERSION_PREFIX) else {
            return Err(Self::invalid(format!(
                "expected a WARC version line, found `{}`",
                String::from_utf8_lossy(&self.line)
            )));
        };
        let version = String::from_utf8_lossy(version).trim().to_string();

        let mut fields: Vec<(String, String)> = Vec::new();
        loop {
            if !self.read_line()? {
                return Err(Self::invalid("stream ended inside a record header"));
            }
            if self.line.is_empty() {
                break;
            }
            let line = String::from_utf8_lossy(&self.line);
            if line.starts_with([' ', '\t']) {
                // Folded continuation of the previous field's value.
                let Some((_, value)) = fields.last_mut() else {
                    return Err(Self::invalid("header continuation line before any header"));
                };
                value.push(' ');
                value.push_str(line.trim());
                continue;
            }
            let Some((name, value)) = line.split_once(':') else {
                return Err(Self::invalid(format!("invalid header line `{line}`")));
            };
            fields.push((name.trim().to_string(), value.trim().to_string()));
        }

        let mut record = WarcRecord { version, headers: fields, content_length: 0 };
        let content_length = record
            .header(headers::CONTENT_LENGTH)
            .ok_or_else(|| Self::invalid("record has no Content-Length"))?
            .parse::<u64>()
            .or_raise(|| ErrorKind::InvalidContainer("Content-Length is not a number".to_string()))?;
        record.content_length = content_length;

        let skipped = io::copy(&mut (&mut self.reader).take(record.content_length), &mut io::sink())
            .or_raise(|| ErrorKind::InvalidContainer("failed to read record block".to_string()))?;
        if skipped < record.content_length {
            return Err(Self::invalid(format!(
                "record block truncated: expected {} bytes, found {skipped}",
                record.content_length
            )));
        }
        Ok(Some(record))
    }
}

impl<R: BufRead> Iterator for RecordReader<R> {
    type Item = Result<WarcRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let record = self.read_record();
        self.failed = record.is_err();
        record.transpose()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Cursor;

    /// A WARC record with the given headers, a correct `Content-Length`, and
    /// the usual CRLF CRLF trailer.
    pub(crate) fn record(fields: &[(&str, &str)], block: &str) -> String {
        let mut out = String::from("WARC/1.0\r\n");
        for (name, value) in fields {
            out.push_str(&format!("{name}: {value}\r\n"));
        }
        out.push_str(&format!("Content-Length: {}\r\n\r\n{block}\r\n\r\n", block.len()));
        out
    }

    fn read_all(data: &str) -> Vec<Result<WarcRecord>> {
        RecordReader::new(Cursor::new(data.as_bytes())).collect()
    }

    fn failure(results: &[Result<WarcRecord>]) -> String {
        let err = results.last().unwrap().as_ref().unwrap_err();
        match &**err {
            ErrorKind::InvalidContainer(reason) => reason.clone(),
            other => panic!("unexpected error kind: {other}"),
        }
    }

    #[test]
    fn test_read_records() {
        let block = "HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\n\r\nhello";
        let data = record(&[("WARC-Type", "warcinfo")], "software: test\r\n")
            + &record(
                &[
                    ("WARC-Type", "response"),
                    ("WARC-Target-URI", "http://example.com/"),
                    ("WARC-Payload-Digest", "sha1:ABC"),
                ],
                block,
            );
        let records: Vec<WarcRecord> = read_all(&data).into_iter().map(|r| r.unwrap()).collect();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].version, "1.0");
        assert_eq!(records[0].record_type(), Some("warcinfo"));
        assert!(!records[0].is_response());
        assert!(records[1].is_response());
        assert_eq!(records[1].header("warc-target-uri"), Some("http://example.com/"));
        assert_eq!(records[1].header("WARC-PAYLOAD-DIGEST"), Some("sha1:ABC"));
        assert_eq!(records[1].content_length, block.len() as u64);
    }

    #[test]
    fn test_block_looking_like_a_record_is_skipped() {
        let block = record(&[("WARC-Type", "response")], "nested");
        let data = record(&[("WARC-Type", "resource")], &block);
        let records: Vec<_> = read_all(&data).into_iter().map(|r| r.unwrap()).collect();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].record_type(), Some("resource"));
    }

    #[rstest]
    #[case("")]
    #[case("\r\n\r\n")]
    fn test_empty_stream(#[case] data: &str) {
        assert!(read_all(data).is_empty());
    }

    #[test]
    fn test_lenient_record_separators() {
        // No trailer at all after the first block, bare LFs after the second.
        let data = "WARC/1.0\r\nWARC-Type: request\r\nContent-Length: 2\r\n\r\nhi\
                    WARC/1.1\nWARC-Type: metadata\nContent-Length: 0\n\n\n\n";
        let records: Vec<_> = read_all(data).into_iter().map(|r| r.unwrap()).collect();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].version, "1.1");
        assert_eq!(records[1].record_type(), Some("metadata"));
    }

    #[test]
    fn test_folded_header() {
        let data = "WARC/1.0\r\nWARC-Type: response\r\nWARC-Target-URI: http://example.com/\r\n  a-very-long-path\r\n\
                    Content-Length: 0\r\n\r\n\r\n\r\n";
        let records: Vec<_> = read_all(data).into_iter().map(|r| r.unwrap()).collect();
        assert_eq!(records[0].header("WARC-Target-URI"), Some("http://example.com/ a-very-long-path"));
    }

    #[test]
    fn test_first_occurrence_wins() {
        let data = record(&[("WARC-Type", "response"), ("WARC-Type", "request")], "");
        let records: Vec<_> = read_all(&data).into_iter().map(|r| r.unwrap()).collect();
        assert_eq!(records[0].record_type(), Some("response"));
    }

    #[rstest]
    #[case("<html>not a warc</html>\n", "expected a WARC version line")]
    #[case("WARC/1.0\r\nWARC-Type: response\r\n", "stream ended inside a record header")]
    #[case("WARC/1.0\r\nno colon here\r\n\r\n", "invalid header line")]
    #[case("WARC/1.0\r\n continued\r\n\r\n", "header continuation line before any header")]
    #[case("WARC/1.0\r\nWARC-Type: response\r\n\r\n", "record has no Content-Length")]
    #[case("WARC/1.0\r\nContent-Length: many\r\n\r\n", "Content-Length is not a number")]
    #[case("WARC/1.0\r\nContent-Length: 100\r\n\r\nshort", "record block truncated: expected 100 bytes, found 5")]
    fn test_invalid_container(#[case] data: &str, #[case] reason: &str) {
        let results = read_all(data);
        assert!(failure(&results).starts_with(reason), "{}", failure(&results));
    }

    #[test]
    fn test_stops_after_failure() {
        let data = record(&[("WARC-Type", "warcinfo")], "") + "garbage\r\n" + &record(&[("WARC-Type", "request")], "");
        let results = read_all(&data);
        assert_eq!(results.len(), 2);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
    }
}
