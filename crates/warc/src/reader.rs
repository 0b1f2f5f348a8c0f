use crate::error::{ErrorKind, Result};
use crate::{ARCHIVE_SUFFIX, RecordReader, WarcRecord, headers};
use exn::{OptionExt, ResultExt};
use std::io::BufRead;
use std::path::{Path, PathBuf};
use tracing::instrument;
use warcdiff_compress::{DecodedReader, open_file};
use warcdiff_core::{Entry, decode_url, discover, strip_digest_prefix};

/// Lazily turns the `response` records of one archive file into [`Entry`]
/// values; every other record type is skipped.
pub struct ArchiveReader<R> {
    records: RecordReader<R>,
    path: PathBuf,
}

impl ArchiveReader<DecodedReader> {
    /// Open an archive file, decompressing it as needed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let reader = open_file(path).or_raise(|| ErrorKind::Open(path.to_path_buf()))?;
        Ok(Self::new(reader, path))
    }
}

impl<R: BufRead> ArchiveReader<R> {
    /// `path` is recorded as the provenance of every entry produced.
    pub fn new(reader: R, path: impl Into<PathBuf>) -> Self {
        Self {
            records: RecordReader::new(reader),
            path: path.into(),
        }
    }

    fn entry(&self, record: &WarcRecord) -> Result<Entry> {
        let digest = record
            .header(headers::WARC_PAYLOAD_DIGEST)
            .ok_or_raise(|| ErrorKind::MissingHeader(headers::WARC_PAYLOAD_DIGEST))?;
        let target = record
            .header(headers::WARC_TARGET_URI)
            .ok_or_raise(|| ErrorKind::MissingHeader(headers::WARC_TARGET_URI))?;
        // WARC/1.1 drafts briefly wrapped the URI in angle brackets.
        let target = target.strip_prefix('<').and_then(|t| t.strip_suffix('>')).unwrap_or(target);
        Ok(Entry::archive(decode_url(target), strip_digest_prefix(digest), &self.path))
    }
}

impl<R: BufRead> Iterator for ArchiveReader<R> {
    type Item = Result<Entry>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let record = match self.records.next()? {
                Ok(record) => record,
                Err(err) => return Some(Err(err)),
            };
            if !record.is_response() {
                continue;
            }
            let entry = self.entry(&record);
            if let Ok(entry) = &entry {
                tracing::debug!(%entry, "WARC entry");
            }
            return Some(entry);
        }
    }
}

/// Everything read from an archive directory.
#[derive(Debug, Default)]
pub struct ArchiveLoad {
    /// Entries from every file, in discovery order. Entries read from a file
    /// before it turned out to be broken are kept.
    pub entries: Vec<Entry>,
    /// Files that failed as WARC containers, in discovery order.
    pub failed_files: Vec<PathBuf>,
}

/// Read every response entry of a single archive file.
///
/// Strict: a broken container is an error here. Use [`read_directory`] for
/// the tolerant behaviour.
#[instrument(skip(path), fields(path = %path.as_ref().display()))]
pub fn read_file(path: impl AsRef<Path>) -> Result<Vec<Entry>> {
    let mut entries = Vec::new();
    read_into(path.as_ref(), &mut entries)?;
    Ok(entries)
}

fn read_into(path: &Path, entries: &mut Vec<Entry>) -> Result<usize> {
    tracing::info!(path = %path.display(), "On WARC file");
    let before = entries.len();
    for entry in ArchiveReader::open(path)? {
        entries.push(entry?);
    }
    let count = entries.len() - before;
    tracing::info!(count, path = %path.display(), "Loaded entries from WARC file");
    Ok(count)
}

/// Read every `*warc.gz` file below `root`, in discovery order.
///
/// A file that fails as a WARC container is logged, listed in
/// [`ArchiveLoad::failed_files`], and skipped. Any other error (an
/// unreadable directory, a file that can't be opened, a response record
/// without the headers we need) stops the whole read.
#[instrument(skip(root), fields(root = %root.as_ref().display()))]
pub fn read_directory(root: impl AsRef<Path>) -> Result<ArchiveLoad> {
    let mut load = ArchiveLoad::default();
    for path in discover(root, ARCHIVE_SUFFIX).or_raise(|| ErrorKind::Discovery)? {
        let path = path.or_raise(|| ErrorKind::Discovery)?;
        match read_into(&path, &mut load.entries) {
            Ok(_) => {},
            Err(err) if err.is_container_failure() => {
                let kind: &ErrorKind = &err;
                tracing::error!(path = %path.display(), error = %kind, "WARC file failed to load, skipping");
                load.failed_files.push(path);
            },
            Err(err) => return Err(err),
        }
    }
    tracing::info!(
        total = load.entries.len(),
        failed = load.failed_files.len(),
        "Loaded total WARC entries"
    );
    Ok(load)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::tests::record;
    use rstest::rstest;
    use std::fs;
    use std::io::Cursor;
    use tempfile::TempDir;
    use warcdiff_compress::Compression;
    use warcdiff_core::EntryKind;

    fn response(uri: &str, digest: &str) -> String {
        record(
            &[
                ("WARC-Type", "response"),
                ("WARC-Target-URI", uri),
                ("WARC-Payload-Digest", digest),
            ],
            "HTTP/1.1 200 OK\r\n\r\nbody",
        )
    }

    fn other(kind: &str) -> String {
        record(&[("WARC-Type", kind), ("WARC-Target-URI", "http://example.com/")], "GET / HTTP/1.1\r\n\r\n")
    }

    /// Gzip each record as its own member, the way crawlers write them.
    fn write_warc(dir: &Path, name: &str, records: &[String]) -> PathBuf {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        let mut data = Vec::new();
        for record in records {
            data.extend(Compression::Gzip.compress(record.as_bytes()).unwrap());
        }
        fs::write(&path, data).unwrap();
        path
    }

    fn from_str(data: &str) -> Vec<Result<Entry>> {
        ArchiveReader::new(Cursor::new(data.as_bytes()), "/warc/test.warc.gz").collect()
    }

    #[rstest]
    #[case(0, 0)]
    #[case(3, 0)]
    #[case(0, 4)]
    #[case(2, 5)]
    fn test_only_responses(#[case] responses: usize, #[case] others: usize) {
        let mut data = other("warcinfo");
        for i in 0..responses.max(others) {
            if i < others {
                data.push_str(&other(if i % 2 == 0 { "request" } else { "metadata" }));
            }
            if i < responses {
                data.push_str(&response(&format!("http://example.com/{i}"), &format!("sha1:HASH{i}")));
            }
        }
        let entries: Vec<Entry> = from_str(&data).into_iter().map(|e| e.unwrap()).collect();
        assert_eq!(entries.len(), responses);
        for (i, entry) in entries.iter().enumerate() {
            assert_eq!(entry.full_url(), format!("http://example.com/{i}"));
            assert_eq!(entry.file_hash(), format!("HASH{i}"));
            assert_eq!(entry.entry_type(), EntryKind::Archive);
            assert_eq!(entry.found_in_file(), Path::new("/warc/test.warc.gz"));
        }
    }

    #[rstest]
    #[case("http://example.com/", "sha1:ABCDEF", "http://example.com/", "ABCDEF")]
    #[case("http://example.com/", "ABCDEF", "http://example.com/", "ABCDEF")]
    #[case("http%3A%2F%2Fexample.com%2Ffoo%20bar", "sha1:X", "http://example.com/foo bar", "X")]
    #[case("<http://example.com/>", "sha256:X", "http://example.com/", "X")]
    fn test_entry_values(#[case] uri: &str, #[case] digest: &str, #[case] url: &str, #[case] hash: &str) {
        let entries = from_str(&response(uri, digest));
        let entry = entries[0].as_ref().unwrap();
        assert_eq!(entry.full_url(), url);
        assert_eq!(entry.file_hash(), hash);
    }

    #[rstest]
    #[case("WARC-Payload-Digest")]
    #[case("WARC-Target-URI")]
    fn test_missing_header(#[case] missing: &'static str) {
        let fields: Vec<(&str, &str)> = [
            ("WARC-Type", "response"),
            ("WARC-Target-URI", "http://example.com/"),
            ("WARC-Payload-Digest", "sha1:ABC"),
        ]
        .into_iter()
        .filter(|(name, _)| *name != missing)
        .collect();
        let results = from_str(&record(&fields, ""));
        let err = results[0].as_ref().unwrap_err();
        assert_eq!(**err, ErrorKind::MissingHeader(missing));
        assert!(!err.is_container_failure());
    }

    #[test]
    fn test_read_file_multi_member() {
        let dir = TempDir::new().unwrap();
        let path = write_warc(
            dir.path(),
            "crawl.warc.gz",
            &[other("warcinfo"), other("request"), response("http://a/", "sha1:A"), response("http://b/", "sha1:B")],
        );
        let entries = read_file(&path).unwrap();
        let urls: Vec<&str> = entries.iter().map(Entry::full_url).collect();
        assert_eq!(urls, ["http://a/", "http://b/"]);
        assert!(entries.iter().all(|e| e.found_in_file() == path));
    }

    #[test]
    fn test_read_file_corrupt_is_container_failure() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.warc.gz");
        let mut data = Compression::Gzip.compress(response("http://a/", "sha1:A").as_bytes()).unwrap();
        data.truncate(data.len() - 10);
        fs::write(&path, data).unwrap();
        let err = read_file(&path).unwrap_err();
        assert!(err.is_container_failure());
    }

    #[test]
    fn test_read_file_missing_is_fatal() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.warc.gz");
        let err = read_file(&path).unwrap_err();
        assert_eq!(*err, ErrorKind::Open(path));
        assert!(!err.is_container_failure());
    }

    #[test]
    fn test_read_directory_tolerates_broken_files() {
        let dir = TempDir::new().unwrap();
        write_warc(dir.path(), "a.warc.gz", &[response("http://a/", "sha1:A")]);
        // Not a WARC at all, but named like one.
        let broken = dir.path().join("b.warc.gz");
        fs::write(&broken, Compression::Gzip.compress(b"<html></html>").unwrap()).unwrap();
        write_warc(dir.path(), "c/c.warc.gz", &[response("http://c/", "sha1:C")]);
        // Ignored: wrong suffix.
        write_warc(dir.path(), "d.warc", &[response("http://d/", "sha1:D")]);

        let load = read_directory(dir.path()).unwrap();
        let urls: Vec<&str> = load.entries.iter().map(Entry::full_url).collect();
        assert_eq!(urls, ["http://a/", "http://c/"]);
        assert_eq!(load.failed_files, [broken]);
    }

    #[test]
    fn test_read_directory_keeps_entries_before_failure() {
        let dir = TempDir::new().unwrap();
        let path = write_warc(
            dir.path(),
            "partial.warc.gz",
            &[response("http://a/", "sha1:A"), "WARC/1.0\r\nContent-Length: 50\r\n\r\nshort".to_string()],
        );
        let load = read_directory(dir.path()).unwrap();
        assert_eq!(load.entries.len(), 1);
        assert_eq!(load.failed_files, [path]);
    }

    #[test]
    fn test_read_directory_empty_file_is_not_a_failure() {
        let dir = TempDir::new().unwrap();
        write_warc(dir.path(), "a.warc.gz", &[response("http://a/", "sha1:A")]);
        fs::write(dir.path().join("empty.warc.gz"), b"").unwrap();
        let load = read_directory(dir.path()).unwrap();
        assert_eq!(load.entries.len(), 1);
        assert!(load.failed_files.is_empty());
    }

    #[test]
    fn test_read_directory_missing_header_is_fatal() {
        let dir = TempDir::new().unwrap();
        write_warc(dir.path(), "a.warc.gz", &[record(&[("WARC-Type", "response")], "")]);
        let err = read_directory(dir.path()).unwrap_err();
        assert!(matches!(*err, ErrorKind::MissingHeader(_)));
    }
}
