use crate::error::{ErrorKind, Result};
use crate::{INDEX_SUFFIX, IndexLine, MalformedLinePolicy};
use exn::ResultExt;
use std::io::{BufRead, Lines};
use std::iter::Enumerate;
use std::path::{Path, PathBuf};
use tracing::instrument;
use warcdiff_compress::{DecodedReader, open_file};
use warcdiff_core::{Entry, discover};

/// Lazily turns the lines of one index file into [`Entry`] values.
///
/// The first line is always treated as the legend and skipped, whatever it
/// contains. Blank lines are ignored. After the first error the iterator is
/// exhausted.
pub struct IndexReader<R> {
    lines: Enumerate<Lines<R>>,
    path: PathBuf,
    policy: MalformedLinePolicy,
    failed: bool,
}

impl IndexReader<DecodedReader> {
    /// Open an index file, decompressing it as needed.
    pub fn open(path: impl AsRef<Path>, policy: MalformedLinePolicy) -> Result<Self> {
        let path = path.as_ref();
        let reader = open_file(path).or_raise(|| ErrorKind::Open(path.to_path_buf()))?;
        Ok(Self::new(reader, path, policy))
    }
}

impl<R: BufRead> IndexReader<R> {
    /// `path` is recorded as the provenance of every entry produced.
    pub fn new(reader: R, path: impl Into<PathBuf>, policy: MalformedLinePolicy) -> Self {
        Self {
            lines: reader.lines().enumerate(),
            path: path.into(),
            policy,
            failed: false,
        }
    }

    fn fail(&mut self, kind: ErrorKind) -> Option<Result<Entry>> {
        self.failed = true;
        Some(Err(exn::Exn::from(kind)))
    }
}

impl<R: BufRead> Iterator for IndexReader<R> {
    type Item = Result<Entry>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        loop {
            let (index, line) = self.lines.next()?;
            let number = index + 1;
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    self.failed = true;
                    let path = &self.path;
                    return Some(Err::<Entry, _>(err).or_raise(|| ErrorKind::Read { path: path.clone(), line: number }));
                },
            };
            if index == 0 || line.trim().is_empty() {
                continue;
            }
            match IndexLine::parse(&line) {
                Ok(parsed) => {
                    let entry = parsed.into_entry(&self.path);
                    tracing::debug!(%entry, "CDX entry");
                    return Some(Ok(entry));
                },
                Err(fields) => match self.policy {
                    MalformedLinePolicy::Abort => {
                        let path = self.path.clone();
                        return self.fail(ErrorKind::MalformedLine { path, line: number, fields });
                    },
                    MalformedLinePolicy::Skip => {
                        tracing::warn!(path = %self.path.display(), line = number, fields, "Skipping malformed CDX line");
                    },
                },
            }
        }
    }
}

/// Read every entry of a single index file.
#[instrument(skip(path), fields(path = %path.as_ref().display()))]
pub fn read_file(path: impl AsRef<Path>, policy: MalformedLinePolicy) -> Result<Vec<Entry>> {
    let path = path.as_ref();
    tracing::info!(path = %path.display(), "On CDX file");
    let entries = IndexReader::open(path, policy)?.collect::<Result<Vec<_>>>()?;
    tracing::info!(count = entries.len(), path = %path.display(), "Loaded entries from CDX file");
    Ok(entries)
}

/// Read every `*.cdx.gz` file below `root`, in discovery order.
///
/// Any failure, including a malformed line under
/// [`MalformedLinePolicy::Abort`], stops the whole read.
#[instrument(skip(root), fields(root = %root.as_ref().display()))]
pub fn read_directory(root: impl AsRef<Path>, policy: MalformedLinePolicy) -> Result<Vec<Entry>> {
    let mut entries = Vec::new();
    for path in discover(root, INDEX_SUFFIX).or_raise(|| ErrorKind::Discovery)? {
        let path = path.or_raise(|| ErrorKind::Discovery)?;
        entries.extend(read_file(&path, policy)?);
    }
    tracing::info!(total = entries.len(), "Loaded total CDX entries");
    Ok(entries)
}
