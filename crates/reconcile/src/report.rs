use crate::diff::Difference;
use crate::error::{ErrorKind, Result};
use crate::store::EntryStore;
use derive_more::Display;
use exn::ResultExt;
use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::instrument;
use warcdiff_core::Entry;

const DIRECTORY_SUFFIX: &str = "ms_dl_comp_results";

/// The Unix timestamp (seconds) captured once per run. Every name in a report
/// is prefixed with it.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RunStamp(i64);

impl RunStamp {
    pub fn now() -> Self {
        Self(time::OffsetDateTime::now_utc().unix_timestamp())
    }

    pub fn from_unix(seconds: i64) -> Self {
        Self(seconds)
    }

    pub fn as_unix(&self) -> i64 {
        self.0
    }
}

/// Where each report file lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPaths {
    pub directory: PathBuf,
    pub archive_entries: PathBuf,
    pub index_entries: PathBuf,
    pub differences: PathBuf,
    pub archive_errors: PathBuf,
    pub files_to_save: PathBuf,
}

impl ReportPaths {
    fn new(root: &Path, stamp: RunStamp) -> Self {
        let directory = root.join(format!("{stamp}_{DIRECTORY_SUFFIX}"));
        let file = |name: &str| directory.join(format!("{stamp}_{name}.txt"));
        Self {
            archive_entries: file("warc_entries"),
            index_entries: file("cdx_entries"),
            differences: file("differences"),
            archive_errors: file("warc_errors"),
            files_to_save: file("warc_files_to_save"),
            directory,
        }
    }
}

/// Archive files worth keeping: every file that failed to parse, then every
/// file that holds a capture missing from the index. No path is listed twice.
pub fn files_to_save(errors: &[PathBuf], difference: &[Entry]) -> Vec<PathBuf> {
    let mut seen: HashSet<&Path> = HashSet::new();
    errors
        .iter()
        .map(PathBuf::as_path)
        .chain(difference.iter().map(Entry::found_in_file))
        .filter(|path| seen.insert(path))
        .map(Path::to_path_buf)
        .collect()
}

/// Persists one run as plain text under `<root>/<stamp>_ms_dl_comp_results/`.
pub struct ReportWriter {
    paths: ReportPaths,
}

impl ReportWriter {
    pub fn new(root: impl AsRef<Path>, stamp: RunStamp) -> Self {
        Self { paths: ReportPaths::new(root.as_ref(), stamp) }
    }

    pub fn paths(&self) -> &ReportPaths {
        &self.paths
    }

    /// Create the report directory and write all five files.
    ///
    /// The directory must not exist yet; an existing one is never written
    /// into. Nothing is cleaned up if a later file fails.
    #[instrument(skip_all, fields(directory = %self.paths.directory.display()))]
    pub fn write(&self, store: &EntryStore, difference: &Difference) -> Result<ReportPaths> {
        let paths = &self.paths;
        if let Err(err) = fs::create_dir(&paths.directory) {
            let kind = match err.kind() {
                io::ErrorKind::AlreadyExists => ErrorKind::OutputExists(paths.directory.clone()),
                _ => ErrorKind::CreateDirectory(paths.directory.clone()),
            };
            return Err::<ReportPaths, _>(err).or_raise(|| kind);
        }
        tracing::info!(directory = %paths.directory.display(), "Writing results");

        write_entries(&paths.archive_entries, store.archive())?;
        write_entries(&paths.index_entries, store.index())?;
        write_entries(&paths.differences, difference.entries())?;
        write_paths(&paths.archive_errors, store.archive_errors())?;
        write_paths(&paths.files_to_save, &files_to_save(store.archive_errors(), difference.entries()))?;
        Ok(paths.clone())
    }
}

fn write_file(path: &Path, contents: impl FnOnce(&mut BufWriter<File>) -> io::Result<()>) -> Result<()> {
    let write = || -> io::Result<()> {
        let mut writer = BufWriter::new(File::create_new(path)?);
        contents(&mut writer)?;
        writer.flush()
    };
    write().or_raise(|| ErrorKind::Write(path.to_path_buf()))?;
    tracing::debug!(path = %path.display(), "Wrote report file");
    Ok(())
}

/// One JSON object per entry, each followed by a blank line.
fn write_entries(path: &Path, entries: &[Entry]) -> Result<()> {
    write_file(path, |writer| {
        for entry in entries {
            serde_json::to_writer(&mut *writer, entry)?;
            writer.write_all(b"\n\n")?;
        }
        Ok(())
    })
}

fn write_paths(path: &Path, paths: &[PathBuf]) -> Result<()> {
    write_file(path, |writer| {
        for line in paths {
            writeln!(writer, "{}", line.display())?;
        }
        Ok(())
    })
}
