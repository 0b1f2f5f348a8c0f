//! Find web archive captures that are missing from their CDX indexes.
//!
//! [`run`] drives one comparison: every index file is read, then every
//! archive file, then the archive captures the index doesn't know about are
//! written out alongside everything that was read.

pub mod config;
pub mod error;

use crate::config::Config;
use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use tracing::instrument;
use warcdiff_reconcile::{EntryStore, ReportPaths, ReportWriter, RunStamp};

/// Run the whole pipeline and return where the results were written.
#[instrument(skip_all)]
pub fn run(config: &Config) -> Result<ReportPaths> {
    let folders = config.folders()?;
    // One stamp for the whole run, taken before any work starts.
    let stamp = RunStamp::now();
    let mut store = EntryStore::new();

    let index =
        warcdiff_cdx::read_directory(&folders.cdx, config.malformed_lines).or_raise(|| ErrorKind::Index)?;
    store.extend_index(index);

    let archive = warcdiff_warc::read_directory(&folders.warc).or_raise(|| ErrorKind::Archive)?;
    store.extend_archive(archive.entries);
    for path in archive.failed_files {
        store.push_archive_error(path);
    }

    let difference = store.reconcile();
    let paths = ReportWriter::new(&folders.output, stamp)
        .write(&store, &difference)
        .or_raise(|| ErrorKind::Report)?;
    tracing::info!(directory = %paths.directory.display(), "Results written");
    Ok(paths)
}
