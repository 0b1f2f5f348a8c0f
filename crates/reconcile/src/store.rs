use crate::diff::{Difference, reconcile};
use std::path::PathBuf;
use warcdiff_core::Entry;

/// The entries read from both sources during one run, plus the archive files
/// that couldn't be read.
///
/// Append-only: entries keep the order they were read in.
#[derive(Debug, Default, Clone)]
pub struct EntryStore {
    index: Vec<Entry>,
    archive: Vec<Entry>,
    archive_errors: Vec<PathBuf>,
}

impl EntryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extend_index(&mut self, entries: impl IntoIterator<Item = Entry>) {
        self.index.extend(entries);
    }

    pub fn extend_archive(&mut self, entries: impl IntoIterator<Item = Entry>) {
        self.archive.extend(entries);
    }

    pub fn push_archive_error(&mut self, path: impl Into<PathBuf>) {
        self.archive_errors.push(path.into());
    }

    pub fn index(&self) -> &[Entry] {
        &self.index
    }

    pub fn archive(&self) -> &[Entry] {
        &self.archive
    }

    pub fn archive_errors(&self) -> &[PathBuf] {
        &self.archive_errors
    }

    /// Archive captures missing from the index. See [`reconcile`].
    pub fn reconcile(&self) -> Difference {
        reconcile(&self.archive, &self.index)
    }
}
