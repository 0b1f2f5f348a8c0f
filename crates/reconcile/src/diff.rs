use std::collections::HashSet;
use tracing::instrument;
use warcdiff_core::{Entry, EntryKey};

/// Archive captures that have no identity-equal counterpart in the index.
#[derive(Debug, Default, Clone)]
pub struct Difference {
    entries: Vec<Entry>,
    duplicates: usize,
}

impl Difference {
    /// The missing captures, in the order they first appeared in the archive
    /// collection.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// How many archive entries were dropped before comparing because an
    /// earlier entry already had the same identity.
    pub fn duplicates(&self) -> usize {
        self.duplicates
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Compute `archive - index` by identity (URL and hash).
///
/// The direction matters: this answers "what did we capture that never made
/// it into an index?". Index entries without a matching archive capture are
/// not reported.
///
/// Archive entries are deduplicated first. When several share an identity
/// only the first is kept (provenance included) and the rest are counted in
/// [`Difference::duplicates`].
#[instrument(skip_all, fields(archive = archive.len(), index = index.len()))]
pub fn reconcile(archive: &[Entry], index: &[Entry]) -> Difference {
    let indexed: HashSet<EntryKey<'_>> = index.iter().map(Entry::key).collect();
    let mut seen: HashSet<EntryKey<'_>> = HashSet::with_capacity(archive.len());
    let mut difference = Difference::default();
    for entry in archive {
        if !seen.insert(entry.key()) {
            difference.duplicates += 1;
            continue;
        }
        if !indexed.contains(&entry.key()) {
            difference.entries.push(entry.clone());
        }
    }
    if difference.duplicates > 0 {
        tracing::info!(duplicates = difference.duplicates, "Ignored duplicate WARC entries");
    }
    tracing::info!(count = difference.len(), "WARC entries were found that were not in the CDX entries");
    for entry in &difference.entries {
        tracing::debug!(%entry, "Missing from CDX");
    }
    difference
}
