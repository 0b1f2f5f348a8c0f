use serde::{Serialize, Serializer};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

/// Which source an [`Entry`] was read from. Provenance only; never part of
/// an entry's identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntryKind {
    /// A line of a CDX index file.
    Index,
    /// A `response` record of a WARC file.
    Archive,
}
impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Index => "INDEX",
            Self::Archive => "ARCHIVE",
        }
    }
}
impl Display for EntryKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// The identity of a capture: decoded URL plus payload hash.
///
/// Two entries describe the same capture exactly when their keys are equal,
/// whichever file or source they came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryKey<'a> {
    pub full_url: &'a str,
    pub file_hash: &'a str,
}

/// One captured resource, as seen by either the index or an archive.
///
/// Equality and hashing only look at [`key`](Self::key); `entry_type` and
/// `found_in_file` are carried along for the report and nothing else.
#[derive(Debug, Clone, Serialize)]
pub struct Entry {
    full_url: String,
    file_hash: String,
    entry_type: EntryKind,
    #[serde(serialize_with = "serialize_path_lossy")]
    found_in_file: PathBuf,
}

/// File names aren't guaranteed to be UTF-8; invalid bytes become U+FFFD.
fn serialize_path_lossy<S: Serializer, P: AsRef<Path>>(path: &P, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&path.as_ref().to_string_lossy())
}
impl Entry {
    /// `full_url` is expected to already be percent-decoded, and `file_hash`
    /// to have had any algorithm prefix removed.
    pub fn new(
        entry_type: EntryKind,
        full_url: impl Into<String>,
        file_hash: impl Into<String>,
        found_in_file: impl Into<PathBuf>,
    ) -> Self {
        Self {
            full_url: full_url.into(),
            file_hash: file_hash.into(),
            entry_type,
            found_in_file: found_in_file.into(),
        }
    }

    pub fn index(full_url: impl Into<String>, file_hash: impl Into<String>, found_in_file: impl Into<PathBuf>) -> Self {
        Self::new(EntryKind::Index, full_url, file_hash, found_in_file)
    }

    pub fn archive(full_url: impl Into<String>, file_hash: impl Into<String>, found_in_file: impl Into<PathBuf>) -> Self {
        Self::new(EntryKind::Archive, full_url, file_hash, found_in_file)
    }

    pub fn key(&self) -> EntryKey<'_> {
        EntryKey {
            full_url: &self.full_url,
            file_hash: &self.file_hash,
        }
    }

    pub fn full_url(&self) -> &str {
        &self.full_url
    }

    pub fn file_hash(&self) -> &str {
        &self.file_hash
    }

    pub fn entry_type(&self) -> EntryKind {
        self.entry_type
    }

    pub fn found_in_file(&self) -> &Path {
        &self.found_in_file
    }
}
impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}
impl Eq for Entry {}
impl Hash for Entry {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}
impl Display for Entry {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "{} {} ({}, {})",
            self.full_url,
            self.file_hash,
            self.entry_type,
            self.found_in_file.display()
        )
    }
}
