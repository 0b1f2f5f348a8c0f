use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use std::path::{Path, PathBuf};
use tracing::instrument;
use walkdir::{DirEntry, WalkDir};

/// Recursively find every file under `root` whose name ends with `suffix`.
///
/// Paths are yielded as absolute paths in a stable order: depth first, with
/// the entries of each directory sorted by file name. Symlinks to files are
/// included; symlinked directories are not descended into.
///
/// A directory that can't be read ends up as an `Err` item rather than
/// stopping the walk, leaving the decision to the caller.
#[instrument(skip(root), fields(root = %root.as_ref().display()))]
pub fn discover<'a, P: AsRef<Path>>(
    root: P,
    suffix: &'a str,
) -> Result<impl Iterator<Item = Result<PathBuf>> + use<'a, P>> {
    let root = root.as_ref();
    let root = std::path::absolute(root).or_raise(|| ErrorKind::InvalidRoot(root.to_path_buf()))?;
    Ok(walk(root, suffix))
}

fn walk(root: PathBuf, suffix: &str) -> impl Iterator<Item = Result<PathBuf>> + '_ {
    let walker = WalkDir::new(&root).sort_by_file_name();
    walker.into_iter().filter_map(move |entry| match entry {
        Ok(entry) => is_match(&entry, suffix).then(|| entry.into_path()).map(Ok),
        Err(err) => {
            let path = err.path().unwrap_or(&root).to_path_buf();
            Some(Err::<PathBuf, _>(err).or_raise(|| ErrorKind::Discovery(path)))
        },
    })
}

fn is_match(entry: &DirEntry, suffix: &str) -> bool {
    let is_file = entry.file_type().is_file() || (entry.path_is_symlink() && entry.path().is_file());
    is_file && entry.file_name().to_string_lossy().ends_with(suffix)
}
