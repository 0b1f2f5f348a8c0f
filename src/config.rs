//! Run configuration.
//!
//! Layers, later winning: built-in defaults, `WARCDIFF_*` environment
//! variables, then whatever the command line set explicitly. There is no
//! configuration file.

use crate::error::{ErrorKind, Result};
use directories::BaseDirs;
use exn::ResultExt;
use figment::Figment;
use figment::providers::{Env, Serialized};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use warcdiff_cdx::MalformedLinePolicy;

pub const ENV_PREFIX: &str = "WARCDIFF_";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub cdx_file_folder: PathBuf,
    pub warc_file_folder: PathBuf,
    pub output_folder: PathBuf,
    pub malformed_lines: MalformedLinePolicy,
    pub verbose: bool,
}

/// The three configured folders, resolved and checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Folders {
    pub cdx: PathBuf,
    pub warc: PathBuf,
    pub output: PathBuf,
}

impl Config {
    /// Merge defaults, the environment, and `overrides` (any serializable
    /// value with some or all of the fields of [`Config`]).
    pub fn figment(overrides: &impl Serialize) -> Figment {
        Figment::new()
            .merge(Serialized::default("output_folder", "."))
            .merge(Serialized::default("malformed_lines", MalformedLinePolicy::default()))
            .merge(Serialized::default("verbose", false))
            .merge(Env::prefixed(ENV_PREFIX))
            .merge(Serialized::defaults(overrides))
    }

    pub fn load(overrides: &impl Serialize) -> Result<Self> {
        Self::figment(overrides).extract().or_raise(|| ErrorKind::Config)
    }

    /// Resolve every folder, failing on the first that isn't an existing
    /// directory.
    pub fn folders(&self) -> Result<Folders> {
        Ok(Folders {
            cdx: resolve_directory(&self.cdx_file_folder)?,
            warc: resolve_directory(&self.warc_file_folder)?,
            output: resolve_directory(&self.output_folder)?,
        })
    }
}

/// Replace a leading `~` component with the user's home directory.
pub fn expand_home(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    match BaseDirs::new() {
        Some(dirs) => dirs.home_dir().join(rest),
        None => path.to_path_buf(),
    }
}

/// Expand `~`, make absolute with every symlink resolved, and require an
/// existing directory.
pub fn resolve_directory(path: &Path) -> Result<PathBuf> {
    let expanded = expand_home(path);
    let resolved = expanded
        .canonicalize()
        .or_raise(|| ErrorKind::InvalidDirectory(expanded.clone()))?;
    if !resolved.is_dir() {
        exn::bail!(ErrorKind::InvalidDirectory(resolved));
    }
    Ok(resolved)
}
