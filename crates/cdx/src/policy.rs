use crate::error::ErrorKind;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// What to do with an index line that has too few fields.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MalformedLinePolicy {
    /// Fail the whole run, naming the file and line.
    #[default]
    Abort,
    /// Log a warning and carry on with the next line.
    Skip,
}

impl FromStr for MalformedLinePolicy {
    type Err = ErrorKind;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "abort" => Ok(Self::Abort),
            "skip" => Ok(Self::Skip),
            _ => Err(ErrorKind::UnknownPolicy(s.to_string())),
        }
    }
}

impl Display for MalformedLinePolicy {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(match self {
            Self::Abort => "abort",
            Self::Skip => "skip",
        })
    }
}
