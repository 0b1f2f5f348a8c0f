use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;
use warcdiff_cdx::MalformedLinePolicy;

/// Command-line arguments.
///
/// Every flag is optional here: anything left out may come from a
/// `WARCDIFF_*` environment variable instead. Only flags that were given are
/// serialized, so they override the environment without clobbering it.
#[derive(Debug, Default, Parser, Serialize)]
#[command(
    name = "warcdiff",
    version,
    about = "Find WARC captures that are missing from the CDX index files",
    after_help = "Every option can also be set with a WARCDIFF_ environment variable, e.g. WARCDIFF_CDX_FILE_FOLDER."
)]
pub struct Cli {
    /// Folder searched recursively for `*warc.gz` files
    #[arg(long, value_name = "DIR")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warc_file_folder: Option<PathBuf>,

    /// Folder searched recursively for `*.cdx.gz` files
    #[arg(long, value_name = "DIR")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cdx_file_folder: Option<PathBuf>,

    /// Folder the results directory is created in [default: current directory]
    #[arg(long, value_name = "DIR")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_folder: Option<PathBuf>,

    /// What to do with a CDX line that has too few fields: `abort` or `skip`
    #[arg(long, value_name = "POLICY")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub malformed_lines: Option<MalformedLinePolicy>,

    /// Increase logging verbosity
    #[arg(long)]
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_command() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse() {
        let cli = Cli::try_parse_from([
            "warcdiff",
            "--warc-file-folder",
            "/data/warc",
            "--cdx-file-folder",
            "~/cdx",
            "--malformed-lines",
            "skip",
            "--verbose",
        ])
        .unwrap();
        assert_eq!(cli.warc_file_folder, Some(PathBuf::from("/data/warc")));
        assert_eq!(cli.cdx_file_folder, Some(PathBuf::from("~/cdx")));
        assert_eq!(cli.output_folder, None);
        assert_eq!(cli.malformed_lines, Some(MalformedLinePolicy::Skip));
        assert!(cli.verbose);
    }

    #[test]
    fn test_parse_invalid_policy() {
        let result = Cli::try_parse_from(["warcdiff", "--malformed-lines", "ignore"]);
        assert!(result.is_err());
    }
}
