mod cli;
mod logging;

use crate::cli::Cli;
use clap::Parser;
use std::process::ExitCode;
use warcdiff::config::Config;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = Config::load(&cli);
    // A broken configuration still needs a logger to be reported through.
    let verbose = config.as_ref().map_or(cli.verbose, |config| config.verbose);
    if let Err(err) = logging::initialize_logging(verbose) {
        eprintln!("{err:?}");
        return ExitCode::FAILURE;
    }
    let result = config.and_then(|config| {
        tracing::debug!(?config, "Loaded configuration");
        warcdiff::run(&config)
    });
    match result {
        Ok(_) => {
            tracing::info!("Done!");
            ExitCode::SUCCESS
        },
        Err(err) => {
            tracing::error!("Something went wrong!\n{err:?}");
            ExitCode::FAILURE
        },
    }
}
