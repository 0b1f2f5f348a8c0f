//! Logging initialization.

use warcdiff::error::{ErrorKind, Result};
use exn::ResultExt;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Install the global subscriber. Everything goes to stdout at INFO, or
/// DEBUG (every parsed entry) when `verbose` is set.
pub fn initialize_logging(verbose: bool) -> Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stdout)
        .finish();
    tracing::subscriber::set_global_default(subscriber).or_raise(|| ErrorKind::Logging)?;
    Ok(())
}
