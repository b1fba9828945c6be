//! Logging initialization.
//!
//! Logs go to stderr; stdout is reserved for the report.

use tracing::{debug, trace};
use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// Build the log filter: `RUST_LOG` when set, otherwise the config's level.
pub fn env_filter(config: &Config) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.log_level()))
}

/// Install the global subscriber. Call once, from the binary.
pub fn init_logging(config: &Config) {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .with_writer(std::io::stderr)
        .with_target(config.verbose >= 2)
        .with_line_number(config.verbose >= 3)
        .init();

    debug!("rewards-points started with verbosity level: {}", config.verbose);
    trace!("Full CLI args: {:?}", std::env::args().collect::<Vec<_>>());
}
