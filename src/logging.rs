//! Diagnostic logging setup.
//!
//! Logs go to stderr so stdout carries rendered results only.

use std::sync::Once;

use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*, util::TryInitError};

/// Environment variable holding the log filter directive
pub const LOG_ENV: &str = "OPTIMIZEQL_LOG";

/// Filter used when neither the environment nor the config sets one
pub const DEFAULT_FILTER: &str = "optimizeql=warn";

static INIT: Once = Once::new();

/// Install the global tracing subscriber.
///
/// Filter precedence: `OPTIMIZEQL_LOG`, then `config_filter`, then
/// `optimizeql=warn`. Calling it more than once is a no-op.
pub fn init_logging(config_filter: Option<&str>) {
    INIT.call_once(|| {
        if let Err(e) = install(config_filter) {
            debug!(error = %e, "keeping previously installed tracing subscriber");
        }
    });
}

fn install(config_filter: Option<&str>) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(config_filter.unwrap_or(DEFAULT_FILTER)))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
        )
        .with(filter)
        .try_init()
}
