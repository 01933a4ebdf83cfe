//! Tracing setup.
//!
//! Events go to stderr so stdout stays clean for the report and ASCII plot.
//! The filter comes from `STUDY_FIT_LOG` (an `EnvFilter` directive), falling
//! back to `study_fit=warn`, or `study_fit=debug` with `--verbose`.

use tracing_subscriber::EnvFilter;

use crate::error::AppError;

pub const LOG_ENV: &str = "STUDY_FIT_LOG";

fn default_directive(verbose: bool) -> &'static str {
    if verbose { "study_fit=debug" } else { "study_fit=warn" }
}

/// Install the global subscriber. Call once, before any work.
pub fn init(verbose: bool) -> Result<(), AppError> {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(default_directive(verbose)))
        .map_err(|e| AppError::new(2, format!("Invalid log filter: {e}")))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .try_init()
        .map_err(|e| AppError::new(4, format!("Failed to initialize logging: {e}")))
}
