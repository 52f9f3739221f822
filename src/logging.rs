// src/logging.rs

//! Logging setup for `stylepipe` using `tracing` + `tracing-subscriber`.
//!
//! Priority for determining the filter:
//! 1. `--log-level` CLI flag (if provided)
//! 2. `STYLEPIPE_LOG` environment variable, which accepts full
//!    `EnvFilter` directives (e.g. "debug" or "stylepipe::watch=trace")
//! 3. default to `info`
//!
//! Logs go to STDERR; the compiler's stdout is consumed by the pipeline.

use anyhow::{Result, anyhow};
use tracing_subscriber::{EnvFilter, fmt};

use crate::cli::LogLevel;

/// Environment variable consulted when no `--log-level` flag is given.
pub const LOG_ENV_VAR: &str = "STYLEPIPE_LOG";

/// Initialise the global logging subscriber.
///
/// Fails if the environment filter is malformed or a subscriber is already
/// installed.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let filter = match cli_level {
        Some(lvl) => EnvFilter::new(lvl.as_directive()),
        None => filter_from_env()?,
    };

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("installing tracing subscriber: {e}"))?;

    Ok(())
}

fn filter_from_env() -> Result<EnvFilter> {
    match std::env::var(LOG_ENV_VAR) {
        Ok(spec) if !spec.trim().is_empty() => EnvFilter::try_new(spec.trim())
            .map_err(|e| anyhow!("invalid {LOG_ENV_VAR} value {spec:?}: {e}")),
        _ => Ok(EnvFilter::new("info")),
    }
}
