//! Tracing setup
//!
//! The terminal belongs to the UI, so logs only go to a file, and only when
//! `COUNTRYLINE_LOG_FILE` names one.

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::{fmt::time::ChronoLocal, EnvFilter};

/// Filter directives, e.g. `debug` or `countryline=trace`
pub const LOG_FILTER_ENV_VAR: &str = "COUNTRYLINE_LOG";

/// File that receives log output
pub const LOG_FILE_ENV_VAR: &str = "COUNTRYLINE_LOG_FILE";

/// Filter from the environment, or `info` (`debug` when verbose), with noisy
/// dependencies held at `warn`
pub fn build_filter(verbose: bool) -> Result<EnvFilter> {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_env(LOG_FILTER_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    Ok(filter
        .add_directive("reqwest=warn".parse()?)
        .add_directive("hyper=warn".parse()?)
        .add_directive("hyper_util=warn".parse()?)
        .add_directive("rustls=warn".parse()?))
}

/// Install the global subscriber. Returns whether logging is active.
pub fn init(verbose: bool) -> Result<bool> {
    let Some(log_file) = std::env::var_os(LOG_FILE_ENV_VAR) else {
        return Ok(false);
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file)
        .with_context(|| format!("Failed to open log file {}", log_file.to_string_lossy()))?;

    tracing_subscriber::fmt()
        .with_env_filter(build_filter(verbose)?)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_timer(ChronoLocal::rfc_3339())
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {e}"))?;

    tracing::info!("countryline {} logging started", env!("CARGO_PKG_VERSION"));
    Ok(true)
}
