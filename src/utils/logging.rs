//! Tracing setup. The terminal belongs to the UI, so events only go to a file.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "tabchat=info";

pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install a global subscriber appending to `log_file`. Without a file no
/// subscriber is installed and events are discarded.
pub fn init_tracing(log_file: Option<&Path>) -> Result<bool, Box<dyn std::error::Error>> {
    let Some(path) = log_file else {
        return Ok(false);
    };

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|err| -> Box<dyn std::error::Error> { err })?;
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "logging started");
    Ok(true)
}
