//! File-backed tracing subscriber.
//!
//! The terminal belongs to the game screen, so log lines go to
//! ~/.hopper/hopper.log instead of stderr.

use super::errors::{ConfigError, ConfigResult};
use super::persistence::data_path;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

pub const LOG_FILE: &str = "hopper.log";
pub const DEFAULT_FILTER: &str = "hopper=info";

/// `RUST_LOG` wins over the settings file, which wins over the default.
pub fn resolve_filter(configured: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(configured.unwrap_or(DEFAULT_FILTER)))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber. Returns the log file path.
pub fn init(configured_filter: Option<&str>) -> ConfigResult<PathBuf> {
    let path = data_path(LOG_FILE)?;
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    tracing_subscriber::fmt()
        .with_env_filter(resolve_filter(configured_filter))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|e| ConfigError::Logging(e.to_string()))?;

    Ok(path)
}
