//! Host utilities: build info, settings files, logging, errors.

pub mod build_info;
pub mod errors;
pub mod logging;
pub mod persistence;

pub use errors::{ConfigError, ConfigResult};
