//! Host-side error type.
//!
//! The engine itself never fails: collisions and ignored inputs are game
//! events. Everything that can go wrong lives around it (reading settings,
//! validating a tuned config, opening the log file).

use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not determine home directory")]
    NoHomeDir,

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid engine parameter `{field}`: {reason}")]
    InvalidParameter { field: &'static str, reason: String },

    #[error("Unknown variant `{0}` (expected one of: classic, lives, longjump, tophold)")]
    UnknownVariant(String),

    #[error("Invalid command line argument `{arg}`: {reason}")]
    InvalidArgument { arg: String, reason: String },

    #[error("Logging setup failed: {0}")]
    Logging(String),
}

impl ConfigError {
    pub fn invalid<S: Into<String>>(field: &'static str, reason: S) -> Self {
        Self::InvalidParameter {
            field,
            reason: reason.into(),
        }
    }

    pub fn argument<A: Into<String>, R: Into<String>>(arg: A, reason: R) -> Self {
        Self::InvalidArgument {
            arg: arg.into(),
            reason: reason.into(),
        }
    }
}
