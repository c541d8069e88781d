//! JSON files under ~/.hopper/.

use super::errors::{ConfigError, ConfigResult};
use serde::de::DeserializeOwned;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Get the ~/.hopper/ directory path, creating it if needed.
pub fn hopper_dir() -> ConfigResult<PathBuf> {
    let home_dir = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
    let dir = home_dir.join(".hopper");
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Get the full path for a file in ~/.hopper/.
pub fn data_path(filename: &str) -> ConfigResult<PathBuf> {
    Ok(hopper_dir()?.join(filename))
}

/// Read a JSON file. A missing file is `Ok(None)`; a malformed one is an error.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> ConfigResult<Option<T>> {
    let json = match fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    serde_json::from_str(&json)
        .map(Some)
        .map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
}

/// Like [`load_json`], falling back to `T::default()` when the file is missing.
pub fn load_json_or_default<T: Default + DeserializeOwned>(path: &Path) -> ConfigResult<T> {
    Ok(load_json(path)?.unwrap_or_default())
}
