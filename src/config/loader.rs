// src/config/loader.rs

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::Result;

/// Environment variable consulted when no `--config` flag is given.
pub const CONFIG_ENV: &str = "SEEDRUN_CONFIG";

/// Load a configuration file from a given path and return the raw `RawConfigFile`.
///
/// This only performs TOML deserialization; it does **not** perform semantic
/// validation. Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let config: RawConfigFile = toml::from_str(&contents)?;

    Ok(config)
}

/// Load a configuration file from path and run validation.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let raw_config = load_from_path(&path)?;
    let config = ConfigFile::try_from(raw_config)?;
    Ok(config)
}

/// Load the raw config at `path`, falling back to defaults when the file
/// does not exist and `required` is false.
///
/// Validation is left to the caller so that CLI overrides can be applied
/// to the raw values first.
pub fn load_or_default(path: impl AsRef<Path>, required: bool) -> Result<RawConfigFile> {
    let path = path.as_ref();
    if !required && !path.exists() {
        debug!(path = %path.display(), "no config file found; using defaults");
        return Ok(RawConfigFile::default());
    }
    load_from_path(path)
}

/// Config path used when no `--config` flag is given.
///
/// Returns the path and whether it was named explicitly. A path taken from
/// `$SEEDRUN_CONFIG` must exist; the `Seedrun.toml` fallback may be absent.
pub fn default_config_path() -> (PathBuf, bool) {
    config_path_from_env(std::env::var_os(CONFIG_ENV))
}

/// [`default_config_path`] for a given value of `$SEEDRUN_CONFIG`.
pub fn config_path_from_env(value: Option<OsString>) -> (PathBuf, bool) {
    match value.filter(|v| !v.is_empty()) {
        Some(path) => (PathBuf::from(path), true),
        None => (PathBuf::from("Seedrun.toml"), false),
    }
}
