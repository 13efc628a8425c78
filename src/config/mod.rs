// src/config/mod.rs

//! Configuration loading and validation for seedrun.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file from disk (`loader.rs`).
//! - Validate values that serde cannot check on its own (`validate.rs`).
//! - Parse human-friendly durations (`duration.rs`).

pub mod duration;
pub mod loader;
pub mod model;
pub mod validate;

pub use duration::parse_duration;
pub use loader::{
    config_path_from_env, default_config_path, load_and_validate, load_from_path,
    load_or_default,
};
pub use model::{ConfigFile, IpcSection, RawConfigFile, SeederSection};
