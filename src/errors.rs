// src/errors.rs

//! Crate-wide error aliases and helpers.
//!
//! [`SeedError`] is what a single seed run can fail with. [`SeedrunError`]
//! covers everything around it (config loading, channel routing, startup).

use std::time::Duration;

use thiserror::Error;

use crate::seed::model::RunState;

#[derive(Error, Debug)]
pub enum SeedrunError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Unknown channel: {0}")]
    UnknownChannel(String),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Seed(#[from] SeedError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Why a seed run did not produce a report.
///
/// A non-zero exit is *not* an error: it yields a report carrying the code.
#[derive(Error, Debug)]
pub enum SeedError {
    #[error("could not launch '{program}': {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("waiting for seeder process failed: {0}")]
    Wait(#[source] std::io::Error),

    #[error("timed out after {0:?}")]
    Timeout(Duration),

    #[error("cancelled")]
    Cancelled,

    #[error("a seed run is already in progress")]
    AlreadyRunning,

    #[error("invalid seed run transition from {from} to {to}")]
    InvalidTransition { from: RunState, to: RunState },

    #[error("output rejected: seed run is {0}")]
    OutputRejected(RunState),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, SeedrunError>;
