// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

use crate::ipc::SEED_CHANNEL;

/// Command-line arguments for `seedrun`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "seedrun",
    version,
    about = "Invoke request/response channels such as the database seeder.",
    long_about = None
)]
pub struct CliArgs {
    /// Channel to invoke.
    #[arg(value_name = "CHANNEL", default_value = SEED_CHANNEL)]
    pub channel: String,

    /// Path to the config file (TOML).
    ///
    /// Default: `$SEEDRUN_CONFIG`, else `Seedrun.toml` in the current working
    /// directory. The default file may be absent; an explicit one may not.
    #[arg(long, value_name = "PATH")]
    pub config: Option<String>,

    /// Seeding script, relative to the runner directory or absolute.
    #[arg(long, value_name = "PATH")]
    pub script: Option<String>,

    /// Directory the script path is resolved against.
    #[arg(long, value_name = "DIR")]
    pub runner_dir: Option<String>,

    /// Program used to execute the script; pass "" to execute it directly.
    #[arg(long, value_name = "PROGRAM")]
    pub interpreter: Option<String>,

    /// Kill the seeder if it runs longer than this (e.g. "30s", "5m").
    #[arg(long, value_name = "DURATION")]
    pub timeout: Option<String>,

    /// Reject invocations while a seed run is already in progress.
    #[arg(long)]
    pub single_flight: bool,

    /// Print the registered channels and exit.
    #[arg(long)]
    pub list_channels: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `SEEDRUN_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Resolve and print the configuration, but don't spawn anything.
    #[arg(long)]
    pub dry_run: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
