// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod ipc;
pub mod logging;
pub mod paths;
pub mod seed;
pub mod types;

use std::path::PathBuf;

use anyhow::Result;
use tracing::{info, warn};

use crate::cli::CliArgs;
use crate::config::{ConfigFile, RawConfigFile, default_config_path, load_or_default};
use crate::ipc::{IpcRouter, register_dev_channels, spawn_ipc_server};
use crate::seed::{SeederConfig, SeederRunner};
use crate::types::ConcurrencyPolicy;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading and CLI overrides
/// - the channel router and its server task
/// - the seeder runner behind `dev:run-seeder`
/// - Ctrl-C handling
pub async fn run(args: CliArgs) -> Result<()> {
    let cfg = resolve_config(&args)?;
    let seeder = SeederConfig::from_config(&cfg)?;

    if args.dry_run {
        print_dry_run(&cfg, &seeder);
        return Ok(());
    }

    let router = build_router(&cfg, seeder);

    if args.list_channels {
        for channel in router.channels() {
            println!("{channel}");
        }
        return Ok(());
    }

    let client = spawn_ipc_server(router);

    // Ctrl-C drops the pending invocation; the child is killed on drop.
    tokio::select! {
        response = client.invoke(&args.channel) => {
            println!("{}", response?);
        }
        signal = tokio::signal::ctrl_c() => {
            match signal {
                Ok(()) => warn!(channel = %args.channel, "interrupted; abandoning invocation"),
                Err(e) => eprintln!("failed to listen for Ctrl+C: {e}"),
            }
        }
    }

    Ok(())
}

/// Build the router for a validated config.
pub fn build_router(cfg: &ConfigFile, seeder: SeederConfig) -> IpcRouter {
    let mut router = IpcRouter::new();
    if cfg.ipc.dev_channels {
        register_dev_channels(&mut router, SeederRunner::new(seeder));
    } else {
        info!("development channels disabled by [ipc].dev_channels");
    }
    router
}

/// Load the config file (if any), apply CLI overrides, then validate.
pub fn resolve_config(args: &CliArgs) -> Result<ConfigFile> {
    let (path, required) = match &args.config {
        Some(path) => (PathBuf::from(path), true),
        None => default_config_path(),
    };

    let mut raw = load_or_default(&path, required)?;
    apply_overrides(&mut raw, args);
    Ok(ConfigFile::try_from(raw)?)
}

fn apply_overrides(raw: &mut RawConfigFile, args: &CliArgs) {
    let seeder = &mut raw.seeder;
    if let Some(script) = &args.script {
        seeder.script = script.clone();
    }
    if let Some(dir) = &args.runner_dir {
        seeder.runner_dir = Some(dir.clone());
    }
    if let Some(interpreter) = &args.interpreter {
        seeder.interpreter = interpreter.clone();
    }
    if let Some(timeout) = &args.timeout {
        seeder.timeout = Some(timeout.clone());
    }
    if args.single_flight {
        seeder.concurrency = ConcurrencyPolicy::SingleFlight;
    }
}

/// Simple dry-run output: print the resolved configuration.
fn print_dry_run(cfg: &ConfigFile, seeder: &SeederConfig) {
    println!("seedrun dry-run");
    println!(
        "  interpreter = {}",
        seeder.interpreter.as_deref().unwrap_or("(none, script executed directly)")
    );
    println!("  script = {}", seeder.script.display());
    match seeder.timeout {
        Some(timeout) => println!("  timeout = {timeout:?}"),
        None => println!("  timeout = (none)"),
    }
    println!("  drain_grace = {:?}", seeder.drain_grace);
    println!("  concurrency = {:?}", seeder.concurrency);
    println!("  dev_channels = {}", cfg.ipc.dev_channels);
}
