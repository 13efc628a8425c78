// src/seed/mod.rs

//! Seed run execution layer.
//!
//! - [`model`] holds the `SeedRun` state machine and its combined output.
//! - [`decode`] turns raw pipe reads into text.
//! - [`guard`] optionally limits seeding to one run at a time.
//! - [`runner`] spawns the script with `tokio::process::Command` and waits
//!   for it, honouring timeout and cancellation.
//! - [`report`] renders a run result into the status string.

pub mod decode;
pub mod guard;
pub mod model;
pub mod report;
pub mod runner;

pub use guard::{RunGuard, RunPermit};
pub use model::{OutputChunk, RunState, SeedReport, SeedRun, STDERR_PREFIX};
pub use report::{render_report, render_result};
pub use runner::{SeederConfig, SeederRunner};
