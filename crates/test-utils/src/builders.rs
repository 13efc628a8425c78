#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use seedrun::seed::{SeederConfig, SeederRunner};
use seedrun::types::ConcurrencyPolicy;
use tempfile::TempDir;

/// A shell script written to a scratch directory.
///
/// The directory (and the script) is removed when this value is dropped.
pub struct ScratchScript {
    dir: TempDir,
    path: PathBuf,
}

impl ScratchScript {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }
}

/// Builder for throwaway seeding scripts run through `sh`.
pub struct ScriptBuilder {
    lines: Vec<String>,
}

impl ScriptBuilder {
    pub fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Append a raw shell line.
    pub fn line(mut self, line: &str) -> Self {
        self.lines.push(line.to_string());
        self
    }

    /// Write `text` to stdout without a trailing newline.
    pub fn stdout(self, text: &str) -> Self {
        let line = format!("printf '%s' '{text}'");
        self.line(&line)
    }

    /// Write `text` to stderr without a trailing newline.
    pub fn stderr(self, text: &str) -> Self {
        let line = format!("printf '%s' '{text}' >&2");
        self.line(&line)
    }

    pub fn sleep_ms(self, ms: u64) -> Self {
        let line = format!("sleep {}", ms as f64 / 1000.0);
        self.line(&line)
    }

    pub fn exit(self, code: i32) -> Self {
        let line = format!("exit {code}");
        self.line(&line)
    }

    /// Write the script as `database/seed.sh` inside a fresh temp dir.
    pub fn write(self) -> ScratchScript {
        let dir = tempfile::tempdir().expect("create temp dir");
        let db = dir.path().join("database");
        fs::create_dir_all(&db).expect("create database dir");
        let path = db.join("seed.sh");
        let mut body = String::from("#!/bin/sh\n");
        for line in &self.lines {
            body.push_str(line);
            body.push('\n');
        }
        fs::write(&path, body).expect("write script");
        ScratchScript { dir, path }
    }
}

impl Default for ScriptBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `SeederConfig` pointing at a scratch script.
pub struct SeederConfigBuilder {
    config: SeederConfig,
}

impl SeederConfigBuilder {
    /// `sh` interpreter, no timeout, concurrent runs.
    pub fn new(script: &Path) -> Self {
        let mut config = SeederConfig::new(script);
        config.interpreter = Some("sh".to_string());
        Self { config }
    }

    pub fn interpreter(mut self, program: &str) -> Self {
        self.config.interpreter = Some(program.to_string());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout);
        self
    }

    pub fn drain_grace(mut self, grace: Duration) -> Self {
        self.config.drain_grace = grace;
        self
    }

    pub fn single_flight(mut self) -> Self {
        self.config.concurrency = ConcurrencyPolicy::SingleFlight;
        self
    }

    pub fn build(self) -> SeederConfig {
        self.config
    }

    pub fn runner(self) -> SeederRunner {
        SeederRunner::new(self.config)
    }
}
