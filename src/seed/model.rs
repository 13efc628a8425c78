// src/seed/model.rs

//! The `SeedRun` entity: one invocation of the seeding script.
//!
//! State machine:
//!
//! ```text
//! Pending ──► Running ──► Completed
//!    │           │
//!    └───────────┴──────► Failed
//! ```
//!
//! Exactly one terminal transition happens per run. Output is append-only
//! and kept in arrival order; it is frozen once the run is terminal.

use std::fmt;
use std::time::{Duration, Instant};

use crate::errors::SeedError;
use crate::types::StreamKind;

/// Marker placed in front of every stderr chunk in the combined output.
pub const STDERR_PREFIX: &str = "ERROR: ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Pending,
    Running,
    Completed,
    Failed,
}

impl RunState {
    pub fn is_terminal(self) -> bool {
        matches!(self, RunState::Completed | RunState::Failed)
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RunState::Pending => "pending",
            RunState::Running => "running",
            RunState::Completed => "completed",
            RunState::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// One piece of decoded child output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputChunk {
    pub stream: StreamKind,
    pub text: String,
}

impl OutputChunk {
    pub fn new(stream: StreamKind, text: impl Into<String>) -> Self {
        Self {
            stream,
            text: text.into(),
        }
    }

    /// Append this chunk as it appears in the combined output.
    pub fn render_into(&self, out: &mut String) {
        if self.stream == StreamKind::Stderr {
            out.push_str(STDERR_PREFIX);
        }
        out.push_str(&self.text);
    }
}

#[derive(Debug)]
pub struct SeedRun {
    id: u64,
    state: RunState,
    exit_code: Option<i32>,
    chunks: Vec<OutputChunk>,
    started_at: Option<Instant>,
    finished_at: Option<Instant>,
}

impl SeedRun {
    pub fn new(id: u64) -> Self {
        Self {
            id,
            state: RunState::Pending,
            exit_code: None,
            chunks: Vec::new(),
            started_at: None,
            finished_at: None,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Exit code of the process; `None` until the run completes, and for
    /// processes terminated by a signal.
    pub fn exit_code(&self) -> Option<i32> {
        self.exit_code
    }

    pub fn chunks(&self) -> &[OutputChunk] {
        &self.chunks
    }

    pub fn has_output(&self) -> bool {
        self.chunks.iter().any(|c| !c.text.is_empty())
    }

    /// Time between `mark_running` and the terminal transition.
    pub fn duration(&self) -> Option<Duration> {
        match (self.started_at, self.finished_at) {
            (Some(start), Some(end)) => Some(end.duration_since(start)),
            _ => None,
        }
    }

    /// The process was spawned.
    pub fn mark_running(&mut self) -> Result<(), SeedError> {
        self.transition(RunState::Running)?;
        self.started_at = Some(Instant::now());
        Ok(())
    }

    /// Append a chunk of output. Only allowed while running.
    pub fn append(&mut self, chunk: OutputChunk) -> Result<(), SeedError> {
        if self.state != RunState::Running {
            return Err(SeedError::OutputRejected(self.state));
        }
        if !chunk.text.is_empty() {
            self.chunks.push(chunk);
        }
        Ok(())
    }

    /// The process exited. `exit_code` is `None` when it was killed by a signal.
    pub fn complete(&mut self, exit_code: Option<i32>) -> Result<(), SeedError> {
        self.transition(RunState::Completed)?;
        self.exit_code = exit_code;
        self.finished_at = Some(Instant::now());
        Ok(())
    }

    /// The run ended without a usable exit (launch failure, timeout, cancel).
    pub fn fail(&mut self) -> Result<(), SeedError> {
        self.transition(RunState::Failed)?;
        self.finished_at = Some(Instant::now());
        Ok(())
    }

    /// Stdout and stderr chunks in arrival order, stderr chunks prefixed.
    pub fn combined_output(&self) -> String {
        let mut out = String::new();
        for chunk in &self.chunks {
            chunk.render_into(&mut out);
        }
        out
    }

    /// Turn a completed run into its report.
    pub fn into_report(self) -> Result<SeedReport, SeedError> {
        if self.state != RunState::Completed {
            return Err(SeedError::InvalidTransition {
                from: self.state,
                to: RunState::Completed,
            });
        }
        let output = self.combined_output();
        Ok(SeedReport {
            run_id: self.id,
            exit_code: self.exit_code,
            duration: self.duration().unwrap_or_default(),
            output,
        })
    }

    fn transition(&mut self, to: RunState) -> Result<(), SeedError> {
        let allowed = matches!(
            (self.state, to),
            (RunState::Pending, RunState::Running)
                | (RunState::Running, RunState::Completed)
                | (RunState::Pending, RunState::Failed)
                | (RunState::Running, RunState::Failed)
        );
        if !allowed {
            return Err(SeedError::InvalidTransition {
                from: self.state,
                to,
            });
        }
        self.state = to;
        Ok(())
    }
}

/// Result of a seed run whose process exited on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedReport {
    pub run_id: u64,
    /// `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
    pub output: String,
    pub duration: Duration,
}

impl SeedReport {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Exit code for display; signal terminations report `-1`.
    pub fn code(&self) -> i32 {
        self.exit_code.unwrap_or(-1)
    }
}
