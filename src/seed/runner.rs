// src/seed/runner.rs

//! The seeder task runner.
//!
//! One call to [`SeederRunner::run`] spawns exactly one process, collects
//! its stdout and stderr in arrival order and waits for it to exit. Reader
//! tasks forward raw chunks over an mpsc channel; only the runner future
//! touches the `SeedRun`, so the output buffer needs no locking.

use std::future::Future;
use std::path::PathBuf;
use std::process::Stdio;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::{Child, Command};
use tokio::sync::{mpsc, oneshot};
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::config::{ConfigFile, parse_duration};
use crate::errors::{Result, SeedError, SeedrunError};
use crate::paths::{resolve_script_path, runner_dir};
use crate::seed::decode::Utf8ChunkDecoder;
use crate::seed::guard::RunGuard;
use crate::seed::model::{OutputChunk, SeedReport, SeedRun};
use crate::seed::report::render_result;
use crate::types::{ConcurrencyPolicy, StreamKind};

const READ_BUF_SIZE: usize = 8 * 1024;
const CHUNK_CHANNEL_CAPACITY: usize = 64;

static NEXT_RUN_ID: AtomicU64 = AtomicU64::new(1);

/// Everything needed to launch the seeding script.
#[derive(Debug, Clone)]
pub struct SeederConfig {
    /// Program that executes the script; `None` runs the script itself.
    pub interpreter: Option<String>,
    /// Absolute path of the script.
    pub script: PathBuf,
    pub timeout: Option<Duration>,
    pub drain_grace: Duration,
    pub concurrency: ConcurrencyPolicy,
}

impl SeederConfig {
    /// Defaults for a script at `script`: `node` interpreter, no timeout,
    /// concurrent runs allowed.
    pub fn new(script: impl Into<PathBuf>) -> Self {
        Self {
            interpreter: Some("node".to_string()),
            script: script.into(),
            timeout: None,
            drain_grace: Duration::from_millis(500),
            concurrency: ConcurrencyPolicy::Concurrent,
        }
    }

    /// Build from a validated config file, resolving the script location.
    pub fn from_config(cfg: &ConfigFile) -> Result<Self> {
        let seeder = &cfg.seeder;
        let base = runner_dir(seeder.runner_dir.as_deref())?;
        let script = resolve_script_path(&base, &seeder.script);

        let timeout = seeder
            .timeout
            .as_deref()
            .map(parse_duration)
            .transpose()
            .map_err(SeedrunError::ConfigError)?;
        let drain_grace =
            parse_duration(&seeder.drain_grace).map_err(SeedrunError::ConfigError)?;

        Ok(Self {
            interpreter: seeder.effective_interpreter().map(str::to_string),
            script,
            timeout,
            drain_grace,
            concurrency: seeder.concurrency,
        })
    }

    /// Program actually passed to `Command::new`.
    pub fn program(&self) -> String {
        match &self.interpreter {
            Some(interpreter) => interpreter.clone(),
            None => self.script.display().to_string(),
        }
    }
}

/// Raw bytes read from one of the child's pipes.
#[derive(Debug)]
struct RawChunk {
    stream: StreamKind,
    bytes: Vec<u8>,
}

#[derive(Debug, Default)]
struct StreamDecoders {
    stdout: Utf8ChunkDecoder,
    stderr: Utf8ChunkDecoder,
}

impl StreamDecoders {
    fn for_stream(&mut self, stream: StreamKind) -> &mut Utf8ChunkDecoder {
        match stream {
            StreamKind::Stdout => &mut self.stdout,
            StreamKind::Stderr => &mut self.stderr,
        }
    }
}

/// Cheap to clone; clones share the single-flight slot.
#[derive(Debug, Clone)]
pub struct SeederRunner {
    config: Arc<SeederConfig>,
    guard: RunGuard,
}

impl SeederRunner {
    pub fn new(config: SeederConfig) -> Self {
        let guard = RunGuard::new(config.concurrency);
        Self {
            config: Arc::new(config),
            guard,
        }
    }

    pub fn config(&self) -> &SeederConfig {
        &self.config
    }

    /// True while a single-flight run is in progress.
    pub fn is_busy(&self) -> bool {
        self.guard.is_busy()
    }

    /// Run the seeder to completion (or until the configured timeout).
    pub async fn run(&self) -> std::result::Result<SeedReport, SeedError> {
        self.execute(None).await
    }

    /// Like [`run`](Self::run), but a message on `cancel_rx` kills the child
    /// and fails the run with [`SeedError::Cancelled`]. Dropping the sender
    /// does not cancel.
    pub async fn run_with_cancel(
        &self,
        cancel_rx: oneshot::Receiver<()>,
    ) -> std::result::Result<SeedReport, SeedError> {
        self.execute(Some(cancel_rx)).await
    }

    /// Run and render the outcome as the human-readable status string.
    pub async fn run_to_string(&self) -> String {
        render_result(&self.run().await)
    }

    async fn execute(
        &self,
        cancel_rx: Option<oneshot::Receiver<()>>,
    ) -> std::result::Result<SeedReport, SeedError> {
        let _permit = self.guard.try_acquire().inspect_err(|_| {
            info!("seed run rejected; another run is in progress");
        })?;

        let mut run = SeedRun::new(NEXT_RUN_ID.fetch_add(1, Ordering::Relaxed));
        let run_id = run.id();
        let program = self.config.program();

        info!(
            run_id,
            program = %program,
            script = %self.config.script.display(),
            "starting seeder process"
        );

        let mut child = match self.build_command().spawn() {
            Ok(child) => child,
            Err(source) => {
                run.fail()?;
                warn!(run_id, program = %program, error = %source, "failed to launch seeder");
                return Err(SeedError::Launch { program, source });
            }
        };
        run.mark_running()?;
        debug!(run_id, pid = ?child.id(), "seeder process spawned");

        let (chunk_tx, mut chunk_rx) = mpsc::channel::<RawChunk>(CHUNK_CHANNEL_CAPACITY);
        if let Some(stdout) = child.stdout.take() {
            spawn_stream_reader(run_id, StreamKind::Stdout, stdout, chunk_tx.clone());
        }
        if let Some(stderr) = child.stderr.take() {
            spawn_stream_reader(run_id, StreamKind::Stderr, stderr, chunk_tx.clone());
        }
        // Channel closes once both readers hit EOF.
        drop(chunk_tx);

        let mut decoders = StreamDecoders::default();

        let cancelled = wait_for_cancel(cancel_rx);
        tokio::pin!(cancelled);
        let deadline = wait_for_deadline(self.config.timeout);
        tokio::pin!(deadline);

        let status = loop {
            tokio::select! {
                Some(chunk) = chunk_rx.recv() => {
                    append_chunk(&mut run, &mut decoders, chunk)?;
                }

                status = child.wait() => {
                    match status {
                        Ok(status) => break status,
                        Err(e) => {
                            warn!(run_id, error = %e, "waiting for seeder process failed");
                            run.fail()?;
                            return Err(SeedError::Wait(e));
                        }
                    }
                }

                _ = &mut cancelled => {
                    info!(run_id, "cancellation requested; killing seeder process");
                    kill_child(run_id, &mut child).await;
                    run.fail()?;
                    return Err(SeedError::Cancelled);
                }

                _ = &mut deadline => {
                    let timeout = self.config.timeout.unwrap_or_default();
                    warn!(run_id, ?timeout, "seeder timed out; killing process");
                    kill_child(run_id, &mut child).await;
                    run.fail()?;
                    return Err(SeedError::Timeout(timeout));
                }
            }
        };

        drain_output(run_id, &mut run, &mut decoders, &mut chunk_rx, self.config.drain_grace)
            .await?;

        for stream in [StreamKind::Stdout, StreamKind::Stderr] {
            let rest = decoders.for_stream(stream).finish();
            run.append(OutputChunk::new(stream, rest))?;
        }

        let exit_code = status.code();
        run.complete(exit_code)?;

        info!(
            run_id,
            exit_code = ?exit_code,
            success = status.success(),
            chunks = run.chunks().len(),
            "seeder process exited"
        );

        run.into_report()
    }

    fn build_command(&self) -> Command {
        let mut cmd = match &self.config.interpreter {
            Some(interpreter) => {
                let mut c = Command::new(interpreter);
                c.arg(&self.config.script);
                c
            }
            None => Command::new(&self.config.script),
        };

        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        cmd
    }
}

fn append_chunk(
    run: &mut SeedRun,
    decoders: &mut StreamDecoders,
    chunk: RawChunk,
) -> std::result::Result<(), SeedError> {
    let text = decoders.for_stream(chunk.stream).decode(&chunk.bytes);
    run.append(OutputChunk::new(chunk.stream, text))
}

/// Collect output still sitting in the pipes after exit.
///
/// Bounded by `grace`: a grandchild that inherited the pipes can keep them
/// open long after the seeder itself is gone.
async fn drain_output(
    run_id: u64,
    run: &mut SeedRun,
    decoders: &mut StreamDecoders,
    chunk_rx: &mut mpsc::Receiver<RawChunk>,
    grace: Duration,
) -> std::result::Result<(), SeedError> {
    let expired = sleep(grace);
    tokio::pin!(expired);

    loop {
        tokio::select! {
            biased;

            maybe = chunk_rx.recv() => match maybe {
                Some(chunk) => append_chunk(run, decoders, chunk)?,
                None => return Ok(()),
            },

            _ = &mut expired => {
                warn!(
                    run_id,
                    ?grace,
                    "seeder output still open after exit; ignoring further output"
                );
                return Ok(());
            }
        }
    }
}

fn spawn_stream_reader<R>(
    run_id: u64,
    stream: StreamKind,
    mut reader: R,
    tx: mpsc::Sender<RawChunk>,
) where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut buf = vec![0u8; READ_BUF_SIZE];
        loop {
            match reader.read(&mut buf).await {
                Ok(0) => break,
                Ok(n) => {
                    let chunk = RawChunk {
                        stream,
                        bytes: buf[..n].to_vec(),
                    };
                    if tx.send(chunk).await.is_err() {
                        // Runner is gone (timeout, cancel); stop reading.
                        break;
                    }
                }
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    warn!(run_id, stream = stream.as_str(), error = %e, "reading seeder output failed");
                    break;
                }
            }
        }
        debug!(run_id, stream = stream.as_str(), "output reader finished");
    });
}

/// Kill the seeder process itself.
///
/// Only the direct child is signalled. Grandchildren it started keep
/// running, and if they inherited the pipes the detached reader tasks stay
/// blocked until those pipes close. The run returns regardless: its chunk
/// receiver is dropped, so each reader stops after its next read.
async fn kill_child(run_id: u64, child: &mut Child) {
    if let Err(e) = child.kill().await {
        warn!(run_id, error = %e, "failed to kill seeder process");
    }
}

/// Resolves only when the sender explicitly fires.
fn wait_for_cancel(cancel_rx: Option<oneshot::Receiver<()>>) -> impl Future<Output = ()> {
    async move {
        if let Some(rx) = cancel_rx {
            if rx.await.is_ok() {
                return;
            }
        }
        std::future::pending::<()>().await
    }
}

fn wait_for_deadline(timeout: Option<Duration>) -> impl Future<Output = ()> {
    async move {
        match timeout {
            Some(timeout) => sleep(timeout).await,
            None => std::future::pending::<()>().await,
        }
    }
}
