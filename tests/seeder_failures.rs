#![cfg(unix)]

mod common;
use crate::common::builders::{ScriptBuilder, SeederConfigBuilder};
use crate::common::{init_tracing, with_timeout};

use std::error::Error;
use std::time::{Duration, Instant};

use tokio::sync::oneshot;

use seedrun::errors::SeedError;
use seedrun::seed::render_result;

type TestResult = Result<(), Box<dyn Error>>;

#[tokio::test]
async fn launch_failure_is_reported_not_raised() -> TestResult {
    init_tracing();
    let script = ScriptBuilder::new().stdout("unreachable").write();
    let runner = SeederConfigBuilder::new(script.path())
        .interpreter("/nonexistent/bin/seedrun-interpreter")
        .runner();

    let result = with_timeout(runner.run()).await;

    let os_message = match &result {
        Err(SeedError::Launch { program, source }) => {
            assert_eq!(program, "/nonexistent/bin/seedrun-interpreter");
            source.to_string()
        }
        other => panic!("expected launch failure, got {other:?}"),
    };

    let rendered = render_result(&result);
    assert!(rendered.starts_with("Seeder failed: "), "got {rendered:?}");
    assert!(rendered.contains(&os_message));
    Ok(())
}

#[tokio::test]
async fn timeout_kills_the_child() -> TestResult {
    init_tracing();
    let script = ScriptBuilder::new().sleep_ms(5_000).stdout("too late").write();
    let runner = SeederConfigBuilder::new(script.path())
        .timeout(Duration::from_millis(200))
        .runner();

    let started = Instant::now();
    let result = with_timeout(runner.run()).await;

    assert!(matches!(result, Err(SeedError::Timeout(d)) if d == Duration::from_millis(200)));
    assert!(started.elapsed() < Duration::from_secs(3));
    assert_eq!(render_result(&result), "Seeder failed: timed out after 200ms");
    Ok(())
}

#[tokio::test]
async fn timeout_returns_while_grandchild_holds_pipes() -> TestResult {
    init_tracing();
    let script = ScriptBuilder::new()
        .line("sleep 4 &")
        .sleep_ms(5_000)
        .write();
    let runner = SeederConfigBuilder::new(script.path())
        .timeout(Duration::from_millis(200))
        .runner();

    let started = Instant::now();
    let result = with_timeout(runner.run()).await;

    assert!(matches!(result, Err(SeedError::Timeout(_))));
    assert!(started.elapsed() < Duration::from_secs(2));
    Ok(())
}

#[tokio::test]
async fn output_before_timeout_is_discarded_with_the_run() -> TestResult {
    init_tracing();
    let script = ScriptBuilder::new().stdout("half").sleep_ms(5_000).write();
    let runner = SeederConfigBuilder::new(script.path())
        .timeout(Duration::from_millis(300))
        .runner();

    let rendered = with_timeout(runner.run_to_string()).await;

    assert!(rendered.starts_with("Seeder failed: timed out"));
    Ok(())
}

#[tokio::test]
async fn cancellation_kills_the_child() -> TestResult {
    init_tracing();
    let script = ScriptBuilder::new().sleep_ms(5_000).write();
    let runner = SeederConfigBuilder::new(script.path()).runner();

    let (cancel_tx, cancel_rx) = oneshot::channel();
    let task = tokio::spawn(async move { runner.run_with_cancel(cancel_rx).await });

    tokio::time::sleep(Duration::from_millis(200)).await;
    let started = Instant::now();
    cancel_tx.send(()).expect("runner still waiting");

    let result = with_timeout(task).await?;

    assert!(matches!(result, Err(SeedError::Cancelled)));
    assert!(started.elapsed() < Duration::from_secs(3));
    assert_eq!(render_result(&result), "Seeder failed: cancelled");
    Ok(())
}

#[tokio::test]
async fn dropped_cancel_sender_does_not_cancel() -> TestResult {
    init_tracing();
    let script = ScriptBuilder::new().sleep_ms(100).stdout("done").write();
    let runner = SeederConfigBuilder::new(script.path()).runner();

    let (cancel_tx, cancel_rx) = oneshot::channel::<()>();
    drop(cancel_tx);

    let report = with_timeout(runner.run_with_cancel(cancel_rx)).await?;

    assert_eq!(report.output, "done");
    Ok(())
}
