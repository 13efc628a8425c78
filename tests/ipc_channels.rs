mod common;
#[cfg(unix)]
use crate::common::builders::{ScriptBuilder, SeederConfigBuilder};
use crate::common::fake_handler::FakeHandler;
use crate::common::{init_tracing, with_timeout};

use std::error::Error;
use std::sync::Arc;

use seedrun::config::{ConfigFile, RawConfigFile};
use seedrun::errors::SeedrunError;
use seedrun::ipc::{IpcRouter, spawn_ipc_server};
#[cfg(unix)]
use seedrun::ipc::{SEED_CHANNEL, register_dev_channels};
use seedrun::seed::SeederConfig;

type TestResult = Result<(), Box<dyn Error>>;

#[tokio::test]
async fn router_dispatches_to_registered_handler() -> TestResult {
    init_tracing();
    let handler = FakeHandler::new("pong");
    let mut router = IpcRouter::new();
    router.register("dev:ping", Arc::new(handler.clone()));

    let response = router.invoke("dev:ping").await?;

    assert_eq!(response, "pong");
    assert_eq!(handler.calls(), 1);
    assert!(router.contains("dev:ping"));
    Ok(())
}

#[tokio::test]
async fn unknown_channel_is_a_routing_error() -> TestResult {
    init_tracing();
    let router = IpcRouter::new();

    match router.invoke("dev:missing").await {
        Err(SeedrunError::UnknownChannel(name)) => assert_eq!(name, "dev:missing"),
        other => panic!("expected UnknownChannel, got {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn server_answers_each_request() -> TestResult {
    init_tracing();
    let handler = FakeHandler::new("ok");
    let mut router = IpcRouter::new();
    router.register("dev:ok", Arc::new(handler.clone()));
    let client = spawn_ipc_server(router);

    let (a, b) = with_timeout(async {
        tokio::join!(client.invoke("dev:ok"), client.invoke("dev:ok"))
    })
    .await;

    assert_eq!(a?, "ok");
    assert_eq!(b?, "ok");
    assert_eq!(handler.calls(), 2);

    let missing = with_timeout(client.invoke("nope")).await;
    assert!(matches!(missing, Err(SeedrunError::UnknownChannel(_))));
    Ok(())
}

#[tokio::test]
async fn dev_channels_can_be_disabled() -> TestResult {
    init_tracing();
    let mut raw = RawConfigFile::default();
    raw.ipc.dev_channels = false;
    let cfg = ConfigFile::try_from(raw)?;

    let router = seedrun::build_router(&cfg, SeederConfig::new("/tmp/seed.js"));

    assert_eq!(router.channels().count(), 0);
    Ok(())
}

#[cfg(unix)]
#[tokio::test]
async fn seeder_channel_returns_status_string() -> TestResult {
    init_tracing();
    let script = ScriptBuilder::new().stdout("inserted 3 rows").write();
    let runner = SeederConfigBuilder::new(script.path()).runner();

    let mut router = IpcRouter::new();
    register_dev_channels(&mut router, runner);
    let client = spawn_ipc_server(router);

    let response = with_timeout(client.invoke(SEED_CHANNEL)).await?;

    assert_eq!(response, "inserted 3 rows");
    Ok(())
}

#[cfg(unix)]
#[tokio::test]
async fn seeder_channel_never_fails_on_launch_error() -> TestResult {
    init_tracing();
    let script = ScriptBuilder::new().write();
    let runner = SeederConfigBuilder::new(script.path())
        .interpreter("/nonexistent/bin/seedrun-interpreter")
        .runner();

    let mut router = IpcRouter::new();
    register_dev_channels(&mut router, runner);

    let response = with_timeout(router.invoke(SEED_CHANNEL)).await?;

    assert!(response.starts_with("Seeder failed: "), "got {response:?}");
    Ok(())
}
