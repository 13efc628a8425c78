// src/ipc/seeder.rs

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::seed::SeederRunner;

use super::router::{ChannelHandler, IpcRouter};

/// Channel on which the seeder is exposed.
pub const SEED_CHANNEL: &str = "dev:run-seeder";

/// Runs the seeder and answers with its status string.
#[derive(Debug, Clone)]
pub struct SeederHandler {
    runner: SeederRunner,
}

impl SeederHandler {
    pub fn new(runner: SeederRunner) -> Self {
        Self { runner }
    }
}

impl ChannelHandler for SeederHandler {
    fn handle(&self) -> Pin<Box<dyn Future<Output = String> + Send + '_>> {
        Box::pin(self.runner.run_to_string())
    }
}

/// Register the development-only channels.
pub fn register_dev_channels(router: &mut IpcRouter, runner: SeederRunner) {
    router.register(SEED_CHANNEL, Arc::new(SeederHandler::new(runner)));
}
