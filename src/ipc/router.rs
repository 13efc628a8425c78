// src/ipc/router.rs

//! Named request/response channels.
//!
//! Every channel is backed by a [`ChannelHandler`]. Handlers never fail:
//! whatever happens they answer with a string. The only error the router
//! itself produces is for a channel nobody registered.

use std::collections::BTreeMap;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::errors::{Result, SeedrunError};

/// Something that answers requests on a channel.
///
/// Production code registers [`SeederHandler`](super::SeederHandler); tests
/// can register handlers that don't spawn processes.
pub trait ChannelHandler: Send + Sync {
    fn handle(&self) -> Pin<Box<dyn Future<Output = String> + Send + '_>>;
}

#[derive(Default, Clone)]
pub struct IpcRouter {
    handlers: BTreeMap<String, Arc<dyn ChannelHandler>>,
}

impl fmt::Debug for IpcRouter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IpcRouter")
            .field("channels", &self.handlers.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl IpcRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` under `channel`, replacing any previous handler.
    pub fn register(&mut self, channel: impl Into<String>, handler: Arc<dyn ChannelHandler>) {
        let channel = channel.into();
        if self.handlers.insert(channel.clone(), handler).is_some() {
            warn!(channel = %channel, "replacing existing channel handler");
        } else {
            debug!(channel = %channel, "registered channel handler");
        }
    }

    pub fn contains(&self, channel: &str) -> bool {
        self.handlers.contains_key(channel)
    }

    /// Registered channel names, sorted.
    pub fn channels(&self) -> impl Iterator<Item = &str> {
        self.handlers.keys().map(String::as_str)
    }

    pub async fn invoke(&self, channel: &str) -> Result<String> {
        let handler = self
            .handlers
            .get(channel)
            .cloned()
            .ok_or_else(|| SeedrunError::UnknownChannel(channel.to_string()))?;

        debug!(channel = %channel, "invoking channel handler");
        Ok(handler.handle().await)
    }
}
