// src/ipc/server.rs

//! Serve an [`IpcRouter`] over an mpsc channel.
//!
//! Callers hold an [`IpcClient`]; each request travels with a oneshot reply
//! sender. Requests are handled on their own Tokio task, so a long seed run
//! does not hold up other invocations.

use std::sync::Arc;

use anyhow::anyhow;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info};

use crate::errors::Result;

use super::router::IpcRouter;

#[derive(Debug)]
pub struct IpcRequest {
    pub channel: String,
    pub reply: oneshot::Sender<Result<String>>,
}

#[derive(Debug, Clone)]
pub struct IpcClient {
    tx: mpsc::Sender<IpcRequest>,
}

impl IpcClient {
    pub async fn invoke(&self, channel: &str) -> Result<String> {
        let (reply, response) = oneshot::channel();
        self.tx
            .send(IpcRequest {
                channel: channel.to_string(),
                reply,
            })
            .await
            .map_err(|_| anyhow!("ipc server is not running"))?;

        response
            .await
            .map_err(|_| anyhow!("ipc server dropped request for channel '{channel}'"))?
    }
}

/// Spawn the request loop. It ends once every [`IpcClient`] is dropped.
pub fn spawn_ipc_server(router: IpcRouter) -> IpcClient {
    let (tx, mut rx) = mpsc::channel::<IpcRequest>(32);
    let router = Arc::new(router);

    tokio::spawn(async move {
        info!("ipc server started");

        while let Some(request) = rx.recv().await {
            let router = Arc::clone(&router);
            tokio::spawn(async move {
                let IpcRequest { channel, reply } = request;
                let response = router.invoke(&channel).await;
                if reply.send(response).is_err() {
                    debug!(channel = %channel, "caller went away before the reply");
                }
            });
        }

        info!("ipc server finished (channel closed)");
    });

    IpcClient { tx }
}
