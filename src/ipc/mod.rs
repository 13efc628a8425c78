// src/ipc/mod.rs

//! Request/response channels exposed to a privileged caller.
//!
//! - [`router`] maps channel names to handlers.
//! - [`server`] serves a router over mpsc with oneshot replies.
//! - [`seeder`] provides the `dev:run-seeder` handler.

pub mod router;
pub mod seeder;
pub mod server;

pub use router::{ChannelHandler, IpcRouter};
pub use seeder::{SEED_CHANNEL, SeederHandler, register_dev_channels};
pub use server::{IpcClient, IpcRequest, spawn_ipc_server};
