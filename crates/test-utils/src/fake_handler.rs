use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use seedrun::ipc::ChannelHandler;

/// A channel handler that:
/// - counts how often it was invoked
/// - answers every request with a fixed response.
#[derive(Debug, Clone)]
pub struct FakeHandler {
    response: String,
    calls: Arc<AtomicUsize>,
}

impl FakeHandler {
    pub fn new(response: &str) -> Self {
        Self {
            response: response.to_string(),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ChannelHandler for FakeHandler {
    fn handle(&self) -> Pin<Box<dyn Future<Output = String> + Send + '_>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let response = self.response.clone();
        Box::pin(async move { response })
    }
}
