// src/seed/guard.rs

//! Admission control for seed runs.
//!
//! Under [`ConcurrencyPolicy::SingleFlight`] a one-permit semaphore acts as
//! the "run in progress" flag. The permit lives as long as the run and is
//! released on drop, whether the run succeeded, failed or was cancelled.

use std::sync::Arc;

use tokio::sync::{OwnedSemaphorePermit, Semaphore};

use crate::errors::SeedError;
use crate::types::ConcurrencyPolicy;

#[derive(Debug, Clone)]
pub struct RunGuard {
    slot: Option<Arc<Semaphore>>,
}

/// Held for the duration of one run.
#[derive(Debug)]
pub struct RunPermit {
    _permit: Option<OwnedSemaphorePermit>,
}

impl RunGuard {
    pub fn new(policy: ConcurrencyPolicy) -> Self {
        let slot = match policy {
            ConcurrencyPolicy::Concurrent => None,
            ConcurrencyPolicy::SingleFlight => Some(Arc::new(Semaphore::new(1))),
        };
        Self { slot }
    }

    /// Claim the slot without waiting.
    pub fn try_acquire(&self) -> Result<RunPermit, SeedError> {
        match &self.slot {
            None => Ok(RunPermit { _permit: None }),
            Some(slot) => Arc::clone(slot)
                .try_acquire_owned()
                .map(|permit| RunPermit {
                    _permit: Some(permit),
                })
                .map_err(|_| SeedError::AlreadyRunning),
        }
    }

    /// True while a single-flight run holds the slot. Always false for
    /// concurrent policy.
    pub fn is_busy(&self) -> bool {
        self.slot
            .as_ref()
            .is_some_and(|slot| slot.available_permits() == 0)
    }
}
