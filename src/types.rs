use std::str::FromStr;
use serde::Deserialize;

/// Behaviour when the seeder is invoked while another seed run is in progress.
///
/// - `Concurrent`: every invocation spawns its own process with its own
///   output buffer (default behaviour).
/// - `SingleFlight`: only one run at a time; a second invocation is rejected
///   with `SeedError::AlreadyRunning` until the first one finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConcurrencyPolicy {
    Concurrent,
    SingleFlight,
}

impl Default for ConcurrencyPolicy {
    fn default() -> Self {
        ConcurrencyPolicy::Concurrent
    }
}

impl FromStr for ConcurrencyPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "concurrent" => Ok(ConcurrencyPolicy::Concurrent),
            "single_flight" => Ok(ConcurrencyPolicy::SingleFlight),
            other => Err(format!(
                "invalid concurrency policy: {other} (expected \"concurrent\" or \"single_flight\")"
            )),
        }
    }
}

/// Which standard stream a chunk of child output came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamKind {
    Stdout,
    Stderr,
}

impl StreamKind {
    pub fn as_str(self) -> &'static str {
        match self {
            StreamKind::Stdout => "stdout",
            StreamKind::Stderr => "stderr",
        }
    }
}
