use serde::Deserialize;

use crate::types::ConcurrencyPolicy;

/// Configuration exactly as read from a TOML file, before validation.
///
/// ```toml
/// [seeder]
/// interpreter = "node"
/// script = "../database/seed.js"
/// timeout = "5m"
/// concurrency = "single_flight"
///
/// [ipc]
/// dev_channels = true
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawConfigFile {
    #[serde(default)]
    pub seeder: SeederSection,

    #[serde(default)]
    pub ipc: IpcSection,
}

/// Validated configuration. Only obtainable through `TryFrom<RawConfigFile>`.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub seeder: SeederSection,
    pub ipc: IpcSection,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(seeder: SeederSection, ipc: IpcSection) -> Self {
        Self { seeder, ipc }
    }
}

/// `[seeder]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct SeederSection {
    /// Program used to execute the script. An empty string executes the
    /// script directly.
    #[serde(default = "default_interpreter")]
    pub interpreter: String,

    /// Script location. Relative paths are resolved against `runner_dir`.
    #[serde(default = "default_script")]
    pub script: String,

    /// Directory the runner considers its own location.
    ///
    /// If `None`, the directory containing the current executable is used.
    #[serde(default)]
    pub runner_dir: Option<String>,

    /// Optional deadline, e.g. `"30s"` or `"5m"`. Absent means wait forever.
    #[serde(default)]
    pub timeout: Option<String>,

    /// How long to keep collecting buffered output after the process exits.
    #[serde(default = "default_drain_grace")]
    pub drain_grace: String,

    #[serde(default)]
    pub concurrency: ConcurrencyPolicy,
}

fn default_interpreter() -> String {
    "node".to_string()
}

fn default_script() -> String {
    crate::paths::DEFAULT_SCRIPT.to_string()
}

fn default_drain_grace() -> String {
    "500ms".to_string()
}

impl Default for SeederSection {
    fn default() -> Self {
        Self {
            interpreter: default_interpreter(),
            script: default_script(),
            runner_dir: None,
            timeout: None,
            drain_grace: default_drain_grace(),
            concurrency: ConcurrencyPolicy::default(),
        }
    }
}

impl SeederSection {
    /// The interpreter to launch, or `None` when the script runs directly.
    pub fn effective_interpreter(&self) -> Option<&str> {
        let trimmed = self.interpreter.trim();
        if trimmed.is_empty() { None } else { Some(trimmed) }
    }
}

/// `[ipc]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct IpcSection {
    /// Register development-only channels such as `dev:run-seeder`.
    #[serde(default = "default_dev_channels")]
    pub dev_channels: bool,
}

fn default_dev_channels() -> bool {
    true
}

impl Default for IpcSection {
    fn default() -> Self {
        Self {
            dev_channels: default_dev_channels(),
        }
    }
}
