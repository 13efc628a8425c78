// src/config/validate.rs

use crate::config::duration::parse_duration;
use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{Result, SeedrunError};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::SeedrunError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.seeder, raw.ipc))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_script(cfg)?;
    validate_timeout(cfg)?;
    validate_drain_grace(cfg)?;
    Ok(())
}

fn validate_script(cfg: &RawConfigFile) -> Result<()> {
    if cfg.seeder.script.trim().is_empty() {
        return Err(SeedrunError::ConfigError(
            "[seeder].script must not be empty".to_string(),
        ));
    }
    if let Some(dir) = &cfg.seeder.runner_dir {
        if dir.trim().is_empty() {
            return Err(SeedrunError::ConfigError(
                "[seeder].runner_dir must not be empty when set".to_string(),
            ));
        }
    }
    Ok(())
}

fn validate_timeout(cfg: &RawConfigFile) -> Result<()> {
    let Some(raw) = &cfg.seeder.timeout else {
        return Ok(());
    };

    let timeout = parse_duration(raw).map_err(|e| {
        SeedrunError::ConfigError(format!("[seeder].timeout is invalid: {e}"))
    })?;

    if timeout.is_zero() {
        return Err(SeedrunError::ConfigError(
            "[seeder].timeout must be greater than zero (omit it to wait forever)".to_string(),
        ));
    }
    Ok(())
}

fn validate_drain_grace(cfg: &RawConfigFile) -> Result<()> {
    parse_duration(&cfg.seeder.drain_grace).map_err(|e| {
        SeedrunError::ConfigError(format!("[seeder].drain_grace is invalid: {e}"))
    })?;
    Ok(())
}
