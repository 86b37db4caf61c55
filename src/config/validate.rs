// src/config/validate.rs

use globset::Glob;

use crate::config::duration::parse_interval;
use crate::config::model::{RawSettings, Settings};
use crate::digest::DigestAlgorithm;
use crate::errors::{HookwatchError, Result};

impl TryFrom<RawSettings> for Settings {
    type Error = HookwatchError;

    fn try_from(raw: RawSettings) -> std::result::Result<Self, Self::Error> {
        validate_resources_dir(&raw)?;
        validate_pattern(&raw)?;
        let algorithm = validate_checksum(&raw)?;
        let interval = match raw.interval.as_deref() {
            Some(s) => parse_interval(s).map_err(|e| {
                HookwatchError::ConfigError(format!("invalid interval '{s}': {e}"))
            })?,
            None => None,
        };
        Ok(Settings::new_unchecked(raw, algorithm, interval))
    }
}

fn validate_resources_dir(raw: &RawSettings) -> Result<()> {
    if !raw.resources_dir.is_dir() {
        return Err(HookwatchError::ConfigError(format!(
            "resources directory {:?} does not exist or is not a directory",
            raw.resources_dir
        )));
    }
    Ok(())
}

fn validate_pattern(raw: &RawSettings) -> Result<()> {
    if raw.pattern.trim().is_empty() {
        return Err(HookwatchError::ConfigError(
            "descriptor pattern must not be empty".to_string(),
        ));
    }
    Glob::new(&raw.pattern).map_err(|e| {
        HookwatchError::ConfigError(format!(
            "invalid descriptor pattern '{}': {}",
            raw.pattern, e
        ))
    })?;
    Ok(())
}

fn validate_checksum(raw: &RawSettings) -> Result<DigestAlgorithm> {
    raw.checksum
        .parse::<DigestAlgorithm>()
        .map_err(HookwatchError::ConfigError)
}
