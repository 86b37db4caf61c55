// src/config/env.rs

use std::ffi::OsString;
use std::path::PathBuf;

pub const ROOT_ENV: &str = "HOOKWATCH_ROOT";
pub const RESOURCES_ENV: &str = "HOOKWATCH_RESOURCES";
pub const CACHE_ENV: &str = "HOOKWATCH_CACHE";
pub const PATTERN_ENV: &str = "HOOKWATCH_PATTERN";
pub const INTERVAL_ENV: &str = "HOOKWATCH_INTERVAL";

/// Snapshot of the environment variables that override defaults.
///
/// Read exactly once at startup; empty values count as unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvOverrides {
    pub root: Option<PathBuf>,
    pub resources: Option<PathBuf>,
    pub cache: Option<PathBuf>,
    pub pattern: Option<String>,
    pub interval: Option<String>,
}

impl EnvOverrides {
    /// Capture overrides from the process environment.
    pub fn from_process() -> Self {
        Self::from_vars(std::env::vars_os())
    }

    /// Capture overrides from an arbitrary set of variables.
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<OsString>,
        V: Into<OsString>,
    {
        let mut env = EnvOverrides::default();
        for (key, value) in vars {
            let key = key.into();
            let value = value.into();
            if value.is_empty() {
                continue;
            }
            match key.to_str() {
                Some(ROOT_ENV) => env.root = Some(PathBuf::from(value)),
                Some(RESOURCES_ENV) => env.resources = Some(PathBuf::from(value)),
                Some(CACHE_ENV) => env.cache = Some(PathBuf::from(value)),
                Some(PATTERN_ENV) => env.pattern = value.into_string().ok(),
                Some(INTERVAL_ENV) => env.interval = value.into_string().ok(),
                _ => {}
            }
        }
        env
    }
}
