// src/errors.rs

//! Crate-wide error type and result alias.
//!
//! Only `Config` and `Cache` are fatal for a run. Everything else is scoped
//! to a single resource: the evaluator logs it and moves on.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HookwatchError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Descriptor error in {path:?} (line {line}): {message}")]
    DescriptorError {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("Resource '{0}' has no URL")]
    MissingUrl(String),

    #[error("Fetch of {url} failed: {reason}")]
    FetchError { url: String, reason: String },

    #[error("Trigger failed: {0}")]
    TriggerError(String),

    #[error("Cache I/O error at {path:?}: {source}")]
    CacheError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl HookwatchError {
    pub fn fetch(url: impl Into<String>, reason: impl ToString) -> Self {
        HookwatchError::FetchError {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    pub fn cache(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        HookwatchError::CacheError {
            path: path.into(),
            source,
        }
    }
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, HookwatchError>;
