// src/logging.rs

//! Logging setup for `hookwatch` using `tracing` + `tracing-subscriber`.
//!
//! Priority for determining the log level:
//! 1. `--verbose` CLI flag (if provided)
//! 2. `HOOKWATCH_LOG` environment variable (e.g. "info", "debug", "3")
//! 3. default to `info`
//!
//! Logs go to STDERR; the freeform trigger's own output is captured and
//! re-logged rather than interleaved on stdout.

use anyhow::Result;
use tracing_subscriber::fmt;

use crate::cli::LogLevel;

pub const LOG_ENV: &str = "HOOKWATCH_LOG";

/// Initialise global logging subscriber.
///
/// Safe to call once at startup.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let level = match cli_level {
        Some(lvl) => level_from_log_level(lvl),
        None => std::env::var(LOG_ENV)
            .ok()
            .and_then(|s| parse_level_str(&s))
            .unwrap_or(tracing::Level::INFO),
    };

    fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("installing log subscriber: {e}"))?;

    Ok(())
}

fn level_from_log_level(lvl: LogLevel) -> tracing::Level {
    match lvl {
        LogLevel::Error => tracing::Level::ERROR,
        LogLevel::Warn => tracing::Level::WARN,
        LogLevel::Info => tracing::Level::INFO,
        LogLevel::Debug => tracing::Level::DEBUG,
        LogLevel::Trace => tracing::Level::TRACE,
    }
}

pub fn parse_level_str(s: &str) -> Option<tracing::Level> {
    match s.trim().to_lowercase().as_str() {
        "error" | "0" => Some(tracing::Level::ERROR),
        "warn" | "warning" | "1" => Some(tracing::Level::WARN),
        "info" | "2" => Some(tracing::Level::INFO),
        "debug" | "3" => Some(tracing::Level::DEBUG),
        "trace" | "4" => Some(tracing::Level::TRACE),
        _ => None,
    }
}
