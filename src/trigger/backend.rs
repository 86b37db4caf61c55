// src/trigger/backend.rs

//! Pluggable trigger backend.
//!
//! The dispatcher talks to a `TriggerBackend` instead of `reqwest` and
//! `tokio::process` directly, so tests can record invocations without any
//! network or process side effects.

use std::process::Stdio;

use reqwest::Client;
pub use reqwest::Method;
use tokio::process::Command;
use tracing::debug;

use crate::errors::{HookwatchError, Result};
use crate::types::BoxFuture;

/// Performs trigger side effects.
pub trait TriggerBackend: Send + Sync {
    /// Issue `method` against `url`; resolves to the HTTP status code. The
    /// response body is ignored.
    fn call_hook<'a>(&'a self, url: &'a str, method: Method) -> BoxFuture<'a, Result<u16>>;

    /// Run `command` through the platform shell; resolves to the exit code
    /// (`None` when killed by a signal).
    fn run_command<'a>(&'a self, command: &'a str) -> BoxFuture<'a, Result<Option<i32>>>;
}

/// Production backend: `reqwest` for hooks, `sh -c` for commands.
#[derive(Debug, Clone)]
pub struct RealTriggerBackend {
    client: Client,
}

impl RealTriggerBackend {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl TriggerBackend for RealTriggerBackend {
    fn call_hook<'a>(&'a self, url: &'a str, method: Method) -> BoxFuture<'a, Result<u16>> {
        Box::pin(async move {
            let response = self
                .client
                .request(method, url)
                .send()
                .await
                .map_err(|e| HookwatchError::TriggerError(format!("hook {url}: {e}")))?;
            Ok(response.status().as_u16())
        })
    }

    fn run_command<'a>(&'a self, command: &'a str) -> BoxFuture<'a, Result<Option<i32>>> {
        Box::pin(async move {
            // The command line is handed over verbatim; the shell does the
            // word splitting and quoting.
            let mut cmd = if cfg!(windows) {
                let mut c = Command::new("cmd");
                c.arg("/C").arg(command);
                c
            } else {
                let mut c = Command::new("sh");
                c.arg("-c").arg(command);
                c
            };

            cmd.stdin(Stdio::null())
                .stdout(Stdio::piped())
                .stderr(Stdio::piped())
                .kill_on_drop(true);

            let output = cmd.output().await.map_err(|e| {
                HookwatchError::TriggerError(format!("spawning `{command}`: {e}"))
            })?;

            for line in String::from_utf8_lossy(&output.stdout).lines() {
                debug!("stdout: {}", line);
            }
            for line in String::from_utf8_lossy(&output.stderr).lines() {
                debug!("stderr: {}", line);
            }

            Ok(output.status.code())
        })
    }
}
