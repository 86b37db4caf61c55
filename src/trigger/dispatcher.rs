// src/trigger/dispatcher.rs

use std::fmt;

use reqwest::Method;
use tracing::{info, warn};

use crate::errors::HookwatchError;
use crate::resource::Resource;
use crate::trigger::backend::TriggerBackend;
use crate::trigger::TriggerAction;

/// Result of dispatching a fired trigger.
///
/// Dispatch never fails the evaluation: trigger errors are captured here and
/// logged, and the caller still records the new digest.
#[derive(Debug)]
pub enum DispatchOutcome {
    /// Dry-run: the action that would have been performed.
    DryRun(TriggerAction),
    /// Hook answered with this status.
    Hook { url: String, status: u16 },
    /// Command exited with this code.
    Command { command: String, code: Option<i32> },
    /// Hook or command could not be performed.
    Failed(HookwatchError),
    /// Nothing configured to fire.
    Noop,
}

impl DispatchOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, DispatchOutcome::Failed(_))
    }
}

/// Fires the configured action for a resource.
pub struct TriggerDispatcher {
    backend: Box<dyn TriggerBackend>,
    dry_run: bool,
}

impl fmt::Debug for TriggerDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TriggerDispatcher")
            .field("dry_run", &self.dry_run)
            .finish_non_exhaustive()
    }
}

impl TriggerDispatcher {
    pub fn new(backend: impl TriggerBackend + 'static, dry_run: bool) -> Self {
        Self {
            backend: Box::new(backend),
            dry_run,
        }
    }

    pub async fn dispatch(&self, resource: &Resource) -> DispatchOutcome {
        let action = TriggerAction::for_resource(resource);

        if action == TriggerAction::Noop {
            info!(resource = %resource.name, "change detected but no HOOK or FREEFORM configured");
            return DispatchOutcome::Noop;
        }

        if self.dry_run {
            info!(resource = %resource.name, "dry-run: would trigger {}", action);
            return DispatchOutcome::DryRun(action);
        }

        let outcome = match action {
            TriggerAction::Hook { url, method } => self.fire_hook(url, &method).await,
            TriggerAction::Command(command) => self.fire_command(command).await,
            TriggerAction::Noop => DispatchOutcome::Noop,
        };

        match outcome {
            DispatchOutcome::Hook { ref url, status } => {
                info!(resource = %resource.name, hook = %url, status, "hook triggered");
            }
            DispatchOutcome::Command { ref command, code } => {
                info!(resource = %resource.name, command = %command, exit_code = ?code, "command triggered");
            }
            DispatchOutcome::Failed(ref err) => {
                warn!(resource = %resource.name, error = %err, "trigger failed");
            }
            DispatchOutcome::DryRun(_) | DispatchOutcome::Noop => {}
        }

        outcome
    }

    async fn fire_hook(&self, url: String, method: &str) -> DispatchOutcome {
        let method = match Method::from_bytes(method.to_uppercase().as_bytes()) {
            Ok(m) => m,
            Err(e) => {
                return DispatchOutcome::Failed(HookwatchError::TriggerError(format!(
                    "invalid REQUEST method '{method}': {e}"
                )));
            }
        };

        match self.backend.call_hook(&url, method).await {
            Ok(status) => DispatchOutcome::Hook { url, status },
            Err(err) => DispatchOutcome::Failed(err),
        }
    }

    async fn fire_command(&self, command: String) -> DispatchOutcome {
        match self.backend.run_command(&command).await {
            Ok(code) => DispatchOutcome::Command { command, code },
            Err(err) => DispatchOutcome::Failed(err),
        }
    }
}
