// src/trigger/mod.rs

//! Trigger decision and dispatch.
//!
//! - [`should_trigger`] is the pure change-detection rule.
//! - [`backend`] performs the actual side effects (HTTP hook, shell command)
//!   behind the [`TriggerBackend`] trait so tests can record instead.
//! - [`dispatcher`] picks the action for a resource and honours dry-run.

pub mod backend;
pub mod dispatcher;

use std::fmt;

use crate::resource::Resource;

pub use backend::{Method, RealTriggerBackend, TriggerBackend};
pub use dispatcher::{DispatchOutcome, TriggerDispatcher};

/// Fire iff forced or the fresh digest differs from the stored one.
///
/// A missing stored digest counts as different, so the first observation of
/// a resource always fires.
pub fn should_trigger(force: bool, stored: Option<&str>, fresh: &str) -> bool {
    force || stored != Some(fresh)
}

/// What a fired trigger does for a resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerAction {
    /// HTTP request against the HOOK url.
    Hook { url: String, method: String },
    /// FREEFORM command line, passed verbatim to the shell.
    Command(String),
    /// Neither HOOK nor FREEFORM configured.
    Noop,
}

impl TriggerAction {
    /// HOOK takes priority over FREEFORM.
    pub fn for_resource(resource: &Resource) -> Self {
        if !resource.hook.is_empty() {
            TriggerAction::Hook {
                url: resource.hook.clone(),
                method: resource.request_method().to_string(),
            }
        } else if !resource.freeform.is_empty() {
            TriggerAction::Command(resource.freeform.clone())
        } else {
            TriggerAction::Noop
        }
    }
}

impl fmt::Display for TriggerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TriggerAction::Hook { url, method } => write!(f, "{url} ({method})"),
            TriggerAction::Command(cmd) => write!(f, "command `{cmd}`"),
            TriggerAction::Noop => f.write_str("nothing"),
        }
    }
}
