use std::sync::{Arc, Mutex};

use hookwatch::errors::{HookwatchError, Result};
use hookwatch::trigger::TriggerBackend;
use hookwatch::types::BoxFuture;
use hookwatch::trigger::Method;

/// A trigger invocation seen by [`RecordingBackend`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedTrigger {
    Hook { url: String, method: String },
    Command(String),
}

/// A fake trigger backend that:
/// - records hook and command invocations instead of performing them
/// - answers hooks with 200 and commands with exit code 0
/// - can be told to fail every invocation
#[derive(Debug, Clone, Default)]
pub struct RecordingBackend {
    calls: Arc<Mutex<Vec<RecordedTrigger>>>,
    fail: Arc<Mutex<bool>>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend whose invocations all fail with a trigger error.
    pub fn failing() -> Self {
        let backend = Self::default();
        backend.set_failing(true);
        backend
    }

    pub fn set_failing(&self, fail: bool) {
        *self.fail.lock().unwrap() = fail;
    }

    pub fn calls(&self) -> Vec<RecordedTrigger> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: RecordedTrigger) -> Result<()> {
        self.calls.lock().unwrap().push(call);
        if *self.fail.lock().unwrap() {
            return Err(HookwatchError::TriggerError("simulated failure".to_string()));
        }
        Ok(())
    }
}

impl TriggerBackend for RecordingBackend {
    fn call_hook<'a>(&'a self, url: &'a str, method: Method) -> BoxFuture<'a, Result<u16>> {
        Box::pin(async move {
            self.record(RecordedTrigger::Hook {
                url: url.to_string(),
                method: method.to_string(),
            })?;
            Ok(200)
        })
    }

    fn run_command<'a>(&'a self, command: &'a str) -> BoxFuture<'a, Result<Option<i32>>> {
        Box::pin(async move {
            self.record(RecordedTrigger::Command(command.to_string()))?;
            Ok(Some(0))
        })
    }
}
