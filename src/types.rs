// src/types.rs

//! Small shared types.

use std::future::Future;
use std::pin::Pin;

/// Boxed, sendable future returned by the pluggable IO traits
/// ([`crate::fetch::Fetcher`], [`crate::trigger::TriggerBackend`]).
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// One-shot evaluation finished.
    Completed,
    /// Interrupted by the given signal number.
    Signalled(i32),
}

impl Termination {
    /// Process exit code: 0 on completion, `128 + signal` otherwise.
    pub fn exit_code(self) -> i32 {
        match self {
            Termination::Completed => 0,
            Termination::Signalled(sig) => 128 + sig,
        }
    }
}
