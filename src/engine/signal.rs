// src/engine/signal.rs

//! Termination signals.

use tracing::warn;

/// Signal number reported for Ctrl-C.
pub const SIGINT: i32 = 2;
/// Signal number reported for termination requests.
pub const SIGTERM: i32 = 15;

/// Resolve when SIGINT or SIGTERM arrives, yielding the signal number.
#[cfg(unix)]
pub async fn shutdown_signal() -> i32 {
    use tokio::signal::unix::{signal, SignalKind};

    let mut term = match signal(SignalKind::terminate()) {
        Ok(stream) => stream,
        Err(e) => {
            warn!(error = %e, "failed to install SIGTERM handler; only Ctrl-C will stop the run");
            return ctrl_c().await;
        }
    };

    tokio::select! {
        sig = ctrl_c() => sig,
        _ = term.recv() => SIGTERM,
    }
}

/// Resolve on Ctrl-C, yielding [`SIGINT`].
#[cfg(not(unix))]
pub async fn shutdown_signal() -> i32 {
    ctrl_c().await
}

async fn ctrl_c() -> i32 {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    SIGINT
}
