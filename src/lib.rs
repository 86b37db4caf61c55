// src/lib.rs

pub mod cache;
pub mod cli;
pub mod config;
pub mod digest;
pub mod engine;
pub mod errors;
pub mod extract;
pub mod fetch;
pub mod logging;
pub mod resource;
pub mod trigger;
pub mod types;

use anyhow::Result;
use tracing::{debug, info};

use crate::cache::FileDigestStore;
use crate::cli::CliArgs;
use crate::config::{EnvOverrides, Settings};
use crate::digest::HashDigester;
use crate::engine::{shutdown_signal, Evaluator, Scheduler};
use crate::fetch::{http_client, HttpFetcher};
use crate::trigger::RealTriggerBackend;
use crate::types::Termination;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - settings resolution (defaults < environment < flags)
/// - the HTTP fetcher and trigger backend
/// - the file-backed digest cache
/// - the scheduler loop
/// - SIGINT / SIGTERM handling
pub async fn run(args: CliArgs) -> Result<Termination> {
    let env = EnvOverrides::from_process();
    let settings = config::resolve(&args, &env)?;
    debug!(?settings, "resolved settings");

    let scheduler = build_scheduler(&settings)?;

    if settings.dry_run {
        info!("dry-run mode: triggers are logged, not fired");
    }

    let termination = scheduler.run_until(shutdown_signal()).await?;
    Ok(termination)
}

/// Assemble the production scheduler for `settings`.
pub fn build_scheduler(settings: &Settings) -> crate::errors::Result<Scheduler> {
    let client = http_client()?;

    let evaluator = Evaluator::new(
        HttpFetcher::new(client.clone()),
        HashDigester::new(settings.algorithm),
        FileDigestStore::new(&settings.cache_path),
        RealTriggerBackend::new(client),
        settings.dry_run,
    )
    .with_force(settings.force)
    .with_digest_label(settings.digest_label());

    Scheduler::new(settings, evaluator)
}
