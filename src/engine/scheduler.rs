// src/engine/scheduler.rs

use std::fs;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;

use globset::{Glob, GlobMatcher};
use tracing::{debug, info};

use crate::config::Settings;
use crate::engine::evaluator::{Evaluation, Evaluator};
use crate::errors::{HookwatchError, Result};
use crate::types::Termination;

/// Counters for one scan-and-evaluate cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleReport {
    pub evaluated: usize,
    pub triggered: usize,
    pub unchanged: usize,
    pub skipped: usize,
    pub fetch_failed: usize,
    pub trigger_failed: usize,
}

impl CycleReport {
    fn record(&mut self, evaluation: &Evaluation) {
        self.evaluated += 1;
        match evaluation {
            Evaluation::Skipped(_) => self.skipped += 1,
            Evaluation::FetchFailed(_) => self.fetch_failed += 1,
            Evaluation::Unchanged { .. } => self.unchanged += 1,
            Evaluation::Triggered { outcome, .. } => {
                self.triggered += 1;
                if outcome.is_failure() {
                    self.trigger_failed += 1;
                }
            }
        }
    }
}

/// Drives repeated evaluation of every descriptor in the resources
/// directory.
///
/// `INIT -> (SCAN -> EVALUATE_EACH -> SLEEP?)* -> TERMINATED`
///
/// Evaluation is strictly sequential and cycles never overlap: the interval
/// sleep starts only after a full cycle has completed.
#[derive(Debug)]
pub struct Scheduler {
    resources_dir: PathBuf,
    pattern: String,
    matcher: GlobMatcher,
    substitute: bool,
    interval: Option<Duration>,
    evaluator: Evaluator,
}

impl Scheduler {
    pub fn new(settings: &Settings, evaluator: Evaluator) -> Result<Self> {
        let matcher = Glob::new(&settings.pattern)
            .map_err(|e| {
                HookwatchError::ConfigError(format!(
                    "invalid descriptor pattern '{}': {}",
                    settings.pattern, e
                ))
            })?
            .compile_matcher();

        Ok(Self {
            resources_dir: settings.resources_dir.clone(),
            pattern: settings.pattern.clone(),
            matcher,
            substitute: settings.substitute,
            interval: settings.interval,
            evaluator,
        })
    }

    /// Descriptor files directly inside the resources directory matching
    /// the pattern, sorted by path.
    pub fn discover(&self) -> Result<Vec<PathBuf>> {
        discover_descriptors(&self.resources_dir, &self.matcher)
    }

    /// Scan once and evaluate every descriptor in order.
    pub async fn run_cycle(&mut self) -> Result<CycleReport> {
        let descriptors = self.discover()?;
        debug!(count = descriptors.len(), dir = ?self.resources_dir, "discovered descriptors");

        let mut report = CycleReport::default();
        for path in descriptors {
            let evaluation = self
                .evaluator
                .evaluate_descriptor(&path, &self.pattern, self.substitute)
                .await?;
            report.record(&evaluation);
        }

        info!(
            evaluated = report.evaluated,
            triggered = report.triggered,
            unchanged = report.unchanged,
            skipped = report.skipped,
            fetch_failed = report.fetch_failed,
            trigger_failed = report.trigger_failed,
            "cycle complete"
        );
        Ok(report)
    }

    /// Run cycles until one-shot completion or until `shutdown` resolves
    /// with a signal number.
    ///
    /// `shutdown` interrupts an in-flight cycle or the inter-cycle sleep.
    pub async fn run_until<S>(mut self, shutdown: S) -> Result<Termination>
    where
        S: Future<Output = i32>,
    {
        tokio::pin!(shutdown);
        info!(
            dir = ?self.resources_dir,
            pattern = %self.pattern,
            interval = ?self.interval,
            "scheduler started"
        );

        loop {
            tokio::select! {
                biased;
                sig = &mut shutdown => return Ok(interrupted(sig)),
                report = self.run_cycle() => { report?; }
            }

            let Some(interval) = self.interval else {
                info!("one-shot evaluation finished");
                return Ok(Termination::Completed);
            };

            debug!(?interval, "sleeping until next cycle");
            tokio::select! {
                biased;
                sig = &mut shutdown => return Ok(interrupted(sig)),
                _ = tokio::time::sleep(interval) => {}
            }
        }
    }
}

fn interrupted(sig: i32) -> Termination {
    info!(signal = sig, "termination requested; stopping");
    Termination::Signalled(sig)
}

/// Non-recursive, sorted descriptor discovery.
pub fn discover_descriptors(dir: &Path, matcher: &GlobMatcher) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| {
        HookwatchError::ConfigError(format!("reading resources directory {:?}: {}", dir, e))
    })?;

    let mut found = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let matches = path
            .file_name()
            .map(|name| matcher.is_match(Path::new(name)))
            .unwrap_or(false);
        if matches {
            found.push(path);
        }
    }
    found.sort();
    Ok(found)
}
