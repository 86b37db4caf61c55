// src/config/model.rs

use std::path::PathBuf;
use std::time::Duration;

use crate::digest::DigestAlgorithm;

/// Default descriptor glob.
pub const DEFAULT_PATTERN: &str = "*.env";

/// Default checksum program name.
pub const DEFAULT_CHECKSUM: &str = "sha256sum";

/// Name of the resources directory beside the program.
pub const DEFAULT_RESOURCES_DIR: &str = "resources";

/// Cache file name used when no cache path is configured.
pub const DEFAULT_CACHE_FILE: &str = ".hookwatch.sums";

/// Settings after layering, before validation.
///
/// Every field already has its final *source* decided (flag, environment or
/// default); nothing here has been checked against the filesystem yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSettings {
    pub resources_dir: PathBuf,
    pub cache_path: PathBuf,
    pub pattern: String,
    pub checksum: String,
    pub interval: Option<String>,
    pub dry_run: bool,
    pub substitute: bool,
    pub force: bool,
}

/// Validated, immutable run configuration.
///
/// Built once at startup by [`crate::config::resolve`] and shared read-only
/// by the scheduler and evaluator.
#[derive(Debug, Clone)]
pub struct Settings {
    pub resources_dir: PathBuf,
    pub cache_path: PathBuf,
    pub pattern: String,
    pub algorithm: DigestAlgorithm,
    /// Algorithm name as configured, kept for the log label.
    pub checksum_name: String,
    /// `None` means evaluate once and exit.
    pub interval: Option<Duration>,
    pub dry_run: bool,
    pub substitute: bool,
    pub force: bool,
}

impl Settings {
    pub(crate) fn new_unchecked(
        raw: RawSettings,
        algorithm: DigestAlgorithm,
        interval: Option<Duration>,
    ) -> Self {
        Self {
            resources_dir: raw.resources_dir,
            cache_path: raw.cache_path,
            pattern: raw.pattern,
            algorithm,
            checksum_name: raw.checksum,
            interval,
            dry_run: raw.dry_run,
            substitute: raw.substitute,
            force: raw.force,
        }
    }

    /// One-shot runs evaluate every descriptor a single time.
    pub fn is_one_shot(&self) -> bool {
        self.interval.is_none()
    }

    /// Human-readable digest label, e.g. `sha256` for `sha256sum`.
    pub fn digest_label(&self) -> &str {
        crate::digest::label_for(&self.checksum_name)
    }
}
