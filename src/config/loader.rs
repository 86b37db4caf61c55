// src/config/loader.rs

use std::path::{Path, PathBuf};

use crate::cli::CliArgs;
use crate::config::env::EnvOverrides;
use crate::config::model::{
    RawSettings, Settings, DEFAULT_CACHE_FILE, DEFAULT_CHECKSUM, DEFAULT_PATTERN,
    DEFAULT_RESOURCES_DIR,
};
use crate::errors::Result;

/// Layer defaults < environment < flags into unchecked settings.
///
/// This performs no IO; use [`resolve`] for the validated result.
pub fn layer(args: &CliArgs, env: &EnvOverrides, program_dir: &Path) -> RawSettings {
    let root = env
        .root
        .clone()
        .unwrap_or_else(|| program_dir.to_path_buf());

    let resources_dir = args
        .resources
        .as_ref()
        .map(PathBuf::from)
        .or_else(|| env.resources.clone())
        .unwrap_or_else(|| root.join(DEFAULT_RESOURCES_DIR));

    let cache_path = args
        .cache
        .as_ref()
        .map(PathBuf::from)
        .or_else(|| env.cache.clone())
        .unwrap_or_else(|| resources_dir.join(DEFAULT_CACHE_FILE));

    let pattern = args
        .pattern
        .clone()
        .or_else(|| env.pattern.clone())
        .unwrap_or_else(|| DEFAULT_PATTERN.to_string());

    let checksum = args
        .check
        .clone()
        .unwrap_or_else(|| DEFAULT_CHECKSUM.to_string());

    let interval = args.interval.clone().or_else(|| env.interval.clone());

    RawSettings {
        resources_dir,
        cache_path,
        pattern,
        checksum,
        interval,
        dry_run: args.dry_run,
        substitute: !args.no_subst,
        force: args.force,
    }
}

/// Resolve and validate the run configuration.
///
/// This is the recommended entry point for the rest of the application:
///
/// - Layers flags over environment over defaults.
/// - Checks that the resources directory is usable.
/// - Checks the glob, digest algorithm and interval.
pub fn resolve(args: &CliArgs, env: &EnvOverrides) -> Result<Settings> {
    let raw = layer(args, env, &program_dir());
    Settings::try_from(raw)
}

/// Directory containing the running executable.
///
/// Falls back to the current working directory when the executable path
/// cannot be determined.
pub fn program_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}
