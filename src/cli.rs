// src/cli.rs

//! CLI argument parsing using `clap`.
//!
//! Every path-like option is optional here: unset flags fall through to the
//! environment and then to built-in defaults in [`crate::config::loader`].

use clap::{Parser, ValueEnum};

/// Command-line arguments for `hookwatch`.
#[derive(Debug, Clone, Default, Parser)]
#[command(
    name = "hookwatch",
    version,
    about = "Watch remote resources and fire a webhook or command when their content changes.",
    long_about = None
)]
pub struct CliArgs {
    /// Cache file location.
    ///
    /// Default: `.hookwatch.sums` inside the resources directory.
    #[arg(short = 'c', long, value_name = "PATH")]
    pub cache: Option<String>,

    /// Directory holding the resource descriptors.
    ///
    /// Default: `resources` beside the program.
    #[arg(short = 'r', long, visible_alias = "rsc", value_name = "DIR")]
    pub resources: Option<String>,

    /// Digest algorithm (sha256sum, sha512sum, b3sum, ...).
    #[arg(long, visible_aliases = ["sum", "checksum"], value_name = "NAME")]
    pub check: Option<String>,

    /// Glob selecting descriptor files inside the resources directory.
    #[arg(long, value_name = "GLOB")]
    pub pattern: Option<String>,

    /// Repeat evaluation every DURATION (e.g. `30`, `5m`, `1h30m`).
    ///
    /// Without an interval (or with a negative one) resources are evaluated
    /// once and the program exits.
    #[arg(short = 'i', long, value_name = "DURATION", allow_hyphen_values = true)]
    pub interval: Option<String>,

    /// Log the triggers that would fire, without firing them.
    #[arg(long, visible_alias = "dryrun")]
    pub dry_run: bool,

    /// Do not expand `$VAR` references in descriptor values.
    #[arg(long)]
    pub no_subst: bool,

    /// Trigger every resource regardless of its cached digest.
    #[arg(long)]
    pub force: bool,

    /// Logging level (error, warn, info, debug, trace or 0-4).
    ///
    /// If omitted, `HOOKWATCH_LOG` or a default level will be used.
    #[arg(short = 'v', long, value_enum, value_name = "LEVEL")]
    pub verbose: Option<LogLevel>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    #[value(alias = "0")]
    Error,
    #[value(alias = "1", alias = "warning")]
    Warn,
    #[value(alias = "2")]
    Info,
    #[value(alias = "3")]
    Debug,
    #[value(alias = "4")]
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
///
/// On a usage error clap prints the message and exits with status 2; `--help`
/// prints usage and exits with status 0.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
