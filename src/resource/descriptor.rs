// src/resource/descriptor.rs

//! Descriptor file parsing.
//!
//! A descriptor is a small env-style file:
//!
//! ```text
//! # comment
//! URL=https://example.com/status
//! START=^<table
//! END=^</table
//! HOOK=https://hooks.example.com/notify
//! REQUEST=POST
//! ```
//!
//! Problems with individual lines never abort the descriptor: they are
//! collected as [`HookwatchError::DescriptorError`]s, logged as warnings, and
//! the remaining lines still apply.

use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::errors::{HookwatchError, Result};
use crate::resource::model::{DescriptorKey, Resource};
use crate::resource::subst;

/// Outcome of parsing a single descriptor.
#[derive(Debug)]
pub struct ParsedDescriptor {
    pub resource: Resource,
    /// Lines that were skipped, in file order.
    pub issues: Vec<HookwatchError>,
}

/// Read and parse a descriptor file, logging every skipped line.
///
/// `pattern` is the discovery glob; its suffix is stripped from the file
/// name to form the resource name.
pub fn load_descriptor(path: &Path, pattern: &str, substitute: bool) -> Result<Resource> {
    let name = resource_name(path, pattern);
    // Cache entries are newline-delimited.
    if name.contains(['\n', '\r']) {
        return Err(HookwatchError::DescriptorError {
            path: path.to_path_buf(),
            line: 0,
            message: "resource name contains a line break".to_string(),
        });
    }
    let contents = fs::read_to_string(path)?;

    let parsed = parse_descriptor(&name, path, &contents, |value| {
        if substitute {
            subst::expand_env(value)
        } else {
            value.to_string()
        }
    });

    for issue in &parsed.issues {
        warn!(resource = %name, "{issue}; line skipped");
    }

    debug!(resource = %name, url = %parsed.resource.url, "loaded descriptor");
    Ok(parsed.resource)
}

/// Parse descriptor `contents` into a fresh [`Resource`].
///
/// `expand` is applied to every value that is not single-quoted.
pub fn parse_descriptor<F>(name: &str, path: &Path, contents: &str, expand: F) -> ParsedDescriptor
where
    F: Fn(&str) -> String,
{
    let mut resource = Resource::new(name);
    resource.descriptor = path.to_path_buf();
    let mut issues = Vec::new();

    for (idx, raw_line) in contents.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let issue = |message: String| HookwatchError::DescriptorError {
            path: path.to_path_buf(),
            line: idx + 1,
            message,
        };

        let line = line.strip_prefix("export ").map(str::trim_start).unwrap_or(line);

        let Some((key, value)) = line.split_once('=') else {
            issues.push(issue(format!("expected KEY=VALUE, got '{line}'")));
            continue;
        };

        let key = match key.trim().parse::<DescriptorKey>() {
            Ok(key) => key,
            Err(message) => {
                issues.push(issue(message));
                continue;
            }
        };

        let value = match unquote(value.trim()) {
            Quoted::Single(literal) => literal.to_string(),
            Quoted::Double(text) | Quoted::Bare(text) => expand(text),
        };

        resource.assign(key, value);
    }

    ParsedDescriptor { resource, issues }
}

/// Resource name for a descriptor: its file name with the glob's literal
/// suffix (e.g. `.env` for `*.env`) removed.
pub fn resource_name(path: &Path, pattern: &str) -> String {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let suffix = pattern.rsplit_once('*').map(|(_, s)| s).unwrap_or("");
    if suffix.is_empty() || suffix.contains(['?', '[', '{']) {
        return file_name;
    }

    match file_name.strip_suffix(suffix) {
        Some(stem) if !stem.is_empty() => stem.to_string(),
        _ => file_name,
    }
}

enum Quoted<'a> {
    Single(&'a str),
    Double(&'a str),
    Bare(&'a str),
}

fn unquote(value: &str) -> Quoted<'_> {
    if value.len() >= 2 {
        if let Some(inner) = value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')) {
            return Quoted::Single(inner);
        }
        if let Some(inner) = value.strip_prefix('"').and_then(|v| v.strip_suffix('"')) {
            return Quoted::Double(inner);
        }
    }
    Quoted::Bare(value)
}
