// src/cache/mod.rs

//! Persisted name -> digest store.
//!
//! The on-disk format matches `sha256sum` output, one resource per line:
//!
//! ```text
//! <hex-digest>  <resource-name>
//! ```
//!
//! A missing cache file is an empty store. Any other IO failure is returned
//! as [`HookwatchError::CacheError`], which the scheduler treats as fatal.
//!
//! There is no locking: two processes sharing one cache path can lose each
//! other's updates. Run a single instance per cache file.

use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::errors::{HookwatchError, Result};

/// Abstract storage for resource digests.
pub trait DigestStore: Send {
    /// Digest recorded for `name`, if any.
    fn lookup(&self, name: &str) -> Result<Option<String>>;
    /// Record `digest` for `name`, replacing any previous value.
    fn upsert(&mut self, name: &str, digest: &str) -> Result<()>;
}

/// Stores digests in a line-oriented file.
#[derive(Debug, Clone)]
pub struct FileDigestStore {
    path: PathBuf,
}

impl FileDigestStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw lines of the cache file; empty when the file does not exist.
    fn read_lines(&self) -> Result<Vec<String>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(contents.lines().map(str::to_string).collect()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(HookwatchError::cache(&self.path, e)),
        }
    }

    /// Replace the cache file with `lines` via a temp file + rename.
    fn write_lines(&self, lines: &[String]) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir).map_err(|e| HookwatchError::cache(&dir, e))?;

        let mut tmp =
            NamedTempFile::new_in(&dir).map_err(|e| HookwatchError::cache(&dir, e))?;
        let tmp_path = tmp.path().to_path_buf();
        for line in lines {
            writeln!(tmp, "{line}").map_err(|e| HookwatchError::cache(&tmp_path, e))?;
        }
        tmp.flush()
            .map_err(|e| HookwatchError::cache(&tmp_path, e))?;
        tmp.persist(&self.path)
            .map_err(|e| HookwatchError::cache(&self.path, e.error))?;
        Ok(())
    }
}

impl DigestStore for FileDigestStore {
    fn lookup(&self, name: &str) -> Result<Option<String>> {
        let lines = self.read_lines()?;
        Ok(lines
            .iter()
            .filter_map(|line| parse_line(line))
            .find(|(_, entry)| *entry == name)
            .map(|(digest, _)| digest.to_string()))
    }

    fn upsert(&mut self, name: &str, digest: &str) -> Result<()> {
        let mut lines = self.read_lines()?;
        let new_line = format_line(name, digest);

        let mut seen = false;
        let mut changed = false;
        lines.retain_mut(|line| {
            let Some((old_digest, entry)) = parse_line(line) else {
                return true;
            };
            if entry != name {
                return true;
            }
            if seen {
                // Drop duplicate entries left behind by hand edits.
                changed = true;
                return false;
            }
            seen = true;
            if old_digest != digest {
                *line = new_line.clone();
                changed = true;
            }
            true
        });

        if !seen {
            lines.push(new_line);
            changed = true;
        }

        if !changed {
            debug!(resource = %name, "digest unchanged; cache not rewritten");
            return Ok(());
        }

        self.write_lines(&lines)?;
        info!(resource = %name, digest = %digest, path = ?self.path, "stored resource digest");
        Ok(())
    }
}

/// Stores digests in memory only (lost on restart).
#[derive(Debug, Default)]
pub struct MemoryDigestStore {
    map: HashMap<String, String>,
}

impl MemoryDigestStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl DigestStore for MemoryDigestStore {
    fn lookup(&self, name: &str) -> Result<Option<String>> {
        Ok(self.map.get(name).cloned())
    }

    fn upsert(&mut self, name: &str, digest: &str) -> Result<()> {
        self.map.insert(name.to_string(), digest.to_string());
        debug!(resource = %name, digest = %digest, "stored resource digest (memory)");
        Ok(())
    }
}

/// Split a cache line into `(digest, name)`.
///
/// Tolerates the `*` binary-mode marker that checksum tools put before the
/// name.
pub fn parse_line(line: &str) -> Option<(&str, &str)> {
    let trimmed = line.trim_end();
    let (digest, rest) = trimmed.split_once(char::is_whitespace)?;
    let name = rest.trim_start();
    let name = name.strip_prefix('*').unwrap_or(name);
    if digest.is_empty() || name.is_empty() {
        return None;
    }
    Some((digest, name))
}

/// Render one cache line.
pub fn format_line(name: &str, digest: &str) -> String {
    format!("{digest}  {name}")
}
