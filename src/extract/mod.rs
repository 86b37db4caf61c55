// src/extract/mod.rs

//! Block extraction: narrow fetched content to the lines between a start and
//! an end marker before it is digested.
//!
//! Markers are regular expressions matched per line, unanchored, against the
//! line without its terminator. Matching works on raw bytes so non-UTF-8
//! bodies are handled.
//!
//! | start | end | result |
//! |---|---|---|
//! | unset | unset | everything |
//! | unset | set | first line through the first end match |
//! | set | unset | first start match through the last line |
//! | set | set | first start match through the next end match (or the last line) |
//!
//! A start marker that never matches yields an empty block. The end marker is
//! checked on the start line too, so a line matching both is a one-line block.

use regex::bytes::Regex;

use crate::errors::{HookwatchError, Result};
use crate::resource::Resource;

/// Compiled start/end markers for one resource.
#[derive(Debug, Clone, Default)]
pub struct BlockRange {
    pub start: Option<Regex>,
    pub end: Option<Regex>,
}

impl BlockRange {
    /// Compile a range from raw pattern strings; empty strings mean unset.
    pub fn new(start: &str, end: &str) -> std::result::Result<Self, regex::Error> {
        Ok(Self {
            start: compile_optional(start)?,
            end: compile_optional(end)?,
        })
    }

    /// Compile the resource's START / END patterns.
    pub fn for_resource(resource: &Resource) -> Result<Self> {
        Self::new(&resource.start, &resource.end).map_err(|e| {
            HookwatchError::DescriptorError {
                path: resource.descriptor.clone(),
                line: 0,
                message: format!("invalid START/END pattern: {e}"),
            }
        })
    }
}

fn compile_optional(pattern: &str) -> std::result::Result<Option<Regex>, regex::Error> {
    if pattern.is_empty() {
        Ok(None)
    } else {
        Regex::new(pattern).map(Some)
    }
}

/// Selects the part of the content that is digested.
pub trait Extractor: Send + Sync {
    fn extract(&self, content: &[u8], range: &BlockRange) -> Vec<u8>;
}

/// Default line-oriented extractor.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineBlockExtractor;

impl Extractor for LineBlockExtractor {
    fn extract(&self, content: &[u8], range: &BlockRange) -> Vec<u8> {
        if range.start.is_none() && range.end.is_none() {
            return content.to_vec();
        }

        let mut block = Vec::new();
        let mut inside = range.start.is_none();

        for line in content.split_inclusive(|b| *b == b'\n') {
            let text = strip_terminator(line);

            if !inside {
                match range.start {
                    Some(ref start) if start.is_match(text) => inside = true,
                    _ => continue,
                }
            }

            block.extend_from_slice(line);

            if let Some(ref end) = range.end {
                if end.is_match(text) {
                    break;
                }
            }
        }

        block
    }
}

fn strip_terminator(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}
