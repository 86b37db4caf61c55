// src/digest/mod.rs

//! Content digesting.
//!
//! The evaluator only talks to the [`Digester`] trait so tests can swap in a
//! deterministic fake. [`HashDigester`] is the production implementation and
//! supports SHA-256 (default), SHA-512 and BLAKE3. All digests are lowercase
//! hex.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use sha2::{Digest, Sha256, Sha512};

/// Computes the checksum of extracted content.
pub trait Digester: Send + Sync {
    fn digest(&self, content: &[u8]) -> String;
}

/// Supported digest algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DigestAlgorithm {
    #[default]
    Sha256,
    Sha512,
    Blake3,
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DigestAlgorithm::Sha256 => "sha256",
            DigestAlgorithm::Sha512 => "sha512",
            DigestAlgorithm::Blake3 => "blake3",
        };
        f.write_str(name)
    }
}

impl FromStr for DigestAlgorithm {
    type Err = String;

    /// Accepts bare names (`sha256`), checksum program names (`sha256sum`,
    /// `b3sum`) and paths to those programs (`/usr/bin/sha512sum`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = label_for(s).to_lowercase().replace('-', "");
        match normalized.as_str() {
            "sha256" => Ok(DigestAlgorithm::Sha256),
            "sha512" => Ok(DigestAlgorithm::Sha512),
            "blake3" | "b3" => Ok(DigestAlgorithm::Blake3),
            _ => Err(format!(
                "unsupported checksum '{}' (expected sha256sum, sha512sum or b3sum)",
                s.trim()
            )),
        }
    }
}

/// Human-readable label for a configured checksum name: the program's file
/// name with a trailing `sum` removed.
pub fn label_for(name: &str) -> &str {
    let name = name.trim();
    let base = Path::new(name)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(name);
    match base.strip_suffix("sum") {
        Some(stripped) if !stripped.is_empty() => stripped,
        _ => base,
    }
}

/// Default digester backed by in-process hash implementations.
#[derive(Debug, Clone, Copy, Default)]
pub struct HashDigester {
    algorithm: DigestAlgorithm,
}

impl HashDigester {
    pub fn new(algorithm: DigestAlgorithm) -> Self {
        Self { algorithm }
    }

    pub fn algorithm(&self) -> DigestAlgorithm {
        self.algorithm
    }
}

impl Digester for HashDigester {
    fn digest(&self, content: &[u8]) -> String {
        match self.algorithm {
            DigestAlgorithm::Sha256 => format!("{:x}", Sha256::digest(content)),
            DigestAlgorithm::Sha512 => format!("{:x}", Sha512::digest(content)),
            DigestAlgorithm::Blake3 => blake3::hash(content).to_hex().to_string(),
        }
    }
}
