// src/config/mod.rs

//! Startup configuration for hookwatch.
//!
//! Responsibilities:
//! - Define the layered raw settings and the validated `Settings` (`model.rs`).
//! - Snapshot the environment overrides once (`env.rs`).
//! - Layer defaults < environment < flags (`loader.rs`).
//! - Validate and freeze the result (`validate.rs`).
//! - Parse human-readable intervals (`duration.rs`).

pub mod duration;
pub mod env;
pub mod loader;
pub mod model;
pub mod validate;

pub use duration::parse_interval;
pub use env::EnvOverrides;
pub use loader::{layer, resolve};
pub use model::{RawSettings, Settings};
