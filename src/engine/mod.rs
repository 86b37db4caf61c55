// src/engine/mod.rs

//! Evaluation engine for hookwatch.
//!
//! - [`evaluator`] runs the per-resource pipeline (fetch, extract, digest,
//!   compare, dispatch, record).
//! - [`scheduler`] discovers descriptors and drives evaluation cycles, one
//!   resource at a time, optionally repeating on an interval.
//! - [`signal`] turns SIGINT / SIGTERM into a shutdown future.

pub mod evaluator;
pub mod scheduler;
pub mod signal;

pub use evaluator::{Evaluation, Evaluator};
pub use scheduler::{discover_descriptors, CycleReport, Scheduler};
pub use signal::shutdown_signal;
