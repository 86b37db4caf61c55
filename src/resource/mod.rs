// src/resource/mod.rs

//! Monitored resources and their descriptor files.
//!
//! - [`model`] defines the per-descriptor [`Resource`] record.
//! - [`descriptor`] parses `KEY=VALUE` descriptor files.
//! - [`subst`] expands `$VAR` references in descriptor values.

pub mod descriptor;
pub mod model;
pub mod subst;

pub use descriptor::{load_descriptor, parse_descriptor, resource_name, ParsedDescriptor};
pub use model::{DescriptorKey, Resource, DEFAULT_REQUEST_METHOD};
