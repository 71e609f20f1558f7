//! # gridtrace-core
//!
//! Core types for the Gridtrace trace engine: the segmented graph model,
//! trace rule definitions, subsystem errors, TOML rule-config loading,
//! and the `SegmentStore` seam to the host application.

pub mod config;
pub mod errors;
pub mod model;
pub mod traits;
pub mod types;
