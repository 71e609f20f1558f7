//! Trace execution — explicit work-stack traversal and result accumulation.

pub mod executor;
pub mod result;
pub mod types;

pub use executor::run_trace;
pub use types::{TraceEdge, TraceResult, TraceState, TraceVertex};
