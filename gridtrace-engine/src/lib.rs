//! # gridtrace-engine
//!
//! Rule-driven connectivity tracing over a segmented graph. Answers
//! "what is reachable from this point, subject to these stop/continue/abort
//! rules?" without ever holding the whole graph in memory: the graph is
//! partitioned into segments fetched on demand through a `SegmentStore`, and
//! boundary vertices (same key replicated into adjoining segments) carry the
//! trace across partitions.

pub mod rules;
pub mod trace;

pub use rules::{compile_rules, CompiledRule, MatchOutcome, RuleTarget};
pub use trace::{run_trace, TraceEdge, TraceResult, TraceVertex};
