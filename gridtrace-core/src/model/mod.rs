//! Graph and rule model shared by the engine and its callers.

pub mod rule;
pub mod segment;

pub use rule::{
    PropertyValueKind, RuleAction, RuleScope, TraceConfig, TraceRule, TRACE_BOTH,
    TRACE_DOWNSTREAM, TRACE_UPSTREAM,
};
pub use segment::{Edge, EdgeDirection, PropertyMap, Segment, Vertex};
