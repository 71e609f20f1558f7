//! Trace result types.

use gridtrace_core::model::segment::PropertyMap;
use serde::{Deserialize, Serialize};

/// Message set when a trace recorded vertices but crossed no edge.
pub const STOPPED_AT_START_MESSAGE: &str = "the trace stopped at the starting point";

/// A vertex accepted into the trace result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceVertex {
    pub key: String,
    pub props: PropertyMap,
}

/// An edge accepted into the trace result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceEdge {
    pub key: String,
    pub src_vertex_key: String,
    pub dst_vertex_key: String,
    pub props: PropertyMap,
}

/// Ordered result of one trace call.
///
/// `abort_message` is set on soft termination (rule abort, vertex ceiling,
/// or the degenerate stopped-at-start outcome); the vertex and edge lists
/// hold whatever was accumulated up to that point.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TraceResult {
    pub vertexes: Vec<TraceVertex>,
    pub edges: Vec<TraceEdge>,
    pub abort_message: Option<String>,
}

impl TraceResult {
    /// True when the trace ran to completion without any soft termination.
    pub fn is_clean(&self) -> bool {
        self.abort_message.is_none()
    }
}

/// Lifecycle of one trace call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceState {
    Ready,
    Running,
    Completed,
    Aborted,
}

impl TraceState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Ready => "ready",
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Aborted => "aborted",
        }
    }
}
