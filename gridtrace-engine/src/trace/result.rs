//! Append-only result accumulator with the optional vertex ceiling.

use gridtrace_core::model::segment::{Edge, Vertex};

use super::types::{TraceEdge, TraceResult, TraceVertex, STOPPED_AT_START_MESSAGE};

/// Soft abort raised while accumulating. Carries the user-facing message.
#[derive(Debug)]
pub(crate) struct SoftAbort(pub String);

/// Append-only builder for a `TraceResult`.
///
/// Nothing is ever removed or reordered after insertion. Vertices are
/// count-limited by the optional ceiling; edges never are.
#[derive(Debug)]
pub(crate) struct TraceAccumulator {
    result: TraceResult,
    max_vertexes: Option<usize>,
}

impl TraceAccumulator {
    pub fn new(max_vertexes: Option<usize>) -> Self {
        Self {
            result: TraceResult::default(),
            max_vertexes,
        }
    }

    /// Record a vertex. Hitting the configured ceiling aborts the trace
    /// before appending, so the result never exceeds the ceiling.
    pub fn add_vertex(&mut self, vertex: &Vertex) -> Result<(), SoftAbort> {
        if let Some(max) = self.max_vertexes {
            if self.result.vertexes.len() >= max {
                return Err(SoftAbort(format!(
                    "trace exceeded maximum vertexes of {max}"
                )));
            }
        }
        self.result.vertexes.push(TraceVertex {
            key: vertex.key.clone(),
            props: vertex.props.clone(),
        });
        Ok(())
    }

    pub fn add_edge(&mut self, edge: &Edge) {
        self.result.edges.push(TraceEdge {
            key: edge.key.clone(),
            src_vertex_key: edge.src_vertex_key.clone(),
            dst_vertex_key: edge.dst_vertex_key.clone(),
            props: edge.props.clone(),
        });
    }

    pub fn vertex_count(&self) -> usize {
        self.result.vertexes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.result.edges.len()
    }

    /// Finalize the result. A trace that recorded at least one vertex but
    /// crossed no edge gets the canned stopped-at-start message, unless a
    /// rule abort already supplied one.
    pub fn finish(mut self, abort_message: Option<String>) -> TraceResult {
        self.result.abort_message = abort_message;
        if self.result.abort_message.is_none()
            && !self.result.vertexes.is_empty()
            && self.result.edges.is_empty()
        {
            self.result.abort_message = Some(STOPPED_AT_START_MESSAGE.to_string());
        }
        self.result
    }
}
