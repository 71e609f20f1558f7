//! Trace execution errors.

use super::RuleError;

/// Fatal errors from a trace call.
///
/// These indicate corrupt or inconsistent input data, not a normal outcome;
/// no partial result is produced. Rule-triggered aborts and the vertex
/// ceiling are soft terminations and are reported inside the trace result
/// instead.
#[derive(Debug, thiserror::Error)]
pub enum TraceError {
    #[error("start key '{start_key}' not found in any candidate segment")]
    StartKeyNotFound { start_key: String },

    #[error("segment '{segment_key}' not found in the segment store")]
    SegmentNotFound { segment_key: String },

    #[error("boundary vertex '{vertex_key}' missing from linked segment '{segment_key}'")]
    BoundaryVertexNotFound {
        vertex_key: String,
        segment_key: String,
    },

    #[error("vertex '{vertex_key}' missing from segment '{segment_key}'")]
    VertexNotFound {
        vertex_key: String,
        segment_key: String,
    },

    #[error("edge '{edge_key}' missing from segment '{segment_key}'")]
    EdgeNotFound {
        edge_key: String,
        segment_key: String,
    },

    #[error("rule error: {0}")]
    Rule(#[from] RuleError),
}
