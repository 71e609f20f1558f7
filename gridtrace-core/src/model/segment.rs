//! Segmented graph model — key-indexed segments, vertices, and edges.
//!
//! Vertices and edges reference each other by key, never by pointer, because
//! segments are loaded and discarded independently and keys are the only
//! thing stable across a segment boundary. A boundary vertex is replicated
//! (same key) into each adjoining segment, with each copy holding only the
//! edges local to its segment.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::types::collections::FxHashMap;

/// String-to-string property bag attached to vertices and edges.
pub type PropertyMap = FxHashMap<String, String>;

/// Physical flow direction of an edge relative to its declared endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EdgeDirection {
    /// Flow runs from the declared source toward the declared destination.
    SrcIsUpstream,
    /// Flow runs from the declared destination toward the declared source.
    SrcIsDownstream,
    /// Flow runs both ways.
    SrcIsBoth,
}

impl EdgeDirection {
    pub fn name(&self) -> &'static str {
        match self {
            Self::SrcIsUpstream => "SRC_IS_UPSTREAM",
            Self::SrcIsDownstream => "SRC_IS_DOWNSTREAM",
            Self::SrcIsBoth => "SRC_IS_BOTH",
        }
    }
}

/// A vertex within one segment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vertex {
    /// Unique within a segment; boundary vertices reuse the key across segments.
    pub key: String,
    #[serde(default)]
    pub props: PropertyMap,
    /// Keys of edges incident to this vertex within its own segment.
    #[serde(default)]
    pub edge_keys: SmallVec<[String; 4]>,
    /// Other segments holding a same-keyed copy of this vertex.
    #[serde(default)]
    pub links_to_segment_keys: Vec<String>,
}

impl Vertex {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            props: PropertyMap::default(),
            edge_keys: SmallVec::new(),
            links_to_segment_keys: Vec::new(),
        }
    }
}

/// An edge within one segment. Both endpoints live in the same segment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    pub key: String,
    pub src_vertex_key: String,
    pub dst_vertex_key: String,
    #[serde(default)]
    pub props: PropertyMap,
    pub direction: EdgeDirection,
}

impl Edge {
    /// The endpoint opposite `vertex_key`.
    pub fn other_end(&self, vertex_key: &str) -> &str {
        if self.src_vertex_key == vertex_key {
            &self.dst_vertex_key
        } else {
            &self.src_vertex_key
        }
    }
}

/// An independently loadable partition of the graph.
///
/// Immutable for the lifetime of any trace holding a reference to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Segment {
    pub key: String,
    #[serde(default)]
    pub vertexes: FxHashMap<String, Vertex>,
    #[serde(default)]
    pub edges: FxHashMap<String, Edge>,
}

impl Segment {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            vertexes: FxHashMap::default(),
            edges: FxHashMap::default(),
        }
    }

    pub fn add_vertex(&mut self, vertex: Vertex) {
        self.vertexes.insert(vertex.key.clone(), vertex);
    }

    /// Insert an edge and register it on both endpoint vertices.
    pub fn add_edge(&mut self, edge: Edge) {
        if let Some(src) = self.vertexes.get_mut(&edge.src_vertex_key) {
            src.edge_keys.push(edge.key.clone());
        }
        if let Some(dst) = self.vertexes.get_mut(&edge.dst_vertex_key) {
            dst.edge_keys.push(edge.key.clone());
        }
        self.edges.insert(edge.key.clone(), edge);
    }
}
