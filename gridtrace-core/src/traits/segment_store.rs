//! Segment access seam.
//!
//! How segments are produced, persisted, or cached is the host's concern.
//! The engine only requires stable, immutable snapshots for the duration of
//! one trace call, safe to fetch from concurrent callers.

use std::sync::Arc;

use crate::model::segment::Segment;
use crate::types::collections::FxHashMap;

/// Read-only access to segments by key.
pub trait SegmentStore: Sync {
    /// Fetch an immutable snapshot of a segment, if the store holds it.
    fn get_segment(&self, segment_key: &str) -> Option<Arc<Segment>>;
}

/// In-memory segment store, used by tests and benches.
#[derive(Debug, Default)]
pub struct MemorySegmentStore {
    segments: FxHashMap<String, Arc<Segment>>,
}

impl MemorySegmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, segment: Segment) {
        self.segments.insert(segment.key.clone(), Arc::new(segment));
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl SegmentStore for MemorySegmentStore {
    fn get_segment(&self, segment_key: &str) -> Option<Arc<Segment>> {
        self.segments.get(segment_key).cloned()
    }
}
