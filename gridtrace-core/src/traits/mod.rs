//! Traits at the seams between the engine and its host application.

pub mod segment_store;

pub use segment_store::{MemorySegmentStore, SegmentStore};
