//! Trace executor — depth-first traversal over segments.
//!
//! Uses an explicit heap-allocated LIFO work-stack instead of recursion, so
//! deep graphs cannot exhaust the call stack. Termination on cyclic graphs
//! comes from the visited sets, not from any queue-size bound.
//!
//! Recording is deliberately asymmetric: a vertex is appended to the result
//! the moment it is reached, before its rules run, while an edge is appended
//! only when its rules let the trace cross it. Callers always see the device
//! they reached, never the link they were forbidden to cross.

use std::sync::Arc;

use tracing::debug;

use gridtrace_core::errors::TraceError;
use gridtrace_core::model::rule::TraceConfig;
use gridtrace_core::model::segment::Segment;
use gridtrace_core::traits::SegmentStore;
use gridtrace_core::types::collections::FxHashSet;

use crate::rules::{compile_rules, evaluate, CompiledRule, MatchOutcome, RuleTarget};

use super::result::{SoftAbort, TraceAccumulator};
use super::types::{TraceResult, TraceState};

/// One pending unit of traversal work.
enum WorkItem {
    Vertex {
        segment: Arc<Segment>,
        vertex_key: String,
    },
    Edge {
        segment: Arc<Segment>,
        edge_key: String,
        /// The vertex the traversal arrived from. `None` for a seed edge,
        /// which expands both endpoints.
        from_vertex_key: Option<String>,
    },
    /// Continue through a boundary vertex's copy in an adjoining segment.
    Boundary {
        vertex_key: String,
        segment_key: String,
    },
}

/// Why the drain loop stopped early.
enum Halt {
    /// Soft termination: the result is still valid, with this message.
    Abort(String),
    /// Topology error: the whole call fails.
    Fatal(TraceError),
}

impl From<SoftAbort> for Halt {
    fn from(abort: SoftAbort) -> Self {
        Halt::Abort(abort.0)
    }
}

impl From<TraceError> for Halt {
    fn from(err: TraceError) -> Self {
        Halt::Fatal(err)
    }
}

/// Per-call traversal state, owned by exactly one `run_trace` invocation.
struct TraceContext<'a> {
    store: &'a dyn SegmentStore,
    rules: &'a [CompiledRule],
    start_key: &'a str,
    visited_vertexes: FxHashSet<String>,
    visited_edges: FxHashSet<String>,
    stack: Vec<WorkItem>,
    accumulator: TraceAccumulator,
}

/// Run a trace from `start_key`, searching `candidate_segment_keys` for the
/// start. The start key may name either a vertex or an edge.
///
/// Rule-triggered aborts and the vertex ceiling are soft terminations: the
/// call returns `Ok` with `abort_message` set and whatever was accumulated.
/// Missing segments or vertices referenced by the graph's own topology are
/// fatal and fail the whole call.
pub fn run_trace(
    store: &dyn SegmentStore,
    start_key: &str,
    candidate_segment_keys: &[String],
    config: &TraceConfig,
    max_vertexes: Option<usize>,
) -> Result<TraceResult, TraceError> {
    let rules = compile_rules(&config.rules)?;
    let mut state = TraceState::Ready;
    debug!(
        start_key,
        config = %config.key,
        rules = rules.len(),
        candidates = candidate_segment_keys.len(),
        state = state.name(),
        "trace starting"
    );

    let mut ctx = TraceContext {
        store,
        rules: &rules,
        start_key,
        visited_vertexes: FxHashSet::default(),
        visited_edges: FxHashSet::default(),
        stack: Vec::new(),
        accumulator: TraceAccumulator::new(max_vertexes),
    };

    ctx.seed(candidate_segment_keys)?;
    state = TraceState::Running;
    debug!(state = state.name(), seeded = ctx.stack.len(), "seed resolved");

    let abort_message = match ctx.drain() {
        Ok(()) => {
            state = TraceState::Completed;
            None
        }
        Err(Halt::Abort(message)) => {
            state = TraceState::Aborted;
            Some(message)
        }
        Err(Halt::Fatal(err)) => return Err(err),
    };

    let result = ctx.accumulator.finish(abort_message);
    debug!(
        state = state.name(),
        vertexes = result.vertexes.len(),
        edges = result.edges.len(),
        aborted = result.abort_message.is_some(),
        "trace finished"
    );
    Ok(result)
}

impl<'a> TraceContext<'a> {
    /// Search the candidate segments for the start key, as a vertex or an
    /// edge. Found in none of them is a fatal configuration error.
    fn seed(&mut self, candidate_segment_keys: &[String]) -> Result<(), TraceError> {
        let mut found = false;
        for segment_key in candidate_segment_keys {
            let segment =
                self.store
                    .get_segment(segment_key)
                    .ok_or_else(|| TraceError::SegmentNotFound {
                        segment_key: segment_key.clone(),
                    })?;
            if segment.vertexes.contains_key(self.start_key) {
                self.stack.push(WorkItem::Vertex {
                    segment,
                    vertex_key: self.start_key.to_string(),
                });
                found = true;
            } else if segment.edges.contains_key(self.start_key) {
                self.stack.push(WorkItem::Edge {
                    segment,
                    edge_key: self.start_key.to_string(),
                    from_vertex_key: None,
                });
                found = true;
            }
        }
        if !found {
            return Err(TraceError::StartKeyNotFound {
                start_key: self.start_key.to_string(),
            });
        }
        Ok(())
    }

    /// Pop and process work items until the stack is empty or a halt
    /// propagates out.
    fn drain(&mut self) -> Result<(), Halt> {
        while let Some(item) = self.stack.pop() {
            match item {
                WorkItem::Vertex {
                    segment,
                    vertex_key,
                } => self.trace_vertex(&segment, &vertex_key)?,
                WorkItem::Edge {
                    segment,
                    edge_key,
                    from_vertex_key,
                } => self.trace_edge(&segment, &edge_key, from_vertex_key.as_deref())?,
                WorkItem::Boundary {
                    vertex_key,
                    segment_key,
                } => self.continue_across_boundary(&vertex_key, &segment_key)?,
            }
        }
        Ok(())
    }

    /// Trace one vertex: record it unconditionally on first visit, then let
    /// the rules decide whether to expand through it.
    fn trace_vertex(&mut self, segment: &Arc<Segment>, vertex_key: &str) -> Result<(), Halt> {
        if self.visited_vertexes.contains(vertex_key) {
            return Ok(());
        }
        let vertex =
            segment
                .vertexes
                .get(vertex_key)
                .ok_or_else(|| TraceError::VertexNotFound {
                    vertex_key: vertex_key.to_string(),
                    segment_key: segment.key.clone(),
                })?;

        self.visited_vertexes.insert(vertex.key.clone());
        self.accumulator.add_vertex(vertex)?;

        let outcome = evaluate(
            self.rules,
            RuleTarget::Vertex {
                props: &vertex.props,
                is_start: vertex.key == self.start_key,
            },
        );
        match outcome {
            MatchOutcome::Abort(message) => return Err(Halt::Abort(message)),
            MatchOutcome::Stop => {
                debug!(vertex = vertex_key, segment = %segment.key, "branch stopped at vertex");
                return Ok(());
            }
            MatchOutcome::Continue => {}
        }

        for edge_key in &vertex.edge_keys {
            self.stack.push(WorkItem::Edge {
                segment: Arc::clone(segment),
                edge_key: edge_key.clone(),
                from_vertex_key: Some(vertex.key.clone()),
            });
        }
        for segment_key in &vertex.links_to_segment_keys {
            self.stack.push(WorkItem::Boundary {
                vertex_key: vertex.key.clone(),
                segment_key: segment_key.clone(),
            });
        }
        Ok(())
    }

    /// Trace one edge: rules run first, and only a CONTINUE records the edge
    /// and carries the traversal across it.
    ///
    /// A stopped edge is left out of the visited set on purpose: reached
    /// later from its other endpoint, it is re-evaluated with the new travel
    /// direction.
    fn trace_edge(
        &mut self,
        segment: &Arc<Segment>,
        edge_key: &str,
        from_vertex_key: Option<&str>,
    ) -> Result<(), Halt> {
        if self.visited_edges.contains(edge_key) {
            return Ok(());
        }
        let edge = segment
            .edges
            .get(edge_key)
            .ok_or_else(|| TraceError::EdgeNotFound {
                edge_key: edge_key.to_string(),
                segment_key: segment.key.clone(),
            })?;

        let from_src_vertex = from_vertex_key == Some(edge.src_vertex_key.as_str());
        let outcome = evaluate(
            self.rules,
            RuleTarget::Edge {
                props: &edge.props,
                from_src_vertex,
                direction: edge.direction,
            },
        );
        match outcome {
            MatchOutcome::Abort(message) => return Err(Halt::Abort(message)),
            MatchOutcome::Stop => {
                debug!(edge = edge_key, segment = %segment.key, "branch stopped at edge");
                return Ok(());
            }
            MatchOutcome::Continue => {}
        }

        self.visited_edges.insert(edge.key.clone());
        self.accumulator.add_edge(edge);

        match from_vertex_key {
            Some(from) => {
                self.stack.push(WorkItem::Vertex {
                    segment: Arc::clone(segment),
                    vertex_key: edge.other_end(from).to_string(),
                });
            }
            None => {
                // Seed edge: the trace fans out from both endpoints.
                self.stack.push(WorkItem::Vertex {
                    segment: Arc::clone(segment),
                    vertex_key: edge.src_vertex_key.clone(),
                });
                self.stack.push(WorkItem::Vertex {
                    segment: Arc::clone(segment),
                    vertex_key: edge.dst_vertex_key.clone(),
                });
            }
        }
        Ok(())
    }

    /// Follow a boundary vertex into an adjoining segment: load the segment,
    /// find the same-keyed copy, and push that copy's local edges. The graph
    /// declared this link, so absence on either lookup is fatal.
    fn continue_across_boundary(
        &mut self,
        vertex_key: &str,
        segment_key: &str,
    ) -> Result<(), Halt> {
        let next_segment =
            self.store
                .get_segment(segment_key)
                .ok_or_else(|| TraceError::SegmentNotFound {
                    segment_key: segment_key.to_string(),
                })?;
        let copy = next_segment.vertexes.get(vertex_key).ok_or_else(|| {
            TraceError::BoundaryVertexNotFound {
                vertex_key: vertex_key.to_string(),
                segment_key: segment_key.to_string(),
            }
        })?;

        debug!(vertex = vertex_key, segment = segment_key, "continuing across segment boundary");
        for edge_key in &copy.edge_keys {
            self.stack.push(WorkItem::Edge {
                segment: Arc::clone(&next_segment),
                edge_key: edge_key.clone(),
                from_vertex_key: Some(copy.key.clone()),
            });
        }
        Ok(())
    }
}
