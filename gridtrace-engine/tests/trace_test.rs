//! Trace executor tests — the worked connectivity scenarios.

use gridtrace_core::errors::TraceError;
use gridtrace_core::model::rule::{
    PropertyValueKind, RuleAction, RuleScope, TraceConfig, TraceRule, TRACE_DOWNSTREAM,
    TRACE_UPSTREAM,
};
use gridtrace_core::model::segment::{Edge, EdgeDirection, PropertyMap, Segment, Vertex};
use gridtrace_core::traits::MemorySegmentStore;
use gridtrace_engine::run_trace;

fn props(pairs: &[(&str, &str)]) -> PropertyMap {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn vertex(key: &str, vertex_props: &[(&str, &str)]) -> Vertex {
    let mut v = Vertex::new(key);
    v.props = props(vertex_props);
    v
}

fn edge(key: &str, src: &str, dst: &str, edge_props: &[(&str, &str)]) -> Edge {
    Edge {
        key: key.to_string(),
        src_vertex_key: src.to_string(),
        dst_vertex_key: dst.to_string(),
        props: props(edge_props),
        direction: EdgeDirection::SrcIsBoth,
    }
}

fn rule(
    apply_to: RuleScope,
    kind: PropertyValueKind,
    name: &str,
    value: &str,
    action: RuleAction,
    action_data: Option<&str>,
) -> TraceRule {
    TraceRule {
        apply_to,
        order: 0,
        property_name: name.to_string(),
        value_kind: kind,
        property_value: value.to_string(),
        action,
        action_data: action_data.map(str::to_string),
        enabled: true,
    }
}

fn config(rules: Vec<TraceRule>) -> TraceConfig {
    TraceConfig {
        key: "test".to_string(),
        rules,
    }
}

/// A — e1 — B — e2 — C in a single segment.
fn linear_store(b_props: &[(&str, &str)], e2_props: &[(&str, &str)]) -> MemorySegmentStore {
    let mut seg = Segment::new("s1");
    seg.add_vertex(vertex("A", &[]));
    seg.add_vertex(vertex("B", b_props));
    seg.add_vertex(vertex("C", &[]));
    seg.add_edge(edge("e1", "A", "B", &[]));
    seg.add_edge(edge("e2", "B", "C", e2_props));
    let mut store = MemorySegmentStore::new();
    store.insert(seg);
    store
}

fn keys_of_vertexes(result: &gridtrace_engine::TraceResult) -> Vec<&str> {
    result.vertexes.iter().map(|v| v.key.as_str()).collect()
}

fn keys_of_edges(result: &gridtrace_engine::TraceResult) -> Vec<&str> {
    result.edges.iter().map(|e| e.key.as_str()).collect()
}

#[test]
fn no_rules_visits_the_full_reachable_set() {
    let store = linear_store(&[], &[]);
    let result = run_trace(&store, "A", &["s1".to_string()], &config(vec![]), None).unwrap();

    let mut vertexes = keys_of_vertexes(&result);
    vertexes.sort_unstable();
    assert_eq!(vertexes, vec!["A", "B", "C"]);
    let mut edges = keys_of_edges(&result);
    edges.sort_unstable();
    assert_eq!(edges, vec!["e1", "e2"]);
    assert!(result.is_clean());
}

#[test]
fn cycle_records_each_vertex_and_edge_once() {
    // Triangle A-B-C-A: every vertex reachable via two paths.
    let mut seg = Segment::new("s1");
    for key in ["A", "B", "C"] {
        seg.add_vertex(vertex(key, &[]));
    }
    seg.add_edge(edge("e1", "A", "B", &[]));
    seg.add_edge(edge("e2", "B", "C", &[]));
    seg.add_edge(edge("e3", "C", "A", &[]));
    let mut store = MemorySegmentStore::new();
    store.insert(seg);

    let result = run_trace(&store, "A", &["s1".to_string()], &config(vec![]), None).unwrap();

    let mut vertexes = keys_of_vertexes(&result);
    vertexes.sort_unstable();
    assert_eq!(vertexes, vec!["A", "B", "C"]);
    let mut edges = keys_of_edges(&result);
    edges.sort_unstable();
    assert_eq!(edges, vec!["e1", "e2", "e3"]);
}

#[test]
fn stopped_vertex_is_recorded_but_not_expanded() {
    let store = linear_store(&[("isOpen", "true")], &[]);
    let rules = vec![rule(
        RuleScope::Vertex,
        PropertyValueKind::Simple,
        "isOpen",
        "true",
        RuleAction::Stop,
        None,
    )];

    let result = run_trace(&store, "A", &["s1".to_string()], &config(rules), None).unwrap();

    assert_eq!(keys_of_vertexes(&result), vec!["A", "B"]);
    assert_eq!(keys_of_edges(&result), vec!["e1"]);
}

#[test]
fn aborted_edge_is_never_recorded() {
    let store = linear_store(&[], &[("breaker", "open")]);
    let rules = vec![rule(
        RuleScope::Edge,
        PropertyValueKind::Simple,
        "breaker",
        "open",
        RuleAction::AbortWithMessage,
        Some("trace stopped: breaker open"),
    )];

    let result = run_trace(&store, "A", &["s1".to_string()], &config(rules), None).unwrap();

    assert_eq!(keys_of_vertexes(&result), vec!["A", "B"]);
    assert_eq!(keys_of_edges(&result), vec!["e1"]);
    assert_eq!(
        result.abort_message.as_deref(),
        Some("trace stopped: breaker open")
    );
}

#[test]
fn vertex_ceiling_soft_aborts_with_the_standard_message() {
    let store = linear_store(&[], &[]);
    let result = run_trace(&store, "A", &["s1".to_string()], &config(vec![]), Some(2)).unwrap();

    assert_eq!(result.vertexes.len(), 2);
    assert_eq!(
        result.abort_message.as_deref(),
        Some("trace exceeded maximum vertexes of 2")
    );
}

#[test]
fn trace_continues_across_a_segment_boundary() {
    // S1: A — e1 — B, where B is replicated into S2 as B — e2 — D.
    let mut s1 = Segment::new("s1");
    s1.add_vertex(vertex("A", &[]));
    let mut b = vertex("B", &[]);
    b.links_to_segment_keys.push("s2".to_string());
    s1.add_vertex(b);
    s1.add_edge(edge("e1", "A", "B", &[]));

    let mut s2 = Segment::new("s2");
    s2.add_vertex(vertex("B", &[]));
    s2.add_vertex(vertex("D", &[]));
    s2.add_edge(edge("e2", "B", "D", &[]));

    let mut store = MemorySegmentStore::new();
    store.insert(s1);
    store.insert(s2);

    let result = run_trace(&store, "A", &["s1".to_string()], &config(vec![]), None).unwrap();

    let mut vertexes = keys_of_vertexes(&result);
    vertexes.sort_unstable();
    assert_eq!(vertexes, vec!["A", "B", "D"]);
    let mut edges = keys_of_edges(&result);
    edges.sort_unstable();
    assert_eq!(edges, vec!["e1", "e2"]);
}

#[test]
fn cross_linked_segment_pair_terminates() {
    // B is replicated in both segments and each copy links back to the other.
    let mut s1 = Segment::new("s1");
    s1.add_vertex(vertex("A", &[]));
    let mut b1 = vertex("B", &[]);
    b1.links_to_segment_keys.push("s2".to_string());
    s1.add_vertex(b1);
    s1.add_edge(edge("e1", "A", "B", &[]));

    let mut s2 = Segment::new("s2");
    let mut b2 = vertex("B", &[]);
    b2.links_to_segment_keys.push("s1".to_string());
    s2.add_vertex(b2);
    s2.add_vertex(vertex("D", &[]));
    s2.add_edge(edge("e2", "B", "D", &[]));

    let mut store = MemorySegmentStore::new();
    store.insert(s1);
    store.insert(s2);

    let result = run_trace(&store, "A", &["s1".to_string()], &config(vec![]), None).unwrap();

    let mut vertexes = keys_of_vertexes(&result);
    vertexes.sort_unstable();
    assert_eq!(vertexes, vec!["A", "B", "D"]);
    assert_eq!(result.edges.len(), 2);
}

#[test]
fn seed_edge_expands_both_endpoints() {
    let store = linear_store(&[], &[]);
    let result = run_trace(&store, "e1", &["s1".to_string()], &config(vec![]), None).unwrap();

    let mut vertexes = keys_of_vertexes(&result);
    vertexes.sort_unstable();
    assert_eq!(vertexes, vec!["A", "B", "C"]);
    assert!(keys_of_edges(&result).contains(&"e1"));
}

#[test]
fn start_vertex_rule_does_not_fire_on_later_vertices() {
    // A and C share the property the rule matches; only A is the start.
    let mut seg = Segment::new("s1");
    seg.add_vertex(vertex("A", &[("kind", "feeder")]));
    seg.add_vertex(vertex("B", &[]));
    seg.add_vertex(vertex("C", &[("kind", "feeder")]));
    seg.add_edge(edge("e1", "A", "B", &[]));
    seg.add_edge(edge("e2", "B", "C", &[]));
    let mut store = MemorySegmentStore::new();
    store.insert(seg);

    let rules = vec![rule(
        RuleScope::StartVertex,
        PropertyValueKind::Simple,
        "kind",
        "feeder",
        RuleAction::Stop,
        None,
    )];
    let result = run_trace(&store, "A", &["s1".to_string()], &config(rules), None).unwrap();

    // Stopped at the start: A recorded, nothing expanded, canned message set.
    assert_eq!(keys_of_vertexes(&result), vec!["A"]);
    assert!(result.edges.is_empty());
    assert_eq!(
        result.abort_message.as_deref(),
        Some("the trace stopped at the starting point")
    );
}

#[test]
fn direction_rule_blocks_only_the_matching_travel_direction() {
    let mut seg = Segment::new("s1");
    seg.add_vertex(vertex("A", &[]));
    seg.add_vertex(vertex("B", &[]));
    let mut e = edge("e1", "A", "B", &[]);
    e.direction = EdgeDirection::SrcIsUpstream;
    seg.add_edge(e);
    let mut store = MemorySegmentStore::new();
    store.insert(seg);

    // Walking src → dst on a SRC_IS_UPSTREAM edge is a downstream walk.
    let stop_downstream = vec![rule(
        RuleScope::Edge,
        PropertyValueKind::Direction,
        "direction",
        &TRACE_DOWNSTREAM.to_string(),
        RuleAction::Stop,
        None,
    )];
    let result = run_trace(
        &store,
        "A",
        &["s1".to_string()],
        &config(stop_downstream),
        None,
    )
    .unwrap();
    assert_eq!(keys_of_vertexes(&result), vec!["A"]);
    assert!(result.edges.is_empty());

    let stop_upstream = vec![rule(
        RuleScope::Edge,
        PropertyValueKind::Direction,
        "direction",
        &TRACE_UPSTREAM.to_string(),
        RuleAction::Stop,
        None,
    )];
    let result = run_trace(
        &store,
        "A",
        &["s1".to_string()],
        &config(stop_upstream),
        None,
    )
    .unwrap();
    let mut vertexes = keys_of_vertexes(&result);
    vertexes.sort_unstable();
    assert_eq!(vertexes, vec!["A", "B"]);
    assert_eq!(keys_of_edges(&result), vec!["e1"]);
}

#[test]
fn start_key_missing_everywhere_is_fatal() {
    let store = linear_store(&[], &[]);
    let err = run_trace(&store, "nope", &["s1".to_string()], &config(vec![]), None).unwrap_err();
    assert!(matches!(err, TraceError::StartKeyNotFound { .. }));
}

#[test]
fn missing_candidate_segment_is_fatal() {
    let store = linear_store(&[], &[]);
    let err = run_trace(
        &store,
        "A",
        &["s1".to_string(), "ghost".to_string()],
        &config(vec![]),
        None,
    )
    .unwrap_err();
    assert!(matches!(err, TraceError::SegmentNotFound { .. }));
}

#[test]
fn declared_link_without_a_matching_copy_is_fatal() {
    let mut s1 = Segment::new("s1");
    s1.add_vertex(vertex("A", &[]));
    let mut b = vertex("B", &[]);
    b.links_to_segment_keys.push("s2".to_string());
    s1.add_vertex(b);
    s1.add_edge(edge("e1", "A", "B", &[]));

    // s2 exists but holds no copy of B.
    let mut s2 = Segment::new("s2");
    s2.add_vertex(vertex("X", &[]));

    let mut store = MemorySegmentStore::new();
    store.insert(s1);
    store.insert(s2);

    let err = run_trace(&store, "A", &["s1".to_string()], &config(vec![]), None).unwrap_err();
    assert!(matches!(err, TraceError::BoundaryVertexNotFound { .. }));
}

#[test]
fn comma_list_rule_matches_any_member() {
    let store = linear_store(&[("state", "tripped")], &[]);
    let rules = vec![rule(
        RuleScope::Vertex,
        PropertyValueKind::CommaList,
        "state",
        "open,tripped,isolated",
        RuleAction::Stop,
        None,
    )];
    let result = run_trace(&store, "A", &["s1".to_string()], &config(rules), None).unwrap();
    assert_eq!(keys_of_vertexes(&result), vec!["A", "B"]);
    assert_eq!(keys_of_edges(&result), vec!["e1"]);
}

#[test]
fn result_serializes_to_json() {
    let store = linear_store(&[], &[]);
    let result = run_trace(&store, "A", &["s1".to_string()], &config(vec![]), None).unwrap();
    let json = serde_json::to_string(&result).unwrap();
    assert!(json.contains("\"vertexes\""));
    assert!(json.contains("\"abort_message\":null"));
}
