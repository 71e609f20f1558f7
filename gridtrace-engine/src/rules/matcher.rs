//! Rule matcher — pure first-match evaluation against one vertex or edge.

use gridtrace_core::model::rule::{
    RuleAction, RuleScope, TRACE_BOTH, TRACE_DOWNSTREAM, TRACE_UPSTREAM,
};
use gridtrace_core::model::segment::{EdgeDirection, PropertyMap};

use super::compiler::{CompiledRule, CompiledValue};

/// What a rule pass decided for one entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchOutcome {
    /// Keep expanding through this entity. Also the default when no rule matches.
    Continue,
    /// Prune this branch only.
    Stop,
    /// Terminate the entire trace with a user-facing message.
    Abort(String),
}

/// The entity a rule pass is evaluated against.
#[derive(Debug, Clone, Copy)]
pub enum RuleTarget<'a> {
    Vertex {
        props: &'a PropertyMap,
        is_start: bool,
    },
    Edge {
        props: &'a PropertyMap,
        /// True iff the traversal is leaving the edge's declared source
        /// vertex (walking src → dst).
        from_src_vertex: bool,
        direction: EdgeDirection,
    },
}

impl<'a> RuleTarget<'a> {
    fn props(&self) -> &'a PropertyMap {
        match self {
            Self::Vertex { props, .. } | Self::Edge { props, .. } => props,
        }
    }
}

/// Evaluate the compiled rule list, in order, against one entity.
///
/// The first applicable rule whose property condition matches decides the
/// outcome; later rules are not consulted. No match at all means continue.
pub fn evaluate(rules: &[CompiledRule], target: RuleTarget<'_>) -> MatchOutcome {
    for rule in rules {
        if !applies(rule.scope, &target) {
            continue;
        }
        let prop_val = target
            .props()
            .get(&rule.property_name)
            .map(String::as_str)
            .unwrap_or("");
        if !matches_value(&rule.value, prop_val, &target) {
            continue;
        }
        return match rule.action {
            RuleAction::Continue => MatchOutcome::Continue,
            RuleAction::Stop => MatchOutcome::Stop,
            RuleAction::AbortWithMessage => {
                MatchOutcome::Abort(rule.action_data.clone().unwrap_or_default())
            }
        };
    }
    MatchOutcome::Continue
}

fn applies(scope: RuleScope, target: &RuleTarget<'_>) -> bool {
    match scope {
        RuleScope::Vertex => matches!(target, RuleTarget::Vertex { .. }),
        RuleScope::StartVertex => matches!(target, RuleTarget::Vertex { is_start: true, .. }),
        RuleScope::Edge => matches!(target, RuleTarget::Edge { .. }),
    }
}

fn matches_value(value: &CompiledValue, prop_val: &str, target: &RuleTarget<'_>) -> bool {
    match value {
        CompiledValue::Simple(expected) => prop_val == expected,
        CompiledValue::CommaList(set) => set.contains(prop_val),
        CompiledValue::Regex(pattern) => pattern.is_match(prop_val),
        CompiledValue::BitmaskAnd(mask) => bitmask_matches(prop_val, mask),
        CompiledValue::Direction(mask) => direction_matches(mask, target),
    }
}

/// `int(prop) & int(mask) != 0`. Either side failing to parse is "no match".
fn bitmask_matches(prop_val: &str, mask: &str) -> bool {
    match (prop_val.trim().parse::<i64>(), mask.trim().parse::<i64>()) {
        (Ok(value), Ok(mask)) => value & mask != 0,
        _ => false,
    }
}

/// Direction rules match the travel direction, not a stored property:
/// the flags the edge is being traversed with are OR-ed into a bit value
/// and AND-ed against the rule's mask.
fn direction_matches(mask: &str, target: &RuleTarget<'_>) -> bool {
    let RuleTarget::Edge {
        from_src_vertex,
        direction,
        ..
    } = *target
    else {
        return false;
    };
    let mask: i64 = match mask.trim().parse() {
        Ok(mask) => mask,
        Err(_) => return false,
    };

    let going_upstream = (from_src_vertex && direction == EdgeDirection::SrcIsDownstream)
        || (!from_src_vertex && direction == EdgeDirection::SrcIsUpstream);
    let going_downstream = (from_src_vertex && direction == EdgeDirection::SrcIsUpstream)
        || (!from_src_vertex && direction == EdgeDirection::SrcIsDownstream);

    let mut bits = 0i64;
    if going_downstream {
        bits |= TRACE_DOWNSTREAM;
    }
    if going_upstream {
        bits |= TRACE_UPSTREAM;
    }
    if direction == EdgeDirection::SrcIsBoth {
        bits |= TRACE_BOTH;
    }
    bits & mask != 0
}
