//! Rule compiler — turns the unordered rule bag into an ordered, ready list.
//!
//! Match data is pre-parsed once here (comma sets, regexes) so the matcher
//! does no parsing per vertex. Invalid regexes and DIRECTION rules on
//! non-edge scopes are rejected here, before any traversal starts.

use gridtrace_core::errors::RuleError;
use gridtrace_core::model::rule::{PropertyValueKind, RuleAction, RuleScope, TraceRule};
use gridtrace_core::types::collections::FxHashSet;
use regex::Regex;

/// A rule with its match data pre-parsed, ready for per-entity evaluation.
#[derive(Debug, Clone)]
pub struct CompiledRule {
    pub scope: RuleScope,
    pub property_name: String,
    pub action: RuleAction,
    pub action_data: Option<String>,
    pub value: CompiledValue,
}

/// Pre-parsed match data for one rule.
///
/// SIMPLE, BITMASK_AND, and DIRECTION values stay as strings; their numeric
/// coercion happens at match time, where a parse failure means "no match"
/// rather than an error.
#[derive(Debug, Clone)]
pub enum CompiledValue {
    Simple(String),
    CommaList(FxHashSet<String>),
    Regex(Regex),
    BitmaskAnd(String),
    Direction(String),
}

/// Compile a rule bag into an ordered, enabled-only rule list.
///
/// START_VERTEX rules sort strictly before all others; within each class,
/// ascending `order` with stable ties.
pub fn compile_rules(rules: &[TraceRule]) -> Result<Vec<CompiledRule>, RuleError> {
    let mut enabled: Vec<&TraceRule> = rules.iter().filter(|r| r.enabled).collect();
    enabled.sort_by_key(|r| (r.apply_to != RuleScope::StartVertex, r.order));
    enabled.into_iter().map(compile_rule).collect()
}

fn compile_rule(rule: &TraceRule) -> Result<CompiledRule, RuleError> {
    let value = match rule.value_kind {
        PropertyValueKind::Simple => CompiledValue::Simple(rule.property_value.clone()),
        PropertyValueKind::CommaList => CompiledValue::CommaList(
            rule.property_value
                .split(',')
                .map(str::to_string)
                .collect(),
        ),
        PropertyValueKind::Regex => {
            // Anchored at the start of the property value, a match rather
            // than a search.
            let pattern = format!(r"\A(?:{})", rule.property_value);
            let compiled = Regex::new(&pattern).map_err(|e| RuleError::InvalidRegex {
                property_name: rule.property_name.clone(),
                pattern: rule.property_value.clone(),
                message: e.to_string(),
            })?;
            CompiledValue::Regex(compiled)
        }
        PropertyValueKind::BitmaskAnd => CompiledValue::BitmaskAnd(rule.property_value.clone()),
        PropertyValueKind::Direction => {
            if rule.apply_to != RuleScope::Edge {
                return Err(RuleError::DirectionOnNonEdgeRule {
                    property_name: rule.property_name.clone(),
                });
            }
            CompiledValue::Direction(rule.property_value.clone())
        }
    };

    Ok(CompiledRule {
        scope: rule.apply_to,
        property_name: rule.property_name.clone(),
        action: rule.action,
        action_data: rule.action_data.clone(),
        value,
    })
}
