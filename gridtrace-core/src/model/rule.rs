//! Trace rule model — closed enums matched exhaustively by the compiler.

use serde::{Deserialize, Serialize};

/// Bit flag matched by DIRECTION rules when the traversal runs downstream.
pub const TRACE_DOWNSTREAM: i64 = 1;
/// Bit flag matched by DIRECTION rules when the traversal runs upstream.
pub const TRACE_UPSTREAM: i64 = 2;
/// Bit flag matched by DIRECTION rules on bidirectional edges.
pub const TRACE_BOTH: i64 = 4;

/// What kind of entity a rule applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleScope {
    Vertex,
    Edge,
    /// Only the vertex the trace was started from.
    StartVertex,
}

/// How a rule's property value is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PropertyValueKind {
    /// Exact string equality.
    Simple,
    /// Membership in a comma-separated set.
    CommaList,
    /// Regular expression, anchored at the start of the property value.
    Regex,
    /// `int(prop) & int(value) != 0`; parse failures never match.
    BitmaskAnd,
    /// Upstream/downstream/both flags derived from travel direction. Edges only.
    Direction,
}

/// What a matching rule does to the traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleAction {
    /// Keep expanding through this entity.
    Continue,
    /// Prune this branch; the rest of the trace carries on.
    Stop,
    /// Terminate the whole trace, carrying `action_data` as the message.
    AbortWithMessage,
}

/// A single stop/continue/abort rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceRule {
    pub apply_to: RuleScope,
    /// Evaluation order within the start/non-start class. Tie-break only.
    #[serde(default)]
    pub order: i32,
    pub property_name: String,
    pub value_kind: PropertyValueKind,
    pub property_value: String,
    pub action: RuleAction,
    /// Message text for `ABORT_WITH_MESSAGE`; unused otherwise.
    #[serde(default)]
    pub action_data: Option<String>,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

/// An unordered bag of rules plus a stable key identifying the configuration.
///
/// Compiled once per trace invocation by the rule compiler.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceConfig {
    pub key: String,
    #[serde(default)]
    pub rules: Vec<TraceRule>,
}

impl TraceConfig {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            rules: Vec::new(),
        }
    }
}
