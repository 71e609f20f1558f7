//! Rule compilation errors.

/// Errors raised while compiling a trace rule configuration.
///
/// All of these are configuration errors: they are reported once at compile
/// time, before any traversal starts, never per-vertex.
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    #[error("invalid regex '{pattern}' in rule on property '{property_name}': {message}")]
    InvalidRegex {
        property_name: String,
        pattern: String,
        message: String,
    },

    #[error("DIRECTION rule on property '{property_name}' must apply to edges")]
    DirectionOnNonEdgeRule { property_name: String },
}
