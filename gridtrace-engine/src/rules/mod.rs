//! Rule compilation and matching.

pub mod compiler;
pub mod matcher;

pub use compiler::{compile_rules, CompiledRule, CompiledValue};
pub use matcher::{evaluate, MatchOutcome, RuleTarget};
