//! Error handling for Gridtrace.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod config_error;
pub mod rule_error;
pub mod trace_error;

pub use config_error::ConfigError;
pub use rule_error::RuleError;
pub use trace_error::TraceError;
