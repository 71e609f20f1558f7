//! Configuration loading for Gridtrace.
//! TOML-based, mirroring the rule bag the engine compiles per trace call.

pub mod rule_file;

pub use rule_file::{load_trace_config, parse_trace_config};
