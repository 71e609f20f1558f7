//! TOML rule-config files.
//!
//! A rule file is a `TraceConfig` in TOML form: a `key` plus a list of
//! `[[rules]]` tables. Unknown enum variants (e.g. a misspelled
//! `value_kind`) fail the load; they never reach the traversal.

use std::path::Path;

use crate::errors::ConfigError;
use crate::model::rule::TraceConfig;

/// Parse a rule configuration from TOML text.
pub fn parse_trace_config(raw: &str) -> Result<TraceConfig, ConfigError> {
    toml::from_str(raw).map_err(|e| ConfigError::ParseError {
        path: "<string>".to_string(),
        message: e.to_string(),
    })
}

/// Load a rule configuration from a TOML file.
pub fn load_trace_config(path: &Path) -> Result<TraceConfig, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    toml::from_str(&raw).map_err(|e| ConfigError::ParseError {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}
