//! Rule-config file errors.

/// Errors raised while loading a TOML rule configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read rule config '{path}': {message}")]
    Io { path: String, message: String },

    #[error("invalid rule config '{path}': {message}")]
    ParseError { path: String, message: String },
}
