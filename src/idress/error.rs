//! Error types
//!
//! Data-quality problems are never errors here: the parser drops malformed lines and the
//! validator reports the rest as findings. These types cover the remaining failures
//! (unreadable YAML/JSON, strict-mode parsing, configuration, unknown formats).

use thiserror::Error;

/// Result type for idress operations
pub type Result<T> = std::result::Result<T, IdressError>;

/// Errors raised by conversion, format dispatch and configuration
#[derive(Debug, Error)]
pub enum IdressError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// No format registered under this name
    #[error("format '{0}' not found")]
    FormatNotFound(String),

    /// The format exists but lacks the requested direction
    #[error("{0}")]
    NotSupported(String),
}

/// Strict-mode parse failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A non-blank line with fewer than two colon-delimited fields (1-based line number)
    #[error("line {line}: expected `key：value`, found '{content}'")]
    MalformedLine { line: usize, content: String },
}

/// Failure while evaluating a custom validation rule
#[derive(Debug, Error)]
pub enum RuleError {
    #[error("{0}")]
    Evaluation(String),

    /// The record could not be turned into a value tree for field lookup
    #[error("field lookup failed: {0}")]
    Resolve(#[from] serde_json::Error),
}
