//! Configuration loader
//!
//! `defaults/idress.default.toml` is embedded into the crate so documented defaults and
//! runtime behavior stay in sync. Callers layer user files and single-key overrides on top
//! via [`Loader`] before deserializing into [`IdressConfig`].

use crate::idress::parsing::ParseOptions;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../../defaults/idress.default.toml");

/// Top-level configuration consumed by the idress tools.
#[derive(Debug, Clone, Deserialize)]
pub struct IdressConfig {
    pub parse: ParseConfig,
    pub validate: ValidateConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ParseConfig {
    pub strict: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ValidateConfig {
    pub fail_on_warnings: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Format name used by `convert` when no target is given.
    pub format: String,
    pub report: ReportFormat,
}

/// Layout of a validation report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportFormat {
    Text,
    Json,
}

impl From<&ParseConfig> for ParseOptions {
    fn from(config: &ParseConfig) -> Self {
        ParseOptions {
            strict: config.strict,
        }
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (e.g. `parse.strict`).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<IdressConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<IdressConfig, ConfigError> {
    Loader::new().build()
}
