//! Format registry for format discovery and selection
//!
//! This module provides a centralized registry for all available formats.
//! Formats can be registered and retrieved by name or by file extension.

use crate::idress::error::{IdressError, Result};
use crate::idress::formats::format::Format;
use crate::idress::parsing::ParseOptions;
use crate::idress::record::Record;
use std::collections::HashMap;
use std::path::Path;

/// Registry of record formats
///
/// # Examples
///
/// ```ignore
/// let registry = FormatRegistry::with_defaults();
///
/// let record = registry.parse(source, "text")?;
/// let yaml = registry.serialize(&record, "yaml")?;
/// ```
pub struct FormatRegistry {
    formats: HashMap<String, Box<dyn Format>>,
}

impl FormatRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        FormatRegistry {
            formats: HashMap::new(),
        }
    }

    /// Register a format
    ///
    /// If a format with the same name already exists, it will be replaced.
    pub fn register<F: Format + 'static>(&mut self, format: F) {
        self.formats
            .insert(format.name().to_string(), Box::new(format));
    }

    /// Get a format by name
    pub fn get(&self, name: &str) -> Result<&dyn Format> {
        self.formats
            .get(name)
            .map(|f| f.as_ref())
            .ok_or_else(|| IdressError::FormatNotFound(name.to_string()))
    }

    /// Check if a format exists
    pub fn has(&self, name: &str) -> bool {
        self.formats.contains_key(name)
    }

    /// List all available format names (sorted)
    pub fn list_formats(&self) -> Vec<String> {
        let mut names: Vec<_> = self.formats.keys().cloned().collect();
        names.sort();
        names
    }

    /// Find the parsing format that claims the file extension of `path`
    pub fn for_path(&self, path: &Path) -> Option<&dyn Format> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        let mut matches: Vec<&dyn Format> = self
            .formats
            .values()
            .map(|f| f.as_ref())
            .filter(|f| f.supports_parsing() && f.extensions().contains(&ext.as_str()))
            .collect();
        matches.sort_by(|a, b| a.name().cmp(b.name()));
        matches.into_iter().next()
    }

    /// Parse source text using the specified format
    pub fn parse(&self, source: &str, format: &str) -> Result<Record> {
        let fmt = self.get(format)?;
        if !fmt.supports_parsing() {
            return Err(IdressError::NotSupported(format!(
                "Format '{}' does not support parsing",
                format
            )));
        }
        fmt.parse(source)
    }

    /// Serialize a record using the specified format
    pub fn serialize(&self, record: &Record, format: &str) -> Result<String> {
        let fmt = self.get(format)?;
        if !fmt.supports_serialization() {
            return Err(IdressError::NotSupported(format!(
                "Format '{}' does not support serialization",
                format
            )));
        }
        fmt.serialize(record)
    }

    /// Create a registry with the built-in formats
    pub fn with_defaults() -> Self {
        Self::with_options(ParseOptions::default())
    }

    /// Built-in formats, with the text format using the given parse options
    pub fn with_options(options: ParseOptions) -> Self {
        let mut registry = Self::new();

        registry.register(crate::idress::formats::text::TextFormat::new(options));
        registry.register(crate::idress::formats::yaml::YamlFormat);
        registry.register(crate::idress::formats::json::JsonFormat);
        registry.register(crate::idress::formats::summary::SummaryFormat);

        registry
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
