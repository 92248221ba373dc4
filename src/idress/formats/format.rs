//! Format trait definition
//!
//! This module defines the core Format trait that all record representations implement.
//! The trait provides a uniform interface for parsing and serializing records.

use crate::idress::error::{IdressError, Result};
use crate::idress::record::Record;

/// Trait for record formats
///
/// Implementors provide conversion between a string representation and a [`Record`].
/// Formats can support parsing, serialization, or both.
///
/// # Examples
///
/// ```ignore
/// struct MyFormat;
///
/// impl Format for MyFormat {
///     fn name(&self) -> &str {
///         "my-format"
///     }
///
///     fn supports_serialization(&self) -> bool {
///         true
///     }
///
///     fn serialize(&self, record: &Record) -> Result<String> {
///         Ok(record.owner.clone())
///     }
/// }
/// ```
pub trait Format: Send + Sync {
    /// The name of this format (e.g., "text", "yaml")
    fn name(&self) -> &str;

    /// Optional description of this format
    fn description(&self) -> &str {
        ""
    }

    /// File extensions (without the dot) conventionally used for this format
    fn extensions(&self) -> &[&str] {
        &[]
    }

    /// Whether this format supports parsing (source → Record)
    fn supports_parsing(&self) -> bool {
        false
    }

    /// Whether this format supports serialization (Record → source)
    fn supports_serialization(&self) -> bool {
        false
    }

    /// Parse source text into a Record
    ///
    /// Default implementation returns NotSupported error.
    fn parse(&self, _source: &str) -> Result<Record> {
        Err(IdressError::NotSupported(format!(
            "Format '{}' does not support parsing",
            self.name()
        )))
    }

    /// Serialize a Record into source text
    ///
    /// Default implementation returns NotSupported error.
    fn serialize(&self, _record: &Record) -> Result<String> {
        Err(IdressError::NotSupported(format!(
            "Format '{}' does not support serialization",
            self.name()
        )))
    }
}
