//! JSON format
//!
//! Same structure as the YAML format, for request/response bodies and tooling.

use crate::idress::error::Result;
use crate::idress::formats::format::Format;
use crate::idress::formats::yaml::with_default_kind;
use crate::idress::record::Record;

/// Format implementation for JSON
pub struct JsonFormat;

impl Format for JsonFormat {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "JSON rendering of the structured record"
    }

    fn extensions(&self) -> &[&str] {
        &["json"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Record> {
        let record: Record = serde_json::from_str(source)?;
        Ok(with_default_kind(record))
    }

    fn serialize(&self, record: &Record) -> Result<String> {
        Ok(serde_json::to_string_pretty(record)?)
    }
}
