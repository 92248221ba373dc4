//! YAML format
//!
//! A structural bridge: the record is dumped as-is in field declaration order, and loaded back
//! with exactly one defaulting rule (a missing or empty object kind becomes `Object`). No other
//! validation or transformation happens here.

use crate::idress::error::Result;
use crate::idress::formats::format::Format;
use crate::idress::record::Record;

/// Dumps a record as YAML.
pub fn to_yaml(record: &Record) -> Result<String> {
    Ok(serde_yaml::to_string(record)?)
}

/// Loads a record from YAML, defaulting the object kind.
pub fn from_yaml(source: &str) -> Result<Record> {
    let record: Record = serde_yaml::from_str(source)?;
    Ok(with_default_kind(record))
}

/// The single defaulting rule shared by the structural formats.
pub(crate) fn with_default_kind(mut record: Record) -> Record {
    record.object_kind = Some(record.object_kind_or_default());
    record
}

/// Format implementation for YAML
pub struct YamlFormat;

impl Format for YamlFormat {
    fn name(&self) -> &str {
        "yaml"
    }

    fn description(&self) -> &str {
        "YAML rendering of the structured record"
    }

    fn extensions(&self) -> &[&str] {
        &["yml", "yaml"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Record> {
        from_yaml(source)
    }

    fn serialize(&self, record: &Record) -> Result<String> {
        to_yaml(record)
    }
}
