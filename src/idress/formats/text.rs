//! Sheet text format
//!
//! Treats the sheet notation as just another format, delegating to the parser and renderer.

use crate::idress::error::Result;
use crate::idress::formats::format::Format;
use crate::idress::parsing::{parse_with, ParseOptions};
use crate::idress::record::Record;
use crate::idress::rendering::render;

/// Format implementation for sheet text
#[derive(Debug, Clone, Default)]
pub struct TextFormat {
    options: ParseOptions,
}

impl TextFormat {
    pub fn new(options: ParseOptions) -> Self {
        Self { options }
    }
}

impl Format for TextFormat {
    fn name(&self) -> &str {
        "text"
    }

    fn description(&self) -> &str {
        "Line-oriented idress sheet text"
    }

    fn extensions(&self) -> &[&str] {
        &["txt"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Record> {
        Ok(parse_with(source, &self.options)?)
    }

    fn serialize(&self, record: &Record) -> Result<String> {
        Ok(render(record))
    }
}
