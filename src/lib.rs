//! # idress
//!
//! Converter and validator for idress entity sheets.
//!
//! An idress sheet is a short, hand-edited, line-oriented text describing a character,
//! organization, building or a reusable structure (race, job, equipment...). Each line is
//! colon-delimited, and both the halfwidth `:` and the fullwidth `：` are accepted as
//! separators. Numbers in the text use fullwidth digits.
//!
//! File Layout
//!
//!     src/idress
//!       ├── grammar       Keywords and glyphs shared by the parser and the renderer
//!       ├── numerals      Halfwidth <-> fullwidth digit codec
//!       ├── record        The structured record (Record, Entry, Medal)
//!       ├── lexing        Line tokenizer (fields + separator spans)
//!       ├── parsing       text -> Record
//!       ├── rendering     Record -> text
//!       ├── formats       Format trait, registry and the text/yaml/json/summary formats
//!       ├── validation    Standard rule set, custom rules and reports
//!       ├── config        Layered configuration
//!       └── error         Error types
//!
//! The conversion functions never fail on data-quality problems: malformed lines are dropped
//! by the parser, and everything else is reported by the validator as graded findings.
//!
//! The usual entry points are re-exported here:
//!
//! ```ignore
//! let record = idress::parse(text);
//! let report = idress::validate(&record);
//! println!("{}", idress::render(&record));
//! ```

pub mod idress;

pub use idress::error::{IdressError, ParseError, Result, RuleError};
pub use idress::formats::yaml::{from_yaml, to_yaml};
pub use idress::formats::{Format, FormatRegistry};
pub use idress::parsing::{parse, parse_with, ParseOptions};
pub use idress::record::{Entry, EntryPatch, Medal, Numeral, ObjectKind, Record, Scalar};
pub use idress::rendering::render;
pub use idress::validation::{
    findings_as_text, validate, validate_with_custom_rules, FieldRule, Finding, PredicateRule,
    Severity, ValidationResult, ValidationRule,
};
