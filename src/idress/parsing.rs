//! Sheet text -> Record
//!
//! Every non-blank line is tokenized into a [`LineShape`] and classified into exactly one
//! [`LineKind`]. Classification follows a fixed priority:
//!
//!     1. identity line   first non-blank line, >= 4 fields, third field `名前`
//!     2. owner           `オーナー：owner[：url]`
//!     3. special         `特殊：...`
//!     4. type            `タイプ：...` / `ストラクチャータイプ：...` (the latter marks a structure)
//!     5. scale           `スケール：３` (dash or empty is null)
//!     6. hp              `HP：...` kept verbatim
//!     7. settings / next `設定：...` / `次のアイドレス：...` remaining fields rejoined
//!     8. medal           `適用勲章Ｎ：name[：effect][：url]`
//!     9. entry           `mark：number：label：description` (>= 3 fields)
//!    10. field           any other `key：value`, kept in the extension bag (`根拠` and
//!                        `オブジェクトタイプ` set their fields, a scalar `データ` is dropped)
//!
//! Lines with fewer than two fields are dropped. The lenient default never fails; strict
//! mode ([`ParseOptions::strict`]) reports the first dropped line instead.

use crate::idress::error::ParseError;
use crate::idress::grammar::{
    DASH_PAIR, ENTRIES_KEY, HP_KEY, MEDAL_PREFIX, NAME_LABEL, NEXT_STAGE_KEY, OBJECT_KIND_KEY,
    OWNER_KEY, RATIONALE_KEY, SCALE_KEY, SETTINGS_KEY, SPECIAL_KEY, STRUCTURE_TYPE_KEY, TYPE_KEY,
};
use crate::idress::lexing::LineShape;
use crate::idress::numerals::parse_numeral;
use crate::idress::record::{Entry, Medal, Numeral, ObjectKind, Record, Scalar};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, trace};

static URL_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"https?://\S+").unwrap());

/// Parser behavior switches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Fail on lines with fewer than two fields instead of dropping them.
    pub strict: bool,
}

impl ParseOptions {
    pub fn strict() -> Self {
        Self { strict: true }
    }
}

/// What a single line contributes to the record
#[derive(Debug, Clone, PartialEq)]
pub enum LineKind<'a> {
    Identity(Entry),
    Owner {
        owner: &'a str,
        rationale: Option<&'a str>,
    },
    Special(&'a str),
    Type {
        type_name: &'a str,
        structure: bool,
    },
    Scale(Option<Numeral>),
    Hp(&'a str),
    Settings(String),
    NextStage(String),
    Medal(Medal),
    Entry(Entry),
    Field {
        key: &'a str,
        value: &'a str,
    },
}

/// Classifies one line. `first` is set for the first non-blank line of the text.
///
/// Returns `None` for malformed lines (fewer than two fields).
pub fn classify<'a>(shape: &LineShape<'a>, first: bool) -> Option<LineKind<'a>> {
    if shape.len() < 2 {
        return None;
    }

    let fields = &shape.fields;
    if first && shape.len() >= 4 && fields[2] == NAME_LABEL {
        return Some(LineKind::Identity(Entry::new(
            fields[0],
            parse_numeral(fields[1]),
            NAME_LABEL,
            fields[3],
        )));
    }

    let key = shape.key();
    let kind = match key {
        OWNER_KEY => LineKind::Owner {
            owner: fields[1],
            rationale: find_url(shape.raw),
        },
        SPECIAL_KEY => LineKind::Special(fields[1]),
        TYPE_KEY | STRUCTURE_TYPE_KEY => LineKind::Type {
            type_name: fields[1],
            structure: key == STRUCTURE_TYPE_KEY,
        },
        SCALE_KEY => LineKind::Scale(parse_numeral(fields[1])),
        HP_KEY => LineKind::Hp(fields[1]),
        SETTINGS_KEY => LineKind::Settings(shape.joined_from(1)),
        NEXT_STAGE_KEY => LineKind::NextStage(shape.joined_from(1)),
        _ if key.starts_with(MEDAL_PREFIX) => LineKind::Medal(medal_line(shape)),
        _ if shape.len() >= 3 => LineKind::Entry(entry_line(shape)),
        _ => LineKind::Field {
            key,
            value: fields[1],
        },
    };
    Some(kind)
}

/// First `http(s)://` URL on the raw line.
pub(crate) fn find_url(raw: &str) -> Option<&str> {
    URL_PATTERN.find(raw).map(|m| m.as_str())
}

fn medal_line(shape: &LineShape<'_>) -> Medal {
    let rationale = find_url(shape.raw);
    // `適用勲章１：name：https://...` splits the URL scheme off as a third field
    let effect = match (shape.field(2), rationale) {
        (Some(field), Some(url)) if is_scheme_of(field, url) => "",
        (Some(field), _) => field,
        (None, _) => "",
    };
    Medal::new(shape.fields[1], effect, rationale.unwrap_or_default())
}

fn is_scheme_of(field: &str, url: &str) -> bool {
    matches!(field, "http" | "https") && url.starts_with(field)
}

/// Generic entry line.
///
/// Descriptions may contain colons. When the raw line has a halfwidth colon, the description is
/// everything after the first one; otherwise the fourth fullwidth field is the description.
fn entry_line(shape: &LineShape<'_>) -> Entry {
    let fields = &shape.fields;
    let mark = if fields[0] == DASH_PAIR { "" } else { fields[0] };

    let (label, description) = match shape.after_first_colon() {
        Some(description) => (fields[2].trim(), description),
        None if shape.len() >= 4 => (fields[2], fields[3]),
        None => (fields[2].trim(), ""),
    };

    Entry::new(mark, parse_numeral(fields[1]), label, description)
}

fn apply(record: &mut Record, kind: LineKind<'_>) {
    match kind {
        LineKind::Identity(entry) | LineKind::Entry(entry) => record.entries.push(entry),
        LineKind::Owner { owner, rationale } => {
            record.owner = owner.to_string();
            if let Some(url) = rationale {
                record.rationale = Some(url.to_string());
            }
        }
        LineKind::Special(special) => record.special = Some(special.to_string()),
        LineKind::Type {
            type_name,
            structure,
        } => {
            record.type_name = Some(type_name.to_string());
            if structure {
                record.object_kind = Some(ObjectKind::Structure);
            }
        }
        LineKind::Scale(scale) => record.scale = Some(scale),
        LineKind::Hp(hp) => record.hp = Some(hp.to_string()),
        LineKind::Settings(settings) => record.settings = Some(settings),
        LineKind::NextStage(next) => record.next_stage = Some(next),
        LineKind::Medal(medal) => record.medals.push(medal),
        LineKind::Field { key, value } => apply_field(record, key, value),
    }
}

/// Extra `key：value` lines. Keys naming a structured field set that field.
fn apply_field(record: &mut Record, key: &str, value: &str) {
    match key {
        RATIONALE_KEY => record.rationale = Some(value.to_string()),
        OBJECT_KIND_KEY => record.object_kind = Some(ObjectKind::from(value.to_string())),
        // A scalar cannot stand in for the entry list, and the bag would collide with its key
        ENTRIES_KEY => debug!(key, value, "ignoring scalar for the entry list"),
        _ => {
            record.extensions.insert(key.to_string(), Scalar::from(value));
        }
    }
}

/// Parses the text, returning the record and the dropped lines (1-based number, content).
fn parse_lines(text: &str) -> (Record, Vec<(usize, &str)>) {
    let mut record = Record {
        special: Some(String::new()),
        object_kind: Some(ObjectKind::Object),
        ..Default::default()
    };
    let mut dropped = Vec::new();
    let mut first = true;

    for (index, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let shape = LineShape::new(line);
        match classify(&shape, first) {
            Some(kind) => {
                trace!(line = index + 1, ?kind, "classified line");
                apply(&mut record, kind);
            }
            None => {
                debug!(line = index + 1, content = line, "dropping malformed line");
                dropped.push((index + 1, line));
            }
        }
        first = false;
    }

    (record, dropped)
}

/// Parses sheet text into a record, dropping malformed lines.
pub fn parse(text: &str) -> Record {
    parse_lines(text).0
}

/// Parses sheet text with explicit options.
pub fn parse_with(text: &str, options: &ParseOptions) -> Result<Record, ParseError> {
    let (record, dropped) = parse_lines(text);
    match dropped.first() {
        Some(&(line, content)) if options.strict => Err(ParseError::MalformedLine {
            line,
            content: content.to_string(),
        }),
        _ => Ok(record),
    }
}
