//! The structured record
//!
//! A [`Record`] is a single owned value tree: the parser builds a fresh one per call, and the
//! renderer, the serializers and the validator only read it. Edits go through the
//! value-returning helpers at the bottom of this file.
//!
//! Field names serialize to the sheet's own vocabulary (`オーナー`, `データ`, ...) so YAML and
//! JSON files written by other idress tools load unchanged.

use crate::idress::grammar::{NAME_LABEL, OBJECT_KIND_OBJECT, OBJECT_KIND_STRUCTURE};
use crate::idress::numerals::to_narrow;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Open-ended extra fields, in the order they were encountered.
pub type Extensions = IndexMap<String, Scalar>;

/// A numeric slot value.
///
/// Numbers parsed from a sheet are `Int` or `Float`. `Text` holds a value that was supplied
/// where a number was expected but does not read as one; the validator reports it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Numeral {
    Int(i64),
    Float(f64),
    Text(String),
}

impl Numeral {
    /// Integral floats collapse to `Int`.
    pub fn from_f64(value: f64) -> Self {
        if value.fract() == 0.0 && value.abs() < 9.0e15 {
            Numeral::Int(value as i64)
        } else {
            Numeral::Float(value)
        }
    }

    /// The numeric value, if this slot holds a finite number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Numeral::Int(n) => Some(*n as f64),
            Numeral::Float(f) => Some(*f).filter(|f| f.is_finite()),
            Numeral::Text(s) => to_narrow(s.trim())
                .parse::<f64>()
                .ok()
                .filter(|f| f.is_finite()),
        }
    }

    pub fn is_numeric(&self) -> bool {
        self.as_f64().is_some()
    }
}

impl From<i64> for Numeral {
    fn from(value: i64) -> Self {
        Numeral::Int(value)
    }
}

impl fmt::Display for Numeral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Numeral::Int(n) => write!(f, "{n}"),
            Numeral::Float(x) => write!(f, "{x}"),
            Numeral::Text(s) => write!(f, "{s}"),
        }
    }
}

/// A value in the extension bag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_string())
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => Ok(()),
            Scalar::Bool(b) => write!(f, "{b}"),
            Scalar::Int(n) => write!(f, "{n}"),
            Scalar::Float(x) => write!(f, "{x}"),
            Scalar::Text(s) => write!(f, "{s}"),
        }
    }
}

/// Classification of a record: a concrete instance or a reusable bundle of traits.
///
/// `Other` keeps unrecognized values loaded from YAML/JSON so the validator can flag them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ObjectKind {
    Object,
    Structure,
    Other(String),
}

impl ObjectKind {
    pub fn as_str(&self) -> &str {
        match self {
            ObjectKind::Object => OBJECT_KIND_OBJECT,
            ObjectKind::Structure => OBJECT_KIND_STRUCTURE,
            ObjectKind::Other(s) => s,
        }
    }
}

impl From<String> for ObjectKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            OBJECT_KIND_OBJECT => ObjectKind::Object,
            OBJECT_KIND_STRUCTURE => ObjectKind::Structure,
            _ => ObjectKind::Other(value),
        }
    }
}

impl From<ObjectKind> for String {
    fn from(value: ObjectKind) -> Self {
        match value {
            ObjectKind::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One line item of the record: a skill, trait or attribute.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// Category tag; empty when the line carries no mark.
    #[serde(rename = "マーク", default)]
    pub mark: String,
    /// Priority slot 0-9, not a count.
    #[serde(rename = "ナンバー", default)]
    pub number: Option<Numeral>,
    #[serde(rename = "名前", default)]
    pub label: String,
    #[serde(rename = "説明", default)]
    pub description: String,
}

impl Entry {
    pub fn new(
        mark: impl Into<String>,
        number: Option<Numeral>,
        label: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            mark: mark.into(),
            number,
            label: label.into(),
            description: description.into(),
        }
    }

    /// Whether this is the identity entry (`名前`).
    pub fn is_identity(&self) -> bool {
        self.label == NAME_LABEL
    }

    pub fn has_mark(&self) -> bool {
        !self.mark.trim().is_empty()
    }
}

/// Partial update for [`Record::with_updated_entries`]. Unset fields keep their value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryPatch {
    pub mark: Option<String>,
    pub number: Option<Option<Numeral>>,
    pub label: Option<String>,
    pub description: Option<String>,
}

impl EntryPatch {
    pub fn apply(&self, entry: &Entry) -> Entry {
        Entry {
            mark: self.mark.clone().unwrap_or_else(|| entry.mark.clone()),
            number: self.number.clone().unwrap_or_else(|| entry.number.clone()),
            label: self.label.clone().unwrap_or_else(|| entry.label.clone()),
            description: self
                .description
                .clone()
                .unwrap_or_else(|| entry.description.clone()),
        }
    }
}

/// An awarded distinction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Medal {
    #[serde(rename = "名前", default)]
    pub name: String,
    #[serde(rename = "適用効果", default)]
    pub effect: String,
    /// Usually a URL pointing at the award.
    #[serde(rename = "根拠", default)]
    pub rationale: String,
}

impl Medal {
    pub fn new(
        name: impl Into<String>,
        effect: impl Into<String>,
        rationale: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            effect: effect.into(),
            rationale: rationale.into(),
        }
    }
}

/// A whole entity sheet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "オーナー", default)]
    pub owner: String,
    /// Usually the URL found on the owner line.
    #[serde(rename = "根拠", default, skip_serializing_if = "Option::is_none")]
    pub rationale: Option<String>,
    #[serde(rename = "特殊", default, skip_serializing_if = "Option::is_none")]
    pub special: Option<String>,
    #[serde(
        rename = "オブジェクトタイプ",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub object_kind: Option<ObjectKind>,
    #[serde(rename = "タイプ", default, skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    /// Absent, explicitly empty (`Some(None)`), or a value.
    #[serde(
        rename = "スケール",
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub scale: Option<Option<Numeral>>,
    /// Ordered; the first `名前` entry is the identity line.
    #[serde(rename = "データ", default, skip_serializing_if = "Vec::is_empty")]
    pub entries: Vec<Entry>,
    /// Free text; not required to be numeric.
    #[serde(rename = "HP", default, skip_serializing_if = "Option::is_none")]
    pub hp: Option<String>,
    #[serde(rename = "設定", default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<String>,
    #[serde(rename = "次のアイドレス", default, skip_serializing_if = "Option::is_none")]
    pub next_stage: Option<String>,
    #[serde(rename = "適用勲章", default)]
    pub medals: Vec<Medal>,
    #[serde(flatten)]
    pub extensions: Extensions,
}

/// Keeps an explicit `null` distinct from a missing key.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl Record {
    /// Position of the identity entry, if any.
    pub fn identity_index(&self) -> Option<usize> {
        self.entries.iter().position(Entry::is_identity)
    }

    pub fn identity_entry(&self) -> Option<&Entry> {
        self.identity_index().map(|i| &self.entries[i])
    }

    /// The display name, which is also the storage key of the record.
    pub fn display_name(&self) -> Option<&str> {
        self.identity_entry().map(|e| e.description.as_str())
    }

    /// The object kind, reading an unset or empty kind as `Object`.
    pub fn object_kind_or_default(&self) -> ObjectKind {
        match &self.object_kind {
            None => ObjectKind::Object,
            Some(ObjectKind::Other(s)) if s.is_empty() => ObjectKind::Object,
            Some(kind) => kind.clone(),
        }
    }

    pub fn is_structure(&self) -> bool {
        self.object_kind == Some(ObjectKind::Structure)
    }

    /// Appends an entry.
    pub fn with_entry(mut self, entry: Entry) -> Self {
        self.entries.push(entry);
        self
    }

    /// Replaces every entry labelled `label` with the patched entry.
    pub fn with_updated_entries(mut self, label: &str, patch: &EntryPatch) -> Self {
        self.entries = self
            .entries
            .into_iter()
            .map(|e| if e.label == label { patch.apply(&e) } else { e })
            .collect();
        self
    }

    /// Drops every entry labelled `label`.
    pub fn without_entries(mut self, label: &str) -> Self {
        self.entries.retain(|e| e.label != label);
        self
    }

    pub fn with_medal(mut self, medal: Medal) -> Self {
        self.medals.push(medal);
        self
    }
}
