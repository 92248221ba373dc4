//! Caller-supplied rules
//!
//! A rule inspects the whole record and may return one finding. Rules address fields by a
//! dot-separated path over the serialized record (`設定`, `データ.0.説明`, `適用勲章.1.根拠`),
//! so the path vocabulary is the same one YAML and JSON files use.

use crate::idress::error::RuleError;
use crate::idress::record::Record;
use crate::idress::validation::finding::{Finding, Severity};
use regex::Regex;
use serde_json::Value;

/// A custom validation rule.
///
/// Returning `Err` does not abort validation: the engine turns the error into an
/// `Error` finding attributed to [`ValidationRule::field`].
pub trait ValidationRule: Send + Sync {
    /// Field the rule is about, used to attribute evaluation failures.
    fn field(&self) -> Option<&str> {
        None
    }

    fn validate(&self, record: &Record) -> Result<Option<Finding>, RuleError>;
}

/// Looks up a dot-separated path in the serialized record.
///
/// Numeric segments index into lists. Returns `Ok(None)` when the path does not exist.
pub fn resolve_path(record: &Record, path: &str) -> Result<Option<Value>, RuleError> {
    let root = serde_json::to_value(record)?;
    Ok(lookup(&root, path).cloned())
}

fn lookup<'v>(root: &'v Value, path: &str) -> Option<&'v Value> {
    path.split('.').try_fold(root, |current, segment| match current {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

enum Check {
    Required,
    Range { min: f64, max: f64 },
    Pattern(Regex),
}

impl Check {
    fn passes(&self, value: Option<&Value>) -> bool {
        match self {
            Check::Required => match value {
                None | Some(Value::Null) => false,
                Some(Value::String(s)) => !s.is_empty(),
                Some(_) => true,
            },
            Check::Range { min, max } => match value {
                Some(Value::Null) => true,
                Some(Value::Number(n)) => n.as_f64().is_some_and(|n| *min <= n && n <= *max),
                _ => false,
            },
            Check::Pattern(pattern) => match value {
                None | Some(Value::Null) => true,
                Some(Value::String(s)) => s.is_empty() || pattern.is_match(s),
                Some(other) => pattern.is_match(&other.to_string()),
            },
        }
    }
}

/// Ready-made rule over a single field path: presence, numeric range or pattern match.
///
/// ```ignore
/// let rule = FieldRule::range("スケール", 0.0, 10.0).with_severity(Severity::Warning);
/// ```
pub struct FieldRule {
    field: String,
    check: Check,
    message: String,
    severity: Severity,
}

impl FieldRule {
    fn new(field: impl Into<String>, check: Check, message: String) -> Self {
        Self {
            field: field.into(),
            check,
            message,
            severity: Severity::Error,
        }
    }

    /// The field must be present, non-null and not an empty string.
    pub fn required(field: impl Into<String>) -> Self {
        let field = field.into();
        let message = format!("{field}は必須項目です");
        Self::new(field, Check::Required, message)
    }

    /// The field must be null or a number within `min..=max`. A missing field fails.
    pub fn range(field: impl Into<String>, min: f64, max: f64) -> Self {
        let field = field.into();
        let message = format!("{field}は{min}から{max}の範囲内である必要があります");
        Self::new(field, Check::Range { min, max }, message)
    }

    /// A non-empty value must match `pattern`. Missing, null and empty values pass.
    pub fn pattern(field: impl Into<String>, pattern: Regex) -> Self {
        let field = field.into();
        let message = format!("{field}は指定されたパターンに一致する必要があります");
        Self::new(field, Check::Pattern(pattern), message)
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

impl ValidationRule for FieldRule {
    fn field(&self) -> Option<&str> {
        Some(&self.field)
    }

    fn validate(&self, record: &Record) -> Result<Option<Finding>, RuleError> {
        let value = resolve_path(record, &self.field)?;
        if self.check.passes(value.as_ref()) {
            return Ok(None);
        }
        Ok(Some(Finding {
            field: self.field.clone(),
            message: self.message.clone(),
            severity: self.severity,
            value,
        }))
    }
}

/// A rule backed by a closure. The finding is emitted when the predicate returns `false`.
pub struct PredicateRule<F> {
    field: String,
    predicate: F,
    message: String,
    severity: Severity,
}

impl<F> PredicateRule<F>
where
    F: Fn(&Record) -> bool + Send + Sync,
{
    pub fn new(field: impl Into<String>, predicate: F, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            predicate,
            message: message.into(),
            severity: Severity::Error,
        }
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

impl<F> ValidationRule for PredicateRule<F>
where
    F: Fn(&Record) -> bool + Send + Sync,
{
    fn field(&self) -> Option<&str> {
        Some(&self.field)
    }

    fn validate(&self, record: &Record) -> Result<Option<Finding>, RuleError> {
        if (self.predicate)(record) {
            return Ok(None);
        }
        Ok(Some(Finding {
            field: self.field.clone(),
            message: self.message.clone(),
            severity: self.severity,
            value: resolve_path(record, &self.field)?,
        }))
    }
}
