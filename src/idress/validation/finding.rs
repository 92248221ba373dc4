//! Findings and validation results

use serde::{Deserialize, Serialize};
use std::fmt;

/// How serious a finding is. Only `Error` makes a record invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl Severity {
    /// Report order
    pub const ALL: [Severity; 3] = [Severity::Error, Severity::Warning, Severity::Info];

    /// Group header used by the text report
    pub fn header(&self) -> &'static str {
        match self {
            Severity::Error => "【エラー】",
            Severity::Warning => "【警告】",
            Severity::Info => "【情報】",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        };
        f.write_str(name)
    }
}

/// One problem found in a record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    /// Path of the offending field, e.g. `データ[2].ナンバー`
    pub field: String,
    pub message: String,
    pub severity: Severity,
    /// The offending value, when there is one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
}

impl Finding {
    pub fn new(field: impl Into<String>, message: impl Into<String>, severity: Severity) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            severity,
            value: None,
        }
    }

    pub fn error(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(field, message, Severity::Error)
    }

    pub fn warning(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(field, message, Severity::Warning)
    }

    pub fn info(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(field, message, Severity::Info)
    }

    /// Attaches the offending value. Values that cannot be represented are left out.
    pub fn with_value<T: Serialize + ?Sized>(mut self, value: &T) -> Self {
        self.value = serde_json::to_value(value).ok();
        self
    }
}

/// Outcome of validating a record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// `true` when no finding has `Error` severity
    pub is_valid: bool,
    pub findings: Vec<Finding>,
}

impl ValidationResult {
    pub fn from_findings(findings: Vec<Finding>) -> Self {
        let is_valid = !findings.iter().any(|f| f.severity == Severity::Error);
        Self { is_valid, findings }
    }

    pub fn with_severity(&self, severity: Severity) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(move |f| f.severity == severity)
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.with_severity(severity).count()
    }

    pub fn has_warnings(&self) -> bool {
        self.count(Severity::Warning) > 0
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verdict = if self.is_valid { "有効" } else { "無効" };
        writeln!(f, "検証結果: {verdict}")?;

        if self.findings.is_empty() {
            return write!(f, "問題は見つかりませんでした。");
        }

        for severity in Severity::ALL {
            let mut group = self.with_severity(severity).peekable();
            if group.peek().is_none() {
                continue;
            }
            writeln!(f, "\n{}", severity.header())?;
            for finding in group {
                writeln!(f, "- {}: {}", finding.field, finding.message)?;
            }
        }
        Ok(())
    }
}

/// Deterministic text report: verdict line, then findings grouped as Error, Warning, Info.
pub fn findings_as_text(result: &ValidationResult) -> String {
    result.to_string()
}
