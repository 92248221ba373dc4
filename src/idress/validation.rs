//! Validation engine
//!
//! Validation never fails: every data-quality problem becomes a [`Finding`] with a severity,
//! and all findings are collected before the report is returned. A record is valid when no
//! finding has `Error` severity.
//!
//!     validation/
//!     ├── finding.rs      # Severity, Finding, ValidationResult, text report
//!     ├── vocabulary.rs   # allowed types and marks
//!     ├── standard.rs     # the fixed rule set
//!     └── custom.rs       # caller-supplied rules

pub mod custom;
pub mod finding;
pub mod standard;
pub mod vocabulary;

pub use custom::{resolve_path, FieldRule, PredicateRule, ValidationRule};
pub use finding::{findings_as_text, Finding, Severity, ValidationResult};

use crate::idress::record::Record;
use tracing::{debug, warn};

/// Runs the standard rule set.
pub fn validate(record: &Record) -> ValidationResult {
    let result = ValidationResult::from_findings(standard::standard_findings(record));
    log_summary(&result);
    result
}

/// Runs the custom rules, then the standard rule set, and merges the findings.
///
/// A rule that fails to evaluate contributes an `Error` finding instead of aborting the run.
pub fn validate_with_custom_rules(
    record: &Record,
    rules: &[Box<dyn ValidationRule>],
) -> ValidationResult {
    let mut findings = Vec::new();
    for rule in rules {
        match rule.validate(record) {
            Ok(Some(finding)) => findings.push(finding),
            Ok(None) => {}
            Err(err) => {
                let field = rule.field().unwrap_or("unknown");
                warn!(field, error = %err, "custom rule failed");
                findings.push(Finding::error(
                    field,
                    format!("検証ルール適用中にエラーが発生しました: {err}"),
                ));
            }
        }
    }
    findings.extend(standard::standard_findings(record));

    let result = ValidationResult::from_findings(findings);
    log_summary(&result);
    result
}

fn log_summary(result: &ValidationResult) {
    debug!(
        valid = result.is_valid,
        errors = result.count(Severity::Error),
        warnings = result.count(Severity::Warning),
        infos = result.count(Severity::Info),
        "validated record"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::idress::error::RuleError;
    use crate::idress::record::{Entry, Numeral, ObjectKind};

    struct Broken;

    impl ValidationRule for Broken {
        fn validate(&self, _record: &Record) -> Result<Option<Finding>, RuleError> {
            Err(RuleError::Evaluation("boom".to_string()))
        }
    }

    fn valid_record() -> Record {
        Record {
            owner: "テスト".to_string(),
            object_kind: Some(ObjectKind::Object),
            type_name: Some("キャラクター".to_string()),
            scale: Some(Some(Numeral::Int(1))),
            ..Default::default()
        }
        .with_entry(Entry::new("政治", Some(Numeral::Int(1)), "名前", "サンプル"))
    }

    #[test]
    fn test_validate_valid_record() {
        let result = validate(&valid_record());
        assert!(result.is_valid);
        assert!(result.findings.is_empty());
    }

    #[test]
    fn test_custom_rules_run_first() {
        let record = Record {
            owner: String::new(),
            ..valid_record()
        };
        let rules: Vec<Box<dyn ValidationRule>> = vec![Box::new(FieldRule::required("設定"))];
        let result = validate_with_custom_rules(&record, &rules);

        let fields: Vec<_> = result.findings.iter().map(|f| f.field.as_str()).collect();
        assert_eq!(fields, vec!["設定", "オーナー"]);
        assert!(!result.is_valid);
    }

    #[test]
    fn test_failing_rule_becomes_finding() {
        let rules: Vec<Box<dyn ValidationRule>> = vec![Box::new(Broken)];
        let result = validate_with_custom_rules(&valid_record(), &rules);

        assert!(!result.is_valid);
        assert_eq!(result.findings.len(), 1);
        assert_eq!(result.findings[0].field, "unknown");
        assert_eq!(
            result.findings[0].message,
            "検証ルール適用中にエラーが発生しました: boom"
        );
    }

    #[test]
    fn test_custom_warning_keeps_record_valid() {
        let rules: Vec<Box<dyn ValidationRule>> =
            vec![Box::new(FieldRule::required("HP").with_severity(Severity::Warning))];
        let result = validate_with_custom_rules(&valid_record(), &rules);
        assert!(result.is_valid);
        assert_eq!(result.count(Severity::Warning), 1);
    }
}
