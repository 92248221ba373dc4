//! Standard rule set
//!
//! Every check runs on every call and all findings are collected; the order below only fixes
//! the order of the report.

use crate::idress::grammar::{
    ENTRIES_KEY, MEDAL_PREFIX, NAME_LABEL, OBJECT_KIND_KEY, OWNER_KEY, RATIONALE_KEY, SCALE_KEY,
    TYPE_KEY,
};
use crate::idress::record::{Entry, Medal, ObjectKind, Record};
use crate::idress::validation::finding::{Finding, Severity};
use crate::idress::validation::vocabulary::{allowed_marks, allowed_types};
use indexmap::IndexMap;
use tracing::trace;

const NUMBER_MIN: f64 = 0.0;
const NUMBER_MAX: f64 = 9.0;

/// Runs the standard checks over a record.
pub fn standard_findings(record: &Record) -> Vec<Finding> {
    let mut findings = Vec::new();
    check_owner(record, &mut findings);
    check_object_kind(record, &mut findings);
    check_type(record, &mut findings);
    check_scale(record, &mut findings);
    check_entries(record, &mut findings);
    check_medals(record, &mut findings);
    check_rationale(record, &mut findings);
    findings
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn check_owner(record: &Record, findings: &mut Vec<Finding>) {
    if is_blank(&record.owner) {
        findings.push(
            Finding::error(OWNER_KEY, "オーナーは必須項目です").with_value(&record.owner),
        );
    }
}

fn check_object_kind(record: &Record, findings: &mut Vec<Finding>) {
    match &record.object_kind {
        None => findings.push(Finding::warning(
            OBJECT_KIND_KEY,
            "オブジェクトタイプが指定されていません",
        )),
        Some(ObjectKind::Other(kind)) if kind.is_empty() => findings.push(Finding::warning(
            OBJECT_KIND_KEY,
            "オブジェクトタイプが指定されていません",
        )),
        Some(ObjectKind::Other(kind)) => findings.push(
            Finding::error(
                OBJECT_KIND_KEY,
                "オブジェクトタイプは「オブジェクト」または「ストラクチャー」である必要があります",
            )
            .with_value(kind),
        ),
        Some(_) => {}
    }
}

fn check_type(record: &Record, findings: &mut Vec<Finding>) {
    let type_name = match record.type_name.as_deref() {
        Some(t) if !is_blank(t) => t,
        _ => {
            findings.push(Finding::warning(TYPE_KEY, "タイプは必須項目です"));
            return;
        }
    };

    let Some(kind) = &record.object_kind else {
        return;
    };
    let Some(allowed) = allowed_types(kind) else {
        return;
    };
    if !allowed.contains(&type_name) {
        findings.push(
            Finding::error(
                TYPE_KEY,
                format!(
                    "{}の場合、タイプは {} のいずれかである必要があります",
                    kind,
                    allowed.join("、")
                ),
            )
            .with_value(type_name),
        );
    }
}

fn check_scale(record: &Record, findings: &mut Vec<Finding>) {
    match &record.scale {
        None => findings.push(Finding::warning(SCALE_KEY, "スケールが指定されていません")),
        Some(Some(scale)) if !scale.is_numeric() => findings.push(
            Finding::error(SCALE_KEY, "スケールは数値または null である必要があります")
                .with_value(scale),
        ),
        Some(_) => {}
    }
}

fn check_entries(record: &Record, findings: &mut Vec<Finding>) {
    if record.entries.is_empty() {
        findings.push(Finding::warning(ENTRIES_KEY, "データ項目が存在しません"));
        return;
    }

    for (index, entry) in record.entries.iter().enumerate() {
        check_entry(record, index, entry, findings);
    }

    if !record.entries.iter().any(Entry::is_identity) {
        findings.push(Finding::warning(
            ENTRIES_KEY,
            format!("「{NAME_LABEL}」項目が見つかりません"),
        ));
    }

    if record.is_structure() {
        check_duplicate_numbers(record, findings);
    }
}

fn check_entry(record: &Record, index: usize, entry: &Entry, findings: &mut Vec<Finding>) {
    let field = |name: &str| format!("{ENTRIES_KEY}[{index}].{name}");

    if is_blank(&entry.label) {
        findings.push(Finding::error(field("名前"), "名前は必須項目です").with_value(&entry.label));
    }

    if let Some(number) = &entry.number {
        match number.as_f64() {
            None => findings.push(
                Finding::error(
                    field("ナンバー"),
                    "ナンバーは数値または null である必要があります",
                )
                .with_value(number),
            ),
            Some(n) if !(NUMBER_MIN..=NUMBER_MAX).contains(&n) => findings.push(
                Finding::error(field("ナンバー"), "ナンバーは0から9の範囲内である必要があります")
                    .with_value(number),
            ),
            Some(_) => {}
        }
    }

    if entry.has_mark() {
        if entry.number.is_none() {
            findings.push(
                Finding::error(
                    field("ナンバー"),
                    "マークが設定されている場合、ナンバーも設定されている必要があります",
                )
                .with_value(&entry.number),
            );
        }
        check_mark(record, entry, &field("マーク"), findings);
    }

    if entry.is_identity() && is_blank(&entry.description) {
        findings.push(
            Finding::error(field("説明"), "名前項目の説明（キャラクター名）は必須です")
                .with_value(&entry.description),
        );
    }
}

fn check_mark(record: &Record, entry: &Entry, field: &str, findings: &mut Vec<Finding>) {
    let Some(type_name) = record.type_name.as_deref().filter(|t| !is_blank(t)) else {
        return;
    };
    let Some(marks) = allowed_marks(type_name) else {
        return;
    };
    if marks.contains(&entry.mark.as_str()) {
        return;
    }

    let severity = if record.object_kind == Some(ObjectKind::Object) {
        Severity::Error
    } else {
        Severity::Warning
    };
    trace!(mark = %entry.mark, type_name, "mark outside type vocabulary");
    findings.push(
        Finding::new(
            field,
            format!(
                "タイプ「{}」では「{}」マークは使用できません。使用可能なマーク: {}",
                type_name,
                entry.mark,
                marks.join(", ")
            ),
            severity,
        )
        .with_value(&entry.mark),
    );
}

fn check_duplicate_numbers(record: &Record, findings: &mut Vec<Finding>) {
    let mut groups: IndexMap<String, (&Entry, Vec<&str>)> = IndexMap::new();
    for entry in &record.entries {
        if let Some(number) = &entry.number {
            groups
                .entry(number.to_string())
                .or_insert_with(|| (entry, Vec::new()))
                .1
                .push(entry.label.as_str());
        }
    }

    for (number, (first, labels)) in groups {
        if labels.len() > 1 {
            findings.push(
                Finding::error(
                    ENTRIES_KEY,
                    format!(
                        "ストラクチャー内でナンバー {} が重複しています（{}）",
                        number,
                        labels.join("、")
                    ),
                )
                .with_value(&first.number),
            );
        }
    }
}

fn check_medals(record: &Record, findings: &mut Vec<Finding>) {
    for (index, medal) in record.medals.iter().enumerate() {
        check_medal(index, medal, findings);
    }
}

fn check_medal(index: usize, medal: &Medal, findings: &mut Vec<Finding>) {
    let field = |name: &str| format!("{MEDAL_PREFIX}[{index}].{name}");

    if is_blank(&medal.name) {
        findings.push(Finding::error(field("名前"), "勲章名は必須項目です").with_value(&medal.name));
    }
    if is_blank(&medal.effect) {
        findings.push(Finding::warning(field("適用効果"), "適用効果が指定されていません"));
    }
    if let Some(finding) = check_url(&field(RATIONALE_KEY), &medal.rationale) {
        findings.push(finding);
    }
}

fn check_rationale(record: &Record, findings: &mut Vec<Finding>) {
    if let Some(finding) = record
        .rationale
        .as_deref()
        .and_then(|rationale| check_url(RATIONALE_KEY, rationale))
    {
        findings.push(finding);
    }
}

/// Only values that look like URLs are checked.
fn check_url(field: &str, value: &str) -> Option<Finding> {
    let looks_like_url = value.starts_with("http://") || value.starts_with("https://");
    if looks_like_url && url::Url::parse(value).is_err() {
        Some(Finding::warning(field, "URLの形式が正しくありません").with_value(value))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::idress::record::Numeral;

    fn character() -> Record {
        Record {
            owner: "テスト".to_string(),
            object_kind: Some(ObjectKind::Object),
            type_name: Some("キャラクター".to_string()),
            scale: Some(None),
            ..Default::default()
        }
        .with_entry(Entry::new("政治", Some(Numeral::Int(1)), "名前", "サンプル"))
    }

    fn fields(findings: &[Finding]) -> Vec<(&str, Severity)> {
        findings
            .iter()
            .map(|f| (f.field.as_str(), f.severity))
            .collect()
    }

    #[test]
    fn test_clean_character() {
        assert!(standard_findings(&character()).is_empty());
    }

    #[test]
    fn test_blank_owner() {
        let record = Record {
            owner: "  ".to_string(),
            ..character()
        };
        assert_eq!(
            fields(&standard_findings(&record)),
            vec![("オーナー", Severity::Error)]
        );
    }

    #[test]
    fn test_object_kind_findings() {
        let mut record = character();
        record.object_kind = None;
        let findings = standard_findings(&record);
        assert_eq!(fields(&findings), vec![("オブジェクトタイプ", Severity::Warning)]);

        record.object_kind = Some(ObjectKind::Other("ロボット".to_string()));
        let findings = standard_findings(&record);
        assert_eq!(fields(&findings), vec![("オブジェクトタイプ", Severity::Error)]);
        assert_eq!(findings[0].value, Some(serde_json::json!("ロボット")));
    }

    #[test]
    fn test_type_outside_vocabulary() {
        let record = Record {
            type_name: Some("種族".to_string()),
            ..character()
        };
        let findings = standard_findings(&record);
        assert_eq!(findings[0].field, "タイプ");
        assert_eq!(
            findings[0].message,
            "オブジェクトの場合、タイプは キャラクター、建築物、メカ、組織、国 のいずれかである必要があります"
        );
    }

    #[test]
    fn test_missing_type_skips_mark_check() {
        let record = Record {
            type_name: None,
            ..character()
        }
        .with_entry(Entry::new("なにか", Some(Numeral::Int(2)), "特技", "x"));
        assert_eq!(
            fields(&standard_findings(&record)),
            vec![("タイプ", Severity::Warning)]
        );
    }

    #[test]
    fn test_scale_findings() {
        let absent = Record {
            scale: None,
            ..character()
        };
        assert_eq!(
            fields(&standard_findings(&absent)),
            vec![("スケール", Severity::Warning)]
        );

        let text = Record {
            scale: Some(Some(Numeral::Text("大".to_string()))),
            ..character()
        };
        assert_eq!(
            fields(&standard_findings(&text)),
            vec![("スケール", Severity::Error)]
        );
    }

    #[test]
    fn test_entry_findings() {
        let record = character()
            .with_entry(Entry::new("", Some(Numeral::Int(12)), "", "x"))
            .with_entry(Entry::new("攻撃", None, "剣", "x"))
            .with_entry(Entry::new("", Some(Numeral::Text("abc".into())), "盾", "x"));
        assert_eq!(
            fields(&standard_findings(&record)),
            vec![
                ("データ[1].名前", Severity::Error),
                ("データ[1].ナンバー", Severity::Error),
                ("データ[2].ナンバー", Severity::Error),
                ("データ[3].ナンバー", Severity::Error),
            ]
        );
    }

    #[test]
    fn test_blank_name_description() {
        let record = Record {
            entries: vec![Entry::new("政治", Some(Numeral::Int(1)), "名前", " ")],
            ..character()
        };
        assert_eq!(
            fields(&standard_findings(&record)),
            vec![("データ[0].説明", Severity::Error)]
        );
    }

    #[test]
    fn test_mark_severity_follows_kind() {
        let object = character().with_entry(Entry::new("政治", Some(Numeral::Int(2)), "x", "y"));
        let object = Record {
            type_name: Some("メカ".to_string()),
            ..object
        };
        let findings = standard_findings(&object);
        assert_eq!(
            fields(&findings),
            vec![
                ("データ[0].マーク", Severity::Error),
                ("データ[1].マーク", Severity::Error),
            ]
        );
        assert!(findings[0]
            .message
            .starts_with("タイプ「メカ」では「政治」マークは使用できません。使用可能なマーク: 攻撃, 防御"));

        let structure = Record {
            object_kind: Some(ObjectKind::Structure),
            type_name: Some("仕様".to_string()),
            ..object
        };
        assert!(standard_findings(&structure)
            .iter()
            .all(|f| f.severity == Severity::Warning));
    }

    #[test]
    fn test_missing_identity_entry() {
        let record = Record {
            entries: vec![Entry::new("", None, "特技", "料理")],
            ..character()
        };
        assert_eq!(
            fields(&standard_findings(&record)),
            vec![("データ", Severity::Warning)]
        );
    }

    #[test]
    fn test_empty_entries() {
        let record = Record {
            entries: vec![],
            ..character()
        };
        let findings = standard_findings(&record);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].message, "データ項目が存在しません");
    }

    #[test]
    fn test_structure_duplicates_grouped() {
        let record = Record {
            object_kind: Some(ObjectKind::Structure),
            type_name: Some("種族".to_string()),
            ..character()
        }
        .with_entry(Entry::new("", Some(Numeral::Int(1)), "A", "x"))
        .with_entry(Entry::new("", Some(Numeral::Int(2)), "B", "x"))
        .with_entry(Entry::new("", Some(Numeral::Int(2)), "C", "x"));

        let duplicates: Vec<_> = standard_findings(&record)
            .into_iter()
            .filter(|f| f.field == "データ")
            .map(|f| f.message)
            .collect();
        assert_eq!(
            duplicates,
            vec![
                "ストラクチャー内でナンバー 1 が重複しています（名前、A）",
                "ストラクチャー内でナンバー 2 が重複しています（B、C）",
            ]
        );
    }

    #[test]
    fn test_object_allows_duplicates() {
        let record = character().with_entry(Entry::new("", Some(Numeral::Int(1)), "A", "x"));
        assert!(standard_findings(&record).is_empty());
    }

    #[test]
    fn test_medal_findings() {
        let record = character()
            .with_medal(Medal::new("", "", ""))
            .with_medal(Medal::new("勲章", "効果", "http://[bad"))
            .with_medal(Medal::new("勲章", "効果", "掲示板の書き込み"));
        assert_eq!(
            fields(&standard_findings(&record)),
            vec![
                ("適用勲章[0].名前", Severity::Error),
                ("適用勲章[0].適用効果", Severity::Warning),
                ("適用勲章[1].根拠", Severity::Warning),
            ]
        );
    }

    #[test]
    fn test_rationale_url() {
        let good = Record {
            rationale: Some("https://example.com/a?b=c".to_string()),
            ..character()
        };
        assert!(standard_findings(&good).is_empty());

        let bad = Record {
            rationale: Some("https://".to_string()),
            ..character()
        };
        assert_eq!(
            fields(&standard_findings(&bad)),
            vec![("根拠", Severity::Warning)]
        );
    }
}
