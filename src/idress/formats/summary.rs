//! Human-readable summary
//!
//! A read-only overview of a record for terminals and logs. Numbers are shown with ASCII
//! digits; this is not sheet text and cannot be parsed back.

use crate::idress::error::Result;
use crate::idress::formats::format::Format;
use crate::idress::grammar::DASH;
use crate::idress::record::Record;
use std::fmt::Write;

/// Renders the summary text for a record.
pub fn summarize(record: &Record) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = write_summary(&mut out, record);
    out
}

fn write_summary(out: &mut String, record: &Record) -> std::fmt::Result {
    writeln!(out, "=== {} ===", record.display_name().unwrap_or("(名前なし)"))?;
    writeln!(out, "オーナー: {}", record.owner)?;
    if let Some(rationale) = &record.rationale {
        writeln!(out, "根拠: {rationale}")?;
    }
    if let Some(kind) = &record.object_kind {
        writeln!(out, "オブジェクトタイプ: {kind}")?;
    }
    if let Some(type_name) = &record.type_name {
        writeln!(out, "タイプ: {type_name}")?;
    }
    if let Some(scale) = &record.scale {
        let scale = scale.as_ref().map_or(DASH.to_string(), |n| n.to_string());
        writeln!(out, "スケール: {scale}")?;
    }

    if !record.entries.is_empty() {
        writeln!(out, "\nデータ項目:")?;
        for entry in &record.entries {
            let number = entry
                .number
                .as_ref()
                .map_or(DASH.to_string(), |n| n.to_string());
            writeln!(
                out,
                "- {}：{}：{}：{}",
                entry.mark, number, entry.label, entry.description
            )?;
        }
    }

    for (label, value) in [
        ("HP", &record.hp),
        ("設定", &record.settings),
        ("次のアイドレス", &record.next_stage),
    ] {
        if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
            writeln!(out, "\n{label}: {value}")?;
        }
    }

    if !record.medals.is_empty() {
        writeln!(out, "\n適用勲章:")?;
        for medal in &record.medals {
            writeln!(out, "- {}：{}：{}", medal.name, medal.effect, medal.rationale)?;
        }
    }
    Ok(())
}

/// Format implementation for the summary (serialization only)
pub struct SummaryFormat;

impl Format for SummaryFormat {
    fn name(&self) -> &str {
        "summary"
    }

    fn description(&self) -> &str {
        "Human-readable overview (output only)"
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, record: &Record) -> Result<String> {
        Ok(summarize(record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::idress::parsing::parse;

    #[test]
    fn test_summary() {
        let record = parse(
            "政治：１：名前：サンプル\nオーナー：テスト\nタイプ：キャラクター\nHP：２\n適用勲章１：勲章：効果",
        );
        insta::assert_snapshot!(summarize(&record), @r"
        === サンプル ===
        オーナー: テスト
        オブジェクトタイプ: オブジェクト
        タイプ: キャラクター

        データ項目:
        - 政治：1：名前：サンプル

        HP: ２

        適用勲章:
        - 勲章：効果：
        ");
    }

    #[test]
    fn test_summary_without_name() {
        assert!(summarize(&Record::default()).starts_with("=== (名前なし) ==="));
    }

    #[test]
    fn test_summary_is_output_only() {
        assert!(!SummaryFormat.supports_parsing());
        assert!(SummaryFormat.serialize(&Record::default()).is_ok());
    }
}
