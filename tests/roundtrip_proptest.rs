//! Property-based tests for the sheet codec and the validation laws

use idress::idress::numerals::{to_narrow, to_wide};
use idress::{
    parse, render, validate, Entry, Medal, Numeral, ObjectKind, Record, Scalar, Severity,
};
use proptest::prelude::*;

const MARKS: &[&str] = &["", "攻撃", "防御", "知識", "政治", "生産", "情報"];
const RANGE_MESSAGE: &str = "ナンバーは0から9の範囲内である必要があります";
const COUPLING_MESSAGE: &str = "マークが設定されている場合、ナンバーも設定されている必要があります";

/// Colon-free text without surrounding whitespace
fn word() -> impl Strategy<Value = String> {
    "[a-zA-Zあ-ん]{1,8}"
}

fn mark() -> impl Strategy<Value = String> {
    proptest::sample::select(MARKS).prop_map(str::to_string)
}

fn number() -> impl Strategy<Value = Option<Numeral>> {
    proptest::option::of((0i64..=9).prop_map(Numeral::Int))
}

/// Descriptions may carry colons of either width after the first character
fn description() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        word(),
        (word(), prop_oneof![Just(':'), Just('：')], word())
            .prop_map(|(head, colon, tail)| format!("{head}{colon}{tail}")),
    ]
}

fn entry() -> impl Strategy<Value = Entry> {
    (mark(), number(), "[a-z]{1,6}", description())
        .prop_map(|(mark, number, label, description)| Entry::new(mark, number, label, description))
}

fn url() -> impl Strategy<Value = String> {
    "[a-z]{1,6}".prop_map(|path| format!("https://example.com/{path}"))
}

fn medal() -> impl Strategy<Value = Medal> {
    (
        word(),
        prop_oneof![Just(String::new()), "[あ-ん]{1,6}"],
        prop_oneof![Just(String::new()), url()],
    )
        .prop_map(|(name, effect, rationale)| Medal::new(name, effect, rationale))
}

fn rationale() -> impl Strategy<Value = String> {
    prop_oneof![url(), word(), Just(String::new())]
}

fn object_kind() -> impl Strategy<Value = ObjectKind> {
    prop_oneof![
        Just(ObjectKind::Object),
        Just(ObjectKind::Structure),
        word().prop_map(ObjectKind::Other),
    ]
}

/// Hand-written sheets, including the fallback lines that set structured fields
fn sheet() -> impl Strategy<Value = String> {
    let line = prop_oneof![
        word().prop_map(|w| format!("オーナー：{w}")),
        (word(), url()).prop_map(|(w, u)| format!("オーナー：{w}：{u}")),
        word().prop_map(|w| format!("根拠：{w}")),
        Just("根拠：".to_string()),
        prop_oneof![
            Just("ストラクチャー".to_string()),
            Just("オブジェクト".to_string()),
            Just(String::new()),
            word(),
        ]
        .prop_map(|kind| format!("オブジェクトタイプ：{kind}")),
        word().prop_map(|w| format!("タイプ：{w}")),
        word().prop_map(|w| format!("ストラクチャータイプ：{w}")),
        word().prop_map(|w| format!("知識：３：名前：{w}")),
        (word(), word()).prop_map(|(a, b)| format!("知識：３：名前:{a}：{b}")),
        (mark(), "[a-z]{1,6}", description()).prop_map(|(m, label, d)| {
            let m = if m.is_empty() { "――".to_string() } else { m };
            format!("{m}：１：{label}：{d}")
        }),
        ("[a-z]{1,4}", word()).prop_map(|(k, v)| format!("拡張{k}：{v}")),
    ];
    proptest::collection::vec(line, 0..8).prop_map(|lines| lines.join("\n"))
}

prop_compose! {
    fn record()(
        identity in proptest::option::of((mark(), number(), word())),
        owner in word(),
        rationale in proptest::option::of(rationale()),
        object_kind in object_kind(),
        type_name in proptest::option::of(word()),
        scale in proptest::option::of(number()),
        entries in proptest::collection::vec(entry(), 0..5),
        hp in proptest::option::of(word()),
        settings in proptest::option::of(word()),
        next_stage in proptest::option::of(word()),
        extensions in proptest::collection::vec(("[a-z]{1,4}", word()), 0..3),
        medals in proptest::collection::vec(medal(), 0..3),
    ) -> Record {
        let mut all_entries = Vec::new();
        if let Some((mark, number, name)) = identity {
            all_entries.push(Entry::new(mark, number, "名前", name));
        }
        all_entries.extend(entries);

        Record {
            owner,
            rationale,
            special: Some(String::new()),
            object_kind: Some(object_kind),
            type_name,
            scale,
            entries: all_entries,
            hp,
            settings,
            next_stage,
            medals,
            extensions: extensions
                .into_iter()
                .map(|(key, value)| (format!("拡張{key}"), Scalar::Text(value)))
                .collect(),
        }
    }
}

fn has_message(record: &Record, message: &str) -> bool {
    validate(record)
        .findings
        .iter()
        .any(|f| f.severity == Severity::Error && f.message == message)
}

fn single_entry(entry: Entry) -> Record {
    Record {
        owner: "テスト".to_string(),
        object_kind: Some(ObjectKind::Object),
        type_name: Some("キャラクター".to_string()),
        ..Default::default()
    }
    .with_entry(entry)
}

proptest! {
    #[test]
    fn numeral_codec_inverse(s in "[0-9]{0,24}") {
        prop_assert_eq!(to_narrow(&to_wide(&s)), s);
    }

    #[test]
    fn wide_digits_are_not_ascii(s in "[0-9]{1,24}") {
        prop_assert!(!to_wide(&s).chars().any(|c| c.is_ascii_digit()));
    }

    #[test]
    fn parse_render_is_idempotent(generated in record()) {
        let parsed = parse(&render(&generated));
        let reparsed = parse(&render(&parsed));
        prop_assert_eq!(&reparsed, &parsed);
        prop_assert_eq!(render(&reparsed), render(&parsed));
    }

    #[test]
    fn parsed_sheet_renders_back(text in sheet()) {
        let parsed = parse(&text);
        prop_assert_eq!(parse(&render(&parsed)), parsed);
    }

    #[test]
    fn rendered_record_parses_back(generated in record()) {
        prop_assert_eq!(parse(&render(&generated)), generated);
    }

    #[test]
    fn parse_never_panics(text in "[^\\r]{0,200}") {
        let _ = parse(&text);
    }

    #[test]
    fn range_law_integers(n in -100i64..100) {
        let record = single_entry(Entry::new("", Some(Numeral::Int(n)), "x", "y"));
        prop_assert_eq!(has_message(&record, RANGE_MESSAGE), !(0..=9).contains(&n));
    }

    #[test]
    fn range_law_floats(n in -20.0f64..20.0) {
        let record = single_entry(Entry::new("", Some(Numeral::Float(n)), "x", "y"));
        prop_assert_eq!(has_message(&record, RANGE_MESSAGE), !(0.0..=9.0).contains(&n));
    }

    #[test]
    fn mark_number_coupling_law(tag in mark(), slot in number()) {
        let expected = !tag.is_empty() && slot.is_none();
        let record = single_entry(Entry::new(tag, slot, "x", "y"));
        prop_assert_eq!(has_message(&record, COUPLING_MESSAGE), expected);
    }

    #[test]
    fn structure_duplicate_law(n in 0i64..=9, a in "[a-z]{1,6}", b in "[A-Z]{1,6}") {
        let mut record = Record {
            owner: "テスト".to_string(),
            object_kind: Some(ObjectKind::Structure),
            type_name: Some("種族".to_string()),
            ..Default::default()
        }
        .with_entry(Entry::new("", Some(Numeral::Int(n)), a.clone(), "x"))
        .with_entry(Entry::new("", Some(Numeral::Int(n)), b.clone(), "x"));

        let result = validate(&record);
        prop_assert!(!result.is_valid);
        let has_duplicate_error = result.findings.iter().any(|f| {
            f.severity == Severity::Error
                && f.message.contains("重複")
                && f.message.contains(&a)
                && f.message.contains(&b)
        });
        prop_assert!(has_duplicate_error);

        record.object_kind = Some(ObjectKind::Object);
        record.type_name = Some("キャラクター".to_string());
        prop_assert!(!validate(&record).findings.iter().any(|f| f.message.contains("重複")));
    }
}
