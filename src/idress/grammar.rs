//! Keywords and glyphs of the sheet grammar
//!
//! The parser and the renderer must agree on every literal below, so they live in one place.

/// Halfwidth colon. Accepted as a separator and normalized to [`WIDE_COLON`].
pub const COLON: char = ':';

/// Fullwidth colon, the canonical separator.
pub const WIDE_COLON: char = '：';

/// Placeholder for "no number" in numeric slots.
pub const DASH: &str = "―";

/// Placeholder for "no mark" in the first field of an entry line.
pub const DASH_PAIR: &str = "――";

/// Label of the identity entry; its description is the record's display name.
pub const NAME_LABEL: &str = "名前";

pub const OWNER_KEY: &str = "オーナー";
pub const SPECIAL_KEY: &str = "特殊";
pub const TYPE_KEY: &str = "タイプ";
pub const STRUCTURE_TYPE_KEY: &str = "ストラクチャータイプ";
pub const SCALE_KEY: &str = "スケール";
pub const HP_KEY: &str = "HP";
pub const SETTINGS_KEY: &str = "設定";
pub const NEXT_STAGE_KEY: &str = "次のアイドレス";

/// Medal lines carry an ordinal suffix after this prefix (`適用勲章１`, `適用勲章２`, ...).
pub const MEDAL_PREFIX: &str = "適用勲章";

// Serialized keys that a fallback `key：value` line may also address.
pub const RATIONALE_KEY: &str = "根拠";
pub const OBJECT_KIND_KEY: &str = "オブジェクトタイプ";
pub const ENTRIES_KEY: &str = "データ";

/// Serialized names of the two object kinds.
pub const OBJECT_KIND_OBJECT: &str = "オブジェクト";
pub const OBJECT_KIND_STRUCTURE: &str = "ストラクチャー";

/// Whether a numeric slot holds the "no value" marker (empty or dash).
pub fn is_empty_slot(field: &str) -> bool {
    field.is_empty() || field == DASH
}
