//! Closed vocabularies
//!
//! Allowed types per object kind, and the marks each type may carry. Object types and structure
//! types never share a name, so a mark lookup only needs the type.

use crate::idress::record::ObjectKind;
use once_cell::sync::Lazy;
use std::collections::HashMap;

type MarkTable = HashMap<&'static str, &'static [&'static str]>;

pub const OBJECT_TYPES: &[&str] = &["キャラクター", "建築物", "メカ", "組織", "国"];

pub const STRUCTURE_TYPES: &[&str] = &[
    "種族",
    "職業",
    "種別",
    "用途",
    "仕様",
    "主要産業",
    "保有組織",
    "付属施設",
    "備品",
    "装備／アイテム",
];

const CHARACTER_MARKS: &[&str] = &[
    "攻撃", "防御", "移動", "索敵", "調査", "事務", "作業", "知識", "交渉", "土木", "情報", "先手",
    "政治", "生産",
];
const BUILDING_MARKS: &[&str] = &[
    "攻撃", "防御", "索敵", "事務", "作業", "土木", "情報", "政治", "生産",
];
const MECHA_MARKS: &[&str] = &["攻撃", "防御", "移動", "索敵", "作業", "土木", "情報", "先手"];
const ORGANIZATION_MARKS: &[&str] = &[
    "攻撃", "防御", "移動", "索敵", "調査", "事務", "作業", "知識", "交渉", "土木", "情報", "生産",
];
const NATION_MARKS: &[&str] = &["調査", "事務", "作業", "土木", "情報", "先手", "政治", "生産"];
const CATEGORY_MARKS: &[&str] = &[
    "攻撃", "防御", "索敵", "事務", "作業", "土木", "情報", "政治", "生産", "移動", "先手", "調査",
    "知識", "交渉",
];
const PURPOSE_MARKS: &[&str] = &[
    "攻撃", "防御", "移動", "索敵", "調査", "事務", "作業", "知識", "交渉", "土木", "情報", "政治",
    "生産",
];
const EQUIPMENT_MARKS: &[&str] = &[
    "攻撃", "防御", "移動", "索敵", "調査", "事務", "作業", "知識", "土木", "情報",
];

static OBJECT_MARKS: Lazy<MarkTable> = Lazy::new(|| {
    HashMap::from([
        ("キャラクター", CHARACTER_MARKS),
        ("建築物", BUILDING_MARKS),
        ("メカ", MECHA_MARKS),
        ("組織", ORGANIZATION_MARKS),
        ("国", NATION_MARKS),
    ])
});

static STRUCTURE_MARKS: Lazy<MarkTable> = Lazy::new(|| {
    HashMap::from([
        ("種族", CHARACTER_MARKS),
        ("職業", CHARACTER_MARKS),
        ("種別", CATEGORY_MARKS),
        ("用途", PURPOSE_MARKS),
        ("仕様", MECHA_MARKS),
        ("主要産業", NATION_MARKS),
        ("保有組織", ORGANIZATION_MARKS),
        ("付属施設", BUILDING_MARKS),
        ("備品", BUILDING_MARKS),
        ("装備／アイテム", EQUIPMENT_MARKS),
    ])
});

/// Types allowed for a recognized object kind.
pub fn allowed_types(kind: &ObjectKind) -> Option<&'static [&'static str]> {
    match kind {
        ObjectKind::Object => Some(OBJECT_TYPES),
        ObjectKind::Structure => Some(STRUCTURE_TYPES),
        ObjectKind::Other(_) => None,
    }
}

/// Marks a type may carry, or `None` for a type outside both vocabularies.
pub fn allowed_marks(type_name: &str) -> Option<&'static [&'static str]> {
    OBJECT_MARKS
        .get(type_name)
        .or_else(|| STRUCTURE_MARKS.get(type_name))
        .copied()
}
