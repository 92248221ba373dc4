//! Record -> sheet text
//!
//! The structural inverse of the parser, in a fixed line order:
//!
//!     identity, owner, rationale, special, type, object kind, scale, entries, HP, settings,
//!     next stage, extra fields, medals
//!
//! The rationale and object kind lines only appear when the owner and type lines cannot carry
//! the value. Rendering a parsed record and parsing it again gives the same record back, and
//! rendering is stable on its own output.

use crate::idress::grammar::{
    COLON, DASH_PAIR, HP_KEY, MEDAL_PREFIX, NAME_LABEL, NEXT_STAGE_KEY, OBJECT_KIND_KEY,
    OWNER_KEY, RATIONALE_KEY, SCALE_KEY, SETTINGS_KEY, SPECIAL_KEY, STRUCTURE_TYPE_KEY, TYPE_KEY,
    WIDE_COLON,
};
use crate::idress::numerals::{render_numeral, to_wide};
use crate::idress::parsing::find_url;
use crate::idress::record::{Entry, Medal, ObjectKind, Record};

/// Renders a record as sheet text. Lines are joined with `\n`, without a trailing newline.
pub fn render(record: &Record) -> String {
    let mut lines = Vec::new();
    // The identity line only keeps the fourth field, so a name with colons stays in place
    let identity = record
        .identity_index()
        .filter(|&i| !has_colon(&record.entries[i].description));

    if let Some(entry) = identity.map(|i| &record.entries[i]) {
        lines.push(identity_line(entry));
    }

    let rationale = record.rationale.as_deref();
    let owner_url = rationale.filter(|r| find_url(r) == Some(*r));

    if !record.owner.is_empty() || owner_url.is_some() {
        let mut line = keyed(OWNER_KEY, &record.owner);
        if let Some(url) = owner_url {
            line.push(WIDE_COLON);
            line.push_str(url);
        }
        lines.push(line);
    }

    // Only a bare URL can be read back from the owner line
    if let Some(rationale) = rationale.filter(|_| owner_url.is_none()) {
        lines.push(keyed(RATIONALE_KEY, rationale));
    }

    if let Some(special) = &record.special {
        lines.push(keyed(SPECIAL_KEY, special));
    }

    if let Some(type_name) = &record.type_name {
        let key = if record.is_structure() {
            STRUCTURE_TYPE_KEY
        } else {
            TYPE_KEY
        };
        lines.push(keyed(key, type_name));
    }

    let has_type = record.type_name.is_some();
    if let Some(kind) = record
        .object_kind
        .as_ref()
        .filter(|kind| !kind_follows_from_type(kind, has_type))
    {
        lines.push(keyed(OBJECT_KIND_KEY, kind.as_str()));
    }

    if let Some(scale) = &record.scale {
        lines.push(keyed(SCALE_KEY, &render_numeral(scale.as_ref())));
    }

    for (i, entry) in record.entries.iter().enumerate() {
        if Some(i) != identity {
            lines.push(entry_line(entry));
        }
    }

    for (key, value) in [
        (HP_KEY, &record.hp),
        (SETTINGS_KEY, &record.settings),
        (NEXT_STAGE_KEY, &record.next_stage),
    ] {
        if let Some(value) = value {
            lines.push(keyed(key, value));
        }
    }

    for (key, value) in &record.extensions {
        lines.push(keyed(key, &value.to_string()));
    }

    for (i, medal) in record.medals.iter().enumerate() {
        lines.push(medal_line(i + 1, medal));
    }

    lines.join("\n")
}

fn keyed(key: &str, value: &str) -> String {
    format!("{key}{WIDE_COLON}{value}")
}

fn has_colon(text: &str) -> bool {
    text.contains(&[COLON, WIDE_COLON][..])
}

/// Parsing starts every record as an object, and the structure type key marks a structure.
fn kind_follows_from_type(kind: &ObjectKind, has_type: bool) -> bool {
    match kind {
        ObjectKind::Object => true,
        ObjectKind::Structure => has_type,
        ObjectKind::Other(_) => false,
    }
}

fn identity_line(entry: &Entry) -> String {
    format!(
        "{mark}{WIDE_COLON}{number}{WIDE_COLON}{NAME_LABEL}{WIDE_COLON}{name}",
        mark = entry.mark,
        number = render_numeral(entry.number.as_ref()),
        name = entry.description,
    )
}

/// `mark：number：label：description`, with `――` for a missing mark.
///
/// A description containing a colon is introduced by a halfwidth colon instead, which the
/// parser treats as "description starts here".
fn entry_line(entry: &Entry) -> String {
    let mark = if entry.mark.is_empty() {
        DASH_PAIR
    } else {
        entry.mark.as_str()
    };
    let separator = if has_colon(&entry.description) {
        COLON
    } else {
        WIDE_COLON
    };
    format!(
        "{mark}{WIDE_COLON}{number}{WIDE_COLON}{label}{separator}{description}",
        number = render_numeral(entry.number.as_ref()),
        label = entry.label,
        description = entry.description,
    )
}

/// Ordinals come from list position; empty effect and rationale are left out.
fn medal_line(ordinal: usize, medal: &Medal) -> String {
    let mut line = format!(
        "{MEDAL_PREFIX}{}{WIDE_COLON}{}",
        to_wide(&ordinal.to_string()),
        medal.name
    );
    for part in [&medal.effect, &medal.rationale] {
        if !part.is_empty() {
            line.push(WIDE_COLON);
            line.push_str(part);
        }
    }
    line
}
