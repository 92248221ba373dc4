//! Halfwidth / fullwidth digit codec
//!
//! Sheets write numbers with fullwidth digits (`０`..`９`, U+FF10..U+FF19). The structured
//! record never stores digits as text: numbers cross the text boundary through this module.

use crate::idress::grammar::{is_empty_slot, DASH};
use crate::idress::record::Numeral;

/// Code point distance between an ASCII digit and its fullwidth form.
const WIDE_OFFSET: u32 = 0xFEE0;

/// Maps every ASCII digit to its fullwidth counterpart. Other characters are untouched.
pub fn to_wide(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '0'..='9' => shift(c, WIDE_OFFSET as i64),
            _ => c,
        })
        .collect()
}

/// Maps every fullwidth digit back to ASCII. Other characters are untouched.
pub fn to_narrow(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '０'..='９' => shift(c, -(WIDE_OFFSET as i64)),
            _ => c,
        })
        .collect()
}

fn shift(c: char, offset: i64) -> char {
    char::from_u32((c as i64 + offset) as u32).unwrap_or(c)
}

/// Reads a numeric slot from a sheet line.
///
/// Empty and dash slots are `None`. Anything that does not read as a number after narrowing is
/// kept verbatim as [`Numeral::Text`] so validation can report it.
pub fn parse_numeral(field: &str) -> Option<Numeral> {
    let field = field.trim();
    if is_empty_slot(field) {
        return None;
    }

    let narrow = to_narrow(field);
    if let Ok(n) = narrow.parse::<i64>() {
        return Some(Numeral::from(n));
    }
    match narrow.parse::<f64>() {
        Ok(f) if f.is_finite() => Some(Numeral::from_f64(f)),
        _ => Some(Numeral::Text(field.to_string())),
    }
}

/// Writes a numeric slot for a sheet line: fullwidth digits, or the dash for `None`.
pub fn render_numeral(value: Option<&Numeral>) -> String {
    match value {
        Some(n) => to_wide(&n.to_string()),
        None => DASH.to_string(),
    }
}
