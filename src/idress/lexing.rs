//! Line tokenizer
//!
//! A sheet line is a run of text separated by colons of either width. The tokenizer is
//! handled entirely by logos; [`LineShape`] turns the token stream into the colon-delimited
//! fields the parser dispatches on, and remembers where the first halfwidth colon sits.

use crate::idress::grammar::WIDE_COLON;
use logos::Logos;

/// Tokens of a single sheet line
#[derive(Logos, Debug, PartialEq, Eq, Clone, Copy)]
pub enum Token {
    #[token(":")]
    Colon,

    #[token("：")]
    WideColon,

    // Anything between separators
    #[regex(r"[^:：]+")]
    Text,
}

impl Token {
    pub fn is_separator(&self) -> bool {
        matches!(self, Token::Colon | Token::WideColon)
    }
}

/// Tokenize a line and collect tokens with their byte spans
pub fn tokenize_with_spans(source: &str) -> Vec<(Token, logos::Span)> {
    Token::lexer(source)
        .spanned()
        .filter_map(|(result, span)| result.ok().map(|token| (token, span)))
        .collect()
}

/// The colon-delimited view of one trimmed line.
///
/// Splitting on both colon widths is the same as normalizing halfwidth colons to fullwidth
/// and splitting on the fullwidth colon, without allocating a normalized copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineShape<'a> {
    /// The line as written (trimmed, not normalized).
    pub raw: &'a str,
    /// Fields between separators; always at least one (possibly empty) field.
    pub fields: Vec<&'a str>,
    /// Byte offset of the first halfwidth colon in `raw`.
    pub first_colon: Option<usize>,
}

impl<'a> LineShape<'a> {
    pub fn new(raw: &'a str) -> Self {
        let mut fields = Vec::new();
        let mut first_colon = None;
        let mut start = 0;

        for (token, span) in tokenize_with_spans(raw) {
            if !token.is_separator() {
                continue;
            }
            if token == Token::Colon && first_colon.is_none() {
                first_colon = Some(span.start);
            }
            fields.push(&raw[start..span.start]);
            start = span.end;
        }
        fields.push(&raw[start..]);

        Self {
            raw,
            fields,
            first_colon,
        }
    }

    /// The first field, which names the line.
    pub fn key(&self) -> &'a str {
        self.fields[0]
    }

    pub fn field(&self, index: usize) -> Option<&'a str> {
        self.fields.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Fields from `index` onwards, rejoined with the fullwidth colon.
    pub fn joined_from(&self, index: usize) -> String {
        let separator = WIDE_COLON.to_string();
        self.fields
            .get(index..)
            .unwrap_or_default()
            .join(separator.as_str())
    }

    /// Everything after the first halfwidth colon, trimmed.
    pub fn after_first_colon(&self) -> Option<&'a str> {
        self.first_colon
            .map(|i| self.raw[i + ':'.len_utf8()..].trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_mixed_separators() {
        let tokens: Vec<Token> = tokenize_with_spans("a：b:c")
            .into_iter()
            .map(|(t, _)| t)
            .collect();
        assert_eq!(
            tokens,
            vec![
                Token::Text,
                Token::WideColon,
                Token::Text,
                Token::Colon,
                Token::Text
            ]
        );
    }

    #[test]
    fn test_wide_colon_span_is_three_bytes() {
        let tokens = tokenize_with_spans("：");
        assert_eq!(tokens, vec![(Token::WideColon, 0..3)]);
    }

    #[test]
    fn test_shape_fields() {
        let shape = LineShape::new("知識：３：名前：Example");
        assert_eq!(shape.fields, vec!["知識", "３", "名前", "Example"]);
        assert_eq!(shape.first_colon, None);
        assert_eq!(shape.key(), "知識");
    }

    #[test]
    fn test_shape_empty_fields_are_kept() {
        let shape = LineShape::new("：―：名前：");
        assert_eq!(shape.fields, vec!["", "―", "名前", ""]);
    }

    #[test]
    fn test_shape_single_field() {
        let shape = LineShape::new("オーナー");
        assert_eq!(shape.len(), 1);
        assert_eq!(shape.field(1), None);
    }

    #[test]
    fn test_shape_first_halfwidth_colon() {
        let shape = LineShape::new("攻撃：３：剣術:斬る：突く");
        assert_eq!(shape.fields, vec!["攻撃", "３", "剣術", "斬る", "突く"]);
        assert_eq!(shape.after_first_colon(), Some("斬る：突く"));
    }

    #[test]
    fn test_joined_from() {
        let shape = LineShape::new("設定：時刻は12:00：場所は城");
        assert_eq!(shape.joined_from(1), "時刻は12：00：場所は城");
        assert_eq!(shape.joined_from(9), "");
    }
}
