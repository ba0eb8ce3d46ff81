use alloc::borrow::Cow;
use alloc::string::String;
use alloc::vec::Vec;
use core::str::Chars;
use std::sync::LazyLock;

use crate::ParseError;
use crate::config::ReaderConfig;
use crate::format::scan::{self, Quote};
use crate::format::{TextFormat, TokenShape};
use crate::reader::TextReader;

/// JSON.
///
/// # Examples
///
/// ```
/// use tc_text::format::{Json, TextFormat};
///
/// assert_eq!(Json::unescape(r#""a\nb""#).unwrap(), "a\nb");
/// assert_eq!(Json::unescape(r#""\u00e9\ud83d\ude00""#).unwrap(), "é😀");
/// assert!(Json::unescape(r#""\q""#).is_err());
///
/// assert!(Json::is_null(" null "));
/// assert_eq!(Json::split_list("[1, [2, 3], \"a,b\"]").unwrap(), ["1", "[2, 3]", "\"a,b\""]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Json;

impl TextFormat for Json {
    const NAME: &'static str = "JSON";

    fn unescape(token: &str) -> Result<Cow<'_, str>, ParseError> {
        let token = token.trim();
        let Some(inner) = quoted(token) else {
            return Ok(Cow::Borrowed(token));
        };
        if !inner.contains('\\') {
            return Ok(Cow::Borrowed(inner));
        }
        match decode(inner) {
            Some(decoded) => Ok(Cow::Owned(decoded)),
            None => Err(ParseError::syntax(Self::NAME, token, "invalid escape sequence")),
        }
    }

    fn unescape_safe(token: &str) -> Cow<'_, str> {
        let token = token.trim();
        match quoted(token) {
            Some(inner) if inner.contains('\\') => match decode(inner) {
                Some(decoded) => Cow::Owned(decoded),
                None => Cow::Borrowed(inner),
            },
            Some(inner) => Cow::Borrowed(inner),
            None => Cow::Borrowed(token),
        }
    }

    fn is_null(token: &str) -> bool {
        let token = token.trim();
        token.is_empty() || token == "null"
    }

    fn split_list(token: &str) -> Result<Vec<&str>, ParseError> {
        let Some(body) = scan::enclosed(token, '[', ']') else {
            return Err(ParseError::syntax(Self::NAME, token, "expected `[...]`"));
        };
        let elements = scan::elements(Self::NAME, token, body, Quote::Backslash)?;
        if elements.iter().any(|element| element.is_empty()) {
            return Err(ParseError::syntax(Self::NAME, token, "empty element"));
        }
        Ok(elements)
    }

    fn split_map(token: &str) -> Result<Vec<(&str, &str)>, ParseError> {
        let Some(body) = scan::enclosed(token, '{', '}') else {
            return Err(ParseError::syntax(Self::NAME, token, "expected `{...}`"));
        };
        scan::entries(Self::NAME, token, body, Quote::Backslash)
    }

    fn classify(token: &str) -> TokenShape {
        scan::classify(token, true)
    }

    fn reader() -> &'static TextReader<Self> {
        static READER: LazyLock<TextReader<Json>> =
            LazyLock::new(|| TextReader::new(ReaderConfig::new()));
        &READER
    }
}

fn quoted(token: &str) -> Option<&str> {
    if token.len() >= 2 {
        token.strip_prefix('"')?.strip_suffix('"')
    } else {
        None
    }
}

// `None` on a malformed escape.
fn decode(inner: &str) -> Option<String> {
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let unescaped = match chars.next()? {
            '"' => '"',
            '\\' => '\\',
            '/' => '/',
            'b' => '\u{8}',
            'f' => '\u{c}',
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            'u' => {
                let high = hex4(&mut chars)?;
                if (0xD800..0xDC00).contains(&high) {
                    if chars.next()? != '\\' || chars.next()? != 'u' {
                        return None;
                    }
                    let low = hex4(&mut chars)?;
                    if !(0xDC00..0xE000).contains(&low) {
                        return None;
                    }
                    char::from_u32(0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00))?
                } else {
                    char::from_u32(high)?
                }
            }
            _ => return None,
        };
        out.push(unescaped);
    }

    Some(out)
}

fn hex4(chars: &mut Chars<'_>) -> Option<u32> {
    let mut value = 0;
    for _ in 0..4 {
        value = value * 16 + chars.next()?.to_digit(16)?;
    }
    Some(value)
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use crate::format::{Json, TextFormat, TokenShape};

    #[test]
    fn unescape_borrows_when_possible() {
        assert!(matches!(Json::unescape("\"plain\"").unwrap(), alloc::borrow::Cow::Borrowed("plain")));
        assert_eq!(Json::unescape("  42 ").unwrap(), "42");
        assert_eq!(Json::unescape(r#""tab\there""#).unwrap(), "tab\there");
    }

    #[test]
    fn lone_surrogate_is_malformed() {
        assert!(Json::unescape(r#""\ud83d""#).is_err());
        assert_eq!(Json::unescape_safe(r#""\ud83d""#), r"\ud83d");
    }

    #[test]
    fn split_map_keeps_raw_tokens() {
        let entries = Json::split_map(r#"{"a": 1, "b": {"c": [1,2]}}"#).unwrap();
        assert_eq!(entries, [("\"a\"", "1"), ("\"b\"", r#"{"c": [1,2]}"#)]);
        assert!(Json::split_map(r#"{"a" 1}"#).is_err());
        assert!(Json::split_map("[1]").is_err());
    }

    #[test]
    fn split_list_rejects_holes() {
        assert!(Json::split_list("[1,,2]").is_err());
        assert!(Json::split_list("[]").unwrap().is_empty());
        assert!(Json::split_list("1,2").is_err());
    }

    #[test]
    fn shapes() {
        assert_eq!(Json::classify("null"), TokenShape::Null);
        assert_eq!(Json::classify("-1.5e3"), TokenShape::Number);
        assert_eq!(Json::classify("-inf"), TokenShape::String);
        assert_eq!(Json::classify("false"), TokenShape::Bool);
        assert_eq!(Json::classify(" [1]"), TokenShape::List);
        assert_eq!(Json::classify("{}"), TokenShape::Map);
        assert_eq!(Json::classify("\"x\""), TokenShape::String);
    }
}
