//! Bracket and quote aware splitting shared by the formats.

use alloc::vec::Vec;

use crate::ParseError;
use crate::format::TokenShape;

/// How a quote character is escaped inside a quoted string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Quote {
    /// `\"`, and a backslash escapes any following byte.
    Backslash,
    /// `""`.
    Doubled,
}

/// Splits `body` at top-level `sep` bytes, at most `max` times.
///
/// Separators inside quotes or brackets are ignored. Parts are trimmed.
pub(super) fn split_top(
    body: &str,
    sep: u8,
    quote: Quote,
    max: usize,
) -> Result<Vec<&str>, &'static str> {
    let bytes = body.as_bytes();
    let mut parts = Vec::new();
    let mut splits = 0;
    let mut depth = 0_usize;
    let mut in_quotes = false;
    let mut start = 0;
    let mut index = 0;

    while index < bytes.len() {
        let byte = bytes[index];
        if in_quotes {
            match byte {
                b'\\' if quote == Quote::Backslash => index += 1,
                b'"' => in_quotes = false,
                _ => {}
            }
        } else {
            match byte {
                b'"' => in_quotes = true,
                b'[' | b'{' => depth += 1,
                b']' | b'}' => depth = depth.checked_sub(1).ok_or("unbalanced brackets")?,
                _ if byte == sep && depth == 0 && splits < max => {
                    parts.push(body[start..index].trim());
                    start = index + 1;
                    splits += 1;
                }
                _ => {}
            }
        }
        index += 1;
    }

    if in_quotes {
        return Err("unterminated string");
    }
    if depth != 0 {
        return Err("unbalanced brackets");
    }
    parts.push(body[start..].trim());
    Ok(parts)
}

/// Returns the text between `open` and `close` if the token is enclosed.
pub(super) fn enclosed(token: &str, open: char, close: char) -> Option<&str> {
    token.trim().strip_prefix(open)?.strip_suffix(close)
}

/// Splits a list body into raw element tokens. An empty body has no
/// elements.
pub(super) fn elements<'a>(
    format: &'static str,
    token: &str,
    body: &'a str,
    quote: Quote,
) -> Result<Vec<&'a str>, ParseError> {
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }
    split_top(body, b',', quote, usize::MAX).map_err(|reason| ParseError::syntax(format, token, reason))
}

/// Splits a map body into raw key and value tokens.
pub(super) fn entries<'a>(
    format: &'static str,
    token: &str,
    body: &'a str,
    quote: Quote,
) -> Result<Vec<(&'a str, &'a str)>, ParseError> {
    let mut entries = Vec::new();
    for entry in elements(format, token, body, quote)? {
        let parts = split_top(entry, b':', quote, 1)
            .map_err(|reason| ParseError::syntax(format, entry, reason))?;
        match parts.as_slice() {
            [key, value] if !key.is_empty() => entries.push((*key, *value)),
            _ => return Err(ParseError::syntax(format, entry, "expected `key:value`")),
        }
    }
    Ok(entries)
}

/// Judges a token's shape. `null_literal` enables the bare `null` word.
pub(super) fn classify(token: &str, null_literal: bool) -> TokenShape {
    let token = token.trim();
    match token.as_bytes().first() {
        None => TokenShape::Null,
        Some(b'[') => TokenShape::List,
        Some(b'{') => TokenShape::Map,
        Some(b'"') => TokenShape::String,
        Some(b'-' | b'0'..=b'9') if is_number(token) => TokenShape::Number,
        _ if token == "true" || token == "false" => TokenShape::Bool,
        _ if null_literal && token == "null" => TokenShape::Null,
        _ => TokenShape::String,
    }
}

fn is_number(token: &str) -> bool {
    token
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'-' | b'+' | b'.' | b'e' | b'E'))
        && token.parse::<f64>().is_ok()
}

// -----------------------------------------------------------------------------
// Tests
