use alloc::borrow::Cow;
use alloc::vec::Vec;
use std::sync::LazyLock;

use crate::ParseError;
use crate::config::ReaderConfig;
use crate::format::scan::{self, Quote};
use crate::format::{TextFormat, TokenShape};
use crate::reader::TextReader;

/// JSV: JSON with optional quotes.
///
/// Strings only need quoting when they contain a separator, and a quote
/// inside a quoted string is written twice. Lists may omit their brackets.
/// The empty token is null.
///
/// # Examples
///
/// ```
/// use tc_text::format::{Jsv, TextFormat};
///
/// assert_eq!(Jsv::unescape(r#""say ""hi"", then go""#).unwrap(), r#"say "hi", then go"#);
/// assert_eq!(Jsv::unescape("plain").unwrap(), "plain");
/// assert!(Jsv::is_null(""));
/// assert!(!Jsv::is_null("null"));
///
/// assert_eq!(Jsv::split_map("{id:1,name:Ann}").unwrap(), [("id", "1"), ("name", "Ann")]);
/// assert_eq!(Jsv::split_list("a,b,c").unwrap(), ["a", "b", "c"]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Jsv;

impl TextFormat for Jsv {
    const NAME: &'static str = "JSV";

    fn unescape(token: &str) -> Result<Cow<'_, str>, ParseError> {
        let token = token.trim();
        let Some(inner) = quoted(token) else {
            return Ok(Cow::Borrowed(token));
        };
        if !inner.contains('"') {
            return Ok(Cow::Borrowed(inner));
        }
        // Every quote inside must be doubled.
        if inner.split("\"\"").any(|part| part.contains('"')) {
            return Err(ParseError::syntax(Self::NAME, token, "undoubled quote"));
        }
        Ok(Cow::Owned(inner.replace("\"\"", "\"")))
    }

    fn unescape_safe(token: &str) -> Cow<'_, str> {
        let token = token.trim();
        match quoted(token) {
            Some(inner) if inner.contains('"') => Cow::Owned(inner.replace("\"\"", "\"")),
            Some(inner) => Cow::Borrowed(inner),
            None => Cow::Borrowed(token),
        }
    }

    fn is_null(token: &str) -> bool {
        token.trim().is_empty()
    }

    fn split_list(token: &str) -> Result<Vec<&str>, ParseError> {
        let body = scan::enclosed(token, '[', ']').unwrap_or(token);
        scan::elements(Self::NAME, token, body, Quote::Doubled)
    }

    fn split_map(token: &str) -> Result<Vec<(&str, &str)>, ParseError> {
        let Some(body) = scan::enclosed(token, '{', '}') else {
            return Err(ParseError::syntax(Self::NAME, token, "expected `{...}`"));
        };
        scan::entries(Self::NAME, token, body, Quote::Doubled)
    }

    fn classify(token: &str) -> TokenShape {
        scan::classify(token, false)
    }

    fn reader() -> &'static TextReader<Self> {
        static READER: LazyLock<TextReader<Jsv>> =
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
