//! Text formats.
//!
//! A [`TextFormat`] is a zero-sized marker whose associated functions
//! tokenize and de-escape text. Both built-in formats share one bracket and
//! quote aware scanner and differ only in quoting rules and null tokens.
//!
//! - [`Json`]: quoted strings with backslash escapes, `null`.
//! - [`Jsv`]: bare strings allowed, `""` escapes a quote inside a quoted
//!   string, the empty token is null.

// -----------------------------------------------------------------------------
// Modules

mod json;
mod jsv;
mod scan;

// -----------------------------------------------------------------------------
// Exports

pub use json::Json;
pub use jsv::Jsv;

use alloc::borrow::Cow;
use alloc::vec::Vec;

use crate::ParseError;
use crate::reader::TextReader;

// -----------------------------------------------------------------------------
// TokenShape

/// The coarse shape of a token, judged from its first characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenShape {
    Null,
    Bool,
    Number,
    String,
    List,
    Map,
}

// -----------------------------------------------------------------------------
// TextFormat

/// A textual format: tokenizing and de-escaping rules.
///
/// Tokens passed to these functions may carry surrounding whitespace.
pub trait TextFormat: Send + Sync + Sized + 'static {
    /// Display name used in error messages.
    const NAME: &'static str;

    /// De-escapes a scalar token, failing on malformed escapes.
    fn unescape(token: &str) -> Result<Cow<'_, str>, ParseError>;

    /// De-escapes a scalar token, leaving malformed escapes as they are.
    fn unescape_safe(token: &str) -> Cow<'_, str>;

    /// Returns `true` if the token denotes an absent value.
    fn is_null(token: &str) -> bool;

    /// Splits a list token into its raw element tokens.
    fn split_list(token: &str) -> Result<Vec<&str>, ParseError>;

    /// Splits a map token into its raw key and value tokens.
    fn split_map(token: &str) -> Result<Vec<(&str, &str)>, ParseError>;

    /// Judges the shape of a token without parsing it.
    fn classify(token: &str) -> TokenShape;

    /// Returns the program-wide reader with the default configuration.
    fn reader() -> &'static TextReader<Self>;
}
