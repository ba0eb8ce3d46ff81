//! Platform-provided parsers, consulted after the generic container shapes.

use alloc::boxed::Box;
use core::time::Duration;
use std::ffi::OsString;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use tc_reflect::AnyValue;
use tc_reflect::info::TypeInfo;

use crate::ParseError;
use crate::format::TextFormat;
use crate::reader::{ParseFn, Scope, parse_fn, unescape_text};

/// A source of parsers for types the platform knows how to read.
///
/// Asked once per type during resolution; returning `None` moves on to the
/// next strategy.
///
/// # Examples
///
/// ```
/// use tc_reflect::info::TypeInfo;
/// use tc_text::format::TextFormat;
/// use tc_text::platform::PlatformParsers;
/// use tc_text::reader::ParseFn;
///
/// struct Nothing;
///
/// impl<F: TextFormat> PlatformParsers<F> for Nothing {
///     fn parser_for(&self, _: &'static TypeInfo) -> Option<ParseFn<F>> {
///         None
///     }
/// }
/// ```
pub trait PlatformParsers<F: TextFormat>: Send + Sync + 'static {
    fn parser_for(&self, info: &'static TypeInfo) -> Option<ParseFn<F>>;
}

impl<F: TextFormat> PlatformParsers<F> for () {
    #[inline]
    fn parser_for(&self, _: &'static TypeInfo) -> Option<ParseFn<F>> {
        None
    }
}

// -----------------------------------------------------------------------------
// StdPlatform

/// Parsers for the operating system types of `std`.
///
/// - `PathBuf` and `OsString` from the unescaped text; null is rejected.
/// - `SystemTime` from seconds relative to the Unix epoch, fractional and
///   negative values allowed, or the `/Date(millis)/` notation.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdPlatform;

impl<F: TextFormat> PlatformParsers<F> for StdPlatform {
    fn parser_for(&self, info: &'static TypeInfo) -> Option<ParseFn<F>> {
        let ty = info.ty();
        if ty.is::<PathBuf>() {
            Some(parse_fn(move |_, token| {
                Ok(Box::new(PathBuf::from(unescape_text::<F>(info, token)?)) as AnyValue)
            }))
        } else if ty.is::<OsString>() {
            Some(parse_fn(move |_, token| {
                Ok(Box::new(OsString::from(unescape_text::<F>(info, token)?)) as AnyValue)
            }))
        } else if ty.is::<SystemTime>() {
            Some(parse_fn(system_time::<F>))
        } else {
            None
        }
    }
}

fn system_time<F: TextFormat>(_: &Scope<'_, F>, token: &str) -> Result<AnyValue, ParseError> {
    let text = F::unescape_safe(token);
    let text = text.trim();
    let secs = match text.strip_prefix("/Date(").and_then(|rest| rest.strip_suffix(")/")) {
        Some(millis) => epoch_millis(millis).map(|millis| millis as f64 / 1000.0),
        None => text.parse::<f64>().ok().filter(|secs| secs.is_finite()),
    };

    let time = secs.and_then(|secs| {
        if secs < 0.0 {
            UNIX_EPOCH.checked_sub(Duration::try_from_secs_f64(-secs).ok()?)
        } else {
            UNIX_EPOCH.checked_add(Duration::try_from_secs_f64(secs).ok()?)
        }
    });
    match time {
        Some(time) => Ok(Box::new(time)),
        None => Err(ParseError::primitive("SystemTime", text, None)),
    }
}

// `1234567890000` or `1234567890000+0100`; the offset is informational.
fn epoch_millis(text: &str) -> Option<i64> {
    let end = text
        .char_indices()
        .skip(1)
        .find_map(|(index, c)| matches!(c, '+' | '-').then_some(index))
        .unwrap_or(text.len());
    text[..end].parse().ok()
}

// -----------------------------------------------------------------------------
// Tests
