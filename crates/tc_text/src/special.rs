//! Dedicated parsers for scalar types without a fast-path literal form.

use alloc::boxed::Box;
use core::error::Error;
use core::str::FromStr;
use core::time::Duration;

use tc_reflect::info::Typed;

use crate::ParseError;

const SECS_PER_MINUTE: u64 = 60;
const SECS_PER_HOUR: u64 = 3_600;
const SECS_PER_DAY: u64 = 86_400;
const SECS_PER_WEEK: u64 = 604_800;

// -----------------------------------------------------------------------------
// Duration

/// Parses a [`Duration`].
///
/// Three notations are accepted:
///
/// - XSD duration: `P1DT2H30M`, `PT0.25S`, `P2W`. Years and months have no
///   fixed length and are rejected.
/// - Clock time with optional days and fraction: `01:30:00`,
///   `2.04:00:00.125`.
/// - Plain seconds: `90`, `1.5`.
///
/// Negative durations are rejected.
///
/// # Examples
///
/// ```
/// use core::time::Duration;
/// use tc_text::parse_duration;
///
/// assert_eq!(parse_duration("PT1M30S").unwrap(), Duration::from_secs(90));
/// assert_eq!(parse_duration("1.00:00:01.5").unwrap(), Duration::from_millis(86_401_500));
/// assert_eq!(parse_duration("0.25").unwrap(), Duration::from_millis(250));
/// assert!(parse_duration("P1Y").is_err());
/// ```
pub fn parse_duration(text: &str) -> Result<Duration, ParseError> {
    let text = text.trim();
    let parsed = if let Some(rest) = text.strip_prefix('P') {
        xsd(rest)
    } else if text.contains(':') {
        clock(text)
    } else {
        text.parse::<f64>()
            .ok()
            .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
    };
    parsed.ok_or_else(|| ParseError::primitive("Duration", text, None))
}

fn xsd(rest: &str) -> Option<Duration> {
    let (date, time) = match rest.split_once('T') {
        Some((date, time)) if !time.is_empty() => (date, time),
        Some(_) => return None,
        None if !rest.is_empty() => (rest, ""),
        None => return None,
    };

    let mut secs = designated(date, &[('W', SECS_PER_WEEK), ('D', SECS_PER_DAY)])?;
    secs += designated(time, &[('H', SECS_PER_HOUR), ('M', SECS_PER_MINUTE), ('S', 1)])?;
    Duration::try_from_secs_f64(secs).ok()
}

// Designators must follow `units` order, each at most once.
fn designated(mut text: &str, units: &[(char, u64)]) -> Option<f64> {
    let mut total = 0.0;
    let mut units = units.iter();
    while !text.is_empty() {
        let end = text.find(|c: char| c.is_ascii_alphabetic())?;
        let number = &text[..end];
        let designator = text[end..].chars().next()?;
        let (_, scale) = units.by_ref().find(|(unit, _)| *unit == designator)?;
        if number.is_empty() || !number.bytes().all(|b| b.is_ascii_digit() || b == b'.') {
            return None;
        }
        total += number.parse::<f64>().ok()? * *scale as f64;
        text = &text[end + 1..];
    }
    Some(total)
}

fn clock(text: &str) -> Option<Duration> {
    let mut parts = text.split(':');
    let (hours, minutes, seconds) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }

    let (days, hours) = hours.split_once('.').unwrap_or(("0", hours));
    let (seconds, fraction) = seconds.split_once('.').unwrap_or((seconds, ""));
    let (days, hours, minutes, seconds) =
        (digits(days)?, digits(hours)?, digits(minutes)?, digits(seconds)?);
    if hours >= 24 || minutes >= 60 || seconds >= 60 {
        return None;
    }

    let secs = days
        .checked_mul(SECS_PER_DAY)?
        .checked_add(hours * SECS_PER_HOUR + minutes * SECS_PER_MINUTE + seconds)?;
    Some(Duration::new(secs, nanos(fraction)?))
}

fn digits(text: &str) -> Option<u64> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

// Digits past nanosecond precision are dropped.
fn nanos(fraction: &str) -> Option<u32> {
    let mut nanos = 0;
    let mut scale = 100_000_000;
    for byte in fraction.bytes() {
        if !byte.is_ascii_digit() {
            return None;
        }
        nanos += u32::from(byte - b'0') * scale;
        scale /= 10;
    }
    Some(nanos)
}

// -----------------------------------------------------------------------------
// FromStr

/// Parses any [`FromStr`] scalar, reporting failures under the type's name.
///
/// Serves addresses and `NonZero` integers.
pub(crate) fn from_str_literal<T>(text: &str) -> Result<T, ParseError>
where
    T: Typed + FromStr,
    T::Err: Error + Send + Sync + 'static,
{
    let text = text.trim();
    text.parse::<T>()
        .map_err(|err| ParseError::primitive(T::type_info().name(), text, Some(Box::new(err))))
}

// -----------------------------------------------------------------------------
// Tests
