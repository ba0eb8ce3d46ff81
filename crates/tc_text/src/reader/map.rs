use alloc::vec::Vec;

use tc_reflect::AnyValue;
use tc_reflect::info::{MapInfo, PairInfo, TypeInfo};

use super::{ErasedParser, ParseFn, Scope, parse_fn};
use crate::format::{TextFormat, TokenShape};
use crate::{ParseError, Position};

pub(super) fn map<F: TextFormat>(info: &'static TypeInfo, map: &'static MapInfo) -> ParseFn<F> {
    parse_fn(move |scope, token| {
        let entries = entries(scope, info, token, map)?;
        map.build(entries)
            .map_err(|err| ParseError::build(info, token, err))
    })
}

fn entries<F: TextFormat>(
    scope: &Scope<'_, F>,
    info: &TypeInfo,
    token: &str,
    map: &MapInfo,
) -> Result<Vec<(AnyValue, AnyValue)>, ParseError> {
    if F::is_null(token) {
        return Err(ParseError::mismatch(info, token, "null is not a map"));
    }
    let keys = scope.parser_of(map.key().info());
    let values = scope.parser_of(map.value().info());
    F::split_map(token)?
        .into_iter()
        .map(|(key, value)| entry(&keys, &values, key, value))
        .collect()
}

fn entry<F: TextFormat>(
    keys: &ErasedParser<'_, F>,
    values: &ErasedParser<'_, F>,
    key: &str,
    value: &str,
) -> Result<(AnyValue, AnyValue), ParseError> {
    let key_name = || F::unescape_safe(key).into_owned();
    let parsed_key = keys
        .parse(key)
        .map_err(|err| err.at(Position::Key(key_name())))?;
    let parsed_value = values
        .parse(value)
        .map_err(|err| err.at(Position::Value(key_name())))?;
    Ok((parsed_key, parsed_value))
}

/// Reads `{"Key":k,"Value":v}`, in either member order, a map with a single
/// entry `{k:v}` or a two-element list `[k,v]`.
///
/// A single entry named `Key` or `Value` is a member-form pair missing its
/// other half, not a one-entry map.
pub(super) fn pair<F: TextFormat>(info: &'static TypeInfo, pair: &'static PairInfo) -> ParseFn<F> {
    parse_fn(move |scope, token| {
        let (key, value) = match F::classify(token) {
            TokenShape::Null => {
                return Err(ParseError::mismatch(info, token, "null is not a pair"));
            }
            TokenShape::List => match *F::split_list(token)?.as_slice() {
                [key, value] => (key, value),
                _ => return Err(ParseError::mismatch(info, token, "expected two elements")),
            },
            _ => key_value::<F>(info, token)?,
        };

        let keys = scope.parser_of(pair.key().info());
        let values = scope.parser_of(pair.value().info());
        let (key, value) = entry(&keys, &values, key, value)?;
        pair.build(key, value)
            .map_err(|err| ParseError::build(info, token, err))
    })
}

fn key_value<'a, F: TextFormat>(
    info: &TypeInfo,
    token: &'a str,
) -> Result<(&'a str, &'a str), ParseError> {
    let is = |name: &str, expected: &str| F::unescape_safe(name).eq_ignore_ascii_case(expected);

    match *F::split_map(token)?.as_slice() {
        [(k1, key), (k2, value)] if is(k1, "Key") && is(k2, "Value") => Ok((key, value)),
        [(k1, value), (k2, key)] if is(k1, "Value") && is(k2, "Key") => Ok((key, value)),
        [(name, _)] if is(name, "Key") => {
            Err(ParseError::mismatch(info, token, "missing member `Value`"))
        }
        [(name, _)] if is(name, "Value") => {
            Err(ParseError::mismatch(info, token, "missing member `Key`"))
        }
        [(key, value)] => Ok((key, value)),
        _ => Err(ParseError::mismatch(info, token, "expected a single key and value")),
    }
}
