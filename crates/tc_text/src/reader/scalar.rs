use alloc::boxed::Box;
use alloc::string::String;

use tc_reflect::info::{EnumInfo, OptionInfo, Primitive, TypeInfo, VariantInfo};
use tc_reflect::registry::{TypeTraitFromStr, TypeTraitFromString, TypeTraitParseWith};

use super::{ParseFn, parse_fn};
use crate::config::ScalarFn;
use crate::format::TextFormat;
use crate::primitive::parse_primitive;
use crate::{DynamicValue, ParseError};

pub(super) fn custom<F: TextFormat>(custom: ScalarFn) -> ParseFn<F> {
    parse_fn(move |_, token| custom(token))
}

pub(super) fn optional<F: TextFormat>(
    info: &'static TypeInfo,
    option: &'static OptionInfo,
) -> ParseFn<F> {
    parse_fn(move |scope, token| {
        if F::is_null(token) {
            return Ok(option.none());
        }
        let inner = scope.parser_of(option.inner().info()).parse(token)?;
        option
            .some(inner)
            .map_err(|err| ParseError::build(info, token, err))
    })
}

pub(super) fn enumeration<F: TextFormat>(
    info: &'static TypeInfo,
    variants: &'static EnumInfo,
) -> ParseFn<F> {
    parse_fn(move |_, token| {
        let text = F::unescape_safe(token);
        let text = text.trim();
        variants
            .variant_ignore_case(text)
            .or_else(|| {
                let discriminant = text.parse::<i64>().ok()?;
                variants.variant_of(discriminant)
            })
            .map(VariantInfo::make)
            .ok_or_else(|| ParseError::Enum {
                type_name: info.name().into(),
                token: text.into(),
            })
    })
}

/// Reads the unescaped text. A null token is not a string.
pub(super) fn string<F: TextFormat>(info: &'static TypeInfo) -> ParseFn<F> {
    parse_fn(move |_, token| Ok(Box::new(unescape_text::<F>(info, token)?)))
}

pub(super) fn dynamic<F: TextFormat>() -> ParseFn<F> {
    parse_fn(|scope, token| {
        let value = DynamicValue::parse_within::<F>(token, scope.remaining_depth())?;
        Ok(Box::new(value))
    })
}

pub(super) fn special<F: TextFormat>(special: ScalarFn) -> ParseFn<F> {
    parse_fn(move |_, token| special(&*F::unescape_safe(token)))
}

pub(super) fn primitive<F: TextFormat>(primitive: Primitive) -> ParseFn<F> {
    parse_fn(move |_, token| parse_primitive(primitive, &F::unescape_safe(token)))
}

pub(super) fn from_str<F: TextFormat>(
    info: &'static TypeInfo,
    factory: TypeTraitFromStr,
) -> ParseFn<F> {
    parse_fn(move |_, token| {
        let text = F::unescape_safe(token);
        factory
            .parse(&text)
            .map_err(|err| ParseError::primitive(info.name(), &text, Some(err)))
    })
}

pub(super) fn parse_with<F: TextFormat>(
    info: &'static TypeInfo,
    factory: TypeTraitParseWith,
) -> ParseFn<F> {
    parse_fn(move |_, token| {
        factory
            .parse(token, F::unescape_safe)
            .map_err(|err| ParseError::primitive(info.name(), token.trim(), Some(err)))
    })
}

pub(super) fn from_string<F: TextFormat>(
    info: &'static TypeInfo,
    factory: TypeTraitFromString,
) -> ParseFn<F> {
    parse_fn(move |_, token| Ok(factory.make(unescape_text::<F>(info, token)?)))
}

/// Unescapes a string token, rejecting null.
pub(crate) fn unescape_text<F: TextFormat>(
    info: &TypeInfo,
    token: &str,
) -> Result<String, ParseError> {
    if F::is_null(token) {
        return Err(ParseError::mismatch(info, token, "null is not a string"));
    }
    Ok(F::unescape(token)?.into_owned())
}
