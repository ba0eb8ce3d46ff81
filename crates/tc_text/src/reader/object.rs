use alloc::format;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use tc_reflect::AnyValue;
use tc_reflect::info::{CtorInfo, StructInfo, TypeInfo, TypeKind, TypeParamInfo};
use tc_reflect::registry::TypeTraitSubtypes;

use super::{ParseFn, Scope, parse_fn};
use crate::format::{TextFormat, TokenShape};
use crate::{ParseError, Position};

/// Name of the member carrying the concrete type of an abstract value.
pub const TYPE_KEY: &str = "__type";

// -----------------------------------------------------------------------------
// Constructor

/// Builds a generic type from its generic arguments: a list gives them by
/// position, an object by parameter name. Absent optional arguments are
/// `None`.
pub(super) fn constructor<F: TextFormat>(
    info: &'static TypeInfo,
    ctor: &'static CtorInfo,
) -> ParseFn<F> {
    parse_fn(move |scope, token| {
        let args = match F::classify(token) {
            TokenShape::List => positional(scope, info, token)?,
            TokenShape::Map => named(scope, info, token)?,
            _ => return Err(ParseError::mismatch(info, token, "expected a list or an object")),
        };
        ctor.build(args)
            .map_err(|err| ParseError::build(info, token, err))
    })
}

fn positional<F: TextFormat>(
    scope: &Scope<'_, F>,
    info: &TypeInfo,
    token: &str,
) -> Result<Vec<AnyValue>, ParseError> {
    let params = info.generics();
    let elements = F::split_list(token)?;
    if elements.len() != params.len() {
        let reason = format!("expected {} elements, found {}", params.len(), elements.len());
        return Err(ParseError::mismatch(info, token, reason));
    }
    params
        .iter()
        .zip(elements)
        .enumerate()
        .map(|(index, (param, element))| {
            scope
                .parser_of(param.ty().info())
                .parse(element)
                .map_err(|err| err.at(Position::Index(index)))
        })
        .collect()
}

fn named<F: TextFormat>(
    scope: &Scope<'_, F>,
    info: &TypeInfo,
    token: &str,
) -> Result<Vec<AnyValue>, ParseError> {
    let params = info.generics();
    let mut slots: Vec<Option<&str>> = vec![None; params.len()];

    for (key, value) in F::split_map(token)? {
        let name = F::unescape_safe(key);
        match params.iter().position(|param| param.name() == name) {
            Some(index) => slots[index] = Some(value),
            None if scope.config().is_strict_members() => {
                let reason = format!("unknown member `{name}`");
                return Err(ParseError::mismatch(info, token, reason));
            }
            None => {}
        }
    }

    params
        .iter()
        .zip(slots)
        .map(|(param, slot)| argument(scope, info, token, param, slot))
        .collect()
}

fn argument<F: TextFormat>(
    scope: &Scope<'_, F>,
    info: &TypeInfo,
    token: &str,
    param: &TypeParamInfo,
    slot: Option<&str>,
) -> Result<AnyValue, ParseError> {
    let param_info = param.ty().info();
    match slot {
        Some(value) => scope
            .parser_of(param_info)
            .parse(value)
            .map_err(|err| err.at(Position::Member(param.name().into()))),
        None => match param_info.kind() {
            TypeKind::Optional(option) => Ok(option.none()),
            _ => {
                let reason = format!("missing member `{}`", param.name());
                Err(ParseError::mismatch(info, token, reason))
            }
        },
    }
}

// -----------------------------------------------------------------------------
// Structural

/// Populates a default-constructed struct member by member.
///
/// Member names match exactly, then ignoring ASCII case. [`TYPE_KEY`] is
/// skipped, and so are unknown members unless the reader is configured with
/// strict members. Absent members keep their default.
pub(super) fn structural<F: TextFormat>(
    info: &'static TypeInfo,
    structure: &'static StructInfo,
) -> ParseFn<F> {
    parse_fn(move |scope, token| {
        if F::classify(token) != TokenShape::Map {
            return Err(ParseError::mismatch(info, token, "expected an object"));
        }
        let entries = F::split_map(token)?;
        let Some(mut target) = structure.construct() else {
            return Err(ParseError::mismatch(info, token, "type has no constructor"));
        };

        for (key, value) in entries {
            let name = F::unescape_safe(key);
            if name == TYPE_KEY {
                continue;
            }
            let Some(field) = structure.field_ignore_case(&name) else {
                if scope.config().is_strict_members() {
                    let reason = format!("unknown member `{name}`");
                    return Err(ParseError::mismatch(info, token, reason));
                }
                continue;
            };

            let parsed = scope
                .parser_of(field.ty().info())
                .parse(value)
                .map_err(|err| err.at(Position::Member(field.name().into())))?;
            field
                .set(&mut *target, parsed)
                .map_err(|err| ParseError::build(info, token, err))?;
        }

        Ok(target)
    })
}

// -----------------------------------------------------------------------------
// Fallback

/// Dispatches an object token on its [`TYPE_KEY`] member to a registered
/// subtype. Every other token fails.
///
/// The subtypes are those registered when the type was resolved.
pub(super) fn fallback<F: TextFormat>(
    info: &'static TypeInfo,
    subtypes: Option<TypeTraitSubtypes>,
) -> ParseFn<F> {
    parse_fn(move |scope, token| {
        if let Some(subtypes) = &subtypes
            && F::classify(token) == TokenShape::Map
            && let Some(discriminator) = discriminator::<F>(token)?
        {
            let Some(subtype) = subtypes.find(&discriminator) else {
                let reason = format!("`{discriminator}` is not a known subtype");
                return Err(ParseError::mismatch(info, token, reason));
            };
            let value = scope.parser_of(subtype.info()).parse(token)?;
            return subtype
                .upcast(value)
                .map_err(|err| ParseError::build(info, token, err));
        }
        Err(ParseError::mismatch(info, token, "no conversion available"))
    })
}

fn discriminator<F: TextFormat>(token: &str) -> Result<Option<String>, ParseError> {
    Ok(F::split_map(token)?.into_iter().find_map(|(key, value)| {
        (F::unescape_safe(key) == TYPE_KEY).then(|| F::unescape_safe(value).into_owned())
    }))
}
