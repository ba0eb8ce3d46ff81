use alloc::vec::Vec;

use tc_reflect::AnyValue;
use tc_reflect::info::{ArrayInfo, SeqInfo, TypeInfo, TypeRef};

use super::{ParseFn, Scope, parse_fn};
use crate::format::TextFormat;
use crate::{ParseError, Position};

/// Parses every element of a list token, failing on the first bad one.
pub(super) fn items<F: TextFormat>(
    scope: &Scope<'_, F>,
    info: &TypeInfo,
    token: &str,
    item: TypeRef,
) -> Result<Vec<AnyValue>, ParseError> {
    if F::is_null(token) {
        return Err(ParseError::mismatch(info, token, "null is not a container"));
    }
    let parser = scope.parser_of(item.info());
    F::split_list(token)?
        .into_iter()
        .enumerate()
        .map(|(index, element)| {
            parser
                .parse(element)
                .map_err(|err| err.at(Position::Index(index)))
        })
        .collect()
}

pub(super) fn array<F: TextFormat>(info: &'static TypeInfo, array: &'static ArrayInfo) -> ParseFn<F> {
    parse_fn(move |scope, token| {
        let items = items(scope, info, token, array.item())?;
        array
            .build(items)
            .map_err(|err| ParseError::build(info, token, err))
    })
}

/// Lists, collections, queues and general sequences: items are inserted in
/// text order.
pub(super) fn sequence<F: TextFormat>(info: &'static TypeInfo, seq: &'static SeqInfo) -> ParseFn<F> {
    parse_fn(move |scope, token| {
        let items = items(scope, info, token, seq.item())?;
        seq.build(items)
            .map_err(|err| ParseError::build(info, token, err))
    })
}

/// Stacks list their top first, so items are pushed in reverse text order.
pub(super) fn stack<F: TextFormat>(info: &'static TypeInfo, seq: &'static SeqInfo) -> ParseFn<F> {
    parse_fn(move |scope, token| {
        let mut items = items(scope, info, token, seq.item())?;
        items.reverse();
        seq.build(items)
            .map_err(|err| ParseError::build(info, token, err))
    })
}
