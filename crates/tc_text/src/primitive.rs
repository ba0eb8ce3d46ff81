use alloc::boxed::Box;
use core::error::Error;
use core::str::FromStr;

use tc_reflect::AnyValue;
use tc_reflect::info::Primitive;

use crate::ParseError;

/// Parses an unescaped literal of a built-in scalar.
pub(crate) fn parse_primitive(primitive: Primitive, text: &str) -> Result<AnyValue, ParseError> {
    let text = text.trim();
    match primitive {
        Primitive::Bool => literal::<bool>("bool", text),
        Primitive::Char => literal::<char>("char", text),
        Primitive::I8 => literal::<i8>("i8", text),
        Primitive::I16 => literal::<i16>("i16", text),
        Primitive::I32 => literal::<i32>("i32", text),
        Primitive::I64 => literal::<i64>("i64", text),
        Primitive::I128 => literal::<i128>("i128", text),
        Primitive::Isize => literal::<isize>("isize", text),
        Primitive::U8 => literal::<u8>("u8", text),
        Primitive::U16 => literal::<u16>("u16", text),
        Primitive::U32 => literal::<u32>("u32", text),
        Primitive::U64 => literal::<u64>("u64", text),
        Primitive::U128 => literal::<u128>("u128", text),
        Primitive::Usize => literal::<usize>("usize", text),
        Primitive::F32 => literal::<f32>("f32", text),
        Primitive::F64 => literal::<f64>("f64", text),
    }
}

#[inline]
fn literal<T>(type_name: &str, text: &str) -> Result<AnyValue, ParseError>
where
    T: FromStr + Send + 'static,
    T::Err: Error + Send + Sync + 'static,
{
    match text.parse::<T>() {
        Ok(value) => Ok(Box::new(value)),
        Err(err) => Err(ParseError::primitive(type_name, text, Some(Box::new(err)))),
    }
}

// -----------------------------------------------------------------------------
// Tests
