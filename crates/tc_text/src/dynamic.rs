use alloc::string::String;
use alloc::vec::Vec;

use tc_reflect::impls::NonGenericTypeInfoCell;
use tc_reflect::info::{TypeInfo, TypeKind, Typed};

use crate::config::DEFAULT_MAX_DEPTH;
use crate::format::{TextFormat, TokenShape};
use crate::reader::DEPTH_EXCEEDED;
use crate::{ParseError, Position};

/// An open value whose shape is inferred from the text.
///
/// Objects keep their members in input order.
///
/// # Examples
///
/// ```
/// use tc_text::DynamicValue;
/// use tc_text::format::{Json, TextFormat};
///
/// let value: DynamicValue = Json::reader().parse(r#"{"a":[1,2.5,"x"],"b":null}"#).unwrap();
///
/// let a = value.get("a").unwrap().as_array().unwrap();
/// assert_eq!(a[0], DynamicValue::Int(1));
/// assert_eq!(a[1], DynamicValue::Float(2.5));
/// assert_eq!(a[2].as_str(), Some("x"));
/// assert!(value.get("b").unwrap().is_null());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DynamicValue {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Array(Vec<DynamicValue>),
    Object(Vec<(String, DynamicValue)>),
}

impl DynamicValue {
    /// Infers a value from a token of format `F`, nesting at most
    /// [`DEFAULT_MAX_DEPTH`] levels.
    #[inline]
    pub fn parse<F: TextFormat>(token: &str) -> Result<Self, ParseError> {
        Self::parse_within::<F>(token, DEFAULT_MAX_DEPTH)
    }

    /// Infers a value from a token of format `F`, nesting at most
    /// `max_depth` levels of arrays and objects.
    pub fn parse_within<F: TextFormat>(token: &str, max_depth: usize) -> Result<Self, ParseError> {
        let shape = F::classify(token);
        if matches!(shape, TokenShape::List | TokenShape::Map) && max_depth == 0 {
            return Err(ParseError::syntax(F::NAME, token, DEPTH_EXCEEDED));
        }
        let nested = max_depth.saturating_sub(1);

        match shape {
            TokenShape::Null => Ok(Self::Null),
            TokenShape::Bool => Ok(Self::Bool(token.trim() == "true")),
            TokenShape::Number => {
                let token = token.trim();
                if let Ok(int) = token.parse::<i64>() {
                    return Ok(Self::Int(int));
                }
                token
                    .parse::<f64>()
                    .map(Self::Float)
                    .map_err(|err| ParseError::primitive("f64", token, Some(err.into())))
            }
            TokenShape::String => Ok(Self::String(F::unescape(token)?.into_owned())),
            TokenShape::List => {
                let items = F::split_list(token)?
                    .into_iter()
                    .enumerate()
                    .map(|(index, item)| {
                        Self::parse_within::<F>(item, nested)
                            .map_err(|err| err.at(Position::Index(index)))
                    })
                    .collect::<Result<_, _>>()?;
                Ok(Self::Array(items))
            }
            TokenShape::Map => {
                let mut members = Vec::new();
                for (key, value) in F::split_map(token)? {
                    let key = F::unescape(key)?.into_owned();
                    let value = Self::parse_within::<F>(value, nested)
                        .map_err(|err| err.at(Position::Value(key.clone())))?;
                    members.push((key, value));
                }
                Ok(Self::Object(members))
            }
        }
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[DynamicValue]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the first member with this key, if this is an object.
    pub fn get(&self, key: &str) -> Option<&DynamicValue> {
        match self {
            Self::Object(members) => members
                .iter()
                .find_map(|(name, value)| (name == key).then_some(value)),
            _ => None,
        }
    }
}

impl Typed for DynamicValue {
    fn type_info() -> &'static TypeInfo {
        static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
        CELL.get_or_init(|| TypeInfo::new::<Self>(TypeKind::Dynamic))
    }
}

// -----------------------------------------------------------------------------
// Tests
