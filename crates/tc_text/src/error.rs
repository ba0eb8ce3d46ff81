use alloc::boxed::Box;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

use tc_reflect::BuildError;
use tc_reflect::info::TypeInfo;
use tc_reflect::registry::FactoryError;
use thiserror::Error;

// -----------------------------------------------------------------------------
// Position

/// Where inside a container a nested failure happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Position {
    /// Element of a list-like container, or argument of a constructor.
    Index(usize),
    /// Key of a map entry.
    Key(String),
    /// Value of the map entry with this key.
    Value(String),
    /// Member of a struct.
    Member(String),
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(index) => write!(f, "element {index}"),
            Self::Key(key) => write!(f, "key `{key}`"),
            Self::Value(key) => write!(f, "value of key `{key}`"),
            Self::Member(name) => write!(f, "member `{name}`"),
        }
    }
}

// -----------------------------------------------------------------------------
// ParseError

/// Error produced when invoking a conversion function.
///
/// Resolving a conversion function never fails; only applying it to a token
/// does.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ParseError {
    /// The token cannot be mapped onto the target type's shape.
    #[error("cannot read `{type_name}` from `{token}`: {reason}")]
    StructuralMismatch {
        type_name: String,
        token: String,
        reason: String,
    },

    /// The token is neither a member name nor a member value.
    #[error("`{token}` is not a member of enum `{type_name}`")]
    Enum { type_name: String, token: String },

    /// The token is not a valid literal of the type.
    #[error("`{token}` is not a valid `{type_name}`")]
    Primitive {
        type_name: String,
        token: String,
        #[source]
        source: Option<FactoryError>,
    },

    /// A nested conversion failed.
    #[error("{position}: {source}")]
    Element {
        position: Position,
        #[source]
        source: Box<ParseError>,
    },

    /// The token is not well formed for the active format.
    #[error("malformed {format} token `{token}`: {reason}")]
    Syntax {
        format: &'static str,
        token: String,
        reason: &'static str,
    },

    /// A conversion function produced a value of another type.
    #[error("conversion produced a value that is not `{expected}`")]
    TypeMismatch { expected: String },
}

impl ParseError {
    /// Creates a [`ParseError::StructuralMismatch`].
    pub fn mismatch(info: &TypeInfo, token: &str, reason: impl ToString) -> Self {
        Self::StructuralMismatch {
            type_name: info.name().into(),
            token: token.into(),
            reason: reason.to_string(),
        }
    }

    /// Converts a builder failure into a [`ParseError::StructuralMismatch`].
    #[inline]
    pub fn build(info: &TypeInfo, token: &str, err: BuildError) -> Self {
        Self::mismatch(info, token, err)
    }

    /// Creates a [`ParseError::Primitive`].
    pub fn primitive(type_name: &str, token: &str, source: Option<FactoryError>) -> Self {
        Self::Primitive {
            type_name: type_name.into(),
            token: token.into(),
            source,
        }
    }

    /// Creates a [`ParseError::Syntax`].
    pub fn syntax(format: &'static str, token: &str, reason: &'static str) -> Self {
        Self::Syntax {
            format,
            token: token.into(),
            reason,
        }
    }

    /// Wraps this error with the position it occurred at.
    #[inline]
    pub fn at(self, position: Position) -> Self {
        Self::Element {
            position,
            source: Box::new(self),
        }
    }

    /// Returns the chain of positions down to the innermost failure.
    ///
    /// # Examples
    ///
    /// ```
    /// use tc_text::format::{Json, TextFormat};
    /// use tc_text::{ParseError, Position};
    ///
    /// let err = Json::reader().parse::<Vec<i32>>("[1,x,3]").unwrap_err();
    /// assert_eq!(err.path(), [&Position::Index(1)]);
    /// assert!(matches!(err.innermost(), ParseError::Primitive { .. }));
    /// ```
    pub fn path(&self) -> Vec<&Position> {
        let mut path = Vec::new();
        let mut current = self;
        while let Self::Element { position, source } = current {
            path.push(position);
            current = &**source;
        }
        path
    }

    /// Returns the innermost non-positional error.
    pub fn innermost(&self) -> &ParseError {
        let mut current = self;
        while let Self::Element { source, .. } = current {
            current = &**source;
        }
        current
    }
}

// -----------------------------------------------------------------------------
// Tests
