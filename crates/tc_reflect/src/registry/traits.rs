use alloc::borrow::Cow;
use alloc::boxed::Box;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::error::Error;
use core::fmt;
use core::str::FromStr;

use crate::info::{TypeInfo, TypeRef, Typed};
use crate::registry::FromType;
use crate::{AnyValue, BuildError, downcast};

/// Error returned by registered factories.
pub type FactoryError = Box<dyn Error + Send + Sync>;

/// A format's de-escaping function, handed to [`ParseWith`] factories.
pub type Unescape = for<'a> fn(&'a str) -> Cow<'a, str>;

// -----------------------------------------------------------------------------
// TypeTraitFromStr

/// Static factory for value types, via [`FromStr`].
///
/// The factory receives the token already unescaped.
///
/// # Examples
///
/// ```
/// use tc_reflect::registry::{FromType, TypeTraitFromStr};
///
/// let factory = <TypeTraitFromStr as FromType<u8>>::from_type();
/// let value = factory.parse("12").unwrap();
/// assert_eq!(*value.downcast::<u8>().unwrap(), 12);
///
/// assert!(factory.parse("x").is_err());
/// ```
#[derive(Clone, Copy)]
pub struct TypeTraitFromStr {
    parse: fn(&str) -> Result<AnyValue, FactoryError>,
}

impl TypeTraitFromStr {
    #[inline]
    pub fn parse(&self, text: &str) -> Result<AnyValue, FactoryError> {
        (self.parse)(text)
    }
}

impl<T> FromType<T> for TypeTraitFromStr
where
    T: Typed + FromStr + Send,
    T::Err: Error + Send + Sync + 'static,
{
    fn from_type() -> Self {
        Self {
            parse: |text| match T::from_str(text) {
                Ok(value) => Ok(Box::new(value)),
                Err(err) => Err(Box::new(err)),
            },
        }
    }
}

// -----------------------------------------------------------------------------
// TypeTraitParseWith

/// A static parser of a reference type that handles escaping itself.
///
/// Unlike [`FromStr`], it receives the raw token together with the active
/// format's [`Unescape`] function.
pub trait ParseWith: Sized {
    type Err: Error + Send + Sync + 'static;

    fn parse_with(text: &str, unescape: Unescape) -> Result<Self, Self::Err>;
}

/// Static factory for reference types, via [`ParseWith`].
#[derive(Clone, Copy)]
pub struct TypeTraitParseWith {
    parse: fn(&str, Unescape) -> Result<AnyValue, FactoryError>,
}

impl TypeTraitParseWith {
    #[inline]
    pub fn parse(&self, text: &str, unescape: Unescape) -> Result<AnyValue, FactoryError> {
        (self.parse)(text, unescape)
    }
}

impl<T: Typed + ParseWith + Send> FromType<T> for TypeTraitParseWith {
    fn from_type() -> Self {
        Self {
            parse: |text, unescape| match T::parse_with(text, unescape) {
                Ok(value) => Ok(Box::new(value)),
                Err(err) => Err(Box::new(err)),
            },
        }
    }
}

// -----------------------------------------------------------------------------
// TypeTraitFromString

/// Single string-argument constructor, via [`From<String>`].
#[derive(Clone, Copy)]
pub struct TypeTraitFromString {
    make: fn(String) -> AnyValue,
}

impl TypeTraitFromString {
    #[inline]
    pub fn make(&self, text: String) -> AnyValue {
        (self.make)(text)
    }
}

impl<T: Typed + From<String> + Send> FromType<T> for TypeTraitFromString {
    fn from_type() -> Self {
        Self {
            make: |text| Box::new(T::from(text)),
        }
    }
}

// -----------------------------------------------------------------------------
// TypeTraitSubtypes

/// A concrete implementation of an abstract type.
#[derive(Clone)]
pub struct Subtype {
    ty: TypeRef,
    upcast: Arc<dyn Fn(AnyValue) -> Result<AnyValue, BuildError> + Send + Sync>,
}

impl Subtype {
    /// Creates a subtype `S` of `B`, converted with `upcast`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tc_reflect::registry::Subtype;
    ///
    /// let subtype = Subtype::new::<i64, i32>(i64::from);
    /// let base = subtype.upcast(Box::new(7_i32)).unwrap();
    /// assert_eq!(*base.downcast::<i64>().unwrap(), 7);
    /// ```
    pub fn new<B, S>(upcast: fn(S) -> B) -> Self
    where
        B: Send + 'static,
        S: Typed + Send,
    {
        Self {
            ty: TypeRef::of::<S>(),
            upcast: Arc::new(move |value: AnyValue| -> Result<AnyValue, BuildError> {
                Ok(Box::new(upcast(downcast::<S>(value)?)))
            }),
        }
    }

    /// Returns the concrete type.
    #[inline]
    pub const fn ty(&self) -> TypeRef {
        self.ty
    }

    #[inline]
    pub fn info(&self) -> &'static TypeInfo {
        self.ty.info()
    }

    /// Check if `discriminator` names this subtype, by short name or full
    /// type path.
    pub fn matches(&self, discriminator: &str) -> bool {
        let info = self.info();
        info.name() == discriminator || info.type_path() == discriminator
    }

    /// Converts a value of the concrete type into the abstract type.
    #[inline]
    pub fn upcast(&self, value: AnyValue) -> Result<AnyValue, BuildError> {
        (self.upcast)(value)
    }
}

impl fmt::Debug for Subtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Subtype").field(&self.info().name()).finish()
    }
}

/// The registered concrete implementations of an abstract type, in
/// registration order.
#[derive(Clone, Debug, Default)]
pub struct TypeTraitSubtypes {
    subtypes: Vec<Subtype>,
}

impl TypeTraitSubtypes {
    #[inline]
    pub fn push(&mut self, subtype: Subtype) {
        self.subtypes.push(subtype);
    }

    /// Returns the first subtype named by `discriminator`.
    pub fn find(&self, discriminator: &str) -> Option<&Subtype> {
        self.subtypes.iter().find(|subtype| subtype.matches(discriminator))
    }

    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Subtype> {
        self.subtypes.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.subtypes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.subtypes.is_empty()
    }
}

impl<T: Typed> FromType<T> for TypeTraitSubtypes {
    fn from_type() -> Self {
        Self::default()
    }
}

// -----------------------------------------------------------------------------
// Tests
