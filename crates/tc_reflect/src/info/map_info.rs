use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use crate::info::{TypeRef, Typed};
use crate::{AnyValue, BuildError, downcast};

// -----------------------------------------------------------------------------
// MapInfo

/// A dictionary capability: key and value types and how to collect entries.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use tc_reflect::info::Typed;
///
/// let info = <BTreeMap<String, i32> as Typed>::type_info().map().unwrap();
///
/// assert!(info.key().is::<String>());
/// assert!(info.value().is::<i32>());
/// ```
#[derive(Clone, Copy)]
pub struct MapInfo {
    key: TypeRef,
    value: TypeRef,
    build: fn(Vec<(AnyValue, AnyValue)>) -> Result<AnyValue, BuildError>,
}

impl MapInfo {
    /// Creates a map descriptor for any `M` collecting `(K, V)` entries.
    #[inline]
    pub fn new<M, K, V>() -> Self
    where
        M: FromIterator<(K, V)> + Send + 'static,
        K: Typed + Send,
        V: Typed + Send,
    {
        Self {
            key: TypeRef::of::<K>(),
            value: TypeRef::of::<V>(),
            build: |entries| {
                let collected = entries
                    .into_iter()
                    .map(|(k, v)| Ok((downcast::<K>(k)?, downcast::<V>(v)?)))
                    .collect::<Result<M, BuildError>>()?;
                Ok(Box::new(collected))
            },
        }
    }

    /// Returns the key type.
    #[inline]
    pub const fn key(&self) -> TypeRef {
        self.key
    }

    /// Returns the value type.
    #[inline]
    pub const fn value(&self) -> TypeRef {
        self.value
    }

    /// Assembles the map. Later duplicates win, as with `FromIterator`.
    #[inline]
    pub fn build(&self, entries: Vec<(AnyValue, AnyValue)>) -> Result<AnyValue, BuildError> {
        (self.build)(entries)
    }
}

impl fmt::Debug for MapInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapInfo")
            .field("key", &self.key)
            .field("value", &self.value)
            .finish()
    }
}

// -----------------------------------------------------------------------------
// PairInfo

/// A single key-value pair capability.
#[derive(Clone, Copy)]
pub struct PairInfo {
    key: TypeRef,
    value: TypeRef,
    build: fn(AnyValue, AnyValue) -> Result<AnyValue, BuildError>,
}

impl PairInfo {
    /// Creates a pair descriptor for any `P` built from `(K, V)`.
    #[inline]
    pub fn new<P, K, V>() -> Self
    where
        P: From<(K, V)> + Send + 'static,
        K: Typed + Send,
        V: Typed + Send,
    {
        Self {
            key: TypeRef::of::<K>(),
            value: TypeRef::of::<V>(),
            build: |k, v| Ok(Box::new(P::from((downcast::<K>(k)?, downcast::<V>(v)?)))),
        }
    }

    /// Returns the key type.
    #[inline]
    pub const fn key(&self) -> TypeRef {
        self.key
    }

    /// Returns the value type.
    #[inline]
    pub const fn value(&self) -> TypeRef {
        self.value
    }

    /// Assembles the pair.
    #[inline]
    pub fn build(&self, key: AnyValue, value: AnyValue) -> Result<AnyValue, BuildError> {
        (self.build)(key, value)
    }
}

impl fmt::Debug for PairInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PairInfo")
            .field("key", &self.key)
            .field("value", &self.value)
            .finish()
    }
}
