use alloc::boxed::Box;
use core::fmt;

use crate::info::{TypeRef, Typed};
use crate::{AnyValue, BuildError, downcast};

/// An optional wrapper around an underlying type.
#[derive(Clone, Copy)]
pub struct OptionInfo {
    inner: TypeRef,
    some: fn(AnyValue) -> Result<AnyValue, BuildError>,
    none: fn() -> AnyValue,
}

impl OptionInfo {
    /// Descriptor for `Option<T>`.
    #[inline]
    pub fn new<T: Typed + Send>() -> Self {
        Self {
            inner: TypeRef::of::<T>(),
            some: |value| Ok(Box::new(Some(downcast::<T>(value)?))),
            none: || Box::new(None::<T>),
        }
    }

    /// Returns the underlying type.
    #[inline]
    pub const fn inner(&self) -> TypeRef {
        self.inner
    }

    /// Wraps an underlying value.
    #[inline]
    pub fn some(&self, value: AnyValue) -> Result<AnyValue, BuildError> {
        (self.some)(value)
    }

    /// Returns the absent value.
    #[inline]
    pub fn none(&self) -> AnyValue {
        (self.none)()
    }
}

impl fmt::Debug for OptionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionInfo")
            .field("inner", &self.inner)
            .finish()
    }
}
