use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use crate::info::{TypeRef, Typed};
use crate::info::seq_info::SeqBuilder;
use crate::{AnyValue, BuildError, downcast};

/// A fixed-element-type array: `[T; N]` or `Box<[T]>`.
///
/// # Examples
///
/// ```
/// use tc_reflect::info::Typed;
///
/// let info = <[u16; 3] as Typed>::type_info().as_array().unwrap();
/// assert_eq!(info.len(), Some(3));
///
/// let info = <Box<[u16]> as Typed>::type_info().as_array().unwrap();
/// assert_eq!(info.len(), None);
/// ```
#[derive(Clone, Copy)]
pub struct ArrayInfo {
    item: TypeRef,
    len: Option<usize>,
    build: SeqBuilder,
}

impl ArrayInfo {
    /// Descriptor for `[T; N]`; building checks the element count.
    #[inline]
    pub fn fixed<T: Typed + Send, const N: usize>() -> Self {
        Self {
            item: TypeRef::of::<T>(),
            len: Some(N),
            build: build_fixed::<T, N>,
        }
    }

    /// Descriptor for `Box<[T]>`, whose length is taken from the input.
    #[inline]
    pub fn boxed<T: Typed + Send>() -> Self {
        Self {
            item: TypeRef::of::<T>(),
            len: None,
            build: |items| {
                let items = items
                    .into_iter()
                    .map(downcast::<T>)
                    .collect::<Result<Box<[T]>, BuildError>>()?;
                Ok(Box::new(items))
            },
        }
    }

    /// Returns the element type.
    #[inline]
    pub const fn item(&self) -> TypeRef {
        self.item
    }

    /// Returns the fixed length, or `None` when it is inferred from input.
    #[inline]
    pub const fn len(&self) -> Option<usize> {
        self.len
    }

    /// Returns the builder, shared with the list facet of fixed arrays.
    #[inline]
    pub(crate) const fn builder(&self) -> SeqBuilder {
        self.build
    }

    /// Assembles the array.
    #[inline]
    pub fn build(&self, items: Vec<AnyValue>) -> Result<AnyValue, BuildError> {
        (self.build)(items)
    }
}

pub(crate) fn build_fixed<T: Typed + Send, const N: usize>(
    items: Vec<AnyValue>,
) -> Result<AnyValue, BuildError> {
    if items.len() != N {
        return Err(BuildError::Length {
            expected: N,
            found: items.len(),
        });
    }
    let items = items
        .into_iter()
        .map(downcast::<T>)
        .collect::<Result<Vec<T>, BuildError>>()?;
    let array: [T; N] = items.try_into().map_err(|rest: Vec<T>| BuildError::Length {
        expected: N,
        found: rest.len(),
    })?;
    Ok(Box::new(array))
}

impl fmt::Debug for ArrayInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrayInfo")
            .field("item", &self.item)
            .field("len", &self.len)
            .finish()
    }
}
