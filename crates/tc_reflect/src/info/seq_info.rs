use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use crate::info::{TypeRef, Typed};
use crate::{AnyValue, BuildError, downcast};

/// Builder signature shared by sequence-like descriptors.
pub type SeqBuilder = fn(Vec<AnyValue>) -> Result<AnyValue, BuildError>;

/// A sequence capability: the item type and how to collect items.
///
/// The same descriptor backs list, collection, queue, stack and plain
/// sequence facets; the [`Facet`](crate::info::Facet) variant tells the
/// resolver which discipline applies. Items are handed to the builder in
/// insertion order.
///
/// # Examples
///
/// ```
/// use tc_reflect::AnyValue;
/// use tc_reflect::info::SeqInfo;
///
/// let info = SeqInfo::new::<Vec<u8>, u8>();
/// assert!(info.item().is::<u8>());
///
/// let items: Vec<AnyValue> = vec![Box::new(1_u8), Box::new(2_u8)];
/// let built = info.build(items).unwrap();
/// assert_eq!(*built.downcast::<Vec<u8>>().unwrap(), vec![1, 2]);
/// ```
#[derive(Clone, Copy)]
pub struct SeqInfo {
    item: TypeRef,
    build: SeqBuilder,
}

impl SeqInfo {
    /// Creates a sequence descriptor for any `C` collecting `T`.
    #[inline]
    pub fn new<C, T>() -> Self
    where
        C: FromIterator<T> + Send + 'static,
        T: Typed + Send,
    {
        Self {
            item: TypeRef::of::<T>(),
            build: |items| {
                let collected = items
                    .into_iter()
                    .map(downcast::<T>)
                    .collect::<Result<C, BuildError>>()?;
                Ok(Box::new(collected))
            },
        }
    }

    /// Creates a sequence descriptor with a hand-written builder.
    #[inline]
    pub fn with_builder<T: Typed>(build: SeqBuilder) -> Self {
        Self {
            item: TypeRef::of::<T>(),
            build,
        }
    }

    /// Returns the item type.
    #[inline]
    pub const fn item(&self) -> TypeRef {
        self.item
    }

    /// Assembles the container from items in insertion order.
    #[inline]
    pub fn build(&self, items: Vec<AnyValue>) -> Result<AnyValue, BuildError> {
        (self.build)(items)
    }
}

impl fmt::Debug for SeqInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SeqInfo").field("item", &self.item).finish()
    }
}
