use alloc::boxed::Box;
use core::any::{Any, type_name};

use thiserror::Error;

/// A type-erased value produced by a parser or a builder.
pub type AnyValue = Box<dyn Any + Send>;

/// Error returned by the builders stored in type descriptors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum BuildError {
    #[error("expected a value of type `{expected}`")]
    Downcast { expected: &'static str },

    #[error("expected {expected} elements, found {found}")]
    Length { expected: usize, found: usize },
}

/// Unboxes an [`AnyValue`] into `T`.
///
/// # Examples
///
/// ```
/// use tc_reflect::{AnyValue, downcast};
///
/// let value: AnyValue = Box::new(7_u16);
/// assert_eq!(downcast::<u16>(value), Ok(7));
///
/// let value: AnyValue = Box::new(7_u16);
/// assert!(downcast::<u32>(value).is_err());
/// ```
#[inline]
pub fn downcast<T: Any>(value: AnyValue) -> Result<T, BuildError> {
    match value.downcast::<T>() {
        Ok(value) => Ok(*value),
        Err(_) => Err(BuildError::Downcast {
            expected: type_name::<T>(),
        }),
    }
}
