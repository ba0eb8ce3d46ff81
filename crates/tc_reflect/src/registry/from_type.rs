use crate::info::Typed;

/// Creates a [`TypeTrait`] for the type `T`.
///
/// # Example
///
/// ```
/// # use tc_reflect::registry::{FromType, TypeMeta, TypeTraitFromStr};
/// let mut meta = TypeMeta::of::<u16>();
/// meta.insert_trait::<TypeTraitFromStr>(FromType::<u16>::from_type());
///
/// assert!(meta.has_trait::<TypeTraitFromStr>());
/// ```
///
/// [`TypeTrait`]: crate::registry::TypeTrait
pub trait FromType<T: Typed> {
    fn from_type() -> Self;
}
