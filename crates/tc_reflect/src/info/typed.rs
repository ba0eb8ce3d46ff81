use crate::info::TypeInfo;

// -----------------------------------------------------------------------------
// Typed

/// A static accessor to compile-time type information.
///
/// Implemented for the standard scalars and containers in
/// [`impls`](crate::impls). User types implement it by hand with one of the
/// cells from [`impls`](crate::impls).
///
/// # Examples
///
/// For a non-generic struct:
///
/// ```
/// use tc_reflect::impls::NonGenericTypeInfoCell;
/// use tc_reflect::info::{NamedField, StructInfo, TypeInfo, Typed};
///
/// #[derive(Default)]
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// impl Typed for Point {
///     fn type_info() -> &'static TypeInfo {
///         static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
///         CELL.get_or_init(|| {
///             TypeInfo::structure::<Self>(StructInfo::new::<Self>([
///                 NamedField::new::<Self, i32>("x", |p, v| p.x = v),
///                 NamedField::new::<Self, i32>("y", |p, v| p.y = v),
///             ]))
///         })
///     }
/// }
///
/// assert_eq!(Point::type_info().name(), "Point");
/// assert_eq!(Point::type_info().as_struct().unwrap().len(), 2);
/// ```
///
/// For a generic wrapper:
///
/// ```
/// use tc_reflect::impls::GenericTypeInfoCell;
/// use tc_reflect::info::{Facet, SeqInfo, TypeInfo, TypeParamInfo, Typed};
///
/// struct Bag<T>(Vec<T>);
///
/// impl<T> FromIterator<T> for Bag<T> {
///     fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
///         Bag(iter.into_iter().collect())
///     }
/// }
///
/// impl<T: Typed + Send> Typed for Bag<T> {
///     fn type_info() -> &'static TypeInfo {
///         static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
///         CELL.get_or_insert::<Self>(|| {
///             TypeInfo::opaque::<Self>()
///                 .with_generics([TypeParamInfo::new::<T>("T")])
///                 .with_facet(Facet::Collection(SeqInfo::new::<Self, T>()))
///         })
///     }
/// }
///
/// assert!(<Bag<u8> as Typed>::type_info().collection().is_some());
/// ```
pub trait Typed: 'static {
    /// Returns the compile-time info for the underlying type.
    fn type_info() -> &'static TypeInfo;
}
