use alloc::boxed::Box;
use alloc::sync::Arc;
use core::fmt;

use tc_utils::hash::HashMap;

use crate::AnyValue;

// -----------------------------------------------------------------------------
// VariantInfo

/// A unit variant of an enumeration: its name, discriminant and value.
#[derive(Clone)]
pub struct VariantInfo {
    name: &'static str,
    discriminant: i64,
    make: Arc<dyn Fn() -> AnyValue + Send + Sync>,
}

impl VariantInfo {
    /// Creates a variant that produces clones of `value`.
    pub fn new<T>(name: &'static str, discriminant: i64, value: T) -> Self
    where
        T: Clone + Send + Sync + 'static,
    {
        Self {
            name,
            discriminant,
            make: Arc::new(move || -> AnyValue { Box::new(value.clone()) }),
        }
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub const fn discriminant(&self) -> i64 {
        self.discriminant
    }

    /// Produces the variant's value.
    #[inline]
    pub fn make(&self) -> AnyValue {
        (self.make)()
    }
}

impl fmt::Debug for VariantInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VariantInfo")
            .field("name", &self.name)
            .field("discriminant", &self.discriminant)
            .finish()
    }
}

// -----------------------------------------------------------------------------
// EnumInfo

/// The members of a field-less enumeration.
///
/// # Examples
///
/// ```
/// use tc_reflect::info::{EnumInfo, VariantInfo};
///
/// #[derive(Clone, Copy, Debug, PartialEq)]
/// enum Color { Red, Green }
///
/// let info = EnumInfo::new([
///     VariantInfo::new("Red", 0, Color::Red),
///     VariantInfo::new("Green", 1, Color::Green),
/// ]);
///
/// assert_eq!(info.variant("Red").unwrap().discriminant(), 0);
/// assert_eq!(info.variant_ignore_case("GREEN").unwrap().name(), "Green");
/// assert_eq!(info.variant_of(1).unwrap().name(), "Green");
/// assert!(info.variant("Blue").is_none());
/// ```
#[derive(Clone, Debug)]
pub struct EnumInfo {
    variants: Box<[VariantInfo]>,
    by_name: HashMap<&'static str, usize>,
}

impl EnumInfo {
    /// Creates a new [`EnumInfo`]; variants keep the input order.
    pub fn new(variants: impl Into<Box<[VariantInfo]>>) -> Self {
        let variants: Box<[VariantInfo]> = variants.into();
        let by_name = variants
            .iter()
            .enumerate()
            .map(|(index, variant)| (variant.name, index))
            .collect();
        Self { variants, by_name }
    }

    /// Returns the variant with exactly this name.
    pub fn variant(&self, name: &str) -> Option<&VariantInfo> {
        self.by_name.get(name).map(|&index| &self.variants[index])
    }

    /// Returns the variant with this name, ignoring ASCII case.
    ///
    /// An exact match always wins over a case-insensitive one.
    pub fn variant_ignore_case(&self, name: &str) -> Option<&VariantInfo> {
        self.variant(name).or_else(|| {
            self.variants
                .iter()
                .find(|variant| variant.name.eq_ignore_ascii_case(name))
        })
    }

    /// Returns the first variant with this discriminant.
    pub fn variant_of(&self, discriminant: i64) -> Option<&VariantInfo> {
        self.variants
            .iter()
            .find(|variant| variant.discriminant == discriminant)
    }

    /// Returns an iterator over the variants in declaration order.
    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &VariantInfo> {
        self.variants.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.variants.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }
}
