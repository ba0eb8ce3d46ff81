use alloc::boxed::Box;
use core::any::TypeId;
use core::fmt;
use core::ops::Deref;

use tc_utils::TypeIdMap;

use crate::info::{Type, TypeInfo, Typed};
use crate::registry::TypeTrait;

// -----------------------------------------------------------------------------
// TypeMeta

/// Runtime storage for a registered type: its [`TypeInfo`] and a
/// [`TypeTrait`] table.
///
/// # Example
///
/// ```
/// # use tc_reflect::registry::{TypeMeta, TypeTraitFromStr, FromType};
/// let mut meta = TypeMeta::of::<i32>();
/// meta.insert_trait::<TypeTraitFromStr>(FromType::<i32>::from_type());
///
/// let factory = meta.get_trait::<TypeTraitFromStr>().unwrap();
/// let value = factory.parse("-5").unwrap();
///
/// assert_eq!(*value.downcast::<i32>().unwrap(), -5);
/// ```
pub struct TypeMeta {
    type_info: &'static TypeInfo,
    trait_table: TypeIdMap<Box<dyn TypeTrait>>,
}

impl TypeMeta {
    /// Creates an empty [`TypeMeta`] for `T`.
    #[inline]
    pub fn of<T: Typed>() -> Self {
        Self::new(T::type_info())
    }

    /// Creates an empty [`TypeMeta`] from a descriptor.
    #[inline]
    pub fn new(type_info: &'static TypeInfo) -> Self {
        Self {
            type_info,
            trait_table: TypeIdMap::new(),
        }
    }

    #[inline(always)]
    pub const fn type_info(&self) -> &'static TypeInfo {
        self.type_info
    }

    #[inline(always)]
    pub fn ty(&self) -> &'static Type {
        self.type_info.ty()
    }

    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.type_info.ty().id()
    }

    /// Inserts a [`TypeTrait`], replacing any previous one of the same type.
    #[inline(always)]
    pub fn insert_trait<T: TypeTrait>(&mut self, data: T) {
        self.insert_trait_by_id(TypeId::of::<T>(), Box::new(data));
    }

    #[inline(never)]
    fn insert_trait_by_id(&mut self, id: TypeId, val: Box<dyn TypeTrait>) {
        self.trait_table.insert(id, val);
    }

    /// Returns the [`TypeTrait`] `T`, if present.
    #[inline]
    pub fn get_trait<T: TypeTrait>(&self) -> Option<&T> {
        self.get_trait_by_id(TypeId::of::<T>())
            .and_then(<dyn TypeTrait>::downcast_ref)
    }

    pub fn get_trait_by_id(&self, type_id: TypeId) -> Option<&dyn TypeTrait> {
        self.trait_table.get(&type_id).map(Deref::deref)
    }

    /// Returns the [`TypeTrait`] `T`, inserting `f()` first if missing.
    pub fn get_or_insert_trait<T: TypeTrait>(&mut self, f: impl FnOnce() -> T) -> &mut T {
        let data = self
            .trait_table
            .get_or_insert(TypeId::of::<T>(), || -> Box<dyn TypeTrait> { Box::new(f()) });
        match <dyn TypeTrait>::downcast_mut::<T>(&mut **data) {
            Some(data) => data,
            None => unreachable!("trait table is keyed by the trait's `TypeId`"),
        }
    }

    #[inline]
    pub fn has_trait<T: TypeTrait>(&self) -> bool {
        self.trait_table.contains(&TypeId::of::<T>())
    }

    #[inline]
    pub fn trait_len(&self) -> usize {
        self.trait_table.len()
    }
}

impl Clone for TypeMeta {
    fn clone(&self) -> Self {
        let mut trait_table = TypeIdMap::with_capacity(self.trait_len());
        for id in self.trait_table.types() {
            if let Some(data) = self.trait_table.get(id) {
                trait_table.insert(*id, (**data).clone_type_trait());
            }
        }

        Self {
            type_info: self.type_info,
            trait_table,
        }
    }
}

impl fmt::Debug for TypeMeta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeMeta")
            .field("type_info", &self.type_info)
            .field("trait_len", &self.trait_len())
            .finish()
    }
}
