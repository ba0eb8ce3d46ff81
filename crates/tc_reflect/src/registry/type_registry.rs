use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::any::TypeId;
use core::fmt;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tc_utils::TypeIdMap;

use crate::info::{Facet, NamedField, TypeInfo, TypeKind, TypeParamInfo, TypeRef, Typed};
use crate::registry::{FromType, Subtype, TypeMeta, TypeTrait, TypeTraitSubtypes};

// -----------------------------------------------------------------------------
// TypeRegistry

/// The central store of registered types and their [`TypeTrait`]s.
///
/// # Example
///
/// ```
/// use core::any::TypeId;
/// use tc_reflect::registry::{TypeRegistry, TypeTraitFromStr};
///
/// let registry = TypeRegistry::new();
///
/// let factory = registry
///     .get_type_trait::<TypeTraitFromStr>(TypeId::of::<u64>())
///     .unwrap();
///
/// let value = factory.parse("40").unwrap();
/// assert_eq!(*value.downcast::<u64>().unwrap(), 40);
/// ```
pub struct TypeRegistry {
    type_meta_table: TypeIdMap<TypeMeta>,
}

impl Default for TypeRegistry {
    /// See [`TypeRegistry::new`] .
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistry {
    /// Creates an empty [`TypeRegistry`].
    #[inline]
    pub const fn empty() -> Self {
        Self {
            type_meta_table: TypeIdMap::new(),
        }
    }

    /// Creates a registry with the scalar types and `String` registered,
    /// each with a [`TypeTraitFromStr`](crate::registry::TypeTraitFromStr).
    pub fn new() -> Self {
        use crate::registry::TypeTraitFromStr as S;

        let mut registry = Self::empty();
        registry.register_type_trait::<bool, S>();
        registry.register_type_trait::<char, S>();
        registry.register_type_trait::<u8, S>();
        registry.register_type_trait::<u16, S>();
        registry.register_type_trait::<u32, S>();
        registry.register_type_trait::<u64, S>();
        registry.register_type_trait::<u128, S>();
        registry.register_type_trait::<usize, S>();
        registry.register_type_trait::<i8, S>();
        registry.register_type_trait::<i16, S>();
        registry.register_type_trait::<i32, S>();
        registry.register_type_trait::<i64, S>();
        registry.register_type_trait::<i128, S>();
        registry.register_type_trait::<isize, S>();
        registry.register_type_trait::<f32, S>();
        registry.register_type_trait::<f64, S>();
        registry.register::<String>();
        registry
    }

    /// Inserts a meta if its type is new; returns `true` if it was inserted.
    ///
    /// This does _not_ register type dependencies.
    pub fn try_insert_type_meta(&mut self, type_meta: TypeMeta) -> bool {
        self.type_meta_table
            .try_insert(type_meta.type_id(), || type_meta)
    }

    /// Registers `T` and every type it refers to, if not registered yet.
    ///
    /// Dependencies are the generic arguments, optional inner types, array
    /// items, struct members and container items, keys and values.
    ///
    /// # Example
    ///
    /// ```
    /// # use core::any::TypeId;
    /// # use tc_reflect::registry::TypeRegistry;
    /// let mut registry = TypeRegistry::empty();
    /// registry.register::<Vec<Option<u8>>>();
    ///
    /// assert!(registry.contains(TypeId::of::<Vec<Option<u8>>>()));
    /// assert!(registry.contains(TypeId::of::<Option<u8>>()));
    /// assert!(registry.contains(TypeId::of::<u8>()));
    /// ```
    #[inline]
    pub fn register<T: Typed>(&mut self) {
        self.register_info(T::type_info());
    }

    /// Registers a descriptor and its dependencies.
    pub fn register_info(&mut self, info: &'static TypeInfo) {
        // Inserted before walking, so recursive types terminate.
        if self.try_insert_type_meta(TypeMeta::new(info)) {
            for dependency in dependencies(info) {
                self.register_info(dependency.info());
            }
        }
    }

    /// Registers the type trait `D` for `T`, registering `T` first if needed.
    ///
    /// # Example
    ///
    /// ```
    /// use core::any::TypeId;
    /// use core::time::Duration;
    /// use tc_reflect::registry::{TypeRegistry, TypeTraitFromStr};
    ///
    /// let mut registry = TypeRegistry::empty();
    /// registry.register_type_trait::<std::net::Ipv4Addr, TypeTraitFromStr>();
    ///
    /// assert!(registry
    ///     .get_type_trait::<TypeTraitFromStr>(TypeId::of::<std::net::Ipv4Addr>())
    ///     .is_some());
    /// assert!(!registry.contains(TypeId::of::<Duration>()));
    /// ```
    pub fn register_type_trait<T: Typed, D: TypeTrait + FromType<T>>(&mut self) {
        self.register::<T>();
        if let Some(type_meta) = self.type_meta_table.get_mut(&TypeId::of::<T>()) {
            type_meta.insert_trait(D::from_type());
        }
    }

    /// Registers `S` as a concrete implementation of the abstract type `B`.
    ///
    /// Subtypes are kept in registration order in `B`'s
    /// [`TypeTraitSubtypes`].
    pub fn register_subtype<B, S>(&mut self, upcast: fn(S) -> B)
    where
        B: Typed + Send,
        S: Typed + Send,
    {
        self.register::<B>();
        self.register::<S>();
        if let Some(type_meta) = self.type_meta_table.get_mut(&TypeId::of::<B>()) {
            let subtypes = type_meta.get_or_insert_trait(TypeTraitSubtypes::default);
            let name = S::type_info().name();
            if subtypes.find(name).is_some() {
                log::warn!(
                    "`{}` already has a subtype named `{name}`; `{}` is shadowed",
                    B::type_info().type_path(),
                    S::type_info().type_path(),
                );
            }
            subtypes.push(Subtype::new(upcast));
        }
    }

    /// Whether the type with given [`TypeId`] has been registered.
    #[inline]
    pub fn contains(&self, type_id: TypeId) -> bool {
        self.type_meta_table.contains(&type_id)
    }

    #[inline]
    pub fn get(&self, type_id: TypeId) -> Option<&TypeMeta> {
        self.type_meta_table.get(&type_id)
    }

    /// Returns the [`TypeTrait`] `T` of the given type, if both exist.
    pub fn get_type_trait<T: TypeTrait>(&self, type_id: TypeId) -> Option<&T> {
        match self.get(type_id) {
            Some(type_meta) => type_meta.get_trait::<T>(),
            None => None,
        }
    }

    /// Returns an iterator over the registered [`TypeMeta`]s.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &TypeMeta> {
        self.type_meta_table.values()
    }
}

fn dependencies(info: &TypeInfo) -> Vec<TypeRef> {
    let mut deps: Vec<TypeRef> = info.generics().iter().map(TypeParamInfo::ty).collect();

    match info.kind() {
        TypeKind::Optional(option) => deps.push(option.inner()),
        TypeKind::Array(array) => deps.push(array.item()),
        TypeKind::Struct(shape) => deps.extend(shape.iter().map(NamedField::ty)),
        _ => {}
    }

    for facet in info.facets() {
        match facet {
            Facet::List(seq)
            | Facet::Collection(seq)
            | Facet::Queue(seq)
            | Facet::Stack(seq)
            | Facet::Sequence(seq) => deps.push(seq.item()),
            Facet::Map(map) => deps.extend([map.key(), map.value()]),
            Facet::Pair(pair) => deps.extend([pair.key(), pair.value()]),
            Facet::Constructor(_) => {}
        }
    }

    deps
}

// -----------------------------------------------------------------------------
// TypeRegistryArc

/// A shareable [`TypeRegistry`] behind a read-write lock.
#[derive(Clone, Default)]
pub struct TypeRegistryArc {
    pub internal: Arc<RwLock<TypeRegistry>>,
}

impl TypeRegistryArc {
    /// Takes a read lock on the underlying [`TypeRegistry`].
    pub fn read(&self) -> RwLockReadGuard<'_, TypeRegistry> {
        self.internal.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Takes a write lock on the underlying [`TypeRegistry`].
    pub fn write(&self) -> RwLockWriteGuard<'_, TypeRegistry> {
        self.internal
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl From<TypeRegistry> for TypeRegistryArc {
    fn from(registry: TypeRegistry) -> Self {
        Self {
            internal: Arc::new(RwLock::new(registry)),
        }
    }
}

impl fmt::Debug for TypeRegistryArc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registry = self.read();
        f.debug_set()
            .entries(registry.iter().map(|meta| meta.type_info().type_path()))
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Tests
