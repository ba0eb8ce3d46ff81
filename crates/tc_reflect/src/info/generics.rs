use alloc::boxed::Box;
use alloc::vec::Vec;
use core::any::{Any, TypeId};
use core::fmt;

use crate::info::{TypeInfo, Typed};

// -----------------------------------------------------------------------------
// TypeRef

/// A reference to another type's [`TypeInfo`], resolved on first access.
///
/// Descriptors reference children through this so that recursive types
/// (`struct Node { children: Vec<Node> }`) can be described.
#[derive(Clone, Copy)]
pub struct TypeRef {
    type_id: TypeId,
    type_info: fn() -> &'static TypeInfo,
}

impl TypeRef {
    /// Creates a reference to `T`.
    #[inline]
    pub fn of<T: Typed>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_info: T::type_info,
        }
    }

    /// Returns the [`TypeId`] of the referenced type.
    #[inline(always)]
    pub const fn id(&self) -> TypeId {
        self.type_id
    }

    /// Check if the referenced type is `T`.
    #[inline]
    pub fn is<T: Any>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    /// Returns the referenced [`TypeInfo`].
    #[inline]
    pub fn info(&self) -> &'static TypeInfo {
        (self.type_info)()
    }
}

impl fmt::Debug for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.type_id, f)
    }
}

// -----------------------------------------------------------------------------
// TypeParamInfo

/// A declared generic type argument.
#[derive(Clone, Debug)]
pub struct TypeParamInfo {
    name: &'static str,
    ty: TypeRef,
}

impl TypeParamInfo {
    /// Creates a new [`TypeParamInfo`] for the argument `T`.
    #[inline]
    pub fn new<T: Typed>(name: &'static str) -> Self {
        Self {
            name,
            ty: TypeRef::of::<T>(),
        }
    }

    /// Returns the parameter name.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the argument type.
    #[inline]
    pub const fn ty(&self) -> TypeRef {
        self.ty
    }
}

// -----------------------------------------------------------------------------
// Generics

/// The generic type arguments of an instantiated type, in declaration order.
///
/// # Examples
///
/// ```
/// use tc_reflect::info::Typed;
///
/// let generics = <Vec<u8> as Typed>::type_info().generics();
/// assert_eq!(generics.len(), 1);
/// assert!(generics.get("T").unwrap().ty().is::<u8>());
/// ```
#[derive(Clone, Debug, Default)]
pub struct Generics(Box<[TypeParamInfo]>);

impl Generics {
    /// Creates an empty list.
    #[inline]
    pub fn new() -> Self {
        Self(Box::new([]))
    }

    /// Returns the parameter with the given name.
    pub fn get(&self, name: &str) -> Option<&TypeParamInfo> {
        self.0.iter().find(|param| param.name == name)
    }

    /// Returns the parameter at `index`.
    #[inline]
    pub fn get_at(&self, index: usize) -> Option<&TypeParamInfo> {
        self.0.get(index)
    }

    /// Returns an iterator over the parameters in declaration order.
    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &TypeParamInfo> {
        self.0.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<TypeParamInfo>> for Generics {
    #[inline]
    fn from(params: Vec<TypeParamInfo>) -> Self {
        Self(params.into_boxed_slice())
    }
}

impl<const N: usize> From<[TypeParamInfo; N]> for Generics {
    #[inline]
    fn from(params: [TypeParamInfo; N]) -> Self {
        Self(Box::new(params))
    }
}
