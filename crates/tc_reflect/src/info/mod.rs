//! Compile-time type descriptors.
//!
//! ## Menu
//!
//! - [`Type`]: a [`TypeId`] plus the compiler's type path.
//! - [`TypeRef`]: a lazily resolved reference to another type's [`TypeInfo`].
//! - [`Generics`]: the declared type arguments, each a [`TypeParamInfo`].
//! - [`TypeInfo`]: the full descriptor of a type:
//!     - [`TypeKind`]: the primary kind, one of primitive, string, dynamic,
//!       optional ([`OptionInfo`]), enum ([`EnumInfo`]), array ([`ArrayInfo`]),
//!       struct ([`StructInfo`]) or opaque.
//!     - [`Facet`]: container capabilities in declaration order, carrying
//!       [`SeqInfo`], [`MapInfo`], [`PairInfo`] or [`CtorInfo`].
//!     - [`TypeFlags`]: value-type marker.
//! - [`Typed`]: static accessor for a type's [`TypeInfo`].
//!
//! Child types are always referenced through function pointers, so building
//! a descriptor never recurses into the descriptors of its children.
//!
//! [`TypeId`]: core::any::TypeId

// -----------------------------------------------------------------------------
// Modules

mod array_info;
mod ctor_info;
mod enum_info;
mod generics;
mod map_info;
mod option_info;
mod seq_info;
mod struct_info;
mod type_info;
mod type_path;
mod typed;

// -----------------------------------------------------------------------------
// Exports

pub use array_info::ArrayInfo;
pub use ctor_info::CtorInfo;
pub use enum_info::{EnumInfo, VariantInfo};
pub use generics::{Generics, TypeParamInfo, TypeRef};
pub use map_info::{MapInfo, PairInfo};
pub use option_info::OptionInfo;
pub use seq_info::SeqInfo;
pub use struct_info::{NamedField, StructInfo};
pub use type_info::{Facet, Primitive, TypeFlags, TypeInfo, TypeKind};
pub use type_path::{Type, short_type_name};
pub use typed::Typed;
