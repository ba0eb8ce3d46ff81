//! Runtime type registry, for capabilities that cannot be expressed in a
//! static [`TypeInfo`].
//!
//! ## Menu
//!
//! - [`TypeTrait`]: a capability supported by a type.
//! - [`FromType`]: creates a `TypeTrait` for a concrete type.
//! - [`TypeMeta`]: a [`TypeInfo`] plus a [`TypeTrait`] table.
//! - [`TypeRegistry`]: the store of `TypeMeta`s, indexed by id, path and name.
//! - TypeTraits:
//!     - [`TypeTraitFromStr`]: static factory of value types ([`FromStr`]).
//!     - [`TypeTraitParseWith`]: static factory of reference types, receiving
//!       the format's unescape function ([`ParseWith`]).
//!     - [`TypeTraitFromString`]: single string-argument constructor.
//!     - [`TypeTraitSubtypes`]: registered concrete implementations of an
//!       abstract type.
//!
//! [`TypeInfo`]: crate::info::TypeInfo
//! [`FromStr`]: core::str::FromStr

// -----------------------------------------------------------------------------
// Modules

mod from_type;
mod traits;
mod type_meta;
mod type_registry;
mod type_trait;

// -----------------------------------------------------------------------------
// Exports

pub use from_type::FromType;
pub use traits::{FactoryError, ParseWith, Subtype, Unescape};
pub use traits::{TypeTraitFromStr, TypeTraitFromString, TypeTraitParseWith, TypeTraitSubtypes};
pub use type_meta::TypeMeta;
pub use type_registry::{TypeRegistry, TypeRegistryArc};
pub use type_trait::TypeTrait;
