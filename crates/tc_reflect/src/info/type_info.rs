use alloc::boxed::Box;
use alloc::vec::Vec;
use core::any::Any;

use crate::info::{
    ArrayInfo, CtorInfo, EnumInfo, Generics, MapInfo, OptionInfo, PairInfo, SeqInfo, StructInfo,
    Type, short_type_name,
};

// -----------------------------------------------------------------------------
// Primitive

/// A built-in scalar type with a fast-path literal parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Bool,
    Char,
    I8,
    I16,
    I32,
    I64,
    I128,
    Isize,
    U8,
    U16,
    U32,
    U64,
    U128,
    Usize,
    F32,
    F64,
}

// -----------------------------------------------------------------------------
// TypeFlags

bitflags::bitflags! {
    /// Additional shape bits of a [`TypeInfo`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TypeFlags: u8 {
        /// Plain value type: copied by value, no identity, constructed from
        /// its literal text. Selects the value-type static factory
        /// convention.
        const VALUE_TYPE = 1 << 0;
    }
}

// -----------------------------------------------------------------------------
// TypeKind

/// The primary kind of a type.
///
/// A type has exactly one kind. Container capabilities are expressed
/// separately as [`Facet`]s, since a single type may offer several.
#[derive(Debug)]
pub enum TypeKind {
    Primitive(Primitive),
    String,
    /// Open object whose shape is only known from the input.
    Dynamic,
    Optional(OptionInfo),
    Enum(EnumInfo),
    Array(ArrayInfo),
    Struct(StructInfo),
    /// No shape known to the descriptor; parsed through registered traits
    /// or dedicated parsers.
    Opaque,
}

// -----------------------------------------------------------------------------
// Facet

/// A container capability of a type.
#[derive(Debug, Clone, Copy)]
pub enum Facet {
    /// Ordered, indexable, growable.
    List(SeqInfo),
    Map(MapInfo),
    /// Unordered or set-like bag of items.
    Collection(SeqInfo),
    /// First in, first out.
    Queue(SeqInfo),
    /// Last in, first out.
    Stack(SeqInfo),
    Pair(PairInfo),
    /// Anything that can be built from an iterator of items.
    Sequence(SeqInfo),
    /// Built positionally from its generic arguments.
    Constructor(CtorInfo),
}

// -----------------------------------------------------------------------------
// TypeInfo

/// The full compile-time descriptor of a type.
///
/// Obtained through [`Typed::type_info`](crate::info::Typed::type_info) and
/// stored statically, so `&'static TypeInfo` is the common currency.
///
/// # Examples
///
/// ```
/// use std::collections::VecDeque;
/// use tc_reflect::info::{Typed, TypeKind};
///
/// let info = <VecDeque<i32> as Typed>::type_info();
///
/// assert_eq!(info.name(), "VecDeque<i32>");
/// assert!(matches!(info.kind(), TypeKind::Opaque));
/// assert!(info.queue().is_some());
/// assert!(info.list().is_none());
/// ```
#[derive(Debug)]
pub struct TypeInfo {
    ty: Type,
    name: Box<str>,
    generics: Generics,
    flags: TypeFlags,
    kind: TypeKind,
    facets: Vec<Facet>,
}

macro_rules! impl_facet_method {
    ($name:ident : $facet:ident => $info:ident) => {
        #[doc = concat!("Returns the first [`Facet::", stringify!($facet), "`] capability, if any.")]
        pub fn $name(&self) -> Option<&$info> {
            self.facets.iter().find_map(|facet| match facet {
                Facet::$facet(info) => Some(info),
                _ => None,
            })
        }
    };
}

macro_rules! impl_kind_method {
    ($name:ident : $kind:ident => $info:ident) => {
        #[doc = concat!("Returns the [`TypeKind::", stringify!($kind), "`] descriptor, if this is one.")]
        #[inline]
        pub const fn $name(&self) -> Option<&$info> {
            match &self.kind {
                TypeKind::$kind(info) => Some(info),
                _ => None,
            }
        }
    };
}

impl TypeInfo {
    /// Creates a descriptor for `T` with the given kind and no facets.
    pub fn new<T: Any + ?Sized>(kind: TypeKind) -> Self {
        let ty = Type::of::<T>();
        Self {
            name: short_type_name(ty.path()).into_boxed_str(),
            ty,
            generics: Generics::new(),
            flags: TypeFlags::empty(),
            kind,
            facets: Vec::new(),
        }
    }

    /// Creates a primitive descriptor; primitives are value types.
    #[inline]
    pub fn primitive<T: Any>(primitive: Primitive) -> Self {
        Self::new::<T>(TypeKind::Primitive(primitive)).with_flags(TypeFlags::VALUE_TYPE)
    }

    #[inline]
    pub fn opaque<T: Any + ?Sized>() -> Self {
        Self::new::<T>(TypeKind::Opaque)
    }

    #[inline]
    pub fn enumeration<T: Any>(info: EnumInfo) -> Self {
        Self::new::<T>(TypeKind::Enum(info)).with_flags(TypeFlags::VALUE_TYPE)
    }

    #[inline]
    pub fn structure<T: Any>(info: StructInfo) -> Self {
        Self::new::<T>(TypeKind::Struct(info))
    }

    /// Replaces the generic argument list.
    #[inline]
    pub fn with_generics(mut self, generics: impl Into<Generics>) -> Self {
        self.generics = generics.into();
        self
    }

    /// Adds flags.
    #[inline]
    pub fn with_flags(mut self, flags: TypeFlags) -> Self {
        self.flags |= flags;
        self
    }

    /// Appends a capability. Order of facets is preserved.
    #[inline]
    pub fn with_facet(mut self, facet: Facet) -> Self {
        self.facets.push(facet);
        self
    }

    impl_kind_method!(as_optional: Optional => OptionInfo);
    impl_kind_method!(as_enum: Enum => EnumInfo);
    impl_kind_method!(as_array: Array => ArrayInfo);
    impl_kind_method!(as_struct: Struct => StructInfo);

    impl_facet_method!(list: List => SeqInfo);
    impl_facet_method!(map: Map => MapInfo);
    impl_facet_method!(collection: Collection => SeqInfo);
    impl_facet_method!(queue: Queue => SeqInfo);
    impl_facet_method!(stack: Stack => SeqInfo);
    impl_facet_method!(pair: Pair => PairInfo);
    impl_facet_method!(sequence: Sequence => SeqInfo);
    impl_facet_method!(constructor: Constructor => CtorInfo);

    /// Returns the type identity.
    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    /// Returns the short name used in error messages, e.g. `Vec<String>`.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the full type path.
    #[inline]
    pub const fn type_path(&self) -> &'static str {
        self.ty.path()
    }

    #[inline]
    pub const fn generics(&self) -> &Generics {
        &self.generics
    }

    #[inline]
    pub const fn flags(&self) -> TypeFlags {
        self.flags
    }

    #[inline]
    pub const fn kind(&self) -> &TypeKind {
        &self.kind
    }

    /// Returns all capabilities in declaration order.
    #[inline]
    pub fn facets(&self) -> &[Facet] {
        &self.facets
    }

    /// Returns `true` for value types.
    #[inline]
    pub const fn is_value_type(&self) -> bool {
        self.flags.contains(TypeFlags::VALUE_TYPE)
    }

    /// Returns `true` if the type declares any generic arguments.
    #[inline]
    pub fn is_generic(&self) -> bool {
        !self.generics.is_empty()
    }

    /// Check if this describes `T`.
    #[inline]
    pub fn is<T: Any + ?Sized>(&self) -> bool {
        self.ty.is::<T>()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::collections::{BTreeMap, VecDeque};
    use alloc::string::String;
    use alloc::vec::Vec;

    use crate::info::{Primitive, TypeFlags, TypeKind, Typed};

    #[test]
    fn primitives_are_value_types() {
        let info = <u32 as Typed>::type_info();
        assert!(matches!(info.kind(), TypeKind::Primitive(Primitive::U32)));
        assert!(info.flags().contains(TypeFlags::VALUE_TYPE));
        assert!(!info.is_generic());

        assert!(!<String as Typed>::type_info().is_value_type());
    }

    #[test]
    fn facet_lookup() {
        let info = <Vec<u8> as Typed>::type_info();
        assert!(info.list().is_some());
        assert!(info.collection().is_some());
        assert!(info.sequence().is_some());
        assert!(info.map().is_none());

        let info = <BTreeMap<String, u8> as Typed>::type_info();
        assert!(info.map().is_some());
        assert!(info.sequence().is_some());
        assert!(info.list().is_none());

        let info = <VecDeque<u8> as Typed>::type_info();
        assert!(info.queue().is_some());
        assert!(info.stack().is_none());
    }

    #[test]
    fn names() {
        assert_eq!(<Vec<String> as Typed>::type_info().name(), "Vec<String>");
        assert_eq!(<Option<u8> as Typed>::type_info().name(), "Option<u8>");
        assert_eq!(<[i16; 4] as Typed>::type_info().name(), "[i16; 4]");
    }
}
