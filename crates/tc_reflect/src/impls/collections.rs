use alloc::boxed::Box;
use alloc::collections::{BTreeMap, BTreeSet, BinaryHeap, LinkedList, VecDeque};
use alloc::vec::Vec;
use core::hash::{BuildHasher, Hash};
use std::collections::{HashMap, HashSet};

use crate::impls::GenericTypeInfoCell;
use crate::info::{ArrayInfo, MapInfo, OptionInfo, SeqInfo, TypeInfo, TypeKind, Typed};
use crate::info::{Facet, TypeFlags, TypeParamInfo};

// -----------------------------------------------------------------------------
// Option

impl<T: Typed + Send> Typed for Option<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| {
            TypeInfo::new::<Self>(TypeKind::Optional(OptionInfo::new::<T>()))
                .with_flags(TypeFlags::VALUE_TYPE)
                .with_generics([TypeParamInfo::new::<T>("T")])
        })
    }
}

// -----------------------------------------------------------------------------
// Sequences

macro_rules! impl_sequence {
    ($ty:ident <T $(: $bound:path)?> => [$($facet:ident),+]) => {
        impl<T: Typed + Send $(+ $bound)?> Typed for $ty<T> {
            fn type_info() -> &'static TypeInfo {
                static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
                CELL.get_or_insert::<Self>(|| {
                    let seq = SeqInfo::new::<Self, T>();
                    TypeInfo::opaque::<Self>()
                        .with_generics([TypeParamInfo::new::<T>("T")])
                        $(.with_facet(Facet::$facet(seq)))+
                })
            }
        }
    };
}

impl_sequence!(Vec<T> => [List, Collection, Sequence]);
impl_sequence!(VecDeque<T> => [Queue, Sequence]);
impl_sequence!(LinkedList<T> => [Collection, Sequence]);
impl_sequence!(BTreeSet<T: Ord> => [Collection, Sequence]);
impl_sequence!(BinaryHeap<T: Ord> => [Sequence]);

impl<T, S> Typed for HashSet<T, S>
where
    T: Typed + Send + Eq + Hash,
    S: BuildHasher + Default + Send + 'static,
{
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| {
            let seq = SeqInfo::new::<Self, T>();
            TypeInfo::opaque::<Self>()
                .with_generics([TypeParamInfo::new::<T>("T")])
                .with_facet(Facet::Collection(seq))
                .with_facet(Facet::Sequence(seq))
        })
    }
}

// -----------------------------------------------------------------------------
// Maps

impl<K, V, S> Typed for HashMap<K, V, S>
where
    K: Typed + Send + Eq + Hash,
    V: Typed + Send,
    S: BuildHasher + Default + Send + 'static,
{
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| {
            TypeInfo::opaque::<Self>()
                .with_generics([TypeParamInfo::new::<K>("K"), TypeParamInfo::new::<V>("V")])
                .with_facet(Facet::Map(MapInfo::new::<Self, K, V>()))
                .with_facet(Facet::Sequence(SeqInfo::new::<Self, (K, V)>()))
        })
    }
}

impl<K, V> Typed for BTreeMap<K, V>
where
    K: Typed + Send + Ord,
    V: Typed + Send,
{
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| {
            TypeInfo::opaque::<Self>()
                .with_generics([TypeParamInfo::new::<K>("K"), TypeParamInfo::new::<V>("V")])
                .with_facet(Facet::Map(MapInfo::new::<Self, K, V>()))
                .with_facet(Facet::Sequence(SeqInfo::new::<Self, (K, V)>()))
        })
    }
}

// -----------------------------------------------------------------------------
// Arrays

impl<T: Typed + Send, const N: usize> Typed for [T; N] {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| {
            let array = ArrayInfo::fixed::<T, N>();
            TypeInfo::new::<Self>(TypeKind::Array(array))
                .with_generics([TypeParamInfo::new::<T>("T")])
                .with_facet(Facet::List(SeqInfo::with_builder::<T>(array.builder())))
        })
    }
}

impl<T: Typed + Send> Typed for Box<[T]> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| {
            let array = ArrayInfo::boxed::<T>();
            TypeInfo::new::<Self>(TypeKind::Array(array))
                .with_generics([TypeParamInfo::new::<T>("T")])
                .with_facet(Facet::Sequence(SeqInfo::with_builder::<T>(array.builder())))
        })
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::collections::{BTreeMap, VecDeque};
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;

    use crate::AnyValue;
    use crate::info::{TypeFlags, TypeKind, Typed};

    #[test]
    fn option_is_optional() {
        let info = <Option<String> as Typed>::type_info();
        let option = info.as_optional().unwrap();
        assert!(option.inner().is::<String>());
        assert!(info.flags().contains(TypeFlags::VALUE_TYPE));
    }

    #[test]
    fn generic_cells_are_per_instantiation() {
        let a = <Vec<u8> as Typed>::type_info();
        let b = <Vec<u16> as Typed>::type_info();
        assert!(!core::ptr::eq(a, b));
        assert!(core::ptr::eq(a, <Vec<u8> as Typed>::type_info()));
        assert!(a.list().unwrap().item().is::<u8>());
        assert!(b.list().unwrap().item().is::<u16>());
    }

    #[test]
    fn queue_keeps_order() {
        let info = <VecDeque<i32> as Typed>::type_info().queue().unwrap();
        let items: Vec<AnyValue> = vec![Box::new(1_i32), Box::new(2_i32), Box::new(3_i32)];
        let queue = info.build(items).unwrap().downcast::<VecDeque<i32>>().unwrap();
        assert_eq!(queue.front(), Some(&1));
        assert_eq!(queue.back(), Some(&3));
    }

    #[test]
    fn map_builds() {
        let info = <BTreeMap<String, i32> as Typed>::type_info().map().unwrap();
        let entries: Vec<(AnyValue, AnyValue)> = vec![
            (Box::new(String::from("a")), Box::new(1_i32)),
            (Box::new(String::from("b")), Box::new(2_i32)),
        ];
        let map = info.build(entries).unwrap().downcast::<BTreeMap<String, i32>>().unwrap();
        assert_eq!(map.get("b"), Some(&2));
    }

    #[test]
    fn fixed_array_checks_length() {
        let info = <[u8; 2] as Typed>::type_info();
        assert!(matches!(info.kind(), TypeKind::Array(_)));

        let array = info.as_array().unwrap();
        let ok: Vec<AnyValue> = vec![Box::new(1_u8), Box::new(2_u8)];
        assert_eq!(*array.build(ok).unwrap().downcast::<[u8; 2]>().unwrap(), [1, 2]);

        let short: Vec<AnyValue> = vec![Box::new(1_u8)];
        assert!(array.build(short).is_err());
    }

    #[test]
    fn boxed_slice_infers_length() {
        let array = <Box<[u8]> as Typed>::type_info().as_array().unwrap();
        let items: Vec<AnyValue> = vec![Box::new(4_u8), Box::new(5_u8), Box::new(6_u8)];
        let built = array.build(items).unwrap().downcast::<Box<[u8]>>().unwrap();
        assert_eq!(&**built, &[4, 5, 6]);
    }
}
