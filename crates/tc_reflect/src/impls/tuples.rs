use alloc::boxed::Box;

use crate::impls::GenericTypeInfoCell;
use crate::info::{CtorInfo, Facet, PairInfo, TypeFlags, TypeInfo, TypeParamInfo, Typed};
use crate::{BuildError, downcast};

// Parameters are named by position: "0", "1", ...
macro_rules! impl_tuple {
    ($len:literal: $($name:ident . $index:tt),+ $(; $extra:expr)?) => {
        impl<$($name: Typed + Send),+> Typed for ($($name,)+) {
            fn type_info() -> &'static TypeInfo {
                static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
                CELL.get_or_insert::<Self>(|| {
                    TypeInfo::opaque::<Self>()
                        .with_flags(TypeFlags::VALUE_TYPE)
                        .with_generics([$(TypeParamInfo::new::<$name>(stringify!($index))),+])
                        $(.with_facet($extra))?
                        .with_facet(Facet::Constructor(CtorInfo::new(|args| {
                            let found = args.len();
                            if found != $len {
                                return Err(BuildError::Length { expected: $len, found });
                            }
                            let mut args = args.into_iter();
                            Ok(Box::new(($(
                                downcast::<$name>(
                                    args.next().ok_or(BuildError::Length { expected: $len, found })?,
                                )?,
                            )+)))
                        })))
                })
            }
        }
    };
}

impl_tuple!(2: A.0, B.1; Facet::Pair(PairInfo::new::<(A, B), A, B>()));
impl_tuple!(3: A.0, B.1, C.2);
impl_tuple!(4: A.0, B.1, C.2, D.3);
