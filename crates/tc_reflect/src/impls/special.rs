use core::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use core::num::{NonZeroI8, NonZeroI16, NonZeroI32, NonZeroI64, NonZeroI128, NonZeroIsize};
use core::num::{NonZeroU8, NonZeroU16, NonZeroU32, NonZeroU64, NonZeroU128, NonZeroUsize};
use core::time::Duration;
use std::ffi::OsString;
use std::path::PathBuf;
use std::time::SystemTime;

use crate::impls::NonGenericTypeInfoCell;
use crate::info::{TypeFlags, TypeInfo, Typed};

macro_rules! impl_opaque {
    (value: $($ty:ty),* $(,)?) => {$(
        impl Typed for $ty {
            fn type_info() -> &'static TypeInfo {
                static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
                CELL.get_or_init(|| TypeInfo::opaque::<$ty>().with_flags(TypeFlags::VALUE_TYPE))
            }
        }
    )*};
    (reference: $($ty:ty),* $(,)?) => {$(
        impl Typed for $ty {
            fn type_info() -> &'static TypeInfo {
                static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
                CELL.get_or_init(|| TypeInfo::opaque::<$ty>())
            }
        }
    )*};
}

impl_opaque!(value: Duration, SystemTime, IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr);
impl_opaque!(
    value: NonZeroI8, NonZeroI16, NonZeroI32, NonZeroI64, NonZeroI128, NonZeroIsize,
    NonZeroU8, NonZeroU16, NonZeroU32, NonZeroU64, NonZeroU128, NonZeroUsize,
);
impl_opaque!(reference: PathBuf, OsString);
