//! [`Typed`](crate::info::Typed) implementations for standard types, and the
//! cells used to write them.
//!
//! ## Implemented Menu
//!
//! - scalars: `bool`, `char`, `i8`-`i128`, `isize`, `u8`-`u128`, `usize`,
//!   `f32`, `f64`, `String`
//! - `Option<T>`
//! - sequences: `Vec<T>`, `VecDeque<T>`, `LinkedList<T>`, `BinaryHeap<T>`,
//!   `HashSet<T>`, `BTreeSet<T>`, `[T; N]`, `Box<[T]>`
//! - maps: `HashMap<K, V>`, `BTreeMap<K, V>`
//! - tuples of arity 2 to 4
//! - value types with dedicated parsers: `Duration`, `IpAddr`, `Ipv4Addr`,
//!   `Ipv6Addr`, `SocketAddr`, `SystemTime`, `NonZero` integers
//! - platform types: `PathBuf`, `OsString`

// -----------------------------------------------------------------------------
// Modules

mod cell;
mod collections;
mod primitives;
mod special;
mod tuples;

// -----------------------------------------------------------------------------
// Exports

pub use cell::{GenericTypeInfoCell, NonGenericTypeInfoCell};
