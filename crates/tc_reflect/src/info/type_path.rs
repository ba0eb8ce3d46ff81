use alloc::string::String;
use core::any::{Any, TypeId, type_name};
use core::fmt;
use core::hash::{Hash, Hasher};

// -----------------------------------------------------------------------------
// Type

/// The identity of a Rust type: its [`TypeId`] and compiler type path.
///
/// Equality and hashing only consider the [`TypeId`].
///
/// # Examples
///
/// ```
/// # use core::any::TypeId;
/// use tc_reflect::info::Type;
///
/// let ty = Type::of::<String>();
///
/// assert!(ty.is::<String>());
/// assert_eq!(ty.id(), TypeId::of::<String>());
/// assert_eq!(ty.path(), "alloc::string::String");
/// ```
#[derive(Copy, Clone)]
pub struct Type {
    type_id: TypeId,
    type_path: &'static str,
}

impl Type {
    /// Creates a new [`Type`] for `T`.
    #[inline]
    pub fn of<T: Any + ?Sized>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_path: type_name::<T>(),
        }
    }

    /// Returns the [`TypeId`] of the type.
    #[inline(always)]
    pub const fn id(&self) -> TypeId {
        self.type_id
    }

    /// Returns the compiler's path of the type, e.g. `alloc::vec::Vec<i32>`.
    ///
    /// This is [`core::any::type_name`] and only meant for diagnostics.
    #[inline(always)]
    pub const fn path(&self) -> &'static str {
        self.type_path
    }

    /// Check if the given type matches this one.
    #[inline(always)]
    pub fn is<T: Any + ?Sized>(&self) -> bool {
        TypeId::of::<T>() == self.type_id
    }
}

impl PartialEq for Type {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for Type {}

impl Hash for Type {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_path)
    }
}

// -----------------------------------------------------------------------------
// Short names

/// Strips module paths from every segment of a type path.
///
/// # Examples
///
/// ```
/// use tc_reflect::info::short_type_name;
///
/// assert_eq!(
///     short_type_name("alloc::vec::Vec<std::collections::hash::map::HashMap<alloc::string::String, i32>>"),
///     "Vec<HashMap<String, i32>>",
/// );
/// assert_eq!(short_type_name("(u8, core::time::Duration)"), "(u8, Duration)");
/// ```
pub fn short_type_name(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut segment_start = 0;
    let mut chars = path.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            ':' if chars.peek() == Some(&':') => {
                chars.next();
                out.truncate(segment_start);
            }
            '<' | '>' | ',' | ' ' | '(' | ')' | '[' | ']' | ';' | '&' | '*' => {
                out.push(c);
                segment_start = out.len();
            }
            _ => out.push(c),
        }
    }

    out
}

// -----------------------------------------------------------------------------
// Tests
