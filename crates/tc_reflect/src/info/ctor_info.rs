use alloc::vec::Vec;
use core::fmt;

use crate::{AnyValue, BuildError};

/// A positional constructor over a type's generic arguments.
///
/// The arguments are the type's [`Generics`](crate::info::Generics) in
/// declaration order; parameter names double as member names when the
/// arguments are given as an object.
#[derive(Clone, Copy)]
pub struct CtorInfo {
    build: fn(Vec<AnyValue>) -> Result<AnyValue, BuildError>,
}

impl CtorInfo {
    #[inline]
    pub const fn new(build: fn(Vec<AnyValue>) -> Result<AnyValue, BuildError>) -> Self {
        Self { build }
    }

    /// Invokes the constructor with one value per generic argument.
    #[inline]
    pub fn build(&self, args: Vec<AnyValue>) -> Result<AnyValue, BuildError> {
        (self.build)(args)
    }
}

impl fmt::Debug for CtorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CtorInfo").finish_non_exhaustive()
    }
}
