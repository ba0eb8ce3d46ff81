use alloc::boxed::Box;
use alloc::sync::Arc;
use core::any::{Any, type_name};
use core::fmt;

use tc_utils::hash::HashMap;

use crate::info::{TypeRef, Typed};
use crate::{AnyValue, BuildError, downcast};

type Setter = dyn Fn(&mut (dyn Any + Send), AnyValue) -> Result<(), BuildError> + Send + Sync;

// -----------------------------------------------------------------------------
// NamedField

/// A settable named member of a struct.
#[derive(Clone)]
pub struct NamedField {
    name: &'static str,
    ty: TypeRef,
    set: Arc<Setter>,
}

impl NamedField {
    /// Creates a field of type `F` on struct `S`, assigned through `setter`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tc_reflect::info::NamedField;
    ///
    /// #[derive(Default)]
    /// struct User { id: u32 }
    ///
    /// let field = NamedField::new::<User, u32>("id", |user, id| user.id = id);
    /// assert_eq!(field.name(), "id");
    /// assert!(field.ty().is::<u32>());
    /// ```
    pub fn new<S, F>(name: &'static str, setter: fn(&mut S, F)) -> Self
    where
        S: Any + Send,
        F: Typed + Send,
    {
        Self {
            name,
            ty: TypeRef::of::<F>(),
            set: Arc::new(
                move |target: &mut (dyn Any + Send), value: AnyValue| -> Result<(), BuildError> {
                    let target = target.downcast_mut::<S>().ok_or(BuildError::Downcast {
                        expected: type_name::<S>(),
                    })?;
                    setter(target, downcast::<F>(value)?);
                    Ok(())
                },
            ),
        }
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the member type.
    #[inline]
    pub const fn ty(&self) -> TypeRef {
        self.ty
    }

    /// Assigns `value` to this member of `target`.
    #[inline]
    pub fn set(&self, target: &mut (dyn Any + Send), value: AnyValue) -> Result<(), BuildError> {
        (self.set)(target, value)
    }
}

impl fmt::Debug for NamedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NamedField")
            .field("name", &self.name)
            .field("ty", &self.ty)
            .finish()
    }
}

// -----------------------------------------------------------------------------
// StructInfo

/// The settable members of a struct and how to create an empty instance.
///
/// A struct without a constructor still has a shape, but cannot be
/// populated member by member.
#[derive(Clone)]
pub struct StructInfo {
    construct: Option<fn() -> AnyValue>,
    fields: Box<[NamedField]>,
    by_name: HashMap<&'static str, usize>,
}

impl StructInfo {
    /// Creates a shape whose instances start from [`Default`].
    pub fn new<S: Default + Send + 'static>(fields: impl Into<Box<[NamedField]>>) -> Self {
        let mut info = Self::without_constructor(fields);
        info.construct = Some(|| -> AnyValue { Box::new(S::default()) });
        info
    }

    /// Creates a shape with no way to build an empty instance.
    pub fn without_constructor(fields: impl Into<Box<[NamedField]>>) -> Self {
        let fields: Box<[NamedField]> = fields.into();
        let by_name = fields
            .iter()
            .enumerate()
            .map(|(index, field)| (field.name, index))
            .collect();
        Self {
            construct: None,
            fields,
            by_name,
        }
    }

    /// Returns a fresh instance to populate, if the type has a constructor.
    #[inline]
    pub fn construct(&self) -> Option<AnyValue> {
        self.construct.map(|construct| construct())
    }

    #[inline]
    pub fn has_constructor(&self) -> bool {
        self.construct.is_some()
    }

    /// Returns the field with exactly this name.
    pub fn field(&self, name: &str) -> Option<&NamedField> {
        self.by_name.get(name).map(|&index| &self.fields[index])
    }

    /// Returns the field with this name, preferring an exact match and then
    /// ignoring ASCII case.
    pub fn field_ignore_case(&self, name: &str) -> Option<&NamedField> {
        self.field(name).or_else(|| {
            self.fields
                .iter()
                .find(|field| field.name.eq_ignore_ascii_case(name))
        })
    }

    /// Returns the fields in declaration order.
    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &NamedField> {
        self.fields.iter()
    }

    /// Returns the number of fields.
    #[inline]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl fmt::Debug for StructInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StructInfo")
            .field("constructor", &self.construct.is_some())
            .field("fields", &self.fields)
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::string::String;

    use super::{NamedField, StructInfo};

    #[derive(Default, Debug, PartialEq)]
    struct User {
        id: u32,
        name: String,
    }

    fn user_info() -> StructInfo {
        StructInfo::new::<User>([
            NamedField::new::<User, u32>("id", |u, v| u.id = v),
            NamedField::new::<User, String>("name", |u, v| u.name = v),
        ])
    }

    #[test]
    fn populate() {
        let info = user_info();
        let mut user = info.construct().unwrap();

        info.field("id").unwrap().set(&mut *user, Box::new(7_u32)).unwrap();
        info.field_ignore_case("NAME")
            .unwrap()
            .set(&mut *user, Box::new(String::from("ann")))
            .unwrap();

        let user = user.downcast::<User>().unwrap();
        assert_eq!(*user, User { id: 7, name: "ann".into() });
    }

    #[test]
    fn wrong_member_type() {
        let info = user_info();
        let mut user = info.construct().unwrap();
        assert!(info.field("id").unwrap().set(&mut *user, Box::new("7")).is_err());
    }

    #[test]
    fn no_constructor() {
        let info = StructInfo::without_constructor([NamedField::new::<User, u32>("id", |u, v| {
            u.id = v;
        })]);
        assert!(!info.has_constructor());
        assert!(info.construct().is_none());
        assert_eq!(info.len(), 1);
    }
}
