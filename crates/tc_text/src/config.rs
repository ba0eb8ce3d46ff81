//! Reader configuration.
//!
//! A [`ReaderConfig`] is assembled with builder methods and moved into a
//! [`TextReader`](crate::reader::TextReader), after which it is read-only.

use alloc::boxed::Box;
use alloc::sync::Arc;
use core::any::TypeId;
use core::error::Error;
use core::fmt;
use core::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use core::num::{NonZeroI8, NonZeroI16, NonZeroI32, NonZeroI64, NonZeroI128, NonZeroIsize};
use core::num::{NonZeroU8, NonZeroU16, NonZeroU32, NonZeroU64, NonZeroU128, NonZeroUsize};
use core::str::FromStr;

use tc_reflect::info::Typed;
use tc_reflect::registry::{TypeRegistry, TypeRegistryArc};
use tc_reflect::{AnyValue, downcast};
use tc_utils::TypeIdMap;

use crate::ParseError;
use crate::format::TextFormat;
use crate::platform::{PlatformParsers, StdPlatform};
use crate::special::{from_str_literal, parse_duration};

/// A parser of a single scalar token, erased over its output type.
pub type ScalarFn = Arc<dyn Fn(&str) -> Result<AnyValue, ParseError> + Send + Sync>;

/// A post-processing hook, erased over its value type.
pub type PostProcess = Arc<dyn Fn(AnyValue) -> Result<AnyValue, ParseError> + Send + Sync>;

/// How deep values may nest unless configured otherwise.
pub const DEFAULT_MAX_DEPTH: usize = 128;

// -----------------------------------------------------------------------------
// ReaderConfig

/// Per-type overrides and collaborators of a reader.
///
/// # Examples
///
/// ```
/// use tc_text::ParseError;
/// use tc_text::config::ReaderConfig;
/// use tc_text::format::Json;
/// use tc_text::reader::TextReader;
///
/// let config = ReaderConfig::<Json>::new()
///     .custom_parser::<u8>(|token| match token.trim() {
///         "max" => Ok(u8::MAX),
///         other => other.parse().map_err(|_| ParseError::primitive("u8", other, None)),
///     })
///     .on_deserialized::<String>(|text| text.to_uppercase());
/// let reader = TextReader::new(config);
///
/// assert_eq!(reader.parse::<Vec<u8>>("[1,max]").unwrap(), [1, 255]);
/// assert_eq!(reader.parse::<String>("\"abc\"").unwrap(), "ABC");
/// ```
pub struct ReaderConfig<F: TextFormat> {
    custom: TypeIdMap<ScalarFn>,
    special: TypeIdMap<ScalarFn>,
    hooks: TypeIdMap<PostProcess>,
    platform: Box<dyn PlatformParsers<F>>,
    registry: TypeRegistryArc,
    strict_members: bool,
    max_depth: usize,
}

impl<F: TextFormat> Default for ReaderConfig<F> {
    /// See [`ReaderConfig::new`].
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<F: TextFormat> ReaderConfig<F> {
    /// Creates a configuration with nothing registered: no special parsers,
    /// no platform parsers and an empty registry.
    pub fn empty() -> Self {
        Self {
            custom: TypeIdMap::new(),
            special: TypeIdMap::new(),
            hooks: TypeIdMap::new(),
            platform: Box::new(()),
            registry: TypeRegistryArc::from(TypeRegistry::empty()),
            strict_members: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Creates the default configuration.
    ///
    /// - Special parsers for `Duration`, IP and socket addresses and the
    ///   `NonZero` integers.
    /// - [`StdPlatform`] parsers.
    /// - A registry with the scalar types, see [`TypeRegistry::new`].
    pub fn new() -> Self {
        Self {
            platform: Box::new(StdPlatform),
            registry: TypeRegistryArc::from(TypeRegistry::new()),
            ..Self::empty()
        }
        .special_parser(parse_duration)
        .special_parser(from_str_literal::<IpAddr>)
        .special_parser(from_str_literal::<Ipv4Addr>)
        .special_parser(from_str_literal::<Ipv6Addr>)
        .special_parser(from_str_literal::<SocketAddr>)
        .nonzero::<NonZeroI8>()
        .nonzero::<NonZeroI16>()
        .nonzero::<NonZeroI32>()
        .nonzero::<NonZeroI64>()
        .nonzero::<NonZeroI128>()
        .nonzero::<NonZeroIsize>()
        .nonzero::<NonZeroU8>()
        .nonzero::<NonZeroU16>()
        .nonzero::<NonZeroU32>()
        .nonzero::<NonZeroU64>()
        .nonzero::<NonZeroU128>()
        .nonzero::<NonZeroUsize>()
    }

    #[inline]
    fn nonzero<T>(self) -> Self
    where
        T: Typed + FromStr + Send,
        T::Err: Error + Send + Sync + 'static,
    {
        self.special_parser(from_str_literal::<T>)
    }

    /// Overrides the parser of `T`. It receives the raw token.
    ///
    /// An override takes precedence over every other strategy.
    pub fn custom_parser<T: Typed + Send>(
        mut self,
        parse: impl Fn(&str) -> Result<T, ParseError> + Send + Sync + 'static,
    ) -> Self {
        self.custom.insert_type::<T>(erase(parse));
        self
    }

    /// Sets a dedicated parser for the scalar `T`. It receives the token
    /// with escapes resolved.
    ///
    /// Unlike [`custom_parser`](Self::custom_parser), enums, strings and
    /// dynamic values still take precedence.
    pub fn special_parser<T: Typed + Send>(
        mut self,
        parse: impl Fn(&str) -> Result<T, ParseError> + Send + Sync + 'static,
    ) -> Self {
        self.special.insert_type::<T>(erase(parse));
        self
    }

    /// Registers a hook applied to every freshly parsed `T`.
    pub fn on_deserialized<T: Typed + Send>(
        mut self,
        hook: impl Fn(T) -> T + Send + Sync + 'static,
    ) -> Self {
        let hook: PostProcess = Arc::new(move |value: AnyValue| -> Result<AnyValue, ParseError> {
            let value = downcast::<T>(value).map_err(|_| ParseError::TypeMismatch {
                expected: T::type_info().name().into(),
            })?;
            Ok(Box::new(hook(value)))
        });
        self.hooks.insert_type::<T>(hook);
        self
    }

    /// Replaces the platform parsers.
    pub fn platform(mut self, platform: impl PlatformParsers<F>) -> Self {
        self.platform = Box::new(platform);
        self
    }

    /// Replaces the type registry consulted for static factories, string
    /// constructors and subtypes.
    pub fn registry(mut self, registry: impl Into<TypeRegistryArc>) -> Self {
        self.registry = registry.into();
        self
    }

    /// Whether unknown members fail a structural parse instead of being
    /// skipped. Off by default.
    pub fn strict_members(mut self, strict: bool) -> Self {
        self.strict_members = strict;
        self
    }

    /// Sets how deep values may nest, [`DEFAULT_MAX_DEPTH`] by default.
    ///
    /// A top-level value is at depth `0`; each container element, member
    /// or wrapped value adds a level. Deeper values fail to parse.
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    // -------------------------------------------------------------------------
    // Accessors

    #[inline]
    pub fn custom_parser_of(&self, type_id: TypeId) -> Option<&ScalarFn> {
        self.custom.get(&type_id)
    }

    #[inline]
    pub fn special_parser_of(&self, type_id: TypeId) -> Option<&ScalarFn> {
        self.special.get(&type_id)
    }

    #[inline]
    pub fn hook_of(&self, type_id: TypeId) -> Option<&PostProcess> {
        self.hooks.get(&type_id)
    }

    #[inline]
    pub fn platform_parsers(&self) -> &dyn PlatformParsers<F> {
        &*self.platform
    }

    #[inline]
    pub fn type_registry(&self) -> &TypeRegistryArc {
        &self.registry
    }

    #[inline]
    pub fn is_strict_members(&self) -> bool {
        self.strict_members
    }

    #[inline]
    pub fn depth_limit(&self) -> usize {
        self.max_depth
    }
}

impl<F: TextFormat> fmt::Debug for ReaderConfig<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReaderConfig")
            .field("format", &F::NAME)
            .field("custom", &self.custom.len())
            .field("special", &self.special.len())
            .field("hooks", &self.hooks.len())
            .field("registry", &self.registry)
            .field("strict_members", &self.strict_members)
            .field("max_depth", &self.max_depth)
            .finish_non_exhaustive()
    }
}

fn erase<T: Send + 'static>(
    parse: impl Fn(&str) -> Result<T, ParseError> + Send + Sync + 'static,
) -> ScalarFn {
    Arc::new(move |token: &str| -> Result<AnyValue, ParseError> {
        Ok(Box::new(parse(token)?))
    })
}

// -----------------------------------------------------------------------------
// Tests
