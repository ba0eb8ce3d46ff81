//! Type-directed parsing.
//!
//! A [`TextReader`] turns a type descriptor into a conversion function by
//! walking a fixed precedence chain of strategies, see [`Strategy`]. The
//! chosen function is cached per type for the lifetime of the reader.
//!
//! Conversion functions receive a [`Scope`] when invoked and look up the
//! converters of nested types through it, so resolving a type never
//! resolves its elements, and recursive types need no special care. The
//! scope also counts how deep the current value is nested; conversions
//! nested deeper than [`ReaderConfig::max_depth`] fail instead of
//! exhausting the stack.
//!
//! # Examples
//!
//! ```
//! use std::collections::HashMap;
//! use tc_text::format::{Json, TextFormat};
//!
//! let reader = Json::reader();
//!
//! let rows: Vec<HashMap<String, i32>> = reader.parse(r#"[{"a":1},{"b":2,"c":3}]"#).unwrap();
//! assert_eq!(rows[1]["c"], 3);
//!
//! let parser = reader.get::<Option<u8>>();
//! assert_eq!(parser.parse("null").unwrap(), None);
//! assert_eq!(parser.parse("7").unwrap(), Some(7));
//! ```

// -----------------------------------------------------------------------------
// Modules

mod map;
mod object;
mod resolve;
mod scalar;
mod seq;

#[cfg(test)]
mod tests;

// -----------------------------------------------------------------------------
// Exports

pub use object::TYPE_KEY;

pub(crate) use scalar::unescape_text;

use alloc::sync::Arc;
use core::fmt;
use core::marker::PhantomData;
use std::sync::{PoisonError, RwLock};

use tc_reflect::info::{TypeInfo, Typed};
use tc_reflect::{AnyValue, downcast};
use tc_utils::{Publish, TypeIdMap};

use crate::ParseError;
use crate::config::{PostProcess, ReaderConfig};
use crate::format::TextFormat;

// -----------------------------------------------------------------------------
// ParseFn

/// A conversion function: reads a raw token into a value of a fixed type.
///
/// It receives the scope it runs in, for nested lookups.
pub type ParseFn<F> =
    Arc<dyn Fn(&Scope<'_, F>, &str) -> Result<AnyValue, ParseError> + Send + Sync>;

/// Wraps a closure into a [`ParseFn`].
///
/// Mostly useful to fix the closure's signature for type inference.
#[inline]
pub fn parse_fn<F, P>(parse: P) -> ParseFn<F>
where
    F: TextFormat,
    P: Fn(&Scope<'_, F>, &str) -> Result<AnyValue, ParseError> + Send + Sync + 'static,
{
    Arc::new(parse)
}

// -----------------------------------------------------------------------------
// Strategy

/// The strategies a type can resolve to, in precedence order.
///
/// Resolution stops at the first applicable strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// A parser registered with
    /// [`ReaderConfig::custom_parser`](crate::config::ReaderConfig::custom_parser).
    Custom,
    /// `Option<T>`: null tokens read as `None`, others through `T`.
    Optional,
    /// Member name, ignoring ASCII case, then member value.
    Enum,
    String,
    /// [`DynamicValue`](crate::DynamicValue), shaped by the token.
    Dynamic,
    /// A parser registered with
    /// [`ReaderConfig::special_parser`](crate::config::ReaderConfig::special_parser).
    Special,
    Array,
    Primitive,
    List,
    Map,
    Collection,
    Queue,
    Stack,
    Pair,
    Sequence,
    /// Built positionally from the generic arguments.
    Constructor,
    Platform,
    /// A map capability without generic arguments.
    UntypedMap,
    /// A sequence capability without generic arguments.
    UntypedSequence,
    /// A registered `FromStr` or `ParseWith` factory.
    StaticFactory,
    /// Member by member, through the struct descriptor.
    Structural,
    /// A registered `From<String>` constructor.
    StringConstructor,
    /// Nothing else applies: dispatches on the `__type` member to a
    /// registered subtype, or fails.
    Abstract,
}

// -----------------------------------------------------------------------------
// Resolved

/// A conversion function together with the strategy it implements.
pub struct Resolved<F: TextFormat> {
    strategy: Strategy,
    parse: ParseFn<F>,
}

impl<F: TextFormat> Resolved<F> {
    #[inline]
    pub(crate) fn new(strategy: Strategy, parse: ParseFn<F>) -> Self {
        Self { strategy, parse }
    }

    #[inline]
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Invokes the conversion function on a top-level token.
    #[inline]
    pub fn parse(&self, reader: &TextReader<F>, token: &str) -> Result<AnyValue, ParseError> {
        self.call(&Scope::new(reader, 0), token)
    }

    #[inline]
    fn call(&self, scope: &Scope<'_, F>, token: &str) -> Result<AnyValue, ParseError> {
        (self.parse)(scope, token)
    }

    /// Whether both are the very same function.
    #[inline]
    pub fn same_fn(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.parse, &other.parse)
    }
}

impl<F: TextFormat> Clone for Resolved<F> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            strategy: self.strategy,
            parse: Arc::clone(&self.parse),
        }
    }
}

impl<F: TextFormat> fmt::Debug for Resolved<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Resolved").field(&self.strategy).finish()
    }
}

// -----------------------------------------------------------------------------
// TextReader

/// Resolves, caches and runs conversion functions for the format `F`.
///
/// Readers are `Send + Sync`. Each format has a program-wide instance with
/// the default configuration, see [`TextFormat::reader`]; build another with
/// [`TextReader::new`] for a custom configuration.
pub struct TextReader<F: TextFormat> {
    config: ReaderConfig<F>,
    cache: RwLock<TypeIdMap<Resolved<F>>>,
}

impl<F: TextFormat> Default for TextReader<F> {
    #[inline]
    fn default() -> Self {
        Self::new(ReaderConfig::new())
    }
}

impl<F: TextFormat> TextReader<F> {
    pub fn new(config: ReaderConfig<F>) -> Self {
        Self {
            config,
            cache: RwLock::new(TypeIdMap::new()),
        }
    }

    #[inline]
    pub fn config(&self) -> &ReaderConfig<F> {
        &self.config
    }

    /// Returns the cached conversion function of a type, resolving and
    /// publishing it on first use.
    ///
    /// No lock is held while resolving. Threads racing on the same type may
    /// each resolve it, but only the first published function is kept and
    /// every caller receives that one.
    pub fn get_or_resolve(&self, info: &'static TypeInfo) -> Resolved<F> {
        let type_id = info.ty().id();

        let cached = self
            .cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .cloned();
        if let Some(resolved) = cached {
            log::trace!("cache hit for `{}`", info.name());
            return resolved;
        }

        let resolved = self.resolve(info);

        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        let (published, outcome) = cache.publish(type_id, resolved);
        if outcome == Publish::Existing {
            log::trace!("`{}` was resolved concurrently, keeping the first", info.name());
        }
        published.clone()
    }

    /// Returns the parser of a type for top-level tokens, with its
    /// post-processing hook applied.
    ///
    /// The hook wraps the cached function and is never cached itself.
    /// Nested lookups go through [`Scope::parser_of`].
    #[inline]
    pub fn parser_of(&self, info: &'static TypeInfo) -> ErasedParser<'_, F> {
        self.parser_at(info, 0)
    }

    fn parser_at(&self, info: &'static TypeInfo, depth: usize) -> ErasedParser<'_, F> {
        ErasedParser {
            reader: self,
            info,
            depth,
            core: self.get_or_resolve(info),
            hook: self.config.hook_of(info.ty().id()).cloned(),
        }
    }

    /// Returns the typed parser of `T`.
    #[inline]
    pub fn get<T: Typed>(&self) -> TypedParser<'_, F, T> {
        TypedParser {
            inner: self.parser_of(T::type_info()),
            _marker: PhantomData,
        }
    }

    /// Parses `text` as a `T`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tc_text::format::{Jsv, TextFormat};
    ///
    /// let pairs: Vec<(String, u8)> = Jsv::reader().parse("[[a,1],[b,2]]").unwrap();
    /// assert_eq!(pairs, [("a".into(), 1), ("b".into(), 2)]);
    /// ```
    #[inline]
    pub fn parse<T: Typed>(&self, text: &str) -> Result<T, ParseError> {
        self.get::<T>().parse(text)
    }

    /// Returns the strategy a type resolves to.
    #[inline]
    pub fn strategy_of(&self, info: &'static TypeInfo) -> Strategy {
        self.get_or_resolve(info).strategy()
    }

    /// Whether the type has a published conversion function.
    pub fn is_cached(&self, info: &TypeInfo) -> bool {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&info.ty().id())
    }

    /// Returns the number of published conversion functions.
    pub fn cached_len(&self) -> usize {
        self.cache.read().unwrap_or_else(PoisonError::into_inner).len()
    }
}

impl<F: TextFormat> fmt::Debug for TextReader<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextReader")
            .field("config", &self.config)
            .field("cached", &self.cached_len())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// ErasedParser

/// A type's conversion function bound to its reader, with the
/// post-processing hook applied.
pub struct ErasedParser<'r, F: TextFormat> {
    reader: &'r TextReader<F>,
    info: &'static TypeInfo,
    depth: usize,
    core: Resolved<F>,
    hook: Option<PostProcess>,
}

impl<F: TextFormat> ErasedParser<'_, F> {
    /// Parses a token.
    ///
    /// Fails with [`ParseError::Syntax`] if this parser sits deeper than
    /// the configured maximum depth.
    pub fn parse(&self, token: &str) -> Result<AnyValue, ParseError> {
        if self.depth > self.reader.config().depth_limit() {
            return Err(ParseError::syntax(F::NAME, token, DEPTH_EXCEEDED));
        }
        let value = self.core.call(&Scope::new(self.reader, self.depth), token)?;
        match &self.hook {
            Some(hook) => hook(value),
            None => Ok(value),
        }
    }

    #[inline]
    pub fn info(&self) -> &'static TypeInfo {
        self.info
    }

    #[inline]
    pub fn strategy(&self) -> Strategy {
        self.core.strategy()
    }

    /// Nesting depth of the values this parser reads; `0` at top level.
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Returns the cached function, without the hook.
    #[inline]
    pub fn core(&self) -> &Resolved<F> {
        &self.core
    }

    #[inline]
    pub fn has_hook(&self) -> bool {
        self.hook.is_some()
    }
}

impl<F: TextFormat> Clone for ErasedParser<'_, F> {
    fn clone(&self) -> Self {
        Self {
            reader: self.reader,
            info: self.info,
            depth: self.depth,
            core: self.core.clone(),
            hook: self.hook.clone(),
        }
    }
}

impl<F: TextFormat> fmt::Debug for ErasedParser<'_, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErasedParser")
            .field("type", &self.info.name())
            .field("strategy", &self.core.strategy())
            .field("depth", &self.depth)
            .field("hook", &self.hook.is_some())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Scope

pub(crate) const DEPTH_EXCEEDED: &str = "nesting exceeds the depth limit";

/// The reader as seen by a running conversion function, at the nesting
/// depth of the value being read.
pub struct Scope<'r, F: TextFormat> {
    reader: &'r TextReader<F>,
    depth: usize,
}

impl<'r, F: TextFormat> Scope<'r, F> {
    #[inline]
    fn new(reader: &'r TextReader<F>, depth: usize) -> Self {
        Self { reader, depth }
    }

    #[inline]
    pub fn config(&self) -> &'r ReaderConfig<F> {
        &self.reader.config
    }

    /// How many more levels may be nested below this one.
    #[inline]
    pub fn remaining_depth(&self) -> usize {
        self.config().depth_limit().saturating_sub(self.depth)
    }

    /// Returns the parser of a value nested one level below this scope.
    #[inline]
    pub fn parser_of(&self, info: &'static TypeInfo) -> ErasedParser<'r, F> {
        self.reader.parser_at(info, self.depth + 1)
    }
}

impl<F: TextFormat> fmt::Debug for Scope<'_, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scope").field("depth", &self.depth).finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// TypedParser

/// The parser of `T`, see [`TextReader::get`].
pub struct TypedParser<'r, F: TextFormat, T> {
    inner: ErasedParser<'r, F>,
    _marker: PhantomData<fn() -> T>,
}

impl<F: TextFormat, T: Typed> TypedParser<'_, F, T> {
    pub fn parse(&self, text: &str) -> Result<T, ParseError> {
        let value = self.inner.parse(text)?;
        downcast::<T>(value).map_err(|_| ParseError::TypeMismatch {
            expected: self.inner.info().name().into(),
        })
    }

    #[inline]
    pub fn strategy(&self) -> Strategy {
        self.inner.strategy()
    }

    #[inline]
    pub fn erased(&self) -> &ErasedParser<'_, F> {
        &self.inner
    }
}

impl<F: TextFormat, T> Clone for TypedParser<'_, F, T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            _marker: PhantomData,
        }
    }
}

impl<F: TextFormat, T> fmt::Debug for TypedParser<'_, F, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.inner.fmt(f)
    }
}
