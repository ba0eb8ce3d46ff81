use tc_reflect::info::{Facet, SeqInfo, TypeInfo, TypeKind};
use tc_reflect::registry::{
    TypeTraitFromStr, TypeTraitFromString, TypeTraitParseWith, TypeTraitSubtypes,
};

use super::{Resolved, Strategy, TextReader, map, object, scalar, seq};
use crate::format::TextFormat;

impl<F: TextFormat> TextReader<F> {
    /// Resolves the conversion function of a type, bypassing the cache.
    ///
    /// Resolution always succeeds. A type that fits no strategy gets the
    /// [`Strategy::Abstract`] fallback, which fails when invoked unless a
    /// subtype applies.
    pub fn resolve(&self, info: &'static TypeInfo) -> Resolved<F> {
        let resolved = self.select(info);
        log::debug!(
            "{} reader resolved `{}` as {:?}",
            F::NAME,
            info.name(),
            resolved.strategy()
        );
        resolved
    }

    fn select(&self, info: &'static TypeInfo) -> Resolved<F> {
        let type_id = info.ty().id();

        if let Some(custom) = self.config.custom_parser_of(type_id) {
            return Resolved::new(Strategy::Custom, scalar::custom(custom.clone()));
        }

        match info.kind() {
            TypeKind::Optional(option) => {
                return Resolved::new(Strategy::Optional, scalar::optional(info, option));
            }
            TypeKind::Enum(variants) => {
                return Resolved::new(Strategy::Enum, scalar::enumeration(info, variants));
            }
            TypeKind::String => return Resolved::new(Strategy::String, scalar::string(info)),
            TypeKind::Dynamic => return Resolved::new(Strategy::Dynamic, scalar::dynamic()),
            _ => {}
        }

        if let Some(special) = self.config.special_parser_of(type_id) {
            return Resolved::new(Strategy::Special, scalar::special(special.clone()));
        }

        match info.kind() {
            TypeKind::Array(array) => {
                return Resolved::new(Strategy::Array, seq::array(info, array));
            }
            TypeKind::Primitive(primitive) => {
                return Resolved::new(Strategy::Primitive, scalar::primitive(*primitive));
            }
            _ => {}
        }

        if info.is_generic()
            && let Some(resolved) = Self::generic_container(info)
        {
            return resolved;
        }

        if let Some(parse) = self.config.platform_parsers().parser_for(info) {
            return Resolved::new(Strategy::Platform, parse);
        }

        // Maps are also sequences of entries, so they go first.
        if let Some(map) = info.map() {
            return Resolved::new(Strategy::UntypedMap, map::map(info, map));
        }
        if let Some(items) = info.stack() {
            return Resolved::new(Strategy::UntypedSequence, seq::stack(info, items));
        }
        if let Some(items) = untyped_sequence(info) {
            return Resolved::new(Strategy::UntypedSequence, seq::sequence(info, items));
        }

        let registry = self.config.type_registry().read();

        if info.is_value_type() {
            if let Some(factory) = registry.get_type_trait::<TypeTraitFromStr>(type_id) {
                return Resolved::new(Strategy::StaticFactory, scalar::from_str(info, *factory));
            }
        } else if let Some(factory) = registry.get_type_trait::<TypeTraitParseWith>(type_id) {
            return Resolved::new(Strategy::StaticFactory, scalar::parse_with(info, *factory));
        }

        if let TypeKind::Struct(structure) = info.kind()
            && structure.has_constructor()
        {
            return Resolved::new(Strategy::Structural, object::structural(info, structure));
        }

        if let Some(factory) = registry.get_type_trait::<TypeTraitFromString>(type_id) {
            return Resolved::new(Strategy::StringConstructor, scalar::from_string(info, *factory));
        }

        let subtypes = registry.get_type_trait::<TypeTraitSubtypes>(type_id).cloned();
        Resolved::new(Strategy::Abstract, object::fallback(info, subtypes))
    }

    fn generic_container(info: &'static TypeInfo) -> Option<Resolved<F>> {
        let resolved = if let Some(items) = info.list() {
            Resolved::new(Strategy::List, seq::sequence(info, items))
        } else if let Some(map) = info.map() {
            Resolved::new(Strategy::Map, map::map(info, map))
        } else if let Some(items) = info.collection() {
            Resolved::new(Strategy::Collection, seq::sequence(info, items))
        } else if let Some(items) = info.queue() {
            Resolved::new(Strategy::Queue, seq::sequence(info, items))
        } else if let Some(items) = info.stack() {
            Resolved::new(Strategy::Stack, seq::stack(info, items))
        } else if let Some(pair) = info.pair() {
            Resolved::new(Strategy::Pair, map::pair(info, pair))
        } else if let Some(items) = info.sequence() {
            Resolved::new(Strategy::Sequence, seq::sequence(info, items))
        } else {
            let ctor = info.constructor()?;
            Resolved::new(Strategy::Constructor, object::constructor(info, ctor))
        };
        Some(resolved)
    }
}

// The first sequence-like capability, in declaration order.
fn untyped_sequence(info: &'static TypeInfo) -> Option<&'static SeqInfo> {
    info.facets().iter().find_map(|facet| match facet {
        Facet::List(items)
        | Facet::Collection(items)
        | Facet::Queue(items)
        | Facet::Sequence(items) => Some(items),
        _ => None,
    })
}
