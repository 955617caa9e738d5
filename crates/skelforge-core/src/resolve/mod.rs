pub mod strategy;

use crate::{
    catalog::SymbolCatalog,
    resolve::strategy::Lookup,
    types::{ContainerShape, PinKind, RawTypeToken, ResolvedType, SymbolRef},
};

/// Resolve a raw type token against the catalog.
///
/// Pure except for read-only catalog lookups at call time; the result may
/// change as the catalog grows across scheduler passes, so callers
/// re-resolve per pass rather than cache.
#[must_use]
pub fn resolve(token: &RawTypeToken, catalog: &SymbolCatalog) -> ResolvedType {
    match token.container_shape() {
        ContainerShape::None => resolve_scalar(token, catalog),
        ContainerShape::Array => resolve_array(token, catalog),
        ContainerShape::Map => resolve_map(token, catalog),
    }
}

fn resolve_scalar(token: &RawTypeToken, catalog: &SymbolCatalog) -> ResolvedType {
    let kind = PinKind::from_tag(&token.tag);

    ResolvedType {
        symbol: symbol_ref_for(
            kind,
            token.class_name.as_deref(),
            token.class_path.as_deref(),
            catalog,
        ),
        ..ResolvedType::scalar(kind)
    }
}

// The inner kind goes through the same table; it is never defaulted away
// from its table mapping, even when its symbol cannot be found.
fn resolve_array(token: &RawTypeToken, catalog: &SymbolCatalog) -> ResolvedType {
    let inner = match token.inner_tag.as_deref() {
        Some(tag) => {
            let kind = PinKind::from_tag(tag);
            if kind == PinKind::Wildcard {
                log::warn!("unknown array inner tag '{tag}', resolving as wildcard");
            }
            kind
        }
        None => {
            log::warn!("array token without an inner tag, resolving as wildcard");
            PinKind::Wildcard
        }
    };

    ResolvedType {
        container: ContainerShape::Array,
        inner: Some(inner),
        symbol: symbol_ref_for(
            inner,
            token.inner_class_name.as_deref(),
            token.inner_class_path.as_deref(),
            catalog,
        ),
        ..ResolvedType::scalar(inner)
    }
}

// Map tokens travel as a delimited descriptor:
// `primary,key_tag,value_tag[,key_class][,value_class]`. Fewer than three
// fields resolves the whole token to wildcard rather than attempting
// partial resolution; otherwise each side degrades independently.
fn resolve_map(token: &RawTypeToken, catalog: &SymbolCatalog) -> ResolvedType {
    let descriptor = token.map_descriptor.as_deref().unwrap_or_default();
    let fields: Vec<&str> = descriptor.split(',').collect();

    if fields.len() < 3 {
        log::info!("map descriptor '{descriptor}' is incomplete, resolving as wildcard");
        return ResolvedType {
            container: ContainerShape::Map,
            key: Some(PinKind::Wildcard),
            ..ResolvedType::scalar(PinKind::Wildcard)
        };
    }

    let key_kind = PinKind::from_tag(fields[1]);
    let value_kind = PinKind::from_tag(fields[2]);
    let key_class = fields.get(3).copied().filter(|s| !s.is_empty());
    let value_class = fields.get(4).copied().filter(|s| !s.is_empty());

    // The value kind takes the primary slot, the key kind the key slot.
    ResolvedType {
        container: ContainerShape::Map,
        key: Some(key_kind),
        symbol: symbol_ref_for(value_kind, value_class, None, catalog),
        key_symbol: symbol_ref_for(key_kind, key_class, None, catalog),
        ..ResolvedType::scalar(value_kind)
    }
}

// Symbol resolution for one slot. Symbol-bearing kinds always come back
// with a populated reference, concrete or fallback; enum-like kinds attach
// a symbol only when their class resolves; everything else carries none.
fn symbol_ref_for(
    kind: PinKind,
    name: Option<&str>,
    path: Option<&str>,
    catalog: &SymbolCatalog,
) -> Option<SymbolRef> {
    if kind.is_symbol_bearing() {
        let found = name.and_then(|name| strategy::resolve_symbol(Lookup { name, path }, catalog));

        return Some(match found {
            Some(symbol) => SymbolRef::Known(symbol),
            None => {
                log::info!(
                    "deferred resolution for {kind} reference '{}', using root {} symbol",
                    name.unwrap_or("<unnamed>"),
                    kind.root_symbol_name(),
                );
                SymbolRef::Fallback(kind)
            }
        });
    }

    if kind.is_enum_like() {
        let name = name?;
        return strategy::resolve_symbol(Lookup { name, path }, catalog).map(SymbolRef::Known);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Symbol;
    use proptest::prelude::*;

    fn seeded() -> SymbolCatalog {
        let mut catalog = SymbolCatalog::new();
        catalog.seed_native([
            Symbol::native("Actor", "/Script/Engine.Actor"),
            Symbol::native("Vector", "/Script/CoreUObject.Vector"),
        ]);
        catalog
    }

    #[test]
    fn known_primitive_kinds_never_resolve_wildcard() {
        // Catalog state must not matter for primitive tags.
        for catalog in [SymbolCatalog::new(), seeded()] {
            for (tag, _) in PinKind::TABLE {
                let resolved = resolve(&RawTypeToken::scalar(*tag), &catalog);
                assert_ne!(resolved.kind, PinKind::Wildcard, "tag {tag}");
            }
        }
    }

    #[test]
    fn unknown_tag_resolves_wildcard_without_error() {
        let resolved = resolve(&RawTypeToken::scalar("FancyProperty"), &seeded());
        assert_eq!(resolved.kind, PinKind::Wildcard);
        assert_eq!(resolved.container, ContainerShape::None);
        assert!(resolved.symbol.is_none());
    }

    #[test]
    fn struct_member_with_known_symbol_resolves_concrete() {
        let mut token = RawTypeToken::scalar("StructProperty");
        token.class_name = Some("Vector".to_string());

        let resolved = resolve(&token, &seeded());
        assert_eq!(resolved.kind, PinKind::Struct);
        let Some(SymbolRef::Known(symbol)) = resolved.symbol else {
            panic!("expected a concrete symbol");
        };
        assert_eq!(symbol.logical_name, "Vector");
    }

    #[test]
    fn struct_member_without_symbol_gets_fallback_never_none() {
        let token = RawTypeToken::scalar("StructProperty");

        let resolved = resolve(&token, &SymbolCatalog::new());
        assert_eq!(resolved.symbol, Some(SymbolRef::Fallback(PinKind::Struct)));
    }

    #[test]
    fn array_of_struct_with_unresolvable_name_keeps_struct_inner() {
        let mut token = RawTypeToken::scalar("ArrayProperty");
        token.inner_tag = Some("StructProperty".to_string());
        token.inner_class_name = Some("MissingRow".to_string());

        let resolved = resolve(&token, &seeded());
        assert_eq!(resolved.container, ContainerShape::Array);
        assert_eq!(resolved.inner, Some(PinKind::Struct));
        assert_eq!(resolved.symbol, Some(SymbolRef::Fallback(PinKind::Struct)));
    }

    #[test]
    fn array_with_unknown_inner_resolves_wildcard_inner() {
        let mut token = RawTypeToken::scalar("ArrayProperty");
        token.inner_tag = Some("FancyProperty".to_string());

        let resolved = resolve(&token, &seeded());
        assert_eq!(resolved.container, ContainerShape::Array);
        assert_eq!(resolved.inner, Some(PinKind::Wildcard));
    }

    #[test]
    fn two_field_map_descriptor_resolves_wholly_wildcard() {
        let mut token = RawTypeToken::scalar("MapProperty");
        token.map_descriptor = Some("MapProperty,NameProperty".to_string());

        let resolved = resolve(&token, &seeded());
        assert_eq!(resolved.container, ContainerShape::Map);
        assert_eq!(resolved.kind, PinKind::Wildcard);
        assert_eq!(resolved.key, Some(PinKind::Wildcard));
        assert!(resolved.symbol.is_none());
        assert!(resolved.key_symbol.is_none());
    }

    #[test]
    fn map_sides_resolve_independently() {
        let mut token = RawTypeToken::scalar("MapProperty");
        token.map_descriptor =
            Some("MapProperty,NameProperty,ObjectProperty,,MissingData".to_string());

        let resolved = resolve(&token, &seeded());
        assert_eq!(resolved.key, Some(PinKind::Name));
        assert_eq!(resolved.kind, PinKind::Object);
        assert!(resolved.key_symbol.is_none());
        assert_eq!(resolved.symbol, Some(SymbolRef::Fallback(PinKind::Object)));
    }

    #[test]
    fn map_side_with_unknown_kind_degrades_that_side_only() {
        let mut token = RawTypeToken::scalar("MapProperty");
        token.map_descriptor = Some("MapProperty,FancyProperty,IntProperty".to_string());

        let resolved = resolve(&token, &seeded());
        assert_eq!(resolved.key, Some(PinKind::Wildcard));
        assert_eq!(resolved.kind, PinKind::Int);
    }

    proptest! {
        #[test]
        fn resolution_is_total_over_arbitrary_tags(tag in "[A-Za-z0-9]{0,24}") {
            let resolved = resolve(&RawTypeToken::scalar(tag.clone()), &SymbolCatalog::new());

            if PinKind::from_tag(&tag) == PinKind::Wildcard {
                prop_assert_eq!(resolved.kind, PinKind::Wildcard);
            } else {
                prop_assert_ne!(resolved.kind, PinKind::Wildcard);
            }
        }
    }
}
