use crate::catalog::{Symbol, SymbolCatalog};

/// Conventional content directories tried for content-authored names.
pub const CONTENT_DIRS: &[&str] = &["/Game/Blueprints", "/Game/Core", "/Game"];

/// Native runtime namespaces tried as the last lookup tier.
pub const NATIVE_NAMESPACES: &[&str] = &["/Script/Engine", "/Script/CoreUObject", "/Script/Game"];

///
/// Lookup
///
/// One symbol-resolution request: a referenced name plus its optional
/// origin path from the export.
///

#[derive(Clone, Copy, Debug)]
pub struct Lookup<'a> {
    pub name: &'a str,
    pub path: Option<&'a str>,
}

/// A candidate resolution strategy: pure function of the request and the
/// catalog at call time.
pub type Strategy = for<'a> fn(Lookup<'a>, &SymbolCatalog) -> Option<Symbol>;

/// Ordered strategy chain, evaluated short-circuit. Order is part of the
/// contract: explicit path, then content convention, then native tiers.
pub const STRATEGIES: &[Strategy] = &[by_explicit_path, by_content_convention, by_native_namespace];

/// Run the strategy chain for one request.
#[must_use]
pub fn resolve_symbol(lookup: Lookup<'_>, catalog: &SymbolCatalog) -> Option<Symbol> {
    STRATEGIES
        .iter()
        .find_map(|strategy| strategy(lookup, catalog))
}

/// Explicit origin path: construct the fully-qualified candidate from
/// path+name and look it up, first as already materialized (locator match),
/// then as loadable under its bare name.
pub fn by_explicit_path(lookup: Lookup<'_>, catalog: &SymbolCatalog) -> Option<Symbol> {
    let path = lookup.path?;
    let qualified = qualify(path, lookup.name);

    catalog
        .lookup_locator(&qualified)
        .or_else(|| catalog.lookup(lookup.name))
        .cloned()
}

/// Content-authored names: try the bare name, then the fixed list of
/// conventional content directories.
pub fn by_content_convention(lookup: Lookup<'_>, catalog: &SymbolCatalog) -> Option<Symbol> {
    if !is_content_name(lookup.name) {
        return None;
    }
    if let Some(symbol) = catalog.lookup(lookup.name) {
        return Some(symbol.clone());
    }

    let asset = lookup.name.strip_suffix("_C").unwrap_or(lookup.name);
    CONTENT_DIRS.iter().find_map(|dir| {
        catalog
            .lookup_locator(&format!("{dir}/{asset}.{asset}"))
            .cloned()
    })
}

/// Last tier: the bare name, then the fixed native runtime namespaces.
pub fn by_native_namespace(lookup: Lookup<'_>, catalog: &SymbolCatalog) -> Option<Symbol> {
    if let Some(symbol) = catalog.lookup(lookup.name) {
        return Some(symbol.clone());
    }

    NATIVE_NAMESPACES.iter().find_map(|ns| {
        catalog
            .lookup_locator(&format!("{ns}.{}", lookup.name))
            .cloned()
    })
}

/// Recognizable content-authored naming convention.
#[must_use]
pub fn is_content_name(name: &str) -> bool {
    name.starts_with("BP_") || name.ends_with("_C")
}

// Build the fully-qualified locator for a path+name pair. Export paths may
// carry a numeric object suffix (`/Game/X/BP_Gun.0`) which is replaced by
// the asset name (`/Game/X/BP_Gun.BP_Gun`).
fn qualify(path: &str, name: &str) -> String {
    let base = match path.rsplit_once('.') {
        Some((left, right)) if right.chars().all(|c| c.is_ascii_digit()) => left,
        _ => path,
    };
    let asset = name.strip_suffix("_C").unwrap_or(name);

    format!("{base}.{asset}")
}
