use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

///
/// SymbolOrigin
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
pub enum SymbolOrigin {
    NativeRuntime,
    GeneratedEntity,
}

///
/// Symbol
///
/// A named, resolvable reference to either a pre-existing native type or a
/// type generated earlier in the current run. The catalog owns the mapping
/// from name to symbol; holders keep names and re-query per pass.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Symbol {
    pub logical_name: String,
    pub origin: SymbolOrigin,
    pub locator: String,
}

impl Symbol {
    #[must_use]
    pub fn native(logical_name: impl Into<String>, locator: impl Into<String>) -> Self {
        Self {
            logical_name: logical_name.into(),
            origin: SymbolOrigin::NativeRuntime,
            locator: locator.into(),
        }
    }

    #[must_use]
    pub fn generated(logical_name: impl Into<String>, locator: impl Into<String>) -> Self {
        Self {
            logical_name: logical_name.into(),
            origin: SymbolOrigin::GeneratedEntity,
            locator: locator.into(),
        }
    }
}

///
/// SymbolCatalog
///
/// Run-scoped registry of known symbols. Constructed fresh per generation
/// run, pre-seeded with the statically-known native set, then extended as
/// the scheduler materializes entities. Read-only to the resolver.
///

#[derive(Clone, Debug, Default)]
pub struct SymbolCatalog {
    symbols: BTreeMap<String, Symbol>,
}

impl SymbolCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seed the catalog with native symbols before pass 1.
    pub fn seed_native(&mut self, symbols: impl IntoIterator<Item = Symbol>) {
        for symbol in symbols {
            self.register(symbol);
        }
    }

    /// Register a symbol under its logical name. A later registration for
    /// the same name replaces the earlier one.
    pub fn register(&mut self, symbol: Symbol) {
        self.symbols.insert(symbol.logical_name.clone(), symbol);
    }

    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        self.symbols.get(name)
    }

    /// Look a symbol up by its fully-qualified locator rather than its name.
    #[must_use]
    pub fn lookup_locator(&self, locator: &str) -> Option<&Symbol> {
        self.symbols.values().find(|s| s.locator == locator)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.symbols.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_and_lookup_round_trip() {
        let mut catalog = SymbolCatalog::new();
        catalog.register(Symbol::native("Actor", "/Script/Engine.Actor"));

        assert!(catalog.contains("Actor"));
        let symbol = catalog.lookup("Actor").unwrap();
        assert_eq!(symbol.origin, SymbolOrigin::NativeRuntime);
        assert_eq!(symbol.locator, "/Script/Engine.Actor");
    }

    #[test]
    fn lookup_by_locator_finds_seeded_symbol() {
        let mut catalog = SymbolCatalog::new();
        catalog.seed_native([
            Symbol::native("Actor", "/Script/Engine.Actor"),
            Symbol::native("Pawn", "/Script/Engine.Pawn"),
        ]);

        let symbol = catalog.lookup_locator("/Script/Engine.Pawn").unwrap();
        assert_eq!(symbol.logical_name, "Pawn");
        assert!(catalog.lookup_locator("/Script/Engine.Character").is_none());
    }

    #[test]
    fn later_registration_replaces_earlier() {
        let mut catalog = SymbolCatalog::new();
        catalog.register(Symbol::native("BP_Item_C", "/Game/Old/BP_Item.BP_Item"));
        catalog.register(Symbol::generated("BP_Item_C", "/Game/New/BP_Item.BP_Item"));

        let symbol = catalog.lookup("BP_Item_C").unwrap();
        assert_eq!(symbol.origin, SymbolOrigin::GeneratedEntity);
        assert_eq!(catalog.len(), 1);
    }
}
