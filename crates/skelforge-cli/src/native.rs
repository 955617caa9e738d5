use skelforge::prelude::*;

// Statically-known native symbols seeded before pass 1. Covers the root
// symbols the resolver's fallbacks name, the common actor hierarchy, and
// the component classes exports reference most.
const NATIVE_SYMBOLS: &[(&str, &str)] = &[
    ("Object", "/Script/CoreUObject.Object"),
    ("Class", "/Script/CoreUObject.Class"),
    ("ScriptStruct", "/Script/CoreUObject.ScriptStruct"),
    ("Interface", "/Script/CoreUObject.Interface"),
    ("Vector", "/Script/CoreUObject.Vector"),
    ("Rotator", "/Script/CoreUObject.Rotator"),
    ("Transform", "/Script/CoreUObject.Transform"),
    ("Actor", "/Script/Engine.Actor"),
    ("Pawn", "/Script/Engine.Pawn"),
    ("Character", "/Script/Engine.Character"),
    ("GameModeBase", "/Script/Engine.GameModeBase"),
    ("PlayerController", "/Script/Engine.PlayerController"),
    ("ActorComponent", "/Script/Engine.ActorComponent"),
    ("SceneComponent", "/Script/Engine.SceneComponent"),
    ("StaticMeshComponent", "/Script/Engine.StaticMeshComponent"),
    ("SkeletalMeshComponent", "/Script/Engine.SkeletalMeshComponent"),
];

/// Catalog pre-seeded with the built-in native set.
pub fn seeded_catalog() -> SymbolCatalog {
    let mut catalog = SymbolCatalog::new();
    catalog.seed_native(
        NATIVE_SYMBOLS
            .iter()
            .map(|(name, locator)| Symbol::native(*name, *locator)),
    );

    catalog
}
