//! End-to-end scheduler scenarios: pass ordering, deferral, cycles, and
//! emit-failure isolation.

use skelforge_core::{
    catalog::{Symbol, SymbolCatalog},
    emit::{ArtifactEmitter, EmitError, SymbolLocator},
    model::{
        EntityDescription, EntityKind, MemberDescription, ParentRef, ResolvedEntity,
    },
    schedule::Scheduler,
    types::{PinKind, RawTypeToken, SymbolRef},
};
use std::collections::BTreeSet;

///
/// RecordingEmitter
///

#[derive(Default)]
struct RecordingEmitter {
    emitted: Vec<ResolvedEntity>,
    fail: BTreeSet<String>,
}

impl RecordingEmitter {
    fn failing(names: &[&str]) -> Self {
        Self {
            emitted: Vec::new(),
            fail: names.iter().map(ToString::to_string).collect(),
        }
    }

    fn emitted_names(&self) -> Vec<&str> {
        self.emitted.iter().map(|e| e.name.as_str()).collect()
    }
}

impl ArtifactEmitter for RecordingEmitter {
    fn emit(&mut self, entity: &ResolvedEntity) -> Result<SymbolLocator, EmitError> {
        if self.fail.contains(&entity.name) {
            return Err(EmitError::new("backend rejected entity"));
        }

        let asset = entity.asset_name();
        self.emitted.push(entity.clone());
        Ok(SymbolLocator(format!("/Game/Generated/{asset}.{asset}")))
    }
}

fn entity(name: &str, parent: Option<ParentRef>) -> EntityDescription {
    EntityDescription {
        kind: EntityKind::ClassLike,
        name: name.to_string(),
        parent,
        members: Vec::new(),
        functions: Vec::new(),
    }
}

fn logical(name: &str) -> Option<ParentRef> {
    Some(ParentRef::Logical {
        name: name.to_string(),
        path: String::new(),
    })
}

fn native_seed() -> SymbolCatalog {
    let mut catalog = SymbolCatalog::new();
    catalog.seed_native([Symbol::native("Actor", "/Script/Engine.Actor")]);
    catalog
}

#[test]
fn parentless_entities_resolve_in_pass_one() {
    let entities = vec![entity("BP_A_C", None), entity("BP_B_C", None)];
    let mut emitter = RecordingEmitter::default();
    let report = Scheduler::new(entities, native_seed()).run(&mut emitter);

    assert_eq!(report.pass_of("BP_A_C"), Some(1));
    assert_eq!(report.pass_of("BP_B_C"), Some(1));
    assert!(report.is_clean());

    // Removing unrelated entities never changes pass-one resolution.
    let mut emitter = RecordingEmitter::default();
    let report = Scheduler::new(vec![entity("BP_A_C", None)], native_seed()).run(&mut emitter);
    assert_eq!(report.pass_of("BP_A_C"), Some(1));
}

#[test]
fn child_resolves_strictly_after_parent() {
    let entities = vec![
        entity("Base_C", None),
        entity("Child_C", logical("Base_C")),
    ];
    let mut emitter = RecordingEmitter::default();
    let report = Scheduler::new(entities, native_seed()).run(&mut emitter);

    assert_eq!(report.pass_of("Base_C"), Some(1));
    assert_eq!(report.pass_of("Child_C"), Some(2));
    assert!(report.deferred.is_empty());
    assert_eq!(emitter.emitted_names(), ["Base_C", "Child_C"]);
}

#[test]
fn out_of_order_discovery_still_orders_parent_first() {
    // Child declared before its parent.
    let entities = vec![
        entity("Child_C", logical("Base_C")),
        entity("Base_C", None),
    ];
    let mut emitter = RecordingEmitter::default();
    let report = Scheduler::new(entities, native_seed()).run(&mut emitter);

    let base = report.pass_of("Base_C").unwrap();
    let child = report.pass_of("Child_C").unwrap();
    assert!(child > base, "child pass {child} must exceed parent pass {base}");
    assert_eq!(emitter.emitted_names(), ["Base_C", "Child_C"]);
}

#[test]
fn grandchild_chain_resolves_one_generation_per_pass() {
    let entities = vec![
        entity("C_C", logical("B_C")),
        entity("B_C", logical("A_C")),
        entity("A_C", None),
    ];
    let mut emitter = RecordingEmitter::default();
    let report = Scheduler::new(entities, native_seed()).run(&mut emitter);

    assert_eq!(report.pass_of("A_C"), Some(1));
    assert_eq!(report.pass_of("B_C"), Some(2));
    assert_eq!(report.pass_of("C_C"), Some(3));
    assert_eq!(report.passes, 3);
}

#[test]
fn cyclic_parents_terminate_and_are_reported_deferred() {
    let entities = vec![
        entity("BP_A_C", logical("BP_B_C")),
        entity("BP_B_C", logical("BP_A_C")),
    ];
    let mut emitter = RecordingEmitter::default();
    let report = Scheduler::new(entities, native_seed())
        .with_max_passes(5)
        .run(&mut emitter);

    assert!(report.passes <= 5);
    assert!(report.resolved.is_empty());
    assert_eq!(report.deferred.len(), 2);

    let blocking: Vec<&str> = report
        .deferred
        .iter()
        .map(|d| d.blocking_parent.as_str())
        .collect();
    assert!(blocking.contains(&"BP_A_C"));
    assert!(blocking.contains(&"BP_B_C"));
    assert!(emitter.emitted.is_empty());
}

#[test]
fn unknown_parent_defaults_to_root_and_resolves() {
    let entities = vec![entity(
        "BP_Orphan_C",
        Some(ParentRef::Native {
            name: "SomeMissingNativeClass".to_string(),
        }),
    )];
    let mut emitter = RecordingEmitter::default();
    let report = Scheduler::new(entities, native_seed()).run(&mut emitter);

    assert_eq!(report.pass_of("BP_Orphan_C"), Some(1));
    assert_eq!(emitter.emitted[0].parent.logical_name, "Actor");
}

#[test]
fn native_parent_in_catalog_is_used_directly() {
    let mut catalog = native_seed();
    catalog.seed_native([Symbol::native("Pawn", "/Script/Engine.Pawn")]);

    let entities = vec![entity(
        "BP_Unit_C",
        Some(ParentRef::Native {
            name: "Pawn".to_string(),
        }),
    )];
    let mut emitter = RecordingEmitter::default();
    let report = Scheduler::new(entities, catalog).run(&mut emitter);

    assert!(report.is_clean());
    assert_eq!(emitter.emitted[0].parent.logical_name, "Pawn");
}

#[test]
fn emit_failure_is_terminal_and_does_not_block_siblings() {
    let entities = vec![
        entity("BP_Bad_C", None),
        entity("BP_Good_C", None),
        entity("BP_Dependent_C", logical("BP_Bad_C")),
    ];
    let mut emitter = RecordingEmitter::failing(&["BP_Bad_C"]);
    let mut scheduler = Scheduler::new(entities, native_seed());
    let report = scheduler.run(&mut emitter);

    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].name, "BP_Bad_C");
    assert_eq!(report.pass_of("BP_Good_C"), Some(1));

    // The failed entity never enters the catalog; its dependant falls back
    // to the root parent on a later pass instead of waiting forever.
    assert!(!scheduler.catalog().contains("BP_Bad_C"));
    let dependent = emitter
        .emitted
        .iter()
        .find(|e| e.name == "BP_Dependent_C")
        .unwrap();
    assert_eq!(dependent.parent.logical_name, "Actor");
}

#[test]
fn member_types_are_reresolved_on_the_pass_that_emits() {
    // Child carries an object member referencing its parent class; by the
    // time the child emits, the parent symbol is concrete.
    let mut raw = RawTypeToken::scalar("ObjectProperty");
    raw.class_name = Some("Base_C".to_string());

    let mut child = entity("Child_C", logical("Base_C"));
    child.members.push(MemberDescription::new("Sibling", raw));

    let entities = vec![entity("Base_C", None), child];
    let mut emitter = RecordingEmitter::default();
    let report = Scheduler::new(entities, native_seed()).run(&mut emitter);
    assert!(report.is_clean());

    let emitted = emitter
        .emitted
        .iter()
        .find(|e| e.name == "Child_C")
        .unwrap();
    let Some(SymbolRef::Known(symbol)) = &emitted.members[0].ty.symbol else {
        panic!("expected the sibling reference to resolve concretely");
    };
    assert_eq!(symbol.logical_name, "Base_C");
    assert_eq!(emitted.members[0].ty.kind, PinKind::Object);
}

#[test]
fn zero_pass_budget_reports_everything_deferred() {
    let entities = vec![entity("BP_A_C", None)];
    let mut emitter = RecordingEmitter::default();
    let report = Scheduler::new(entities, native_seed())
        .with_max_passes(0)
        .run(&mut emitter);

    assert_eq!(report.passes, 0);
    assert_eq!(report.deferred.len(), 1);
    assert!(emitter.emitted.is_empty());
}
