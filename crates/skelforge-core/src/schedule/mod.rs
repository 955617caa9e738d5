use crate::{
    DEFAULT_MAX_PASSES, ROOT_PARENT,
    catalog::{Symbol, SymbolCatalog},
    emit::ArtifactEmitter,
    model::{EntityDescription, ResolvedEntity, ResolvedFunction, ResolvedMember, ReturnSpec},
    parse::policy,
    report::{DeferredRecord, FailedRecord, ResolvedRecord, RunReport},
    resolve,
    resolve::strategy::{self, Lookup},
};

///
/// EntityState
///
/// Scheduler state per entity. `Failed` is terminal: an entity whose
/// emission failed is excluded from the catalog and never retried.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum EntityState {
    Pending,
    Deferred { blocking: String },
    Resolved { pass: usize },
    Failed { message: String },
}

impl EntityState {
    #[must_use]
    pub const fn is_unresolved(&self) -> bool {
        matches!(self, Self::Pending | Self::Deferred { .. })
    }
}

///
/// Slot
///

#[derive(Debug)]
struct Slot {
    entity: EntityDescription,
    state: EntityState,
}

// Outcome of the parent check for one entity within a pass.
enum Disposition {
    Emit(Symbol),
    Block(String),
}

///
/// Scheduler
///
/// Drives repeated resolution passes over the parsed entities until no
/// entity progresses, the pass budget is exhausted, or nothing is left
/// unresolved. Owns the catalog and all entity state for the run; nothing
/// else writes to either.
///

#[derive(Debug)]
pub struct Scheduler {
    slots: Vec<Slot>,
    catalog: SymbolCatalog,
    max_passes: usize,
}

impl Scheduler {
    #[must_use]
    pub fn new(entities: Vec<EntityDescription>, catalog: SymbolCatalog) -> Self {
        let slots = entities
            .into_iter()
            .map(|entity| Slot {
                entity,
                state: EntityState::Pending,
            })
            .collect();

        Self {
            slots,
            catalog,
            max_passes: DEFAULT_MAX_PASSES,
        }
    }

    /// Bound the number of passes; the sole liveness guard against cyclic
    /// parent chains.
    #[must_use]
    pub fn with_max_passes(mut self, max_passes: usize) -> Self {
        self.max_passes = max_passes;
        self
    }

    #[must_use]
    pub const fn catalog(&self) -> &SymbolCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn into_catalog(self) -> SymbolCatalog {
        self.catalog
    }

    /// Run passes to completion and report the outcome.
    pub fn run(&mut self, emitter: &mut dyn ArtifactEmitter) -> RunReport {
        let mut passes = 0;
        let mut fallbacks = 0;

        while passes < self.max_passes && self.has_unresolved() {
            passes += 1;

            // Dispositions are computed against the state at pass start, so
            // a parent emitted within this pass never unblocks a child
            // before the next one.
            let eligible: Vec<(usize, Disposition)> = self
                .slots
                .iter()
                .enumerate()
                .filter(|(_, slot)| slot.state.is_unresolved())
                .map(|(index, _)| (index, self.disposition(index)))
                .collect();

            let mut progressed = 0;
            for (index, disposition) in eligible {
                match disposition {
                    Disposition::Emit(parent) => {
                        // Failures count as progress: they leave the
                        // unresolved pool and unblock dependants' fallback
                        // path on the next pass.
                        progressed += 1;

                        match self.materialize(index, parent, emitter) {
                            Ok(count) => {
                                fallbacks += count;
                                self.slots[index].state = EntityState::Resolved { pass: passes };
                            }
                            Err(message) => {
                                log::warn!(
                                    "emission failed for '{}': {message}",
                                    self.slots[index].entity.name,
                                );
                                self.slots[index].state = EntityState::Failed { message };
                            }
                        }
                    }
                    Disposition::Block(blocking) => {
                        self.slots[index].state = EntityState::Deferred { blocking };
                    }
                }
            }

            log::info!("pass {passes}: {progressed} entities progressed");
            if progressed == 0 {
                break;
            }
        }

        self.report(passes, fallbacks)
    }

    fn has_unresolved(&self) -> bool {
        self.slots.iter().any(|slot| slot.state.is_unresolved())
    }

    // Parent check for one entity, in pass-start state.
    fn disposition(&self, index: usize) -> Disposition {
        let entity = &self.slots[index].entity;

        let Some(parent) = &entity.parent else {
            return Disposition::Emit(self.root_parent());
        };

        // Already in the catalog, native or previously generated.
        let lookup = Lookup {
            name: parent.name(),
            path: parent.path().map(String::as_str),
        };
        if let Some(symbol) = strategy::resolve_symbol(lookup, &self.catalog) {
            return Disposition::Emit(symbol);
        }

        // Parent is part of this run but not materialized yet.
        if self.is_known_unresolved(parent.name()) {
            return Disposition::Block(parent.name().to_string());
        }

        // Unresolvable native reference: lenient root default.
        log::warn!(
            "parent '{}' of '{}' is neither known nor part of this run, defaulting to {ROOT_PARENT}",
            parent.name(),
            entity.name,
        );
        Disposition::Emit(self.root_parent())
    }

    fn is_known_unresolved(&self, name: &str) -> bool {
        self.slots
            .iter()
            .any(|slot| slot.entity.name == name && slot.state.is_unresolved())
    }

    fn root_parent(&self) -> Symbol {
        self.catalog
            .lookup(ROOT_PARENT)
            .cloned()
            .unwrap_or_else(|| Symbol::native(ROOT_PARENT, format!("/Script/Engine.{ROOT_PARENT}")))
    }

    // Resolve every member and function type, emit, and register the
    // entity's own name. Returns the fallback count on success.
    fn materialize(
        &mut self,
        index: usize,
        parent: Symbol,
        emitter: &mut dyn ArtifactEmitter,
    ) -> Result<usize, String> {
        let resolved = self.resolve_entity(index, parent);
        let fallbacks = resolved.fallback_count();

        match emitter.emit(&resolved) {
            Ok(locator) => {
                self.catalog
                    .register(Symbol::generated(resolved.name, locator.0));
                Ok(fallbacks)
            }
            Err(err) => Err(err.to_string()),
        }
    }

    fn resolve_entity(&self, index: usize, parent: Symbol) -> ResolvedEntity {
        let entity = &self.slots[index].entity;

        let members = entity
            .members
            .iter()
            .map(|member| ResolvedMember {
                name: member.name.clone(),
                ty: resolve::resolve(&member.raw, &self.catalog),
                is_component: member.is_component,
            })
            .collect();

        let functions = entity
            .functions
            .iter()
            .map(|function| {
                let (ret, has_return) = match &function.ret {
                    ReturnSpec::Type(token) => {
                        (Some(resolve::resolve(token, &self.catalog)), true)
                    }
                    ReturnSpec::Void => (None, false),
                    ReturnSpec::Unspecified => {
                        (None, policy::infers_return_value(&function.name))
                    }
                };

                ResolvedFunction {
                    name: function.name.clone(),
                    ret,
                    has_return,
                }
            })
            .collect();

        ResolvedEntity {
            kind: entity.kind,
            name: entity.name.clone(),
            parent,
            members,
            functions,
        }
    }

    fn report(&self, passes: usize, fallbacks: usize) -> RunReport {
        let mut report = RunReport {
            passes,
            fallbacks,
            ..RunReport::default()
        };

        for slot in &self.slots {
            let name = slot.entity.name.clone();

            match &slot.state {
                EntityState::Resolved { pass } => {
                    let locator = self
                        .catalog
                        .lookup(&name)
                        .map(|s| s.locator.clone())
                        .unwrap_or_default();
                    report.resolved.push(ResolvedRecord {
                        name,
                        pass: *pass,
                        locator,
                    });
                }
                EntityState::Deferred { blocking } => {
                    report.deferred.push(DeferredRecord {
                        name,
                        blocking_parent: blocking.clone(),
                    });
                }
                EntityState::Failed { message } => {
                    report.failed.push(FailedRecord {
                        name,
                        message: message.clone(),
                    });
                }
                EntityState::Pending => {
                    // Only reachable with a zero pass budget.
                    let blocking = slot
                        .entity
                        .parent
                        .as_ref()
                        .map(|p| p.name().to_string())
                        .unwrap_or_default();
                    report.deferred.push(DeferredRecord {
                        name,
                        blocking_parent: blocking,
                    });
                }
            }
        }

        report
    }
}
