//! Core engine for skelforge: metadata parsing, type resolution, the symbol
//! catalog, and the dependency scheduler that orders entity emission.
//!
//! Data flows one way: raw export text through [`parse`] into entity
//! descriptions, member and return types through [`resolve`] against the
//! [`catalog`], and the whole set through [`schedule`] out to an
//! [`emit::ArtifactEmitter`]. Everything is synchronous and single-threaded;
//! the catalog and entity states are owned by the scheduler for the run.

pub mod catalog;
pub mod emit;
pub mod model;
pub mod parse;
pub mod report;
pub mod resolve;
pub mod schedule;
pub mod types;

///
/// CONSTANTS
///

/// Default upper bound on scheduler passes.
///
/// The pass budget is the sole liveness guard: cyclic parent chains never
/// progress, so the run stops here instead of looping.
pub const DEFAULT_MAX_PASSES: usize = 10;

/// Root parent used when a parent reference cannot be satisfied by the
/// catalog or by any entity in the current run.
pub const ROOT_PARENT: &str = "Actor";

///
/// Prelude
///
/// Domain vocabulary only; no errors, emitters, or helpers.
///

pub mod prelude {
    pub use crate::{
        catalog::{Symbol, SymbolCatalog, SymbolOrigin},
        model::{EntityDescription, EntityKind, ParentRef, ResolvedEntity},
        report::RunReport,
        schedule::Scheduler,
        types::{ContainerShape, PinKind, RawTypeToken, ResolvedType, SymbolRef},
    };
}
