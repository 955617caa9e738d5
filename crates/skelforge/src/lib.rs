//! ## Crate layout
//! - `core`: the engine — parser, type resolver, symbol catalog, scheduler,
//!   and the emitter boundary.
//! - `error`: public error taxonomy wrapping the engine's errors.
//!
//! The `prelude` mirrors the surface a generation run touches: parse
//! documents, seed a catalog, schedule, and read the report.

pub use skelforge_core as core;

pub mod error;

pub use error::{Error, ErrorKind, ErrorOrigin};
pub use skelforge_core::{DEFAULT_MAX_PASSES, ROOT_PARENT};

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// Prelude
///

pub mod prelude {
    pub use crate::core::{
        catalog::{Symbol, SymbolCatalog, SymbolOrigin},
        emit::{ArtifactEmitter, EmitError, ManifestEmitter, SymbolLocator},
        model::{EntityDescription, EntityKind, ParentRef, ResolvedEntity},
        parse::{class_names, parse_document},
        report::RunReport,
        schedule::Scheduler,
        types::{ContainerShape, PinKind, RawTypeToken, ResolvedType, SymbolRef},
    };
    pub use serde::{Deserialize, Serialize};
}
