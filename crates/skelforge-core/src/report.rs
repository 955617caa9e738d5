use serde::{Deserialize, Serialize};
use std::fmt;

///
/// ResolvedRecord
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ResolvedRecord {
    pub name: String,
    pub pass: usize,
    pub locator: String,
}

///
/// DeferredRecord
/// An entity whose parent chain never became satisfiable within the pass
/// budget, reported with the parent that blocked it.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct DeferredRecord {
    pub name: String,
    pub blocking_parent: String,
}

///
/// FailedRecord
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct FailedRecord {
    pub name: String,
    pub message: String,
}

///
/// RunReport
///
/// Accumulated outcome of one generation run. Only parse failures abort a
/// run; everything else lands here and the caller decides whether partial
/// success is acceptable.
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct RunReport {
    pub resolved: Vec<ResolvedRecord>,
    pub deferred: Vec<DeferredRecord>,
    pub failed: Vec<FailedRecord>,
    pub passes: usize,

    /// Informational count of fallback type resolutions observed.
    pub fallbacks: usize,
}

impl RunReport {
    /// Pass index at which an entity resolved, if it did.
    #[must_use]
    pub fn pass_of(&self, name: &str) -> Option<usize> {
        self.resolved.iter().find(|r| r.name == name).map(|r| r.pass)
    }

    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.deferred.is_empty() && self.failed.is_empty()
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} resolved, {} deferred, {} failed in {} passes ({} fallback resolutions)",
            self.resolved.len(),
            self.deferred.len(),
            self.failed.len(),
            self.passes,
            self.fallbacks,
        )
    }
}
