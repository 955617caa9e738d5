///
/// Name-based return inference.
///
/// When the export carries no return information for a function, names with
/// a recognized getter-style prefix are assumed to produce a value. Kept as
/// an isolated policy so it can be disabled or swapped without touching
/// resolution.
///

/// Prefixes that imply a return value in the absence of explicit metadata.
pub const RETURN_PREFIXES: &[&str] = &["Get", "Is", "Has", "Can", "Find"];

/// Whether a function name alone implies a return value.
#[must_use]
pub fn infers_return_value(name: &str) -> bool {
    RETURN_PREFIXES.iter().any(|prefix| {
        name.strip_prefix(prefix).is_some_and(|rest| {
            // `GetName` infers, `Gettysburg` does not.
            rest.chars().next().is_none_or(|c| c.is_uppercase() || c == '_')
        })
    })
}
