use crate::{
    catalog::Symbol,
    model::EntityKind,
    types::ResolvedType,
};
use serde::{Deserialize, Serialize};

///
/// ResolvedMember
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ResolvedMember {
    pub name: String,
    pub ty: ResolvedType,

    #[serde(default)]
    pub is_component: bool,
}

///
/// ResolvedFunction
///
/// `ret` is `None` for void-returning functions. `has_return` is normally
/// `ret.is_some()`, but the name heuristic may set it on its own when the
/// export carried no return information at all.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ResolvedFunction {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ret: Option<ResolvedType>,

    #[serde(default)]
    pub has_return: bool,
}

///
/// ResolvedEntity
///
/// Emitter input: a fully resolved entity description. The parent symbol is
/// always concrete by the time an entity reaches the emitter; unresolvable
/// parents have already been defaulted to the root parent.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ResolvedEntity {
    pub kind: EntityKind,
    pub name: String,
    pub parent: Symbol,
    pub members: Vec<ResolvedMember>,
    pub functions: Vec<ResolvedFunction>,
}

impl ResolvedEntity {
    /// Asset-facing name: generated-class names drop the `_C` suffix.
    #[must_use]
    pub fn asset_name(&self) -> &str {
        self.name.strip_suffix("_C").unwrap_or(&self.name)
    }

    /// Fallback symbol references across all member and return types.
    #[must_use]
    pub fn fallback_count(&self) -> usize {
        let members = self.members.iter().map(|m| m.ty.fallback_count());
        let returns = self
            .functions
            .iter()
            .filter_map(|f| f.ret.as_ref())
            .map(ResolvedType::fallback_count);

        members.chain(returns).sum()
    }
}
