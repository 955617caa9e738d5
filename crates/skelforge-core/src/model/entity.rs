use crate::model::{FunctionDescription, MemberDescription};
use derive_more::Display;
use serde::{Deserialize, Serialize};

///
/// EntityKind
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
pub enum EntityKind {
    ClassLike,
    StructLike,
}

///
/// ParentRef
///
/// Reference to another entity, by logical (content-authored) name with its
/// export path, or by a pre-existing native type name.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum ParentRef {
    Logical { name: String, path: String },
    Native { name: String },
}

impl ParentRef {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Logical { name, .. } | Self::Native { name } => name,
        }
    }

    #[must_use]
    pub const fn path(&self) -> Option<&String> {
        match self {
            Self::Logical { path, .. } => Some(path),
            Self::Native { .. } => None,
        }
    }
}

///
/// EntityDescription
///
/// One parsed top-level definition. Created once per parsed document and
/// immutable afterwards; resolution reads it and produces a resolved copy,
/// it never mutates the description.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct EntityDescription {
    pub kind: EntityKind,
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<ParentRef>,

    pub members: Vec<MemberDescription>,
    pub functions: Vec<FunctionDescription>,
}

impl EntityDescription {
    /// Asset-facing name: generated-class names drop the `_C` suffix.
    #[must_use]
    pub fn asset_name(&self) -> &str {
        self.name.strip_suffix("_C").unwrap_or(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(name: &str) -> EntityDescription {
        EntityDescription {
            kind: EntityKind::ClassLike,
            name: name.to_string(),
            parent: None,
            members: Vec::new(),
            functions: Vec::new(),
        }
    }

    #[test]
    fn asset_name_strips_generated_class_suffix() {
        assert_eq!(entity("BP_Item_C").asset_name(), "BP_Item");
        assert_eq!(entity("BP_Item").asset_name(), "BP_Item");
    }

    #[test]
    fn parent_ref_exposes_name_for_both_origins() {
        let logical = ParentRef::Logical {
            name: "BP_Base_C".to_string(),
            path: "/Game/BP_Base.0".to_string(),
        };
        let native = ParentRef::Native {
            name: "PalWeaponBase".to_string(),
        };

        assert_eq!(logical.name(), "BP_Base_C");
        assert_eq!(native.name(), "PalWeaponBase");
        assert!(native.path().is_none());
    }
}
