use crate::model::{EntityKind, ResolvedEntity};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// SymbolLocator
///
/// Opaque locator returned by an emitter; the scheduler registers it in the
/// catalog under the emitted entity's name.
///

#[derive(Clone, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
#[display("{_0}")]
pub struct SymbolLocator(pub String);

impl From<String> for SymbolLocator {
    fn from(locator: String) -> Self {
        Self(locator)
    }
}

///
/// EmitError
///
/// Terminal per entity: a failed entity is excluded from the catalog and
/// from further scheduling, but never blocks its siblings.
///

#[derive(Debug, ThisError)]
#[error("{message}")]
pub struct EmitError {
    pub message: String,
}

impl EmitError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

///
/// ArtifactEmitter
///
/// The external collaborator boundary. Called once per resolved entity; the
/// core treats the result opaquely.
///

pub trait ArtifactEmitter {
    fn emit(&mut self, entity: &ResolvedEntity) -> Result<SymbolLocator, EmitError>;
}

///
/// Skeleton
///
/// One emitted skeletal definition as recorded in the manifest.
///

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Skeleton {
    pub name: String,
    pub asset_name: String,
    pub locator: String,
    pub kind: EntityKind,
    pub parent: String,
    pub members: Vec<SkeletonMember>,
    pub functions: Vec<SkeletonFunction>,
}

///
/// SkeletonMember
///

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SkeletonMember {
    pub name: String,
    pub ty: String,

    #[serde(default)]
    pub is_component: bool,
}

///
/// SkeletonFunction
///

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SkeletonFunction {
    pub name: String,
    pub has_return: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ret: Option<String>,
}

///
/// Manifest
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Manifest {
    pub skeletons: Vec<Skeleton>,
}

///
/// ManifestEmitter
///
/// Accumulates emitted skeletons into a serializable manifest instead of
/// touching a host runtime. Locators follow the content-path convention
/// `<root>/<asset>.<asset>`.
///

#[derive(Debug)]
pub struct ManifestEmitter {
    content_root: String,
    manifest: Manifest,
}

impl ManifestEmitter {
    #[must_use]
    pub fn new(content_root: impl Into<String>) -> Self {
        Self {
            content_root: content_root.into(),
            manifest: Manifest::default(),
        }
    }

    #[must_use]
    pub fn into_manifest(self) -> Manifest {
        self.manifest
    }
}

impl ArtifactEmitter for ManifestEmitter {
    fn emit(&mut self, entity: &ResolvedEntity) -> Result<SymbolLocator, EmitError> {
        let asset = entity.asset_name();
        let locator = format!("{}/{asset}.{asset}", self.content_root);

        self.manifest.skeletons.push(Skeleton {
            name: entity.name.clone(),
            asset_name: asset.to_string(),
            locator: locator.clone(),
            kind: entity.kind,
            parent: entity.parent.logical_name.clone(),
            members: entity
                .members
                .iter()
                .map(|m| SkeletonMember {
                    name: m.name.clone(),
                    ty: m.ty.to_string(),
                    is_component: m.is_component,
                })
                .collect(),
            functions: entity
                .functions
                .iter()
                .map(|f| SkeletonFunction {
                    name: f.name.clone(),
                    has_return: f.has_return,
                    ret: f.ret.as_ref().map(ToString::to_string),
                })
                .collect(),
        });

        Ok(SymbolLocator(locator))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Symbol;

    #[test]
    fn manifest_emitter_builds_content_locators() {
        let mut emitter = ManifestEmitter::new("/Game/Generated");
        let entity = ResolvedEntity {
            kind: EntityKind::ClassLike,
            name: "BP_Item_C".to_string(),
            parent: Symbol::native("Actor", "/Script/Engine.Actor"),
            members: Vec::new(),
            functions: Vec::new(),
        };

        let locator = emitter.emit(&entity).unwrap();
        assert_eq!(locator.0, "/Game/Generated/BP_Item.BP_Item");

        let manifest = emitter.into_manifest();
        assert_eq!(manifest.skeletons.len(), 1);
        assert_eq!(manifest.skeletons[0].asset_name, "BP_Item");
        assert_eq!(manifest.skeletons[0].parent, "Actor");
    }
}
