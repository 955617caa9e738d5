use crate::types::RawTypeToken;
use serde::{Deserialize, Serialize};

///
/// MemberDescription
///
/// A declared member, pre-resolution. `is_component` marks object members
/// whose referenced class is a component, so emitters can attach them
/// rather than treat them as plain references.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct MemberDescription {
    pub name: String,
    pub raw: RawTypeToken,

    #[serde(default)]
    pub is_component: bool,
}

impl MemberDescription {
    #[must_use]
    pub fn new(name: impl Into<String>, raw: RawTypeToken) -> Self {
        let is_component = raw
            .class_name
            .as_deref()
            .is_some_and(|class| class.contains("Component"));

        Self {
            name: name.into(),
            raw,
            is_component,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn component_members_are_flagged() {
        let mut raw = RawTypeToken::scalar("ObjectProperty");
        raw.class_name = Some("StaticMeshComponent".to_string());
        assert!(MemberDescription::new("Mesh", raw).is_component);

        let mut raw = RawTypeToken::scalar("ObjectProperty");
        raw.class_name = Some("ItemDataAsset".to_string());
        assert!(!MemberDescription::new("Data", raw).is_component);
    }
}
