use crate::types::RawTypeToken;
use serde::{Deserialize, Serialize};

///
/// ReturnSpec
///
/// Return information for a declared function. `Void` is the explicit
/// sentinel recorded when a function-definition record carried zero return
/// candidates; it is distinct from `Unspecified`, where no definition
/// record was seen at all.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum ReturnSpec {
    #[default]
    Unspecified,
    Void,
    Type(RawTypeToken),
}

impl ReturnSpec {
    #[must_use]
    pub const fn is_void(&self) -> bool {
        matches!(self, Self::Void)
    }
}

///
/// FunctionDescription
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct FunctionDescription {
    pub name: String,

    #[serde(default)]
    pub ret: ReturnSpec,
}

impl FunctionDescription {
    #[must_use]
    pub fn new(name: impl Into<String>, ret: ReturnSpec) -> Self {
        Self {
            name: name.into(),
            ret,
        }
    }
}
