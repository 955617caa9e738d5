use crate::catalog::Symbol;
use derive_more::{Display, FromStr};
use serde::{Deserialize, Serialize};
use std::fmt;

///
/// ContainerShape
///

#[derive(
    Clone, Copy, Debug, Default, Deserialize, Display, Eq, FromStr, PartialEq, Serialize,
)]
pub enum ContainerShape {
    #[default]
    None,
    Array,
    Map,
}

///
/// PinKind
///
/// Closed primitive taxonomy for resolved member and return types. Raw
/// export tags outside the table map to `Wildcard`, never an error.
///

#[derive(
    Clone, Copy, Debug, Deserialize, Display, Eq, FromStr, Hash, PartialEq, Serialize,
)]
#[remain::sorted]
pub enum PinKind {
    Bool,
    Byte,
    Class,
    Delegate,
    Double,
    Float,
    Int,
    Int64,
    Interface,
    MulticastDelegate,
    Name,
    Object,
    SoftObject,
    String,
    Struct,
    Text,
    UInt32,
    WeakObject,
    Wildcard,
}

impl PinKind {
    /// All kinds a raw tag can map onto directly, excluding `Wildcard`.
    pub const TABLE: &'static [(&'static str, Self)] = &[
        ("BoolProperty", Self::Bool),
        ("ByteProperty", Self::Byte),
        ("EnumProperty", Self::Byte),
        ("IntProperty", Self::Int),
        ("Int64Property", Self::Int64),
        ("UInt32Property", Self::UInt32),
        ("FloatProperty", Self::Float),
        ("DoubleProperty", Self::Double),
        ("StrProperty", Self::String),
        ("NameProperty", Self::Name),
        ("TextProperty", Self::Text),
        ("StructProperty", Self::Struct),
        ("ObjectProperty", Self::Object),
        ("ClassProperty", Self::Class),
        ("SoftObjectProperty", Self::SoftObject),
        ("SoftClassProperty", Self::SoftObject),
        ("WeakObjectProperty", Self::WeakObject),
        ("InterfaceProperty", Self::Interface),
        ("DelegateProperty", Self::Delegate),
        ("MulticastDelegateProperty", Self::MulticastDelegate),
        ("MulticastInlineDelegateProperty", Self::MulticastDelegate),
    ];

    /// Map a raw export tag onto the kind table.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        Self::TABLE
            .iter()
            .find(|(t, _)| *t == tag)
            .map_or(Self::Wildcard, |(_, kind)| *kind)
    }

    /// True for tags the parser accepts as member types: anything in the
    /// kind table plus the two container tags.
    #[must_use]
    pub fn recognizes_tag(tag: &str) -> bool {
        tag == "ArrayProperty"
            || tag == "MapProperty"
            || Self::TABLE.iter().any(|(t, _)| *t == tag)
    }

    /// Kinds that must carry a symbol reference once resolved.
    #[must_use]
    pub const fn is_symbol_bearing(self) -> bool {
        matches!(
            self,
            Self::Class | Self::Interface | Self::Object | Self::Struct
        )
    }

    /// Byte doubles as enum-as-byte; an enum class name may accompany it.
    #[must_use]
    pub const fn is_enum_like(self) -> bool {
        matches!(self, Self::Byte)
    }

    /// Root symbol name used when no strategy can resolve a reference of
    /// this kind.
    #[must_use]
    pub const fn root_symbol_name(self) -> &'static str {
        match self {
            Self::Class => "Class",
            Self::Interface => "Interface",
            Self::Struct => "ScriptStruct",
            _ => "Object",
        }
    }
}

///
/// RawTypeToken
///
/// The unresolved form of a member or return type, straight out of the
/// export. Invariants: an array token carries exactly one inner tag; a map
/// token carries its key/value kinds inside the delimited descriptor.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct RawTypeToken {
    /// Primary kind tag, e.g. `IntProperty` or `ArrayProperty`.
    pub tag: String,

    /// Referenced symbol name for object/class/struct-like kinds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,

    /// Export object path qualifying `class_name`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_path: Option<String>,

    /// Inner element tag for array tokens.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inner_tag: Option<String>,

    /// Inner element symbol name for array tokens.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inner_class_name: Option<String>,

    /// Inner element symbol path for array tokens.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inner_class_path: Option<String>,

    /// Delimited map descriptor:
    /// `primary,key_tag,value_tag[,key_class][,value_class]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map_descriptor: Option<String>,
}

impl RawTypeToken {
    #[must_use]
    pub fn scalar(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn container_shape(&self) -> ContainerShape {
        match self.tag.as_str() {
            "ArrayProperty" => ContainerShape::Array,
            "MapProperty" => ContainerShape::Map,
            _ => ContainerShape::None,
        }
    }
}

///
/// SymbolRef
///
/// Outcome of symbol resolution: a concrete catalog symbol, or the explicit
/// generic fallback for the requested kind. The fallback is a valid result,
/// not an error.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum SymbolRef {
    Known(Symbol),
    Fallback(PinKind),
}

impl SymbolRef {
    #[must_use]
    pub const fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }

    /// Logical name carried by the reference; fallbacks resolve to the root
    /// symbol of their kind.
    #[must_use]
    pub fn logical_name(&self) -> &str {
        match self {
            Self::Known(symbol) => &symbol.logical_name,
            Self::Fallback(kind) => kind.root_symbol_name(),
        }
    }
}

impl fmt::Display for SymbolRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.logical_name())
    }
}

///
/// ResolvedType
///
/// Canonical output of the type resolver. For arrays the primary kind slot
/// holds the element kind; for maps it holds the value kind and `key` the
/// key kind. When a kind is symbol-bearing its symbol slot is always
/// populated, concrete or fallback.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ResolvedType {
    pub kind: PinKind,
    pub container: ContainerShape,

    /// Element kind, present for array shapes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inner: Option<PinKind>,

    /// Key kind, present for map shapes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<PinKind>,

    /// Symbol for the primary slot (scalar, array element, or map value).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<SymbolRef>,

    /// Symbol for the map key slot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_symbol: Option<SymbolRef>,
}

impl ResolvedType {
    #[must_use]
    pub const fn scalar(kind: PinKind) -> Self {
        Self {
            kind,
            container: ContainerShape::None,
            inner: None,
            key: None,
            symbol: None,
            key_symbol: None,
        }
    }

    /// Number of fallback symbol references this type carries.
    #[must_use]
    pub fn fallback_count(&self) -> usize {
        [self.symbol.as_ref(), self.key_symbol.as_ref()]
            .into_iter()
            .flatten()
            .filter(|s| s.is_fallback())
            .count()
    }
}

impl fmt::Display for ResolvedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let primary = match (&self.symbol, self.kind) {
            (Some(symbol), kind) => format!("{kind}({symbol})"),
            (None, kind) => kind.to_string(),
        };

        match self.container {
            ContainerShape::None => write!(f, "{primary}"),
            ContainerShape::Array => write!(f, "Array<{primary}>"),
            ContainerShape::Map => {
                let key = match (&self.key_symbol, self.key) {
                    (Some(symbol), Some(kind)) => format!("{kind}({symbol})"),
                    (None, Some(kind)) => kind.to_string(),
                    (_, None) => PinKind::Wildcard.to_string(),
                };
                write!(f, "Map<{key}, {primary}>")
            }
        }
    }
}
