pub mod policy;
mod returns;

pub use returns::scan_return_specs;

use crate::{
    model::{EntityDescription, EntityKind, FunctionDescription, MemberDescription, ParentRef, ReturnSpec},
    types::{PinKind, RawTypeToken},
};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error as ThisError;

/// Synthetic event-graph functions carry this marker and are never emitted.
pub const EVENT_GRAPH_MARKER: &str = "ExecuteUbergraph";

/// Compiler-generated member name prefixes, excluded from parsing.
pub const GENERATED_NAME_PREFIXES: &[&str] = &["UberGraphFrame", "CallFunc_", "K2Node_", "Temp_"];

///
/// ParseError
///
/// Malformed input is fatal for the whole document; no partial entity list
/// is returned. Per-record structural omissions are not errors.
///

#[derive(Debug, ThisError)]
pub enum ParseError {
    #[error("invalid metadata document: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("metadata document must be a top-level array of records")]
    NotAnArray,
}

/// Parse a raw export document into entity descriptions.
///
/// Only class-like records become entities; every other record is skipped.
/// Standalone function-definition records are scanned separately to recover
/// return metadata for the functions the class records declare.
pub fn parse_document(input: &str) -> Result<Vec<EntityDescription>, ParseError> {
    let value: Value = serde_json::from_str(input)?;
    let Some(records) = value.as_array() else {
        return Err(ParseError::NotAnArray);
    };

    let returns = scan_return_specs(records);

    let mut entities = Vec::new();
    for record in records {
        let Some(record) = record.as_object() else {
            continue;
        };
        let Some(kind) = entity_kind(record) else {
            continue;
        };
        let Some(name) = string_field(record, "Name") else {
            log::warn!("skipping unnamed class-like record");
            continue;
        };

        entities.push(EntityDescription {
            kind,
            name: name.to_string(),
            parent: parent_ref(record),
            members: members_from_record(record),
            functions: functions_from_record(record, &returns),
        });
    }

    Ok(entities)
}

/// Names of the class-like records in a document, without building entities.
/// Used to pre-compute the set of generatable classes before scheduling.
pub fn class_names(input: &str) -> Result<Vec<String>, ParseError> {
    let value: Value = serde_json::from_str(input)?;
    let Some(records) = value.as_array() else {
        return Err(ParseError::NotAnArray);
    };

    let names = records
        .iter()
        .filter_map(Value::as_object)
        .filter(|record| entity_kind(record).is_some())
        .filter_map(|record| string_field(record, "Name"))
        .map(ToString::to_string)
        .collect();

    Ok(names)
}

// Only class-like record tags convert to entities.
fn entity_kind(record: &Map<String, Value>) -> Option<EntityKind> {
    match string_field(record, "Type")? {
        "BlueprintGeneratedClass" => Some(EntityKind::ClassLike),
        "UserDefinedStruct" => Some(EntityKind::StructLike),
        _ => None,
    }
}

// Prefer the blueprint-like `Super` parent; fall back to the native
// `SuperStruct` parent. A record with neither is given no parent.
fn parent_ref(record: &Map<String, Value>) -> Option<ParentRef> {
    if let Some(sup) = object_field(record, "Super") {
        let name = string_field(sup, "ObjectName").and_then(unquote_object_name)?;
        let path = string_field(sup, "ObjectPath").unwrap_or_default();

        return Some(ParentRef::Logical {
            name: name.to_string(),
            path: path.to_string(),
        });
    }

    if let Some(sup) = object_field(record, "SuperStruct") {
        let name = string_field(sup, "ObjectName").and_then(unquote_object_name)?;

        return Some(ParentRef::Native {
            name: name.to_string(),
        });
    }

    None
}

// Extract declared functions from the record's children list. The child
// must match the `Function'Owner:Name'` shape; collisions after
// normalization collapse to the first occurrence.
fn functions_from_record(
    record: &Map<String, Value>,
    returns: &BTreeMap<String, ReturnSpec>,
) -> Vec<FunctionDescription> {
    let mut functions = Vec::new();
    let mut seen = BTreeSet::new();

    let Some(children) = array_field(record, "Children") else {
        return functions;
    };

    for child in children {
        let Some(child) = child.as_object() else {
            continue;
        };
        let Some(object_name) = string_field(child, "ObjectName") else {
            continue;
        };
        let Some(name) = function_name(object_name) else {
            continue;
        };
        // Name identity is case-insensitive; the first-seen casing is kept.
        if !seen.insert(name.to_ascii_lowercase()) {
            continue;
        }

        let ret = returns.get(&name).cloned().unwrap_or_default();
        functions.push(FunctionDescription::new(name, ret));
    }

    functions
}

/// Normalize a child `ObjectName` of the shape `Function'Owner:Name'` into
/// a valid unqualified function name, or reject it.
fn function_name(object_name: &str) -> Option<String> {
    let rest = object_name.strip_prefix("Function'")?;
    let (_, name) = rest.split_once(':')?;
    let name = name.trim_end_matches('\'');

    // Names must be valid unqualified identifiers in the target system.
    let name = name.replace(char::is_whitespace, "_");
    if name.is_empty() || name == "None" || name.contains(EVENT_GRAPH_MARKER) {
        return None;
    }

    Some(name)
}

// Extract declared members from the record's properties list. Only entries
// with a recognized type tag survive; compiler-generated names are dropped;
// collisions collapse to the first occurrence.
fn members_from_record(record: &Map<String, Value>) -> Vec<MemberDescription> {
    let mut members = Vec::new();
    let mut seen = BTreeSet::new();

    let Some(properties) = array_field(record, "ChildProperties") else {
        return members;
    };

    for prop in properties {
        let Some(prop) = prop.as_object() else {
            continue;
        };
        let Some(name) = string_field(prop, "Name") else {
            continue;
        };
        if is_generated_name(name) {
            continue;
        }
        let Some(tag) = string_field(prop, "Type") else {
            continue;
        };
        if !PinKind::recognizes_tag(tag) {
            continue;
        }
        if !seen.insert(name.to_ascii_lowercase()) {
            continue;
        }

        members.push(MemberDescription::new(name, token_from_property(tag, prop)));
    }

    members
}

fn is_generated_name(name: &str) -> bool {
    GENERATED_NAME_PREFIXES
        .iter()
        .any(|prefix| name.starts_with(prefix))
}

/// Build the unresolved type token for a property record.
pub(crate) fn token_from_property(tag: &str, prop: &Map<String, Value>) -> RawTypeToken {
    let mut token = RawTypeToken::scalar(tag);

    match tag {
        "ArrayProperty" => {
            if let Some(inner) = object_field(prop, "Inner") {
                token.inner_tag = string_field(inner, "Type").map(ToString::to_string);
                let (name, path) = symbol_fields(inner);
                token.inner_class_name = name;
                token.inner_class_path = path;
            }
        }
        "MapProperty" => {
            token.map_descriptor = Some(map_descriptor(tag, prop));
        }
        _ => {
            let (name, path) = symbol_fields(prop);
            token.class_name = name;
            token.class_path = path;
        }
    }

    token
}

// Flatten a map property into the delimited descriptor:
// `primary,key_tag,value_tag[,key_class][,value_class]`. A missing side
// truncates the descriptor, which the resolver treats as wholly wildcard.
fn map_descriptor(tag: &str, prop: &Map<String, Value>) -> String {
    let mut fields = vec![tag.to_string()];

    if let Some(key) = object_field(prop, "KeyProp")
        && let Some(key_tag) = string_field(key, "Type")
    {
        fields.push(key_tag.to_string());

        if let Some(value) = object_field(prop, "ValueProp")
            && let Some(value_tag) = string_field(value, "Type")
        {
            fields.push(value_tag.to_string());

            let (key_class, _) = symbol_fields(key);
            let (value_class, _) = symbol_fields(value);
            if key_class.is_some() || value_class.is_some() {
                fields.push(key_class.unwrap_or_default());
                if let Some(value_class) = value_class {
                    fields.push(value_class);
                }
            }
        }
    }

    fields.join(",")
}

// Referenced-symbol name and path for a property record, across the
// qualifier shapes the export uses per kind.
fn symbol_fields(prop: &Map<String, Value>) -> (Option<String>, Option<String>) {
    for key in ["PropertyClass", "Struct", "MetaClass", "InterfaceClass"] {
        let Some(class) = object_field(prop, key) else {
            continue;
        };
        let name = string_field(class, "ObjectName")
            .and_then(unquote_object_name)
            .map(ToString::to_string);
        let path = string_field(class, "ObjectPath")
            .filter(|p| !p.is_empty())
            .map(ToString::to_string);

        if name.is_some() || path.is_some() {
            return (name, path);
        }
    }

    (None, None)
}

/// Unwrap an export object name of the shape `Kind'Name'` to `Name`.
pub(crate) fn unquote_object_name(object_name: &str) -> Option<&str> {
    let (_, rest) = object_name.split_once('\'')?;
    let name = rest.trim_end_matches('\'');

    (!name.is_empty()).then_some(name)
}

pub(crate) fn string_field<'a>(record: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    record.get(key).and_then(Value::as_str)
}

pub(crate) fn object_field<'a>(
    record: &'a Map<String, Value>,
    key: &str,
) -> Option<&'a Map<String, Value>> {
    record.get(key).and_then(Value::as_object)
}

pub(crate) fn array_field<'a>(record: &'a Map<String, Value>, key: &str) -> Option<&'a Vec<Value>> {
    record.get(key).and_then(Value::as_array)
}
