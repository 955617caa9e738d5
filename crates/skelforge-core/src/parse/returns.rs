use crate::{
    model::ReturnSpec,
    parse::{array_field, string_field, token_from_property},
};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

///
/// Return-metadata scan over standalone function-definition records.
///
/// The resulting map is keyed by normalized function name and is
/// last-write-wins across duplicate records, unlike the first-wins dedup
/// applied to member and function lists.
///

pub fn scan_return_specs(records: &[Value]) -> BTreeMap<String, ReturnSpec> {
    let mut specs = BTreeMap::new();

    for record in records {
        let Some(record) = record.as_object() else {
            continue;
        };
        if string_field(record, "Type") != Some("Function") {
            continue;
        }
        let Some(name) = string_field(record, "Name") else {
            continue;
        };
        let name = name.replace(char::is_whitespace, "_");

        specs.insert(name, return_spec(record));
    }

    specs
}

// A function record with zero return candidates is explicitly void.
fn return_spec(record: &Map<String, Value>) -> ReturnSpec {
    let Some(params) = array_field(record, "ChildProperties") else {
        return ReturnSpec::Void;
    };

    // At most one candidate is taken, first in declaration order.
    for param in params {
        let Some(param) = param.as_object() else {
            continue;
        };
        if !is_return_candidate(param) {
            continue;
        }
        let Some(tag) = string_field(param, "Type") else {
            continue;
        };

        return ReturnSpec::Type(token_from_property(tag, param));
    }

    ReturnSpec::Void
}

/// A parameter is a return candidate if flagged as the return parameter, or
/// flagged as output without also being a by-reference parameter. A
/// parameter flagged output+by-reference is never a return candidate.
fn is_return_candidate(param: &Map<String, Value>) -> bool {
    let flags = string_field(param, "PropertyFlags").unwrap_or_default();

    if flags.contains("ReturnParm") {
        return true;
    }

    flags.contains("OutParm") && !flags.contains("ReferenceParm")
}
