//! Type-safe schema generation for Gemini structured outputs.
//!
//! Uses the `schemars` crate to generate JSON schemas from Rust types, then
//! rewrites them into the OpenAPI subset Gemini accepts as `responseSchema`.
//!
//! # Example
//!
//! ```rust,ignore
//! use schemars::JsonSchema;
//! use serde::Deserialize;
//! use gemini_client::StructuredOutput;
//!
//! #[derive(Deserialize, JsonSchema)]
//! struct Item {
//!     /// The name of the item.
//!     name: String,
//!     quantity: f64,
//! }
//!
//! let schema = Item::gemini_schema();
//! ```

use schemars::{schema_for, JsonSchema};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Keywords that Gemini rejects or that only matter to JSON Schema tooling.
const UNSUPPORTED_KEYWORDS: [&str; 6] = [
    "$schema",
    "definitions",
    "title",
    "format",
    "default",
    "additionalProperties",
];

/// Trait for types that can be used as Gemini structured output.
///
/// Automatically implemented for any type that implements `JsonSchema + DeserializeOwned`.
pub trait StructuredOutput: JsonSchema + DeserializeOwned {
    /// Generate a Gemini-compatible response schema for this type.
    ///
    /// Gemini requires:
    /// 1. Fully inlined schemas (no `$ref`)
    /// 2. Upper-case type names and `nullable` instead of `null` unions
    /// 3. No `additionalProperties`, `definitions` or `$schema`
    ///
    /// Every object property is also listed in `required` and in
    /// `propertyOrdering` so the model emits all fields in declaration order.
    fn gemini_schema() -> Value {
        let schema = schema_for!(Self);
        let mut value = serde_json::to_value(schema).unwrap_or_default();

        inline_refs(&mut value);
        to_gemini(&mut value);

        value
    }

    /// Get the schema name for this type.
    fn type_name() -> String {
        <Self as JsonSchema>::schema_name()
    }
}

impl<T: JsonSchema + DeserializeOwned> StructuredOutput for T {}

/// Inline all `$ref` references using the root `definitions` section.
fn inline_refs(value: &mut Value) {
    let definitions = match value {
        Value::Object(map) => map.get("definitions").cloned(),
        _ => None,
    };

    if let Some(defs) = definitions {
        inline_refs_recursive(value, &defs);
    }
}

fn inline_refs_recursive(value: &mut Value, definitions: &Value) {
    match value {
        Value::Object(map) => {
            if let Some(Value::String(ref_path)) = map.get("$ref").cloned() {
                if let Some(type_name) = ref_path.strip_prefix("#/definitions/") {
                    if let Some(def) = definitions.get(type_name) {
                        *value = def.clone();
                        inline_refs_recursive(value, definitions);
                        return;
                    }
                }
            }

            for (_, v) in map.iter_mut() {
                inline_refs_recursive(v, definitions);
            }
        }
        Value::Array(arr) => {
            for item in arr.iter_mut() {
                inline_refs_recursive(item, definitions);
            }
        }
        _ => {}
    }
}

/// Rewrite one schema node (and its children) into Gemini's dialect.
fn to_gemini(value: &mut Value) {
    let Value::Object(map) = value else {
        return;
    };

    for key in UNSUPPORTED_KEYWORDS {
        map.remove(key);
    }

    collapse_single_all_of(map);
    collapse_nullable_any_of(map);
    normalize_type(map);

    if map.get("type").and_then(Value::as_str) == Some("OBJECT") {
        require_all_properties(map);
    }

    if let Some(Value::Object(props)) = map.get_mut("properties") {
        for (_, prop) in props.iter_mut() {
            to_gemini(prop);
        }
    }
    if let Some(items) = map.get_mut("items") {
        to_gemini(items);
    }
    if let Some(Value::Array(variants)) = map.get_mut("anyOf") {
        for variant in variants.iter_mut() {
            to_gemini(variant);
        }
    }
}

/// schemars wraps a described `$ref` as `allOf: [<schema>]`.
fn collapse_single_all_of(map: &mut Map<String, Value>) {
    let single = match map.get("allOf") {
        Some(Value::Array(arr)) if arr.len() == 1 => arr[0].clone(),
        _ => return,
    };
    map.remove("allOf");
    merge_missing(map, single);

    for key in UNSUPPORTED_KEYWORDS {
        map.remove(key);
    }
}

/// `Option<Struct>` becomes `anyOf: [<schema>, {type: null}]`.
fn collapse_nullable_any_of(map: &mut Map<String, Value>) {
    let Some(Value::Array(variants)) = map.get("anyOf") else {
        return;
    };
    let (nulls, rest): (Vec<Value>, Vec<Value>) = variants
        .iter()
        .cloned()
        .partition(|v| v.get("type").and_then(Value::as_str) == Some("null"));

    if nulls.is_empty() {
        return;
    }

    map.remove("anyOf");
    map.insert("nullable".to_string(), Value::Bool(true));
    if rest.len() == 1 {
        if let Some(only) = rest.into_iter().next() {
            merge_missing(map, only);
        }
        for key in UNSUPPORTED_KEYWORDS {
            map.remove(key);
        }
    } else {
        map.insert("anyOf".to_string(), Value::Array(rest));
    }
}

/// Upper-case type names; `["string", "null"]` becomes `STRING` + `nullable`.
fn normalize_type(map: &mut Map<String, Value>) {
    let Some(ty) = map.get("type").cloned() else {
        return;
    };

    match ty {
        Value::String(name) => {
            map.insert("type".to_string(), Value::String(name.to_uppercase()));
        }
        Value::Array(names) => {
            let names: Vec<&str> = names.iter().filter_map(Value::as_str).collect();
            let non_null: Vec<String> = names
                .iter()
                .filter(|n| **n != "null")
                .map(|n| n.to_uppercase())
                .collect();

            if non_null.len() < names.len() {
                map.insert("nullable".to_string(), Value::Bool(true));
            }

            map.remove("type");
            match non_null.as_slice() {
                [single] => {
                    map.insert("type".to_string(), Value::String(single.clone()));
                }
                many => {
                    let variants = many
                        .iter()
                        .map(|n| serde_json::json!({ "type": n }))
                        .collect();
                    map.insert("anyOf".to_string(), Value::Array(variants));
                }
            }
        }
        _ => {}
    }
}

fn require_all_properties(map: &mut Map<String, Value>) {
    let keys: Vec<Value> = match map.get("properties") {
        Some(Value::Object(props)) => props.keys().map(|k| Value::String(k.clone())).collect(),
        _ => return,
    };

    map.insert("required".to_string(), Value::Array(keys.clone()));
    map.insert("propertyOrdering".to_string(), Value::Array(keys));
}

/// Copy keys from `other` that `map` does not already define.
fn merge_missing(map: &mut Map<String, Value>, other: Value) {
    if let Value::Object(other) = other {
        for (k, v) in other {
            map.entry(k).or_insert(v);
        }
    }
}
