//! JSON codec capability shared by every model entity
//!
//! Decoding is total: a missing or mistyped field falls back to the zero
//! value of its type (or to `None` when presence matters), so a document
//! written for an older or newer revision of the format still decodes.

use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Bidirectional mapping between a model entity and its JSON form
pub trait JsonCodec: Sized {
    /// Build the entity from a JSON value, never failing
    fn decode(json: &Value) -> Self;

    /// Emit the entity as JSON, omitting fields that were absent on decode
    fn encode(&self) -> Value;
}

/// Member `key` of `json` when it holds an object
///
/// Missing members, `null` and any other JSON type yield `None`.
pub fn present_object<'a>(json: &'a Value, key: &str) -> Option<&'a Value> {
    json.get(key).filter(|value| value.is_object())
}

/// Borrowed string member, `None` when missing or not a string
pub fn opt_str<'a>(json: &'a Value, key: &str) -> Option<&'a str> {
    json.get(key).and_then(Value::as_str)
}

/// String member, `None` when missing or not a string
pub fn opt_string(json: &Value, key: &str) -> Option<String> {
    opt_str(json, key).map(str::to_string)
}

/// String member, empty when missing or not a string
pub fn string_value(json: &Value, key: &str) -> String {
    opt_string(json, key).unwrap_or_default()
}

/// Boolean member, `false` when missing or not a boolean
pub fn bool_value(json: &Value, key: &str) -> bool {
    json.get(key).and_then(Value::as_bool).unwrap_or(false)
}

/// Array of strings, `None` when the member is not an array
///
/// Non-string elements are skipped.
pub fn opt_string_array(json: &Value, key: &str) -> Option<Vec<String>> {
    json.get(key).and_then(Value::as_array).map(|items| {
        items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect()
    })
}

/// Array of strings, empty when the member is not an array
pub fn string_array(json: &Value, key: &str) -> Vec<String> {
    opt_string_array(json, key).unwrap_or_default()
}

/// Mapping of decoded entities, `None` when the member is not an object
pub fn opt_model_map<T: JsonCodec>(json: &Value, key: &str) -> Option<BTreeMap<String, T>> {
    json.get(key).and_then(Value::as_object).map(|members| {
        members
            .iter()
            .map(|(name, value)| (name.clone(), T::decode(value)))
            .collect()
    })
}

/// Mapping of decoded entities, empty when the member is not an object
pub fn model_map<T: JsonCodec>(json: &Value, key: &str) -> BTreeMap<String, T> {
    opt_model_map(json, key).unwrap_or_default()
}

/// Encode a mapping of entities as a JSON object with the same keys
pub fn encode_map<T: JsonCodec>(map: &BTreeMap<String, T>) -> Value {
    Value::Object(
        map.iter()
            .map(|(name, entity)| (name.clone(), entity.encode()))
            .collect(),
    )
}

/// Encode a sequence of strings as a JSON array
pub fn encode_strings(values: &[String]) -> Value {
    Value::Array(values.iter().cloned().map(Value::String).collect())
}

/// Insert `value` under `key` only when it is present
pub(crate) fn insert_opt<T: Into<Value>>(
    object: &mut Map<String, Value>,
    key: &str,
    value: Option<T>,
) {
    if let Some(value) = value {
        object.insert(key.to_string(), value.into());
    }
}
