use serde_json::{Map, Value};
use std::collections::BTreeMap;

// Object keys are sorted at every depth; array element order is preserved.
pub fn canonical_json_value(value: &Value) -> Value {
    match value {
        Value::Object(object) => canonicalize_object(object),
        Value::Array(items) => Value::Array(items.iter().map(canonical_json_value).collect()),
        _ => value.clone(),
    }
}

pub fn canonical_json_bytes(value: &Value) -> serde_json::Result<Vec<u8>> {
    serde_json::to_vec(&canonical_json_value(value))
}

fn canonicalize_object(object: &Map<String, Value>) -> Value {
    let mut ordered = BTreeMap::new();
    for (key, value) in object {
        ordered.insert(key.clone(), canonical_json_value(value));
    }

    let mut out = Map::new();
    for (key, value) in ordered {
        out.insert(key, value);
    }
    Value::Object(out)
}

#[cfg(test)]
#[path = "canonical_json_test.rs"]
mod tests;
