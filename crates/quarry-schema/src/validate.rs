use jsonschema::JSONSchema;
use quarry_core::{FieldPath, FieldPathSegment};
use serde_json::Value;

use crate::registry::get_json_schema;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaViolation {
    pub path: FieldPath,
    pub message: String,
}

/// Validates an instance against an embedded schema. Violations come back
/// sorted by path so callers can report the first one deterministically.
pub fn validate_schema_instance(schema_id: &str, instance: &Value) -> Vec<SchemaViolation> {
    let Some(schema) = get_json_schema(schema_id) else {
        return vec![SchemaViolation {
            path: FieldPath::root(),
            message: format!("unknown schema id: {schema_id}"),
        }];
    };

    let schema_json: Value = match serde_json::from_str(schema.json) {
        Ok(value) => value,
        Err(error) => {
            return vec![SchemaViolation {
                path: FieldPath::root(),
                message: format!("embedded schema json parse failed: {error}"),
            }];
        }
    };

    let compiled = match JSONSchema::options().compile(&schema_json) {
        Ok(compiled) => compiled,
        Err(error) => {
            return vec![SchemaViolation {
                path: FieldPath::root(),
                message: format!("schema compile failed for {schema_id}: {error}"),
            }];
        }
    };

    let mut violations = Vec::new();
    if let Err(errors) = compiled.validate(instance) {
        for error in errors {
            violations.push(SchemaViolation {
                path: json_pointer_to_field_path(error.instance_path.to_string().as_str()),
                message: error.to_string(),
            });
        }
    }
    violations.sort_by(|left, right| {
        (&left.path, &left.message).cmp(&(&right.path, &right.message))
    });
    violations
}

fn json_pointer_to_field_path(pointer: &str) -> FieldPath {
    if pointer.is_empty() || pointer == "/" {
        return FieldPath::root();
    }

    let mut segments = Vec::new();
    for raw_segment in pointer.trim_start_matches('/').split('/') {
        if raw_segment.is_empty() {
            continue;
        }
        let decoded = raw_segment.replace("~1", "/").replace("~0", "~");
        if let Ok(index) = decoded.parse::<usize>() {
            segments.push(FieldPathSegment::Index(index));
        } else {
            segments.push(FieldPathSegment::Key(decoded));
        }
    }
    FieldPath::from_segments(segments)
}

#[cfg(test)]
#[path = "validate_test.rs"]
mod tests;
