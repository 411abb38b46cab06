use crate::ast::{FilterNode, MetadataFilter};
use serde_json::{Map, Value};

// Aggregator children keep their insertion order; the server may rely on
// declaration order when short-circuiting, so they are never reordered or
// deduplicated.
pub fn serialize_filter(filter: &MetadataFilter) -> Value {
    match filter.root() {
        None => Value::Object(Map::new()),
        Some(node) => serialize_node(node),
    }
}

impl MetadataFilter {
    pub fn to_value(&self) -> Value {
        serialize_filter(self)
    }
}

fn serialize_node(node: &FilterNode) -> Value {
    match node {
        FilterNode::Aggregator { op, children } => {
            let mut object = Map::new();
            object.insert(
                op.as_token().to_string(),
                Value::Array(children.iter().map(serialize_node).collect()),
            );
            Value::Object(object)
        }
        FilterNode::Comparator { field, op, value } => {
            let mut constraint = Map::new();
            constraint.insert(op.as_token().to_string(), value.clone());
            let mut object = Map::new();
            object.insert(field.clone(), Value::Object(constraint));
            Value::Object(object)
        }
    }
}

#[cfg(test)]
#[path = "serialize_test.rs"]
mod tests;
