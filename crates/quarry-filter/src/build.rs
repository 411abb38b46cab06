use crate::ast::{AggregatorOp, ComparatorOp, FilterNode, MetadataFilter};
use crate::error::{FilterError, ValueKind};
use crate::validate::validate_filter;
use quarry_core::FieldPath;
use serde_json::{Map, Value};

/// Interprets a caller-supplied nested mapping into a validated filter tree.
/// A `$and`/`$or` key introduces an aggregator over child filters; a plain
/// key names a field constrained by `{operator: value}`, or by a bare value
/// as shorthand for `$eq`. The empty object is the neutral filter.
pub fn build_filter(raw: &Value) -> Result<MetadataFilter, FilterError> {
    let root = FieldPath::root();
    let Some(object) = raw.as_object() else {
        return Err(FilterError::NotAnObject {
            path: root,
            actual: ValueKind::of(raw),
        });
    };
    if object.is_empty() {
        return Ok(MetadataFilter::neutral());
    }

    let filter = MetadataFilter::from_root(interpret_object(object, &root)?);
    validate_filter(&filter)?;
    Ok(filter)
}

impl MetadataFilter {
    pub fn from_value(raw: &Value) -> Result<Self, FilterError> {
        build_filter(raw)
    }
}

fn interpret_node(value: &Value, path: &FieldPath) -> Result<FilterNode, FilterError> {
    let Some(object) = value.as_object() else {
        return Err(FilterError::NotAnObject {
            path: path.clone(),
            actual: ValueKind::of(value),
        });
    };
    if object.is_empty() {
        return Err(FilterError::EmptyObject { path: path.clone() });
    }
    interpret_object(object, path)
}

fn interpret_object(object: &Map<String, Value>, path: &FieldPath) -> Result<FilterNode, FilterError> {
    if let Some(operator) = object.keys().find(|key| key.starts_with('$')) {
        if object.len() > 1 {
            return Err(FilterError::OperatorWithSiblings {
                path: path.clone(),
                operator: operator.clone(),
            });
        }
        return interpret_aggregator(operator, &object[operator], path);
    }

    let mut nodes = Vec::new();
    for (field, constraint) in object {
        let field_path = path.child_key(field.as_str());
        match constraint {
            Value::Object(operators) => {
                if operators.is_empty() {
                    return Err(FilterError::EmptyObject { path: field_path });
                }
                for (token, operand) in operators {
                    let Some(op) = ComparatorOp::from_token(token) else {
                        return Err(FilterError::UnknownComparator {
                            path: field_path.child_key(token.as_str()),
                            operator: token.clone(),
                        });
                    };
                    nodes.push(FilterNode::Comparator {
                        field: field.clone(),
                        op,
                        value: operand.clone(),
                    });
                }
            }
            // Bare value shorthand for equality.
            other => nodes.push(FilterNode::Comparator {
                field: field.clone(),
                op: ComparatorOp::Eq,
                value: other.clone(),
            }),
        }
    }

    if nodes.len() == 1 {
        Ok(nodes.remove(0))
    } else {
        Ok(FilterNode::Aggregator {
            op: AggregatorOp::And,
            children: nodes,
        })
    }
}

fn interpret_aggregator(
    operator: &str,
    value: &Value,
    path: &FieldPath,
) -> Result<FilterNode, FilterError> {
    let Some(op) = AggregatorOp::from_token(operator) else {
        return Err(FilterError::UnknownAggregator {
            path: path.child_key(operator),
            operator: operator.to_string(),
        });
    };
    let child_base = path.child_key(operator);
    let Some(items) = value.as_array() else {
        return Err(FilterError::AggregatorNotArray {
            path: child_base,
            operator: operator.to_string(),
        });
    };
    let mut children = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        children.push(interpret_node(item, &child_base.child_index(index))?);
    }
    Ok(FilterNode::Aggregator { op, children })
}

#[cfg(test)]
#[path = "build_test.rs"]
mod tests;
