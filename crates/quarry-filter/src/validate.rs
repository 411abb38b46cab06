use crate::ast::{ComparatorOp, FilterNode, MetadataFilter};
use crate::error::{FilterError, ValueExpectation, ValueKind};
use quarry_core::FieldPath;
use serde_json::Value;

// Stops at the first failure so the reported path is deterministic.
pub fn validate_filter(filter: &MetadataFilter) -> Result<(), FilterError> {
    match filter.root() {
        // The neutral filter carries no constraints.
        None => Ok(()),
        Some(node) => validate_node(node, &FieldPath::root()),
    }
}

fn validate_node(node: &FilterNode, path: &FieldPath) -> Result<(), FilterError> {
    match node {
        FilterNode::Aggregator { op, children } => {
            let base = path.child_key(op.as_token());
            if children.is_empty() {
                return Err(FilterError::EmptyAggregator {
                    path: base,
                    operator: op.as_token().to_string(),
                });
            }
            for (index, child) in children.iter().enumerate() {
                validate_node(child, &base.child_index(index))?;
            }
            Ok(())
        }
        FilterNode::Comparator { field, op, value } => validate_comparator(
            *op,
            value,
            &path.child_key(field.as_str()).child_key(op.as_token()),
        ),
    }
}

fn validate_comparator(op: ComparatorOp, value: &Value, path: &FieldPath) -> Result<(), FilterError> {
    let actual = ValueKind::of(value);
    match op {
        ComparatorOp::Gt | ComparatorOp::Lt => {
            if actual != ValueKind::Number {
                return Err(type_mismatch(op, path, ValueExpectation::Number, actual));
            }
            Ok(())
        }
        ComparatorOp::Eq | ComparatorOp::Neq | ComparatorOp::Contains => {
            if !actual.is_scalar() {
                return Err(type_mismatch(op, path, ValueExpectation::Scalar, actual));
            }
            Ok(())
        }
        ComparatorOp::In => {
            let Value::Array(items) = value else {
                return Err(type_mismatch(op, path, ValueExpectation::ScalarList, actual));
            };
            if items.is_empty() {
                return Err(FilterError::EmptyValueList {
                    path: path.clone(),
                    operator: op.as_token().to_string(),
                });
            }
            for (index, item) in items.iter().enumerate() {
                let item_kind = ValueKind::of(item);
                if !item_kind.is_scalar() {
                    return Err(type_mismatch(
                        op,
                        &path.child_index(index),
                        ValueExpectation::Scalar,
                        item_kind,
                    ));
                }
            }
            Ok(())
        }
    }
}

fn type_mismatch(
    op: ComparatorOp,
    path: &FieldPath,
    expected: ValueExpectation,
    actual: ValueKind,
) -> FilterError {
    FilterError::TypeMismatch {
        path: path.clone(),
        operator: op.as_token().to_string(),
        expected,
        actual,
    }
}

#[cfg(test)]
#[path = "validate_test.rs"]
mod tests;
