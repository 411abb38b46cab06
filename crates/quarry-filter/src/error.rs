use quarry_core::FieldPath;
use serde_json::Value;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl ValueKind {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Number(_) => ValueKind::Number,
            Value::String(_) => ValueKind::String,
            Value::Array(_) => ValueKind::Array,
            Value::Object(_) => ValueKind::Object,
        }
    }

    pub fn is_scalar(self) -> bool {
        matches!(
            self,
            ValueKind::Null | ValueKind::Bool | ValueKind::Number | ValueKind::String
        )
    }
}

impl Display for ValueKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ValueKind::Null => "null",
            ValueKind::Bool => "a boolean",
            ValueKind::Number => "a number",
            ValueKind::String => "a string",
            ValueKind::Array => "a list",
            ValueKind::Object => "an object",
        };
        write!(f, "{name}")
    }
}

/// What a comparator operand was required to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueExpectation {
    Number,
    Scalar,
    ScalarList,
}

impl Display for ValueExpectation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ValueExpectation::Number => "a numeric value",
            ValueExpectation::Scalar => "a scalar value",
            ValueExpectation::ScalarList => "a list of scalar values",
        };
        write!(f, "{name}")
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum FilterError {
    #[error("filter node at `{path}` must be an object, got {actual}")]
    NotAnObject { path: FieldPath, actual: ValueKind },
    #[error("filter node at `{path}` must not be empty")]
    EmptyObject { path: FieldPath },
    #[error("unknown aggregator operator `{operator}` at `{path}`")]
    UnknownAggregator { path: FieldPath, operator: String },
    #[error("unknown comparator operator `{operator}` at `{path}`")]
    UnknownComparator { path: FieldPath, operator: String },
    #[error("operator `{operator}` at `{path}` cannot share an object with other keys")]
    OperatorWithSiblings { path: FieldPath, operator: String },
    #[error("aggregator `{operator}` at `{path}` requires a list of child filters")]
    AggregatorNotArray { path: FieldPath, operator: String },
    #[error("aggregator `{operator}` at `{path}` must have at least one child")]
    EmptyAggregator { path: FieldPath, operator: String },
    #[error("comparator `{operator}` at `{path}` requires a non-empty list")]
    EmptyValueList { path: FieldPath, operator: String },
    #[error("comparator `{operator}` at `{path}` expects {expected}, got {actual}")]
    TypeMismatch {
        path: FieldPath,
        operator: String,
        expected: ValueExpectation,
        actual: ValueKind,
    },
}
