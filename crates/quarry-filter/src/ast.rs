use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregatorOp {
    And,
    Or,
}

impl AggregatorOp {
    pub fn as_token(self) -> &'static str {
        match self {
            AggregatorOp::And => "$and",
            AggregatorOp::Or => "$or",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "$and" => Some(AggregatorOp::And),
            "$or" => Some(AggregatorOp::Or),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparatorOp {
    Eq,
    Neq,
    Gt,
    Lt,
    In,
    Contains,
}

impl ComparatorOp {
    pub fn as_token(self) -> &'static str {
        match self {
            ComparatorOp::Eq => "$eq",
            ComparatorOp::Neq => "$neq",
            ComparatorOp::Gt => "$gt",
            ComparatorOp::Lt => "$lt",
            ComparatorOp::In => "$in",
            ComparatorOp::Contains => "$contains",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "$eq" => Some(ComparatorOp::Eq),
            "$neq" => Some(ComparatorOp::Neq),
            "$gt" => Some(ComparatorOp::Gt),
            "$lt" => Some(ComparatorOp::Lt),
            "$in" => Some(ComparatorOp::In),
            "$contains" => Some(ComparatorOp::Contains),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FilterNode {
    Comparator {
        field: String,
        op: ComparatorOp,
        value: Value,
    },
    Aggregator {
        op: AggregatorOp,
        children: Vec<FilterNode>,
    },
}

/// A metadata filter as sent alongside search and listing requests. A filter
/// without a root node is the neutral filter: it constrains nothing and
/// serializes to `{}`.
#[derive(Debug, Clone, PartialEq)]
pub struct MetadataFilter {
    root: Option<FilterNode>,
}

impl MetadataFilter {
    pub fn neutral() -> Self {
        Self { root: None }
    }

    pub(crate) fn from_root(node: FilterNode) -> Self {
        Self { root: Some(node) }
    }

    pub fn root(&self) -> Option<&FilterNode> {
        self.root.as_ref()
    }

    pub fn is_neutral(&self) -> bool {
        self.root.is_none()
    }
}

impl Default for MetadataFilter {
    fn default() -> Self {
        Self::neutral()
    }
}
