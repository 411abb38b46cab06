pub mod ast;
pub mod build;
pub mod error;
pub mod serialize;
pub mod validate;

pub use ast::{AggregatorOp, ComparatorOp, FilterNode, MetadataFilter};
pub use build::build_filter;
pub use error::{FilterError, ValueExpectation, ValueKind};
pub use serialize::serialize_filter;
pub use validate::validate_filter;
