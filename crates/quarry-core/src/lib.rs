pub mod canonical_json;
pub mod field_path;

pub use canonical_json::{canonical_json_bytes, canonical_json_value};
pub use field_path::{FieldPath, FieldPathSegment};
