use crate::parse::ParseError;
use serde_json::Value;

pub(crate) fn parse_json(input: &str) -> Result<Value, ParseError> {
    serde_json::from_str(input).map_err(|error| ParseError::Json(error.to_string()))
}
