use crate::parse::ParseError;
use serde_json::Value;

pub(crate) fn parse_yaml(input: &str) -> Result<Value, ParseError> {
    serde_yaml::from_str(input).map_err(|error| ParseError::Yaml(error.to_string()))
}
