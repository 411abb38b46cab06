mod json;
mod yaml;

use crate::pipeline::PipelineDocument;
use quarry_core::FieldPath;
use quarry_schema::validate_schema_instance;
use quarry_schema::versions::SCHEMA_PIPELINE_0_0_1;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Auto,
    Json,
    Yaml,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsePipelineOptions {
    pub format: DocumentFormat,
    pub validate_schema: bool,
}

impl Default for ParsePipelineOptions {
    fn default() -> Self {
        Self {
            format: DocumentFormat::Auto,
            validate_schema: true,
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("json decode error: {0}")]
    Json(String),
    #[error("yaml decode error: {0}")]
    Yaml(String),
    #[error("pipeline document must contain string field `schema`")]
    MissingSchema,
    #[error("unsupported pipeline schema: {0}")]
    UnsupportedSchema(String),
    #[error("schema validation failed at `{path}`: {message}")]
    Schema { path: FieldPath, message: String },
    #[error("typed parse failed: {0}")]
    Typed(String),
}

pub fn parse_pipeline_document(input: &str) -> Result<PipelineDocument, ParseError> {
    parse_pipeline_document_with_options(input, ParsePipelineOptions::default())
}

pub fn parse_pipeline_document_with_options(
    input: &str,
    options: ParsePipelineOptions,
) -> Result<PipelineDocument, ParseError> {
    let value = match options.format {
        DocumentFormat::Auto => {
            if looks_like_json(input) {
                json::parse_json(input)
            } else {
                yaml::parse_yaml(input)
            }
        }
        DocumentFormat::Json => json::parse_json(input),
        DocumentFormat::Yaml => yaml::parse_yaml(input),
    }?;

    let schema_id = value
        .as_object()
        .and_then(|object| object.get("schema"))
        .and_then(Value::as_str)
        .ok_or(ParseError::MissingSchema)?;
    if schema_id != SCHEMA_PIPELINE_0_0_1 {
        return Err(ParseError::UnsupportedSchema(schema_id.to_string()));
    }

    if options.validate_schema {
        if let Some(first) = validate_schema_instance(SCHEMA_PIPELINE_0_0_1, &value)
            .into_iter()
            .next()
        {
            return Err(ParseError::Schema {
                path: first.path,
                message: first.message,
            });
        }
    }

    serde_json::from_value(value).map_err(|error| ParseError::Typed(error.to_string()))
}

fn looks_like_json(input: &str) -> bool {
    let trimmed = input.trim_start();
    trimmed.starts_with('{') || trimmed.starts_with('[')
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
