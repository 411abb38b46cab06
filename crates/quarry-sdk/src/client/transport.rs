use crate::client::config::ClientConfig;
use reqwest::header::{HeaderMap, HeaderValue};
use serde_json::{Map, Value};
use std::time::Duration;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TransportError {
    #[error("network error: {0}")]
    Network(String),
    #[error("api error ({status}): {message}")]
    Api { status: u16, message: String },
    #[error("response decode failed: {0}")]
    Decode(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPart {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// The transport boundary: accepts pre-validated, serialized bodies and
/// returns parsed JSON. Errors propagate unchanged and nothing is retried,
/// since run requests are not assumed idempotent.
pub trait ApiTransport: Send + Sync {
    fn get(&self, url: &str, query: &[(&str, String)]) -> Result<Value, TransportError>;
    fn post_json(&self, url: &str, body: &Value) -> Result<Value, TransportError>;
    fn post_multipart(
        &self,
        url: &str,
        fields: &Map<String, Value>,
        parts: Vec<UploadPart>,
    ) -> Result<Value, TransportError>;
    fn delete(&self, url: &str) -> Result<Value, TransportError>;
}

pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self, TransportError> {
        let mut api_key = HeaderValue::from_str(config.api_key.as_str())
            .map_err(|error| TransportError::Network(format!("invalid api key header: {error}")))?;
        api_key.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert("API-KEY", api_key);

        let client = reqwest::blocking::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|error| TransportError::Network(error.to_string()))?;
        Ok(Self { client })
    }

    fn handle(response: reqwest::blocking::Response) -> Result<Value, TransportError> {
        let status = response.status();
        let text = response
            .text()
            .map_err(|error| TransportError::Network(error.to_string()))?;
        // Empty or non-JSON bodies are tolerated; delete endpoints return
        // nothing on success.
        let value: Value = serde_json::from_str(text.as_str()).unwrap_or(Value::Object(Map::new()));

        if status.is_success() {
            return Ok(value);
        }
        Err(TransportError::Api {
            status: status.as_u16(),
            message: error_message(&value, status),
        })
    }
}

fn error_message(value: &Value, status: reqwest::StatusCode) -> String {
    if let Some(object) = value.as_object() {
        let message = object
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or_default();
        let detail = object.get("error").map(plain_text).unwrap_or_default();
        if !message.is_empty() && !detail.is_empty() {
            return format!("{message}: {detail}");
        }
        if !message.is_empty() {
            return message.to_string();
        }
        if !detail.is_empty() {
            return detail;
        }
    }
    status
        .canonical_reason()
        .unwrap_or("request failed")
        .to_string()
}

fn plain_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

impl ApiTransport for HttpTransport {
    fn get(&self, url: &str, query: &[(&str, String)]) -> Result<Value, TransportError> {
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .map_err(|error| TransportError::Network(error.to_string()))?;
        Self::handle(response)
    }

    fn post_json(&self, url: &str, body: &Value) -> Result<Value, TransportError> {
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .map_err(|error| TransportError::Network(error.to_string()))?;
        Self::handle(response)
    }

    fn post_multipart(
        &self,
        url: &str,
        fields: &Map<String, Value>,
        parts: Vec<UploadPart>,
    ) -> Result<Value, TransportError> {
        let mut form = reqwest::blocking::multipart::Form::new();
        for (key, value) in fields {
            form = form.text(key.clone(), plain_text(value));
        }
        for part in parts {
            let file = reqwest::blocking::multipart::Part::bytes(part.bytes)
                .file_name(part.file_name)
                .mime_str(part.mime_type.as_str())
                .map_err(|error| TransportError::Network(error.to_string()))?;
            form = form.part("files", file);
        }
        let response = self
            .client
            .post(url)
            .multipart(form)
            .send()
            .map_err(|error| TransportError::Network(error.to_string()))?;
        Self::handle(response)
    }

    fn delete(&self, url: &str) -> Result<Value, TransportError> {
        let response = self
            .client
            .delete(url)
            .send()
            .map_err(|error| TransportError::Network(error.to_string()))?;
        Self::handle(response)
    }
}
