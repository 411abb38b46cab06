mod config;
mod error;
mod models;
mod transport;
mod urls;

pub use config::{
    ClientConfig, ConfigError, API_KEY_ENV, BASE_URL_ENV, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_MS,
};
pub use error::ClientError;
pub use models::{
    Chunk, ContextInfo, FileRecord, ListFilesQuery, PipelineInfo, RunListQuery, RunRecord,
    RunStatus, SearchQuery,
};
pub use transport::{ApiTransport, HttpTransport, TransportError, UploadPart};
pub use urls::Urls;

use crate::pipeline::{deploy_request_body, resolve_overrides, run_request_body, PipelineDefinition};
use quarry_filter::serialize_filter;
use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

pub const SUPPORTED_FILE_TYPES: &[&str] = &[".pdf", ".docx", ".txt", ".md"];
pub const RESERVED_METADATA_KEYS: &[&str] = &["file_name", "user_id", "file_path", "file_id"];

/// Entry point for the remote retrieval service. All request bodies are
/// built and validated locally before anything touches the transport; a
/// malformed filter, pipeline, or override never leaves the process.
pub struct QuarryClient {
    transport: Box<dyn ApiTransport>,
    urls: Urls,
}

impl QuarryClient {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self {
            transport: Box::new(transport),
            urls: Urls::new(config.base_url),
        })
    }

    pub fn from_env() -> Result<Self, ClientError> {
        Self::new(ClientConfig::from_env()?)
    }

    /// Wires a custom transport; used by tests and by callers that bring
    /// their own HTTP stack.
    pub fn with_transport(transport: Box<dyn ApiTransport>, base_url: impl Into<String>) -> Self {
        Self {
            transport,
            urls: Urls::new(base_url),
        }
    }

    pub fn create_context(&self, name: &str) -> Result<ContextHandle<'_>, ClientError> {
        self.transport
            .post_json(&self.urls.contexts(), &json!({ "name": name }))?;
        Ok(self.context(name))
    }

    pub fn delete_context(&self, name: &str) -> Result<(), ClientError> {
        self.transport.delete(&self.urls.context_named(name))?;
        Ok(())
    }

    pub fn list_contexts(&self) -> Result<Vec<ContextInfo>, ClientError> {
        let value = self.transport.get(&self.urls.contexts(), &[])?;
        decode(value, "context list")
    }

    pub fn context(&self, name: &str) -> ContextHandle<'_> {
        ContextHandle {
            name: name.to_string(),
            client: self,
        }
    }

    /// Validates and serializes the definition locally, then deploys it.
    pub fn deploy_pipeline(
        &self,
        name: &str,
        definition: PipelineDefinition,
    ) -> Result<PipelineHandle<'_>, ClientError> {
        let body = deploy_request_body(name, &definition);
        let response = self.transport.post_json(&self.urls.pipelines(), &body)?;
        Ok(PipelineHandle {
            name: name.to_string(),
            definition,
            id: string_field(&response, "id"),
            run_id: string_field(&response, "run_id"),
            client: self,
        })
    }

    /// Handle for a pipeline that is already deployed under `name`.
    pub fn pipeline(&self, name: &str, definition: PipelineDefinition) -> PipelineHandle<'_> {
        PipelineHandle {
            name: name.to_string(),
            definition,
            id: None,
            run_id: None,
            client: self,
        }
    }

    pub fn delete_pipeline(&self, name: &str) -> Result<(), ClientError> {
        self.transport.delete(&self.urls.pipeline_named(name))?;
        Ok(())
    }

    pub fn list_pipelines(&self) -> Result<Vec<PipelineInfo>, ClientError> {
        let value = self.transport.get(&self.urls.pipelines(), &[])?;
        decode(value, "pipeline list")
    }

    pub fn list_runs(&self, query: &RunListQuery) -> Result<Vec<RunRecord>, ClientError> {
        let mut params: Vec<(&str, String)> = vec![
            ("skip", query.skip.to_string()),
            ("limit", query.limit.to_string()),
            ("sort", query.sort.clone()),
        ];
        if let Some(status) = query.status {
            params.push(("status", status.as_str().to_string()));
        }
        if let Some(run_id) = &query.run_id {
            params.push(("run_id", run_id.clone()));
        }
        if let Some(gte) = &query.date_created_gte {
            params.push(("date_created_gte", gte.clone()));
        }
        if let Some(lte) = &query.date_created_lte {
            params.push(("date_created_lte", lte.clone()));
        }
        let value = self.transport.get(&self.urls.run_results(), &params)?;
        decode(value, "run list")
    }
}

pub struct ContextHandle<'a> {
    name: String,
    client: &'a QuarryClient,
}

impl ContextHandle<'_> {
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn list_files(&self, query: &ListFilesQuery) -> Result<Vec<FileRecord>, ClientError> {
        let mut body = json!({
            "contextName": self.name,
            "skip": query.skip,
            "limit": query.limit,
            "sort": query.sort,
        });
        if let Some(filter) = &query.metadata_filter {
            body["metadataJson"] = serialize_filter(filter);
        }
        let value = self
            .client
            .transport
            .post_json(&self.client.urls.context_files(), &body)?;
        let files = take_field(value, "files")?;
        decode(files, "file list")
    }

    /// Runs a hybrid semantic/full-text query. Argument bounds are checked
    /// and the metadata filter serialized before the request goes out.
    pub fn query(&self, search: &SearchQuery) -> Result<Vec<Chunk>, ClientError> {
        if search.query.is_empty() {
            return Err(ClientError::InvalidQuery(
                "the query string must not be empty".to_string(),
            ));
        }
        for (label, weight) in [
            ("semantic_weight", search.semantic_weight),
            ("full_text_weight", search.full_text_weight),
        ] {
            if !(0.0..=1.0).contains(&weight) {
                return Err(ClientError::InvalidQuery(format!(
                    "{label} must be between 0 and 1, got {weight}"
                )));
            }
        }
        if search.semantic_weight == 0.0 && search.full_text_weight == 0.0 {
            return Err(ClientError::InvalidQuery(
                "semantic_weight and full_text_weight cannot both be zero".to_string(),
            ));
        }

        let mut body = json!({
            "query": search.query,
            "semanticWeight": search.semantic_weight,
            "fullTextWeight": search.full_text_weight,
            "rrfK": search.rrf_k,
            "topK": search.top_k,
            "includeEmbedding": search.include_embedding,
            "contextName": self.name,
        });
        if let Some(filter) = &search.metadata_filter {
            body["metadataJson"] = serialize_filter(filter);
        }
        let value = self
            .client
            .transport
            .post_json(&self.client.urls.context_search(), &body)?;
        let chunks = take_field(value, "data")?;
        decode(chunks, "chunk list")
    }

    /// Uploads files into the context. File types and metadata keys are
    /// checked before any file is read.
    pub fn upload_files(
        &self,
        file_paths: &[PathBuf],
        metadata: Option<&Map<String, Value>>,
        max_chunk_size: u32,
    ) -> Result<(), ClientError> {
        let metadata_json = encode_metadata(metadata)?;
        for path in file_paths {
            check_supported(path)?;
        }

        let mut parts = Vec::with_capacity(file_paths.len());
        for path in file_paths {
            let bytes = fs::read(path).map_err(|source| ClientError::ReadFile {
                path: path.display().to_string(),
                source,
            })?;
            let file_name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            let mime_type = mime_guess::from_path(path)
                .first_or_octet_stream()
                .essence_str()
                .to_string();
            parts.push(UploadPart {
                file_name,
                mime_type,
                bytes,
            });
        }

        let mut fields = Map::new();
        fields.insert("context_name".to_string(), json!(self.name));
        fields.insert("max_chunk_size".to_string(), json!(max_chunk_size));
        if let Some(encoded) = metadata_json {
            fields.insert("metadata_json".to_string(), Value::String(encoded));
        }
        self.client
            .transport
            .post_multipart(&self.client.urls.context_upload(), &fields, parts)?;
        Ok(())
    }

    /// Uploads every supported file under `directory`, recursively, in a
    /// deterministic path order.
    pub fn upload_directory(
        &self,
        directory: &Path,
        metadata: Option<&Map<String, Value>>,
        max_chunk_size: u32,
    ) -> Result<(), ClientError> {
        if !directory.is_dir() {
            return Err(ClientError::NotADirectory(directory.display().to_string()));
        }
        let mut files = Vec::new();
        collect_supported_files(directory, &mut files)?;
        if files.is_empty() {
            return Err(ClientError::NoSupportedFiles(
                directory.display().to_string(),
            ));
        }
        files.sort();
        self.upload_files(&files, metadata, max_chunk_size)
    }
}

/// A named pipeline plus the definition it was deployed with. Runs resolve
/// overrides locally, so a bad override map fails before any request.
pub struct PipelineHandle<'a> {
    name: String,
    definition: PipelineDefinition,
    id: Option<String>,
    run_id: Option<String>,
    client: &'a QuarryClient,
}

impl PipelineHandle<'_> {
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Run started by the deployment itself, if the server reported one.
    pub fn run_id(&self) -> Option<&str> {
        self.run_id.as_deref()
    }

    pub fn definition(&self) -> &PipelineDefinition {
        &self.definition
    }

    pub fn run(&self, overrides: &Map<String, Value>) -> Result<Vec<Chunk>, ClientError> {
        let resolved = resolve_overrides(&self.definition, overrides)?;
        let body = run_request_body(&self.name, &resolved);
        let value = self
            .client
            .transport
            .post_json(&self.client.urls.pipeline_runs(), &body)?;
        let chunks = take_field(value, "chunks")?;
        decode(chunks, "chunk list")
    }
}

fn decode<T: DeserializeOwned>(value: Value, what: &str) -> Result<T, ClientError> {
    serde_json::from_value(value)
        .map_err(|error| ClientError::UnexpectedResponse(format!("{what}: {error}")))
}

fn take_field(mut value: Value, field: &str) -> Result<Value, ClientError> {
    value
        .get_mut(field)
        .map(Value::take)
        .ok_or_else(|| ClientError::UnexpectedResponse(format!("missing `{field}` field")))
}

fn string_field(value: &Value, field: &str) -> Option<String> {
    value.get(field).and_then(Value::as_str).map(str::to_string)
}

fn check_supported(path: &Path) -> Result<(), ClientError> {
    let extension = path
        .extension()
        .and_then(OsStr::to_str)
        .map(|extension| format!(".{extension}"))
        .unwrap_or_default();
    if SUPPORTED_FILE_TYPES.contains(&extension.as_str()) {
        Ok(())
    } else {
        Err(ClientError::UnsupportedFileType { extension })
    }
}

fn encode_metadata(metadata: Option<&Map<String, Value>>) -> Result<Option<String>, ClientError> {
    let Some(metadata) = metadata else {
        return Ok(None);
    };
    for key in RESERVED_METADATA_KEYS {
        if metadata.contains_key(*key) {
            return Err(ClientError::ReservedMetadataKey {
                key: (*key).to_string(),
            });
        }
    }
    let encoded = serde_json::to_string(metadata)
        .map_err(|error| ClientError::MetadataEncode(error.to_string()))?;
    Ok(Some(encoded))
}

fn collect_supported_files(directory: &Path, out: &mut Vec<PathBuf>) -> Result<(), ClientError> {
    let entries = fs::read_dir(directory).map_err(|source| ClientError::ReadFile {
        path: directory.display().to_string(),
        source,
    })?;
    for entry in entries {
        let entry = entry.map_err(|source| ClientError::ReadFile {
            path: directory.display().to_string(),
            source,
        })?;
        let path = entry.path();
        if path.is_dir() {
            collect_supported_files(&path, out)?;
        } else if check_supported(&path).is_ok() {
            out.push(path);
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
