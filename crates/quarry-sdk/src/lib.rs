pub mod client;
pub mod parse;
pub mod pipeline;

pub use client::{
    ApiTransport, Chunk, ClientConfig, ClientError, ConfigError, ContextHandle, ContextInfo,
    FileRecord, HttpTransport, ListFilesQuery, PipelineHandle, PipelineInfo, QuarryClient,
    RunListQuery, RunRecord, RunStatus, SearchQuery, TransportError, UploadPart, Urls,
    API_KEY_ENV, BASE_URL_ENV, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_MS, RESERVED_METADATA_KEYS,
    SUPPORTED_FILE_TYPES,
};
pub use parse::{
    parse_pipeline_document, parse_pipeline_document_with_options, DocumentFormat, ParseError,
    ParsePipelineOptions,
};
pub use pipeline::{
    deploy_request_body, resolve_overrides, run_request_body, OverrideError, PipelineDefinition,
    PipelineDocument, PipelineError, PipelineStep, ResolvedPipeline, ResolvedStep,
};
