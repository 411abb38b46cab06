use crate::client::config::ConfigError;
use crate::client::transport::TransportError;
use crate::client::SUPPORTED_FILE_TYPES;
use crate::parse::ParseError;
use crate::pipeline::{OverrideError, PipelineError};
use quarry_filter::FilterError;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Filter(#[from] FilterError),
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
    #[error(transparent)]
    Override(#[from] OverrideError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("read file failed `{path}`: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("not a directory: `{0}`")]
    NotADirectory(String),
    #[error("no supported files found under `{0}`")]
    NoSupportedFiles(String),
    #[error("unsupported file type `{extension}`, supported: {}", SUPPORTED_FILE_TYPES.join(", "))]
    UnsupportedFileType { extension: String },
    #[error("`{key}` is a reserved metadata key")]
    ReservedMetadataKey { key: String },
    #[error("metadata encode failed: {0}")]
    MetadataEncode(String),
    #[error("invalid search query: {0}")]
    InvalidQuery(String),
    #[error("unexpected response shape: {0}")]
    UnexpectedResponse(String),
}
