use quarry_filter::MetadataFilter;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A unit of retrieved text with its scores. Fields the server omits stay
/// `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    pub id: String,
    pub content: String,
    #[serde(default)]
    pub metadata_json: Option<Map<String, Value>>,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub date_created: Option<String>,
    #[serde(default)]
    pub embedding: Option<Vec<f64>>,
    #[serde(default)]
    pub semantic_score: Option<f64>,
    #[serde(default)]
    pub fulltext_score: Option<f64>,
    #[serde(default)]
    pub combined_score: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub metadata_json: Option<Map<String, Value>>,
    #[serde(default)]
    pub date_created: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextInfo {
    pub name: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub date_created: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineInfo {
    pub name: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub run_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RunStatus {
    Running,
    Successful,
    Failed,
}

impl RunStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            RunStatus::Running => "RUNNING",
            RunStatus::Successful => "SUCCESSFUL",
            RunStatus::Failed => "FAILED",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub pipeline_name: Option<String>,
    pub status: RunStatus,
    #[serde(default)]
    pub date_created: Option<String>,
}

/// Hybrid semantic/full-text search. Defaults mirror the server's: equal
/// weights, `rrf_k` 60, ten results.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub query: String,
    pub top_k: u32,
    pub semantic_weight: f64,
    pub full_text_weight: f64,
    pub rrf_k: u32,
    pub include_embedding: bool,
    pub metadata_filter: Option<MetadataFilter>,
}

impl SearchQuery {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            top_k: 10,
            semantic_weight: 0.5,
            full_text_weight: 0.5,
            rrf_k: 60,
            include_embedding: false,
            metadata_filter: None,
        }
    }

    pub fn with_top_k(mut self, top_k: u32) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn with_weights(mut self, semantic_weight: f64, full_text_weight: f64) -> Self {
        self.semantic_weight = semantic_weight;
        self.full_text_weight = full_text_weight;
        self
    }

    pub fn with_rrf_k(mut self, rrf_k: u32) -> Self {
        self.rrf_k = rrf_k;
        self
    }

    pub fn with_embedding(mut self) -> Self {
        self.include_embedding = true;
        self
    }

    pub fn with_metadata_filter(mut self, filter: MetadataFilter) -> Self {
        self.metadata_filter = Some(filter);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListFilesQuery {
    pub skip: u64,
    pub limit: u64,
    pub sort: String,
    pub metadata_filter: Option<MetadataFilter>,
}

impl Default for ListFilesQuery {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: 20,
            sort: "date_created".to_string(),
            metadata_filter: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunListQuery {
    pub skip: u64,
    pub limit: u64,
    pub sort: String,
    pub status: Option<RunStatus>,
    pub run_id: Option<String>,
    pub date_created_gte: Option<String>,
    pub date_created_lte: Option<String>,
}

impl Default for RunListQuery {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: 20,
            sort: "date_created".to_string(),
            status: None,
            run_id: None,
            date_created_gte: None,
            date_created_lte: None,
        }
    }
}

#[cfg(test)]
#[path = "models_test.rs"]
mod tests;
