use super::{
    ApiTransport, ClientError, ListFilesQuery, QuarryClient, RunListQuery, RunStatus, SearchQuery,
    TransportError, UploadPart,
};
use crate::pipeline::{PipelineDefinition, PipelineStep};
use quarry_filter::build_filter;
use serde_json::{json, Map, Value};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq)]
enum Recorded {
    Get {
        url: String,
        query: Vec<(String, String)>,
    },
    PostJson {
        url: String,
        body: Value,
    },
    PostMultipart {
        url: String,
        fields: Map<String, Value>,
        file_names: Vec<String>,
    },
    Delete {
        url: String,
    },
}

#[derive(Default)]
struct MockState {
    responses: Mutex<Vec<Value>>,
    recorded: Mutex<Vec<Recorded>>,
}

impl MockState {
    fn next_response(&self) -> Value {
        let mut responses = self.responses.lock().expect("mock lock");
        if responses.is_empty() {
            json!({})
        } else {
            responses.remove(0)
        }
    }

    fn record(&self, request: Recorded) {
        self.recorded.lock().expect("mock lock").push(request);
    }
}

struct MockTransport {
    state: Arc<MockState>,
}

impl ApiTransport for MockTransport {
    fn get(&self, url: &str, query: &[(&str, String)]) -> Result<Value, TransportError> {
        self.state.record(Recorded::Get {
            url: url.to_string(),
            query: query
                .iter()
                .map(|(key, value)| (key.to_string(), value.clone()))
                .collect(),
        });
        Ok(self.state.next_response())
    }

    fn post_json(&self, url: &str, body: &Value) -> Result<Value, TransportError> {
        self.state.record(Recorded::PostJson {
            url: url.to_string(),
            body: body.clone(),
        });
        Ok(self.state.next_response())
    }

    fn post_multipart(
        &self,
        url: &str,
        fields: &Map<String, Value>,
        parts: Vec<UploadPart>,
    ) -> Result<Value, TransportError> {
        self.state.record(Recorded::PostMultipart {
            url: url.to_string(),
            fields: fields.clone(),
            file_names: parts.into_iter().map(|part| part.file_name).collect(),
        });
        Ok(self.state.next_response())
    }

    fn delete(&self, url: &str) -> Result<Value, TransportError> {
        self.state.record(Recorded::Delete {
            url: url.to_string(),
        });
        Ok(self.state.next_response())
    }
}

fn client_with(responses: Vec<Value>) -> (QuarryClient, Arc<MockState>) {
    let state = Arc::new(MockState {
        responses: Mutex::new(responses),
        recorded: Mutex::new(Vec::new()),
    });
    let client = QuarryClient::with_transport(
        Box::new(MockTransport {
            state: Arc::clone(&state),
        }),
        "https://api.test/v1/",
    );
    (client, state)
}

fn recorded(state: &MockState) -> Vec<Recorded> {
    state.recorded.lock().expect("mock lock").clone()
}

fn query_pipeline() -> PipelineDefinition {
    let steps: Vec<PipelineStep> = serde_json::from_value(json!([
        {"name": "retriever", "step": "Retriever", "step_args": {"top_k": 100, "query": "placeholder"}},
        {"name": "reranker", "step": "Reranker", "step_args": {"top_k": 5}, "depends_on": ["retriever"]},
    ]))
    .expect("must parse");
    PipelineDefinition::from_steps(steps).expect("must build")
}

#[test]
fn query_sends_camel_case_body_with_serialized_filter() {
    let (client, state) = client_with(vec![json!({
        "data": [{"id": "c1", "content": "text", "combined_score": 0.9}]
    })]);
    let filter = build_filter(&json!({"tag": "test"})).expect("must build");
    let search = SearchQuery::new("what is a computer?")
        .with_top_k(5)
        .with_metadata_filter(filter);

    let chunks = client.context("demo").query(&search).expect("must query");
    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].id, "c1");
    assert_eq!(chunks[0].combined_score, Some(0.9));

    let requests = recorded(&state);
    assert_eq!(requests.len(), 1);
    let Recorded::PostJson { url, body } = &requests[0] else {
        panic!("expected a json post, got {requests:?}");
    };
    assert_eq!(url, "https://api.test/v1/context/chunk/search");
    assert_eq!(
        *body,
        json!({
            "query": "what is a computer?",
            "semanticWeight": 0.5,
            "fullTextWeight": 0.5,
            "rrfK": 60,
            "topK": 5,
            "includeEmbedding": false,
            "contextName": "demo",
            "metadataJson": {"tag": {"$eq": "test"}},
        })
    );
}

#[test]
fn query_rejects_out_of_range_weights_before_any_request() {
    let (client, state) = client_with(vec![]);
    let search = SearchQuery::new("q").with_weights(1.5, 0.5);
    let error = client.context("demo").query(&search).expect_err("must reject");
    assert!(matches!(error, ClientError::InvalidQuery(_)));
    assert!(recorded(&state).is_empty());
}

#[test]
fn query_rejects_zero_weights_and_empty_query() {
    let (client, state) = client_with(vec![]);
    let zero = SearchQuery::new("q").with_weights(0.0, 0.0);
    assert!(matches!(
        client.context("demo").query(&zero),
        Err(ClientError::InvalidQuery(_))
    ));
    let empty = SearchQuery::new("");
    assert!(matches!(
        client.context("demo").query(&empty),
        Err(ClientError::InvalidQuery(_))
    ));
    assert!(recorded(&state).is_empty());
}

#[test]
fn run_resolves_overrides_and_posts_the_canonical_body() {
    let (client, state) = client_with(vec![json!({"chunks": []})]);
    let pipeline = client.pipeline("basic_query", query_pipeline());
    let overrides = json!({"retriever": {"top_k": 50}});
    pipeline
        .run(overrides.as_object().expect("object"))
        .expect("must run");

    let requests = recorded(&state);
    let Recorded::PostJson { url, body } = &requests[0] else {
        panic!("expected a json post, got {requests:?}");
    };
    assert_eq!(url, "https://api.test/v1/pipeline/run");
    assert_eq!(body["pipeline_name"], json!("basic_query"));
    assert_eq!(
        body["steps"][0]["step_args"],
        json!({"query": "placeholder", "top_k": 50})
    );
    assert_eq!(body["steps"][1]["step_args"], json!({"top_k": 5}));
}

#[test]
fn run_with_unknown_override_step_sends_nothing() {
    let (client, state) = client_with(vec![]);
    let pipeline = client.pipeline("basic_query", query_pipeline());
    let overrides = json!({"summarizer": {"top_k": 3}});
    let error = pipeline
        .run(overrides.as_object().expect("object"))
        .expect_err("must reject");
    assert!(matches!(error, ClientError::Override(_)));
    assert!(recorded(&state).is_empty());
}

#[test]
fn deploy_posts_the_definition_and_captures_server_ids() {
    let (client, state) = client_with(vec![json!({"id": "pl-1", "run_id": "run-7"})]);
    let handle = client
        .deploy_pipeline("ingest", query_pipeline())
        .expect("must deploy");
    assert_eq!(handle.name(), "ingest");
    assert_eq!(handle.id(), Some("pl-1"));
    assert_eq!(handle.run_id(), Some("run-7"));

    let requests = recorded(&state);
    let Recorded::PostJson { url, body } = &requests[0] else {
        panic!("expected a json post, got {requests:?}");
    };
    assert_eq!(url, "https://api.test/v1/pipeline");
    assert_eq!(body["name"], json!("ingest"));
    assert_eq!(body["steps"][0]["name"], json!("retriever"));
}

#[test]
fn list_files_includes_the_metadata_filter() {
    let (client, state) = client_with(vec![json!({"files": []})]);
    let query = ListFilesQuery {
        metadata_filter: Some(
            build_filter(&json!({"department": {"$in": ["finance"]}})).expect("must build"),
        ),
        ..ListFilesQuery::default()
    };
    client.context("demo").list_files(&query).expect("must list");

    let requests = recorded(&state);
    let Recorded::PostJson { body, .. } = &requests[0] else {
        panic!("expected a json post, got {requests:?}");
    };
    assert_eq!(body["metadataJson"], json!({"department": {"$in": ["finance"]}}));
    assert_eq!(body["limit"], json!(20));
    assert_eq!(body["sort"], json!("date_created"));
}

#[test]
fn list_runs_builds_query_parameters() {
    let (client, state) = client_with(vec![json!([
        {"id": "run-1", "status": "FAILED"}
    ])]);
    let query = RunListQuery {
        status: Some(RunStatus::Failed),
        run_id: Some("run-1".to_string()),
        ..RunListQuery::default()
    };
    let runs = client.list_runs(&query).expect("must list");
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0].status, RunStatus::Failed);

    let requests = recorded(&state);
    let Recorded::Get { url, query } = &requests[0] else {
        panic!("expected a get, got {requests:?}");
    };
    assert_eq!(url, "https://api.test/v1/run/results");
    assert!(query.contains(&("status".to_string(), "FAILED".to_string())));
    assert!(query.contains(&("run_id".to_string(), "run-1".to_string())));
    assert!(query.contains(&("limit".to_string(), "20".to_string())));
}

#[test]
fn upload_rejects_reserved_metadata_keys_before_any_io() {
    let (client, state) = client_with(vec![]);
    let metadata = json!({"file_name": "sneaky.txt"});
    let error = client
        .context("demo")
        .upload_files(
            &[PathBuf::from("/tmp/notes.txt")],
            metadata.as_object(),
            600,
        )
        .expect_err("must reject");
    assert!(matches!(
        error,
        ClientError::ReservedMetadataKey { ref key } if key == "file_name"
    ));
    assert!(recorded(&state).is_empty());
}

#[test]
fn upload_rejects_unsupported_file_types_before_reading() {
    let (client, state) = client_with(vec![]);
    let error = client
        .context("demo")
        .upload_files(&[PathBuf::from("/nowhere/tool.exe")], None, 600)
        .expect_err("must reject");
    assert!(matches!(
        error,
        ClientError::UnsupportedFileType { ref extension } if extension == ".exe"
    ));
    assert!(recorded(&state).is_empty());
}

#[test]
fn upload_files_sends_a_multipart_body() {
    let directory = tempfile::tempdir().expect("tempdir");
    let file_path = directory.path().join("notes.txt");
    std::fs::write(&file_path, "chunk me").expect("write fixture");

    let (client, state) = client_with(vec![json!({})]);
    let metadata = json!({"tag": "test"});
    client
        .context("demo")
        .upload_files(&[file_path], metadata.as_object(), 600)
        .expect("must upload");

    let requests = recorded(&state);
    let Recorded::PostMultipart { url, fields, file_names } = &requests[0] else {
        panic!("expected a multipart post, got {requests:?}");
    };
    assert_eq!(url, "https://api.test/v1/context/file/upload");
    assert_eq!(fields.get("context_name"), Some(&json!("demo")));
    assert_eq!(fields.get("max_chunk_size"), Some(&json!(600)));
    assert_eq!(
        fields.get("metadata_json"),
        Some(&Value::String(r#"{"tag":"test"}"#.to_string()))
    );
    assert_eq!(file_names, &vec!["notes.txt".to_string()]);
}

#[test]
fn upload_directory_requires_supported_files() {
    let directory = tempfile::tempdir().expect("tempdir");
    std::fs::write(directory.path().join("binary.bin"), [0u8; 4]).expect("write fixture");

    let (client, state) = client_with(vec![]);
    let error = client
        .context("demo")
        .upload_directory(directory.path(), None, 600)
        .expect_err("must reject");
    assert!(matches!(error, ClientError::NoSupportedFiles(_)));
    assert!(recorded(&state).is_empty());
}

#[test]
fn delete_context_targets_the_named_resource() {
    let (client, state) = client_with(vec![json!({})]);
    client.delete_context("demo").expect("must delete");
    assert_eq!(
        recorded(&state),
        vec![Recorded::Delete {
            url: "https://api.test/v1/context/demo".to_string(),
        }]
    );
}

#[test]
fn missing_response_field_is_an_unexpected_response() {
    let (client, _state) = client_with(vec![json!({"unexpected": true})]);
    let error = client
        .context("demo")
        .query(&SearchQuery::new("q"))
        .expect_err("must reject");
    assert!(matches!(error, ClientError::UnexpectedResponse(_)));
}
