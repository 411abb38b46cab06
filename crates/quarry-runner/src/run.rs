use crate::cli::{
    DeployCommand, OutputFormat, PlanCommand, QueryCommand, RunCommand, UploadCommand,
    ValidateCommand,
};
use crate::config::{client_config, load_runner_config, RunnerConfig, RunnerConfigError};
use quarry_filter::{build_filter, FilterError};
use quarry_sdk::{
    parse_pipeline_document, resolve_overrides, run_request_body, ClientError, OverrideError,
    ParseError, PipelineDocument, PipelineError, QuarryClient, SearchQuery,
};
use serde_json::{json, Map, Value};
use std::fs;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    #[error("read file failed `{path}`: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("pipeline parse failed: {0}")]
    PipelineParse(#[from] ParseError),
    #[error("pipeline validation failed: {0}")]
    PipelineInvalid(#[from] PipelineError),
    #[error("override resolution failed: {0}")]
    Overrides(#[from] OverrideError),
    #[error("file `{0}` must decode to a json/yaml object")]
    NotAnObjectFile(String),
    #[error("document decode failed: {0}")]
    DocumentDecode(String),
    #[error("filter build failed: {0}")]
    Filter(#[from] FilterError),
    #[error(transparent)]
    Config(#[from] RunnerConfigError),
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error("json encode failed: {0}")]
    JsonEncode(#[from] serde_json::Error),
}

pub fn execute_validate(command: &ValidateCommand) -> Result<String, RunnerError> {
    let document = load_pipeline(&command.pipeline)?;
    let definition = document.definition()?;
    let order = definition.topo_order();
    match command.format {
        OutputFormat::Text => {
            let name = document.name.as_deref().unwrap_or("pipeline");
            Ok(format!(
                "{name}: {} steps, valid\nexecution order: {}",
                definition.steps().len(),
                order.join(" -> ")
            ))
        }
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&json!({
            "valid": true,
            "steps": definition.step_names(),
            "order": order,
        }))?),
    }
}

pub fn execute_plan(command: &PlanCommand) -> Result<String, RunnerError> {
    let document = load_pipeline(&command.pipeline)?;
    let definition = document.definition()?;
    let overrides = match &command.overrides {
        Some(path) => load_object(path)?,
        None => Map::new(),
    };
    let resolved = resolve_overrides(&definition, &overrides)?;
    let name = command
        .name
        .clone()
        .or_else(|| document.name.clone())
        .unwrap_or_else(|| "pipeline".to_string());
    Ok(serde_json::to_string_pretty(&run_request_body(
        name.as_str(),
        &resolved,
    ))?)
}

pub fn execute_deploy(command: &DeployCommand) -> Result<String, RunnerError> {
    let document = load_pipeline(&command.pipeline)?;
    let definition = document.definition()?;
    let client = build_client(command.config.as_deref())?;
    let handle = client.deploy_pipeline(command.name.as_str(), definition)?;
    Ok(serde_json::to_string_pretty(&json!({
        "deployed": handle.name(),
        "id": handle.id(),
        "run_id": handle.run_id(),
    }))?)
}

pub fn execute_run(command: &RunCommand) -> Result<String, RunnerError> {
    let document = load_pipeline(&command.pipeline)?;
    let definition = document.definition()?;
    let overrides = match &command.overrides {
        Some(path) => load_object(path)?,
        None => Map::new(),
    };
    let client = build_client(command.config.as_deref())?;
    let chunks = client
        .pipeline(command.name.as_str(), definition)
        .run(&overrides)?;
    Ok(serde_json::to_string_pretty(&chunks)?)
}

pub fn execute_query(command: &QueryCommand) -> Result<String, RunnerError> {
    let mut search = SearchQuery::new(command.query.clone()).with_top_k(command.top_k);
    if let Some(path) = &command.filter {
        let raw = load_value(path)?;
        search = search.with_metadata_filter(build_filter(&raw)?);
    }
    let client = build_client(command.config.as_deref())?;
    let chunks = client.context(command.context.as_str()).query(&search)?;
    Ok(serde_json::to_string_pretty(&chunks)?)
}

pub fn execute_upload(command: &UploadCommand) -> Result<String, RunnerError> {
    let metadata = match &command.metadata {
        Some(path) => Some(load_object(path)?),
        None => None,
    };
    let client = build_client(command.config.as_deref())?;
    client.context(command.context.as_str()).upload_files(
        &command.paths,
        metadata.as_ref(),
        command.max_chunk_size,
    )?;
    Ok(format!("uploaded {} file(s)", command.paths.len()))
}

fn build_client(config_path: Option<&Path>) -> Result<QuarryClient, RunnerError> {
    let runner_config = match config_path {
        Some(path) => load_runner_config(path)?,
        None => RunnerConfig::default(),
    };
    Ok(QuarryClient::new(client_config(&runner_config)?)?)
}

fn load_pipeline(path: &Path) -> Result<PipelineDocument, RunnerError> {
    let text = read_file(path)?;
    Ok(parse_pipeline_document(text.as_str())?)
}

fn load_value(path: &Path) -> Result<Value, RunnerError> {
    let text = read_file(path)?;
    // YAML is a superset of the JSON we accept here.
    serde_yaml::from_str(text.as_str()).map_err(|error| RunnerError::DocumentDecode(error.to_string()))
}

fn load_object(path: &Path) -> Result<Map<String, Value>, RunnerError> {
    match load_value(path)? {
        Value::Object(map) => Ok(map),
        _ => Err(RunnerError::NotAnObjectFile(path.display().to_string())),
    }
}

fn read_file(path: &Path) -> Result<String, RunnerError> {
    fs::read_to_string(path).map_err(|source| RunnerError::ReadFile {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
#[path = "run_test.rs"]
mod tests;
