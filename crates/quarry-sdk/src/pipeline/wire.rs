use crate::pipeline::definition::{PipelineDefinition, PipelineStep};
use crate::pipeline::overrides::{ResolvedPipeline, ResolvedStep};
use quarry_core::canonical_json_value;
use serde_json::{json, Value};

/// Wire body for deploying a pipeline: steps in declaration order, object
/// keys canonicalized.
pub fn deploy_request_body(name: &str, pipeline: &PipelineDefinition) -> Value {
    canonical_json_value(&json!({
        "name": name,
        "steps": pipeline.steps().iter().map(step_value).collect::<Vec<_>>(),
    }))
}

/// Wire body for running a pipeline with resolved per-step arguments.
pub fn run_request_body(pipeline_name: &str, resolved: &ResolvedPipeline) -> Value {
    canonical_json_value(&json!({
        "pipeline_name": pipeline_name,
        "steps": resolved.steps.iter().map(resolved_step_value).collect::<Vec<_>>(),
    }))
}

fn step_value(step: &PipelineStep) -> Value {
    json!({
        "name": step.name,
        "step": step.step_type,
        "depends_on": step.depends_on,
        "step_args": Value::Object(step.step_args.clone()),
    })
}

fn resolved_step_value(step: &ResolvedStep) -> Value {
    json!({
        "name": step.name,
        "step": step.step_type,
        "depends_on": step.depends_on,
        "step_args": Value::Object(step.final_args.clone()),
    })
}

#[cfg(test)]
#[path = "wire_test.rs"]
mod tests;
