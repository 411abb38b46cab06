use crate::pipeline::definition::PipelineDefinition;
use serde_json::{Map, Value};

/// A pipeline with per-step arguments frozen for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPipeline {
    pub steps: Vec<ResolvedStep>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedStep {
    pub name: String,
    pub step_type: String,
    pub depends_on: Vec<String>,
    pub final_args: Map<String, Value>,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum OverrideError {
    #[error("override references unknown step `{name}` (known steps: {})", .known.join(", "))]
    UnknownStep { name: String, known: Vec<String> },
    #[error("override for step `{name}` must be an object of argument values")]
    NotAnObject { name: String },
}

/// Shallow-merges a run-time override map into a validated pipeline. The
/// whole map is checked against known step names before any merge, so a bad
/// override never yields a partially-applied result.
pub fn resolve_overrides(
    pipeline: &PipelineDefinition,
    overrides: &Map<String, Value>,
) -> Result<ResolvedPipeline, OverrideError> {
    for (name, entry) in overrides {
        if !pipeline.contains(name) {
            return Err(OverrideError::UnknownStep {
                name: name.clone(),
                known: pipeline.step_names().iter().map(|s| s.to_string()).collect(),
            });
        }
        if !entry.is_object() {
            return Err(OverrideError::NotAnObject { name: name.clone() });
        }
    }

    let steps = pipeline
        .steps()
        .iter()
        .map(|step| {
            let mut final_args = step.step_args.clone();
            if let Some(Value::Object(entry)) = overrides.get(step.name.as_str()) {
                for (key, value) in entry {
                    final_args.insert(key.clone(), value.clone());
                }
            }
            ResolvedStep {
                name: step.name.clone(),
                step_type: step.step_type.clone(),
                depends_on: step.depends_on.clone(),
                final_args,
            }
        })
        .collect();

    Ok(ResolvedPipeline { steps })
}

#[cfg(test)]
#[path = "overrides_test.rs"]
mod tests;
