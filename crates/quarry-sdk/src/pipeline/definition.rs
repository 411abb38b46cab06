use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// One stage of a pipeline. `step` names the server-side step kind and
/// `step_args` passes through opaquely; the server owns the argument schema
/// for each kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PipelineStep {
    pub name: String,
    #[serde(rename = "step")]
    pub step_type: String,
    #[serde(default)]
    pub step_args: Map<String, Value>,
    #[serde(default)]
    pub depends_on: Vec<String>,
}

/// The on-disk YAML/JSON form of a pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PipelineDocument {
    pub schema: String,
    #[serde(default)]
    pub name: Option<String>,
    pub steps: Vec<PipelineStep>,
}

impl PipelineDocument {
    pub fn definition(&self) -> Result<PipelineDefinition, PipelineError> {
        PipelineDefinition::from_steps(self.steps.clone())
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PipelineError {
    #[error("duplicate step name `{name}` (first declared at steps[{first}])")]
    DuplicateStep { name: String, first: usize },
    #[error("step `{step}` depends on unknown step `{dependency}`")]
    DanglingDependency { step: String, dependency: String },
    #[error("dependency cycle detected: {}", .cycle.join(" -> "))]
    Cycle { cycle: Vec<String> },
}

/// A validated pipeline: unique step names, no dangling dependencies,
/// acyclic. Construction is the only way to obtain one.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineDefinition {
    pub(crate) steps: Vec<PipelineStep>,
    pub(crate) index: HashMap<String, usize>,
}

impl PipelineDefinition {
    pub fn from_steps(steps: Vec<PipelineStep>) -> Result<Self, PipelineError> {
        let mut index = HashMap::new();
        for (position, step) in steps.iter().enumerate() {
            if let Some(first) = index.insert(step.name.clone(), position) {
                return Err(PipelineError::DuplicateStep {
                    name: step.name.clone(),
                    first,
                });
            }
        }

        for step in &steps {
            for dependency in &step.depends_on {
                if !index.contains_key(dependency) {
                    return Err(PipelineError::DanglingDependency {
                        step: step.name.clone(),
                        dependency: dependency.clone(),
                    });
                }
            }
        }

        let definition = Self { steps, index };
        if let Some(cycle) = definition.find_cycle() {
            return Err(PipelineError::Cycle { cycle });
        }
        Ok(definition)
    }

    pub fn steps(&self) -> &[PipelineStep] {
        &self.steps
    }

    pub fn step(&self, name: &str) -> Option<&PipelineStep> {
        self.index.get(name).map(|position| &self.steps[*position])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Step names in declaration order.
    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|step| step.name.as_str()).collect()
    }

    // Three-color depth-first traversal: 0 unvisited, 1 in progress, 2 done.
    // Hitting an in-progress step yields the cycle, starting and ending at
    // the repeated name.
    fn find_cycle(&self) -> Option<Vec<String>> {
        let mut state = vec![0u8; self.steps.len()];
        let mut stack = Vec::new();
        for position in 0..self.steps.len() {
            if state[position] != 0 {
                continue;
            }
            if let Some(cycle) = self.dfs_cycle(position, &mut state, &mut stack) {
                return Some(cycle);
            }
        }
        None
    }

    fn dfs_cycle(
        &self,
        position: usize,
        state: &mut Vec<u8>,
        stack: &mut Vec<usize>,
    ) -> Option<Vec<String>> {
        state[position] = 1;
        stack.push(position);

        for dependency in &self.steps[position].depends_on {
            let dep_position = self.index[dependency.as_str()];
            match state[dep_position] {
                0 => {
                    if let Some(cycle) = self.dfs_cycle(dep_position, state, stack) {
                        return Some(cycle);
                    }
                }
                1 => {
                    if let Some(start) = stack.iter().position(|item| *item == dep_position) {
                        let mut cycle: Vec<String> = stack[start..]
                            .iter()
                            .map(|item| self.steps[*item].name.clone())
                            .collect();
                        cycle.push(self.steps[dep_position].name.clone());
                        return Some(cycle);
                    }
                }
                _ => {}
            }
        }

        state[position] = 2;
        stack.pop();
        None
    }
}

#[cfg(test)]
#[path = "definition_test.rs"]
mod tests;
