use crate::pipeline::definition::PipelineDefinition;
use std::collections::BTreeSet;

impl PipelineDefinition {
    /// Stable topological order: every dependency precedes its dependents,
    /// and among ready steps the one declared first goes first. Execution is
    /// server-side; this exists so definitions display deterministically.
    pub fn topo_order(&self) -> Vec<&str> {
        let mut indegree: Vec<usize> = self.steps.iter().map(|step| step.depends_on.len()).collect();
        let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); self.steps.len()];
        for (position, step) in self.steps.iter().enumerate() {
            for dependency in &step.depends_on {
                dependents[self.index[dependency.as_str()]].push(position);
            }
        }

        let mut ready: BTreeSet<usize> = indegree
            .iter()
            .enumerate()
            .filter_map(|(position, degree)| (*degree == 0).then_some(position))
            .collect();

        let mut order = Vec::with_capacity(self.steps.len());
        while let Some(position) = ready.iter().next().copied() {
            ready.remove(&position);
            order.push(self.steps[position].name.as_str());
            for dependent in &dependents[position] {
                indegree[*dependent] -= 1;
                if indegree[*dependent] == 0 {
                    ready.insert(*dependent);
                }
            }
        }
        order
    }
}

#[cfg(test)]
#[path = "topo_test.rs"]
mod tests;
