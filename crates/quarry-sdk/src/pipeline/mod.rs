mod definition;
mod overrides;
mod topo;
mod wire;

pub use definition::{PipelineDefinition, PipelineDocument, PipelineError, PipelineStep};
pub use overrides::{resolve_overrides, OverrideError, ResolvedPipeline, ResolvedStep};
pub use wire::{deploy_request_body, run_request_body};
