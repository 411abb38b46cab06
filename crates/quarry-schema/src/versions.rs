pub const SCHEMA_PIPELINE_0_0_1: &str = "quarry-pipeline/0.0.1";
