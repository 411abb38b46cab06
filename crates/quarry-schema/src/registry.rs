use crate::embedded::EmbeddedSchema;
use crate::versions::SCHEMA_PIPELINE_0_0_1;

const PIPELINE_SCHEMA: &str = include_str!("../../../schemas/0.0.1/pipeline.schema.json");

pub fn get_json_schema(schema_id: &str) -> Option<EmbeddedSchema> {
    match schema_id {
        SCHEMA_PIPELINE_0_0_1 => Some(EmbeddedSchema {
            id: SCHEMA_PIPELINE_0_0_1,
            json: PIPELINE_SCHEMA,
        }),
        _ => None,
    }
}

#[cfg(test)]
#[path = "registry_test.rs"]
mod tests;
