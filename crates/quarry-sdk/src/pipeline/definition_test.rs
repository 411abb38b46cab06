use super::{PipelineDefinition, PipelineDocument, PipelineError, PipelineStep};
use serde_json::{json, Map};

fn step(name: &str, depends_on: &[&str]) -> PipelineStep {
    PipelineStep {
        name: name.to_string(),
        step_type: "Retriever".to_string(),
        step_args: Map::new(),
        depends_on: depends_on.iter().map(|dep| dep.to_string()).collect(),
    }
}

#[test]
fn valid_definition_exposes_steps_in_declaration_order() {
    let definition = PipelineDefinition::from_steps(vec![
        step("files", &[]),
        step("chunker", &["files"]),
        step("embedder", &["chunker"]),
    ])
    .expect("must build");
    assert_eq!(definition.step_names(), vec!["files", "chunker", "embedder"]);
    assert!(definition.contains("chunker"));
    assert_eq!(definition.step("embedder").map(|s| s.depends_on.as_slice()), Some(&["chunker".to_string()][..]));
    assert!(definition.step("missing").is_none());
}

#[test]
fn duplicate_step_name_is_rejected() {
    let error = PipelineDefinition::from_steps(vec![
        step("retriever", &[]),
        step("reranker", &["retriever"]),
        step("retriever", &[]),
    ])
    .expect_err("must reject");
    assert_eq!(
        error,
        PipelineError::DuplicateStep {
            name: "retriever".to_string(),
            first: 0,
        }
    );
}

#[test]
fn dangling_dependency_names_step_and_missing_dependency() {
    let error = PipelineDefinition::from_steps(vec![
        step("retriever", &[]),
        step("reranker", &["retriver"]),
    ])
    .expect_err("must reject");
    assert_eq!(
        error,
        PipelineError::DanglingDependency {
            step: "reranker".to_string(),
            dependency: "retriver".to_string(),
        }
    );
}

#[test]
fn two_step_cycle_reports_the_ordered_cycle() {
    let error = PipelineDefinition::from_steps(vec![
        step("A", &["B"]),
        step("B", &["A"]),
    ])
    .expect_err("must reject");
    assert_eq!(
        error,
        PipelineError::Cycle {
            cycle: vec!["A".to_string(), "B".to_string(), "A".to_string()],
        }
    );
}

#[test]
fn self_dependency_is_a_cycle_of_length_one() {
    let error = PipelineDefinition::from_steps(vec![step("a", &["a"])]).expect_err("must reject");
    assert_eq!(
        error,
        PipelineError::Cycle {
            cycle: vec!["a".to_string(), "a".to_string()],
        }
    );
}

#[test]
fn longer_cycle_starts_and_ends_at_the_repeated_step() {
    let error = PipelineDefinition::from_steps(vec![
        step("entry", &[]),
        step("a", &["entry", "c"]),
        step("b", &["a"]),
        step("c", &["b"]),
    ])
    .expect_err("must reject");
    let PipelineError::Cycle { cycle } = error else {
        panic!("expected Cycle, got {error:?}");
    };
    assert_eq!(cycle.first(), cycle.last());
    assert_eq!(cycle.len(), 4);
    for name in ["a", "b", "c"] {
        assert!(cycle.contains(&name.to_string()), "cycle must contain `{name}`");
    }
}

#[test]
fn multiple_roots_and_sinks_are_allowed() {
    let definition = PipelineDefinition::from_steps(vec![
        step("left", &[]),
        step("right", &[]),
        step("join", &["left", "right"]),
        step("report", &["join"]),
        step("audit", &["join"]),
    ]);
    assert!(definition.is_ok());
}

#[test]
fn duplicate_check_runs_before_dependency_checks() {
    // The second `retriever` also has a dangling dependency; the duplicate
    // wins because it is checked first.
    let error = PipelineDefinition::from_steps(vec![
        step("retriever", &[]),
        step("retriever", &["missing"]),
    ])
    .expect_err("must reject");
    assert!(matches!(error, PipelineError::DuplicateStep { .. }));
}

#[test]
fn step_wire_names_round_trip_through_serde() {
    let value = json!({
        "name": "retriever",
        "step": "Retriever",
        "step_args": {"top_k": 100},
        "depends_on": ["chunker"],
    });
    let parsed: PipelineStep = serde_json::from_value(value.clone()).expect("must parse");
    assert_eq!(parsed.step_type, "Retriever");
    assert_eq!(serde_json::to_value(&parsed).expect("must encode"), value);
}

#[test]
fn document_builds_a_definition() {
    let document: PipelineDocument = serde_json::from_value(json!({
        "schema": "quarry-pipeline/0.0.1",
        "name": "ingest",
        "steps": [
            {"name": "files", "step": "ContextFiles"},
            {"name": "chunker", "step": "Chunker", "depends_on": ["files"]},
        ]
    }))
    .expect("must parse");
    let definition = document.definition().expect("must validate");
    assert_eq!(definition.step_names(), vec!["files", "chunker"]);
}
