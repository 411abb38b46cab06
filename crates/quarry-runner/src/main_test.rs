use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;

fn fixture(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../fixtures").join(relative)
}

fn quarry() -> Command {
    Command::cargo_bin("quarry").expect("binary must build")
}

#[test]
fn validate_succeeds_on_a_valid_pipeline() {
    quarry()
        .arg("validate")
        .arg("--pipeline")
        .arg(fixture("pipelines/basic_query.yaml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("basic_query: 2 steps, valid"))
        .stdout(predicate::str::contains("retriever -> reranker"));
}

#[test]
fn validate_fails_on_a_cyclic_pipeline() {
    quarry()
        .arg("validate")
        .arg("--pipeline")
        .arg(fixture("pipelines/cycle.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("dependency cycle detected"));
}

#[test]
fn plan_prints_the_run_request_body() {
    quarry()
        .arg("plan")
        .arg("--pipeline")
        .arg(fixture("pipelines/basic_query.yaml"))
        .arg("--overrides")
        .arg(fixture("overrides/retriever_top_k.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("\"pipeline_name\": \"basic_query\""))
        .stdout(predicate::str::contains("\"top_k\": 50"));
}

#[test]
fn unknown_subcommand_is_rejected() {
    quarry().arg("frobnicate").assert().failure();
}
