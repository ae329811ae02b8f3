//! dbt subprocess invocation.
//!
//! Runs `dbt test` against a project directory and ingests the
//! `target/run_results.json` artifact. A missing tool, a missing artifact, or
//! an unparseable artifact never aborts the run; each surfaces as a synthetic
//! errored record so the failure is visible in the final report.

use chrono::{DateTime, Utc};
use expectations_core::{RunResult, TestRecord};
use expectations_engine::dbt;
use std::path::Path;
use std::process::Command;
use tracing::{info, warn};

/// Runs dbt tests for `project_dir` and returns the outcome as a tool run.
pub fn run_dbt_tests(project_dir: &Path, generated_at: DateTime<Utc>) -> RunResult {
    info!(project_dir = %project_dir.display(), "Running dbt test");

    let invocation = Command::new("dbt")
        .arg("test")
        .arg("--project-dir")
        .arg(project_dir)
        .current_dir(project_dir)
        .output();

    let records = match invocation {
        Err(err) => {
            warn!(error = %err, "dbt could not be invoked");
            vec![dbt::execution_error_record(
                "dbt_execution",
                format!("dbt executable not found: {err}"),
                "Install dbt or run with --engine-only",
            )]
        }
        Ok(output) => ingest_artifact(project_dir, &output.stdout),
    };

    RunResult::tool(dbt::DBT_RUNNER, generated_at, records)
}

fn ingest_artifact(project_dir: &Path, stdout: &[u8]) -> Vec<TestRecord> {
    let artifact_path = project_dir.join("target").join("run_results.json");
    match std::fs::read_to_string(&artifact_path) {
        Ok(content) => match dbt::parse_run_results(&content) {
            Ok(records) => records,
            Err(err) => vec![dbt::execution_error_record(
                "dbt_test_execution",
                format!("Could not parse run_results.json: {err}"),
                stdout_excerpt(stdout),
            )],
        },
        Err(_) => vec![dbt::execution_error_record(
            "dbt_test_execution",
            format!("Could not find {}", artifact_path.display()),
            stdout_excerpt(stdout),
        )],
    }
}

/// Keeps the tail of captured stdout, bounded to 500 characters.
fn stdout_excerpt(stdout: &[u8]) -> String {
    let text = String::from_utf8_lossy(stdout);
    let start = text
        .char_indices()
        .rev()
        .nth(499)
        .map(|(i, _)| i)
        .unwrap_or(0);
    format!("stdout: {}", &text[start..])
}
