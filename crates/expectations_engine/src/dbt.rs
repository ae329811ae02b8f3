//! Ingestion of dbt `run_results.json` artifacts.
//!
//! dbt test outcomes are mapped into the same [`TestRecord`] shape the
//! engine produces, categorized by test name, so the aggregator and the
//! reporting layer never distinguish between sources.

use expectations_core::{categorize, Category, RecordStatus, TestRecord};
use serde::Deserialize;
use tracing::{debug, warn};

/// Runner label stamped on dbt-produced run results.
pub const DBT_RUNNER: &str = "dbt";

/// The slice of a dbt `run_results.json` artifact this crate reads.
#[derive(Debug, Deserialize)]
struct RunResultsArtifact {
    #[serde(default)]
    results: Vec<ArtifactEntry>,
}

#[derive(Debug, Deserialize)]
struct ArtifactEntry {
    unique_id: String,
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    execution_time: Option<f64>,
    #[serde(default)]
    failures: Option<u64>,
}

fn map_status(status: &str) -> RecordStatus {
    match status {
        "pass" | "passed" => RecordStatus::Passed,
        "fail" | "failed" => RecordStatus::Failed,
        "warn" | "warned" => RecordStatus::Warned,
        "skipped" => RecordStatus::Skipped,
        _ => RecordStatus::Errored,
    }
}

/// Parses a `run_results.json` document into test records.
///
/// Test names are the dbt unique ids with their `test.` prefix removed and
/// are categorized by name. Unknown statuses map to `errored`.
pub fn parse_run_results(content: &str) -> Result<Vec<TestRecord>, serde_json::Error> {
    let artifact: RunResultsArtifact = serde_json::from_str(content)?;
    let records = artifact
        .results
        .into_iter()
        .map(|entry| {
            let name = entry
                .unique_id
                .strip_prefix("test.")
                .unwrap_or(&entry.unique_id)
                .to_string();
            let status = map_status(&entry.status);
            if status == RecordStatus::Errored {
                warn!(test = name.as_str(), status = entry.status.as_str(), "dbt test errored");
            }
            let observed = match (&entry.message, entry.failures) {
                (Some(message), _) if !message.is_empty() => message.clone(),
                (_, Some(failures)) => format!("{failures} failures"),
                _ => String::new(),
            };
            debug!(test = name.as_str(), %status, "Ingested dbt test result");
            TestRecord {
                category: categorize(&name),
                name,
                status,
                observed,
                details: String::new(),
                execution_time: entry.execution_time,
            }
        })
        .collect();
    Ok(records)
}

/// Builds the synthetic record emitted when a test source could not run at
/// all (missing tool, missing artifact, unparseable output).
pub fn execution_error_record(
    name: impl Into<String>,
    observed: impl Into<String>,
    details: impl Into<String>,
) -> TestRecord {
    TestRecord {
        name: name.into(),
        category: Category::Execution,
        status: RecordStatus::Errored,
        observed: observed.into(),
        details: details.into(),
        execution_time: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_run_results_maps_statuses_and_categories() {
        let content = r#"{
            "results": [
                {
                    "unique_id": "test.portfolio.unique_stg_securities_security_id",
                    "status": "pass",
                    "message": null,
                    "execution_time": 0.41,
                    "failures": 0
                },
                {
                    "unique_id": "test.portfolio.not_null_stg_securities_security_id",
                    "status": "fail",
                    "message": "Got 2 results, configured to fail if != 0",
                    "execution_time": 0.38,
                    "failures": 2
                },
                {
                    "unique_id": "test.portfolio.accepted_values_stg_securities_status",
                    "status": "warn",
                    "failures": 1
                },
                {
                    "unique_id": "test.portfolio.relationships_positions_security_id",
                    "status": "error",
                    "message": "Database Error"
                }
            ]
        }"#;

        let records = parse_run_results(content).unwrap();
        assert_eq!(records.len(), 4);

        assert_eq!(records[0].name, "portfolio.unique_stg_securities_security_id");
        assert_eq!(records[0].status, RecordStatus::Passed);
        assert_eq!(records[0].category, Category::Uniqueness);
        assert_eq!(records[0].execution_time, Some(0.41));

        assert_eq!(records[1].status, RecordStatus::Failed);
        assert_eq!(records[1].category, Category::Completeness);
        assert_eq!(records[1].observed, "Got 2 results, configured to fail if != 0");

        assert_eq!(records[2].status, RecordStatus::Warned);
        assert_eq!(records[2].category, Category::Validity);
        assert_eq!(records[2].observed, "1 failures");

        assert_eq!(records[3].status, RecordStatus::Errored);
        assert_eq!(records[3].category, Category::ReferentialIntegrity);
    }

    #[test]
    fn test_parse_run_results_unknown_status_is_errored() {
        let content = r#"{"results": [{"unique_id": "test.p.t", "status": "mystery"}]}"#;
        let records = parse_run_results(content).unwrap();
        assert_eq!(records[0].status, RecordStatus::Errored);
    }

    #[test]
    fn test_parse_run_results_keeps_unprefixed_ids() {
        let content = r#"{"results": [{"unique_id": "model.p.stg", "status": "pass"}]}"#;
        let records = parse_run_results(content).unwrap();
        assert_eq!(records[0].name, "model.p.stg");
    }

    #[test]
    fn test_parse_run_results_empty_document() {
        assert!(parse_run_results("{}").unwrap().is_empty());
        assert!(parse_run_results("not json").is_err());
    }

    #[test]
    fn test_execution_error_record_shape() {
        let record = execution_error_record(
            "dbt_execution",
            "dbt executable not found",
            "Install dbt or pass --engine-only",
        );
        assert_eq!(record.status, RecordStatus::Errored);
        assert_eq!(record.category, Category::Execution);
        assert!(record.execution_time.is_none());
    }
}
