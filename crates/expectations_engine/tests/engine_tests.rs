//! End-to-end engine tests: parse suite definitions, build them, run them
//! against a scripted source, and aggregate alongside ingested dbt results.

use chrono::Utc;
use expectations_core::{Category, RecordStatus, RunId, RunResult, RunStatus, Value};
use expectations_engine::{
    aggregate_runs, dbt, run_suites, suite_from_spec, MemorySource, ENGINE_RUNNER,
};
use pretty_assertions::assert_eq;

fn scripted_source() -> MemorySource {
    MemorySource::new()
        .with_table(
            "marts.securities",
            &[("SEC_ID", "Int64"), ("STATUS", "Utf8"), ("ASSET_CLASS", "Utf8")],
        )
        .with_response(
            "SELECT COUNT(*) - COUNT(DISTINCT SEC_ID) FROM marts.securities",
            vec![vec![Value::Int(0)]],
        )
        .with_response(
            "SELECT DISTINCT STATUS FROM marts.securities \
             WHERE STATUS NOT IN ('A', 'I', 'U') AND STATUS IS NOT NULL",
            vec![vec![Value::Text("X".to_string())]],
        )
        .with_response(
            "SELECT COUNT(*) FROM marts.securities",
            vec![vec![Value::Int(150)]],
        )
}

#[test]
fn parsed_suites_run_and_aggregate_with_dbt_results() {
    let yaml = r#"
name: "Mart: securities output"
subject_query: SELECT * FROM marts.securities
checks:
  - type: column_exists
    table: marts.securities
    column: SEC_ID
  - type: column_unique
    table: marts.securities
    column: SEC_ID
  - type: values_in_set
    table: marts.securities
    column: STATUS
    values: ["A", "I", "U"]
  - type: row_count_between
    table: marts.securities
    min: 1
    max: 100000
"#;
    let spec = expectations_parser::parse_yaml(yaml).unwrap();
    let suite = suite_from_spec(&spec);
    let source = scripted_source();
    let generated_at = Utc::now();

    let engine_run = run_suites(ENGINE_RUNNER, generated_at, &[suite], &source);

    assert_eq!(engine_run.summary.total, 4);
    assert_eq!(engine_run.summary.passed, 3);
    assert_eq!(engine_run.summary.failed, 1);
    let suite_result = &engine_run.suites[0];
    assert_eq!(suite_result.records[2].status, RecordStatus::Failed);
    assert_eq!(suite_result.records[2].observed, r#"Invalid values: ["X"]"#);

    let dbt_records = dbt::parse_run_results(
        r#"{
            "results": [
                {"unique_id": "test.p.unique_stg_sec_id", "status": "pass", "execution_time": 0.2},
                {"unique_id": "test.p.not_null_stg_sec_id", "status": "fail",
                 "message": "Got 1 result, configured to fail if != 0", "failures": 1}
            ]
        }"#,
    )
    .unwrap();
    let dbt_run = RunResult::tool(dbt::DBT_RUNNER, generated_at, dbt_records);
    assert_eq!(dbt_run.summary.passed, 1);
    assert_eq!(dbt_run.summary.failed, 1);

    let run_id = RunId::from_datetime(&generated_at);
    let aggregate = aggregate_runs(&[dbt_run, engine_run], run_id);

    assert_eq!(aggregate.total, 6);
    assert_eq!(aggregate.passed, 4);
    assert_eq!(aggregate.failed, 2);
    assert_eq!(aggregate.status, RunStatus::Failed);

    assert_eq!(aggregate.rollup.get("Uniqueness").unwrap().passed, 2);
    assert_eq!(aggregate.rollup.get("Completeness").unwrap().failed, 1);
    assert_eq!(aggregate.rollup.get("Validity").unwrap().failed, 1);
    assert_eq!(aggregate.rollup.totals(), (4, 2));
}

#[test]
fn missing_tool_surfaces_as_execution_error_not_silence() {
    let generated_at = Utc::now();
    let record = dbt::execution_error_record(
        "dbt_execution",
        "dbt executable not found",
        "Install dbt or run with --engine-only",
    );
    let run = RunResult::tool(dbt::DBT_RUNNER, generated_at, vec![record]);

    let aggregate = aggregate_runs(&[run], RunId::new("20260825_120000"));

    assert_eq!(aggregate.status, RunStatus::Failed);
    assert_eq!(aggregate.rollup.get("Execution").unwrap().failed, 1);
}

#[test]
fn all_passing_sources_produce_passed_aggregate() {
    let source = MemorySource::new().with_response(
        "SELECT COUNT(*) FROM positions WHERE account_id IS NULL",
        vec![vec![Value::Int(0)]],
    );
    let yaml = r#"
name: "Staging: positions"
checks:
  - type: column_not_null
    table: positions
    column: account_id
"#;
    let suite = suite_from_spec(&expectations_parser::parse_yaml(yaml).unwrap());
    let run = run_suites(ENGINE_RUNNER, Utc::now(), &[suite], &source);

    let aggregate = aggregate_runs(std::slice::from_ref(&run), RunId::new("r"));
    assert_eq!(aggregate.status, RunStatus::Passed);
    assert_eq!(aggregate.status.to_string(), "PASSED");
    assert_eq!(run.records().next().unwrap().category, Category::Completeness);
}
