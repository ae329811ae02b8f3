//! Suite runner with per-expectation error isolation.
//!
//! One expectation, one record. Infrastructure errors from a check never
//! abort the suite: they become `errored` records with the error text as the
//! observed value, and every remaining expectation still runs.

use chrono::{DateTime, Utc};
use expectations_core::{DataSource, RecordStatus, RunResult, Suite, SuiteResult, TestRecord};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Runner label stamped on engine-produced [`RunResult`]s.
pub const ENGINE_RUNNER: &str = "expectations";

/// Executes suites against a data source, one expectation at a time.
#[derive(Debug, Default)]
pub struct SuiteRunner;

impl SuiteRunner {
    /// Creates a new runner.
    pub fn new() -> Self {
        Self
    }

    /// Runs every expectation of `suite` against `source`, in declaration
    /// order, and returns the suite result.
    ///
    /// A check returning `Err` produces an `errored` record; it never stops
    /// the remaining expectations.
    pub fn run(&self, suite: &Suite, source: &dyn DataSource) -> SuiteResult {
        info!(suite = suite.name(), checks = suite.len(), "Running suite");

        let records: Vec<TestRecord> = suite
            .expectations()
            .iter()
            .map(|expectation| {
                let started = Instant::now();
                let record = match expectation.check(source) {
                    Ok(outcome) => TestRecord {
                        name: expectation.name().to_string(),
                        category: expectation.category().clone(),
                        status: if outcome.success {
                            RecordStatus::Passed
                        } else {
                            RecordStatus::Failed
                        },
                        observed: outcome.observed,
                        details: outcome.details,
                        execution_time: Some(elapsed_seconds(started)),
                    },
                    Err(err) => {
                        warn!(
                            expectation = expectation.name(),
                            error = %err,
                            "Check could not be evaluated"
                        );
                        TestRecord {
                            name: expectation.name().to_string(),
                            category: expectation.category().clone(),
                            status: RecordStatus::Errored,
                            observed: err.to_string(),
                            details: String::new(),
                            execution_time: Some(elapsed_seconds(started)),
                        }
                    }
                };
                debug!(
                    expectation = record.name.as_str(),
                    status = %record.status,
                    observed = record.observed.as_str(),
                );
                record
            })
            .collect();

        let result = SuiteResult::from_records(suite.name(), records);
        info!(
            suite = result.name.as_str(),
            passed = result.passed,
            failed = result.failed,
            "Suite finished"
        );
        result
    }
}

fn elapsed_seconds(started: Instant) -> f64 {
    (started.elapsed().as_secs_f64() * 1000.0).round() / 1000.0
}

/// Runs a list of suites in order and packages the results as one engine run.
pub fn run_suites(
    runner_name: &str,
    generated_at: DateTime<Utc>,
    suites: &[Suite],
    source: &dyn DataSource,
) -> RunResult {
    let runner = SuiteRunner::new();
    let results: Vec<SuiteResult> = suites.iter().map(|s| runner.run(s, source)).collect();
    RunResult::engine(runner_name, generated_at, results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemorySource;
    use crate::library;
    use expectations_core::{Category, CheckOutcome, Expectation, SuiteStatus, Value};
    use pretty_assertions::assert_eq;

    fn always(success: bool, name: &str) -> Expectation {
        let observed = if success { "ok" } else { "violations" };
        Expectation::new(name, Category::Other, move |_source: &dyn DataSource| {
            Ok(CheckOutcome::new(success, observed))
        })
    }

    #[test]
    fn test_error_isolation_keeps_remaining_checks_running() {
        let source = MemorySource::new();
        let suite = Suite::new("isolation", "SELECT 1")
            .expect(always(true, "first"))
            .expect(always(true, "second"))
            .expect(Expectation::new("third", Category::Other, |s: &dyn DataSource| {
                s.execute("SELECT COUNT(*) FROM missing")?;
                Ok(CheckOutcome::pass("unreachable"))
            }))
            .expect(always(true, "fourth"))
            .expect(always(false, "fifth"));

        let result = SuiteRunner::new().run(&suite, &source);

        assert_eq!(result.total, 5);
        assert_eq!(result.passed, 3);
        assert_eq!(result.failed, 2);
        assert_eq!(result.status, SuiteStatus::Failed);

        let statuses: Vec<RecordStatus> = result.records.iter().map(|r| r.status).collect();
        assert_eq!(
            statuses,
            vec![
                RecordStatus::Passed,
                RecordStatus::Passed,
                RecordStatus::Errored,
                RecordStatus::Passed,
                RecordStatus::Failed,
            ]
        );
        assert!(result.records[2].observed.contains("missing"));
    }

    #[test]
    fn test_records_preserve_declaration_order() {
        let source = MemorySource::new();
        let suite = Suite::new("order", "SELECT 1")
            .expect(always(true, "a"))
            .expect(always(false, "b"))
            .expect(always(true, "c"));

        let result = SuiteRunner::new().run(&suite, &source);
        let names: Vec<&str> = result.records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_empty_suite_passes() {
        let result = SuiteRunner::new().run(&Suite::cross_table("empty"), &MemorySource::new());
        assert_eq!(result.total, 0);
        assert_eq!(result.status, SuiteStatus::Passed);
    }

    #[test]
    fn test_records_carry_timing() {
        let suite = Suite::cross_table("timed").expect(always(true, "a"));
        let result = SuiteRunner::new().run(&suite, &MemorySource::new());
        assert!(result.records[0].execution_time.is_some());
    }

    #[test]
    fn test_run_suites_packages_engine_run() {
        let source = MemorySource::new()
            .with_response(
                "SELECT COUNT(*) - COUNT(DISTINCT id) FROM orders",
                vec![vec![Value::Int(0)]],
            )
            .with_response(
                "SELECT COUNT(*) FROM orders WHERE id IS NULL",
                vec![vec![Value::Int(1)]],
            );

        let suites = vec![
            Suite::new("uniqueness", "SELECT * FROM orders")
                .expect(library::column_unique("orders", "id")),
            Suite::new("completeness", "SELECT * FROM orders")
                .expect(library::column_not_null("orders", "id")),
        ];

        let run = run_suites(ENGINE_RUNNER, Utc::now(), &suites, &source);

        assert_eq!(run.runner, "expectations");
        assert_eq!(run.suites.len(), 2);
        assert_eq!(run.summary.passed, 1);
        assert_eq!(run.summary.failed, 1);
        assert_eq!(run.summary.total, 2);
        assert_eq!(run.records().count(), 2);
    }
}
