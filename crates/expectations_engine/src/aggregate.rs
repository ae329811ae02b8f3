//! Run aggregation: unified totals and category rollup across sources.
//!
//! The aggregator is a pure fold over records. A record counts as passed
//! only when its status is `passed`; warned, errored, and skipped records
//! all count as failed at this level. The fold is commutative across runs,
//! so the order sources are added in never changes the aggregate.

use expectations_core::{Aggregate, CategoryRollup, RunId, RunResult, RunStatus};
use tracing::info;

/// Folds run results into a single [`Aggregate`].
#[derive(Debug, Default)]
pub struct RunAggregator {
    passed: usize,
    failed: usize,
    rollup: CategoryRollup,
}

impl RunAggregator {
    /// Creates an empty aggregator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds every record of `run` into the totals and the rollup.
    pub fn add_run(&mut self, run: &RunResult) {
        for record in run.records() {
            let passing = record.status.is_passing();
            if passing {
                self.passed += 1;
            } else {
                self.failed += 1;
            }
            self.rollup.observe(&record.category, passing);
        }
    }

    /// Finishes the fold. Status is `PASSED` iff zero records failed;
    /// an empty aggregate therefore passes.
    pub fn finish(self, run_id: RunId) -> Aggregate {
        let status = if self.failed == 0 {
            RunStatus::Passed
        } else {
            RunStatus::Failed
        };
        info!(
            run_id = %run_id,
            passed = self.passed,
            failed = self.failed,
            %status,
            "Aggregated run results"
        );
        Aggregate {
            run_id,
            status,
            passed: self.passed,
            failed: self.failed,
            total: self.passed + self.failed,
            rollup: self.rollup,
        }
    }
}

/// Convenience: aggregates a slice of runs in one call.
pub fn aggregate_runs(runs: &[RunResult], run_id: RunId) -> Aggregate {
    let mut aggregator = RunAggregator::new();
    for run in runs {
        aggregator.add_run(run);
    }
    aggregator.finish(run_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use expectations_core::{Category, RecordStatus, SuiteResult, TestRecord};
    use pretty_assertions::assert_eq;

    fn record(name: &str, category: Category, status: RecordStatus) -> TestRecord {
        TestRecord {
            name: name.to_string(),
            category,
            status,
            observed: "observed".to_string(),
            details: String::new(),
            execution_time: None,
        }
    }

    fn tool_run(records: Vec<TestRecord>) -> RunResult {
        RunResult::tool("dbt", Utc::now(), records)
    }

    #[test]
    fn test_aggregate_mixed_sources() {
        let dbt = tool_run(vec![
            record("unique_stg_sec_id", Category::Uniqueness, RecordStatus::Passed),
            record("not_null_stg_sec_id", Category::Completeness, RecordStatus::Failed),
            record("accepted_values_status", Category::Validity, RecordStatus::Warned),
        ]);
        let engine = RunResult::engine(
            "expectations",
            Utc::now(),
            vec![SuiteResult::from_records(
                "marts",
                vec![
                    record("row count", Category::Volume, RecordStatus::Passed),
                    record("schema drift", Category::Schema, RecordStatus::Errored),
                ],
            )],
        );

        let aggregate = aggregate_runs(&[dbt, engine], RunId::new("20260101_000000"));

        assert_eq!(aggregate.passed, 2);
        assert_eq!(aggregate.failed, 3);
        assert_eq!(aggregate.total, 5);
        assert_eq!(aggregate.status, RunStatus::Failed);
        assert_eq!(aggregate.rollup.totals(), (2, 3));
        assert_eq!(aggregate.rollup.get("Validity").unwrap().failed, 1);
    }

    #[test]
    fn test_aggregate_is_commutative_across_runs() {
        let a = tool_run(vec![
            record("a1", Category::Uniqueness, RecordStatus::Passed),
            record("a2", Category::Validity, RecordStatus::Failed),
        ]);
        let b = tool_run(vec![
            record("b1", Category::Uniqueness, RecordStatus::Failed),
            record("b2", Category::Other, RecordStatus::Passed),
        ]);

        let id = RunId::new("run");
        let forward = aggregate_runs(&[a.clone(), b.clone()], id.clone());
        let reverse = aggregate_runs(&[b, a], id);

        assert_eq!(forward, reverse);
    }

    #[test]
    fn test_rollup_conserves_totals() {
        let run = tool_run(vec![
            record("a", Category::Schema, RecordStatus::Passed),
            record("b", Category::Schema, RecordStatus::Failed),
            record("c", Category::BusinessRule, RecordStatus::Skipped),
        ]);

        let aggregate = aggregate_runs(&[run], RunId::new("run"));
        let (rollup_passed, rollup_failed) = aggregate.rollup.totals();
        assert_eq!(rollup_passed, aggregate.passed);
        assert_eq!(rollup_failed, aggregate.failed);
    }

    #[test]
    fn test_empty_aggregate_passes() {
        let aggregate = aggregate_runs(&[], RunId::new("empty"));
        assert_eq!(aggregate.status, RunStatus::Passed);
        assert_eq!(aggregate.total, 0);
        assert!(aggregate.rollup.is_empty());
    }

    #[test]
    fn test_warned_counts_as_failed() {
        let run = tool_run(vec![record("w", Category::Other, RecordStatus::Warned)]);
        let aggregate = aggregate_runs(&[run], RunId::new("run"));
        assert_eq!(aggregate.failed, 1);
        assert_eq!(aggregate.status, RunStatus::Failed);
    }
}
