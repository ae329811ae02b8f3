//! Result model: records, suite results, run results, and rollups.
//!
//! Every test source — the expectation engine and any external test tool —
//! produces the same record shape, so the aggregator and the reporting layer
//! never special-case by origin. All aggregates are carried explicitly; the
//! rendering layer never re-derives counts.

use crate::Category;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Status of a single test record.
///
/// `passed`/`failed` come from expectation outcomes; `warned`, `errored`, and
/// `skipped` come from external tools or from infrastructure errors. At the
/// aggregate level every non-passed status counts as failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordStatus {
    /// Check succeeded
    Passed,
    /// Check ran and found violations
    Failed,
    /// External tool reported a warning
    Warned,
    /// Infrastructure error; the check could not be evaluated
    Errored,
    /// External tool skipped the test
    Skipped,
}

impl RecordStatus {
    /// True only for [`RecordStatus::Passed`]; warnings are deliberately not
    /// a third outcome at the aggregate level.
    pub fn is_passing(self) -> bool {
        matches!(self, RecordStatus::Passed)
    }
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RecordStatus::Passed => "passed",
            RecordStatus::Failed => "failed",
            RecordStatus::Warned => "warned",
            RecordStatus::Errored => "errored",
            RecordStatus::Skipped => "skipped",
        };
        f.write_str(label)
    }
}

/// One test result row: an expectation invocation or an external tool's test.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TestRecord {
    /// Test or expectation name
    pub name: String,
    /// Category label for the rollup
    pub category: Category,
    /// Outcome status
    pub status: RecordStatus,
    /// What was measured (expectation) or reported (tool message)
    pub observed: String,
    /// Optional free-text rationale
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub details: String,
    /// Wall-clock execution time in seconds, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_time: Option<f64>,
}

/// Status of a whole suite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuiteStatus {
    /// Every record passed
    Passed,
    /// At least one record failed or errored
    Failed,
}

impl fmt::Display for SuiteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SuiteStatus::Passed => f.write_str("passed"),
            SuiteStatus::Failed => f.write_str("failed"),
        }
    }
}

/// The result of running one suite: ordered records plus counts.
///
/// `total` always equals the number of expectations in the suite — every
/// expectation produces exactly one record, infrastructure errors included.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SuiteResult {
    /// Suite name, copied from the suite
    pub name: String,
    /// Overall suite status
    pub status: SuiteStatus,
    /// Records in execution order
    pub records: Vec<TestRecord>,
    /// Number of passed records
    pub passed: usize,
    /// Number of failed records (errored records included)
    pub failed: usize,
    /// passed + failed
    pub total: usize,
}

impl SuiteResult {
    /// Builds a suite result from its ordered records, computing counts.
    pub fn from_records(name: impl Into<String>, records: Vec<TestRecord>) -> Self {
        let passed = records.iter().filter(|r| r.status.is_passing()).count();
        let failed = records.len() - passed;
        Self {
            name: name.into(),
            status: if failed > 0 {
                SuiteStatus::Failed
            } else {
                SuiteStatus::Passed
            },
            passed,
            failed,
            total: records.len(),
            records,
        }
    }
}

/// Per-run pass/fail totals.
///
/// `warned` and `errored` are populated by external tools whose native
/// statuses distinguish them; the engine itself folds errors into `failed`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RunSummary {
    pub passed: usize,
    pub failed: usize,
    #[serde(default)]
    pub warned: usize,
    #[serde(default)]
    pub errored: usize,
    pub total: usize,
}

impl RunSummary {
    /// Tallies a summary over a record slice using the tool-status buckets.
    pub fn tally(records: &[TestRecord]) -> Self {
        let mut summary = Self::default();
        for record in records {
            summary.observe(record.status);
        }
        summary
    }

    /// Counts one record into the summary.
    pub fn observe(&mut self, status: RecordStatus) {
        match status {
            RecordStatus::Passed => self.passed += 1,
            RecordStatus::Failed => self.failed += 1,
            RecordStatus::Warned => self.warned += 1,
            RecordStatus::Errored | RecordStatus::Skipped => self.errored += 1,
        }
        self.total += 1;
    }
}

/// The unit produced by one test source during one run.
///
/// Tool runs carry flat `tests`; engine runs carry `suites`. Both expose a
/// uniform record view through [`RunResult::records`]. Created fresh per
/// execution; nothing persists across runs except the serialized form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunResult {
    /// Which source produced this run (e.g. "dbt", "expectations")
    pub runner: String,
    /// When the run was produced; supplied by the caller
    pub generated_at: DateTime<Utc>,
    /// Flat test records (external tool runs)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tests: Vec<TestRecord>,
    /// Suite results (engine runs)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suites: Vec<SuiteResult>,
    /// Totals for this run
    pub summary: RunSummary,
}

impl RunResult {
    /// Builds a tool run from flat records, tallying the summary.
    pub fn tool(
        runner: impl Into<String>,
        generated_at: DateTime<Utc>,
        tests: Vec<TestRecord>,
    ) -> Self {
        let summary = RunSummary::tally(&tests);
        Self {
            runner: runner.into(),
            generated_at,
            tests,
            suites: Vec::new(),
            summary,
        }
    }

    /// Builds an engine run from suite results, summing suite counts.
    pub fn engine(
        runner: impl Into<String>,
        generated_at: DateTime<Utc>,
        suites: Vec<SuiteResult>,
    ) -> Self {
        let mut summary = RunSummary::default();
        for suite in &suites {
            summary.passed += suite.passed;
            summary.failed += suite.failed;
            summary.total += suite.total;
        }
        Self {
            runner: runner.into(),
            generated_at,
            tests: Vec::new(),
            suites,
            summary,
        }
    }

    /// Builds an empty run, for sources that did not execute.
    pub fn empty(runner: impl Into<String>, generated_at: DateTime<Utc>) -> Self {
        Self {
            runner: runner.into(),
            generated_at,
            tests: Vec::new(),
            suites: Vec::new(),
            summary: RunSummary::default(),
        }
    }

    /// Iterates every record of this run exactly once, in order.
    pub fn records(&self) -> impl Iterator<Item = &TestRecord> {
        self.tests
            .iter()
            .chain(self.suites.iter().flat_map(|s| s.records.iter()))
    }
}

/// Explicit run identifier passed into the aggregation/report boundary.
///
/// Created once at the invocation boundary; the core engine never reads the
/// process clock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunId(String);

impl RunId {
    /// Creates a run id from an arbitrary identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Derives a filesystem-safe run id from a timestamp.
    pub fn from_datetime(at: &DateTime<Utc>) -> Self {
        Self(at.format("%Y%m%d_%H%M%S").to_string())
    }

    /// Returns the identifier text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Pass/fail counts for one category.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryCounts {
    pub passed: usize,
    pub failed: usize,
}

impl CategoryCounts {
    /// passed + failed
    pub fn total(&self) -> usize {
        self.passed + self.failed
    }

    /// Pass percentage in [0, 100]; 100 for an empty category.
    pub fn pass_rate(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            100.0
        } else {
            (self.passed as f64 / total as f64 * 1000.0).round() / 10.0
        }
    }
}

/// Category-name-keyed pass/fail counts across all records of a run.
///
/// Built once after all sources have executed; read-only afterward.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryRollup {
    #[serde(flatten)]
    counts: BTreeMap<String, CategoryCounts>,
}

impl CategoryRollup {
    /// Creates an empty rollup.
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one record into its category bucket.
    pub fn observe(&mut self, category: &Category, passing: bool) {
        let entry = self.counts.entry(category.to_string()).or_default();
        if passing {
            entry.passed += 1;
        } else {
            entry.failed += 1;
        }
    }

    /// Returns the counts for one category name.
    pub fn get(&self, category: &str) -> Option<&CategoryCounts> {
        self.counts.get(category)
    }

    /// Iterates (category name, counts) in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CategoryCounts)> {
        self.counts.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Sums (passed, failed) across every category.
    pub fn totals(&self) -> (usize, usize) {
        self.counts
            .values()
            .fold((0, 0), |(p, f), c| (p + c.passed, f + c.failed))
    }

    /// True when no record has been observed.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Overall run status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RunStatus {
    /// Zero failing records across every source
    Passed,
    /// At least one non-passing record
    Failed,
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunStatus::Passed => f.write_str("PASSED"),
            RunStatus::Failed => f.write_str("FAILED"),
        }
    }
}

/// Unified totals and category rollup across every run of one invocation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Aggregate {
    /// The explicit run identifier
    pub run_id: RunId,
    /// PASSED iff `failed == 0`
    pub status: RunStatus,
    /// Records with status `passed`
    pub passed: usize,
    /// Every other record
    pub failed: usize,
    /// passed + failed
    pub total: usize,
    /// Category-keyed rollup over the same records
    pub rollup: CategoryRollup,
}

/// Everything one invocation produced: the per-source runs plus their
/// aggregate. This is the entire contract of the reporting layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunOutcome {
    pub run_id: RunId,
    pub generated_at: DateTime<Utc>,
    pub runs: Vec<RunResult>,
    pub aggregate: Aggregate,
}

#[cfg(test)]
mod tests {
    use super::*;
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

    #[test]
    fn test_suite_result_counts() {
        let result = SuiteResult::from_records(
            "staging",
            vec![
                record("a", Category::Schema, RecordStatus::Passed),
                record("b", Category::Completeness, RecordStatus::Failed),
                record("c", Category::Uniqueness, RecordStatus::Errored),
            ],
        );

        assert_eq!(result.passed, 1);
        assert_eq!(result.failed, 2);
        assert_eq!(result.total, 3);
        assert_eq!(result.status, SuiteStatus::Failed);
    }

    #[test]
    fn test_suite_result_all_passed() {
        let result = SuiteResult::from_records(
            "staging",
            vec![record("a", Category::Schema, RecordStatus::Passed)],
        );
        assert_eq!(result.status, SuiteStatus::Passed);
        assert_eq!(result.total, 1);
    }

    #[test]
    fn test_run_summary_buckets() {
        let records = vec![
            record("a", Category::Other, RecordStatus::Passed),
            record("b", Category::Other, RecordStatus::Failed),
            record("c", Category::Other, RecordStatus::Warned),
            record("d", Category::Other, RecordStatus::Errored),
            record("e", Category::Other, RecordStatus::Skipped),
        ];
        let summary = RunSummary::tally(&records);
        assert_eq!(summary.passed, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.warned, 1);
        assert_eq!(summary.errored, 2);
        assert_eq!(summary.total, 5);
    }

    #[test]
    fn test_run_result_records_covers_both_shapes() {
        let run = RunResult {
            runner: "mixed".to_string(),
            generated_at: Utc::now(),
            tests: vec![record("t1", Category::Other, RecordStatus::Passed)],
            suites: vec![SuiteResult::from_records(
                "s",
                vec![
                    record("e1", Category::Schema, RecordStatus::Passed),
                    record("e2", Category::Schema, RecordStatus::Failed),
                ],
            )],
            summary: RunSummary::default(),
        };

        let names: Vec<&str> = run.records().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["t1", "e1", "e2"]);
    }

    #[test]
    fn test_rollup_totals_and_rates() {
        let mut rollup = CategoryRollup::new();
        rollup.observe(&Category::Uniqueness, true);
        rollup.observe(&Category::Uniqueness, false);
        rollup.observe(&Category::Schema, true);

        assert_eq!(rollup.totals(), (2, 1));
        let uniq = rollup.get("Uniqueness").unwrap();
        assert_eq!(uniq.total(), 2);
        assert_eq!(uniq.pass_rate(), 50.0);
        assert_eq!(rollup.get("Schema").unwrap().pass_rate(), 100.0);
    }

    #[test]
    fn test_run_id_format() {
        let at = DateTime::parse_from_rfc3339("2026-02-03T04:05:06Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(RunId::from_datetime(&at).as_str(), "20260203_040506");
    }

    #[test]
    fn test_status_serialization() {
        assert_eq!(
            serde_json::to_string(&RecordStatus::Errored).unwrap(),
            "\"errored\""
        );
        assert_eq!(
            serde_json::to_string(&RunStatus::Passed).unwrap(),
            "\"PASSED\""
        );
    }

    #[test]
    fn test_rollup_json_is_keyed_by_category_name() {
        let mut rollup = CategoryRollup::new();
        rollup.observe(&Category::ReferentialIntegrity, true);

        let json = serde_json::to_value(&rollup).unwrap();
        assert!(json.get("Referential Integrity").is_some());

        let back: CategoryRollup = serde_json::from_value(json).unwrap();
        assert_eq!(back, rollup);
    }
}
