//! Expectation model.
//!
//! An expectation is a first-class value holding its captured configuration:
//! a name, a category, a parameter map for reporting, and a boxed check
//! closure. The runner treats every expectation identically through the
//! single `check` capability; adding a new kind of check means adding a new
//! factory, not changing the runner.

use crate::{Category, DataSource, SourceError};
use std::collections::BTreeMap;
use std::fmt;

/// The outcome of one expectation invocation.
///
/// `observed` is always populated, even on success; `details` carries
/// optional free-text rationale. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
    /// Whether the check succeeded
    pub success: bool,
    /// Human-readable description of what was measured
    pub observed: String,
    /// Optional free-text rationale
    pub details: String,
}

impl CheckOutcome {
    /// Creates an outcome from a success flag and an observed message.
    pub fn new(success: bool, observed: impl Into<String>) -> Self {
        Self {
            success,
            observed: observed.into(),
            details: String::new(),
        }
    }

    /// Creates a successful outcome.
    pub fn pass(observed: impl Into<String>) -> Self {
        Self::new(true, observed)
    }

    /// Creates a failed outcome.
    pub fn fail(observed: impl Into<String>) -> Self {
        Self::new(false, observed)
    }

    /// Attaches detail text to this outcome.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = details.into();
        self
    }
}

/// Boxed check capability: pure with respect to the data source, raising
/// only for infrastructure errors.
pub type CheckFn = Box<dyn Fn(&dyn DataSource) -> Result<CheckOutcome, SourceError> + Send + Sync>;

/// A named, categorized, side-effect-free data quality check.
///
/// Immutable once constructed. Factories in the expectation library close
/// over static arguments (table, column, allowed values) and record them in
/// the parameter map for reporting.
pub struct Expectation {
    name: String,
    category: Category,
    params: BTreeMap<String, String>,
    check: CheckFn,
}

impl Expectation {
    /// Creates a new expectation from a name, a category, and a check.
    pub fn new(
        name: impl Into<String>,
        category: Category,
        check: impl Fn(&dyn DataSource) -> Result<CheckOutcome, SourceError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            category,
            params: BTreeMap::new(),
            check: Box::new(check),
        }
    }

    /// Replaces the human-readable name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Replaces the category.
    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    /// Records a static parameter for reporting.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Returns the expectation name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the category.
    pub fn category(&self) -> &Category {
        &self.category
    }

    /// Returns the recorded static parameters (may be empty).
    pub fn params(&self) -> &BTreeMap<String, String> {
        &self.params
    }

    /// Runs the check against a data source.
    ///
    /// Returns `Ok` with the outcome for both passing and failing checks;
    /// `Err` only for infrastructure failures.
    pub fn check(&self, source: &dyn DataSource) -> Result<CheckOutcome, SourceError> {
        (self.check)(source)
    }
}

impl fmt::Debug for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Expectation")
            .field("name", &self.name)
            .field("category", &self.category)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}
