//! Suites and their declarative definition model.
//!
//! A [`Suite`] is an ordered sequence of expectations sharing a logical
//! subject — one table, or one cross-table reconciliation concern. Order is
//! preserved and is also execution order. Expectation names should be unique
//! within a suite for unambiguous reporting; duplicates are legal but produce
//! duplicate rows in the output.
//!
//! [`SuiteSpec`] is the serde model that suite definition files (YAML/TOML)
//! deserialize into; the engine turns each [`CheckSpec`] into a real
//! expectation via its factory library.

use crate::Expectation;
use serde::{Deserialize, Serialize};

use crate::Category;

/// An ordered group of expectations over one subject.
#[derive(Debug)]
pub struct Suite {
    name: String,
    subject_query: Option<String>,
    expectations: Vec<Expectation>,
}

impl Suite {
    /// Creates a suite over a single subject query.
    pub fn new(name: impl Into<String>, subject_query: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            subject_query: Some(subject_query.into()),
            expectations: Vec::new(),
        }
    }

    /// Creates a suite without a subject query, for reconciliation suites
    /// that touch multiple tables internally.
    pub fn cross_table(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            subject_query: None,
            expectations: Vec::new(),
        }
    }

    /// Appends an expectation; declaration order is execution order.
    pub fn expect(mut self, expectation: Expectation) -> Self {
        self.expectations.push(expectation);
        self
    }

    /// Returns the suite name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the optional subject query.
    pub fn subject_query(&self) -> Option<&str> {
        self.subject_query.as_deref()
    }

    /// Returns the expectations in declaration order.
    pub fn expectations(&self) -> &[Expectation] {
        &self.expectations
    }

    /// Returns the number of expectations.
    pub fn len(&self) -> usize {
        self.expectations.len()
    }

    /// Returns true if the suite holds no expectations.
    pub fn is_empty(&self) -> bool {
        self.expectations.is_empty()
    }
}

/// Declarative form of a single check inside a suite definition file.
///
/// The tag names mirror the factory names of the expectation library.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CheckSpec {
    /// Column must be present in the table's described schema
    ColumnExists { table: String, column: String },
    /// Column must contain no NULL rows
    ColumnNotNull { table: String, column: String },
    /// Column values must be distinct
    ColumnUnique { table: String, column: String },
    /// Every distinct non-null value must be in the allowed set
    ValuesInSet {
        table: String,
        column: String,
        values: Vec<String>,
    },
    /// Row count must fall within an inclusive range
    RowCountBetween { table: String, min: u64, max: u64 },
    /// Two tables must have equal row counts
    RowCountEqual { left: String, right: String },
    /// Column's reported type must contain the expected substring
    ColumnType {
        table: String,
        column: String,
        expected: String,
    },
    /// No row's column value may contain any forbidden substring
    NoValueLeakage {
        table: String,
        column: String,
        patterns: Vec<String>,
    },
    /// Arbitrary read query returning a single integer; zero passes
    Custom { query: String, description: String },
}

/// One check entry in a suite definition file: a [`CheckSpec`] plus
/// optional name and category overrides.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckDef {
    /// Overrides the factory's default name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Overrides the factory's default category
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    /// The check itself
    #[serde(flatten)]
    pub spec: CheckSpec,
}

/// Declarative form of a whole suite.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SuiteSpec {
    /// Suite name, copied into the suite result
    pub name: String,
    /// Optional subject query; absent for cross-table suites
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject_query: Option<String>,
    /// Checks in declaration order
    pub checks: Vec<CheckDef>,
}
