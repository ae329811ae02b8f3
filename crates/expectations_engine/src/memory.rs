//! Scripted in-memory data source.
//!
//! [`MemorySource`] maps table names to schemas and exact query strings to
//! canned responses. Anything not scripted surfaces as a [`SourceError`],
//! which makes it equally useful for exercising the error-isolation path.

use expectations_core::{Column, DataSource, Row, SourceError, SourceResult};
use std::collections::HashMap;

/// An in-memory [`DataSource`] with canned schemas and query responses.
#[derive(Debug, Default)]
pub struct MemorySource {
    schemas: HashMap<String, Vec<Column>>,
    responses: HashMap<String, Vec<Row>>,
    failures: HashMap<String, String>,
}

impl MemorySource {
    /// Creates an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a table schema for `describe`.
    pub fn with_table(mut self, table: &str, columns: &[(&str, &str)]) -> Self {
        self.schemas.insert(
            table.to_lowercase(),
            columns
                .iter()
                .map(|(name, data_type)| Column::new(*name, *data_type))
                .collect(),
        );
        self
    }

    /// Registers a canned response for an exact query string.
    pub fn with_response(mut self, query: &str, rows: Vec<Row>) -> Self {
        self.responses.insert(query.to_string(), rows);
        self
    }

    /// Scripts an infrastructure failure for an exact query string.
    pub fn with_failure(mut self, query: &str, message: &str) -> Self {
        self.failures.insert(query.to_string(), message.to_string());
        self
    }
}

impl DataSource for MemorySource {
    fn describe(&self, table: &str) -> SourceResult<Vec<Column>> {
        self.schemas
            .get(&table.to_lowercase())
            .cloned()
            .ok_or_else(|| SourceError::TableNotFound(table.to_string()))
    }

    fn execute(&self, query: &str) -> SourceResult<Vec<Row>> {
        if let Some(message) = self.failures.get(query) {
            return Err(SourceError::Connection(message.clone()));
        }
        self.responses
            .get(query)
            .cloned()
            .ok_or_else(|| SourceError::query(format!("no scripted response for: {query}")))
    }
}
