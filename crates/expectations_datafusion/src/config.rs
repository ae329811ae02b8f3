//! Table registration configuration for the DataFusion source.

use std::path::{Path, PathBuf};

/// File format of a registered table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    /// CSV with a header row
    Csv,
    /// Apache Parquet
    Parquet,
}

/// One file registered under a table name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRegistration {
    /// Name the table is queryable under
    pub name: String,
    /// Path of the backing file
    pub path: PathBuf,
    /// File format
    pub format: TableFormat,
}

/// Declares which files become which tables in a session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceConfig {
    tables: Vec<TableRegistration>,
}

impl SourceConfig {
    /// Creates an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a CSV file (with header row) under `name`.
    pub fn with_csv(mut self, name: impl Into<String>, path: impl AsRef<Path>) -> Self {
        self.tables.push(TableRegistration {
            name: name.into(),
            path: path.as_ref().to_path_buf(),
            format: TableFormat::Csv,
        });
        self
    }

    /// Registers a Parquet file under `name`.
    pub fn with_parquet(mut self, name: impl Into<String>, path: impl AsRef<Path>) -> Self {
        self.tables.push(TableRegistration {
            name: name.into(),
            path: path.as_ref().to_path_buf(),
            format: TableFormat::Parquet,
        });
        self
    }

    /// Returns the registrations in declaration order.
    pub fn tables(&self) -> &[TableRegistration] {
        &self.tables
    }
}
