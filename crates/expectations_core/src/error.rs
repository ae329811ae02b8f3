//! Error types for data source access.
//!
//! A [`SourceError`] is an infrastructure failure (lost connection, malformed
//! query, missing table), never an expected check failure. Expected failures
//! are carried as data in a `CheckOutcome`; infrastructure errors are caught
//! at the single-expectation boundary by the suite runner and converted into
//! errored records, so they never abort a suite or a run.

use thiserror::Error;

/// Result type for data source operations.
pub type SourceResult<T> = std::result::Result<T, SourceError>;

/// Infrastructure errors raised by a tabular data source.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Query execution failed (malformed SQL, missing relation, engine error)
    #[error("Query failed: {message}")]
    Query {
        /// Error text reported by the underlying engine
        message: String,
    },

    /// Table is not known to the source
    #[error("Table '{0}' not found")]
    TableNotFound(String),

    /// Connection-level failure
    #[error("Connection error: {0}")]
    Connection(String),

    /// Query succeeded but did not return the expected shape
    /// (e.g. no rows, or a non-integer first column for a count query)
    #[error("Unexpected result shape: {0}")]
    UnexpectedShape(String),
}

impl SourceError {
    /// Creates a new query error.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}
