//! Tabular data source abstraction.
//!
//! Every expectation runs against a [`DataSource`]: a synchronous, read-only
//! session that can describe a table's schema and execute one textual query
//! at a time. Concrete implementations live in adapter crates; tests use a
//! scripted in-memory source.

use crate::SourceResult;

/// A column as reported by [`DataSource::describe`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Column name
    pub name: String,
    /// Engine-reported type string (e.g. "Int64", "VARCHAR")
    pub data_type: String,
}

impl Column {
    /// Creates a new column descriptor.
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
        }
    }
}

/// A single scalar value in a query result.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Null/missing value
    Null,
    /// Integer value
    Int(i64),
    /// Floating point value
    Float(f64),
    /// Text value
    Text(String),
    /// Boolean value
    Bool(bool),
}

impl Value {
    /// Returns true if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Attempts to read this value as an integer.
    ///
    /// Floats with no fractional part are accepted; some engines report
    /// aggregate results as floating point.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            Value::Float(f) if f.fract() == 0.0 => Some(*f as i64),
            _ => None,
        }
    }

    /// Renders this value for an observed-message listing.
    pub fn render(&self) -> String {
        match self {
            Value::Null => "NULL".to_string(),
            Value::Int(i) => i.to_string(),
            Value::Float(f) => f.to_string(),
            Value::Text(s) => s.clone(),
            Value::Bool(b) => b.to_string(),
        }
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

/// A positional row of a query result. The first column of an aggregate
/// query is the value of interest.
pub type Row = Vec<Value>;

/// A synchronous, read-only tabular store.
///
/// Exactly one query is in flight at a time; implementations may assume a
/// single-connection session. Queries are plain textual SQL assembled from
/// developer-authored expectation configuration — callers must not pass
/// untrusted input into table, column, or value-set parameters.
pub trait DataSource {
    /// Returns the ordered column list of `table`.
    fn describe(&self, table: &str) -> SourceResult<Vec<Column>>;

    /// Executes a read query and returns its rows.
    fn execute(&self, query: &str) -> SourceResult<Vec<Row>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_as_i64() {
        assert_eq!(Value::Int(3).as_i64(), Some(3));
        assert_eq!(Value::Float(3.0).as_i64(), Some(3));
        assert_eq!(Value::Float(3.5).as_i64(), None);
        assert_eq!(Value::Text("3".into()).as_i64(), None);
        assert_eq!(Value::Null.as_i64(), None);
    }

    #[test]
    fn test_value_render() {
        assert_eq!(Value::Null.render(), "NULL");
        assert_eq!(Value::Int(42).render(), "42");
        assert_eq!(Value::Text("X".into()).render(), "X");
        assert_eq!(Value::Bool(true).render(), "true");
    }
}
