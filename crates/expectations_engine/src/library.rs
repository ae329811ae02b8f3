//! The expectation library: composable, table/column-parametrized checks.
//!
//! Each factory closes over static configuration and returns an
//! [`Expectation`] whose check runs one or two read queries. Every check
//! reduces to "did a scalar (or small row set) match an expectation", so the
//! suite runner treats all of them identically.
//!
//! Parameters are interpolated into SQL verbatim. Expectation configuration
//! is developer-authored code, not untrusted input; no escaping is applied.

use expectations_core::{Category, CheckOutcome, DataSource, Expectation, SourceError};

/// Reads the first column of the first row of `query` as an integer.
fn fetch_scalar_i64(source: &dyn DataSource, query: &str) -> Result<i64, SourceError> {
    let rows = source.execute(query)?;
    let value = rows
        .first()
        .and_then(|row| row.first())
        .ok_or_else(|| SourceError::UnexpectedShape(format!("query returned no rows: {query}")))?;
    value.as_i64().ok_or_else(|| {
        SourceError::UnexpectedShape(format!("expected integer result, got {value:?}"))
    })
}

/// Column must be present in the table's described schema (case-insensitive).
///
/// Observed lists all columns when absent, confirms presence otherwise.
pub fn column_exists(table: &str, column: &str) -> Expectation {
    let table = table.to_string();
    let column = column.to_string();
    Expectation::new(
        format!("Column '{column}' exists"),
        Category::Schema,
        {
            let table = table.clone();
            let column = column.clone();
            move |source: &dyn DataSource| {
                let columns = source.describe(&table)?;
                let exists = columns
                    .iter()
                    .any(|c| c.name.eq_ignore_ascii_case(&column));
                if exists {
                    Ok(CheckOutcome::pass(format!("Column '{column}' exists")))
                } else {
                    let names: Vec<&str> = columns.iter().map(|c| c.name.as_str()).collect();
                    Ok(CheckOutcome::fail(format!("Columns: {names:?}")))
                }
            }
        },
    )
    .with_param("table", table)
    .with_param("column", column)
}

/// Column must contain no NULL rows.
pub fn column_not_null(table: &str, column: &str) -> Expectation {
    let query = format!("SELECT COUNT(*) FROM {table} WHERE {column} IS NULL");
    Expectation::new(
        format!("{column} is not null"),
        Category::Completeness,
        move |source: &dyn DataSource| {
            let nulls = fetch_scalar_i64(source, &query)?;
            Ok(CheckOutcome::new(
                nulls == 0,
                format!("{nulls} NULL values found"),
            ))
        },
    )
    .with_param("table", table)
    .with_param("column", column)
}

/// Column values must be distinct: `count(*) - count(distinct column) = 0`.
pub fn column_unique(table: &str, column: &str) -> Expectation {
    let query = format!("SELECT COUNT(*) - COUNT(DISTINCT {column}) FROM {table}");
    Expectation::new(
        format!("{column} is unique"),
        Category::Uniqueness,
        move |source: &dyn DataSource| {
            let dupes = fetch_scalar_i64(source, &query)?;
            Ok(CheckOutcome::new(
                dupes == 0,
                format!("{dupes} duplicate values found"),
            ))
        },
    )
    .with_param("table", table)
    .with_param("column", column)
}

/// Every distinct non-null value must be inside the allowed set.
///
/// Observed lists the offending distinct values, or confirms all valid.
pub fn values_in_set(table: &str, column: &str, values: &[String]) -> Expectation {
    let placeholders = values
        .iter()
        .map(|v| format!("'{v}'"))
        .collect::<Vec<_>>()
        .join(", ");
    let query = format!(
        "SELECT DISTINCT {column} FROM {table} \
         WHERE {column} NOT IN ({placeholders}) AND {column} IS NOT NULL"
    );
    Expectation::new(
        format!("{column} in ({})", values.join(", ")),
        Category::Validity,
        move |source: &dyn DataSource| {
            let rows = source.execute(&query)?;
            let invalid: Vec<String> = rows
                .iter()
                .filter_map(|row| row.first())
                .map(|v| v.render())
                .collect();
            if invalid.is_empty() {
                Ok(CheckOutcome::pass("All values valid"))
            } else {
                Ok(CheckOutcome::fail(format!("Invalid values: {invalid:?}")))
            }
        },
    )
    .with_param("table", table)
    .with_param("column", column)
    .with_param("values", values.join(", "))
}

/// Row count must satisfy `min <= count(*) <= max`.
pub fn row_count_between(table: &str, min: u64, max: u64) -> Expectation {
    let query = format!("SELECT COUNT(*) FROM {table}");
    Expectation::new(
        format!("Row count between {min}-{max}"),
        Category::Volume,
        move |source: &dyn DataSource| {
            let count = fetch_scalar_i64(source, &query)?;
            let success = count >= 0 && (min..=max).contains(&(count as u64));
            Ok(CheckOutcome::new(
                success,
                format!("Row count: {count} (expected {min}-{max})"),
            ))
        },
    )
    .with_param("table", table)
    .with_param("min", min.to_string())
    .with_param("max", max.to_string())
}

/// Two tables must have equal row counts. Observed reports both counts.
pub fn row_count_equal(left: &str, right: &str) -> Expectation {
    let left_query = format!("SELECT COUNT(*) FROM {left}");
    let right_query = format!("SELECT COUNT(*) FROM {right}");
    let left_name = left.to_string();
    let right_name = right.to_string();
    Expectation::new(
        format!("Row count matches: {left} = {right}"),
        Category::Reconciliation,
        move |source: &dyn DataSource| {
            let left_count = fetch_scalar_i64(source, &left_query)?;
            let right_count = fetch_scalar_i64(source, &right_query)?;
            Ok(CheckOutcome::new(
                left_count == right_count,
                format!("{left_name}: {left_count} rows, {right_name}: {right_count} rows"),
            ))
        },
    )
    .with_param("left", left)
    .with_param("right", right)
}

/// Column must exist and its reported type string must contain the expected
/// substring (case-insensitive).
pub fn column_type(table: &str, column: &str, expected: &str) -> Expectation {
    let table = table.to_string();
    let column = column.to_string();
    let expected = expected.to_string();
    Expectation::new(
        format!("{column} has type {expected}"),
        Category::Schema,
        {
            let table = table.clone();
            let column = column.clone();
            let expected = expected.clone();
            move |source: &dyn DataSource| {
                let columns = source.describe(&table)?;
                let found = columns
                    .iter()
                    .find(|c| c.name.eq_ignore_ascii_case(&column));
                match found {
                    None => Ok(CheckOutcome::fail(format!("Column '{column}' not found"))),
                    Some(col) => {
                        let matches = col
                            .data_type
                            .to_lowercase()
                            .contains(&expected.to_lowercase());
                        Ok(CheckOutcome::new(
                            matches,
                            format!("Type: {} (expected: {expected})", col.data_type),
                        ))
                    }
                }
            }
        },
    )
    .with_param("table", table)
    .with_param("column", column)
    .with_param("expected", expected)
}

/// Zero rows may contain any of the forbidden substrings (logical OR).
///
/// Used to verify source-system naming conventions do not leak into
/// externally-facing output values.
pub fn no_value_leakage(table: &str, column: &str, patterns: &[String]) -> Expectation {
    let conditions = patterns
        .iter()
        .map(|p| format!("{column} LIKE '%{p}%'"))
        .collect::<Vec<_>>()
        .join(" OR ");
    let query = format!("SELECT COUNT(*) FROM {table} WHERE {conditions}");
    let patterns = patterns.to_vec();
    Expectation::new(
        format!("No forbidden patterns in {column}"),
        Category::BusinessRule,
        move |source: &dyn DataSource| {
            let violations = fetch_scalar_i64(source, &query)?;
            Ok(CheckOutcome::new(
                violations == 0,
                format!("{violations} rows contain forbidden patterns {patterns:?}"),
            ))
        },
    )
    .with_param("table", table)
    .with_param("column", column)
}

/// Arbitrary read query returning a single integer; zero passes.
///
/// The description is carried into the record's details.
pub fn custom_check(query: &str, description: &str) -> Expectation {
    let query = query.to_string();
    let description = description.to_string();
    Expectation::new(description.clone(), Category::BusinessRule, {
        let query = query.clone();
        let description = description.clone();
        move |source: &dyn DataSource| {
            let violations = fetch_scalar_i64(source, &query)?;
            Ok(
                CheckOutcome::new(violations == 0, format!("{violations} violations found"))
                    .with_details(description.clone()),
            )
        }
    })
    .with_param("query", query)
}
