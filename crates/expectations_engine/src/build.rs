//! Builds executable suites from their declarative definitions.

use crate::library;
use expectations_core::{CheckDef, CheckSpec, Expectation, Suite, SuiteSpec};

/// Turns a parsed suite definition into an executable [`Suite`].
pub fn suite_from_spec(spec: &SuiteSpec) -> Suite {
    let mut suite = match &spec.subject_query {
        Some(query) => Suite::new(&spec.name, query),
        None => Suite::cross_table(&spec.name),
    };
    for def in &spec.checks {
        suite = suite.expect(expectation_from(def));
    }
    suite
}

/// Turns one check definition into an expectation, applying the optional
/// name and category overrides on top of the factory defaults.
pub fn expectation_from(def: &CheckDef) -> Expectation {
    let mut expectation = match &def.spec {
        CheckSpec::ColumnExists { table, column } => library::column_exists(table, column),
        CheckSpec::ColumnNotNull { table, column } => library::column_not_null(table, column),
        CheckSpec::ColumnUnique { table, column } => library::column_unique(table, column),
        CheckSpec::ValuesInSet {
            table,
            column,
            values,
        } => library::values_in_set(table, column, values),
        CheckSpec::RowCountBetween { table, min, max } => {
            library::row_count_between(table, *min, *max)
        }
        CheckSpec::RowCountEqual { left, right } => library::row_count_equal(left, right),
        CheckSpec::ColumnType {
            table,
            column,
            expected,
        } => library::column_type(table, column, expected),
        CheckSpec::NoValueLeakage {
            table,
            column,
            patterns,
        } => library::no_value_leakage(table, column, patterns),
        CheckSpec::Custom { query, description } => library::custom_check(query, description),
    };
    if let Some(name) = &def.name {
        expectation = expectation.with_name(name);
    }
    if let Some(category) = &def.category {
        expectation = expectation.with_category(category.clone());
    }
    expectation
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemorySource;
    use crate::runner::SuiteRunner;
    use expectations_core::{Category, RecordStatus, Value};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_build_applies_overrides() {
        let def = CheckDef {
            name: Some("STATUS values are published".to_string()),
            category: Some(Category::Standardization),
            spec: CheckSpec::ColumnUnique {
                table: "t".to_string(),
                column: "id".to_string(),
            },
        };

        let expectation = expectation_from(&def);
        assert_eq!(expectation.name(), "STATUS values are published");
        assert_eq!(expectation.category(), &Category::Standardization);
    }

    #[test]
    fn test_build_keeps_factory_defaults() {
        let def = CheckDef {
            name: None,
            category: None,
            spec: CheckSpec::ColumnNotNull {
                table: "t".to_string(),
                column: "id".to_string(),
            },
        };

        let expectation = expectation_from(&def);
        assert_eq!(expectation.name(), "id is not null");
        assert_eq!(expectation.category(), &Category::Completeness);
    }

    #[test]
    fn test_built_suite_runs_end_to_end() {
        let spec = SuiteSpec {
            name: "volume".to_string(),
            subject_query: None,
            checks: vec![CheckDef {
                name: None,
                category: None,
                spec: CheckSpec::RowCountBetween {
                    table: "orders".to_string(),
                    min: 1,
                    max: 100,
                },
            }],
        };
        let source = MemorySource::new()
            .with_response("SELECT COUNT(*) FROM orders", vec![vec![Value::Int(50)]]);

        let suite = suite_from_spec(&spec);
        let result = SuiteRunner::new().run(&suite, &source);

        assert_eq!(result.name, "volume");
        assert_eq!(result.records[0].status, RecordStatus::Passed);
        assert_eq!(result.records[0].observed, "Row count: 50 (expected 1-100)");
    }
}
