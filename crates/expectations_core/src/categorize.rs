//! Category taxonomy and name-based categorization.
//!
//! Externally-sourced test records (e.g. dbt test results) carry no category
//! of their own; [`categorize`] derives one from the test name via ordered
//! substring matching. The rule table is data, not nested conditionals, so
//! the priority order stays auditable: a name containing both "unique" and
//! "not_null" resolves to Uniqueness because that rule comes first.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Taxonomy label used to roll up results for reporting.
///
/// The taxonomy is open: unknown labels read from persisted results or suite
/// files round-trip through [`Category::Custom`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    /// Column presence and type structure
    Schema,
    /// Non-null coverage
    Completeness,
    /// Duplicate detection
    Uniqueness,
    /// Accepted-values membership
    Validity,
    /// Row-count bounds
    Volume,
    /// Value shape rules (lengths, patterns)
    Format,
    /// Canonicalization rules (casing, naming)
    Standardization,
    /// Cross-layer count or key-set agreement
    Reconciliation,
    /// Foreign-key style relationships
    ReferentialIntegrity,
    /// Domain-specific rules
    BusinessRule,
    /// Synthetic records about the test tooling itself
    Execution,
    /// Fallback when no rule matches
    Other,
    /// Any label outside the built-in taxonomy
    Custom(String),
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Category::Schema => "Schema",
            Category::Completeness => "Completeness",
            Category::Uniqueness => "Uniqueness",
            Category::Validity => "Validity",
            Category::Volume => "Volume",
            Category::Format => "Format",
            Category::Standardization => "Standardization",
            Category::Reconciliation => "Reconciliation",
            Category::ReferentialIntegrity => "Referential Integrity",
            Category::BusinessRule => "Business Rule",
            Category::Execution => "Execution",
            Category::Other => "Other",
            Category::Custom(s) => s,
        };
        f.write_str(label)
    }
}

impl From<String> for Category {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Schema" => Category::Schema,
            "Completeness" => Category::Completeness,
            "Uniqueness" => Category::Uniqueness,
            "Validity" => Category::Validity,
            "Volume" => Category::Volume,
            "Format" => Category::Format,
            "Standardization" => Category::Standardization,
            "Reconciliation" => Category::Reconciliation,
            "Referential Integrity" => Category::ReferentialIntegrity,
            "Business Rule" => Category::BusinessRule,
            "Execution" => Category::Execution,
            "Other" => Category::Other,
            _ => Category::Custom(s),
        }
    }
}

impl From<Category> for String {
    fn from(c: Category) -> Self {
        c.to_string()
    }
}

/// Ordered (pattern, category) rules evaluated top to bottom.
///
/// First match wins; matching is case-insensitive substring containment.
pub const CATEGORY_RULES: &[(&str, Category)] = &[
    ("unique", Category::Uniqueness),
    ("not_null", Category::Completeness),
    ("accepted_values", Category::Validity),
    ("equal_rowcount", Category::Reconciliation),
    ("reconciliation", Category::Reconciliation),
    ("relationship", Category::ReferentialIntegrity),
    ("expression", Category::BusinessRule),
];

/// Derives a category from an externally-sourced test name.
///
/// Deterministic and order-stable: the same name always yields the same
/// category, and a name matching several rules yields the first rule's.
pub fn categorize(test_name: &str) -> Category {
    let name = test_name.to_lowercase();
    for (pattern, category) in CATEGORY_RULES {
        if name.contains(pattern) {
            return category.clone();
        }
    }
    Category::Other
}
