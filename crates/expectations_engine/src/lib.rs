//! # Expectations Engine
//!
//! Execution engine for data quality expectations. This crate provides:
//!
//! - The expectation library: factory functions for the reusable checks
//!   (column existence, non-null, uniqueness, value-set membership,
//!   row-count bounds and equality, type match, leakage, custom counts)
//! - The suite runner, which executes suites against a data source and
//!   isolates every expectation's failure from the others
//! - The run aggregator, which folds heterogeneous run results into unified
//!   totals and a category rollup
//! - dbt `run_results.json` ingestion for externally-sourced test records
//! - A scripted in-memory data source for tests and examples
//!
//! ## Example
//!
//! ```rust
//! use expectations_engine::{library, MemorySource, SuiteRunner};
//! use expectations_core::{Suite, Value};
//!
//! let source = MemorySource::new().with_response(
//!     "SELECT COUNT(*) - COUNT(DISTINCT id) FROM orders",
//!     vec![vec![Value::Int(0)]],
//! );
//!
//! let suite = Suite::new("orders", "SELECT * FROM orders")
//!     .expect(library::column_unique("orders", "id"));
//!
//! let result = SuiteRunner::new().run(&suite, &source);
//! assert_eq!(result.passed, 1);
//! assert_eq!(result.total, 1);
//! ```

pub mod aggregate;
pub mod build;
pub mod dbt;
pub mod library;
pub mod memory;
pub mod runner;

pub use aggregate::*;
pub use build::*;
pub use memory::*;
pub use runner::*;
