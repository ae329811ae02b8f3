//! # Expectations Core
//!
//! Core data model for the data quality expectation engine.
//!
//! This crate provides the building blocks for declaring data quality checks
//! and collecting their results. An *expectation* is a named, categorized,
//! side-effect-free check against a queryable tabular source; expectations are
//! grouped into *suites* sharing a logical subject, and suite executions
//! produce a uniform record model that downstream reporting consumes without
//! re-deriving any aggregate.
//!
//! ## Key Concepts
//!
//! - **Expectation**: a single check with a name, a category, recorded
//!   parameters, and a `check` capability producing a [`CheckOutcome`]
//! - **Suite**: an ordered group of expectations over one subject
//! - **DataSource**: the read-only tabular store abstraction every check
//!   runs against
//! - **RunResult / Aggregate**: per-source results and the cross-source
//!   rollup handed to the reporting layer
//!
//! ## Example
//!
//! ```rust
//! use expectations_core::{Category, CheckOutcome, Expectation};
//!
//! let exp = Expectation::new(
//!     "order_id is unique",
//!     Category::Uniqueness,
//!     |_source| Ok(CheckOutcome::pass("0 duplicate values found")),
//! );
//!
//! assert_eq!(exp.name(), "order_id is unique");
//! assert_eq!(exp.category(), &Category::Uniqueness);
//! ```

pub mod categorize;
pub mod error;
pub mod expectation;
pub mod results;
pub mod source;
pub mod suite;

pub use categorize::*;
pub use error::*;
pub use expectation::*;
pub use results::*;
pub use source::*;
pub use suite::*;
