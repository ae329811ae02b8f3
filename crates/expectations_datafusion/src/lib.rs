//! DataFusion-backed implementation of the engine's data source boundary.
//!
//! Registers CSV/Parquet files as named tables in an embedded DataFusion
//! session and exposes them through the synchronous
//! [`DataSource`](expectations_core::DataSource) trait. The adapter owns a
//! current-thread tokio runtime internally; callers stay synchronous and
//! must not already be inside a tokio runtime.
//!
//! ## Example
//!
//! ```rust,no_run
//! use expectations_datafusion::{DataFusionSource, SourceConfig};
//! use expectations_core::DataSource;
//!
//! let config = SourceConfig::new()
//!     .with_csv("securities", "data/securities.csv");
//! let source = DataFusionSource::connect(&config).unwrap();
//!
//! let columns = source.describe("securities").unwrap();
//! let rows = source.execute("SELECT COUNT(*) FROM securities").unwrap();
//! # let _ = (columns, rows);
//! ```

pub mod config;
pub mod source;

pub use config::*;
pub use source::*;
