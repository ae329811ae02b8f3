//! Parser for suite definition files (YAML/TOML formats).
//!
//! Suite definitions are developer-authored configuration describing which
//! checks to run against which tables. This crate parses them into the
//! strongly-typed [`SuiteSpec`] model; the engine crate turns specs into
//! executable expectations.
//!
//! # Example
//!
//! ```rust
//! use expectations_parser::parse_yaml;
//!
//! let yaml = r#"
//! name: "Staging: securities"
//! subject_query: SELECT * FROM stg_securities
//! checks:
//!   - type: column_not_null
//!     table: stg_securities
//!     column: security_id
//!   - type: column_unique
//!     table: stg_securities
//!     column: security_id
//! "#;
//!
//! let spec = parse_yaml(yaml).expect("Failed to parse suite spec");
//! assert_eq!(spec.name, "Staging: securities");
//! assert_eq!(spec.checks.len(), 2);
//! ```

use expectations_core::SuiteSpec;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during suite definition parsing.
#[derive(Debug, Error)]
pub enum ParserError {
    /// YAML parsing or deserialization failed
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml_ng::Error),

    /// TOML parsing or deserialization failed
    #[error("Failed to parse TOML: {0}")]
    TomlError(String),

    /// File I/O error
    #[error("File I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Unsupported file format
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// Invalid file extension
    #[error("Invalid or missing file extension")]
    InvalidExtension,
}

/// Result type alias for parser operations.
pub type Result<T> = std::result::Result<T, ParserError>;

/// Supported suite definition file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuiteFormat {
    /// YAML format (.yml, .yaml)
    Yaml,
    /// TOML format (.toml)
    Toml,
}

/// Parse a suite spec from a YAML string.
pub fn parse_yaml(content: &str) -> Result<SuiteSpec> {
    let spec: SuiteSpec = serde_yaml_ng::from_str(content)?;
    Ok(spec)
}

/// Parse a suite spec from a TOML string.
pub fn parse_toml(content: &str) -> Result<SuiteSpec> {
    let spec: SuiteSpec =
        toml::from_str(content).map_err(|e| ParserError::TomlError(e.to_string()))?;
    Ok(spec)
}

/// Detect the suite definition format from a file path's extension.
///
/// # Supported Extensions
///
/// * `.yaml`, `.yml` → [`SuiteFormat::Yaml`]
/// * `.toml` → [`SuiteFormat::Toml`]
pub fn detect_format(path: &Path) -> Result<SuiteFormat> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .ok_or(ParserError::InvalidExtension)?;

    match extension.to_lowercase().as_str() {
        "yaml" | "yml" => Ok(SuiteFormat::Yaml),
        "toml" => Ok(SuiteFormat::Toml),
        other => Err(ParserError::UnsupportedFormat(other.to_string())),
    }
}

/// Parse a suite spec from a file with automatic format detection.
pub fn parse_file(path: &Path) -> Result<SuiteSpec> {
    let content = std::fs::read_to_string(path)?;
    let format = detect_format(path)?;

    match format {
        SuiteFormat::Yaml => parse_yaml(&content),
        SuiteFormat::Toml => parse_toml(&content),
    }
}

/// Load every suite definition in a directory, in file-name order.
///
/// File-name order is the declared suite execution order. Files with
/// unsupported extensions are skipped; parse failures are not.
pub fn load_dir(dir: &Path) -> Result<Vec<SuiteSpec>> {
    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)?
        .collect::<std::io::Result<Vec<_>>>()?
        .into_iter()
        .map(|entry| entry.path())
        .filter(|path| detect_format(path).is_ok())
        .collect();
    paths.sort();

    paths.iter().map(|path| parse_file(path)).collect()
}
