//! Error types for schema loading, comparison and validation

use thiserror::Error;

use crate::compare::RecordKind;

/// Result type for OCSF tooling operations
pub type Result<T> = std::result::Result<T, OcsfError>;

/// Errors that stop a comparison or validation run.
///
/// Findings produced by rules are never errors; these are the cases where
/// the tool could not run at all.
#[derive(Error, Debug)]
pub enum OcsfError {
    #[error("Cannot compare {old} record with {new} record")]
    KindMismatch { old: RecordKind, new: RecordKind },

    #[error("Unknown finding type in severity configuration: {name}")]
    UnknownFinding { name: String },

    #[error("Invalid severity '{value}' for {finding}: expected one of info, warning, error, fatal")]
    InvalidSeverity { finding: String, value: String },

    #[error("Missing {0} schema file or version")]
    MissingSchema(&'static str),

    #[error("Invalid version '{version}': {source}")]
    InvalidVersion {
        version: String,
        #[source]
        source: semver::Error,
    },

    #[error("Schema version {version} not found in cache {cache}")]
    SchemaNotCached { version: String, cache: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config_crate::ConfigError),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::ser::Error),
}
