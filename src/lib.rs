//! OCSF schema tooling
//!
//! Structural diffing and backward-compatibility validation for the Open
//! Cybersecurity Schema Framework.
//!
//! ## Features
//!
//! - **Structural Comparison**: Field-by-field difference trees for every schema record kind
//! - **Change Summaries**: Flat, dotted-path lists of what was added, removed or changed
//! - **Compatibility Rules**: Removed records, increased requirements, changed types and identifiers
//! - **Configurable Severities**: Per-finding overrides from TOML, environment or CLI flags
//!
//! ## Architecture
//!
//! ```text
//! old schema ─┐
//!             ├─ compare ──> ChangedSchema ──> rules ──> findings ──> severities ──> formatter
//! new schema ─┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use ocsf_tools::schema::from_file;
//! use ocsf_tools::compatibility::check_compatibility;
//! use ocsf_tools::validation::{SeverityMap, ValidationFormatter};
//!
//! # fn main() -> ocsf_tools::Result<()> {
//! let before = from_file("schema-1.0.0.json")?;
//! let after = from_file("schema-1.1.0.json")?;
//!
//! let results = check_compatibility(&before, &after, &SeverityMap::new());
//! print!("{}", ValidationFormatter::plain().format(&results));
//! # Ok(())
//! # }
//! ```

pub mod compare;
pub mod compatibility;
pub mod config;
pub mod error;
pub mod schema;
pub mod validation;

pub use compare::{compare_schemas, ChangedSchema, Difference};
pub use compatibility::{check_compatibility, CompatibilityFinding, ExitStatus};
pub use config::CompatConfig;
pub use error::{OcsfError, Result};
pub use schema::OcsfSchema;
pub use validation::{Severity, SeverityMap, ValidationFormatter};
