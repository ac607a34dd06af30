//! Schema retrieval
//!
//! A schema argument is either a path to a schema export on disk or a
//! semantic version that resolves to a previously cached export.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use semver::Version;
use tracing::{debug, info};

use super::{json, OcsfSchema};
use crate::error::{OcsfError, Result};

/// Anything that can produce a schema from a version string or file path
pub trait SchemaSource {
    fn load(&self, version_or_file: &str) -> Result<OcsfSchema>;
}

/// Loads schemas from files or from a local version cache
#[derive(Debug, Clone)]
pub struct LocalSchemaSource {
    cache_dir: PathBuf,
}

impl LocalSchemaSource {
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
        }
    }

    /// Source backed by the platform cache directory
    pub fn with_default_cache() -> Self {
        Self::new(default_cache_dir())
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Cache location for a version, whether or not it exists
    pub fn cached_path(&self, version: &Version) -> PathBuf {
        self.cache_dir.join(format!("schema-{}.json", version))
    }
}

impl SchemaSource for LocalSchemaSource {
    fn load(&self, version_or_file: &str) -> Result<OcsfSchema> {
        let as_path = Path::new(version_or_file);
        if as_path.is_file() {
            info!(path = %as_path.display(), "Loading schema from file");
            return json::from_file(as_path);
        }

        let version =
            Version::parse(version_or_file).map_err(|source| OcsfError::InvalidVersion {
                version: version_or_file.to_string(),
                source,
            })?;

        let path = self.cached_path(&version);
        debug!(path = %path.display(), "Looking up cached schema");
        if !path.is_file() {
            return Err(OcsfError::SchemaNotCached {
                version: version.to_string(),
                cache: self.cache_dir.display().to_string(),
            });
        }

        info!(version = %version, "Loading cached schema");
        json::from_file(&path)
    }
}

/// Platform cache directory for schema exports, falling back to `.ocsf-cache`
pub fn default_cache_dir() -> PathBuf {
    ProjectDirs::from("io", "ocsf", "ocsf-tools")
        .map(|dirs| dirs.cache_dir().join("schemas"))
        .unwrap_or_else(|| PathBuf::from(".ocsf-cache"))
}
