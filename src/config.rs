//! Configuration for compatibility runs
//!
//! Supports loading configuration from:
//! - Default values
//! - Config file (ocsf-compat.toml, .ocsf-compat.toml or the user config dir)
//! - An explicit file passed with `--config`
//! - Environment variables (OCSF_COMPAT__*)
//!
//! ## Example config file (ocsf-compat.toml):
//! ```toml
//! before = "1.0.0"
//! after = "./schema.json"
//! cache = "./schema_cache"
//!
//! [severity]
//! RemovedEnumMember = "info"
//! ChangedType = "warning"
//! ```

use config_crate::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::compatibility::CompatibilityFinding;
use crate::error::{OcsfError, Result};
use crate::schema::source::default_cache_dir;
use crate::validation::{Severity, SeverityMap};

const CONFIG_FILE: &str = "ocsf-compat.toml";

/// Settings for one compatibility run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompatConfig {
    /// Schema file or version before the change
    #[serde(default = "default_before")]
    pub before: String,

    /// Schema file or version after the change
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,

    /// Directory of cached schema exports
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache: Option<PathBuf>,

    /// Finding name to severity overrides
    #[serde(default)]
    pub severity: HashMap<String, String>,
}

fn default_before() -> String {
    "1.0.0".to_string()
}

impl Default for CompatConfig {
    fn default() -> Self {
        Self {
            before: default_before(),
            after: None,
            cache: None,
            severity: HashMap::new(),
        }
    }
}

impl CompatConfig {
    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration, adding a required file on top of the defaults
    pub fn load_from(config_path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();

        for location in [CONFIG_FILE, ".ocsf-compat.toml"] {
            builder = builder.add_source(File::with_name(location).required(false));
        }

        if let Some(dirs) = directories::ProjectDirs::from("io", "ocsf", "ocsf-tools") {
            let xdg_config = dirs.config_dir().join(CONFIG_FILE);
            if xdg_config.exists() {
                builder = builder.add_source(File::from(xdg_config).required(false));
            }
        }

        if let Some(path) = config_path {
            tracing::debug!(path = %path.display(), "Loading configuration file");
            builder = builder.add_source(File::from(path).required(true));
        }

        builder = builder.add_source(Environment::with_prefix("OCSF_COMPAT").separator("__"));

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Save configuration to a file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// The `after` schema, which has no default
    pub fn after(&self) -> Result<&str> {
        self.after.as_deref().ok_or(OcsfError::MissingSchema("after"))
    }

    /// The configured cache directory, or the platform default
    pub fn cache_dir(&self) -> PathBuf {
        self.cache.clone().unwrap_or_else(default_cache_dir)
    }

    /// Assign a severity to findings by name; later calls win
    pub fn set_severity<'a>(
        &mut self,
        names: impl IntoIterator<Item = &'a String>,
        severity: Severity,
    ) {
        for name in names {
            self.severity.insert(name.clone(), severity.to_string());
        }
    }

    /// Validate severity overrides against the known compatibility findings
    pub fn severities(&self) -> Result<SeverityMap> {
        SeverityMap::from_names::<CompatibilityFinding>(&self.severity)
    }
}
