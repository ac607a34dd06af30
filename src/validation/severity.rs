//! Severity levels and per-finding overrides

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use super::Finding;
use crate::error::{OcsfError, Result};

/// How serious a finding is.
///
/// Ordered from least to most severe. `Error` and `Fatal` make a pair of
/// schemas incompatible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
    Fatal,
}

impl Severity {
    pub const ALL: [Severity; 4] = [
        Severity::Info,
        Severity::Warning,
        Severity::Error,
        Severity::Fatal,
    ];

    /// Parse one of `info`, `warning`, `error` or `fatal`
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "info" => Some(Severity::Info),
            "warning" => Some(Severity::Warning),
            "error" => Some(Severity::Error),
            "fatal" => Some(Severity::Fatal),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
            Severity::Fatal => "fatal",
        }
    }

    /// Whether findings at this level break compatibility
    pub fn is_breaking(&self) -> bool {
        *self >= Severity::Error
    }
}

impl Default for Severity {
    fn default() -> Self {
        Severity::Error
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity overrides keyed by finding type name.
///
/// Findings without an override resolve to [`Severity::Error`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeverityMap {
    overrides: HashMap<&'static str, Severity>,
}

impl SeverityMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build overrides from finding names and severity strings.
    ///
    /// Names are matched against `F::NAMES` ignoring ASCII case, with an
    /// optional `Finding` suffix. Unknown names and severities other than
    /// `info`, `warning`, `error` and `fatal` are configuration errors.
    pub fn from_names<F: Finding>(names: &HashMap<String, String>) -> Result<Self> {
        let mut keys: Vec<&String> = names.keys().collect();
        keys.sort();

        let mut map = Self::new();
        for key in keys {
            let finding = canonical_name::<F>(key).ok_or_else(|| OcsfError::UnknownFinding {
                name: key.clone(),
            })?;
            let value = &names[key];
            let severity =
                Severity::from_name(value).ok_or_else(|| OcsfError::InvalidSeverity {
                    finding: key.clone(),
                    value: value.clone(),
                })?;
            map.set(finding, severity);
        }

        tracing::debug!(overrides = map.overrides.len(), "Resolved severity overrides");
        Ok(map)
    }

    /// Override the severity of one finding type
    pub fn set(&mut self, finding: &'static str, severity: Severity) {
        self.overrides.insert(finding, severity);
    }

    pub fn get(&self, finding: &str) -> Option<Severity> {
        self.overrides.get(finding).copied()
    }

    pub fn resolve<F: Finding>(&self, finding: &F) -> Severity {
        self.get(finding.name()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }
}

fn canonical_name<F: Finding>(name: &str) -> Option<&'static str> {
    let find = |candidate: &str| {
        F::NAMES
            .iter()
            .copied()
            .find(|known| known.eq_ignore_ascii_case(candidate))
    };

    find(name).or_else(|| {
        let cut = name.len().checked_sub("finding".len())?;
        let (base, suffix) = (name.get(..cut)?, name.get(cut..)?);
        if suffix.eq_ignore_ascii_case("finding") {
            find(base)
        } else {
            None
        }
    })
}
