use std::path::Path;

use lm_order::SentinelCosts;
use serde::{Deserialize, Serialize};

use crate::error::{MergeError, MergeResult};

/// Configuration for the merge engine.
///
/// Every field has a default, so a TOML file only needs the keys it
/// overrides:
///
/// ```toml
/// require_same_part = true
///
/// [costs]
/// boundary = 1.0
/// forbidden = 1e9
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeConfig {
    /// Reject candidate sets whose lines come from different parts.
    pub require_same_part: bool,
    /// Sentinel costs for the ordering matrix.
    pub costs: SentinelCosts,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            require_same_part: true,
            costs: SentinelCosts::default(),
        }
    }
}

impl MergeConfig {
    /// Parse and validate a TOML configuration.
    pub fn from_toml_str(s: &str) -> MergeResult<Self> {
        let config: Self = toml::from_str(s).map_err(|e| MergeError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse, and validate a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> MergeResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| MergeError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    pub fn to_toml_string(&self) -> MergeResult<String> {
        toml::to_string(self).map_err(|e| MergeError::Config(e.to_string()))
    }

    pub fn validate(&self) -> MergeResult<()> {
        self.costs
            .validate()
            .map_err(|e| MergeError::Config(e.to_string()))
    }
}
