//! # Rule Configuration
//!
//! Serde-backed rule definitions so rules can live in JSON or YAML files:
//!
//! ```yaml
//! rules:
//!   - field: email
//!     message: Email addresses must be unique.
//!   - field: username
//! ```
//!
//! Building a rule from configuration applies the same construction
//! contract as [`crate::unique`]: a missing or blank `field` fails.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::RuleError;
use crate::field::FieldName;
use crate::unique::UniqueRule;

/// Error loading a rule configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("cannot read config '{path}': {source}")]
    Io {
        /// Path of the configuration file.
        path: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Invalid JSON.
    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid YAML.
    #[error("invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// One uniqueness rule as written in configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UniqueRuleConfig {
    /// Record property to compare.
    #[serde(default)]
    pub field: Option<String>,
    /// Failure message; absent means empty.
    #[serde(default)]
    pub message: Option<String>,
}

impl UniqueRuleConfig {
    /// Build the configured rule.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::InvalidArgument`] when `field` is absent or blank.
    pub fn into_rule(self) -> Result<UniqueRule, RuleError> {
        let field = FieldName::try_from(self.field.as_deref())?;
        Ok(UniqueRule::new(field, self.message.unwrap_or_default()))
    }
}

/// A list of uniqueness rules applied to the same collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleSetConfig {
    /// Rules in evaluation order.
    #[serde(default)]
    pub rules: Vec<UniqueRuleConfig>,
}

impl RuleSetConfig {
    /// Parse a YAML rule set.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Parse a JSON rule set.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Load a rule set from disk.
    ///
    /// `.yaml`/`.yml` files are parsed as YAML, anything else as JSON.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        match ext {
            "yaml" | "yml" => Self::from_yaml_str(&content),
            _ => Self::from_json_str(&content),
        }
    }

    /// Build every configured rule, stopping at the first invalid one.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::InvalidArgument`] for the first rule with a
    /// missing or blank field.
    pub fn build(self) -> Result<Vec<UniqueRule>, RuleError> {
        self.rules.into_iter().map(UniqueRuleConfig::into_rule).collect()
    }
}
