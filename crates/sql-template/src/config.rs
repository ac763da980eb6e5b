//! Builder configuration
//!
//! Loaded programmatically, from environment variables, or from YAML.

use std::env;
use std::str::FromStr;

use serde::Deserialize;

use crate::dialect::Dialect;
use crate::error::ConfigError;

/// Environment variable selecting the dialect
pub const DIALECT_ENV: &str = "SQL_TEMPLATE_DIALECT";

/// Environment variable selecting the marker policy
pub const MARKER_POLICY_ENV: &str = "SQL_TEMPLATE_MARKER_POLICY";

/// What to do with `/**name**/` markers left after substitution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerPolicy {
    /// Remove leftovers silently
    #[default]
    Strip,
    /// Remove leftovers, warning about names no clause kind or group uses
    Warn,
    /// Fail resolution on names no clause kind or group uses
    Deny,
}

impl FromStr for MarkerPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "strip" => Ok(MarkerPolicy::Strip),
            "warn" => Ok(MarkerPolicy::Warn),
            "deny" => Ok(MarkerPolicy::Deny),
            _ => Err(ConfigError::invalid_value(
                "marker_policy",
                s,
                "strip, warn or deny",
            )),
        }
    }
}

impl std::fmt::Display for MarkerPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let policy = match self {
            MarkerPolicy::Strip => "strip",
            MarkerPolicy::Warn => "warn",
            MarkerPolicy::Deny => "deny",
        };
        write!(f, "{}", policy)
    }
}

/// Configuration shared by every builder created from it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    pub dialect: Dialect,
    pub marker_policy: MarkerPolicy,
}

impl TemplateConfig {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            marker_policy: MarkerPolicy::default(),
        }
    }

    pub fn with_marker_policy(mut self, policy: MarkerPolicy) -> Self {
        self.marker_policy = policy;
        self
    }

    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(dialect) = env::var(DIALECT_ENV) {
            config.dialect = dialect.parse()?;
        }

        if let Ok(policy) = env::var(MARKER_POLICY_ENV) {
            config.marker_policy = policy.parse()?;
        }

        tracing::debug!(
            "Loaded template configuration: dialect={}, marker_policy={}",
            config.dialect,
            config.marker_policy
        );
        Ok(config)
    }

    /// Parse configuration from a YAML document
    ///
    /// ```yaml
    /// dialect: oracle
    /// marker_policy: deny
    /// ```
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }
}
