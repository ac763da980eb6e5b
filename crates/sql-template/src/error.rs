//! Error types for template resolution and configuration
//!
//! The builder itself never validates SQL. Errors only arise from opt-in
//! strict marker checking, from placeholder binding, and from configuration.

/// Result type alias for template operations
pub type TemplateResult<T> = Result<T, TemplateError>;

/// Errors raised while resolving a template or preparing it for a driver
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("Unresolved marker '/**{marker}**/' in template skeleton")]
    UnresolvedMarker { marker: String },

    #[error("No value bound for parameter '{name}'")]
    MissingParameter { name: String },

    #[error("Invalid parameters: {message}")]
    InvalidParameters { message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Configuration error type
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for field '{field}': '{value}'. Expected: {expected}")]
    InvalidValue {
        field: String,
        value: String,
        expected: String,
    },

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl ConfigError {
    /// Create an invalid value error
    pub fn invalid_value(
        field: impl Into<String>,
        value: impl Into<String>,
        expected: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            field: field.into(),
            value: value.into(),
            expected: expected.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = TemplateError::UnresolvedMarker {
            marker: "wehre".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Unresolved marker '/**wehre**/' in template skeleton"
        );

        let err = ConfigError::invalid_value("dialect", "db2", "mysql, oracle or other");
        assert!(err.to_string().contains("'db2'"));
    }
}
