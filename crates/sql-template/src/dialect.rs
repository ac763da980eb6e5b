//! SQL dialects
//!
//! The dialect only changes how paging is expressed, how the default
//! skeleton wraps paged queries, and which placeholder syntax is used.

use serde::Deserialize;

use crate::error::ConfigError;

/// Target database flavor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// `LIMIT`/`OFFSET` paging, `@name` parameters
    #[default]
    MySql,
    /// `ROWNUM` paging, `:name` parameters. Every non-MySQL database maps here.
    #[serde(alias = "other")]
    Oracle,
}

impl Dialect {
    /// Prefix of a named parameter in clause text
    pub fn parameter_prefix(&self) -> char {
        match self {
            Dialect::MySql => '@',
            Dialect::Oracle => ':',
        }
    }

    /// Named placeholder for `name`, e.g. `@take` or `:take`
    pub fn named_parameter(&self, name: &str) -> String {
        format!("{}{}", self.parameter_prefix(), name)
    }

    /// Positional placeholder understood by the driver (1-based position)
    pub fn positional_placeholder(&self, position: usize) -> String {
        match self {
            Dialect::MySql => "?".to_string(),
            Dialect::Oracle => format!(":{}", position),
        }
    }

    pub fn is_mysql(&self) -> bool {
        matches!(self, Dialect::MySql)
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dialect::MySql => write!(f, "mysql"),
            Dialect::Oracle => write!(f, "oracle"),
        }
    }
}

impl std::str::FromStr for Dialect {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mysql" | "mariadb" => Ok(Dialect::MySql),
            "oracle" | "other" => Ok(Dialect::Oracle),
            _ => Err(ConfigError::invalid_value(
                "dialect",
                s,
                "mysql, oracle or other",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dialect() {
        assert_eq!("MySQL".parse::<Dialect>().unwrap(), Dialect::MySql);
        assert_eq!("mariadb".parse::<Dialect>().unwrap(), Dialect::MySql);
        assert_eq!("other".parse::<Dialect>().unwrap(), Dialect::Oracle);
        assert!("postgres".parse::<Dialect>().is_err());
    }

    #[test]
    fn test_placeholders() {
        assert_eq!(Dialect::MySql.named_parameter("take"), "@take");
        assert_eq!(Dialect::Oracle.named_parameter("take"), ":take");
        assert_eq!(Dialect::MySql.positional_placeholder(3), "?");
        assert_eq!(Dialect::Oracle.positional_placeholder(3), ":3");
    }
}
