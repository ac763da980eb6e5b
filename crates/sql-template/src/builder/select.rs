//! SELECT lists, INTERSECT, SET and bare parameters

use super::sql_builder::SqlBuilder;
use crate::clause::ClauseKind;
use crate::params::Parameters;

impl SqlBuilder {
    /// Add an expression to the outer select list
    pub fn select(&mut self, sql: &str, parameters: impl Into<Parameters>) -> &mut Self {
        self.add_kind(ClauseKind::Select, sql, parameters.into(), false)
    }

    /// Add an expression to the select list of the inner (correlated) query
    pub fn insight_select(&mut self, sql: &str, parameters: impl Into<Parameters>) -> &mut Self {
        self.add_kind(ClauseKind::InsightSelect, sql, parameters.into(), false)
    }

    /// Intersect with another complete SELECT statement
    pub fn intersect(&mut self, sql: &str, parameters: impl Into<Parameters>) -> &mut Self {
        self.add_kind(ClauseKind::Intersect, sql, parameters.into(), false)
    }

    /// Add an assignment for an UPDATE skeleton, e.g. `Name = @name`
    pub fn set(&mut self, sql: &str, parameters: impl Into<Parameters>) -> &mut Self {
        self.add_kind(ClauseKind::Set, sql, parameters.into(), false)
    }

    /// Bind values without contributing any SQL text
    pub fn add_parameters(&mut self, parameters: impl Into<Parameters>) -> &mut Self {
        self.add_kind(ClauseKind::Parameters, "", parameters.into(), false)
    }
}
