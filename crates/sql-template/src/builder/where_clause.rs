//! WHERE predicates

use super::sql_builder::SqlBuilder;
use crate::clause::ClauseKind;
use crate::params::Parameters;

impl SqlBuilder {
    /// Add a predicate joined to the others with `AND`
    pub fn where_clause(&mut self, sql: &str, parameters: impl Into<Parameters>) -> &mut Self {
        self.add_kind(ClauseKind::Where, sql, parameters.into(), false)
    }

    /// Add a predicate to the parenthesized `OR` block
    ///
    /// `a AND b` plus `or_where(c)` and `or_where(d)` renders as
    /// `a AND b AND (c OR d)`.
    pub fn or_where(&mut self, sql: &str, parameters: impl Into<Parameters>) -> &mut Self {
        self.add_kind(ClauseKind::Where, sql, parameters.into(), true)
    }

    /// `AND` predicate of the inner query
    pub fn insight_where(&mut self, sql: &str, parameters: impl Into<Parameters>) -> &mut Self {
        self.add_kind(ClauseKind::InsightWhere, sql, parameters.into(), false)
    }

    /// `OR` predicate of the inner query
    pub fn insight_or_where(&mut self, sql: &str, parameters: impl Into<Parameters>) -> &mut Self {
        self.add_kind(ClauseKind::InsightWhere, sql, parameters.into(), true)
    }
}
