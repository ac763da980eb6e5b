//! JOIN clauses and inner-join alias promotion

use super::sql_builder::{BuilderState, SqlBuilder};
use crate::clause::ClauseKind;
use crate::params::Parameters;

impl SqlBuilder {
    /// Add an INNER JOIN, e.g. `Brands b ON b.Id = p.BrandId`
    pub fn inner_join(&mut self, sql: &str, parameters: impl Into<Parameters>) -> &mut Self {
        self.add_kind(ClauseKind::InnerJoin, sql, parameters.into(), false)
    }

    /// Add an INNER JOIN and record the alias it introduces
    ///
    /// Recorded aliases drive [`SqlBuilder::resolve_inner_join_clauses`].
    pub fn inner_join_as(
        &mut self,
        alias: &str,
        sql: &str,
        parameters: impl Into<Parameters>,
    ) -> &mut Self {
        {
            let mut state = self.state.borrow_mut();
            if !state.inner_join_aliases.iter().any(|a| a == alias) {
                state.inner_join_aliases.push(alias.to_string());
            }
        }
        self.inner_join(sql, parameters)
    }

    pub fn left_join(&mut self, sql: &str, parameters: impl Into<Parameters>) -> &mut Self {
        self.add_kind(ClauseKind::LeftJoin, sql, parameters.into(), false)
    }

    pub fn right_join(&mut self, sql: &str, parameters: impl Into<Parameters>) -> &mut Self {
        self.add_kind(ClauseKind::RightJoin, sql, parameters.into(), false)
    }

    /// Plain `JOIN`
    pub fn join(&mut self, sql: &str, parameters: impl Into<Parameters>) -> &mut Self {
        self.add_kind(ClauseKind::Join, sql, parameters.into(), false)
    }

    pub fn insight_inner_join(&mut self, sql: &str, parameters: impl Into<Parameters>) -> &mut Self {
        self.add_kind(ClauseKind::InsightInnerJoin, sql, parameters.into(), false)
    }

    pub fn insight_left_join(&mut self, sql: &str, parameters: impl Into<Parameters>) -> &mut Self {
        self.add_kind(ClauseKind::InsightLeftJoin, sql, parameters.into(), false)
    }

    /// Move inner select expressions that reference an inner-joined alias
    /// into the outer select list
    ///
    /// Inner joins live in the outer query, so the inner query cannot see
    /// their aliases. Order and parameters of the moved clauses are kept.
    pub fn resolve_inner_join_clauses(&mut self) -> &mut Self {
        promote_inner_join_selects(&mut self.state.borrow_mut());
        self
    }
}

fn promote_inner_join_selects(state: &mut BuilderState) {
    if state.inner_join_aliases.is_empty() {
        return;
    }

    let insight = ClauseKind::InsightSelect.name();
    let aliases = &state.inner_join_aliases;
    let promoted = match state.store.group_mut(insight) {
        Some(group) => {
            group.extract(|clause| aliases.iter().any(|a| references_alias(&clause.sql, a)))
        }
        None => return,
    };
    if promoted.is_empty() {
        return;
    }

    tracing::debug!(
        "Promoting {} inner select expression(s) to the outer select",
        promoted.len()
    );
    if !state.store.has_group(insight) {
        state.store.clear_group(insight);
    }
    state
        .store
        .append_clauses(ClauseKind::Select.name(), ClauseKind::Select.format(), promoted);
}

/// Whether `sql` contains `alias.` not preceded by an identifier character
fn references_alias(sql: &str, alias: &str) -> bool {
    let needle = format!("{}.", alias);
    sql.match_indices(&needle).any(|(index, _)| {
        sql[..index]
            .chars()
            .next_back()
            .map_or(true, |c| !(c.is_ascii_alphanumeric() || c == '_'))
    })
}
