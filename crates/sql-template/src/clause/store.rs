//! Clause store - named groups plus the mutation sequence

use indexmap::IndexMap;

use super::group::ClauseGroup;
use super::types::{Clause, ClauseFormat};
use crate::params::Parameters;

/// Insertion-ordered map of clause groups
///
/// Every mutation advances `sequence`, which templates compare against to
/// decide whether their cached resolution is still valid.
#[derive(Debug, Clone, Default)]
pub struct ClauseStore {
    groups: IndexMap<String, ClauseGroup>,
    sequence: u64,
}

impl ClauseStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Append a clause to `name`, creating the group with `format` on first use
    ///
    /// An existing group keeps the format it was created with.
    pub fn add_clause(
        &mut self,
        name: &str,
        sql: impl Into<String>,
        parameters: Option<Parameters>,
        format: ClauseFormat,
        inclusive: bool,
    ) {
        let group = self
            .groups
            .entry(name.to_string())
            .or_insert_with(|| ClauseGroup::new(name, format));
        group.push(Clause::new(sql, parameters, inclusive));
        self.sequence += 1;
        tracing::trace!(
            "Added {} clause #{} (sequence {})",
            name,
            group.len(),
            self.sequence
        );
    }

    /// Append already-built clauses, keeping their parameters and flags
    pub(crate) fn append_clauses(&mut self, name: &str, format: ClauseFormat, clauses: Vec<Clause>) {
        if clauses.is_empty() {
            return;
        }
        let group = self
            .groups
            .entry(name.to_string())
            .or_insert_with(|| ClauseGroup::new(name, format));
        for clause in clauses {
            group.push(clause);
        }
        self.sequence += 1;
    }

    /// Make `sql` the only clause of `name`
    ///
    /// An existing group keeps its position and format.
    pub fn replace_group(
        &mut self,
        name: &str,
        sql: impl Into<String>,
        parameters: Option<Parameters>,
        format: ClauseFormat,
        inclusive: bool,
    ) {
        if let Some(group) = self.groups.get_mut(name) {
            group.extract(|_| true);
        }
        self.add_clause(name, sql, parameters, format, inclusive);
    }

    /// Drop a whole group; returns whether it existed
    pub fn clear_group(&mut self, name: &str) -> bool {
        let removed = self.groups.shift_remove(name).is_some();
        if removed {
            self.sequence += 1;
        }
        removed
    }

    pub fn group(&self, name: &str) -> Option<&ClauseGroup> {
        self.groups.get(name)
    }

    pub(crate) fn group_mut(&mut self, name: &str) -> Option<&mut ClauseGroup> {
        self.groups.get_mut(name)
    }

    /// Whether `name` currently holds at least one clause
    pub fn has_group(&self, name: &str) -> bool {
        self.groups.get(name).is_some_and(|g| !g.is_empty())
    }

    pub fn groups(&self) -> impl Iterator<Item = &ClauseGroup> {
        self.groups.values()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub(crate) fn touch(&mut self) {
        self.sequence += 1;
    }
}
