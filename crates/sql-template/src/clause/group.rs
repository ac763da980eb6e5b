//! Clause groups and their resolution into SQL text

use super::types::{Clause, ClauseFormat};
use crate::params::Parameters;

/// Named, ordered collection of clauses sharing one format
#[derive(Debug, Clone, PartialEq)]
pub struct ClauseGroup {
    name: String,
    format: ClauseFormat,
    clauses: Vec<Clause>,
}

impl ClauseGroup {
    pub fn new(name: impl Into<String>, format: ClauseFormat) -> Self {
        Self {
            name: name.into(),
            format,
            clauses: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn format(&self) -> &ClauseFormat {
        &self.format
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub(crate) fn push(&mut self, clause: Clause) {
        self.clauses.push(clause);
    }

    /// Remove and return every clause matching `predicate`, keeping order
    pub(crate) fn extract<F>(&mut self, mut predicate: F) -> Vec<Clause>
    where
        F: FnMut(&Clause) -> bool,
    {
        let (taken, kept): (Vec<Clause>, Vec<Clause>) =
            self.clauses.drain(..).partition(|clause| predicate(clause));
        self.clauses = kept;
        taken
    }

    /// Render the group and merge its parameters into `parameters`
    ///
    /// Inclusive clauses are gathered into one `(a OR b)` element placed
    /// after the joiner chain of the non-inclusive ones.
    pub fn resolve(&self, parameters: &mut Parameters) -> String {
        for clause in &self.clauses {
            if let Some(bound) = &clause.parameters {
                parameters.merge(bound);
            }
        }

        let body = if self.clauses.iter().any(|c| c.inclusive) {
            let mut parts: Vec<&str> = self
                .clauses
                .iter()
                .filter(|c| !c.inclusive)
                .map(|c| c.sql.as_str())
                .collect();
            let inclusive: Vec<&str> = self
                .clauses
                .iter()
                .filter(|c| c.inclusive)
                .map(|c| c.sql.as_str())
                .collect();
            let or_block = format!("({})", inclusive.join(" OR "));
            parts.push(&or_block);
            parts.join(&self.format.joiner)
        } else {
            self.clauses
                .iter()
                .map(|c| c.sql.as_str())
                .collect::<Vec<_>>()
                .join(&self.format.joiner)
        };

        format!("{}{}{}", self.format.prefix, body, self.format.postfix)
    }
}
