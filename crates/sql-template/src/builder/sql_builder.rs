//! SQL Builder - core state and template creation

use std::cell::RefCell;
use std::rc::Rc;

use crate::clause::{ClauseFormat, ClauseGroup, ClauseKind, ClauseStore};
use crate::config::TemplateConfig;
use crate::dialect::Dialect;
use crate::params::Parameters;
use crate::template::{Skeleton, Template};

/// Everything a template needs to resolve against
#[derive(Debug)]
pub(crate) struct BuilderState {
    pub(crate) table: String,
    pub(crate) alias: Option<String>,
    pub(crate) config: TemplateConfig,
    pub(crate) store: ClauseStore,
    pub(crate) inner_join_aliases: Vec<String>,
    pub(crate) take: Option<u64>,
    pub(crate) skip: Option<u64>,
}

impl BuilderState {
    pub(crate) fn dialect(&self) -> Dialect {
        self.config.dialect
    }

    /// Name the outer query uses for the table, alias first
    pub(crate) fn table_reference(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.table)
    }

    pub(crate) fn has_insight_clauses(&self) -> bool {
        ClauseKind::ALL
            .iter()
            .filter(|kind| kind.is_insight())
            .any(|kind| self.store.has_group(kind.name()))
    }

    pub(crate) fn is_paged(&self) -> bool {
        self.take.is_some() || self.skip.is_some()
    }
}

/// Fluent builder collecting SQL clauses for one query
///
/// Templates created from a builder keep observing it: mutating the builder
/// after creating a template makes the template re-resolve on its next read.
/// A builder is meant for a single call site and is neither `Send` nor `Sync`.
///
/// ```
/// use sql_template::{Dialect, SqlBuilder};
/// use serde_json::json;
///
/// let mut builder = SqlBuilder::new("Products", Dialect::MySql);
/// builder
///     .where_clause("p.BrandId = @brand", json!({"brand": 3}))
///     .order_by("p.Name", ());
/// let template = builder.add_template("SELECT * FROM Products p /**where**/ /**orderby**/", ());
/// let sql = template.raw_sql().unwrap();
/// assert!(sql.contains("WHERE p.BrandId = @brand"));
/// ```
#[derive(Debug)]
pub struct SqlBuilder {
    pub(crate) state: Rc<RefCell<BuilderState>>,
}

impl SqlBuilder {
    /// Create a builder for `table` using the default configuration for `dialect`
    pub fn new(table: impl Into<String>, dialect: Dialect) -> Self {
        Self::with_config(table, TemplateConfig::new(dialect))
    }

    pub fn with_config(table: impl Into<String>, config: TemplateConfig) -> Self {
        Self {
            state: Rc::new(RefCell::new(BuilderState {
                table: table.into(),
                alias: None,
                config,
                store: ClauseStore::new(),
                inner_join_aliases: Vec::new(),
                take: None,
                skip: None,
            })),
        }
    }

    /// Alias the table in generated skeletons, e.g. `Products p`
    pub fn alias(&mut self, alias: impl Into<String>) -> &mut Self {
        let mut state = self.state.borrow_mut();
        state.alias = Some(alias.into());
        state.store.touch();
        drop(state);
        self
    }

    pub fn table(&self) -> String {
        self.state.borrow().table.clone()
    }

    pub fn dialect(&self) -> Dialect {
        self.state.borrow().dialect()
    }

    pub fn config(&self) -> TemplateConfig {
        self.state.borrow().config
    }

    /// Mutation counter; advances on every change to the clause set
    pub fn sequence(&self) -> u64 {
        self.state.borrow().store.sequence()
    }

    /// Snapshot of a clause group, if it exists
    pub fn group(&self, name: &str) -> Option<ClauseGroup> {
        self.state.borrow().store.group(name).cloned()
    }

    /// Aliases recorded by [`SqlBuilder::inner_join_as`]
    pub fn inner_join_aliases(&self) -> Vec<String> {
        self.state.borrow().inner_join_aliases.clone()
    }

    /// Add a clause to an arbitrary group
    ///
    /// The group is created with `format` on first use. Later calls keep the
    /// original format even when they pass a different one.
    pub fn add_clause(
        &mut self,
        name: &str,
        sql: impl Into<String>,
        parameters: impl Into<Parameters>,
        format: ClauseFormat,
        inclusive: bool,
    ) -> &mut Self {
        self.state.borrow_mut().store.add_clause(
            name,
            sql,
            non_empty(parameters.into()),
            format,
            inclusive,
        );
        self
    }

    pub(crate) fn add_kind(
        &mut self,
        kind: ClauseKind,
        sql: impl Into<String>,
        parameters: Parameters,
        inclusive: bool,
    ) -> &mut Self {
        self.state.borrow_mut().store.add_clause(
            kind.name(),
            sql,
            non_empty(parameters),
            kind.format(),
            inclusive,
        );
        self
    }

    pub(crate) fn replace_kind(
        &mut self,
        kind: ClauseKind,
        sql: impl Into<String>,
        parameters: Parameters,
    ) -> &mut Self {
        self.state.borrow_mut().store.replace_group(
            kind.name(),
            sql,
            non_empty(parameters),
            kind.format(),
            false,
        );
        self
    }

    /// Remove every clause of a group; a missing group is left alone
    pub fn clear_group(&mut self, name: &str) -> &mut Self {
        self.state.borrow_mut().store.clear_group(name);
        self
    }

    pub fn clear_select_statement(&mut self) -> &mut Self {
        self.clear_group(ClauseKind::Select.name())
    }

    pub fn clear_group_statement(&mut self) -> &mut Self {
        self.clear_group(ClauseKind::GroupBy.name())
    }

    /// Template over a caller-supplied skeleton containing `/**name**/` markers
    pub fn add_template(&self, sql: impl Into<String>, parameters: impl Into<Parameters>) -> Template {
        Template::new(
            Skeleton::Custom(sql.into()),
            parameters.into(),
            Rc::clone(&self.state),
        )
    }

    /// Template over the generated `SELECT ... FROM table` skeleton with paging
    pub fn use_default_template(&self, parameters: impl Into<Parameters>) -> Template {
        Template::new(Skeleton::Default, parameters.into(), Rc::clone(&self.state))
    }

    /// Template counting the rows the default template would page through
    pub fn use_count_template(&self, parameters: impl Into<Parameters>) -> Template {
        Template::new(Skeleton::Count, parameters.into(), Rc::clone(&self.state))
    }
}

fn non_empty(parameters: Parameters) -> Option<Parameters> {
    if parameters.is_empty() {
        None
    } else {
        Some(parameters)
    }
}
