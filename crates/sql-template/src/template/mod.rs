//! Templates - skeletons resolved lazily against a builder
//!
//! A template keeps a handle to the state of the builder that created it.
//! Reading `raw_sql` or `parameters` resolves the skeleton once and caches
//! the result together with the builder's sequence number; the cache is
//! reused until the builder is mutated again.

pub mod engine;
pub mod positional;
pub(crate) mod skeleton;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::builder::sql_builder::BuilderState;
use crate::dialect::Dialect;
use crate::error::TemplateResult;
use crate::params::Parameters;

pub use engine::marker_names;
pub use positional::PositionalQuery;

/// Where a template's skeleton comes from
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Skeleton {
    Custom(String),
    Default,
    Count,
}

#[derive(Debug)]
struct Resolution {
    sequence: u64,
    raw_sql: String,
    parameters: Parameters,
}

/// SQL skeleton bound to a builder
#[derive(Debug)]
pub struct Template {
    skeleton: Skeleton,
    initial: Parameters,
    state: Rc<RefCell<BuilderState>>,
    resolved: RefCell<Option<Resolution>>,
    resolutions: Cell<u64>,
}

impl Template {
    pub(crate) fn new(
        skeleton: Skeleton,
        initial: Parameters,
        state: Rc<RefCell<BuilderState>>,
    ) -> Self {
        Self {
            skeleton,
            initial,
            state,
            resolved: RefCell::new(None),
            resolutions: Cell::new(0),
        }
    }

    /// Final SQL with every marker substituted or stripped
    pub fn raw_sql(&self) -> TemplateResult<String> {
        self.with_resolution(|r| r.raw_sql.clone())
    }

    /// Initial parameters merged with every clause parameter of the builder
    pub fn parameters(&self) -> TemplateResult<Parameters> {
        self.with_resolution(|r| r.parameters.clone())
    }

    /// Both halves at once
    pub fn resolve(&self) -> TemplateResult<(String, Parameters)> {
        self.with_resolution(|r| (r.raw_sql.clone(), r.parameters.clone()))
    }

    /// Resolved SQL rewritten for a positional driver
    pub fn to_positional(&self) -> TemplateResult<PositionalQuery> {
        let dialect = self.dialect();
        self.with_resolution(|r| positional::to_positional(&r.raw_sql, &r.parameters, dialect))?
    }

    /// Skeleton text as it would be resolved right now
    pub fn skeleton(&self) -> String {
        let state = self.state.borrow();
        match &self.skeleton {
            Skeleton::Custom(sql) => sql.clone(),
            Skeleton::Default => skeleton::default_skeleton(&state),
            Skeleton::Count => skeleton::count_skeleton(&state),
        }
    }

    pub fn dialect(&self) -> Dialect {
        self.state.borrow().dialect()
    }

    /// Whether the next read will resolve again
    pub fn is_stale(&self) -> bool {
        let sequence = self.state.borrow().store.sequence();
        self.resolved
            .borrow()
            .as_ref()
            .map_or(true, |r| r.sequence != sequence)
    }

    /// How many times this template has actually been resolved
    pub fn resolution_count(&self) -> u64 {
        self.resolutions.get()
    }

    fn with_resolution<T, F>(&self, read: F) -> TemplateResult<T>
    where
        F: FnOnce(&Resolution) -> T,
    {
        let sequence = self.state.borrow().store.sequence();
        if let Some(resolution) = self.resolved.borrow().as_ref() {
            if resolution.sequence == sequence {
                return Ok(read(resolution));
            }
        }

        let resolution = self.compute(sequence)?;
        let value = read(&resolution);
        *self.resolved.borrow_mut() = Some(resolution);
        Ok(value)
    }

    fn compute(&self, sequence: u64) -> TemplateResult<Resolution> {
        let skeleton = self.skeleton();
        let state = self.state.borrow();
        let (raw_sql, parameters) = engine::render(
            &skeleton,
            &state.store,
            &self.initial,
            state.config.marker_policy,
        )?;

        self.resolutions.set(self.resolutions.get() + 1);
        tracing::debug!(
            "Resolved {:?} template at sequence {} ({} groups, {} parameters)",
            self.skeleton_kind(),
            sequence,
            state.store.len(),
            parameters.len()
        );

        Ok(Resolution {
            sequence,
            raw_sql,
            parameters,
        })
    }

    fn skeleton_kind(&self) -> &'static str {
        match self.skeleton {
            Skeleton::Custom(_) => "custom",
            Skeleton::Default => "default",
            Skeleton::Count => "count",
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{Dialect, MarkerPolicy, SqlBuilder, TemplateConfig, TemplateError};
    use serde_json::json;

    #[test]
    fn test_resolution_is_memoized() {
        let mut builder = SqlBuilder::new("T", Dialect::MySql);
        builder.where_clause("t1.Id = @id", json!({"id": 5}));
        let template = builder.add_template("SELECT * FROM T t1 /**where**/", ());

        assert!(template.is_stale());
        let first = template.raw_sql().unwrap();
        let second = template.raw_sql().unwrap();
        let _ = template.parameters().unwrap();

        assert_eq!(first, second);
        assert_eq!(template.resolution_count(), 1);
        assert!(!template.is_stale());
    }

    #[test]
    fn test_mutation_after_read_triggers_reresolution() {
        let mut builder = SqlBuilder::new("T", Dialect::MySql);
        builder.where_clause("a = 1", ());
        let template = builder.add_template("SELECT * FROM T /**where**/", ());

        assert_eq!(template.raw_sql().unwrap(), "SELECT * FROM T \nWHERE a = 1\n");

        builder.where_clause("b = 2", ());
        assert!(template.is_stale());
        assert_eq!(
            template.raw_sql().unwrap(),
            "SELECT * FROM T \nWHERE a = 1 AND b = 2\n"
        );
        assert_eq!(template.resolution_count(), 2);
    }

    #[test]
    fn test_templates_share_one_builder() {
        let mut builder = SqlBuilder::new("T", Dialect::MySql);
        builder.where_clause("a = @a", json!({"a": 1}));
        let rows = builder.add_template("SELECT * FROM T /**where**/", json!({"tenant": 2}));
        let count = builder.add_template("SELECT COUNT(*) FROM T /**where**/", ());

        assert_eq!(rows.parameters().unwrap().len(), 2);
        assert_eq!(count.parameters().unwrap().len(), 1);
        assert_eq!(count.raw_sql().unwrap(), "SELECT COUNT(*) FROM T \nWHERE a = @a\n");
    }

    #[test]
    fn test_deny_failure_is_not_cached() {
        let config = TemplateConfig::new(Dialect::MySql).with_marker_policy(MarkerPolicy::Deny);
        let builder = SqlBuilder::with_config("T", config);
        let template = builder.add_template("SELECT * FROM T /**filters**/", ());

        assert!(matches!(
            template.raw_sql(),
            Err(TemplateError::UnresolvedMarker { .. })
        ));
        assert!(template.is_stale());
        assert_eq!(template.resolution_count(), 0);
    }

    #[test]
    fn test_to_positional() {
        let mut builder = SqlBuilder::new("Products", Dialect::MySql);
        builder
            .where_clause("p.BrandId = @brand", json!({"brand": 3}))
            .take(10);
        let template = builder.add_template("SELECT * FROM Products p /**where**/ /**paging**/", ());

        let query = template.to_positional().unwrap();
        assert_eq!(
            query.sql,
            "SELECT * FROM Products p \nWHERE p.BrandId = ?\n \nLIMIT ?\n"
        );
        assert_eq!(query.values, vec![json!(3), json!(10)]);
        assert_eq!(query.dialect, Dialect::MySql);
    }
}
