//! # sql-template: SQL clause composition for repository queries
//!
//! Repository code builds a query by registering SQL fragments on a
//! [`SqlBuilder`] (selects, joins, predicates, ordering, paging) and then
//! creating a [`Template`]: a skeleton with `/**name**/` markers that is
//! resolved lazily into `(raw_sql, parameters)`.
//!
//! The layer does not parse or validate SQL. Errors in the produced SQL
//! surface when the driver executes it.

pub mod builder;
pub mod clause;
pub mod config;
pub mod dialect;
pub mod error;
pub mod execution;
pub mod params;
pub mod template;

#[cfg(test)]
mod tests;

pub use builder::SqlBuilder;
pub use clause::{Clause, ClauseFormat, ClauseGroup, ClauseKind};
pub use config::{MarkerPolicy, TemplateConfig};
pub use dialect::Dialect;
pub use error::{ConfigError, TemplateError, TemplateResult};
pub use params::Parameters;
pub use template::{PositionalQuery, Template};
