//! Builder façade - one fluent method per clause kind

pub mod joins;
pub mod ordering;
pub mod pagination;
pub mod select;
pub(crate) mod sql_builder;
pub mod where_clause;

pub use pagination::{ROW_NUMBER_COLUMN, SKIP_PARAMETER, TAKE_PARAMETER};
pub use sql_builder::SqlBuilder;
