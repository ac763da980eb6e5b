//! Clause storage and resolution

pub mod group;
pub mod store;
pub mod types;

pub use group::ClauseGroup;
pub use store::ClauseStore;
pub use types::{marker, Clause, ClauseFormat, ClauseKind};
