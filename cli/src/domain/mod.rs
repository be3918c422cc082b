//! Domain layer — pure fleet logic, no I/O, no async.
//!
//! This module has zero imports from `crate::commands`, `crate::output`,
//! `std::fs`, `std::process`, or `std::net`. All functions are synchronous
//! and take data in, returning data out.

pub mod comparator;
pub mod error;
pub mod fleet;
pub mod sort;

pub use comparator::{SortField, SortOrder, compare};
pub use error::TableError;
pub use fleet::Fleet;
pub use sort::{AgentTableKind, SortHandler};
