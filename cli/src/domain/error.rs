//! Typed domain error enums.
//!
//! All error types implement `thiserror::Error` and convert to
//! `anyhow::Error` via the `?` operator at the command boundary.

use thiserror::Error;

/// Errors related to the agent table layout.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("column '{column}' is not sortable on the {table} agents table")]
    ColumnNotSortable { column: String, table: &'static str },
}
