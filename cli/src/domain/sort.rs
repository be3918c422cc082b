//! Column-click sort state, one handler per agent table.
//!
//! The handler is a pure state machine over `(column, order)`; it never sorts
//! anything itself. The rendering layer maps the current column through
//! [`AgentTableKind::column_field`] and hands the result to the comparator.

use super::comparator::{SortField, SortOrder};

/// Which agent table a sort handler drives. The static table reserves column
/// 0 for the select checkbox; the elastic table has no checkbox or resources
/// column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentTableKind {
    Static,
    Elastic,
}

impl AgentTableKind {
    /// Column indices that respond to a sort click.
    #[must_use]
    pub const fn sortable_columns(self) -> &'static [usize] {
        match self {
            Self::Static => &[1, 2, 3, 4, 5, 6, 7, 8],
            Self::Elastic => &[0, 1, 2, 3, 4, 5, 6],
        }
    }

    /// The field a column sorts by, or `None` for non-sortable columns.
    #[must_use]
    pub const fn column_field(self, column: usize) -> Option<SortField> {
        match self {
            Self::Static => match column {
                1 => Some(SortField::Hostname),
                2 => Some(SortField::Sandbox),
                3 => Some(SortField::OperatingSystem),
                4 => Some(SortField::IpAddress),
                5 => Some(SortField::Status),
                6 => Some(SortField::FreeSpace),
                7 => Some(SortField::Resources),
                8 => Some(SortField::Environments),
                _ => None,
            },
            Self::Elastic => match column {
                0 => Some(SortField::Hostname),
                1 => Some(SortField::Sandbox),
                2 => Some(SortField::OperatingSystem),
                3 => Some(SortField::IpAddress),
                4 => Some(SortField::Status),
                5 => Some(SortField::FreeSpace),
                6 => Some(SortField::Environments),
                _ => None,
            },
        }
    }

    /// Inverse of [`Self::column_field`]; `None` when the table has no column
    /// for the field (resources on the elastic table).
    #[must_use]
    pub fn field_column(self, field: SortField) -> Option<usize> {
        self.sortable_columns()
            .iter()
            .copied()
            .find(|&column| self.column_field(column) == Some(field))
    }
}

/// Tracks which column a table is sorted by and in which direction.
#[derive(Debug, Clone)]
pub struct SortHandler {
    table: AgentTableKind,
    column: Option<usize>,
    order: Option<SortOrder>,
}

impl SortHandler {
    /// A handler with no column sorted yet.
    #[must_use]
    pub const fn new(table: AgentTableKind) -> Self {
        Self { table, column: None, order: None }
    }

    #[must_use]
    pub const fn table(&self) -> AgentTableKind {
        self.table
    }

    #[must_use]
    pub const fn sortable_columns(&self) -> &'static [usize] {
        self.table.sortable_columns()
    }

    /// Register a click on a column header.
    ///
    /// Clicks on non-sortable columns are ignored. Clicking the currently
    /// sorted column flips the direction; clicking any other sortable column
    /// selects it and resets to ascending.
    pub fn on_column_click(&mut self, column: usize) {
        if !self.sortable_columns().contains(&column) {
            return;
        }
        if self.column == Some(column) {
            self.order = Some(self.order.unwrap_or(SortOrder::Ascending).flipped());
        } else {
            self.column = Some(column);
            self.order = Some(SortOrder::Ascending);
        }
    }

    #[must_use]
    pub const fn current_column(&self) -> Option<usize> {
        self.column
    }

    #[must_use]
    pub const fn current_order(&self) -> Option<SortOrder> {
        self.order
    }

    /// The field the current column sorts by, when a sort is active.
    #[must_use]
    pub fn current_field(&self) -> Option<SortField> {
        self.table.column_field(self.column?)
    }
}
