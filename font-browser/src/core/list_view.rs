//! List view abstraction the panel draws into.
//!
//! Any surface offering configurable sortable columns, row identity, a
//! current row, and a redraw hook can host the panel.

use super::error::BrowserError;
use super::rows::FontRow;

/// A table column header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    /// Display width in characters.
    pub width: usize,
    pub sortable: bool,
}

/// Which column rows are ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    pub column: usize,
    pub descending: bool,
}

impl SortKey {
    pub fn ascending(column: usize) -> Self {
        Self {
            column,
            descending: false,
        }
    }
}

/// Tabular surface hosting the panel.
pub trait ListView {
    /// Sets column headers and the initial sort key.
    fn configure(&mut self, columns: Vec<Column>, sort: SortKey);

    /// Replaces the whole dataset.
    fn set_rows(&mut self, rows: Vec<FontRow>);

    /// Rows in display order.
    fn rows(&self) -> &[FontRow];

    /// Identity of the highlighted row, if any.
    fn selected_id(&self) -> Option<&str>;

    /// Draws the current state of the surface.
    fn redraw(&mut self) -> Result<(), BrowserError>;
}
