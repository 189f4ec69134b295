//! The grid capability interface and the bundled in-memory backend.
//!
//! [`CheckTable`](crate::CheckTable) is a decorator around a [`GridBackend`]
//! rather than a subclass of a concrete grid widget. The trait is the narrow
//! surface the decorator needs: row/column CRUD, per-cell text, per-cell
//! check widgets, column metadata, spans, sorting, the selection model, and
//! the current cell. Everything the backend sees is in *physical*
//! coordinates; the reserved-column offset lives entirely in the decorator.

mod memory;

pub use memory::MemoryGrid;

use crate::selection::SelectionState;

/// Sort direction for [`GridBackend::sort_rows`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn reversed(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }
}

/// The per-row checkbox widget embedded in the reserved column.
///
/// `connected` mirrors whether the cell's change notification is wired to
/// the table's shared handler; [`CheckTable::remove_row`](crate::CheckTable)
/// clears it before tearing the row down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckCell {
    pub checked: bool,
    pub connected: bool,
}

impl CheckCell {
    pub fn new(checked: bool) -> Self {
        Self {
            checked,
            connected: true,
        }
    }
}

/// Capability interface over an embeddable table grid.
///
/// Reads on out-of-bounds indices return `None` or a default; writes are
/// ignored. Implementations are expected to keep the selection model and the
/// current cell consistent across row insertion and removal (shifting row
/// indices the way [`SelectionState::on_row_inserted`] and
/// [`SelectionState::on_row_removed`] do).
pub trait GridBackend {
    // -------------------------------------------------------------------------
    // Dimensions and structure
    // -------------------------------------------------------------------------

    fn row_count(&self) -> usize;
    fn column_count(&self) -> usize;

    /// Insert an empty row before `row` (`row == row_count()` appends).
    fn insert_row(&mut self, row: usize);

    /// Remove `row` and everything in it.
    fn remove_row(&mut self, row: usize);

    /// Insert an empty column before `column`.
    fn insert_column(&mut self, column: usize);

    /// Remove `column` and its cells from every row.
    fn remove_column(&mut self, column: usize);

    /// Grow or shrink to exactly `count` columns, trimming from the right.
    fn set_column_count(&mut self, count: usize);

    // -------------------------------------------------------------------------
    // Cells
    // -------------------------------------------------------------------------

    fn cell_text(&self, row: usize, column: usize) -> Option<&str>;
    fn set_cell_text(&mut self, row: usize, column: usize, text: Option<String>);

    /// Remove and return the text of a cell.
    fn take_cell_text(&mut self, row: usize, column: usize) -> Option<String>;

    /// The check widget embedded in a cell, if any.
    fn check_cell(&self, row: usize, column: usize) -> Option<CheckCell>;
    fn set_check_cell(&mut self, row: usize, column: usize, cell: Option<CheckCell>);

    // -------------------------------------------------------------------------
    // Column metadata
    // -------------------------------------------------------------------------

    fn header_label(&self, column: usize) -> Option<&str>;
    fn set_header_label(&mut self, column: usize, label: Option<String>);
    fn take_header_label(&mut self, column: usize) -> Option<String>;

    fn column_width(&self, column: usize) -> u16;
    fn set_column_width(&mut self, column: usize, width: u16);

    fn is_column_hidden(&self, column: usize) -> bool;
    fn set_column_hidden(&mut self, column: usize, hidden: bool);

    // -------------------------------------------------------------------------
    // Spans
    // -------------------------------------------------------------------------

    /// Make the cell at (`row`, `column`) span `row_span` rows and
    /// `column_span` columns. Spans of (1, 1) clear the entry.
    fn set_span(&mut self, row: usize, column: usize, row_span: usize, column_span: usize);
    fn row_span(&self, row: usize, column: usize) -> usize;
    fn column_span(&self, row: usize, column: usize) -> usize;

    // -------------------------------------------------------------------------
    // Sorting
    // -------------------------------------------------------------------------

    /// Reorder whole rows by the text of `column`. Rows travel as units, so
    /// embedded check cells move with their row.
    fn sort_rows(&mut self, column: usize, order: SortOrder);

    // -------------------------------------------------------------------------
    // Selection and current cell
    // -------------------------------------------------------------------------

    fn selection(&self) -> &SelectionState;
    fn selection_mut(&mut self) -> &mut SelectionState;

    fn current_cell(&self) -> Option<(usize, usize)>;
    fn set_current_cell(&mut self, cell: Option<(usize, usize)>);
}
