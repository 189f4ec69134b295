//! The bundled in-memory grid backend.

use std::collections::HashMap;

use crate::selection::SelectionState;

use super::{CheckCell, GridBackend, SortOrder};

/// Default width of a freshly created column, in terminal cells.
pub const DEFAULT_COLUMN_WIDTH: u16 = 12;

#[derive(Debug, Clone, Default)]
struct CellData {
    text: Option<String>,
    check: Option<CheckCell>,
}

#[derive(Debug, Clone, Default)]
struct RowData {
    cells: Vec<CellData>,
}

#[derive(Debug, Clone)]
struct ColumnMeta {
    label: Option<String>,
    width: u16,
    hidden: bool,
}

impl Default for ColumnMeta {
    fn default() -> Self {
        Self {
            label: None,
            width: DEFAULT_COLUMN_WIDTH,
            hidden: false,
        }
    }
}

/// [`GridBackend`] implementation holding everything in memory.
///
/// This is the default backend of
/// [`CheckTable::new`](crate::CheckTable::new) and the one the headless
/// tests run against.
#[derive(Debug, Default)]
pub struct MemoryGrid {
    columns: Vec<ColumnMeta>,
    rows: Vec<RowData>,
    /// Span anchors: (row, column) -> (row span, column span).
    spans: HashMap<(usize, usize), (usize, usize)>,
    selection: SelectionState,
    current: Option<(usize, usize)>,
}

impl MemoryGrid {
    pub fn new(rows: usize, columns: usize) -> Self {
        let column_meta = vec![ColumnMeta::default(); columns];
        let row_data = vec![
            RowData {
                cells: vec![CellData::default(); columns],
            };
            rows
        ];
        Self {
            columns: column_meta,
            rows: row_data,
            spans: HashMap::new(),
            selection: SelectionState::new(),
            current: None,
        }
    }

    fn cell(&self, row: usize, column: usize) -> Option<&CellData> {
        self.rows.get(row).and_then(|r| r.cells.get(column))
    }

    fn cell_mut(&mut self, row: usize, column: usize) -> Option<&mut CellData> {
        self.rows.get_mut(row).and_then(|r| r.cells.get_mut(column))
    }

    /// Shift span anchors after a structural change. `insert` shifts
    /// indices at or past `at` up by one; removal drops anchors at `at`
    /// and shifts the rest down.
    fn shift_spans(&mut self, at: usize, insert: bool, rows_axis: bool) {
        let old = std::mem::take(&mut self.spans);
        for ((row, column), span) in old {
            let index = if rows_axis { row } else { column };
            let new_index = if insert {
                if index >= at { index + 1 } else { index }
            } else if index == at {
                continue;
            } else if index > at {
                index - 1
            } else {
                index
            };
            let key = if rows_axis {
                (new_index, column)
            } else {
                (row, new_index)
            };
            self.spans.insert(key, span);
        }
    }
}

impl GridBackend for MemoryGrid {
    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn column_count(&self) -> usize {
        self.columns.len()
    }

    fn insert_row(&mut self, row: usize) {
        let row = row.min(self.rows.len());
        self.rows.insert(
            row,
            RowData {
                cells: vec![CellData::default(); self.columns.len()],
            },
        );
        self.selection.on_row_inserted(row);
        self.shift_spans(row, true, true);
        if let Some((current_row, current_column)) = self.current
            && current_row >= row
        {
            self.current = Some((current_row + 1, current_column));
        }
    }

    fn remove_row(&mut self, row: usize) {
        if row >= self.rows.len() {
            return;
        }
        self.rows.remove(row);
        self.selection.on_row_removed(row);
        self.shift_spans(row, false, true);
        match self.current {
            Some((current_row, _)) if current_row == row => self.current = None,
            Some((current_row, current_column)) if current_row > row => {
                self.current = Some((current_row - 1, current_column));
            }
            _ => {}
        }
    }

    fn insert_column(&mut self, column: usize) {
        let column = column.min(self.columns.len());
        self.columns.insert(column, ColumnMeta::default());
        for row in &mut self.rows {
            row.cells.insert(column, CellData::default());
        }
        self.shift_spans(column, true, false);
        if let Some((current_row, current_column)) = self.current
            && current_column >= column
        {
            self.current = Some((current_row, current_column + 1));
        }
    }

    fn remove_column(&mut self, column: usize) {
        if column >= self.columns.len() {
            return;
        }
        self.columns.remove(column);
        for row in &mut self.rows {
            row.cells.remove(column);
        }
        self.shift_spans(column, false, false);
        match self.current {
            Some((_, current_column)) if current_column == column => self.current = None,
            Some((current_row, current_column)) if current_column > column => {
                self.current = Some((current_row, current_column - 1));
            }
            _ => {}
        }
    }

    fn set_column_count(&mut self, count: usize) {
        self.columns.resize_with(count, ColumnMeta::default);
        for row in &mut self.rows {
            row.cells.resize_with(count, CellData::default);
        }
        if let Some((_, current_column)) = self.current
            && current_column >= count
        {
            self.current = None;
        }
    }

    fn cell_text(&self, row: usize, column: usize) -> Option<&str> {
        self.cell(row, column).and_then(|c| c.text.as_deref())
    }

    fn set_cell_text(&mut self, row: usize, column: usize, text: Option<String>) {
        if let Some(cell) = self.cell_mut(row, column) {
            cell.text = text;
        }
    }

    fn take_cell_text(&mut self, row: usize, column: usize) -> Option<String> {
        self.cell_mut(row, column).and_then(|c| c.text.take())
    }

    fn check_cell(&self, row: usize, column: usize) -> Option<CheckCell> {
        self.cell(row, column).and_then(|c| c.check)
    }

    fn set_check_cell(&mut self, row: usize, column: usize, check: Option<CheckCell>) {
        if let Some(cell) = self.cell_mut(row, column) {
            cell.check = check;
        }
    }

    fn header_label(&self, column: usize) -> Option<&str> {
        self.columns.get(column).and_then(|c| c.label.as_deref())
    }

    fn set_header_label(&mut self, column: usize, label: Option<String>) {
        if let Some(meta) = self.columns.get_mut(column) {
            meta.label = label;
        }
    }

    fn take_header_label(&mut self, column: usize) -> Option<String> {
        self.columns.get_mut(column).and_then(|c| c.label.take())
    }

    fn column_width(&self, column: usize) -> u16 {
        self.columns.get(column).map(|c| c.width).unwrap_or(0)
    }

    fn set_column_width(&mut self, column: usize, width: u16) {
        if let Some(meta) = self.columns.get_mut(column) {
            meta.width = width.max(1);
        }
    }

    fn is_column_hidden(&self, column: usize) -> bool {
        self.columns.get(column).map(|c| c.hidden).unwrap_or(false)
    }

    fn set_column_hidden(&mut self, column: usize, hidden: bool) {
        if let Some(meta) = self.columns.get_mut(column) {
            meta.hidden = hidden;
        }
    }

    fn set_span(&mut self, row: usize, column: usize, row_span: usize, column_span: usize) {
        if row >= self.rows.len() || column >= self.columns.len() {
            return;
        }
        if row_span <= 1 && column_span <= 1 {
            self.spans.remove(&(row, column));
        } else {
            self.spans
                .insert((row, column), (row_span.max(1), column_span.max(1)));
        }
    }

    fn row_span(&self, row: usize, column: usize) -> usize {
        self.spans.get(&(row, column)).map(|s| s.0).unwrap_or(1)
    }

    fn column_span(&self, row: usize, column: usize) -> usize {
        self.spans.get(&(row, column)).map(|s| s.1).unwrap_or(1)
    }

    fn sort_rows(&mut self, column: usize, order: SortOrder) {
        if column >= self.columns.len() {
            return;
        }
        // Stable sort; rows without a value in the column sort as empty.
        self.rows.sort_by(|a, b| {
            let left = a.cells.get(column).and_then(|c| c.text.as_deref());
            let right = b.cells.get(column).and_then(|c| c.text.as_deref());
            let left = left.unwrap_or("");
            let right = right.unwrap_or("");
            match order {
                SortOrder::Ascending => left.cmp(right),
                SortOrder::Descending => right.cmp(left),
            }
        });
        self.spans.clear();
    }

    fn selection(&self) -> &SelectionState {
        &self.selection
    }

    fn selection_mut(&mut self) -> &mut SelectionState {
        &mut self.selection
    }

    fn current_cell(&self) -> Option<(usize, usize)> {
        self.current
    }

    fn set_current_cell(&mut self, cell: Option<(usize, usize)>) {
        match cell {
            Some((row, column)) if row < self.rows.len() && column < self.columns.len() => {
                self.current = Some((row, column));
            }
            Some(_) => {}
            None => self.current = None,
        }
    }
}
