//! CheckTable widget state.

use std::collections::HashMap;
use std::ops::Range;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use crate::delegate::CellDelegate;
use crate::event::GridEvent;
use crate::grid::{CheckCell, GridBackend, MemoryGrid, SortOrder};
use crate::header::{CheckHeader, HeaderState};
use crate::selection::{SelectionBehavior, SelectionMode, SelectionRange};
use crate::style::GridStyle;
use crate::text::display_width;

/// Unique identifier for a CheckTable widget instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TableId(usize);

impl TableId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl std::fmt::Display for TableId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "__checktable_{}", self.0)
    }
}

/// Internal state for the CheckTable widget.
pub(super) struct TableInner<B: GridBackend> {
    /// The wrapped grid, addressed in physical coordinates.
    pub backend: B,
    /// The header row with the select-all checkbox.
    pub header: CheckHeader,
    /// Colors and glyphs.
    pub style: GridStyle,
    /// Notifications waiting to be drained by the application.
    pub events: Vec<GridEvent>,
    /// Re-entrancy guard for the shared checkbox change handler.
    pub sync_in_progress: bool,
    /// Selection mode.
    pub selection_mode: SelectionMode,
    /// Whether clicks select whole rows or single cells.
    pub selection_behavior: SelectionBehavior,
    /// Whether header clicks on data sections sort.
    pub sorting_enabled: bool,
    /// Current sort state (logical column, order).
    pub sort: Option<(usize, SortOrder)>,
    /// Cell under the currently held mouse button (physical column).
    pub pressed_cell: Option<(usize, usize)>,
    /// Vertical scroll offset in rows.
    pub scroll_offset_y: u16,
    /// Viewport height (including header row).
    pub viewport_height: u16,
    /// Per-column render delegates, keyed by physical column.
    pub delegates: HashMap<usize, Arc<dyn CellDelegate>>,
}

impl<B: GridBackend> TableInner<B> {
    fn new(mut backend: B) -> Self {
        let style = GridStyle::default();
        // Claim physical column 0 for the checkboxes before the backend is
        // ever visible through the remapped API.
        backend.insert_column(0);
        backend.set_column_width(0, style.check_column_width);
        Self {
            backend,
            header: CheckHeader::new(),
            style,
            events: Vec::new(),
            sync_in_progress: false,
            selection_mode: SelectionMode::default(),
            selection_behavior: SelectionBehavior::default(),
            sorting_enabled: false,
            sort: None,
            pressed_cell: None,
            scroll_offset_y: 0,
            viewport_height: 0,
            delegates: HashMap::new(),
        }
    }
}

/// A table widget whose first physical column holds per-row checkboxes.
///
/// `CheckTable<B>` decorates a [`GridBackend`] with:
/// - The reserved checkbox column: physical column 0, invisible to the
///   column-indexed public API (logical column `c` is physical `c + 1`)
/// - A header checkbox that mirrors the aggregate row state and toggles
///   every row on click
/// - Bulk propagation: toggling a checkbox inside a multi-row selection
///   applies the new state to the rest of the selection
/// - Selection (row- or cell-based), sortable columns, vertical scrolling
///
/// State lives behind an `Arc<RwLock<_>>`; clones share it. All methods
/// take `&self`.
pub struct CheckTable<B: GridBackend = MemoryGrid> {
    /// Unique identifier.
    id: TableId,
    /// Internal state.
    pub(super) inner: Arc<RwLock<TableInner<B>>>,
    /// Dirty flag for re-render.
    pub(super) dirty: Arc<AtomicBool>,
}

impl CheckTable<MemoryGrid> {
    /// Create a table over a fresh in-memory grid with `rows` rows and
    /// `columns` logical columns.
    pub fn new(rows: usize, columns: usize) -> Self {
        Self::with_backend(MemoryGrid::new(rows, columns))
    }
}

impl<B: GridBackend> CheckTable<B> {
    /// Wrap an existing backend. The reserved column is inserted in front
    /// of the backend's columns; rows the backend already carries have no
    /// check cell until one is placed.
    pub fn with_backend(backend: B) -> Self {
        Self {
            id: TableId::new(),
            inner: Arc::new(RwLock::new(TableInner::new(backend))),
            dirty: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Set the style.
    pub fn with_style(self, style: GridStyle) -> Self {
        self.set_style(style);
        self
    }

    /// Set the selection mode.
    pub fn with_selection_mode(self, mode: SelectionMode) -> Self {
        if let Ok(mut guard) = self.inner.write() {
            guard.selection_mode = mode;
        }
        self
    }

    /// Set the selection behavior.
    pub fn with_selection_behavior(self, behavior: SelectionBehavior) -> Self {
        if let Ok(mut guard) = self.inner.write() {
            guard.selection_behavior = behavior;
        }
        self
    }

    /// Get the unique ID.
    pub fn id(&self) -> TableId {
        self.id
    }

    /// Get the ID as a string.
    pub fn id_string(&self) -> String {
        self.id.to_string()
    }

    // -------------------------------------------------------------------------
    // Rows and checkboxes
    // -------------------------------------------------------------------------

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.inner.read().map(|g| g.backend.row_count()).unwrap_or(0)
    }

    /// Check if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.row_count() == 0
    }

    /// Append a row: a check cell pre-set to `checked` in the reserved
    /// column, then one text cell per value, left to right.
    ///
    /// The pre-set state fires no change notification; the header
    /// aggregate is recomputed once at the end.
    pub fn add_row<V: ToString>(&self, values: impl IntoIterator<Item = V>, checked: bool) {
        if let Ok(mut guard) = self.inner.write() {
            let row = guard.backend.row_count();
            Self::insert_row_inner(&mut guard, row, values, checked);
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Insert a row at `row` instead of appending. Same semantics as
    /// [`Self::add_row`] otherwise.
    pub fn insert_row<V: ToString>(
        &self,
        row: usize,
        values: impl IntoIterator<Item = V>,
        checked: bool,
    ) {
        if let Ok(mut guard) = self.inner.write() {
            let row = row.min(guard.backend.row_count());
            Self::insert_row_inner(&mut guard, row, values, checked);
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Remove a row.
    ///
    /// The row's check notification is disconnected before the removal, so
    /// teardown itself triggers no propagation and no aggregate update.
    pub fn remove_row(&self, row: usize) {
        if let Ok(mut guard) = self.inner.write() {
            if row >= guard.backend.row_count() {
                return;
            }
            Self::remove_row_inner(&mut guard, row);
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Get a row's checkbox state. `None` when the row does not exist or
    /// carries no check cell.
    pub fn check_state(&self, row: usize) -> Option<bool> {
        self.inner
            .read()
            .ok()
            .and_then(|g| g.backend.check_cell(row, 0))
            .map(|cell| cell.checked)
    }

    /// Set a row's checkbox through the shared change handler, then
    /// recompute the header aggregate.
    pub fn set_check_state(&self, row: usize, checked: bool) {
        if let Ok(mut guard) = self.inner.write() {
            Self::set_checked_inner(&mut guard, row, checked);
            Self::recompute_header(&mut guard);
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Toggle a row's checkbox; the shared change handler updates the
    /// header. Returns the new state, or `None` without a check cell.
    pub fn toggle_check(&self, row: usize) -> Option<bool> {
        if let Ok(mut guard) = self.inner.write() {
            let cell = guard.backend.check_cell(row, 0)?;
            let next = !cell.checked;
            Self::set_checked_inner(&mut guard, row, next);
            self.dirty.store(true, Ordering::SeqCst);
            return Some(next);
        }
        None
    }

    /// Set every row's checkbox, the select-all path.
    ///
    /// Runs with the sync guard engaged: a `CheckChanged` event is emitted
    /// per actually-changed row, but per-row propagation is suppressed and
    /// the aggregate is recomputed once at the end.
    pub fn check_all(&self, checked: bool) {
        if let Ok(mut guard) = self.inner.write() {
            Self::check_all_inner(&mut guard, checked);
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Get the header checkbox's aggregate state.
    pub fn is_header_on(&self) -> bool {
        self.inner.read().map(|g| g.header.is_on()).unwrap_or(false)
    }

    /// Remove every row and every data column. The reserved column stays.
    pub fn clear(&self) {
        if let Ok(mut guard) = self.inner.write() {
            let had_selection = !guard.backend.selection().is_empty();
            for row in (0..guard.backend.row_count()).rev() {
                Self::remove_row_inner(&mut guard, row);
            }
            while guard.backend.column_count() > 1 {
                guard.backend.remove_column(1);
            }
            guard.delegates.clear();
            guard.sort = None;
            guard.pressed_cell = None;
            guard.scroll_offset_y = 0;
            if had_selection {
                guard.events.push(GridEvent::SelectionChanged);
            }
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Clear the text of every data cell. Rows, columns, and checkboxes
    /// keep their state.
    pub fn clear_contents(&self) {
        if let Ok(mut guard) = self.inner.write() {
            let rows = guard.backend.row_count();
            let columns = guard.backend.column_count();
            for row in 0..rows {
                for column in 1..columns {
                    guard.backend.set_cell_text(row, column, None);
                }
            }
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    // -------------------------------------------------------------------------
    // Shared change handler
    // -------------------------------------------------------------------------

    /// Set one row's checkbox, firing the shared change handler when the
    /// cell's notification is connected.
    pub(super) fn set_checked_inner(inner: &mut TableInner<B>, row: usize, checked: bool) {
        let Some(mut cell) = inner.backend.check_cell(row, 0) else {
            return;
        };
        if cell.checked == checked {
            return;
        }
        cell.checked = checked;
        let connected = cell.connected;
        inner.backend.set_check_cell(row, 0, Some(cell));
        inner.events.push(GridEvent::CheckChanged { row, checked });
        if connected {
            Self::on_check_changed(inner, row, checked);
        }
    }

    /// The handler every connected check cell reports into.
    ///
    /// Propagates the new state across the current selection when the
    /// changed row is part of it, then updates the header aggregate. Nested
    /// invocations from the propagation are dropped by the guard, not
    /// queued.
    fn on_check_changed(inner: &mut TableInner<B>, row: usize, checked: bool) {
        if inner.sync_in_progress {
            return;
        }
        inner.sync_in_progress = true;
        let selected = inner.backend.selection().selected_rows();
        if selected.contains(&row) {
            for other in selected {
                if other != row {
                    Self::set_checked_inner(inner, other, checked);
                }
            }
        }
        if checked {
            Self::recompute_header(inner);
        } else {
            // Short-circuit: one unchecked row can never aggregate to On.
            Self::set_header_on(inner, false);
        }
        inner.sync_in_progress = false;
    }

    pub(super) fn check_all_inner(inner: &mut TableInner<B>, checked: bool) {
        inner.sync_in_progress = true;
        for row in 0..inner.backend.row_count() {
            Self::set_checked_inner(inner, row, checked);
        }
        inner.sync_in_progress = false;
        Self::recompute_header(inner);
    }

    /// Recompute the header aggregate over every check cell. Rows without
    /// one contribute nothing; with no contributions the header is left
    /// untouched.
    fn recompute_header(inner: &mut TableInner<B>) {
        let states: Vec<bool> = (0..inner.backend.row_count())
            .filter_map(|row| inner.backend.check_cell(row, 0))
            .map(|cell| cell.checked)
            .collect();
        if let Some(state) = HeaderState::recompute(states) {
            Self::set_header_on(inner, state.is_on());
        }
    }

    fn set_header_on(inner: &mut TableInner<B>, on: bool) {
        if inner.header.is_on() != on {
            inner.header.set_on(on);
            inner.events.push(GridEvent::HeaderChanged { on });
        }
    }

    fn insert_row_inner<V: ToString>(
        inner: &mut TableInner<B>,
        row: usize,
        values: impl IntoIterator<Item = V>,
        checked: bool,
    ) {
        inner.backend.insert_row(row);
        inner.backend.set_check_cell(row, 0, Some(CheckCell::new(checked)));
        for (i, value) in values.into_iter().enumerate() {
            inner.backend.set_cell_text(row, i + 1, Some(value.to_string()));
        }
        Self::recompute_header(inner);
    }

    fn remove_row_inner(inner: &mut TableInner<B>, row: usize) {
        if let Some(mut cell) = inner.backend.check_cell(row, 0) {
            cell.connected = false;
            inner.backend.set_check_cell(row, 0, Some(cell));
        }
        inner.backend.remove_row(row);
    }

    // -------------------------------------------------------------------------
    // Cells
    // -------------------------------------------------------------------------

    /// Get a cell's text.
    pub fn cell_text(&self, row: usize, column: usize) -> Option<String> {
        self.inner
            .read()
            .ok()
            .and_then(|g| g.backend.cell_text(row, column + 1).map(str::to_string))
    }

    /// Set a cell's text.
    pub fn set_cell_text(&self, row: usize, column: usize, text: impl Into<String>) {
        if let Ok(mut guard) = self.inner.write() {
            guard.backend.set_cell_text(row, column + 1, Some(text.into()));
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Remove and return a cell's text.
    pub fn take_cell(&self, row: usize, column: usize) -> Option<String> {
        if let Ok(mut guard) = self.inner.write() {
            let text = guard.backend.take_cell_text(row, column + 1);
            if text.is_some() {
                self.dirty.store(true, Ordering::SeqCst);
            }
            return text;
        }
        None
    }

    // -------------------------------------------------------------------------
    // Columns
    // -------------------------------------------------------------------------

    /// Get the number of columns. The reserved column is not counted.
    pub fn column_count(&self) -> usize {
        self.inner
            .read()
            .map(|g| g.backend.column_count().saturating_sub(1))
            .unwrap_or(0)
    }

    /// Resize to `count` columns, not counting the reserved one.
    pub fn set_column_count(&self, count: usize) {
        if let Ok(mut guard) = self.inner.write() {
            guard.backend.set_column_count(count + 1);
            guard.delegates.retain(|&column, _| column <= count);
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Insert an empty column before `column`.
    pub fn insert_column(&self, column: usize) {
        if let Ok(mut guard) = self.inner.write() {
            let physical = column + 1;
            if physical > guard.backend.column_count() {
                return;
            }
            guard.backend.insert_column(physical);
            Self::shift_delegates(&mut guard.delegates, physical, true);
            if let Some((sorted, order)) = guard.sort
                && sorted >= column
            {
                guard.sort = Some((sorted + 1, order));
            }
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Remove a column.
    pub fn remove_column(&self, column: usize) {
        if let Ok(mut guard) = self.inner.write() {
            let physical = column + 1;
            if physical >= guard.backend.column_count() {
                return;
            }
            guard.backend.remove_column(physical);
            Self::shift_delegates(&mut guard.delegates, physical, false);
            guard.sort = match guard.sort {
                Some((sorted, order)) if sorted > column => Some((sorted - 1, order)),
                Some((sorted, _)) if sorted == column => None,
                other => other,
            };
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Get a column's width in terminal cells.
    pub fn column_width(&self, column: usize) -> u16 {
        self.inner
            .read()
            .map(|g| g.backend.column_width(column + 1))
            .unwrap_or(0)
    }

    /// Set a column's width.
    pub fn set_column_width(&self, column: usize, width: u16) {
        if let Ok(mut guard) = self.inner.write() {
            guard.backend.set_column_width(column + 1, width);
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Size a column to its widest cell text or header label, plus the
    /// one-cell gutter on each side.
    pub fn resize_column_to_contents(&self, column: usize) {
        if let Ok(mut guard) = self.inner.write() {
            let physical = column + 1;
            if physical >= guard.backend.column_count() {
                return;
            }
            let width = Self::content_width(&guard, physical);
            guard.backend.set_column_width(physical, width);
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Hide a column.
    pub fn hide_column(&self, column: usize) {
        self.set_column_hidden(column, true);
    }

    /// Show a previously hidden column.
    pub fn show_column(&self, column: usize) {
        self.set_column_hidden(column, false);
    }

    /// Set a column's hidden flag.
    pub fn set_column_hidden(&self, column: usize, hidden: bool) {
        if let Ok(mut guard) = self.inner.write() {
            guard.backend.set_column_hidden(column + 1, hidden);
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Check whether a column is hidden.
    pub fn is_column_hidden(&self, column: usize) -> bool {
        self.inner
            .read()
            .map(|g| g.backend.is_column_hidden(column + 1))
            .unwrap_or(false)
    }

    /// Select every cell of a column, replacing the current selection.
    pub fn select_column(&self, column: usize) {
        if let Ok(mut guard) = self.inner.write() {
            let rows = guard.backend.row_count();
            let physical = column + 1;
            if rows == 0
                || guard.selection_mode == SelectionMode::None
                || physical >= guard.backend.column_count()
            {
                return;
            }
            let range = SelectionRange::new(0, physical, rows - 1, physical);
            guard.backend.selection_mut().select_only(range);
            guard.events.push(GridEvent::SelectionChanged);
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    fn shift_delegates(
        delegates: &mut HashMap<usize, Arc<dyn CellDelegate>>,
        at: usize,
        insert: bool,
    ) {
        let shifted: HashMap<usize, Arc<dyn CellDelegate>> = delegates
            .drain()
            .filter_map(|(column, delegate)| {
                let column = if insert {
                    if column >= at { column + 1 } else { column }
                } else if column == at {
                    return None;
                } else if column > at {
                    column - 1
                } else {
                    column
                };
                Some((column, delegate))
            })
            .collect();
        *delegates = shifted;
    }

    fn content_width(inner: &TableInner<B>, physical: usize) -> u16 {
        let mut widest = inner
            .backend
            .header_label(physical)
            .map(display_width)
            .unwrap_or(0);
        for row in 0..inner.backend.row_count() {
            if let Some(text) = inner.backend.cell_text(row, physical) {
                widest = widest.max(display_width(text));
            }
        }
        (widest as u16).saturating_add(2).max(3)
    }

    // -------------------------------------------------------------------------
    // Header labels
    // -------------------------------------------------------------------------

    /// Get a column's header label.
    pub fn header_label(&self, column: usize) -> Option<String> {
        self.inner
            .read()
            .ok()
            .and_then(|g| g.backend.header_label(column + 1).map(str::to_string))
    }

    /// Set a column's header label.
    pub fn set_header_label(&self, column: usize, label: impl Into<String>) {
        if let Ok(mut guard) = self.inner.write() {
            guard.backend.set_header_label(column + 1, Some(label.into()));
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Remove and return a column's header label.
    pub fn take_header_label(&self, column: usize) -> Option<String> {
        if let Ok(mut guard) = self.inner.write() {
            let label = guard.backend.take_header_label(column + 1);
            if label.is_some() {
                self.dirty.store(true, Ordering::SeqCst);
            }
            return label;
        }
        None
    }

    /// Set all column labels at once, first label on the first data
    /// column. The reserved column shows the checkbox, never a label.
    pub fn set_header_labels<L: Into<String>>(&self, labels: impl IntoIterator<Item = L>) {
        if let Ok(mut guard) = self.inner.write() {
            guard.backend.set_header_label(0, None);
            for (i, label) in labels.into_iter().enumerate() {
                guard.backend.set_header_label(i + 1, Some(label.into()));
            }
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    // -------------------------------------------------------------------------
    // Spans
    // -------------------------------------------------------------------------

    /// Merge cells starting at (`row`, `column`).
    pub fn set_span(&self, row: usize, column: usize, row_span: usize, column_span: usize) {
        if let Ok(mut guard) = self.inner.write() {
            guard.backend.set_span(row, column + 1, row_span, column_span);
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Get a cell's row span (1 when unmerged).
    pub fn row_span(&self, row: usize, column: usize) -> usize {
        self.inner
            .read()
            .map(|g| g.backend.row_span(row, column + 1))
            .unwrap_or(1)
    }

    /// Get a cell's column span (1 when unmerged).
    pub fn column_span(&self, row: usize, column: usize) -> usize {
        self.inner
            .read()
            .map(|g| g.backend.column_span(row, column + 1))
            .unwrap_or(1)
    }

    // -------------------------------------------------------------------------
    // Sorting
    // -------------------------------------------------------------------------

    /// Enable or disable sorting on header clicks. Programmatic
    /// [`Self::sort_by_column`] works regardless.
    pub fn set_sorting_enabled(&self, enabled: bool) {
        if let Ok(mut guard) = self.inner.write() {
            guard.sorting_enabled = enabled;
        }
    }

    /// Check whether header-click sorting is enabled.
    pub fn is_sorting_enabled(&self) -> bool {
        self.inner.read().map(|g| g.sorting_enabled).unwrap_or(false)
    }

    /// Get current sort state (logical column, order).
    pub fn sort(&self) -> Option<(usize, SortOrder)> {
        self.inner.read().ok().and_then(|g| g.sort)
    }

    /// Reorder rows by a column's cell text. Selection ranges do not
    /// travel with the rows and are cleared.
    pub fn sort_by_column(&self, column: usize, order: SortOrder) {
        if let Ok(mut guard) = self.inner.write() {
            Self::sort_inner(&mut guard, column, order);
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    pub(super) fn sort_inner(inner: &mut TableInner<B>, column: usize, order: SortOrder) {
        if column + 1 >= inner.backend.column_count() {
            return;
        }
        inner.backend.sort_rows(column + 1, order);
        inner.sort = Some((column, order));
        if !inner.backend.selection().is_empty() {
            inner.backend.selection_mut().clear();
            inner.events.push(GridEvent::SelectionChanged);
        }
        inner.events.push(GridEvent::Sorted { column, order });
    }

    // -------------------------------------------------------------------------
    // Current cell
    // -------------------------------------------------------------------------

    /// Row of the current cell.
    pub fn current_row(&self) -> Option<usize> {
        self.inner
            .read()
            .ok()
            .and_then(|g| g.backend.current_cell())
            .map(|(row, _)| row)
    }

    /// Column of the current cell. `None` while the current cell sits on
    /// the reserved column or is unset.
    pub fn current_column(&self) -> Option<usize> {
        self.inner
            .read()
            .ok()
            .and_then(|g| g.backend.current_cell())
            .and_then(|(_, column)| column.checked_sub(1))
    }

    /// Move the current cell.
    pub fn set_current_cell(&self, row: usize, column: usize) {
        if let Ok(mut guard) = self.inner.write() {
            guard.backend.set_current_cell(Some((row, column + 1)));
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    /// Get the selection mode.
    pub fn selection_mode(&self) -> SelectionMode {
        self.inner
            .read()
            .map(|g| g.selection_mode)
            .unwrap_or_default()
    }

    /// Set the selection mode.
    pub fn set_selection_mode(&self, mode: SelectionMode) {
        if let Ok(mut guard) = self.inner.write() {
            guard.selection_mode = mode;
            if mode == SelectionMode::None && !guard.backend.selection().is_empty() {
                guard.backend.selection_mut().clear();
                guard.events.push(GridEvent::SelectionChanged);
            }
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Get the selection behavior.
    pub fn selection_behavior(&self) -> SelectionBehavior {
        self.inner
            .read()
            .map(|g| g.selection_behavior)
            .unwrap_or_default()
    }

    /// Set the selection behavior.
    pub fn set_selection_behavior(&self, behavior: SelectionBehavior) {
        if let Ok(mut guard) = self.inner.write() {
            guard.selection_behavior = behavior;
        }
    }

    /// Distinct selected rows, sorted ascending.
    pub fn selected_rows(&self) -> Vec<usize> {
        self.inner
            .read()
            .map(|g| g.backend.selection().selected_rows())
            .unwrap_or_default()
    }

    /// Selected ranges with column bounds remapped to logical. A range
    /// whose left bound is the reserved column clamps to logical 0.
    pub fn selected_ranges(&self) -> Vec<SelectionRange> {
        self.inner
            .read()
            .map(|g| {
                g.backend
                    .selection()
                    .ranges()
                    .iter()
                    .map(|range| SelectionRange {
                        top: range.top,
                        left: range.left.saturating_sub(1),
                        bottom: range.bottom,
                        right: range.right.saturating_sub(1),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Select or deselect a logical range.
    pub fn set_range_selected(&self, range: SelectionRange, selected: bool) {
        if let Ok(mut guard) = self.inner.write() {
            if guard.selection_mode == SelectionMode::None {
                return;
            }
            let physical = SelectionRange::new(
                range.top,
                range.left + 1,
                range.bottom,
                range.right + 1,
            );
            guard.backend.selection_mut().set_range_selected(physical, selected);
            guard.events.push(GridEvent::SelectionChanged);
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Clear the selection.
    pub fn clear_selection(&self) {
        if let Ok(mut guard) = self.inner.write()
            && !guard.backend.selection().is_empty()
        {
            guard.backend.selection_mut().clear();
            guard.events.push(GridEvent::SelectionChanged);
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    // -------------------------------------------------------------------------
    // Hit testing
    // -------------------------------------------------------------------------

    /// Logical column under a viewport x offset. `None` over the reserved
    /// column and past the last column.
    pub fn column_at(&self, x: u16) -> Option<usize> {
        self.inner
            .read()
            .ok()
            .and_then(|g| Self::physical_column_at(&g, x))
            .and_then(|column| column.checked_sub(1))
    }

    /// Resolve a viewport point to (row, logical column). `None` over the
    /// header row, the reserved column, and empty space.
    pub fn cell_at_point(&self, x: u16, y: u16) -> Option<(usize, usize)> {
        self.inner.read().ok().and_then(|g| {
            let (row, column) = Self::physical_cell_at(&g, x, y)?;
            Some((row, column.checked_sub(1)?))
        })
    }

    pub(super) fn physical_column_at(inner: &TableInner<B>, x: u16) -> Option<usize> {
        let mut cursor = 0u16;
        for column in 0..inner.backend.column_count() {
            if inner.backend.is_column_hidden(column) {
                continue;
            }
            let right = cursor.saturating_add(inner.backend.column_width(column));
            if x >= cursor && x < right {
                return Some(column);
            }
            cursor = right;
        }
        None
    }

    pub(super) fn physical_cell_at(
        inner: &TableInner<B>,
        x: u16,
        y: u16,
    ) -> Option<(usize, usize)> {
        if y == 0 {
            return None;
        }
        if inner.viewport_height > 0 && y >= inner.viewport_height {
            return None;
        }
        let row = inner.scroll_offset_y as usize + (y as usize - 1);
        if row >= inner.backend.row_count() {
            return None;
        }
        let column = Self::physical_column_at(inner, x)?;
        Some((row, column))
    }

    /// Refresh the header's section layout from the backend's column
    /// widths and visibility.
    pub(super) fn sync_header_sections(inner: &mut TableInner<B>) {
        let sections: Vec<(u16, bool)> = (0..inner.backend.column_count())
            .map(|column| {
                (
                    inner.backend.column_width(column),
                    inner.backend.is_column_hidden(column),
                )
            })
            .collect();
        inner.header.set_sections(sections);
    }

    // -------------------------------------------------------------------------
    // Vertical scrolling
    // -------------------------------------------------------------------------

    /// Get the vertical scroll offset (in rows).
    pub fn scroll_offset_y(&self) -> u16 {
        self.inner.read().map(|g| g.scroll_offset_y).unwrap_or(0)
    }

    /// Set the vertical scroll offset, clamped to the content.
    pub fn set_scroll_offset_y(&self, offset: u16) {
        if let Ok(mut guard) = self.inner.write() {
            let max_offset = Self::max_scroll_offset_y_inner(&guard);
            guard.scroll_offset_y = offset.min(max_offset);
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Set the viewport height, including the header row. Called by the
    /// renderer.
    pub fn set_viewport_height(&self, height: u16) {
        if let Ok(mut guard) = self.inner.write() {
            guard.viewport_height = height;
            let max_offset = Self::max_scroll_offset_y_inner(&guard);
            if guard.scroll_offset_y > max_offset {
                guard.scroll_offset_y = max_offset;
            }
        }
    }

    /// Get the viewport height.
    pub fn viewport_height(&self) -> u16 {
        self.inner.read().map(|g| g.viewport_height).unwrap_or(0)
    }

    /// Get the range of rows inside the data viewport.
    pub fn visible_row_range(&self) -> Range<usize> {
        self.inner
            .read()
            .map(|g| Self::visible_row_range_inner(&g))
            .unwrap_or(0..0)
    }

    pub(super) fn visible_row_range_inner(inner: &TableInner<B>) -> Range<usize> {
        let rows = inner.backend.row_count();
        if rows == 0 || inner.viewport_height <= 1 {
            return 0..0;
        }
        let start = inner.scroll_offset_y as usize;
        let data_viewport = inner.viewport_height.saturating_sub(1) as usize;
        start..(start + data_viewport).min(rows)
    }

    /// Scroll so a row is inside the data viewport.
    pub fn scroll_to_row(&self, row: usize) {
        if let Ok(mut guard) = self.inner.write() {
            if Self::scroll_to_row_inner(&mut guard, row) {
                self.dirty.store(true, Ordering::SeqCst);
            }
        }
    }

    pub(super) fn scroll_to_row_inner(inner: &mut TableInner<B>, row: usize) -> bool {
        if row >= inner.backend.row_count() {
            return false;
        }
        let data_viewport = inner.viewport_height.saturating_sub(1);
        if data_viewport == 0 {
            return false;
        }
        let row_top = row as u16;
        if row_top < inner.scroll_offset_y {
            inner.scroll_offset_y = row_top;
            true
        } else if row_top + 1 > inner.scroll_offset_y + data_viewport {
            inner.scroll_offset_y = (row_top + 1).saturating_sub(data_viewport);
            true
        } else {
            false
        }
    }

    pub(super) fn max_scroll_offset_y_inner(inner: &TableInner<B>) -> u16 {
        let total = inner.backend.row_count() as u16;
        let data_viewport = inner.viewport_height.saturating_sub(1);
        total.saturating_sub(data_viewport)
    }

    // -------------------------------------------------------------------------
    // Delegates
    // -------------------------------------------------------------------------

    /// Install a render delegate for one column.
    pub fn set_column_delegate(&self, column: usize, delegate: Arc<dyn CellDelegate>) {
        if let Ok(mut guard) = self.inner.write() {
            guard.delegates.insert(column + 1, delegate);
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Remove a column's render delegate.
    pub fn clear_column_delegate(&self, column: usize) {
        if let Ok(mut guard) = self.inner.write()
            && guard.delegates.remove(&(column + 1)).is_some()
        {
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Get a column's render delegate.
    pub fn column_delegate(&self, column: usize) -> Option<Arc<dyn CellDelegate>> {
        self.inner
            .read()
            .ok()
            .and_then(|g| g.delegates.get(&(column + 1)).cloned())
    }

    // -------------------------------------------------------------------------
    // Unadapted operations
    // -------------------------------------------------------------------------

    /// Every selected cell. Deliberately unadapted: coordinates are the
    /// backend's physical ones, the reserved column included.
    pub fn selected_cells(&self) -> Vec<(usize, usize)> {
        log::warn!("[table] selected_cells reports physical grid coordinates");
        self.inner
            .read()
            .map(|g| g.backend.selection().selected_cells())
            .unwrap_or_default()
    }

    /// Content-based width hint. Deliberately unadapted: `column` is a
    /// physical grid column, the reserved column included.
    pub fn size_hint_for_column(&self, column: usize) -> u16 {
        log::warn!("[table] size_hint_for_column takes a physical grid column");
        self.inner
            .read()
            .map(|g| Self::content_width(&g, column))
            .unwrap_or(0)
    }

    /// Scroll a cell into view. Deliberately unadapted: `column` is a
    /// physical grid column, and only the vertical component scrolls.
    pub fn scroll_to_cell(&self, row: usize, _column: usize) {
        log::warn!("[table] scroll_to_cell takes a physical grid column; scrolling vertically");
        self.scroll_to_row(row);
    }

    // -------------------------------------------------------------------------
    // Style
    // -------------------------------------------------------------------------

    /// Get the style.
    pub fn style(&self) -> GridStyle {
        self.inner.read().map(|g| g.style.clone()).unwrap_or_default()
    }

    /// Replace the style. The reserved column is resized to the new
    /// checkbox column width.
    pub fn set_style(&self, style: GridStyle) {
        if let Ok(mut guard) = self.inner.write() {
            guard.backend.set_column_width(0, style.check_column_width);
            guard.style = style;
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    // -------------------------------------------------------------------------
    // Events and dirty tracking
    // -------------------------------------------------------------------------

    /// Drain the pending notifications.
    pub fn take_events(&self) -> Vec<GridEvent> {
        self.inner
            .write()
            .map(|mut g| std::mem::take(&mut g.events))
            .unwrap_or_default()
    }

    /// Check if the table has changed since the last repaint.
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// Clear the dirty flag.
    pub fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::SeqCst);
    }
}

impl<B: GridBackend> Clone for CheckTable<B> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            inner: Arc::clone(&self.inner),
            dirty: Arc::clone(&self.dirty),
        }
    }
}

impl Default for CheckTable<MemoryGrid> {
    fn default() -> Self {
        Self::new(0, 0)
    }
}
