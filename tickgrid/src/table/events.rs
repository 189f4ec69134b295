//! Event handling for the CheckTable widget.

use std::sync::atomic::Ordering;

use crate::event::{EventResult, GridEvent, Key, Modifiers, MouseButton};
use crate::grid::{GridBackend, SortOrder};
use crate::header::HeaderEvent;
use crate::selection::{SelectionBehavior, SelectionMode, SelectionRange};

use super::state::{CheckTable, TableInner};

impl<B: GridBackend> CheckTable<B> {
    /// Handle a mouse press at viewport coordinates.
    ///
    /// Presses on the reserved column are recorded for the release but
    /// move neither the current cell nor the selection; presses on data
    /// cells run the default press handling (cursor move plus selection
    /// per modifiers).
    pub fn handle_mouse_press(
        &self,
        x: u16,
        y: u16,
        button: MouseButton,
        modifiers: Modifiers,
    ) -> EventResult {
        if button != MouseButton::Left {
            return EventResult::Ignored;
        }
        let Ok(mut guard) = self.inner.write() else {
            return EventResult::Ignored;
        };
        if y == 0 {
            Self::sync_header_sections(&mut guard);
            guard.header.on_press(x, button);
            self.dirty.store(true, Ordering::SeqCst);
            return EventResult::Consumed;
        }
        let Some((row, column)) = Self::physical_cell_at(&guard, x, y) else {
            guard.pressed_cell = None;
            if modifiers.none() && !guard.backend.selection().is_empty() {
                guard.backend.selection_mut().clear();
                guard.events.push(GridEvent::SelectionChanged);
                self.dirty.store(true, Ordering::SeqCst);
            }
            return EventResult::Consumed;
        };
        guard.pressed_cell = Some((row, column));
        if column == 0 {
            // Reserved column: the press is only the first half of a
            // checkbox click, nothing else may react to it.
            return EventResult::Consumed;
        }
        guard.backend.set_current_cell(Some((row, column)));
        Self::apply_press_selection(&mut guard, row, column, modifiers);
        self.dirty.store(true, Ordering::SeqCst);
        EventResult::Consumed
    }

    /// Handle a mouse release at viewport coordinates.
    ///
    /// A press/release pair on the same reserved-column cell toggles that
    /// row's checkbox; anything else is click-cancel. Header releases
    /// complete select-all toggles and sort clicks.
    pub fn handle_mouse_release(&self, x: u16, y: u16, button: MouseButton) -> EventResult {
        if button != MouseButton::Left {
            return EventResult::Ignored;
        }
        let Ok(mut guard) = self.inner.write() else {
            return EventResult::Ignored;
        };
        if y == 0 {
            Self::sync_header_sections(&mut guard);
            match guard.header.on_release(x, button) {
                Some(HeaderEvent::SelectAll(checked)) => {
                    guard.events.push(GridEvent::SelectAll { checked });
                    Self::check_all_inner(&mut guard, checked);
                }
                Some(HeaderEvent::SectionClicked(section)) => {
                    Self::handle_section_click(&mut guard, section);
                }
                None => {}
            }
            guard.pressed_cell = None;
            self.dirty.store(true, Ordering::SeqCst);
            return EventResult::Consumed;
        }
        if guard.header.cancel_press() {
            self.dirty.store(true, Ordering::SeqCst);
        }
        let pressed = guard.pressed_cell.take();
        let released = Self::physical_cell_at(&guard, x, y);
        if let (Some(pressed), Some(released)) = (pressed, released)
            && pressed == released
            && released.1 == 0
            && let Some(cell) = guard.backend.check_cell(released.0, 0)
        {
            Self::set_checked_inner(&mut guard, released.0, !cell.checked);
            self.dirty.store(true, Ordering::SeqCst);
        }
        EventResult::Consumed
    }

    /// Track hover over the header checkbox.
    pub fn handle_mouse_move(&self, x: u16, y: u16) {
        if let Ok(mut guard) = self.inner.write() {
            if y == 0 {
                Self::sync_header_sections(&mut guard);
                guard.header.on_mouse_move(x);
            } else {
                guard.header.clear_hover();
            }
            if guard.header.is_dirty() {
                self.dirty.store(true, Ordering::SeqCst);
            }
        }
    }

    /// Handle a key press.
    ///
    /// Space on the reserved column toggles the row checkbox; elsewhere
    /// it toggles row selection in multi-select. Arrows, Home/End, and
    /// PageUp/PageDown move the current cell; Left may enter the reserved
    /// column. Ctrl+A selects every row, Escape clears the selection.
    pub fn handle_key(&self, key: Key, modifiers: Modifiers) -> EventResult {
        let Ok(mut guard) = self.inner.write() else {
            return EventResult::Ignored;
        };
        match key {
            Key::Char(' ') if modifiers.none() => {
                if let Some((row, 0)) = guard.backend.current_cell()
                    && let Some(cell) = guard.backend.check_cell(row, 0)
                {
                    Self::set_checked_inner(&mut guard, row, !cell.checked);
                    self.dirty.store(true, Ordering::SeqCst);
                    return EventResult::Consumed;
                }
                if guard.selection_mode == SelectionMode::Multiple
                    && let Some((row, column)) = guard.backend.current_cell()
                {
                    let range = Self::selection_range_for(&guard, row, row, column, column);
                    let selected = Self::is_hit_selected(&guard, row, column);
                    guard.backend.selection_mut().set_range_selected(range, !selected);
                    guard.events.push(GridEvent::SelectionChanged);
                    self.dirty.store(true, Ordering::SeqCst);
                    return EventResult::Consumed;
                }
                EventResult::Ignored
            }
            Key::Char('a') if modifiers.ctrl => {
                let rows = guard.backend.row_count();
                if guard.selection_mode != SelectionMode::Multiple || rows == 0 {
                    return EventResult::Ignored;
                }
                let right = guard.backend.column_count().saturating_sub(1);
                let range = SelectionRange::new(0, 0, rows - 1, right);
                guard.backend.selection_mut().select_only(range);
                guard.events.push(GridEvent::SelectionChanged);
                self.dirty.store(true, Ordering::SeqCst);
                EventResult::Consumed
            }
            Key::Escape => {
                if guard.backend.selection().is_empty() {
                    return EventResult::Ignored;
                }
                guard.backend.selection_mut().clear();
                guard.events.push(GridEvent::SelectionChanged);
                self.dirty.store(true, Ordering::SeqCst);
                EventResult::Consumed
            }
            Key::Up | Key::Down | Key::Home | Key::End | Key::PageUp | Key::PageDown
                if modifiers.none() =>
            {
                Self::move_cursor_vertical(&mut guard, key);
                self.dirty.store(true, Ordering::SeqCst);
                EventResult::Consumed
            }
            Key::Left | Key::Right if modifiers.none() => {
                Self::move_cursor_horizontal(&mut guard, key);
                self.dirty.store(true, Ordering::SeqCst);
                EventResult::Consumed
            }
            _ => EventResult::Ignored,
        }
    }

    /// Scroll the data viewport by `delta` rows (negative scrolls up).
    pub fn handle_scroll(&self, delta: i16) -> EventResult {
        let Ok(mut guard) = self.inner.write() else {
            return EventResult::Ignored;
        };
        let max_offset = Self::max_scroll_offset_y_inner(&guard);
        let next = (guard.scroll_offset_y as i32 + delta as i32).clamp(0, max_offset as i32) as u16;
        if next != guard.scroll_offset_y {
            guard.scroll_offset_y = next;
            self.dirty.store(true, Ordering::SeqCst);
        }
        EventResult::Consumed
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    fn handle_section_click(inner: &mut TableInner<B>, section: usize) {
        if !inner.sorting_enabled {
            return;
        }
        let Some(column) = section.checked_sub(1) else {
            return;
        };
        let order = match inner.sort {
            Some((sorted, order)) if sorted == column => order.reversed(),
            _ => SortOrder::Ascending,
        };
        Self::sort_inner(inner, column, order);
    }

    fn apply_press_selection(
        inner: &mut TableInner<B>,
        row: usize,
        column: usize,
        modifiers: Modifiers,
    ) {
        match inner.selection_mode {
            SelectionMode::None => return,
            SelectionMode::Single => {
                if modifiers.ctrl && Self::is_hit_selected(inner, row, column) {
                    inner.backend.selection_mut().clear();
                } else {
                    let range = Self::selection_range_for(inner, row, row, column, column);
                    inner.backend.selection_mut().select_only(range);
                }
                inner.backend.selection_mut().set_anchor(row, column);
            }
            SelectionMode::Multiple => {
                if modifiers.shift {
                    let (anchor_row, anchor_column) =
                        inner.backend.selection().anchor().unwrap_or((row, column));
                    let range = Self::selection_range_for(
                        inner,
                        anchor_row,
                        row,
                        anchor_column,
                        column,
                    );
                    if modifiers.ctrl {
                        inner.backend.selection_mut().set_range_selected(range, true);
                    } else {
                        inner.backend.selection_mut().select_only(range);
                    }
                } else {
                    let range = Self::selection_range_for(inner, row, row, column, column);
                    if modifiers.ctrl {
                        let selected = Self::is_hit_selected(inner, row, column);
                        inner.backend.selection_mut().set_range_selected(range, !selected);
                    } else {
                        inner.backend.selection_mut().select_only(range);
                    }
                    inner.backend.selection_mut().set_anchor(row, column);
                }
            }
        }
        inner.events.push(GridEvent::SelectionChanged);
    }

    fn is_hit_selected(inner: &TableInner<B>, row: usize, column: usize) -> bool {
        match inner.selection_behavior {
            SelectionBehavior::Rows => inner.backend.selection().is_row_selected(row),
            SelectionBehavior::Cells => inner.backend.selection().is_selected(row, column),
        }
    }

    pub(super) fn selection_range_for(
        inner: &TableInner<B>,
        row_a: usize,
        row_b: usize,
        column_a: usize,
        column_b: usize,
    ) -> SelectionRange {
        match inner.selection_behavior {
            SelectionBehavior::Rows => {
                let right = inner.backend.column_count().saturating_sub(1);
                SelectionRange::new(row_a, 0, row_b, right)
            }
            SelectionBehavior::Cells => SelectionRange::new(row_a, column_a, row_b, column_b),
        }
    }

    fn move_cursor_vertical(inner: &mut TableInner<B>, key: Key) {
        let rows = inner.backend.row_count();
        if rows == 0 {
            return;
        }
        let page = inner.viewport_height.saturating_sub(1).max(1) as usize;
        let current = inner.backend.current_cell();
        let column = current
            .map(|(_, column)| column)
            .unwrap_or_else(|| Self::first_data_column(inner));
        let row = match (key, current) {
            (Key::Up, Some((row, _))) => row.saturating_sub(1),
            (Key::Down, Some((row, _))) => (row + 1).min(rows - 1),
            (Key::PageUp, Some((row, _))) => row.saturating_sub(page),
            (Key::PageDown, Some((row, _))) => (row + page).min(rows - 1),
            (Key::Home, _) => 0,
            (Key::End, _) => rows - 1,
            (_, None) => 0,
            _ => return,
        };
        inner.backend.set_current_cell(Some((row, column)));
        Self::scroll_to_row_inner(inner, row);
    }

    fn move_cursor_horizontal(inner: &mut TableInner<B>, key: Key) {
        let Some((row, column)) = inner.backend.current_cell() else {
            if inner.backend.row_count() > 0 {
                let column = Self::first_data_column(inner);
                inner.backend.set_current_cell(Some((0, column)));
            }
            return;
        };
        let columns = inner.backend.column_count();
        let next = match key {
            Key::Left => (0..column).rev().find(|&c| !inner.backend.is_column_hidden(c)),
            Key::Right => (column + 1..columns).find(|&c| !inner.backend.is_column_hidden(c)),
            _ => None,
        };
        if let Some(next) = next {
            inner.backend.set_current_cell(Some((row, next)));
        }
    }

    /// First visible physical column after the reserved one, falling back
    /// to the reserved column itself.
    fn first_data_column(inner: &TableInner<B>) -> usize {
        (1..inner.backend.column_count())
            .find(|&column| !inner.backend.is_column_hidden(column))
            .unwrap_or(0)
    }
}
