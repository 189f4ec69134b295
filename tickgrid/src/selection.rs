//! Selection state for grid backends.
//!
//! Selection is tracked as a list of rectangular cell ranges in physical
//! grid coordinates. The table decorator remaps range bounds when reporting
//! them to callers; the backend only ever sees physical columns.

use std::collections::BTreeSet;

/// How many items may be selected at once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SelectionMode {
    /// No selection allowed.
    None,
    /// Single cell or row selection.
    Single,
    /// Multiple selection (Ctrl+click toggle, Shift+range).
    #[default]
    Multiple,
}

/// Whether clicks select whole rows or individual cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SelectionBehavior {
    #[default]
    Rows,
    Cells,
}

/// A rectangular, inclusive range of cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionRange {
    pub top: usize,
    pub left: usize,
    pub bottom: usize,
    pub right: usize,
}

impl SelectionRange {
    /// Create a normalized range from two corners.
    pub fn new(top: usize, left: usize, bottom: usize, right: usize) -> Self {
        Self {
            top: top.min(bottom),
            left: left.min(right),
            bottom: top.max(bottom),
            right: left.max(right),
        }
    }

    pub fn single(row: usize, column: usize) -> Self {
        Self::new(row, column, row, column)
    }

    pub fn contains(&self, row: usize, column: usize) -> bool {
        row >= self.top && row <= self.bottom && column >= self.left && column <= self.right
    }

    pub fn row_count(&self) -> usize {
        self.bottom - self.top + 1
    }

    pub fn column_count(&self) -> usize {
        self.right - self.left + 1
    }

    fn intersects(&self, other: &SelectionRange) -> bool {
        self.top <= other.bottom
            && self.bottom >= other.top
            && self.left <= other.right
            && self.right >= other.left
    }

    /// Subtract `other`, yielding the up to four residual rectangles.
    fn subtract(&self, other: &SelectionRange) -> Vec<SelectionRange> {
        if !self.intersects(other) {
            return vec![*self];
        }
        let mut parts = Vec::new();
        // Band above.
        if self.top < other.top {
            parts.push(SelectionRange::new(
                self.top,
                self.left,
                other.top - 1,
                self.right,
            ));
        }
        // Band below.
        if self.bottom > other.bottom {
            parts.push(SelectionRange::new(
                other.bottom + 1,
                self.left,
                self.bottom,
                self.right,
            ));
        }
        let band_top = self.top.max(other.top);
        let band_bottom = self.bottom.min(other.bottom);
        // Left remainder.
        if self.left < other.left {
            parts.push(SelectionRange::new(
                band_top,
                self.left,
                band_bottom,
                other.left - 1,
            ));
        }
        // Right remainder.
        if self.right > other.right {
            parts.push(SelectionRange::new(
                band_top,
                other.right + 1,
                band_bottom,
                self.right,
            ));
        }
        parts
    }
}

/// Range-based selection state.
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    ranges: Vec<SelectionRange>,
    /// Starting cell for Shift+range selection.
    anchor: Option<(usize, usize)>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ranges(&self) -> &[SelectionRange] {
        &self.ranges
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn anchor(&self) -> Option<(usize, usize)> {
        self.anchor
    }

    pub fn set_anchor(&mut self, row: usize, column: usize) {
        self.anchor = Some((row, column));
    }

    pub fn clear(&mut self) {
        self.ranges.clear();
        self.anchor = None;
    }

    pub fn is_selected(&self, row: usize, column: usize) -> bool {
        self.ranges.iter().any(|r| r.contains(row, column))
    }

    pub fn is_row_selected(&self, row: usize) -> bool {
        self.ranges.iter().any(|r| row >= r.top && row <= r.bottom)
    }

    /// Distinct rows covered by the selection, sorted ascending.
    pub fn selected_rows(&self) -> Vec<usize> {
        let mut rows = BTreeSet::new();
        for range in &self.ranges {
            rows.extend(range.top..=range.bottom);
        }
        rows.into_iter().collect()
    }

    /// Every selected cell, row-major, deduplicated.
    pub fn selected_cells(&self) -> Vec<(usize, usize)> {
        let mut cells = BTreeSet::new();
        for range in &self.ranges {
            for row in range.top..=range.bottom {
                for column in range.left..=range.right {
                    cells.insert((row, column));
                }
            }
        }
        cells.into_iter().collect()
    }

    pub fn set_range_selected(&mut self, range: SelectionRange, selected: bool) {
        if selected {
            self.ranges.push(range);
        } else {
            self.ranges = self
                .ranges
                .iter()
                .flat_map(|r| r.subtract(&range))
                .collect();
        }
    }

    /// Replace the whole selection with a single range.
    pub fn select_only(&mut self, range: SelectionRange) {
        self.ranges.clear();
        self.ranges.push(range);
    }

    /// Shift ranges after a row insertion at `row`.
    pub fn on_row_inserted(&mut self, row: usize) {
        for range in &mut self.ranges {
            if range.top >= row {
                range.top += 1;
            }
            if range.bottom >= row {
                range.bottom += 1;
            }
        }
    }

    /// Shrink or shift ranges after removing `row`.
    pub fn on_row_removed(&mut self, row: usize) {
        let mut kept = Vec::with_capacity(self.ranges.len());
        for range in self.ranges.drain(..) {
            let mut range = range;
            if range.top > row {
                range.top -= 1;
                range.bottom -= 1;
            } else if range.bottom >= row {
                if range.top == range.bottom {
                    continue; // the removed row was the whole range
                }
                range.bottom -= 1;
            }
            kept.push(range);
        }
        self.ranges = kept;
        self.anchor = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_is_normalized() {
        let range = SelectionRange::new(5, 3, 2, 1);
        assert_eq!((range.top, range.left, range.bottom, range.right), (2, 1, 5, 3));
    }

    #[test]
    fn test_deselect_splits_range() {
        let mut sel = SelectionState::new();
        sel.set_range_selected(SelectionRange::new(0, 0, 4, 4), true);
        sel.set_range_selected(SelectionRange::new(1, 1, 2, 2), false);

        assert!(sel.is_selected(0, 0));
        assert!(sel.is_selected(4, 4));
        assert!(sel.is_selected(1, 0), "left band survives");
        assert!(sel.is_selected(1, 3), "right band survives");
        assert!(!sel.is_selected(1, 1));
        assert!(!sel.is_selected(2, 2));
    }

    #[test]
    fn test_selected_rows_deduplicates_overlap() {
        let mut sel = SelectionState::new();
        sel.set_range_selected(SelectionRange::new(1, 0, 3, 0), true);
        sel.set_range_selected(SelectionRange::new(2, 0, 5, 2), true);
        assert_eq!(sel.selected_rows(), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_row_removal_shrinks_and_shifts() {
        let mut sel = SelectionState::new();
        sel.set_range_selected(SelectionRange::new(2, 0, 4, 1), true);
        sel.on_row_removed(3);
        assert_eq!(sel.selected_rows(), vec![2, 3]);

        sel.on_row_removed(0);
        assert_eq!(sel.selected_rows(), vec![1, 2]);
    }

    #[test]
    fn test_single_row_range_vanishes_on_removal() {
        let mut sel = SelectionState::new();
        sel.set_range_selected(SelectionRange::single(2, 0), true);
        sel.on_row_removed(2);
        assert!(sel.is_empty());
    }
}
