//! Rendering for the CheckTable widget.

use crate::buffer::Buffer;
use crate::geometry::Rect;
use crate::grid::{GridBackend, SortOrder};
use crate::selection::SelectionBehavior;
use crate::style::{CellStyle, GridStyle, TextAttrs};
use crate::text::{char_width, truncate_to_width};

use super::state::{CheckTable, TableInner};

/// A physical column with resolved screen geometry.
struct VisibleColumn {
    column: usize,
    x: u16,
    width: u16,
}

impl<B: GridBackend> CheckTable<B> {
    /// Paint the table into `area`.
    ///
    /// Row 0 of the area is the header; data rows follow, offset by the
    /// vertical scroll position. The reserved column renders each row's
    /// check glyph, data columns render cell text (filtered through the
    /// column delegate when one is set) with one leading pad cell.
    pub fn render(&self, buf: &mut Buffer, area: Rect) {
        let Ok(mut guard) = self.inner.write() else {
            return;
        };
        if area.is_empty() {
            return;
        }
        guard.viewport_height = area.height;
        let max_offset = Self::max_scroll_offset_y_inner(&guard);
        if guard.scroll_offset_y > max_offset {
            guard.scroll_offset_y = max_offset;
        }
        Self::sync_header_sections(&mut guard);

        let style = guard.style.clone();
        buf.fill_rect(area, style.foreground, style.background);

        let visible = Self::visible_columns(&guard, area);

        for section in &visible {
            let mut label = guard
                .backend
                .header_label(section.column)
                .map(str::to_string);
            if let Some((sorted, order)) = guard.sort
                && section.column == sorted + 1
            {
                let indicator = match order {
                    SortOrder::Ascending => '▲',
                    SortOrder::Descending => '▼',
                };
                let text = label.take().unwrap_or_default();
                label = Some(format!("{text} {indicator}"));
            }
            let rect = Rect::new(area.x + section.x, area.y, section.width, 1);
            guard
                .header
                .paint_section(buf, rect, section.column, label.as_deref(), &style);
        }

        let current = guard.backend.current_cell();
        for (i, row) in Self::visible_row_range_inner(&guard).enumerate() {
            let y = area.y + 1 + i as u16;
            if y >= area.bottom() {
                break;
            }
            // Row spans stay in the model; each row strip paints its own
            // cells. Column spans merge adjacent visible sections.
            let mut skip = 0usize;
            for (index, section) in visible.iter().enumerate() {
                if skip > 0 {
                    skip -= 1;
                    continue;
                }
                let mut width = section.width;
                let column_span = guard.backend.column_span(row, section.column);
                if column_span > 1 {
                    let limit = section.column + column_span;
                    for merged in &visible[index + 1..] {
                        if merged.column >= limit {
                            break;
                        }
                        width += merged.width;
                        skip += 1;
                    }
                }
                let rect = Rect::new(area.x + section.x, y, width, 1);
                let selected = match guard.selection_behavior {
                    SelectionBehavior::Rows => guard.backend.selection().is_row_selected(row),
                    SelectionBehavior::Cells => {
                        guard.backend.selection().is_selected(row, section.column)
                    }
                };
                let is_current = current == Some((row, section.column));
                if section.column == 0 {
                    Self::paint_check_cell(buf, rect, &guard, row, selected, is_current, &style);
                } else {
                    Self::paint_data_cell(buf, rect, &guard, row, section.column, selected, is_current, &style);
                }
            }
        }

        guard.header.clear_dirty();
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    fn paint_check_cell(
        buf: &mut Buffer,
        rect: Rect,
        inner: &TableInner<B>,
        row: usize,
        selected: bool,
        is_current: bool,
        style: &GridStyle,
    ) {
        let bg = if is_current {
            style.cursor_bg
        } else if selected {
            style.selection_bg
        } else {
            style.background
        };
        buf.fill_rect(rect, style.foreground, bg);
        let Some(cell) = inner.backend.check_cell(row, 0) else {
            return;
        };
        let glyph = if cell.checked {
            style.checked
        } else {
            style.unchecked
        };
        let glyph_width = char_width(glyph).max(1) as u16;
        let dx = rect.width.saturating_sub(glyph_width) / 2;
        let mut encoded = [0u8; 4];
        buf.draw_text(
            rect.x + dx,
            rect.y,
            glyph_width,
            glyph.encode_utf8(&mut encoded),
            style.foreground,
            bg,
            TextAttrs::new(),
        );
    }

    #[allow(clippy::too_many_arguments)]
    fn paint_data_cell(
        buf: &mut Buffer,
        rect: Rect,
        inner: &TableInner<B>,
        row: usize,
        column: usize,
        selected: bool,
        is_current: bool,
        style: &GridStyle,
    ) {
        let text = inner.backend.cell_text(row, column).unwrap_or("");
        let (display, cell_style) = match inner.delegates.get(&column) {
            Some(delegate) => (delegate.display_text(row, text), delegate.cell_style(row, text)),
            None => (text.to_string(), CellStyle::new()),
        };
        let fg = cell_style.fg.unwrap_or(style.foreground);
        let bg = if is_current {
            style.cursor_bg
        } else if selected {
            style.selection_bg
        } else {
            cell_style.bg.unwrap_or(style.background)
        };
        buf.fill_rect(rect, fg, bg);
        if rect.width > 1 {
            let display = truncate_to_width(&display, (rect.width - 1) as usize);
            buf.draw_text(rect.x + 1, rect.y, rect.width - 1, &display, fg, bg, cell_style.attrs);
        }
    }

    fn visible_columns(inner: &TableInner<B>, area: Rect) -> Vec<VisibleColumn> {
        let mut columns = Vec::new();
        let mut x = 0u16;
        for column in 0..inner.backend.column_count() {
            if inner.backend.is_column_hidden(column) {
                continue;
            }
            if x >= area.width {
                break;
            }
            let width = inner.backend.column_width(column).min(area.width - x);
            columns.push(VisibleColumn { column, x, width });
            x += width;
        }
        columns
    }
}
