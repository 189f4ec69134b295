use std::sync::Arc;

use tickgrid::{
    Buffer, CellDelegate, CellStyle, CheckTable, GridStyle, Modifiers, MouseButton, Rect, Rgb,
    SortOrder,
};

fn render(table: &CheckTable, width: u16, height: u16) -> Buffer {
    let mut buf = Buffer::new(width, height);
    table.render(&mut buf, Rect::from_size(width, height));
    buf
}

// Default geometry: reserved column x 0..3 with the glyph at x=1, first
// data column x 3..15 with text from x=4.

// ============================================================================
// Check Glyphs
// ============================================================================

#[test]
fn test_render_draws_check_glyphs() {
    let table = CheckTable::new(0, 1);
    table.add_row(["a"], true);
    table.add_row(["b"], false);
    let style = GridStyle::default();

    let buf = render(&table, 20, 4);
    assert_eq!(buf.get(1, 0).unwrap().char, style.unchecked, "header glyph");
    assert_eq!(buf.get(1, 1).unwrap().char, style.checked);
    assert_eq!(buf.get(1, 2).unwrap().char, style.unchecked);
}

#[test]
fn test_render_header_glyph_follows_aggregate() {
    let table = CheckTable::new(0, 1);
    table.add_row(["a"], false);
    table.check_all(true);

    let buf = render(&table, 20, 3);
    assert_eq!(buf.get(1, 0).unwrap().char, GridStyle::default().checked);
}

#[test]
fn test_render_pressed_header_checkbox_is_reversed() {
    let table = CheckTable::new(0, 1);
    table.add_row(["a"], false);
    table.handle_mouse_press(1, 0, MouseButton::Left, Modifiers::new());

    let buf = render(&table, 20, 3);
    assert!(buf.get(1, 0).unwrap().attrs.reverse, "held header checkbox renders reversed");
}

// ============================================================================
// Cell Text
// ============================================================================

#[test]
fn test_render_draws_cell_text_with_gutter() {
    let table = CheckTable::new(0, 2);
    table.add_row(["abc", "xyz"], false);

    let buf = render(&table, 30, 3);
    assert_eq!(buf.get(3, 1).unwrap().char, ' ', "one-cell gutter before text");
    assert_eq!(buf.get(4, 1).unwrap().char, 'a');
    assert_eq!(buf.get(16, 1).unwrap().char, 'x', "second column starts after the first");
}

#[test]
fn test_render_truncates_long_text() {
    let table = CheckTable::new(0, 1);
    table.add_row(["abcdefghijklmnop"], false);

    let buf = render(&table, 20, 3);
    assert_eq!(buf.get(14, 1).unwrap().char, '…', "clipped cell text ends in an ellipsis");
}

#[test]
fn test_render_header_labels_and_sort_indicator() {
    let table = CheckTable::new(0, 1);
    table.add_row(["b"], false);
    table.add_row(["a"], false);
    table.set_header_labels(["Name"]);
    table.sort_by_column(0, SortOrder::Ascending);

    let buf = render(&table, 20, 4);
    assert_eq!(buf.get(4, 0).unwrap().char, 'N');
    assert_eq!(buf.get(9, 0).unwrap().char, '▲', "sort indicator follows the label");
}

// ============================================================================
// Selection and Cursor
// ============================================================================

#[test]
fn test_render_selection_and_cursor_backgrounds() {
    let table = CheckTable::new(0, 2);
    table.add_row(["a", "b"], false);
    table.add_row(["c", "d"], false);
    table.handle_mouse_press(4, 1, MouseButton::Left, Modifiers::new());
    table.handle_mouse_release(4, 1, MouseButton::Left);
    let style = GridStyle::default();

    let buf = render(&table, 30, 4);
    assert_eq!(buf.get(4, 1).unwrap().bg, style.cursor_bg, "current cell");
    assert_eq!(buf.get(16, 1).unwrap().bg, style.selection_bg, "rest of the selected row");
    assert_eq!(buf.get(1, 1).unwrap().bg, style.selection_bg, "reserved column joins the highlight");
    assert_eq!(buf.get(4, 2).unwrap().bg, style.background, "unselected row keeps the base color");
}

// ============================================================================
// Layout
// ============================================================================

#[test]
fn test_render_hidden_column_collapses() {
    let table = CheckTable::new(0, 2);
    table.add_row(["aa", "bb"], false);
    table.hide_column(0);

    let buf = render(&table, 30, 3);
    assert_eq!(buf.get(4, 1).unwrap().char, 'b', "second column moves up against the reserved one");
}

#[test]
fn test_render_scrolled_rows() {
    let table = CheckTable::new(0, 1);
    for i in 0..5 {
        table.add_row([format!("row{i}")], false);
    }
    // First render fixes the viewport height, then the scroll target is known.
    render(&table, 20, 3);
    table.scroll_to_row(4);

    let buf = render(&table, 20, 3);
    assert_eq!(buf.get(7, 1).unwrap().char, '3', "rows 3 and 4 fill the two data lines");
    assert_eq!(buf.get(7, 2).unwrap().char, '4');
}

#[test]
fn test_render_column_span_merges_sections() {
    let table = CheckTable::new(0, 2);
    table.add_row(["left", "right"], false);
    table.set_span(0, 0, 1, 2);

    let buf = render(&table, 30, 3);
    assert_eq!(buf.get(4, 1).unwrap().char, 'l');
    assert_eq!(buf.get(16, 1).unwrap().char, ' ', "covered cell paints no text of its own");
}

// ============================================================================
// Delegates
// ============================================================================

struct Money;

impl CellDelegate for Money {
    fn display_text(&self, _row: usize, text: &str) -> String {
        format!("${text}")
    }

    fn cell_style(&self, _row: usize, text: &str) -> CellStyle {
        if text.starts_with('-') {
            CellStyle::new().fg(Rgb::new(255, 80, 80))
        } else {
            CellStyle::new()
        }
    }
}

#[test]
fn test_render_applies_column_delegate() {
    let table = CheckTable::new(0, 1);
    table.add_row(["12"], false);
    table.add_row(["-3"], false);
    table.set_column_delegate(0, Arc::new(Money));

    let buf = render(&table, 20, 4);
    assert_eq!(buf.get(4, 1).unwrap().char, '$');
    assert_eq!(buf.get(5, 1).unwrap().char, '1');
    assert_eq!(buf.get(4, 2).unwrap().fg, Rgb::new(255, 80, 80), "negative amount colored");
    assert_eq!(buf.get(4, 1).unwrap().fg, GridStyle::default().foreground);
}
