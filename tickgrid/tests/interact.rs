use tickgrid::{
    CheckTable, EventResult, GridEvent, Key, Modifiers, MouseButton, SelectionMode, SortOrder,
};

// Default geometry: the reserved column covers x 0..3, the first data
// column x 3..15, the second x 15..27. The header is y=0 and row `r`
// sits at y = r + 1 until scrolled.

fn rows_table(rows: usize) -> CheckTable {
    let table = CheckTable::new(0, 2);
    for i in 0..rows {
        table.add_row([format!("a{i}"), format!("b{i}")], false);
    }
    table.take_events();
    table
}

fn click(table: &CheckTable, x: u16, y: u16) {
    table.handle_mouse_press(x, y, MouseButton::Left, Modifiers::new());
    table.handle_mouse_release(x, y, MouseButton::Left);
}

fn click_with(table: &CheckTable, x: u16, y: u16, modifiers: Modifiers) {
    table.handle_mouse_press(x, y, MouseButton::Left, modifiers);
    table.handle_mouse_release(x, y, MouseButton::Left);
}

// ============================================================================
// Checkbox Clicks
// ============================================================================

#[test]
fn test_click_on_reserved_column_toggles_row() {
    let table = rows_table(2);

    click(&table, 1, 1);
    assert_eq!(table.check_state(0), Some(true));
    assert_eq!(table.check_state(1), Some(false));

    click(&table, 1, 1);
    assert_eq!(table.check_state(0), Some(false));
}

#[test]
fn test_checkbox_click_leaves_cursor_and_selection_alone() {
    let table = rows_table(2);
    click(&table, 1, 1);
    assert_eq!(table.current_row(), None, "checkbox clicks never move the current cell");
    assert!(table.selected_rows().is_empty());
}

#[test]
fn test_release_elsewhere_cancels_checkbox_click() {
    let table = rows_table(2);

    // Press on the checkbox, release on the data cell of the same row.
    table.handle_mouse_press(1, 1, MouseButton::Left, Modifiers::new());
    table.handle_mouse_release(4, 1, MouseButton::Left);
    assert_eq!(table.check_state(0), Some(false));

    // Press on row 0's checkbox, release on row 1's.
    table.handle_mouse_press(1, 1, MouseButton::Left, Modifiers::new());
    table.handle_mouse_release(1, 2, MouseButton::Left);
    assert_eq!(table.check_state(0), Some(false));
    assert_eq!(table.check_state(1), Some(false));
}

#[test]
fn test_checkbox_click_propagates_across_selection() {
    let table = rows_table(4);
    click(&table, 4, 1);
    click_with(&table, 4, 4, Modifiers::shift());
    assert_eq!(table.selected_rows(), vec![0, 1, 2, 3]);

    click(&table, 1, 2);
    for row in 0..4 {
        assert_eq!(table.check_state(row), Some(true), "row {row} follows the selection");
    }
    assert!(table.is_header_on());
}

#[test]
fn test_right_button_is_ignored() {
    let table = rows_table(1);
    let result = table.handle_mouse_press(1, 1, MouseButton::Right, Modifiers::new());
    assert_eq!(result, EventResult::Ignored);
    table.handle_mouse_release(1, 1, MouseButton::Right);
    assert_eq!(table.check_state(0), Some(false));
}

// ============================================================================
// Header Clicks
// ============================================================================

#[test]
fn test_header_click_toggles_everything() {
    let table = rows_table(3);

    click(&table, 1, 0);
    assert!(table.is_header_on());
    assert_eq!(
        (0..3).filter_map(|row| table.check_state(row)).filter(|&c| c).count(),
        3
    );
    assert!(table.take_events().contains(&GridEvent::SelectAll { checked: true }));

    click(&table, 1, 0);
    assert!(!table.is_header_on());
    assert_eq!(table.check_state(0), Some(false));
}

#[test]
fn test_header_release_outside_checkbox_cancels() {
    let table = rows_table(2);
    table.handle_mouse_press(1, 0, MouseButton::Left, Modifiers::new());
    table.handle_mouse_release(6, 0, MouseButton::Left);
    assert!(!table.is_header_on(), "cancelled header click toggles nothing");
    assert_eq!(table.check_state(0), Some(false));
}

#[test]
fn test_header_press_with_body_release_cancels() {
    let table = rows_table(2);
    table.handle_mouse_press(1, 0, MouseButton::Left, Modifiers::new());
    table.handle_mouse_release(1, 1, MouseButton::Left);
    assert!(!table.is_header_on());
    assert_eq!(table.check_state(0), Some(false), "no checkbox toggles across rows");
}

#[test]
fn test_unchecking_one_row_after_select_all() {
    let table = rows_table(3);
    click(&table, 1, 0);
    assert!(table.is_header_on());

    click(&table, 1, 2);
    assert_eq!(table.check_state(1), Some(false));
    assert_eq!(table.check_state(0), Some(true));
    assert!(!table.is_header_on());
}

// ============================================================================
// Selection via Mouse
// ============================================================================

#[test]
fn test_data_click_moves_cursor_and_selects_row() {
    let table = rows_table(3);
    click(&table, 4, 2);
    assert_eq!(table.current_row(), Some(1));
    assert_eq!(table.current_column(), Some(0));
    assert_eq!(table.selected_rows(), vec![1]);
}

#[test]
fn test_ctrl_click_toggles_selection() {
    let table = rows_table(3);
    click(&table, 4, 1);
    click_with(&table, 4, 3, Modifiers::ctrl());
    assert_eq!(table.selected_rows(), vec![0, 2]);

    click_with(&table, 4, 3, Modifiers::ctrl());
    assert_eq!(table.selected_rows(), vec![0]);
}

#[test]
fn test_shift_click_selects_range_from_anchor() {
    let table = rows_table(4);
    click(&table, 4, 1);
    click_with(&table, 4, 3, Modifiers::shift());
    assert_eq!(table.selected_rows(), vec![0, 1, 2]);

    // Shift again extends from the same anchor.
    click_with(&table, 4, 4, Modifiers::shift());
    assert_eq!(table.selected_rows(), vec![0, 1, 2, 3]);
}

#[test]
fn test_click_on_empty_area_clears_selection() {
    let table = rows_table(2);
    click(&table, 4, 1);
    assert!(!table.selected_rows().is_empty());

    table.handle_mouse_press(4, 5, MouseButton::Left, Modifiers::new());
    assert!(table.selected_rows().is_empty());
}

#[test]
fn test_selection_mode_none_blocks_selection_only() {
    let table = rows_table(2).with_selection_mode(SelectionMode::None);
    click(&table, 4, 1);
    assert!(table.selected_rows().is_empty());
    assert_eq!(table.current_row(), Some(0), "cursor still moves");

    click(&table, 1, 1);
    assert_eq!(table.check_state(0), Some(true), "checkbox clicks still work");
}

#[test]
fn test_single_mode_keeps_one_row() {
    let table = rows_table(3).with_selection_mode(SelectionMode::Single);
    click(&table, 4, 1);
    click_with(&table, 4, 3, Modifiers::ctrl());
    assert_eq!(table.selected_rows(), vec![2]);
}

// ============================================================================
// Keyboard
// ============================================================================

#[test]
fn test_space_toggles_checkbox_on_reserved_column() {
    let table = rows_table(2);
    table.set_current_cell(0, 0);
    table.handle_key(Key::Left, Modifiers::new());

    let result = table.handle_key(Key::Char(' '), Modifiers::new());
    assert_eq!(result, EventResult::Consumed);
    assert_eq!(table.check_state(0), Some(true));
    assert_eq!(table.check_state(1), Some(false));
}

#[test]
fn test_space_on_data_cell_toggles_row_selection() {
    let table = rows_table(2);
    table.set_current_cell(0, 0);

    table.handle_key(Key::Char(' '), Modifiers::new());
    assert_eq!(table.selected_rows(), vec![0]);
    assert_eq!(table.check_state(0), Some(false), "data-cell space does not check");

    table.handle_key(Key::Char(' '), Modifiers::new());
    assert!(table.selected_rows().is_empty());
}

#[test]
fn test_arrow_navigation_moves_current_cell() {
    let table = rows_table(3);

    table.handle_key(Key::Down, Modifiers::new());
    assert_eq!(table.current_row(), Some(0), "first key lands on the first row");
    assert_eq!(table.current_column(), Some(0));

    table.handle_key(Key::Down, Modifiers::new());
    assert_eq!(table.current_row(), Some(1));

    table.handle_key(Key::End, Modifiers::new());
    assert_eq!(table.current_row(), Some(2));
    table.handle_key(Key::Down, Modifiers::new());
    assert_eq!(table.current_row(), Some(2), "clamped at the last row");

    table.handle_key(Key::Home, Modifiers::new());
    assert_eq!(table.current_row(), Some(0));

    table.handle_key(Key::Right, Modifiers::new());
    assert_eq!(table.current_column(), Some(1));
    table.handle_key(Key::Right, Modifiers::new());
    assert_eq!(table.current_column(), Some(1), "clamped at the last column");
}

#[test]
fn test_ctrl_a_selects_all_rows_and_escape_clears() {
    let table = rows_table(3);
    assert_eq!(
        table.handle_key(Key::Char('a'), Modifiers::ctrl()),
        EventResult::Consumed
    );
    assert_eq!(table.selected_rows(), vec![0, 1, 2]);

    assert_eq!(table.handle_key(Key::Escape, Modifiers::new()), EventResult::Consumed);
    assert!(table.selected_rows().is_empty());
    assert_eq!(
        table.handle_key(Key::Escape, Modifiers::new()),
        EventResult::Ignored,
        "nothing left to clear"
    );
}

#[test]
fn test_page_keys_use_viewport_height() {
    let table = rows_table(10);
    table.set_viewport_height(5);
    table.handle_key(Key::Down, Modifiers::new());

    table.handle_key(Key::PageDown, Modifiers::new());
    assert_eq!(table.current_row(), Some(4));
    table.handle_key(Key::PageDown, Modifiers::new());
    assert_eq!(table.current_row(), Some(8));
    table.handle_key(Key::PageUp, Modifiers::new());
    assert_eq!(table.current_row(), Some(4));
}

// ============================================================================
// Sorting via Header
// ============================================================================

fn unsorted_table() -> CheckTable {
    let table = CheckTable::new(0, 1);
    for value in ["b", "a", "c"] {
        table.add_row([value], false);
    }
    table.take_events();
    table
}

#[test]
fn test_sort_click_cycles_order() {
    let table = unsorted_table();
    table.set_sorting_enabled(true);

    click(&table, 4, 0);
    assert_eq!(table.cell_text(0, 0), Some("a".to_string()));
    assert_eq!(table.sort(), Some((0, SortOrder::Ascending)));

    click(&table, 4, 0);
    assert_eq!(table.cell_text(0, 0), Some("c".to_string()));
    assert_eq!(table.sort(), Some((0, SortOrder::Descending)));
    assert!(table
        .take_events()
        .contains(&GridEvent::Sorted { column: 0, order: SortOrder::Descending }));
}

#[test]
fn test_sort_click_disabled_by_default() {
    let table = unsorted_table();

    click(&table, 4, 0);
    assert_eq!(table.cell_text(0, 0), Some("b".to_string()), "header clicks sort only when enabled");
    assert_eq!(table.sort(), None);

    table.sort_by_column(0, SortOrder::Ascending);
    assert_eq!(table.cell_text(0, 0), Some("a".to_string()));
}

#[test]
fn test_sort_moves_checkboxes_and_clears_selection() {
    let table = CheckTable::new(0, 1);
    table.add_row(["b"], true);
    table.add_row(["a"], false);
    click(&table, 4, 1);
    assert_eq!(table.selected_rows(), vec![0]);

    table.sort_by_column(0, SortOrder::Ascending);
    assert_eq!(table.check_state(0), Some(false));
    assert_eq!(table.check_state(1), Some(true), "the check travels with its row");
    assert!(table.selected_rows().is_empty(), "selection does not follow sorted rows");
}

// ============================================================================
// Scrolling
// ============================================================================

#[test]
fn test_scroll_clamps_to_content() {
    let table = rows_table(10);
    table.set_viewport_height(4);

    table.handle_scroll(5);
    assert_eq!(table.scroll_offset_y(), 5);

    table.handle_scroll(100);
    assert_eq!(table.scroll_offset_y(), 7, "ten rows minus three visible");

    table.handle_scroll(-100);
    assert_eq!(table.scroll_offset_y(), 0);
}

#[test]
fn test_clicks_land_on_scrolled_rows() {
    let table = rows_table(10);
    table.set_viewport_height(4);
    table.set_scroll_offset_y(5);

    assert_eq!(table.cell_at_point(4, 1), Some((5, 0)));
    assert_eq!(table.cell_at_point(4, 3), Some((7, 0)));
    assert_eq!(table.cell_at_point(4, 4), None, "below the viewport");

    click(&table, 1, 1);
    assert_eq!(table.check_state(5), Some(true), "clicks land on the scrolled row");
    assert_eq!(table.check_state(0), Some(false));
}

#[test]
fn test_cursor_navigation_keeps_row_visible() {
    let table = rows_table(10);
    table.set_viewport_height(4);
    table.handle_key(Key::End, Modifiers::new());
    assert_eq!(table.current_row(), Some(9));
    assert_eq!(table.scroll_offset_y(), 7, "viewport follows the cursor down");

    table.handle_key(Key::Home, Modifiers::new());
    assert_eq!(table.scroll_offset_y(), 0, "and back up");
}
