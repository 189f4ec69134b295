use tickgrid::{CheckTable, GridEvent, SelectionRange};

fn table_with_checks(states: &[bool]) -> CheckTable {
    let table = CheckTable::new(0, 1);
    for (i, &checked) in states.iter().enumerate() {
        table.add_row([format!("row{i}")], checked);
    }
    table.take_events();
    table
}

fn checked_rows(table: &CheckTable) -> Vec<bool> {
    (0..table.row_count())
        .map(|row| table.check_state(row).unwrap())
        .collect()
}

fn changed_rows(events: &[GridEvent]) -> Vec<usize> {
    events
        .iter()
        .filter_map(|event| match event {
            GridEvent::CheckChanged { row, .. } => Some(*row),
            _ => None,
        })
        .collect()
}

// ============================================================================
// Row Construction and Teardown
// ============================================================================

#[test]
fn test_add_row_applies_initial_check_state_silently() {
    let table = CheckTable::new(0, 1);
    table.add_row(["a"], true);
    table.add_row(["b"], false);

    assert_eq!(table.check_state(0), Some(true));
    assert_eq!(table.check_state(1), Some(false));

    let events = table.take_events();
    assert!(
        changed_rows(&events).is_empty(),
        "pre-set check cells fire no change notification"
    );
}

#[test]
fn test_insert_row_recomputes_aggregate() {
    let table = table_with_checks(&[true, true]);
    assert!(table.is_header_on());

    table.insert_row(1, ["mid"], false);
    assert_eq!(table.check_state(1), Some(false));
    assert!(!table.is_header_on(), "new unchecked row turns the aggregate off");
}

#[test]
fn test_remove_row_updates_nothing() {
    // Rows 0 and 1 checked, row 2 not: the header reads off.
    let table = table_with_checks(&[true, true, false]);
    assert!(!table.is_header_on());

    table.remove_row(2);
    assert_eq!(table.row_count(), 2);
    assert!(!table.is_header_on(), "removal does not recompute the aggregate");
    assert!(table.take_events().is_empty());
}

#[test]
fn test_remove_selected_row_does_not_propagate() {
    let table = table_with_checks(&[false, true, false]);
    table.set_range_selected(SelectionRange::new(0, 0, 2, 0), true);
    table.take_events();

    table.remove_row(1);
    assert_eq!(
        checked_rows(&table),
        vec![false, false],
        "tearing down the checked row flips no other checkbox"
    );
}

#[test]
fn test_missing_rows_are_inert() {
    let table = CheckTable::new(0, 1);
    assert_eq!(table.check_state(0), None);
    assert_eq!(table.toggle_check(0), None);
    table.set_check_state(0, true);
    assert_eq!(table.row_count(), 0);
}

// ============================================================================
// Header Aggregate
// ============================================================================

#[test]
fn test_header_turns_on_when_last_row_checked() {
    let table = table_with_checks(&[false, false, false]);

    table.set_check_state(0, true);
    table.set_check_state(1, true);
    assert!(!table.is_header_on(), "partially checked table reads off");

    table.set_check_state(2, true);
    assert!(table.is_header_on());
    assert!(table.take_events().contains(&GridEvent::HeaderChanged { on: true }));
}

#[test]
fn test_header_turns_off_on_first_uncheck() {
    let table = table_with_checks(&[true, true, true]);
    assert!(table.is_header_on());

    table.set_check_state(1, false);
    assert!(!table.is_header_on());
    assert!(table.take_events().contains(&GridEvent::HeaderChanged { on: false }));
}

#[test]
fn test_empty_table_has_no_aggregate() {
    let table = CheckTable::new(0, 2);
    table.check_all(true);
    assert!(!table.is_header_on(), "no rows, no aggregate");
    assert!(table.take_events().is_empty());
}

// ============================================================================
// Select-All
// ============================================================================

#[test]
fn test_check_all_checks_every_row_and_header() {
    let table = table_with_checks(&[false, false, false]);

    table.check_all(true);
    assert_eq!(checked_rows(&table), vec![true, true, true]);
    assert!(table.is_header_on());

    table.check_all(false);
    assert_eq!(checked_rows(&table), vec![false, false, false]);
    assert!(!table.is_header_on());
}

#[test]
fn test_check_all_reports_only_changed_rows() {
    let table = table_with_checks(&[false, true, false]);

    table.check_all(true);
    assert_eq!(
        changed_rows(&table.take_events()),
        vec![0, 2],
        "the already-checked row fires nothing"
    );
}

#[test]
fn test_check_all_ignores_selection() {
    // Rows 0 and 1 selected; select-all must not re-enter the propagation
    // path and must still reach the unselected row.
    let table = table_with_checks(&[false, false, false]);
    table.set_range_selected(SelectionRange::new(0, 0, 1, 0), true);
    table.take_events();

    table.check_all(true);
    assert_eq!(checked_rows(&table), vec![true, true, true]);
    assert_eq!(changed_rows(&table.take_events()), vec![0, 1, 2]);
}

// ============================================================================
// Selection Propagation
// ============================================================================

#[test]
fn test_toggle_inside_selection_propagates() {
    let table = table_with_checks(&[false, false, false, false, false]);
    table.set_range_selected(SelectionRange::new(1, 0, 1, 0), true);
    table.set_range_selected(SelectionRange::new(3, 0, 4, 0), true);

    assert_eq!(table.toggle_check(3), Some(true));
    assert_eq!(checked_rows(&table), vec![false, true, false, true, true]);
}

#[test]
fn test_toggle_outside_selection_stays_isolated() {
    let table = table_with_checks(&[false, false, false, false, false]);
    table.set_range_selected(SelectionRange::new(0, 0, 1, 0), true);

    table.toggle_check(3);
    assert_eq!(checked_rows(&table), vec![false, false, false, true, false]);
}

#[test]
fn test_propagation_fires_one_change_per_row() {
    let table = table_with_checks(&[false, false, false]);
    table.set_range_selected(SelectionRange::new(0, 0, 2, 0), true);
    table.take_events();

    table.toggle_check(1);

    let events = table.take_events();
    assert_eq!(changed_rows(&events).len(), 3, "one change per selected row, no cascade");
    assert!(events.contains(&GridEvent::HeaderChanged { on: true }));
    assert!(table.is_header_on());
}

#[test]
fn test_unchecking_inside_selection_propagates_too() {
    let table = table_with_checks(&[true, true, true]);
    table.set_range_selected(SelectionRange::new(0, 0, 1, 0), true);

    table.set_check_state(0, false);
    assert_eq!(checked_rows(&table), vec![false, false, true]);
    assert!(!table.is_header_on());
}

#[test]
fn test_set_check_state_unchanged_is_quiet() {
    let table = table_with_checks(&[false]);
    table.set_check_state(0, false);
    assert!(changed_rows(&table.take_events()).is_empty());
}
