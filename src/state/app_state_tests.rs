//! Tests for AppState.
//!
//! These tests verify pure state transitions without any TUI dependencies.

use super::*;
use crate::model::column::columns_from_header;
use chrono::NaiveDate;

// ===== Test Helpers =====

fn make_state(header: &[&str], rows: &[&[&str]]) -> AppState {
    let rows: Vec<Row> = rows
        .iter()
        .enumerate()
        .map(|(i, cells)| Row::new(cells.iter().map(|c| c.to_string()).collect(), i + 1))
        .collect();
    let header: Vec<String> = header.iter().map(|h| h.to_string()).collect();
    let columns = columns_from_header(&header, &rows);
    AppState::new(RowStore::new(columns, rows))
}

fn five_rows() -> AppState {
    make_state(
        &["details"],
        &[&["alpha"], &["error one"], &["beta"], &["error two"], &["gamma"]],
    )
}

fn timed_rows() -> AppState {
    make_state(
        &["time", "details"],
        &[
            &["2024-06-01 10:00:00", "first"],
            &["2024-06-01 11:00:00", "second"],
            &["not a time", "third"],
            &["2024-06-01 12:00:00", "fourth"],
        ],
    )
}

fn at(hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, 1)
        .and_then(|d| d.and_hms_opt(hour, 0, 0))
        .unwrap()
}

fn current_details(state: &AppState) -> String {
    state
        .current_row()
        .map(|row| row.content())
        .unwrap_or_default()
}

// ===== AppState::new Tests =====

#[test]
fn new_state_shows_every_row_with_cursor_at_top() {
    let state = five_rows();
    assert_eq!(state.visible(), &[0, 1, 2, 3, 4]);
    assert_eq!(state.cursor(), Some(0));
    assert_eq!(state.mode, InputMode::View);
}

#[test]
fn empty_store_has_no_cursor() {
    let state = make_state(&["details"], &[]);
    assert!(state.visible().is_empty());
    assert_eq!(state.cursor(), None);
    assert!(state.current_row().is_none());
}

#[test]
fn untimed_dataset_has_no_time_bounds() {
    assert!(five_rows().time_bounds().is_none());
    assert!(five_rows().time_window_editor().is_err());
}

// ===== Filter Tests =====

#[test]
fn filter_keeps_matching_rows_and_cursor_falls_back_to_top() {
    // GIVEN the cursor on "alpha"
    let mut state = five_rows();

    // WHEN filtering on "error"
    state.set_filter_pattern("error").unwrap();

    // THEN only the error rows remain and the cursor lands on the first
    assert_eq!(state.visible(), &[1, 3]);
    assert_eq!(state.cursor(), Some(0));
    assert_eq!(current_details(&state), "error one");
}

#[test]
fn filter_keeps_cursor_on_same_row_when_it_survives() {
    let mut state = five_rows();
    state.move_cursor(3);
    assert_eq!(current_details(&state), "error two");

    state.set_filter_pattern("ERROR").unwrap();

    assert_eq!(state.cursor(), Some(1));
    assert_eq!(current_details(&state), "error two");
}

#[test]
fn invalid_filter_leaves_state_untouched() {
    let mut state = five_rows();
    state.set_filter_pattern("beta").unwrap();

    assert!(state.set_filter_pattern("(unclosed").is_err());

    assert_eq!(state.filter().pattern, "beta");
    assert_eq!(state.visible(), &[2]);
}

#[test]
fn clearing_filter_restores_all_rows_and_keeps_row() {
    let mut state = five_rows();
    state.set_filter_pattern("error").unwrap();
    state.move_cursor(1);

    state.clear_filter();

    assert_eq!(state.visible().len(), 5);
    assert_eq!(current_details(&state), "error two");
}

#[test]
fn filter_with_no_matches_empties_cursor() {
    let mut state = five_rows();
    state.set_filter_pattern("zzz").unwrap();
    assert_eq!(state.cursor(), None);
}

// ===== Mark Tests =====

#[test]
fn mark_survives_filter_round_trip() {
    // GIVEN the third row marked amber
    let mut state = five_rows();
    state.move_cursor(2);
    assert_eq!(state.set_mark(MarkColor::Amber), Some(3));

    // WHEN a filter hides it and is then cleared
    state.set_filter_pattern("error").unwrap();
    state.clear_filter();

    // THEN the mark is still there
    let id = state.visible_row(2).unwrap().id();
    assert_eq!(state.store().mark(id), MarkColor::Amber);
}

#[test]
fn marks_only_shows_marked_rows() {
    let mut state = five_rows();
    state.move_cursor(1);
    state.set_mark(MarkColor::Red);
    state.move_cursor(2);
    state.set_mark(MarkColor::Green);

    assert!(state.toggle_marks_only());
    assert_eq!(state.visible(), &[1, 3]);
    assert_eq!(current_details(&state), "error two");

    assert!(!state.toggle_marks_only());
    assert_eq!(state.visible().len(), 5);
}

#[test]
fn clearing_mark_under_marks_only_drops_row() {
    let mut state = five_rows();
    state.move_cursor(4);
    state.set_mark(MarkColor::Red);
    state.toggle_marks_only();

    state.set_mark(MarkColor::None);

    assert!(state.visible().is_empty());
    assert_eq!(state.cursor(), None);
}

#[test]
fn next_and_previous_mark_do_not_wrap() {
    let mut state = five_rows();
    state.move_cursor(1);
    state.set_mark(MarkColor::Red);
    state.move_cursor(2);
    state.set_mark(MarkColor::Green);
    state.jump_to_start();

    assert!(state.jump_to_next_mark());
    assert_eq!(state.cursor(), Some(1));
    assert!(state.jump_to_next_mark());
    assert_eq!(state.cursor(), Some(3));
    assert!(!state.jump_to_next_mark());
    assert_eq!(state.cursor(), Some(3));

    assert!(state.jump_to_previous_mark());
    assert_eq!(state.cursor(), Some(1));
    assert!(!state.jump_to_previous_mark());
}

// ===== Comment Tests =====

#[test]
fn comment_keeps_typed_text_and_empty_removes() {
    let mut state = five_rows();
    assert!(state.set_comment("  check this  "));
    assert_eq!(state.current_comment(), Some("  check this  "));

    assert!(state.set_comment(""));
    assert_eq!(state.current_comment(), None);
}

#[test]
fn whitespace_only_comment_removes() {
    let mut state = five_rows();
    state.set_comment("note");

    assert!(state.set_comment("   \t"));

    assert_eq!(state.current_comment(), None);
    assert!(state.store().comments().is_empty());
}

#[test]
fn comment_without_row_is_refused() {
    let mut state = make_state(&["details"], &[]);
    assert!(!state.set_comment("x"));
}

// ===== Navigation Tests =====

#[test]
fn cursor_moves_clamp_to_list() {
    let mut state = five_rows();
    state.move_cursor(-3);
    assert_eq!(state.cursor(), Some(0));
    state.move_cursor(99);
    assert_eq!(state.cursor(), Some(4));
}

#[test]
fn paging_uses_recorded_page_size() {
    let mut state = five_rows();
    state.record_page_size(2);

    state.page_down();
    assert_eq!(state.cursor(), Some(2));
    state.page_down();
    state.page_down();
    assert_eq!(state.cursor(), Some(4));
    state.page_up();
    assert_eq!(state.cursor(), Some(2));
}

#[test]
fn page_size_never_drops_below_one() {
    let mut state = five_rows();
    state.record_page_size(0);
    state.page_down();
    assert_eq!(state.cursor(), Some(1));
}

#[test]
fn jump_to_line_reports_outcomes() {
    let mut state = five_rows();
    assert_eq!(state.jump_to_line(4), JumpOutcome::Moved);
    assert_eq!(current_details(&state), "error two");

    assert_eq!(state.jump_to_line(0), JumpOutcome::OutOfBounds);
    assert_eq!(state.jump_to_line(6), JumpOutcome::OutOfBounds);

    state.set_filter_pattern("error").unwrap();
    assert_eq!(state.jump_to_line(3), JumpOutcome::NotInFilter);
    assert_eq!(current_details(&state), "error two");
}

// ===== Search Tests =====

#[test]
fn search_wraps_and_ignores_case() {
    let mut state = five_rows();
    state.set_search_query("ERROR");

    assert!(state.search_next());
    assert_eq!(state.cursor(), Some(1));
    assert!(state.search_next());
    assert_eq!(state.cursor(), Some(3));
    assert!(state.search_next());
    assert_eq!(state.cursor(), Some(1));

    assert!(state.search_prev());
    assert_eq!(state.cursor(), Some(3));
}

#[test]
fn search_without_match_leaves_cursor() {
    let mut state = five_rows();
    state.move_cursor(2);
    state.set_search_query("nothing here");
    assert!(!state.search_next());
    assert_eq!(state.cursor(), Some(2));
}

// ===== Time Window Tests =====

#[test]
fn time_window_excludes_untimed_rows() {
    // GIVEN rows at 10:00, 11:00, an unparsable time, and 12:00
    let mut state = timed_rows();
    let bounds = state.time_bounds().unwrap();
    assert_eq!((bounds.min, bounds.max), (at(10), at(12)));

    // WHEN the window covers 10:30 to 12:00
    let start = at(10) + Duration::minutes(30);
    state.apply_time_window(start, at(12)).unwrap();

    // THEN only the 11:00 and 12:00 rows pass
    assert_eq!(state.visible(), &[1, 3]);

    state.disable_time_window();
    assert_eq!(state.visible().len(), 4);
}

#[test]
fn time_window_is_clamped_to_bounds() {
    let mut state = timed_rows();
    state.apply_time_window(at(6), at(23)).unwrap();
    assert_eq!(state.filter().time_window.start, Some(at(10)));
    assert_eq!(state.filter().time_window.end, Some(at(12)));
}

#[test]
fn reversed_time_window_is_rejected() {
    let mut state = timed_rows();
    assert_eq!(
        state.apply_time_window(at(12), at(10)),
        Err(TimeWindowError::StartAfterEnd)
    );
    assert!(!state.filter().time_window.enabled);
}

#[test]
fn reversed_window_past_the_bounds_is_rejected() {
    // GIVEN: timestamps span 10:00 - 12:00
    let mut state = timed_rows();

    // WHEN: both ends lie after the last timestamp, start later than end
    let result = state.apply_time_window(at(16), at(14));

    // THEN: rejected rather than collapsed onto the upper bound
    assert_eq!(result, Err(TimeWindowError::StartAfterEnd));
    assert!(!state.filter().time_window.enabled);
    assert_eq!(state.visible().len(), 4);
}

// ===== Overlay Merge Tests =====

#[test]
fn merge_applies_only_present_identities() {
    let mut state = five_rows();
    let present = state.visible_row(0).unwrap().id();
    let absent = RowId::from_cells(&["not loaded"]);

    let marks = HashMap::from([(present, MarkColor::Green), (absent, MarkColor::Red)]);
    let applied = state.merge_overlays(marks, HashMap::new());

    assert_eq!(applied, 1);
    assert_eq!(state.store().mark(present), MarkColor::Green);
    assert_eq!(state.store().mark(absent), MarkColor::None);
}

// ===== Notice Tests =====

#[test]
fn notify_queues_a_ticket_per_notice() {
    let mut state = five_rows();
    state.notify(NoticeKind::Info, "one");
    state.notify(NoticeKind::Success, "two");

    let tickets = state.take_notice_tickets();
    assert_eq!(tickets.len(), 2);
    assert!(state.take_notice_tickets().is_empty());
    assert_eq!(state.notice.display().as_deref(), Some("✓ two"));
}

// ===== Layout Tests =====

#[test]
fn recompute_layout_fits_columns_after_gutter() {
    let mut state = timed_rows();
    state.recompute_layout(100, 20);

    let total: usize = state
        .store()
        .columns()
        .iter()
        .filter(|c| c.visible)
        .map(|c| c.width)
        .sum();
    assert!(total <= 100 - gutter_width(4));
    assert_eq!(state.table_height(), 20);
}
