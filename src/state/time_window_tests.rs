//! Tests for the time-window editor.

use super::*;
use chrono::NaiveDate;

fn at(hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, 1)
        .and_then(|d| d.and_hms_opt(hour, minute, 0))
        .unwrap()
}

fn bounds() -> TimeBounds {
    TimeBounds {
        min: at(8, 0),
        max: at(18, 0),
    }
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn editor() -> TimeWindowEditor {
    TimeWindowEditor::open(bounds(), &TimeWindow::default(), default_step())
}

fn set_fields(editor: &mut TimeWindowEditor, start: &str, end: &str) {
    editor.start = LineInput::new(start);
    editor.end = LineInput::new(end);
}

// ===== bounds =====

#[test]
fn bounds_span_present_timestamps() {
    let times = vec![Some(at(12, 0)), None, Some(at(9, 30)), Some(at(17, 0))];
    let bounds = TimeBounds::from_times(&times).unwrap();
    assert_eq!(bounds.min, at(9, 30));
    assert_eq!(bounds.max, at(17, 0));
}

#[test]
fn bounds_are_none_without_timestamps() {
    let times: Vec<Option<NaiveDateTime>> = vec![None, None];
    assert!(TimeBounds::from_times(&times).is_none());
}

#[test]
fn validate_clamps_and_orders() {
    let (start, end) = bounds().validate(at(6, 0), at(20, 0)).unwrap();
    assert_eq!((start, end), (at(8, 0), at(18, 0)));
    assert_eq!(
        bounds().validate(at(12, 0), at(11, 0)),
        Err(TimeWindowError::StartAfterEnd)
    );
}

#[test]
fn validate_checks_order_before_clamping() {
    assert_eq!(
        bounds().validate(at(6, 0), at(5, 0)),
        Err(TimeWindowError::StartAfterEnd)
    );
    assert_eq!(
        bounds().validate(at(21, 0), at(19, 0)),
        Err(TimeWindowError::StartAfterEnd)
    );
}

// ===== opening =====

#[test]
fn open_without_window_seeds_full_bounds() {
    let editor = editor();
    assert_eq!(editor.start.text(), "2024-06-01 08:00:00");
    assert_eq!(editor.end.text(), "2024-06-01 18:00:00");
    assert_eq!(editor.focus, TimeField::Start);
}

#[test]
fn open_with_active_window_seeds_it() {
    let window = TimeWindow::between(at(10, 0), at(11, 0));
    let editor = TimeWindowEditor::open(bounds(), &window, default_step());
    assert_eq!(editor.draft(), (at(10, 0), at(11, 0)));
}

// ===== keys =====

#[test]
fn tab_cycles_focus_both_ways() {
    let mut editor = editor();
    editor.handle_key(key(KeyCode::Tab));
    assert_eq!(editor.focus, TimeField::End);
    editor.handle_key(key(KeyCode::Tab));
    assert_eq!(editor.focus, TimeField::Scrubber);
    editor.handle_key(key(KeyCode::Tab));
    assert_eq!(editor.focus, TimeField::Start);
    editor.handle_key(KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT));
    assert_eq!(editor.focus, TimeField::Scrubber);
}

#[test]
fn enter_applies_valid_draft() {
    let mut editor = editor();
    set_fields(&mut editor, "2024-06-01 10:00:00", "2024-06-01 11:00:00");
    assert_eq!(
        editor.handle_key(key(KeyCode::Enter)),
        EditorOutcome::Apply {
            start: at(10, 0),
            end: at(11, 0)
        }
    );
}

#[test]
fn enter_rejects_bad_start() {
    let mut editor = editor();
    set_fields(&mut editor, "10 o'clock", "2024-06-01 11:00:00");
    assert_eq!(
        editor.handle_key(key(KeyCode::Enter)),
        EditorOutcome::Rejected(TimeWindowError::InvalidStart)
    );
    assert_eq!(editor.error, Some(TimeWindowError::InvalidStart));
}

#[test]
fn enter_rejects_bad_end() {
    let mut editor = editor();
    set_fields(&mut editor, "2024-06-01 10:00:00", "");
    assert_eq!(
        editor.handle_key(key(KeyCode::Enter)),
        EditorOutcome::Rejected(TimeWindowError::InvalidEnd)
    );
}

#[test]
fn enter_rejects_reversed_range() {
    let mut editor = editor();
    set_fields(&mut editor, "2024-06-01 12:00:00", "2024-06-01 11:00:00");
    assert_eq!(
        editor.handle_key(key(KeyCode::Enter)),
        EditorOutcome::Rejected(TimeWindowError::StartAfterEnd)
    );
}

#[test]
fn esc_cancels() {
    let mut editor = editor();
    assert_eq!(editor.handle_key(key(KeyCode::Esc)), EditorOutcome::Cancel);
}

#[test]
fn r_resets_draft_to_bounds() {
    let mut editor = editor();
    set_fields(&mut editor, "2024-06-01 10:00:00", "2024-06-01 11:00:00");
    assert_eq!(editor.handle_key(key(KeyCode::Char('r'))), EditorOutcome::Reset);
    assert_eq!(editor.draft(), (at(8, 0), at(18, 0)));
}

#[test]
fn typing_edits_focused_field_only() {
    let mut editor = editor();
    editor.start.clear();
    for ch in "2024-06-01 09:00:00".chars() {
        editor.handle_key(key(KeyCode::Char(ch)));
    }
    editor.handle_key(key(KeyCode::Char('x')));
    assert_eq!(editor.start.text(), "2024-06-01 09:00:00");
    assert_eq!(editor.end.text(), "2024-06-01 18:00:00");
}

#[test]
fn scrubber_shift_keeps_duration() {
    // GIVEN a one-hour draft on the scrubber
    let mut editor = editor();
    set_fields(&mut editor, "2024-06-01 10:00:00", "2024-06-01 11:00:00");
    editor.focus = TimeField::Scrubber;

    // WHEN nudging right by the default 30m step
    editor.handle_key(key(KeyCode::Right));

    // THEN both ends move together
    assert_eq!(editor.draft(), (at(10, 30), at(11, 30)));
}

#[test]
fn scrubber_shift_clamps_at_bounds() {
    let mut editor = editor();
    set_fields(&mut editor, "2024-06-01 17:00:00", "2024-06-01 17:50:00");
    editor.focus = TimeField::Scrubber;
    editor.handle_key(key(KeyCode::Right));
    assert_eq!(editor.draft(), (at(17, 10), at(18, 0)));
}

#[test]
fn shift_arrows_expand_edges() {
    let mut editor = editor();
    set_fields(&mut editor, "2024-06-01 10:00:00", "2024-06-01 11:00:00");
    editor.focus = TimeField::Scrubber;
    editor.handle_key(KeyEvent::new(KeyCode::Left, KeyModifiers::SHIFT));
    editor.handle_key(KeyEvent::new(KeyCode::Right, KeyModifiers::SHIFT));
    assert_eq!(editor.draft(), (at(9, 30), at(11, 30)));
}

#[test]
fn step_halves_and_doubles_within_limits() {
    let mut editor = editor();
    editor.focus = TimeField::Scrubber;
    editor.handle_key(key(KeyCode::Char('-')));
    assert_eq!(editor.step, Duration::minutes(15));
    editor.handle_key(key(KeyCode::Char('-')));
    assert_eq!(editor.step, Duration::minutes(15));
    for _ in 0..5 {
        editor.handle_key(key(KeyCode::Char('+')));
    }
    assert_eq!(editor.step, Duration::hours(2));
}

// ===== labels =====

#[test]
fn step_formats_in_hours_or_minutes() {
    assert_eq!(format_step(Duration::minutes(30)), "30m");
    assert_eq!(format_step(Duration::hours(2)), "2h");
}

#[test]
fn window_label_shows_range_or_off() {
    assert_eq!(window_label(&TimeWindow::default()), "Window: off");
    assert_eq!(
        window_label(&TimeWindow::between(at(10, 0), at(11, 0))),
        "Window: 2024-06-01 10:00:00 - 2024-06-01 11:00:00"
    );
}
