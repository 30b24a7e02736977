//! Tests for help overlay widget

use super::*;
use crate::test_harness::buffer_to_string;
use ratatui::backend::TestBackend;
use ratatui::Terminal;

fn render(width: u16, height: u16, scroll: u16) -> String {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            render_help_overlay(frame, scroll);
        })
        .unwrap();
    buffer_to_string(terminal.backend().buffer())
}

fn content_text() -> String {
    build_help_content()
        .iter()
        .map(|line| {
            line.spans
                .iter()
                .map(|span| span.content.as_ref())
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn render_help_overlay_shows_centered_modal() {
    let text = render(80, 24, 0);

    // Should have a border somewhere in the center
    assert!(
        text.contains('┌') || text.contains('│'),
        "Help overlay should render a bordered box"
    );
    assert!(text.contains("Keyboard Shortcuts"));
}

#[test]
fn render_help_overlay_contains_navigation_shortcuts() {
    let text = render(80, 40, 0);

    assert!(text.contains("Navigation"), "Should show Navigation category");
    assert!(text.contains("j/↓"), "Should show next row shortcut");
    assert!(text.contains("Jump to line number"));
}

#[test]
fn render_help_overlay_shows_dismissal_hint() {
    let text = render(80, 24, 0);

    assert!(
        text.contains("Press Esc or ? to close"),
        "Should show how to dismiss the overlay"
    );
}

#[test]
fn scrolling_hides_the_first_category() {
    let text = render(80, 24, 3);

    assert!(!text.contains("Navigation"));
}

#[test]
fn centered_rect_calculates_correct_dimensions() {
    let area = Rect::new(0, 0, 100, 50);

    let centered = centered_rect(80, 80, area);

    assert_eq!(centered.width, 80, "Width should be 80% of area width");
    assert_eq!(centered.height, 40, "Height should be 80% of area height");
    assert_eq!(centered.x, 10, "Should be horizontally centered");
    assert_eq!(centered.y, 5, "Should be vertically centered");
}

#[test]
fn build_help_content_includes_all_categories() {
    let text = content_text();

    for category in [
        "Navigation",
        "Search & Filter",
        "Marks & Comments",
        "Time Window",
        "Application",
    ] {
        assert!(text.contains(category), "Missing category {category}");
    }
}

#[test]
fn help_lists_persistence_and_clipboard_keys() {
    let text = content_text();

    assert!(text.contains("Save snapshot"));
    assert!(text.contains("Export visible rows as CSV"));
    assert!(text.contains("Copy row to clipboard"));
    assert!(text.contains("q/Ctrl+c"));
}

#[test]
fn line_count_matches_built_content() {
    assert_eq!(help_line_count(), build_help_content().len());
}
