//! Help overlay widget displaying keyboard shortcuts.
//!
//! Shows a centered modal overlay with all keyboard shortcuts grouped by category.
//! Opened with '?', scrolled with j/k, dismissed with 'Esc', '?' or 'q'.

use super::constants::{HELP_POPUP_HEIGHT_PERCENT, HELP_POPUP_WIDTH_PERCENT};
use super::styles::{MUTED_TEXT, SECTION_HEADER};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Shortcut groups: category, then (keys, description) pairs.
const SHORTCUTS: &[(&str, &[(&str, &str)])] = &[
    (
        "Navigation",
        &[
            ("j/↓", "Next row"),
            ("k/↑", "Previous row"),
            ("d/Page Down", "Page down"),
            ("u/Page Up", "Page up"),
            ("g/Home", "First row"),
            ("G/End", "Last row"),
            (":", "Jump to line number"),
        ],
    ),
    (
        "Search & Filter",
        &[
            ("/", "Search (case-insensitive)"),
            ("]", "Next match"),
            ("[", "Previous match"),
            ("f", "Edit regex filter"),
            ("F", "Clear filter"),
            ("t", "Edit time window"),
        ],
    ),
    (
        "Marks & Comments",
        &[
            ("m", "Mark row (r/g/a, c clears)"),
            ("M", "Toggle marks-only view"),
            ("n", "Next marked row"),
            ("N", "Previous marked row"),
            ("c/#", "Edit comment"),
            ("v", "Toggle comment drawer"),
        ],
    ),
    (
        "Time Window",
        &[
            ("Tab/Shift+Tab", "Cycle start, end, scrubber"),
            ("←/→", "Shift window by step"),
            ("Shift+←/→", "Widen window by step"),
            ("-/+", "Halve or double step"),
            ("r", "Reset to full range"),
            ("Enter", "Apply"),
        ],
    ),
    (
        "Application",
        &[
            ("s", "Save snapshot"),
            ("e", "Export visible rows as CSV"),
            ("y", "Copy row to clipboard"),
            ("?", "Show help overlay"),
            ("q/Ctrl+c", "Quit"),
        ],
    ),
];

/// Width of the key column in help lines.
const KEY_COLUMN_WIDTH: usize = 16;

/// Render the help overlay centered on the screen.
///
/// The scroll_offset parameter controls which line is shown at the top.
pub fn render_help_overlay(frame: &mut Frame, scroll_offset: u16) {
    let area = frame.area();
    let popup_area = centered_rect(HELP_POPUP_WIDTH_PERCENT, HELP_POPUP_HEIGHT_PERCENT, area);

    // Clear the background for the overlay
    frame.render_widget(Clear, popup_area);

    let help_paragraph = Paragraph::new(build_help_content())
        .block(
            Block::default()
                .title(" Keyboard Shortcuts ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .wrap(Wrap { trim: false })
        .alignment(Alignment::Left)
        .scroll((scroll_offset, 0));

    frame.render_widget(help_paragraph, popup_area);

    // Dismissal hint on the bottom border
    let hint_area = Rect {
        x: popup_area.x,
        y: popup_area.y + popup_area.height.saturating_sub(1),
        width: popup_area.width,
        height: 1,
    };

    let hint = Paragraph::new(Line::from(vec![Span::styled(
        " Press Esc or ? to close ",
        MUTED_TEXT.add_modifier(Modifier::DIM),
    )]))
    .alignment(Alignment::Center);

    frame.render_widget(hint, hint_area);
}

/// Calculate a rect centered in `area`.
///
/// `percent_x` and `percent_y` give the size as a share of `area`.
pub(super) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_width = area.width * percent_x / 100;
    let popup_height = area.height * percent_y / 100;
    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;

    Rect {
        x: area.x + popup_x,
        y: area.y + popup_y,
        width: popup_width,
        height: popup_height,
    }
}

/// Build the help content lines grouped by category.
fn build_help_content() -> Vec<Line<'static>> {
    let key_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let desc_style = Style::default().fg(Color::White);

    let mut lines = Vec::new();
    for (index, (category, entries)) in SHORTCUTS.iter().enumerate() {
        if index > 0 {
            lines.push(Line::default());
        }
        lines.push(Line::from(Span::styled(*category, SECTION_HEADER)));
        for (keys, description) in entries.iter() {
            lines.push(Line::from(vec![
                Span::styled(format!("  {keys:<KEY_COLUMN_WIDTH$}"), key_style),
                Span::styled(*description, desc_style),
            ]));
        }
    }
    lines
}

/// Number of lines in the help text, for clamping scroll.
pub fn help_line_count() -> usize {
    SHORTCUTS
        .iter()
        .map(|(_, entries)| entries.len() + 2)
        .sum::<usize>()
        - 1
}

// ===== Tests =====

#[cfg(test)]
#[path = "help_tests.rs"]
mod tests;
