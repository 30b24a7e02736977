//! Two-line footer.
//!
//! Line 1: mode pill, file name, filter summary, and `Rows r/n` on the right.
//! Line 2: the prompt, the notice or the time-window label on the left, and
//! the hint for the current mode on the right.

use super::constants::{HELP_HINT, TIME_EDITOR_HINT};
use super::styles::TableStyles;
use crate::model::command::IDLE_HINT;
use crate::state::time_window::window_label;
use crate::state::{AppState, InputMode};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Shown when the dataset has no source file.
const UNTITLED: &str = "untitled";

/// Render both footer lines into `area`.
pub fn render_footer(frame: &mut Frame, area: Rect, state: &AppState, styles: &TableStyles) {
    let width = usize::from(area.width);
    let lines = vec![status_line(state, styles, width), message_line(state, styles, width)];
    frame.render_widget(Paragraph::new(lines).style(styles.footer_bar), area);
}

/// Join `left` and `right` with enough spaces to push `right` to the edge.
fn spread(mut left: Vec<Span<'static>>, right: Vec<Span<'static>>, width: usize) -> Line<'static> {
    let used: usize = left
        .iter()
        .chain(right.iter())
        .map(|span| span.content.width())
        .sum();
    if used < width {
        left.push(Span::raw(" ".repeat(width - used)));
    } else {
        left.push(Span::raw(" "));
    }
    left.extend(right);
    Line::from(left)
}

fn file_name(state: &AppState) -> String {
    state
        .source_path
        .as_deref()
        .and_then(|path| path.file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| UNTITLED.to_string())
}

fn status_line(state: &AppState, styles: &TableStyles, width: usize) -> Line<'static> {
    let filter = state.filter();
    let pattern = if filter.pattern.is_empty() {
        "None".to_string()
    } else {
        filter.pattern.clone()
    };
    let marks = if filter.marks_only { "on" } else { "off" };
    let row = state.cursor().map_or(0, |cursor| cursor + 1);

    let left = vec![
        Span::styled(format!(" {} ", state.mode.badge()), styles.mode_pill),
        Span::raw(format!(" {} ", file_name(state))),
        Span::raw(format!("[FILTER: {pattern}] · [MARKS ONLY: {marks}]")),
    ];
    let right = vec![Span::raw(format!(" Rows {row}/{} ", state.visible().len()))];
    spread(left, right, width)
}

fn message_line(state: &AppState, styles: &TableStyles, width: usize) -> Line<'static> {
    let (left, hint) = match &state.mode {
        InputMode::Command(input) => {
            let mut left = vec![Span::styled(format!(" {}", input.kind.prompt()), styles.focused_field)];
            if input.kind.takes_text() {
                left.push(Span::raw(input.buffer.text().to_string()));
                left.push(Span::raw("█"));
            }
            (left, input.kind.hint())
        }
        InputMode::TimeWindow(_) => (notice_or_window(state, styles), TIME_EDITOR_HINT),
        InputMode::Dialog(_) => (notice_or_window(state, styles), "enter: confirm   esc: cancel"),
        InputMode::View => (notice_or_window(state, styles), IDLE_HINT),
    };
    let hint = match state.mode {
        InputMode::View => format!("{hint}   {HELP_HINT} "),
        _ => format!("{hint} "),
    };
    spread(left, vec![Span::styled(hint, styles.muted())], width)
}

/// The live notice, or the time-window label when there is none.
fn notice_or_window(state: &AppState, styles: &TableStyles) -> Vec<Span<'static>> {
    match (state.notice.current(), state.notice.display()) {
        (Some((kind, _)), Some(text)) => vec![Span::styled(format!(" {text}"), styles.notice(kind))],
        _ => vec![Span::raw(format!(" {}", window_label(&state.filter().time_window)))],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CommandKind;
    use crate::state::{CommandInput, LineInput, NoticeKind};
    use crate::test_harness::{buffer_to_string, state_from_csv};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use std::path::PathBuf;

    fn render(state: &AppState, width: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, 2)).unwrap();
        terminal
            .draw(|frame| render_footer(frame, frame.area(), state, &TableStyles::default()))
            .unwrap();
        buffer_to_string(terminal.backend().buffer())
    }

    #[test]
    fn status_line_summarises_view_state() {
        // GIVEN a loaded file with a filter
        let mut state = state_from_csv("details\nalpha\nbeta\nalphabet\n");
        state.source_path = Some(PathBuf::from("/var/log/app.csv"));
        state.set_filter_pattern("alpha").unwrap();

        // WHEN the footer is drawn
        let text = render(&state, 120);

        // THEN line 1 has the badge, file, filter and row counter
        let first = text.lines().next().unwrap();
        assert!(first.contains("VIEW"));
        assert!(first.contains("app.csv"));
        assert!(first.contains("[FILTER: alpha] · [MARKS ONLY: off]"));
        assert!(first.trim_end().ends_with("Rows 1/2"));
    }

    #[test]
    fn idle_footer_shows_window_label_and_legend() {
        let state = state_from_csv("details\nalpha\n");
        let text = render(&state, 140);

        assert!(text.contains("[FILTER: None]"));
        assert!(text.contains("Window: off"));
        assert!(text.contains("? help"));
        assert!(text.contains(UNTITLED));
    }

    #[test]
    fn notice_replaces_window_label() {
        let mut state = state_from_csv("details\nalpha\n");
        state.notify(NoticeKind::Warn, "No matches");

        let text = render(&state, 120);

        assert!(text.contains("! No matches"));
        assert!(!text.contains("Window: off"));
    }

    #[test]
    fn command_mode_shows_prompt_buffer_and_hint() {
        let mut state = state_from_csv("details\nalpha\n");
        state.mode = InputMode::Command(CommandInput {
            kind: CommandKind::Filter,
            buffer: LineInput::new("err"),
        });

        let text = render(&state, 120);

        assert!(text.contains("FILTER"));
        assert!(text.contains("filter: err█"));
        assert!(text.contains("enter: apply   esc: cancel"));
    }

    #[test]
    fn mark_mode_has_no_text_cursor() {
        let mut state = state_from_csv("details\nalpha\n");
        state.mode = InputMode::Command(CommandInput {
            kind: CommandKind::Mark,
            buffer: LineInput::default(),
        });

        let text = render(&state, 120);

        assert!(text.contains("mark:"));
        assert!(!text.contains('█'));
        assert!(text.contains("r/g/a: mark"));
    }

    #[test]
    fn empty_visible_list_reports_zero_rows() {
        let mut state = state_from_csv("details\nalpha\n");
        state.set_filter_pattern("zzz").unwrap();

        let text = render(&state, 120);

        assert!(text.contains("Rows 0/0"));
    }
}
