//! Drawers below the table: the comment viewer and the time-window editor.

use super::styles::TableStyles;
use crate::model::timestamp::format_input_timestamp;
use crate::state::time_window::format_step;
use crate::state::{AppState, NoticeKind, TimeField, TimeWindowEditor};
use chrono::NaiveDateTime;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Show the comment attached to the cursor row.
pub fn render_comment_drawer(frame: &mut Frame, area: Rect, state: &AppState, styles: &TableStyles) {
    let title = match state.current_row() {
        Some(row) => format!(" Comment · row {} ", row.source_ordinal()),
        None => " Comment ".to_string(),
    };
    let body = match state.current_comment() {
        Some(text) => Line::from(text.to_string()),
        None => Line::from(Span::styled("No comment on this row", styles.muted())),
    };
    let drawer = Paragraph::new(body)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(styles.muted()),
        )
        .wrap(Wrap { trim: false });
    frame.render_widget(drawer, area);
}

/// Draw the editor: both fields, the scrubber, and the step and bounds.
pub fn render_time_drawer(
    frame: &mut Frame,
    area: Rect,
    editor: &TimeWindowEditor,
    styles: &TableStyles,
) {
    let block = Block::default()
        .title(" Time window ")
        .borders(Borders::ALL)
        .border_style(styles.muted());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let field = |label: &'static str, which: TimeField, text: &str| {
        let focused = editor.focus == which;
        let value_style = if focused {
            styles.focused_field
        } else {
            styles.row_text
        };
        let mut spans = vec![
            Span::raw(format!("{} {label}", if focused { "›" } else { " " })),
            Span::styled(text.to_string(), value_style),
        ];
        if focused {
            spans.push(Span::styled("█", value_style));
        }
        Line::from(spans)
    };

    let (draft_start, draft_end) = editor.draft();
    let bar_width = usize::from(inner.width).saturating_sub(4);
    let scrubber_focused = editor.focus == TimeField::Scrubber;
    let bar_style = if scrubber_focused {
        styles.focused_field
    } else {
        styles.row_text
    };

    let mut lines = vec![
        field("Start: ", TimeField::Start, editor.start.text()),
        field("End:   ", TimeField::End, editor.end.text()),
        Line::from(vec![
            Span::raw(if scrubber_focused { "› " } else { "  " }),
            Span::styled(
                scrubber_bar(editor, draft_start, draft_end, bar_width),
                bar_style,
            ),
        ]),
        Line::from(Span::styled(
            format!(
                "  Step: {}   Range: {} - {}",
                format_step(editor.step),
                format_input_timestamp(editor.bounds.min),
                format_input_timestamp(editor.bounds.max),
            ),
            styles.muted(),
        )),
    ];
    if let Some(error) = &editor.error {
        lines.push(Line::from(Span::styled(
            format!("  {error}"),
            styles.notice(NoticeKind::Warn),
        )));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

/// A bar `width` cells wide with the draft range filled in, relative to the
/// dataset bounds.
pub fn scrubber_bar(
    editor: &TimeWindowEditor,
    start: NaiveDateTime,
    end: NaiveDateTime,
    width: usize,
) -> String {
    if width == 0 {
        return String::new();
    }
    let total = (editor.bounds.max - editor.bounds.min).num_seconds();
    let cell_of = |ts: NaiveDateTime| -> usize {
        if total <= 0 {
            return 0;
        }
        let offset = (ts - editor.bounds.min).num_seconds().clamp(0, total);
        let scaled = offset as f64 / total as f64 * (width - 1) as f64;
        scaled.round() as usize
    };
    let (from, to) = (cell_of(start), cell_of(end));
    (0..width)
        .map(|cell| if (from..=to).contains(&cell) { '█' } else { '─' })
        .collect()
}
