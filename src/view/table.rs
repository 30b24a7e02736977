//! Table rendering: header line, row gutter, wrapped cells.
//!
//! A row's height is only known once its cells are wrapped at the current
//! column widths, so rendering and windowing happen together here. Each
//! rendered row also refreshes the row's cached height.

use super::styles::{TableStyles, PILL_MARKER};
use crate::model::{ColumnMeta, Row};
use crate::state::AppState;
use crate::view_state::{window_around_cursor, COMMENT_MARKER};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Blank columns on each side of a cell.
const CELL_PADDING: usize = 1;

// ===== Wrapping =====

/// Wrap `text` into lines at most `width` display columns wide.
///
/// Breaks on whitespace; a word wider than `width` is cut wherever it
/// overflows. Embedded newlines start new lines. Always returns at least
/// one line.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![String::new()];
    }
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        wrap_paragraph(paragraph.trim_end_matches('\r'), width, &mut lines);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

fn wrap_paragraph(text: &str, width: usize, out: &mut Vec<String>) {
    let mut line = String::new();
    let mut line_width = 0;

    for word in text.split_whitespace() {
        let word_width = word.width();
        let gap = usize::from(line_width > 0);

        if line_width + gap + word_width <= width {
            if gap == 1 {
                line.push(' ');
            }
            line.push_str(word);
            line_width += gap + word_width;
            continue;
        }

        if line_width > 0 {
            out.push(std::mem::take(&mut line));
            line_width = 0;
        }

        if word_width <= width {
            line.push_str(word);
            line_width = word_width;
            continue;
        }

        for ch in word.chars() {
            let ch_width = ch.width().unwrap_or(0);
            if line_width + ch_width > width && line_width > 0 {
                out.push(std::mem::take(&mut line));
                line_width = 0;
            }
            line.push(ch);
            line_width += ch_width;
        }
    }
    out.push(line);
}

/// Cut `text` to at most `width` display columns.
fn truncate_to_width(text: &str, width: usize) -> String {
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if used + ch_width > width {
            break;
        }
        out.push(ch);
        used += ch_width;
    }
    out
}

// ===== Highlighting =====

/// Length in bytes of a case-insensitive match of `query` at the start of
/// `text`, if there is one.
fn match_len(text: &str, query: &str) -> Option<usize> {
    let mut text_chars = text.char_indices();
    for q in query.chars() {
        let (_, t) = text_chars.next()?;
        if !t.to_lowercase().eq(q.to_lowercase()) {
            return None;
        }
    }
    Some(text_chars.next().map_or(text.len(), |(idx, _)| idx))
}

/// Split `text` into spans, styling case-insensitive hits of `query`.
pub fn highlight_spans(text: &str, query: &str, base: Style, hit: Style) -> Vec<Span<'static>> {
    let query = query.trim();
    if query.is_empty() || text.is_empty() {
        return vec![Span::styled(text.to_string(), base)];
    }

    let mut spans = Vec::new();
    let mut plain_start = 0;
    let mut idx = 0;
    while idx < text.len() {
        if let Some(len) = match_len(&text[idx..], query) {
            if plain_start < idx {
                spans.push(Span::styled(text[plain_start..idx].to_string(), base));
            }
            spans.push(Span::styled(text[idx..idx + len].to_string(), hit));
            idx += len;
            plain_start = idx;
        } else {
            idx += text[idx..].chars().next().map_or(1, char::len_utf8);
        }
    }
    if plain_start < text.len() {
        spans.push(Span::styled(text[plain_start..].to_string(), base));
    }
    spans
}

// ===== Rows =====

/// Number of digits in the widest ordinal.
fn ordinal_digits(state: &AppState) -> usize {
    let max = state
        .store()
        .rows()
        .iter()
        .map(Row::source_ordinal)
        .max()
        .unwrap_or(0);
    max.max(1).to_string().len()
}

/// Columns drawn, in display order.
fn drawn_columns(columns: &[ColumnMeta]) -> impl Iterator<Item = &ColumnMeta> {
    columns.iter().filter(|column| column.visible && column.width > 0)
}

/// Render the row at visible position `pos` into screen lines.
///
/// The first line carries the mark pill, the comment marker and the source
/// ordinal; continuation lines keep the gutter blank. The row's cached
/// height is updated as a side effect.
pub fn render_row(state: &AppState, pos: usize, styles: &TableStyles) -> Vec<Line<'static>> {
    let Some(row) = state.visible_row(pos) else {
        return Vec::new();
    };
    let selected = state.cursor() == Some(pos);
    let base = if selected {
        styles.cursor_row
    } else {
        styles.row_text
    };
    let query = state.search_query();
    let columns = state.store().columns();
    let digits = ordinal_digits(state);

    let wrapped: Vec<(usize, Vec<String>)> = drawn_columns(columns)
        .map(|column| {
            let inner = column.width.saturating_sub(2 * CELL_PADDING);
            (column.width, wrap_text(row.cell(column.source_index), inner))
        })
        .collect();
    let height = wrapped
        .iter()
        .map(|(_, lines)| lines.len())
        .max()
        .unwrap_or(1)
        .max(1);
    row.set_rendered_height(height);

    let mark = state.store().mark(row.id());
    let has_comment = state.store().comment(row.id()).is_some();
    let marker_width = COMMENT_MARKER.len() + digits;

    (0..height)
        .map(|line_idx| {
            let mut spans = Vec::with_capacity(wrapped.len() * 3 + 3);
            if mark.is_marked() {
                spans.push(Span::styled(PILL_MARKER, styles.mark(mark)));
            } else {
                spans.push(Span::raw(" "));
            }

            let gutter = match (line_idx, has_comment) {
                (0, true) => format!(
                    "{COMMENT_MARKER}{:>width$}",
                    row.source_ordinal(),
                    width = digits
                ),
                (0, false) => format!("{:>marker_width$}", row.source_ordinal()),
                _ => " ".repeat(marker_width),
            };
            spans.push(Span::styled(format!("{gutter} "), base));

            for (width, lines) in &wrapped {
                let text = lines.get(line_idx).map(String::as_str).unwrap_or("");
                let inner = width.saturating_sub(2 * CELL_PADDING);
                let text = truncate_to_width(text, inner);
                let fill = width.saturating_sub(text.width() + CELL_PADDING);
                spans.push(Span::styled(" ".repeat(CELL_PADDING.min(*width)), base));
                spans.extend(highlight_spans(&text, query, base, styles.search_highlight));
                spans.push(Span::styled(" ".repeat(fill), base));
            }
            Line::from(spans)
        })
        .collect()
}

/// Column header aligned with the cell grid.
pub fn header_line(state: &AppState, styles: &TableStyles) -> Line<'static> {
    let gutter = 1 + COMMENT_MARKER.len() + ordinal_digits(state) + 1;
    let mut spans = vec![Span::raw(" ".repeat(gutter))];
    for column in drawn_columns(state.store().columns()) {
        let inner = column.width.saturating_sub(2 * CELL_PADDING);
        let name = truncate_to_width(&column.name, inner);
        let fill = column.width.saturating_sub(name.width() + CELL_PADDING);
        spans.push(Span::raw(" ".repeat(CELL_PADDING.min(column.width))));
        spans.push(Span::styled(name, styles.header));
        spans.push(Span::raw(" ".repeat(fill)));
    }
    Line::from(spans)
}

/// Render the bordered table into `area` and return the page size.
///
/// Rows come from `window_around_cursor` over the inner height, so the
/// cursor row is always drawn. With nothing visible a placeholder is shown
/// and the page size is 1.
pub fn render_table(frame: &mut Frame, area: Rect, state: &AppState, styles: &TableStyles) -> usize {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles.border);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(cursor) = state.cursor() else {
        let message = if state.store().is_empty() {
            "No rows loaded"
        } else {
            "No rows match the current filters"
        };
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(message, styles.muted()))),
            inner,
        );
        return 1;
    };

    let window = window_around_cursor(
        state.visible().len(),
        cursor,
        usize::from(inner.height),
        |pos| {
            let lines = render_row(state, pos, styles);
            let height = lines.len();
            (lines, height)
        },
    );

    match window {
        Some(window) => {
            let page_size = window.page_size();
            let lines: Vec<Line> = window.rows.into_iter().flatten().collect();
            frame.render_widget(Paragraph::new(lines), inner);
            page_size
        }
        None => 1,
    }
}

#[cfg(test)]
#[path = "table_tests.rs"]
mod tests;
