//! Screen layout.
//!
//! Pure layout logic - splits the frame into header, table, optional
//! drawers and footer, then hands each area to its renderer.

use super::constants::{COMMENT_DRAWER_HEIGHT, FOOTER_HEIGHT, HEADER_HEIGHT, TIME_DRAWER_HEIGHT};
use super::styles::TableStyles;
use super::{dialog, drawer, footer, table};
use crate::state::{AppState, InputMode};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    widgets::Paragraph,
    Frame,
};

/// Areas for one frame. Drawers are `None` when hidden.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenAreas {
    /// Column header line.
    pub header: Rect,
    /// Bordered table.
    pub table: Rect,
    /// Comment drawer.
    pub comment: Option<Rect>,
    /// Time-window editor.
    pub time_window: Option<Rect>,
    /// Two-line footer.
    pub footer: Rect,
}

/// Split `area` for the current state.
pub fn screen_areas(area: Rect, state: &AppState) -> ScreenAreas {
    let show_comment = state.comment_drawer_open;
    let show_time = matches!(state.mode, InputMode::TimeWindow(_));

    let mut constraints = vec![
        Constraint::Length(HEADER_HEIGHT), // Column names
        Constraint::Min(0),                // Table
    ];
    if show_comment {
        constraints.push(Constraint::Length(COMMENT_DRAWER_HEIGHT));
    }
    if show_time {
        constraints.push(Constraint::Length(TIME_DRAWER_HEIGHT));
    }
    constraints.push(Constraint::Length(FOOTER_HEIGHT));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let mut next = 2;
    let mut take = |shown: bool| {
        shown.then(|| {
            let rect = chunks[next];
            next += 1;
            rect
        })
    };
    let comment = take(show_comment);
    let time_window = take(show_time);

    ScreenAreas {
        header: chunks[0],
        table: chunks[1],
        comment,
        time_window,
        footer: chunks[chunks.len() - 1],
    }
}

/// Width and height available to rows inside the table border.
pub fn table_inner_size(area: Rect, state: &AppState) -> (usize, usize) {
    let table = screen_areas(area, state).table;
    (
        usize::from(table.width.saturating_sub(2)),
        usize::from(table.height.saturating_sub(2)),
    )
}

/// Render every part of the screen. Returns the number of rows the table
/// fit, which becomes the paging step.
pub fn render_layout(frame: &mut Frame, state: &AppState, styles: &TableStyles) -> usize {
    let areas = screen_areas(frame.area(), state);

    // The header sits over the table's inner area, past the left border
    let header_area = Rect {
        x: areas.header.x.saturating_add(1),
        width: areas.header.width.saturating_sub(2),
        ..areas.header
    };
    frame.render_widget(
        Paragraph::new(table::header_line(state, styles)),
        header_area,
    );

    let page_size = table::render_table(frame, areas.table, state, styles);

    if let Some(area) = areas.comment {
        drawer::render_comment_drawer(frame, area, state, styles);
    }
    if let (Some(area), InputMode::TimeWindow(editor)) = (areas.time_window, &state.mode) {
        drawer::render_time_drawer(frame, area, editor, styles);
    }

    footer::render_footer(frame, areas.footer, state, styles);

    if let InputMode::Dialog(active) = &state.mode {
        dialog::render_dialog(frame, active, styles);
    }

    page_size
}

#[cfg(test)]
#[path = "layout_tests.rs"]
mod tests;
