//! Rendering for modal dialogs.

use super::constants::{PATH_DIALOG_HEIGHT, PATH_DIALOG_WIDTH_PERCENT};
use super::help::{centered_rect, help_line_count, render_help_overlay};
use super::styles::TableStyles;
use crate::state::dialog::PathPrompt;
use crate::state::{Dialog, DialogKind};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Draw `dialog` over whatever is already on screen.
pub fn render_dialog(frame: &mut Frame, dialog: &Dialog, styles: &TableStyles) {
    if !dialog.is_visible() {
        return;
    }
    match dialog.kind() {
        DialogKind::Help { scroll } => {
            let max = u16::try_from(help_line_count()).unwrap_or(u16::MAX);
            render_help_overlay(frame, (*scroll).min(max));
        }
        DialogKind::Save(prompt) | DialogKind::Export(prompt) => {
            render_path_prompt(frame, dialog, prompt, styles);
        }
    }
}

fn path_dialog_area(area: Rect) -> Rect {
    let centered = centered_rect(PATH_DIALOG_WIDTH_PERCENT, 100, area);
    let height = PATH_DIALOG_HEIGHT.min(area.height);
    Rect {
        y: area.y + area.height.saturating_sub(height) / 2,
        height,
        ..centered
    }
}

fn render_path_prompt(frame: &mut Frame, dialog: &Dialog, prompt: &PathPrompt, styles: &TableStyles) {
    let area = path_dialog_area(frame.area());
    frame.render_widget(Clear, area);

    let input = if prompt.input.is_empty() {
        Span::styled(prompt.placeholder.clone(), styles.muted())
    } else {
        Span::styled(prompt.input.text().to_string(), styles.focused_field)
    };
    let mut path_line = vec![Span::raw(" Path: "), input];
    if dialog.is_focused() {
        path_line.push(Span::styled("█", styles.focused_field));
    }

    let lines = vec![
        Line::from(path_line),
        Line::from(Span::styled(
            format!(" → {}", prompt.resolved_path().display()),
            styles.muted(),
        )),
        Line::default(),
        Line::from(Span::styled(" enter: confirm   esc: cancel", styles.muted())),
    ];

    let widget = Paragraph::new(lines).block(
        Block::default()
            .title(dialog.title())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(widget, area);
}
