//! Key routing for every input mode.
//!
//! `handle_key` is the only entry point. It mutates `AppState` and returns
//! an [`Effect`] for the work that needs the outside world (files, the
//! clipboard, quitting). Mode changes happen before it returns, so the next
//! key always sees the new mode.

use super::app_state::{AppState, CommandInput, InputMode, JumpOutcome};
use super::dialog::{default_export_name, default_save_name, Dialog, DialogOutcome};
use super::line_input::LineInput;
use super::notice::NoticeKind;
use super::time_window::{window_label, EditorOutcome, TimeWindowEditor};
use crate::config::KeyBindings;
use crate::model::{CommandKind, KeyAction, MarkColor};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Work the shell performs after a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Nothing further.
    None,
    /// Leave the application.
    Quit,
    /// Write a JSON snapshot.
    Save(PathBuf),
    /// Write a CSV export of the visible rows.
    Export(PathBuf),
    /// Put text on the system clipboard.
    CopyRow(String),
}

/// Route one key according to the current mode.
pub fn handle_key(state: &mut AppState, key: KeyEvent, bindings: &KeyBindings) -> Effect {
    match std::mem::take(&mut state.mode) {
        InputMode::View => handle_view_key(state, key, bindings),
        InputMode::Command(input) => {
            handle_command_key(state, input, key);
            Effect::None
        }
        InputMode::TimeWindow(editor) => {
            handle_time_window_key(state, editor, key);
            Effect::None
        }
        InputMode::Dialog(dialog) => handle_dialog_key(state, dialog, key),
    }
}

// ===== View mode =====

fn handle_view_key(state: &mut AppState, key: KeyEvent, bindings: &KeyBindings) -> Effect {
    let Some(action) = bindings.get(key) else {
        return Effect::None;
    };
    debug!(?action, "View action");

    match action {
        KeyAction::RowDown => state.move_cursor(1),
        KeyAction::RowUp => state.move_cursor(-1),
        KeyAction::PageDown => state.page_down(),
        KeyAction::PageUp => state.page_up(),
        KeyAction::JumpToStart => state.jump_to_start(),
        KeyAction::JumpToEnd => state.jump_to_end(),
        KeyAction::NextMark => {
            if !state.jump_to_next_mark() {
                state.notify(NoticeKind::Info, "No more marks below");
            }
        }
        KeyAction::PrevMark => {
            if !state.jump_to_previous_mark() {
                state.notify(NoticeKind::Info, "No more marks above");
            }
        }
        KeyAction::ToggleMarksOnly => {
            let on = state.toggle_marks_only();
            let label = if on { "on" } else { "off" };
            state.notify(NoticeKind::Info, format!("Marks only: {label}"));
        }
        KeyAction::NextMatch => run_search(state, true),
        KeyAction::PrevMatch => run_search(state, false),
        KeyAction::BeginCommand(kind) => begin_command(state, kind),
        KeyAction::ClearFilter => {
            state.clear_filter();
            state.notify(NoticeKind::Info, "Filter cleared");
        }
        KeyAction::OpenTimeWindow => match state.time_window_editor() {
            Ok(editor) => state.mode = InputMode::TimeWindow(editor),
            Err(err) => state.notify(NoticeKind::Warn, err.to_string()),
        },
        KeyAction::ToggleCommentDrawer => {
            state.comment_drawer_open = !state.comment_drawer_open;
        }
        KeyAction::Save => {
            let placeholder =
                default_save_name(state.last_save.as_deref(), state.source_path.as_deref());
            let dir = base_dir(state.last_save.as_deref(), state);
            state.mode = InputMode::Dialog(Dialog::save(placeholder, dir));
        }
        KeyAction::Export => {
            let placeholder =
                default_export_name(state.last_export.as_deref(), state.source_path.as_deref());
            let dir = base_dir(state.last_export.as_deref(), state);
            state.mode = InputMode::Dialog(Dialog::export(placeholder, dir));
        }
        KeyAction::Help => state.mode = InputMode::Dialog(Dialog::help()),
        KeyAction::CopyRow => match state.current_row() {
            Some(row) => return Effect::CopyRow(row.content()),
            None => state.notify(NoticeKind::Warn, "No row selected"),
        },
        KeyAction::Quit => return Effect::Quit,
    }
    Effect::None
}

/// Directory relative dialog paths resolve against: the last write of that
/// kind, else the input file's directory.
fn base_dir(last: Option<&Path>, state: &AppState) -> Option<PathBuf> {
    last.or(state.source_path.as_deref())
        .and_then(Path::parent)
        .map(PathBuf::from)
}

fn begin_command(state: &mut AppState, kind: CommandKind) {
    let seed = match kind {
        CommandKind::Jump => String::new(),
        CommandKind::Search => state.search_query().to_string(),
        CommandKind::Filter => state.filter().pattern.clone(),
        CommandKind::Comment | CommandKind::Mark => {
            if state.current_row().is_none() {
                state.notify(NoticeKind::Warn, "No row selected");
                return;
            }
            if kind == CommandKind::Comment {
                state.current_comment().unwrap_or_default().to_string()
            } else {
                String::new()
            }
        }
    };
    state.mode = InputMode::Command(CommandInput {
        kind,
        buffer: LineInput::new(seed),
    });
}

fn run_search(state: &mut AppState, forward: bool) {
    if state.search_query().is_empty() {
        state.notify(NoticeKind::Info, "No search query");
        return;
    }
    let found = if forward {
        state.search_next()
    } else {
        state.search_prev()
    };
    if !found {
        state.notify(NoticeKind::Warn, "No matches");
    }
}

// ===== Command mode =====

fn handle_command_key(state: &mut AppState, mut input: CommandInput, key: KeyEvent) {
    if key.code == KeyCode::Esc {
        return;
    }

    if input.kind == CommandKind::Mark {
        match key.code {
            KeyCode::Char(ch) => match MarkColor::from_key(ch) {
                Some(color) => apply_mark(state, color),
                None => state.mode = InputMode::Command(input),
            },
            _ => state.mode = InputMode::Command(input),
        }
        return;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Enter => {
            commit(state, input.kind, input.buffer.into_text());
            return;
        }
        KeyCode::Char('w') if ctrl => input.buffer.delete_prev_word(),
        KeyCode::Char('h') if ctrl => input.buffer.delete_last_char(),
        KeyCode::Char('u') if ctrl => input.buffer.clear(),
        KeyCode::Backspace | KeyCode::Delete => input.buffer.delete_last_char(),
        KeyCode::Char(ch) if !ctrl => input.buffer.push(ch),
        _ => {}
    }
    state.mode = InputMode::Command(input);
}

fn apply_mark(state: &mut AppState, color: MarkColor) {
    match state.set_mark(color) {
        Some(line) if color.is_marked() => state.notify(
            NoticeKind::Success,
            format!("Row {line} marked [{}]", color.as_str()),
        ),
        Some(line) => state.notify(NoticeKind::Success, format!("Row {line} unmarked")),
        None => state.notify(NoticeKind::Warn, "No row selected"),
    }
}

fn commit(state: &mut AppState, kind: CommandKind, text: String) {
    debug!(?kind, text = %text, "Committing command");
    match kind {
        CommandKind::Jump => {
            let Ok(line) = text.trim().parse::<usize>() else {
                state.notify(NoticeKind::Warn, "Invalid line number");
                return;
            };
            match state.jump_to_line(line) {
                JumpOutcome::Moved => {}
                JumpOutcome::OutOfBounds => {
                    state.notify(NoticeKind::Warn, format!("Line {line} out of bounds"))
                }
                JumpOutcome::NotInFilter => {
                    state.notify(NoticeKind::Warn, format!("Line {line} not in current filter"))
                }
            }
        }
        CommandKind::Search => {
            state.set_search_query(&text);
            if !state.search_query().is_empty() && !state.search_next() {
                state.notify(NoticeKind::Warn, "No matches");
            }
        }
        CommandKind::Filter => match state.set_filter_pattern(&text) {
            Ok(()) if state.filter().pattern.is_empty() => {
                state.notify(NoticeKind::Info, "Filter cleared")
            }
            Ok(()) => {
                let message = format!("Filter: {}", state.filter().pattern);
                state.notify(NoticeKind::Info, message);
            }
            Err(err) => state.notify(NoticeKind::Error, format!("Invalid filter: {err}")),
        },
        CommandKind::Comment => {
            let cleared = text.trim().is_empty();
            if !state.set_comment(&text) {
                state.notify(NoticeKind::Warn, "No row selected");
            } else if cleared {
                state.notify(NoticeKind::Success, "Comment cleared");
            } else {
                state.notify(NoticeKind::Success, "Comment added");
            }
        }
        CommandKind::Mark => {}
    }
}

// ===== Time-window mode =====

fn handle_time_window_key(state: &mut AppState, mut editor: TimeWindowEditor, key: KeyEvent) {
    match editor.handle_key(key) {
        EditorOutcome::Pending => {}
        EditorOutcome::Cancel => return,
        EditorOutcome::Apply { start, end } => match state.apply_time_window(start, end) {
            Ok(()) => {
                let label = window_label(&state.filter().time_window);
                state.notify(NoticeKind::Success, label);
                return;
            }
            Err(err) => state.notify(NoticeKind::Warn, err.to_string()),
        },
        EditorOutcome::Reset => {
            state.disable_time_window();
            state.notify(NoticeKind::Info, "Window: off");
        }
        EditorOutcome::Rejected(err) => state.notify(NoticeKind::Warn, err.to_string()),
    }
    state.time_step = editor.step;
    state.mode = InputMode::TimeWindow(editor);
}

// ===== Dialog mode =====

fn handle_dialog_key(state: &mut AppState, mut dialog: Dialog, key: KeyEvent) -> Effect {
    let outcome = dialog.handle_key(key);
    match outcome {
        DialogOutcome::Pending => {
            state.mode = InputMode::Dialog(dialog);
            Effect::None
        }
        DialogOutcome::Cancelled => Effect::None,
        DialogOutcome::Save(path) => Effect::Save(path),
        DialogOutcome::Export(path) => Effect::Export(path),
    }
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod tests;
