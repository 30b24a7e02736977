//! Application state and transitions.
//!
//! `AppState` is the single explicit state object. Every operation the input
//! shell can invoke is a method here, and each one leaves the cursor
//! re-derived by row identity after the visible list is rebuilt.

use super::dialog::Dialog;
use super::filter::{self, FilterError, FilterState, SearchDirection, TimeWindow};
use super::line_input::LineInput;
use super::notice::{Notice, NoticeKind, NoticeTicket};
use super::time_window::{default_step, TimeBounds, TimeWindowEditor, TimeWindowError};
use crate::model::column::find_time_column;
use crate::model::timestamp::parse_log_timestamp;
use crate::model::{CommandKind, MarkColor, Row, RowId, RowStore};
use crate::view_state::{gutter_width, layout_columns};
use chrono::{Duration, NaiveDateTime};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::debug;

// ===== InputMode =====

/// Text prompt in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInput {
    /// Operation the buffer commits to.
    pub kind: CommandKind,
    /// Typed text. Unused by mark prompts.
    pub buffer: LineInput,
}

/// Who receives the next key. Exactly one variant is active.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InputMode {
    /// Navigation and toggles.
    #[default]
    View,
    /// A single-line prompt.
    Command(CommandInput),
    /// The time-window editor.
    TimeWindow(TimeWindowEditor),
    /// A modal dialog owns input.
    Dialog(Dialog),
}

impl InputMode {
    /// Footer badge for the mode.
    pub fn badge(&self) -> &'static str {
        match self {
            Self::View => "VIEW",
            Self::Command(input) => input.kind.badge(),
            Self::TimeWindow(_) => "TIME",
            Self::Dialog(_) => "DIALOG",
        }
    }
}

/// Result of a line-number jump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpOutcome {
    /// The cursor is on the requested line.
    Moved,
    /// No row has that line number.
    OutOfBounds,
    /// The row exists but the active filters hide it.
    NotInFilter,
}

// ===== AppState =====

/// Application state. No terminal or file handles.
#[derive(Debug, Clone)]
pub struct AppState {
    store: RowStore,

    /// Parsed timestamp per store row, aligned with `store.rows()`.
    row_times: Vec<Option<NaiveDateTime>>,
    time_bounds: Option<TimeBounds>,

    filter: FilterState,

    /// Store positions passing every predicate. Rebuilt, never edited.
    visible: Vec<usize>,

    /// Position in `visible`; `None` exactly when `visible` is empty.
    cursor: Option<usize>,

    /// Rows shown by the last render; the paging step.
    page_size: usize,

    table_width: usize,
    table_height: usize,

    /// Search query; relocates the cursor without filtering.
    search_query: String,

    /// Who receives keys.
    pub mode: InputMode,

    /// Transient status message.
    pub notice: Notice,
    pending_tickets: Vec<NoticeTicket>,

    /// Whether the comment drawer is shown.
    pub comment_drawer_open: bool,

    /// Scrubber step for newly opened time-window editors.
    pub time_step: Duration,

    /// File the dataset came from.
    pub source_path: Option<PathBuf>,
    /// Last snapshot written this session.
    pub last_save: Option<PathBuf>,
    /// Last CSV export written this session.
    pub last_export: Option<PathBuf>,
}

impl AppState {
    /// State over a loaded store with no predicates active.
    pub fn new(store: RowStore) -> Self {
        let row_times = match find_time_column(store.columns()) {
            Some(col) => store
                .rows()
                .iter()
                .map(|row| parse_log_timestamp(row.cell(col)))
                .collect(),
            None => vec![None; store.len()],
        };
        let time_bounds = TimeBounds::from_times(&row_times);
        let visible: Vec<usize> = (0..store.len()).collect();
        let cursor = if visible.is_empty() { None } else { Some(0) };

        Self {
            store,
            row_times,
            time_bounds,
            filter: FilterState::default(),
            visible,
            cursor,
            page_size: 1,
            table_width: 0,
            table_height: 0,
            search_query: String::new(),
            mode: InputMode::View,
            notice: Notice::default(),
            pending_tickets: Vec::new(),
            comment_drawer_open: false,
            time_step: default_step(),
            source_path: None,
            last_save: None,
            last_export: None,
        }
    }

    // ===== Accessors =====

    /// Loaded rows and overlays.
    pub fn store(&self) -> &RowStore {
        &self.store
    }

    /// Visible store positions.
    pub fn visible(&self) -> &[usize] {
        &self.visible
    }

    /// Cursor position in the visible list.
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Row under the cursor.
    pub fn current_row(&self) -> Option<&Row> {
        self.cursor
            .and_then(|pos| self.visible.get(pos))
            .and_then(|&index| self.store.row_at(index))
    }

    /// Row at a visible position.
    pub fn visible_row(&self, pos: usize) -> Option<&Row> {
        self.visible
            .get(pos)
            .and_then(|&index| self.store.row_at(index))
    }

    /// Active predicates.
    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    /// Current search query.
    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    /// Timestamp range of the dataset.
    pub fn time_bounds(&self) -> Option<TimeBounds> {
        self.time_bounds
    }

    /// Paging step.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Table height used by the renderer.
    pub fn table_height(&self) -> usize {
        self.table_height
    }

    /// Table width used by the last layout pass.
    pub fn table_width(&self) -> usize {
        self.table_width
    }

    // ===== Notices =====

    /// Show a notice and queue its clear for the event loop.
    pub fn notify(&mut self, kind: NoticeKind, message: impl Into<String>) {
        let ticket = self.notice.show(kind, message);
        self.pending_tickets.push(ticket);
    }

    /// Clears queued since the last call.
    pub fn take_notice_tickets(&mut self) -> Vec<NoticeTicket> {
        std::mem::take(&mut self.pending_tickets)
    }

    // ===== Filtering =====

    /// Rebuild the visible list and put the cursor back on the same row.
    fn refilter(&mut self) {
        let anchor = self.current_row().map(Row::id);
        self.visible = filter::rebuild(&self.store, &self.row_times, &self.filter);
        debug!(
            visible = self.visible.len(),
            total = self.store.len(),
            "Rebuilt visible rows"
        );
        self.relocate(anchor);
    }

    fn relocate(&mut self, anchor: Option<RowId>) {
        if self.visible.is_empty() {
            self.cursor = None;
            return;
        }
        let found = anchor.and_then(|id| filter::position_of(&self.store, &self.visible, id));
        self.cursor = Some(found.unwrap_or(0));
    }

    /// Replace the regex filter. Blank clears it. On error nothing changes.
    pub fn set_filter_pattern(&mut self, pattern: &str) -> Result<(), FilterError> {
        let regex = filter::compile_filter(pattern)?;
        self.filter.pattern = if regex.is_some() {
            pattern.to_string()
        } else {
            String::new()
        };
        self.filter.regex = regex;
        self.refilter();
        Ok(())
    }

    /// Remove the regex filter.
    pub fn clear_filter(&mut self) {
        self.filter.regex = None;
        self.filter.pattern.clear();
        self.refilter();
    }

    /// Flip marks-only. Returns the new setting.
    pub fn toggle_marks_only(&mut self) -> bool {
        self.filter.marks_only = !self.filter.marks_only;
        self.refilter();
        self.filter.marks_only
    }

    /// Set marks-only without toggling.
    pub fn set_marks_only(&mut self, on: bool) {
        if self.filter.marks_only != on {
            self.filter.marks_only = on;
            self.refilter();
        }
    }

    // ===== Search =====

    /// Replace the search query. Does not move the cursor.
    pub fn set_search_query(&mut self, text: &str) {
        self.search_query = text.trim().to_string();
    }

    /// Move to the next row containing the query. Returns whether one was found.
    pub fn search_next(&mut self) -> bool {
        self.search(SearchDirection::Forward)
    }

    /// Move to the previous row containing the query.
    pub fn search_prev(&mut self) -> bool {
        self.search(SearchDirection::Backward)
    }

    fn search(&mut self, direction: SearchDirection) -> bool {
        match filter::find_match(
            &self.store,
            &self.visible,
            self.cursor,
            &self.search_query,
            direction,
        ) {
            Some(pos) => {
                self.cursor = Some(pos);
                true
            }
            None => false,
        }
    }

    // ===== Overlays =====

    /// Mark the current row. Returns its line number, or `None` with no row.
    pub fn set_mark(&mut self, color: MarkColor) -> Option<usize> {
        let row = self.current_row()?;
        let (id, ordinal) = (row.id(), row.source_ordinal());
        self.store.set_mark(id, color);
        self.refilter();
        Some(ordinal)
    }

    /// Comment the current row as typed; blank text removes the comment.
    /// Returns `false` with no row.
    pub fn set_comment(&mut self, text: &str) -> bool {
        let Some(id) = self.current_row().map(Row::id) else {
            return false;
        };
        let text = if text.trim().is_empty() { "" } else { text };
        self.store.set_comment(id, text);
        self.refilter();
        true
    }

    /// Comment on the current row.
    pub fn current_comment(&self) -> Option<&str> {
        self.current_row().and_then(|row| self.store.comment(row.id()))
    }

    /// Merge overlays for rows present in the dataset. Returns entries applied.
    pub fn merge_overlays(
        &mut self,
        marks: HashMap<RowId, MarkColor>,
        comments: HashMap<RowId, String>,
    ) -> usize {
        let applied = self.store.merge_overlays(marks, comments);
        self.refilter();
        applied
    }

    // ===== Navigation =====

    /// Move the cursor by `delta` rows, clamped to the list.
    pub fn move_cursor(&mut self, delta: isize) {
        let Some(cursor) = self.cursor else {
            return;
        };
        let last = self.visible.len().saturating_sub(1);
        let target = cursor.saturating_add_signed(delta).min(last);
        self.cursor = Some(target);
    }

    /// Move down by the last page size.
    pub fn page_down(&mut self) {
        self.move_cursor(self.page_size.max(1) as isize);
    }

    /// Move up by the last page size.
    pub fn page_up(&mut self) {
        self.move_cursor(-(self.page_size.max(1) as isize));
    }

    /// First visible row.
    pub fn jump_to_start(&mut self) {
        if !self.visible.is_empty() {
            self.cursor = Some(0);
        }
    }

    /// Last visible row.
    pub fn jump_to_end(&mut self) {
        if !self.visible.is_empty() {
            self.cursor = Some(self.visible.len() - 1);
        }
    }

    /// Put the cursor on source line `line` (1-based).
    pub fn jump_to_line(&mut self, line: usize) -> JumpOutcome {
        let exists = line > 0
            && self
                .store
                .rows()
                .iter()
                .any(|row| row.source_ordinal() == line);
        if !exists {
            return JumpOutcome::OutOfBounds;
        }
        let pos = self.visible.iter().position(|&index| {
            self.store
                .row_at(index)
                .is_some_and(|row| row.source_ordinal() == line)
        });
        match pos {
            Some(pos) => {
                self.cursor = Some(pos);
                JumpOutcome::Moved
            }
            None => JumpOutcome::NotInFilter,
        }
    }

    /// Next marked row below the cursor. No wrap-around.
    pub fn jump_to_next_mark(&mut self) -> bool {
        let Some(cursor) = self.cursor else {
            return false;
        };
        let next = (cursor + 1..self.visible.len()).find(|&pos| self.is_marked_at(pos));
        next.map(|pos| self.cursor = Some(pos)).is_some()
    }

    /// Previous marked row above the cursor. No wrap-around.
    pub fn jump_to_previous_mark(&mut self) -> bool {
        let Some(cursor) = self.cursor else {
            return false;
        };
        let prev = (0..cursor).rev().find(|&pos| self.is_marked_at(pos));
        prev.map(|pos| self.cursor = Some(pos)).is_some()
    }

    fn is_marked_at(&self, pos: usize) -> bool {
        self.visible_row(pos)
            .is_some_and(|row| self.store.mark(row.id()).is_marked())
    }

    // ===== Time window =====

    /// Editor for the current window. Fails when no row has a timestamp.
    pub fn time_window_editor(&self) -> Result<TimeWindowEditor, TimeWindowError> {
        let bounds = self.time_bounds.ok_or(TimeWindowError::NoTimestamps)?;
        Ok(TimeWindowEditor::open(
            bounds,
            &self.filter.time_window,
            self.time_step,
        ))
    }

    /// Validate, clamp, and enable a window. On error nothing changes.
    pub fn apply_time_window(
        &mut self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<(), TimeWindowError> {
        let bounds = self.time_bounds.ok_or(TimeWindowError::NoTimestamps)?;
        let (start, end) = bounds.validate(start, end)?;
        self.filter.time_window = TimeWindow::between(start, end);
        self.refilter();
        Ok(())
    }

    /// Turn the window off.
    pub fn disable_time_window(&mut self) {
        self.filter.time_window = TimeWindow {
            enabled: false,
            ..self.filter.time_window
        };
        self.refilter();
    }

    // ===== Layout =====

    /// Lay columns out for a table area and remember its height.
    pub fn recompute_layout(&mut self, width: usize, height: usize) {
        let max_ordinal = self
            .store
            .rows()
            .iter()
            .map(Row::source_ordinal)
            .max()
            .unwrap_or(0);
        let available = width.saturating_sub(gutter_width(max_ordinal));
        let laid_out = layout_columns(self.store.columns(), available);
        for (column, updated) in self.store.columns_mut().iter_mut().zip(laid_out) {
            *column = updated;
        }
        self.table_width = width;
        self.table_height = height;
    }

    /// Remember how many rows the renderer fit on screen.
    pub fn record_page_size(&mut self, rows: usize) {
        self.page_size = rows.max(1);
    }
}

#[cfg(test)]
#[path = "app_state_tests.rs"]
mod tests;
