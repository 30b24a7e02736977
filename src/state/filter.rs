//! Filter pipeline: derives the visible-index list from the row store.

use crate::model::{RowStore, RowId};
use chrono::NaiveDateTime;
use regex::Regex;
use thiserror::Error;

/// A filter pattern that failed to compile.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct FilterError(#[from] regex::Error);

/// Optional inclusive time bound applied to parsed row timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeWindow {
    /// Whether the bound is applied.
    pub enabled: bool,
    /// Inclusive lower bound.
    pub start: Option<NaiveDateTime>,
    /// Inclusive upper bound.
    pub end: Option<NaiveDateTime>,
}

impl TimeWindow {
    /// An enabled window over `[start, end]`.
    pub fn between(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            enabled: true,
            start: Some(start),
            end: Some(end),
        }
    }

    /// Whether a row timestamp passes. Rows without one never pass while the
    /// window is enabled.
    pub fn admits(&self, ts: Option<NaiveDateTime>) -> bool {
        if !self.enabled {
            return true;
        }
        let Some(ts) = ts else {
            return false;
        };
        self.start.is_none_or(|start| ts >= start) && self.end.is_none_or(|end| ts <= end)
    }
}

/// Every predicate that narrows the visible rows.
#[derive(Debug, Clone, Default)]
pub struct FilterState {
    /// Compiled regex filter.
    pub regex: Option<Regex>,
    /// Pattern as the user typed it, for seeding the prompt.
    pub pattern: String,
    /// Only rows with a mark pass.
    pub marks_only: bool,
    /// Optional time bound.
    pub time_window: TimeWindow,
}

impl FilterState {
    /// True when no predicate would drop a row.
    pub fn is_pass_through(&self) -> bool {
        self.regex.is_none() && !self.marks_only && !self.time_window.enabled
    }
}

/// Compile a filter pattern.
///
/// Blank patterns mean "no filter". Patterns are case-insensitive unless they
/// open with an inline flag group that sets `i` themselves.
pub fn compile_filter(pattern: &str) -> Result<Option<Regex>, FilterError> {
    if pattern.trim().is_empty() {
        return Ok(None);
    }
    let source = if has_explicit_case_flag(pattern) {
        pattern.to_string()
    } else {
        format!("(?i){pattern}")
    };
    Ok(Some(Regex::new(&source)?))
}

/// Flag letters the regex crate accepts in an inline `(?flags)` group.
const INLINE_FLAGS: &str = "imsUuxR-";

fn has_explicit_case_flag(pattern: &str) -> bool {
    let Some(rest) = pattern.strip_prefix("(?") else {
        return false;
    };
    let Some(flags_end) = rest.find([')', ':']) else {
        return false;
    };
    let flags = &rest[..flags_end];
    !flags.is_empty() && flags.chars().all(|ch| INLINE_FLAGS.contains(ch)) && flags.contains('i')
}

/// Store positions of every row that passes all active predicates, in order.
///
/// `row_times[i]` is the parsed timestamp of row `i`, if it had one.
pub fn rebuild(
    store: &RowStore,
    row_times: &[Option<NaiveDateTime>],
    state: &FilterState,
) -> Vec<usize> {
    if state.is_pass_through() {
        return (0..store.len()).collect();
    }

    store
        .rows()
        .iter()
        .enumerate()
        .filter(|(index, row)| {
            if state.marks_only && !store.mark(row.id()).is_marked() {
                return false;
            }
            let ts = row_times.get(*index).copied().flatten();
            if !state.time_window.admits(ts) {
                return false;
            }
            state
                .regex
                .as_ref()
                .is_none_or(|regex| regex.is_match(&row.content()))
        })
        .map(|(index, _)| index)
        .collect()
}

/// Which way a search moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchDirection {
    /// Toward the end of the list.
    Forward,
    /// Toward the start of the list.
    Backward,
}

/// Visible position of the next row containing `query`, wrapping around.
///
/// Matching is a case-insensitive substring test on the row content. The
/// scan starts just past `cursor` and may land back on it. With no cursor it
/// starts at the top (forward) or the bottom (backward).
pub fn find_match(
    store: &RowStore,
    visible: &[usize],
    cursor: Option<usize>,
    query: &str,
    direction: SearchDirection,
) -> Option<usize> {
    let len = visible.len();
    if len == 0 || query.is_empty() {
        return None;
    }
    let needle = query.to_lowercase();
    let matches = |pos: usize| {
        store
            .row_at(visible[pos])
            .is_some_and(|row| row.content().to_lowercase().contains(&needle))
    };

    (1..=len)
        .map(|step| match (direction, cursor) {
            (SearchDirection::Forward, Some(c)) => (c + step) % len,
            (SearchDirection::Forward, None) => step - 1,
            (SearchDirection::Backward, Some(c)) => (c + len * 2 - step) % len,
            (SearchDirection::Backward, None) => len - step,
        })
        .find(|&pos| matches(pos))
}

/// Visible position of the row with identity `id`, if it is still visible.
pub fn position_of(store: &RowStore, visible: &[usize], id: RowId) -> Option<usize> {
    visible
        .iter()
        .position(|&index| store.row_at(index).is_some_and(|row| row.id() == id))
}

#[cfg(test)]
#[path = "filter_tests.rs"]
mod tests;
