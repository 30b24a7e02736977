//! Time-window editing.
//!
//! The editor holds a draft start/end as text fields plus a scrubber that
//! nudges the draft by a step. Nothing is applied until Enter.

use super::filter::TimeWindow;
use super::line_input::LineInput;
use crate::model::timestamp::{format_input_timestamp, parse_input_timestamp};
use chrono::{Duration, NaiveDateTime};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use thiserror::Error;

/// Smallest scrubber step.
pub fn min_step() -> Duration {
    Duration::minutes(15)
}

/// Largest scrubber step.
pub fn max_step() -> Duration {
    Duration::hours(2)
}

/// Step the scrubber starts with unless configured otherwise.
pub fn default_step() -> Duration {
    Duration::minutes(30)
}

/// Why a window could not be applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TimeWindowError {
    /// The dataset has no parsable timestamps.
    #[error("No timestamps available")]
    NoTimestamps,
    /// The start field is not `YYYY-MM-DD HH:MM:SS`.
    #[error("Invalid start time")]
    InvalidStart,
    /// The end field is not `YYYY-MM-DD HH:MM:SS`.
    #[error("Invalid end time")]
    InvalidEnd,
    /// Start is later than end, as typed or after clamping.
    #[error("Start is after end")]
    StartAfterEnd,
}

/// Earliest and latest timestamps in the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeBounds {
    /// Earliest parsed timestamp.
    pub min: NaiveDateTime,
    /// Latest parsed timestamp.
    pub max: NaiveDateTime,
}

impl TimeBounds {
    /// Bounds over every present timestamp, or `None` if there are none.
    pub fn from_times<'a, I>(times: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Option<NaiveDateTime>>,
    {
        times
            .into_iter()
            .flatten()
            .fold(None, |acc: Option<Self>, &ts| match acc {
                None => Some(Self { min: ts, max: ts }),
                Some(b) => Some(Self {
                    min: b.min.min(ts),
                    max: b.max.max(ts),
                }),
            })
    }

    /// `ts` pulled into `[min, max]`.
    pub fn clamp(&self, ts: NaiveDateTime) -> NaiveDateTime {
        ts.clamp(self.min, self.max)
    }

    /// Check the order, clamp both ends, and check again.
    pub fn validate(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<(NaiveDateTime, NaiveDateTime), TimeWindowError> {
        if start > end {
            return Err(TimeWindowError::StartAfterEnd);
        }
        let (start, end) = (self.clamp(start), self.clamp(end));
        if start > end {
            return Err(TimeWindowError::StartAfterEnd);
        }
        Ok((start, end))
    }
}

/// `"30m"`, `"2h"`.
pub fn format_step(step: Duration) -> String {
    let minutes = step.num_minutes();
    if minutes % 60 == 0 {
        format!("{}h", minutes / 60)
    } else {
        format!("{minutes}m")
    }
}

/// Footer label for the active window.
pub fn window_label(window: &TimeWindow) -> String {
    match (window.enabled, window.start, window.end) {
        (true, Some(start), Some(end)) => format!(
            "Window: {} - {}",
            format_input_timestamp(start),
            format_input_timestamp(end)
        ),
        _ => "Window: off".to_string(),
    }
}

/// Part of the editor that receives keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeField {
    /// Start timestamp text.
    Start,
    /// End timestamp text.
    End,
    /// Arrow-key nudging of the draft.
    Scrubber,
}

impl TimeField {
    fn next(self) -> Self {
        match self {
            Self::Start => Self::End,
            Self::End => Self::Scrubber,
            Self::Scrubber => Self::Start,
        }
    }

    fn prev(self) -> Self {
        match self {
            Self::Start => Self::Scrubber,
            Self::End => Self::Start,
            Self::Scrubber => Self::End,
        }
    }
}

/// What the caller should do after a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorOutcome {
    /// Keep editing.
    Pending,
    /// Close without applying.
    Cancel,
    /// Apply this validated window and close.
    Apply {
        /// Clamped start.
        start: NaiveDateTime,
        /// Clamped end.
        end: NaiveDateTime,
    },
    /// Turn the window off; the draft now shows full bounds.
    Reset,
    /// Enter was pressed on an invalid draft; keep editing.
    Rejected(TimeWindowError),
}

/// Draft state of the time-window editor.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeWindowEditor {
    /// Field receiving keys.
    pub focus: TimeField,
    /// Start field text.
    pub start: LineInput,
    /// End field text.
    pub end: LineInput,
    /// Scrubber step.
    pub step: Duration,
    /// Dataset bounds.
    pub bounds: TimeBounds,
    /// Last validation error, shown until the next edit.
    pub error: Option<TimeWindowError>,
}

impl TimeWindowEditor {
    /// Editor seeded from the current window, or full bounds when it is off.
    pub fn open(bounds: TimeBounds, current: &TimeWindow, step: Duration) -> Self {
        let (start, end) = match (current.enabled, current.start, current.end) {
            (true, Some(start), Some(end)) => (start, end),
            _ => (bounds.min, bounds.max),
        };
        Self {
            focus: TimeField::Start,
            start: LineInput::new(format_input_timestamp(start)),
            end: LineInput::new(format_input_timestamp(end)),
            step: step.clamp(min_step(), max_step()),
            bounds,
            error: None,
        }
    }

    /// Draft parsed from the fields, falling back to bounds for bad text.
    pub fn draft(&self) -> (NaiveDateTime, NaiveDateTime) {
        (
            parse_input_timestamp(self.start.text()).unwrap_or(self.bounds.min),
            parse_input_timestamp(self.end.text()).unwrap_or(self.bounds.max),
        )
    }

    /// Route one key.
    pub fn handle_key(&mut self, key: KeyEvent) -> EditorOutcome {
        match key.code {
            KeyCode::Esc => return EditorOutcome::Cancel,
            KeyCode::Enter => return self.submit(),
            KeyCode::Tab => {
                self.focus = self.focus.next();
                return EditorOutcome::Pending;
            }
            KeyCode::BackTab => {
                self.focus = self.focus.prev();
                return EditorOutcome::Pending;
            }
            KeyCode::Char('r') => {
                self.set_draft(self.bounds.min, self.bounds.max);
                self.error = None;
                return EditorOutcome::Reset;
            }
            _ => {}
        }

        self.error = None;
        match self.focus {
            TimeField::Scrubber => self.handle_scrubber_key(key),
            TimeField::Start => edit_field(&mut self.start, key),
            TimeField::End => edit_field(&mut self.end, key),
        }
        EditorOutcome::Pending
    }

    fn submit(&mut self) -> EditorOutcome {
        let result = parse_input_timestamp(self.start.text())
            .ok_or(TimeWindowError::InvalidStart)
            .and_then(|start| {
                parse_input_timestamp(self.end.text())
                    .ok_or(TimeWindowError::InvalidEnd)
                    .map(|end| (start, end))
            })
            .and_then(|(start, end)| self.bounds.validate(start, end));
        match result {
            Ok((start, end)) => EditorOutcome::Apply { start, end },
            Err(err) => {
                self.error = Some(err);
                EditorOutcome::Rejected(err)
            }
        }
    }

    fn handle_scrubber_key(&mut self, key: KeyEvent) {
        let expand = key.modifiers.contains(KeyModifiers::SHIFT);
        match key.code {
            KeyCode::Left if expand => self.expand_start(),
            KeyCode::Right if expand => self.expand_end(),
            KeyCode::Left => self.shift(-self.step),
            KeyCode::Right => self.shift(self.step),
            KeyCode::Char('-') => self.step = (self.step / 2).max(min_step()),
            KeyCode::Char('+') | KeyCode::Char('=') => {
                self.step = (self.step * 2).min(max_step())
            }
            _ => {}
        }
    }

    /// Move the draft by `delta`, keeping its duration and staying in bounds.
    fn shift(&mut self, delta: Duration) {
        let (start, end) = self.draft();
        let span = end - start;
        let (mut start, mut end) = (start + delta, end + delta);
        if end > self.bounds.max {
            end = self.bounds.max;
            start = (end - span).max(self.bounds.min);
        }
        if start < self.bounds.min {
            start = self.bounds.min;
            end = (start + span).min(self.bounds.max);
        }
        self.set_draft(start, end);
    }

    fn expand_start(&mut self) {
        let (start, end) = self.draft();
        self.set_draft(self.bounds.clamp(start - self.step), end);
    }

    fn expand_end(&mut self) {
        let (start, end) = self.draft();
        self.set_draft(start, self.bounds.clamp(end + self.step));
    }

    fn set_draft(&mut self, start: NaiveDateTime, end: NaiveDateTime) {
        self.start = LineInput::new(format_input_timestamp(start));
        self.end = LineInput::new(format_input_timestamp(end));
    }
}

fn edit_field(field: &mut LineInput, key: KeyEvent) {
    match key.code {
        KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            field.delete_prev_word()
        }
        KeyCode::Char('h') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            field.delete_last_char()
        }
        KeyCode::Backspace | KeyCode::Delete => field.delete_last_char(),
        KeyCode::Char(ch) if ch.is_ascii_digit() || matches!(ch, '-' | ':' | ' ') => field.push(ch),
        _ => {}
    }
}

#[cfg(test)]
#[path = "time_window_tests.rs"]
mod tests;
