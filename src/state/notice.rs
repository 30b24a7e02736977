//! Transient status messages that clear themselves.
//!
//! Every notice bumps a sequence number. Clearing is requested with the
//! sequence of the notice it was scheduled for, and is ignored if a newer
//! notice has replaced it since. Stale timers are never cancelled; they
//! simply fail that check.

use std::time::{Duration, Instant};

/// Default lifetime of a notice.
pub const DEFAULT_NOTICE_DURATION: Duration = Duration::from_millis(2000);

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// Neutral information.
    Info,
    /// An operation succeeded.
    Success,
    /// Input was rejected.
    Warn,
    /// An operation failed.
    Error,
}

impl NoticeKind {
    /// Icon shown before the message.
    pub fn icon(self) -> &'static str {
        match self {
            Self::Info => "ℹ",
            Self::Success => "✓",
            Self::Warn => "!",
            Self::Error => "×",
        }
    }
}

/// Handle for the clear that should follow a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoticeTicket {
    /// Sequence of the notice to clear.
    pub seq: u64,
    /// How long to wait.
    pub after: Duration,
}

/// The currently shown notice, if any.
#[derive(Debug, Clone)]
pub struct Notice {
    message: Option<(NoticeKind, String)>,
    seq: u64,
    duration: Duration,
}

impl Default for Notice {
    fn default() -> Self {
        Self::new(DEFAULT_NOTICE_DURATION)
    }
}

impl Notice {
    /// No notice, clearing after `duration`.
    pub fn new(duration: Duration) -> Self {
        Self {
            message: None,
            seq: 0,
            duration,
        }
    }

    /// Show a message and return the ticket for its clear.
    pub fn show(&mut self, kind: NoticeKind, message: impl Into<String>) -> NoticeTicket {
        self.seq += 1;
        self.message = Some((kind, message.into()));
        NoticeTicket {
            seq: self.seq,
            after: self.duration,
        }
    }

    /// Clear if `seq` is still the current notice. Returns whether it cleared.
    pub fn clear(&mut self, seq: u64) -> bool {
        if seq != self.seq || self.message.is_none() {
            return false;
        }
        self.message = None;
        true
    }

    /// Sequence of the latest notice.
    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// Kind and text of the shown notice.
    pub fn current(&self) -> Option<(NoticeKind, &str)> {
        self.message
            .as_ref()
            .map(|(kind, text)| (*kind, text.as_str()))
    }

    /// `"<icon> <message>"`, or `None` when nothing is shown.
    pub fn display(&self) -> Option<String> {
        self.current()
            .map(|(kind, text)| format!("{} {}", kind.icon(), text))
    }
}

/// Pending clears, fired by the event loop.
#[derive(Debug, Default)]
pub struct NoticeTimers {
    pending: Vec<(Instant, u64)>,
}

impl NoticeTimers {
    /// Schedule a ticket relative to `now`.
    pub fn schedule(&mut self, ticket: NoticeTicket, now: Instant) {
        self.pending.push((now + ticket.after, ticket.seq));
    }

    /// Remove and return the sequences whose deadline has passed.
    pub fn expired(&mut self, now: Instant) -> Vec<u64> {
        let (due, waiting): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|(at, _)| *at <= now);
        self.pending = waiting;
        due.into_iter().map(|(_, seq)| seq).collect()
    }

    /// Time until the next deadline, if any.
    pub fn next_deadline(&self, now: Instant) -> Option<Duration> {
        self.pending
            .iter()
            .map(|(at, _)| at.saturating_duration_since(now))
            .min()
    }

    /// Number of scheduled clears.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// True when nothing is scheduled.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
