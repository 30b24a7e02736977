//! UI state machine (pure).
//!
//! All state transitions are pure functions testable without TUI.

pub mod app_state;
pub mod command;
pub mod dialog;
pub mod filter;
pub mod line_input;
pub mod notice;
pub mod time_window;

// Re-export for convenience
pub use app_state::{AppState, CommandInput, InputMode, JumpOutcome};
pub use command::{handle_key, Effect};
pub use dialog::{Dialog, DialogKind, DialogOutcome};
pub use filter::{FilterError, FilterState, TimeWindow};
pub use line_input::LineInput;
pub use notice::{Notice, NoticeKind, NoticeTicket, NoticeTimers};
pub use time_window::{TimeBounds, TimeField, TimeWindowEditor, TimeWindowError};
