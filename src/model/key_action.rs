//! Domain-level keyboard actions independent of key bindings.

use super::command::CommandKind;

/// Actions available in view mode.
///
/// These represent user intent, not specific keys. The mapping from
/// `crossterm::event::KeyEvent` to `KeyAction` is handled by `KeyBindings`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    // Navigation
    /// Move the cursor one row down. Default: j/↓
    RowDown,
    /// Move the cursor one row up. Default: k/↑
    RowUp,
    /// Move down by the last visible page. Default: d/Page Down
    PageDown,
    /// Move up by the last visible page. Default: u/Page Up
    PageUp,
    /// Jump to the first visible row. Default: g/Home
    JumpToStart,
    /// Jump to the last visible row. Default: G/End
    JumpToEnd,

    // Marks
    /// Jump to the next marked row. Default: n
    NextMark,
    /// Jump to the previous marked row. Default: N
    PrevMark,
    /// Toggle showing only marked rows. Default: M
    ToggleMarksOnly,

    // Search
    /// Move to the next search match. Default: ]
    NextMatch,
    /// Move to the previous search match. Default: [
    PrevMatch,

    // Modal input
    /// Enter a command-mode prompt.
    BeginCommand(CommandKind),
    /// Clear the regex filter. Default: F
    ClearFilter,
    /// Open the time-window editor. Default: t
    OpenTimeWindow,

    // Panels and dialogs
    /// Show or hide the comment drawer. Default: v
    ToggleCommentDrawer,
    /// Open the save-snapshot dialog. Default: s
    Save,
    /// Open the CSV export dialog. Default: e
    Export,
    /// Show the help overlay. Default: ?
    Help,

    // Application
    /// Copy the current row to the clipboard. Default: y
    CopyRow,
    /// Exit. Default: q/Ctrl+C
    Quit,
}
