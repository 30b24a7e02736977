//! Layout dimension constants for TUI rendering.
//!
//! Centralized location for all layout-related numeric values to enable
//! consistent tuning across the application.

/// Height of the column header line above the table.
pub const HEADER_HEIGHT: u16 = 1;

/// Height of the footer in lines.
///
/// Line 1 carries the mode pill, file and filter state; line 2 the notice
/// or prompt and the key legend.
pub const FOOTER_HEIGHT: u16 = 2;

/// Height of the comment drawer, border included.
pub const COMMENT_DRAWER_HEIGHT: u16 = 5;

/// Height of the time-window drawer, border included.
pub const TIME_DRAWER_HEIGHT: u16 = 7;

/// Width percentage for help overlay popup.
///
/// Percentage of screen width (0-100) for the help overlay modal.
pub const HELP_POPUP_WIDTH_PERCENT: u16 = 70;

/// Height percentage for help overlay popup.
///
/// Percentage of screen height (0-100) for the help overlay modal.
pub const HELP_POPUP_HEIGHT_PERCENT: u16 = 80;

/// Width percentage for the save and export prompts.
pub const PATH_DIALOG_WIDTH_PERCENT: u16 = 60;

/// Height of the save and export prompts, border included.
pub const PATH_DIALOG_HEIGHT: u16 = 6;

/// Appended to the idle hint on the second footer line.
pub const HELP_HINT: &str = "? help";

/// Legend shown while the time-window editor is open.
pub const TIME_EDITOR_HINT: &str =
    "tab: field   ←/→: shift   shift+←/→: widen   -/+: step   r: reset   enter: apply   esc: cancel";
