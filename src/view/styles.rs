//! Colors for the table, footer and drawers.
//!
//! Every style is resolved once per frame through `TableStyles`, so turning
//! colors off is a single switch.

use crate::model::MarkColor;
use crate::state::NoticeKind;
use ratatui::style::{Color, Modifier, Style};

/// Dimmed text for placeholders and hints.
pub const MUTED_TEXT: Style = Style::new().fg(Color::DarkGray);

/// Category headers in the help overlay.
pub const SECTION_HEADER: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);

/// Glyph drawn in the gutter of marked rows.
pub const PILL_MARKER: &str = "▐";

// ===== ColorConfig =====

/// Configuration for color output.
///
/// Determines whether colors should be enabled or disabled based on:
/// - `--no-color` CLI flag
/// - `NO_COLOR` environment variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Create a ColorConfig from CLI args and environment.
    ///
    /// Priority (first match wins):
    /// 1. `--no-color` flag (disables colors)
    /// 2. `NO_COLOR` env var (any value disables colors)
    /// 3. Default: colors enabled
    pub fn from_env_and_args(no_color_flag: bool) -> Self {
        let enabled = !no_color_flag && std::env::var("NO_COLOR").is_err();
        Self { enabled }
    }

    /// Check if colors are enabled.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

// ===== TableStyles =====

/// Resolved styles for one frame.
#[derive(Debug, Clone, Copy)]
pub struct TableStyles {
    /// Ordinary cell text.
    pub row_text: Style,
    /// Whole cursor row.
    pub cursor_row: Style,
    /// Search hits inside cells.
    pub search_highlight: Style,
    /// Column header line.
    pub header: Style,
    /// Table frame.
    pub border: Style,
    /// Mode badge at the start of the footer.
    pub mode_pill: Style,
    /// Footer background.
    pub footer_bar: Style,
    /// Focused input field in drawers and dialogs.
    pub focused_field: Style,
    colors: bool,
}

impl TableStyles {
    /// Styles for the given color setting.
    ///
    /// Without colors, the cursor row and search hits fall back to
    /// reverse video so they stay visible.
    pub fn with_color_config(config: ColorConfig) -> Self {
        if config.colors_enabled() {
            Self {
                row_text: Style::default().fg(Color::Rgb(0xc0, 0xc0, 0xc0)),
                cursor_row: Style::default()
                    .fg(Color::Rgb(0xe0, 0xe0, 0xe0))
                    .bg(Color::Rgb(0x3a, 0x3a, 0x3a)),
                search_highlight: Style::default()
                    .fg(Color::Black)
                    .bg(Color::Rgb(0xf5, 0xc5, 0x42)),
                header: Style::default().add_modifier(Modifier::BOLD),
                border: Style::default().fg(Color::Indexed(240)),
                mode_pill: Style::default()
                    .fg(Color::Black)
                    .bg(Color::Rgb(0xff, 0x9f, 0x1c))
                    .add_modifier(Modifier::BOLD),
                footer_bar: Style::default().bg(Color::Rgb(0x2b, 0x2b, 0x2b)),
                focused_field: Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                colors: true,
            }
        } else {
            Self {
                row_text: Style::default(),
                cursor_row: Style::default().add_modifier(Modifier::REVERSED),
                search_highlight: Style::default().add_modifier(Modifier::UNDERLINED),
                header: Style::default().add_modifier(Modifier::BOLD),
                border: Style::default(),
                mode_pill: Style::default().add_modifier(Modifier::REVERSED),
                footer_bar: Style::default(),
                focused_field: Style::default().add_modifier(Modifier::BOLD),
                colors: false,
            }
        }
    }

    /// Style of the gutter pill for a mark.
    pub fn mark(&self, color: MarkColor) -> Style {
        if !self.colors {
            return Style::default();
        }
        match color {
            MarkColor::None => Style::default(),
            MarkColor::Red => Style::default().fg(Color::Red),
            MarkColor::Green => Style::default().fg(Color::Green),
            MarkColor::Amber => Style::default().fg(Color::Yellow),
        }
    }

    /// Style of a notice in the footer.
    pub fn notice(&self, kind: NoticeKind) -> Style {
        if !self.colors {
            return Style::default();
        }
        match kind {
            NoticeKind::Info => Style::default().fg(Color::Cyan),
            NoticeKind::Success => Style::default().fg(Color::Green),
            NoticeKind::Warn => Style::default().fg(Color::Yellow),
            NoticeKind::Error => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        }
    }

    /// Text that should recede.
    pub fn muted(&self) -> Style {
        if self.colors {
            MUTED_TEXT
        } else {
            Style::default()
        }
    }
}

impl Default for TableStyles {
    fn default() -> Self {
        Self::with_color_config(ColorConfig::default())
    }
}

// ===== Tests =====
