//! Acceptance Test Harness for TUI testing
//!
//! Provides a high-level API for acceptance testing user stories by wrapping
//! TuiApp<TestBackend> with convenient methods for simulating user interactions.

use crate::source::import::read_csv;
use crate::source::load_dataset;
use crate::state::AppState;
use crate::view::{TuiApp, TuiError};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::backend::TestBackend;
use ratatui::Terminal;
use std::path::{Path, PathBuf};

/// Convert a ratatui buffer to a string representation.
///
/// Captures the visual output character by character, preserving layout.
/// Empty lines are removed to keep assertions readable.
pub fn buffer_to_string(buffer: &ratatui::buffer::Buffer) -> String {
    let area = buffer.area();
    let mut lines = Vec::new();

    for y in area.top()..area.bottom() {
        let mut line = String::new();
        for x in area.left()..area.right() {
            let cell = &buffer[(x, y)];
            line.push_str(cell.symbol());
        }
        let trimmed = line.trim_end();
        if !trimmed.is_empty() {
            lines.push(trimmed.to_string());
        }
    }

    lines.join("\n")
}

/// Build state from inline CSV text.
///
/// # Panics
/// Panics if the CSV is rejected; test input is expected to be valid.
pub fn state_from_csv(text: &str) -> AppState {
    let dataset = read_csv(text.as_bytes(), Path::new("inline.csv"))
        .expect("inline CSV should parse");
    AppState::new(dataset.into_store())
}

/// Test harness for acceptance testing
///
/// Wraps TuiApp<TestBackend> to provide a clean API for simulating user
/// interactions in acceptance tests.
pub struct AcceptanceTestHarness {
    app: TuiApp<TestBackend>,
    running: bool,
}

impl AcceptanceTestHarness {
    /// Load fixture into test app with default terminal size (100x30)
    pub fn from_fixture(path: &str) -> Result<Self, TuiError> {
        Self::from_fixture_with_size(path, 100, 30)
    }

    /// Load fixture with custom terminal size
    ///
    /// `path` is relative to the crate root. The file goes through the same
    /// loader as the binary, so `.csv` and `.json` both work.
    pub fn from_fixture_with_size(path: &str, width: u16, height: u16) -> Result<Self, TuiError> {
        let full_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(path);
        let dataset = load_dataset(&full_path).map_err(crate::model::AppError::from)?;
        let mut state = AppState::new(dataset.into_store());
        state.source_path = Some(full_path);
        Ok(Self::from_state(state, width, height))
    }

    /// Wrap already-built state
    pub fn from_state(state: AppState, width: u16, height: u16) -> Self {
        let backend = TestBackend::new(width, height);
        let terminal = Terminal::new(backend).expect("TestBackend terminal");
        let mut app = TuiApp::new_for_test(terminal, state);
        // Lay out columns and capture the page size like the first real frame
        app.render_test().expect("initial render");
        Self { app, running: true }
    }

    /// Send a single key event
    ///
    /// Returns `true` if the app quit as a result of this key.
    pub fn send_key(&mut self, key: KeyCode) -> bool {
        self.send_key_with_mods(key, KeyModifiers::NONE)
    }

    /// Send key with modifiers (e.g., Ctrl+C)
    pub fn send_key_with_mods(&mut self, key: KeyCode, mods: KeyModifiers) -> bool {
        if !self.running {
            return true; // Already quit
        }

        let quit = self.app.handle_key_test(KeyEvent::new(key, mods));
        if quit {
            self.running = false;
        } else {
            // Redraw after every key, as the event loop does
            self.app.render_test().expect("render after key");
        }
        quit
    }

    /// Send a sequence of keys
    ///
    /// Continues sending keys until the sequence is exhausted or app quits.
    pub fn send_keys(&mut self, keys: &[KeyCode]) {
        for key in keys {
            if self.send_key(*key) {
                break; // Quit encountered
            }
        }
    }

    /// Type text (sends individual character key events)
    pub fn type_text(&mut self, text: &str) {
        for ch in text.chars() {
            if self.send_key(KeyCode::Char(ch)) {
                break; // Quit encountered
            }
        }
    }

    /// Access app state for assertions
    pub fn state(&self) -> &AppState {
        self.app.app_state()
    }

    /// Check if app is still running (didn't quit)
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Render the current frame to a string
    ///
    /// # Panics
    /// Panics if rendering fails (should never happen with TestBackend)
    pub fn render_to_string(&mut self) -> String {
        self.app
            .render_test()
            .expect("Rendering should succeed in test harness");
        buffer_to_string(self.app.terminal().backend().buffer())
    }

    /// Source ordinal of the row under the cursor, if any.
    pub fn cursor_line(&self) -> Option<usize> {
        self.state().current_row().map(|row| row.source_ordinal())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_to_string_drops_blank_lines() {
        let mut terminal = Terminal::new(TestBackend::new(10, 3)).unwrap();
        terminal
            .draw(|frame| {
                frame.render_widget(ratatui::widgets::Paragraph::new("hi"), frame.area());
            })
            .unwrap();

        assert_eq!(buffer_to_string(terminal.backend().buffer()), "hi");
    }

    #[test]
    fn harness_tracks_quit() {
        let mut harness = AcceptanceTestHarness::from_state(state_from_csv("details\na\n"), 80, 20);
        assert!(harness.is_running());

        assert!(harness.send_key(KeyCode::Char('q')));
        assert!(!harness.is_running());
    }
}
