//! TUI rendering and terminal management (impure shell)

pub mod constants;
mod dialog;
mod drawer;
mod footer;
mod help;
mod layout;
mod styles;
mod table;

pub use help::render_help_overlay;
pub use layout::{render_layout, screen_areas, table_inner_size, ScreenAreas};
pub use styles::{ColorConfig, TableStyles};
pub use table::{highlight_spans, wrap_text};

use crate::config::keybindings::KeyBindings;
use crate::model::AppError;
use crate::source::{copy_text, export_csv, save_meta, save_snapshot};
use crate::state::{handle_key, AppState, Effect, InputMode, NoticeKind, NoticeTimers};
use crossterm::{
    event::{
        self, DisableFocusChange, EnableFocusChange, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers,
    },
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use std::io::{self, Stdout};
use std::path::Path;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Longest wait between polls when no notice is pending.
const TIMER_INTERVAL: Duration = Duration::from_millis(500);

/// File name suffix that makes the save dialog write only marks and comments.
pub const META_SUFFIX: &str = ".meta.json";

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),

    /// Application error
    #[error("Application error: {0}")]
    App(#[from] AppError),
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    terminal: Terminal<B>,
    app_state: AppState,
    key_bindings: KeyBindings,
    /// Pending notice clears
    timers: NoticeTimers,
    styles: TableStyles,
    /// Table size the columns were last laid out for
    laid_out_for: Option<(usize, usize)>,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Create and initialize a new TUI application
    ///
    /// Sets up terminal in raw mode with alternate screen
    pub fn new(app_state: AppState, colors: ColorConfig) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        stdout.execute(EnableFocusChange)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        let mut app = Self {
            terminal,
            app_state,
            key_bindings: KeyBindings::default(),
            timers: NoticeTimers::default(),
            styles: TableStyles::with_color_config(colors),
            laid_out_for: None,
        };
        app.schedule_notices(Instant::now());
        Ok(app)
    }

    /// Run the main event loop
    ///
    /// Returns when user quits (q or Ctrl+C). Sleeps in `event::poll` until a
    /// key arrives, the terminal resizes, or the next notice expires.
    pub fn run(&mut self) -> Result<(), TuiError> {
        self.draw()?;

        loop {
            let now = Instant::now();
            let timeout = self
                .timers
                .next_deadline(now)
                .map_or(TIMER_INTERVAL, |deadline| deadline.min(TIMER_INTERVAL));

            if event::poll(timeout)? {
                match event::read()? {
                    Event::Key(key) => {
                        if key.kind != KeyEventKind::Press {
                            continue;
                        }
                        if self.handle_key(key) {
                            return Ok(()); // User quit
                        }
                        self.draw()?;
                    }
                    Event::Resize(width, height) => {
                        self.handle_resize(width, height);
                        self.draw()?;
                    }
                    Event::FocusLost => {
                        self.handle_focus_change(false);
                        self.draw()?;
                    }
                    Event::FocusGained => {
                        self.handle_focus_change(true);
                        self.draw()?;
                    }
                    _ => {}
                }
            }

            if self.fire_timers(Instant::now()) {
                self.draw()?;
            }
        }
    }
}

impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    /// Handle a single keyboard event
    ///
    /// Returns true if app should quit
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        // Ctrl+C always quits, whatever the mode
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        let effect = handle_key(&mut self.app_state, key, &self.key_bindings);
        let quit = self.apply_effect(effect);
        self.schedule_notices(Instant::now());
        quit
    }

    /// Terminal focus moves the text cursor of an open dialog.
    fn handle_focus_change(&mut self, gained: bool) {
        if let InputMode::Dialog(dialog) = &mut self.app_state.mode {
            if gained {
                dialog.focus();
            } else {
                dialog.blur();
            }
        }
    }

    /// Carry out file and clipboard work requested by a key.
    fn apply_effect(&mut self, effect: Effect) -> bool {
        match effect {
            Effect::None => {}
            Effect::Quit => return true,
            Effect::Save(path) => self.save(&path),
            Effect::Export(path) => self.export(&path),
            Effect::CopyRow(text) => match copy_text(&text) {
                Ok(()) => self.app_state.notify(NoticeKind::Success, "Row copied"),
                Err(err) => {
                    warn!(error = %err, "Clipboard copy failed");
                    self.app_state
                        .notify(NoticeKind::Error, format!("Copy failed: {err}"));
                }
            },
        }
        false
    }

    fn save(&mut self, path: &Path) {
        let meta_only = path
            .file_name()
            .is_some_and(|name| name.to_string_lossy().ends_with(META_SUFFIX));
        let result = if meta_only {
            save_meta(self.app_state.store(), path)
        } else {
            save_snapshot(self.app_state.store(), path)
        };
        match result {
            Ok(()) => {
                info!(path = %path.display(), meta_only, "Saved");
                self.app_state.last_save = Some(path.to_path_buf());
                let what = if meta_only { "marks and comments" } else { "snapshot" };
                self.app_state.notify(
                    NoticeKind::Success,
                    format!("Saved {what} to {}", path.display()),
                );
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "Save failed");
                self.app_state
                    .notify(NoticeKind::Error, format!("Save failed: {err}"));
            }
        }
    }

    fn export(&mut self, path: &Path) {
        match export_csv(self.app_state.store(), self.app_state.visible(), path) {
            Ok(rows) => {
                self.app_state.last_export = Some(path.to_path_buf());
                self.app_state.notify(
                    NoticeKind::Success,
                    format!("Exported {rows} rows to {}", path.display()),
                );
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "Export failed");
                self.app_state
                    .notify(NoticeKind::Error, format!("Export failed: {err}"));
            }
        }
    }

    /// Queue clears for notices shown since the last call.
    fn schedule_notices(&mut self, now: Instant) {
        for ticket in self.app_state.take_notice_tickets() {
            self.timers.schedule(ticket, now);
        }
    }

    /// Clear expired notices. Returns true if the screen changed.
    fn fire_timers(&mut self, now: Instant) -> bool {
        let mut changed = false;
        for seq in self.timers.expired(now) {
            changed |= self.app_state.notice.clear(seq);
        }
        changed
    }

    /// Handle a terminal resize event
    ///
    /// Forgets the last layout so the next draw lays columns out again.
    fn handle_resize(&mut self, width: u16, height: u16) {
        debug!("Handling resize to {}x{}", width, height);
        self.laid_out_for = None;
    }

    /// Render the current frame
    ///
    /// Re-runs the column layout when the table area changed size, then
    /// records how many rows fit as the paging step.
    fn draw(&mut self) -> Result<(), TuiError> {
        let size = self.terminal.size()?;
        let frame_area = Rect::new(0, 0, size.width, size.height);
        let table_size = table_inner_size(frame_area, &self.app_state);
        if self.laid_out_for != Some(table_size) {
            self.app_state.recompute_layout(table_size.0, table_size.1);
            self.laid_out_for = Some(table_size);
        }

        let mut page_size = 1;
        let state = &self.app_state;
        let styles = &self.styles;
        self.terminal.draw(|frame| {
            page_size = render_layout(frame, state, styles);
        })?;
        self.app_state.record_page_size(page_size);

        Ok(())
    }
}

// ===== Test Helpers =====
//
// The following methods are ONLY for testing within the crate.
// DO NOT use these in production code.

#[cfg(test)]
#[allow(dead_code)] // Not all helpers used by every test module
impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    /// Create TuiApp for testing without touching the real terminal.
    pub(crate) fn new_for_test(terminal: Terminal<B>, app_state: AppState) -> Self {
        Self {
            terminal,
            app_state,
            key_bindings: KeyBindings::default(),
            timers: NoticeTimers::default(),
            styles: TableStyles::default(),
            laid_out_for: None,
        }
    }

    /// Get reference to app state (test-only accessor)
    pub(crate) fn app_state(&self) -> &AppState {
        &self.app_state
    }

    /// Mutable state for test setup.
    pub(crate) fn app_state_mut(&mut self) -> &mut AppState {
        &mut self.app_state
    }

    /// Handle a single keyboard event (test-only accessor)
    ///
    /// Returns true if app should quit.
    pub(crate) fn handle_key_test(&mut self, key: KeyEvent) -> bool {
        self.handle_key(key)
    }

    /// Render a frame (test-only accessor)
    pub(crate) fn render_test(&mut self) -> Result<(), TuiError> {
        self.draw()
    }

    /// Deliver a terminal focus event (test-only accessor)
    pub(crate) fn focus_change_test(&mut self, gained: bool) {
        self.handle_focus_change(gained)
    }

    /// Fire notice timers as if `now` had arrived.
    pub(crate) fn fire_timers_test(&mut self, now: Instant) -> bool {
        self.fire_timers(now)
    }

    /// Number of notice clears waiting.
    pub(crate) fn pending_timer_count(&self) -> usize {
        self.timers.len()
    }

    /// Get reference to terminal (test-only accessor)
    pub(crate) fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }
}

/// Initialize and run the TUI over a loaded dataset
///
/// Handles terminal setup, runs the event loop, and restores the terminal
/// even when the loop fails.
///
/// Note: Logging must be initialized by caller before calling this function.
pub fn run_with_state(app_state: AppState, colors: ColorConfig) -> Result<(), TuiError> {
    let mut app = TuiApp::new(app_state, colors)?;

    // Run the app and ensure cleanup happens even on error
    let result = app.run();

    // Always restore terminal state
    restore_terminal()?;

    result
}

/// Restore terminal to normal state
///
/// Disables raw mode and leaves alternate screen
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(DisableFocusChange)?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
