//! Modal dialogs that take over input until they resolve.
//!
//! The set is closed: save-as, export-as, and help. At most one is open at
//! a time, held in the dialog slot of `InputMode`.

use super::line_input::LineInput;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::path::{Path, PathBuf};

/// Dialog variants and their private state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogKind {
    /// Choose where to write a JSON snapshot.
    Save(PathPrompt),
    /// Choose where to write a CSV export.
    Export(PathPrompt),
    /// Key reference.
    Help {
        /// First help line shown.
        scroll: u16,
    },
}

/// File name prompt shared by save and export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPrompt {
    /// Typed path.
    pub input: LineInput,
    /// Used when Enter is pressed on an empty buffer.
    pub placeholder: String,
    /// Relative paths are resolved against this directory.
    pub base_dir: Option<PathBuf>,
}

impl PathPrompt {
    fn new(placeholder: impl Into<String>, base_dir: Option<PathBuf>) -> Self {
        Self {
            input: LineInput::default(),
            placeholder: placeholder.into(),
            base_dir,
        }
    }

    /// Path Enter would commit to.
    pub fn resolved_path(&self) -> PathBuf {
        let typed = self.input.text().trim();
        let raw = if typed.is_empty() {
            self.placeholder.as_str()
        } else {
            typed
        };
        resolve_against(Path::new(raw), self.base_dir.as_deref())
    }
}

fn resolve_against(path: &Path, base_dir: Option<&Path>) -> PathBuf {
    match base_dir {
        Some(dir) if path.is_relative() && !dir.as_os_str().is_empty() => dir.join(path),
        _ => path.to_path_buf(),
    }
}

/// What a key did to the dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogOutcome {
    /// Still open.
    Pending,
    /// Closed without doing anything.
    Cancelled,
    /// Save a snapshot here.
    Save(PathBuf),
    /// Export CSV here.
    Export(PathBuf),
}

/// An open dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dialog {
    kind: DialogKind,
    focused: bool,
    visible: bool,
}

impl Dialog {
    /// Save-as dialog proposing `placeholder`.
    pub fn save(placeholder: impl Into<String>, base_dir: Option<PathBuf>) -> Self {
        Self::init(DialogKind::Save(PathPrompt::new(placeholder, base_dir)))
    }

    /// Export-as dialog proposing `placeholder`.
    pub fn export(placeholder: impl Into<String>, base_dir: Option<PathBuf>) -> Self {
        Self::init(DialogKind::Export(PathPrompt::new(placeholder, base_dir)))
    }

    /// Help overlay.
    pub fn help() -> Self {
        Self::init(DialogKind::Help { scroll: 0 })
    }

    /// Open a dialog, visible and focused.
    pub fn init(kind: DialogKind) -> Self {
        Self {
            kind,
            focused: true,
            visible: true,
        }
    }

    /// Variant and state.
    pub fn kind(&self) -> &DialogKind {
        &self.kind
    }

    /// Title for the dialog frame.
    pub fn title(&self) -> &'static str {
        match self.kind {
            DialogKind::Save(_) => " Save snapshot ",
            DialogKind::Export(_) => " Export CSV ",
            DialogKind::Help { .. } => " Keyboard Shortcuts ",
        }
    }

    /// Give the dialog the text cursor.
    pub fn focus(&mut self) {
        self.focused = true;
    }

    /// Take the text cursor away.
    pub fn blur(&mut self) {
        self.focused = false;
    }

    /// Whether the text cursor is drawn.
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// False once the dialog has resolved.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Route one key. Any outcome other than `Pending` hides the dialog.
    pub fn handle_key(&mut self, key: KeyEvent) -> DialogOutcome {
        let focused = self.focused;
        let outcome = match &mut self.kind {
            DialogKind::Help { scroll } => handle_help_key(scroll, key),
            DialogKind::Save(prompt) => {
                handle_prompt_key(prompt, key, focused).map_or(DialogOutcome::Pending, |r| {
                    r.map_or(DialogOutcome::Cancelled, DialogOutcome::Save)
                })
            }
            DialogKind::Export(prompt) => {
                handle_prompt_key(prompt, key, focused).map_or(DialogOutcome::Pending, |r| {
                    r.map_or(DialogOutcome::Cancelled, DialogOutcome::Export)
                })
            }
        };
        if outcome != DialogOutcome::Pending {
            self.visible = false;
        }
        outcome
    }
}

/// `None` keeps the prompt open; `Some(None)` cancels; `Some(Some(path))` commits.
fn handle_prompt_key(
    prompt: &mut PathPrompt,
    key: KeyEvent,
    focused: bool,
) -> Option<Option<PathBuf>> {
    match key.code {
        KeyCode::Esc => return Some(None),
        KeyCode::Enter => return Some(Some(prompt.resolved_path())),
        _ if !focused => {}
        KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            prompt.input.delete_prev_word()
        }
        KeyCode::Char('h') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            prompt.input.delete_last_char()
        }
        KeyCode::Backspace | KeyCode::Delete => prompt.input.delete_last_char(),
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            prompt.input.push(ch)
        }
        _ => {}
    }
    None
}

fn handle_help_key(scroll: &mut u16, key: KeyEvent) -> DialogOutcome {
    match key.code {
        KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => DialogOutcome::Cancelled,
        KeyCode::Char('j') | KeyCode::Down => {
            *scroll = scroll.saturating_add(1);
            DialogOutcome::Pending
        }
        KeyCode::Char('k') | KeyCode::Up => {
            *scroll = scroll.saturating_sub(1);
            DialogOutcome::Pending
        }
        _ => DialogOutcome::Pending,
    }
}

/// Default snapshot name: last save, else the input renamed to `.json`,
/// else `output.json`.
pub fn default_save_name(last_save: Option<&Path>, input: Option<&Path>) -> String {
    if let Some(last) = last_save {
        return last.display().to_string();
    }
    match input {
        Some(path) if path.extension().is_some_and(|ext| ext == "json") => {
            path.display().to_string()
        }
        Some(path) if path.file_name().is_some() => {
            path.with_extension("json").display().to_string()
        }
        _ => "output.json".to_string(),
    }
}

/// Default export name: last export, else `export-<input stem>.csv`.
pub fn default_export_name(last_export: Option<&Path>, input: Option<&Path>) -> String {
    if let Some(last) = last_export {
        return last.display().to_string();
    }
    let stem = input
        .and_then(Path::file_stem)
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "rows".to_string());
    format!("export-{stem}.csv")
}
