//! Keyboard bindings configuration.

use crate::model::key_action::KeyAction;
use crate::model::CommandKind;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Maps view-mode keyboard events to domain actions.
///
/// Provides default vim-style bindings. Character keys are matched loosely
/// on SHIFT, since terminals disagree on whether `#` or `G` carry it.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyEvent, KeyAction>,
}

impl KeyBindings {
    /// Look up the action for a key event.
    pub fn get(&self, key: KeyEvent) -> Option<KeyAction> {
        let normalized = KeyEvent::new(key.code, key.modifiers);
        if let Some(action) = self.bindings.get(&normalized) {
            return Some(*action);
        }
        if !matches!(key.code, KeyCode::Char(_)) {
            return None;
        }
        let toggled = if key.modifiers.contains(KeyModifiers::SHIFT) {
            key.modifiers - KeyModifiers::SHIFT
        } else {
            key.modifiers | KeyModifiers::SHIFT
        };
        self.bindings
            .get(&KeyEvent::new(key.code, toggled))
            .copied()
    }

    /// Bind or rebind a key.
    pub fn insert(&mut self, key: KeyEvent, action: KeyAction) {
        self.bindings
            .insert(KeyEvent::new(key.code, key.modifiers), action);
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut bindings = HashMap::new();
        let mut bind = |code: KeyCode, modifiers: KeyModifiers, action: KeyAction| {
            bindings.insert(KeyEvent::new(code, modifiers), action);
        };
        let none = KeyModifiers::NONE;
        let shift = KeyModifiers::SHIFT;

        // Row movement
        bind(KeyCode::Char('j'), none, KeyAction::RowDown);
        bind(KeyCode::Down, none, KeyAction::RowDown);
        bind(KeyCode::Char('k'), none, KeyAction::RowUp);
        bind(KeyCode::Up, none, KeyAction::RowUp);

        // Page navigation
        bind(KeyCode::Char('d'), none, KeyAction::PageDown);
        bind(KeyCode::PageDown, none, KeyAction::PageDown);
        bind(KeyCode::Char('u'), none, KeyAction::PageUp);
        bind(KeyCode::PageUp, none, KeyAction::PageUp);
        bind(KeyCode::Char('g'), none, KeyAction::JumpToStart);
        bind(KeyCode::Home, none, KeyAction::JumpToStart);
        bind(KeyCode::Char('G'), shift, KeyAction::JumpToEnd);
        bind(KeyCode::End, none, KeyAction::JumpToEnd);

        // Prompts
        bind(
            KeyCode::Char(':'),
            none,
            KeyAction::BeginCommand(CommandKind::Jump),
        );
        bind(
            KeyCode::Char('/'),
            none,
            KeyAction::BeginCommand(CommandKind::Search),
        );
        bind(
            KeyCode::Char('f'),
            none,
            KeyAction::BeginCommand(CommandKind::Filter),
        );
        bind(
            KeyCode::Char('#'),
            none,
            KeyAction::BeginCommand(CommandKind::Comment),
        );
        bind(
            KeyCode::Char('c'),
            none,
            KeyAction::BeginCommand(CommandKind::Comment),
        );
        bind(
            KeyCode::Char('m'),
            none,
            KeyAction::BeginCommand(CommandKind::Mark),
        );

        // Search and filter
        bind(KeyCode::Char(']'), none, KeyAction::NextMatch);
        bind(KeyCode::Char('['), none, KeyAction::PrevMatch);
        bind(KeyCode::Char('F'), shift, KeyAction::ClearFilter);

        // Marks
        bind(KeyCode::Char('M'), shift, KeyAction::ToggleMarksOnly);
        bind(KeyCode::Char('n'), none, KeyAction::NextMark);
        bind(KeyCode::Char('N'), shift, KeyAction::PrevMark);

        // Drawers
        bind(KeyCode::Char('t'), none, KeyAction::OpenTimeWindow);
        bind(KeyCode::Char('v'), none, KeyAction::ToggleCommentDrawer);

        // Files and misc
        bind(KeyCode::Char('s'), none, KeyAction::Save);
        bind(KeyCode::Char('e'), none, KeyAction::Export);
        bind(KeyCode::Char('y'), none, KeyAction::CopyRow);
        bind(KeyCode::Char('?'), none, KeyAction::Help);
        bind(KeyCode::Char('q'), none, KeyAction::Quit);
        bind(KeyCode::Char('c'), KeyModifiers::CONTROL, KeyAction::Quit);

        Self { bindings }
    }
}
