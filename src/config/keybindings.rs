//! Keyboard bindings configuration.

use crate::model::key_action::KeyAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Maps keyboard events to domain actions.
///
/// Provides default vim-style bindings. Only the directory screen consults it;
/// the login form handles keys itself.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyEvent, KeyAction>,
}

impl KeyBindings {
    /// Look up the action for a key event.
    ///
    /// Key-event kind and state are ignored so release/repeat reports from
    /// enhanced keyboard protocols resolve the same way as presses.
    pub fn get(&self, key: KeyEvent) -> Option<KeyAction> {
        self.bindings
            .get(&KeyEvent::new(key.code, key.modifiers))
            .copied()
    }

    /// Bind `key` to `action`, replacing any previous binding.
    pub fn bind(&mut self, key: KeyEvent, action: KeyAction) {
        self.bindings.insert(key, action);
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut bindings = HashMap::new();
        let mut bind = |code: KeyCode, mods: KeyModifiers, action: KeyAction| {
            bindings.insert(KeyEvent::new(code, mods), action);
        };

        // Vim-style scrolling
        bind(KeyCode::Char('j'), KeyModifiers::NONE, KeyAction::ScrollDown);
        bind(KeyCode::Char('k'), KeyModifiers::NONE, KeyAction::ScrollUp);
        bind(KeyCode::Char('g'), KeyModifiers::NONE, KeyAction::ScrollToTop);
        bind(KeyCode::Char('G'), KeyModifiers::SHIFT, KeyAction::ScrollToBottom);

        // Arrow / navigation keys
        bind(KeyCode::Down, KeyModifiers::NONE, KeyAction::ScrollDown);
        bind(KeyCode::Up, KeyModifiers::NONE, KeyAction::ScrollUp);
        bind(KeyCode::Home, KeyModifiers::NONE, KeyAction::ScrollToTop);
        bind(KeyCode::End, KeyModifiers::NONE, KeyAction::ScrollToBottom);

        // Page navigation
        bind(KeyCode::Char('d'), KeyModifiers::CONTROL, KeyAction::PageDown);
        bind(KeyCode::Char('u'), KeyModifiers::CONTROL, KeyAction::PageUp);
        bind(KeyCode::PageDown, KeyModifiers::NONE, KeyAction::PageDown);
        bind(KeyCode::PageUp, KeyModifiers::NONE, KeyAction::PageUp);

        // Session
        bind(KeyCode::Char('L'), KeyModifiers::SHIFT, KeyAction::Logout);

        // Application controls
        bind(KeyCode::Char('q'), KeyModifiers::NONE, KeyAction::Quit);
        bind(KeyCode::Char('c'), KeyModifiers::CONTROL, KeyAction::Quit);
        bind(KeyCode::Char('?'), KeyModifiers::NONE, KeyAction::Help);
        bind(KeyCode::Char('?'), KeyModifiers::SHIFT, KeyAction::Help);

        Self { bindings }
    }
}
