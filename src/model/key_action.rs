//! Domain-level keyboard actions independent of key bindings.

/// Domain-level actions that can be mapped to configurable key bindings.
///
/// These represent user intent, not specific keys. The mapping from
/// crossterm::event::KeyEvent to KeyAction is handled by KeyBindings.
/// Only consulted on the directory screen; the login form reads raw keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    // Scrolling
    /// Scroll the member list up by one row. Default: k/↑
    ScrollUp,
    /// Scroll the member list down by one row. Default: j/↓
    ScrollDown,
    /// Scroll up by one viewport height. Default: Ctrl+u/Page Up
    PageUp,
    /// Scroll down by one viewport height. Default: Ctrl+d/Page Down
    PageDown,
    /// Jump to the first member. Default: g/Home
    ScrollToTop,
    /// Jump to the last loaded member. Default: G/End
    ScrollToBottom,

    // Session
    /// Leave the directory and return to the login form. Default: L
    Logout,

    // Application
    /// Exit the application. Default: q/Ctrl+c
    Quit,
    /// Toggle the help overlay. Default: ?
    Help,
}

impl KeyAction {
    /// True for actions that move the list viewport.
    pub fn is_scroll(self) -> bool {
        matches!(
            self,
            KeyAction::ScrollUp
                | KeyAction::ScrollDown
                | KeyAction::PageUp
                | KeyAction::PageDown
                | KeyAction::ScrollToTop
                | KeyAction::ScrollToBottom
        )
    }
}
