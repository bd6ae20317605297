//! TUI rendering and terminal management (impure shell)

pub mod constants;
mod directory;
mod help;
mod helpers;
mod login;
mod styles;

pub use directory::{directory_layout, render_directory, status_text, DirectoryAreas};
pub use help::render_help_overlay;
pub use helpers::truncate_to_width;
pub use login::render_login;
pub use styles::{ColorConfig, Palette};

use crate::config::keybindings::KeyBindings;
use crate::model::KeyAction;
use crate::state::directory::WHEEL_STEP;
use crate::state::{AppState, LoginInput, Screen};
use constants::TICK_INTERVAL;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Frame, Terminal};
use std::io::{self, Stdout};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),
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
    palette: Palette,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Create and initialize a new TUI application
    ///
    /// Sets up terminal in raw mode with alternate screen and mouse capture.
    pub fn new(
        app_state: AppState,
        key_bindings: KeyBindings,
        palette: Palette,
    ) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        stdout.execute(crossterm::event::EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            terminal,
            app_state,
            key_bindings,
            palette,
        })
    }

    /// Run the main event loop
    ///
    /// Returns when the user quits. Waits up to one tick for input; between
    /// inputs, applies arrived page results and redraws only if something changed.
    pub fn run(&mut self) -> Result<(), TuiError> {
        self.draw()?;

        loop {
            if event::poll(TICK_INTERVAL)? {
                match event::read()? {
                    Event::Key(key) if key.kind != KeyEventKind::Release => {
                        if self.handle_key(key) {
                            return Ok(());
                        }
                        self.draw()?;
                    }
                    Event::Mouse(mouse) => {
                        self.handle_mouse(mouse);
                        self.draw()?;
                    }
                    Event::Resize(width, height) => {
                        debug!(width, height, "Terminal resized");
                        self.draw()?;
                    }
                    _ => {}
                }
            }

            if self.poll_directory() {
                self.draw()?;
            }
        }
    }
}

impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    /// Apply any page results that arrived. Returns true if the view changed.
    fn poll_directory(&mut self) -> bool {
        self.app_state
            .screen
            .directory_mut()
            .is_some_and(|session| session.poll())
    }

    /// Handle a single keyboard event
    ///
    /// Returns true if app should quit
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        // Ctrl+C quits from every screen
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        let login_input = match &mut self.app_state.screen {
            Screen::Login(form) => Some(form.handle_key(key)),
            Screen::Directory(_) => None,
        };

        match login_input {
            Some(LoginInput::Editing) => false,
            Some(LoginInput::Submit) => {
                // A refusal is recorded on the form and rendered there
                let _ = self.app_state.submit_login();
                false
            }
            Some(LoginInput::Cancel) => true,
            None => self.handle_directory_key(key),
        }
    }

    fn handle_directory_key(&mut self, key: KeyEvent) -> bool {
        if key.code == KeyCode::Esc && self.app_state.help_visible {
            self.app_state.help_visible = false;
            return false;
        }

        let Some(action) = self.key_bindings.get(key) else {
            return false;
        };

        match action {
            KeyAction::Quit => return true,
            KeyAction::Help => self.app_state.help_visible = !self.app_state.help_visible,
            KeyAction::Logout => self.app_state.logout(),
            scroll if scroll.is_scroll() => {
                if let Some(session) = self.app_state.screen.directory_mut() {
                    if let Some(outcome) = session.scroll(scroll) {
                        debug!(?scroll, ?outcome, "Scroll requested next page");
                    }
                }
            }
            _ => {}
        }

        false
    }

    /// Handle a single mouse event
    ///
    /// Only wheel events on the directory screen do anything.
    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if self.app_state.help_visible {
            return;
        }
        let Some(session) = self.app_state.screen.directory_mut() else {
            return;
        };

        let step = WHEEL_STEP as isize;
        let delta = match mouse.kind {
            MouseEventKind::ScrollDown => step,
            MouseEventKind::ScrollUp => -step,
            _ => return,
        };
        if let Some(outcome) = session.scroll_by(delta) {
            debug!(delta, ?outcome, "Wheel requested next page");
        }
    }

    /// Render the current frame
    ///
    /// Records the list viewport height on the directory session first, so scroll
    /// clamping and the trigger use the geometry that is about to be drawn.
    fn draw(&mut self) -> Result<(), TuiError> {
        let size = self.terminal.size()?;
        let frame_area = Rect::new(0, 0, size.width, size.height);

        if let Some(session) = self.app_state.screen.directory_mut() {
            let areas = directory_layout(frame_area);
            session.set_viewport_height(usize::from(areas.list.height));
        }

        let state = &self.app_state;
        let palette = &self.palette;
        self.terminal.draw(|frame| render_app(frame, state, palette))?;

        Ok(())
    }
}

/// Render whichever screen is showing, plus the help overlay if open.
fn render_app(frame: &mut Frame, state: &AppState, palette: &Palette) {
    match &state.screen {
        Screen::Login(form) => render_login(frame, form, palette),
        Screen::Directory(session) => {
            render_directory(frame, session, palette);
            if state.help_visible {
                render_help_overlay(frame, palette);
            }
        }
    }
}

// ===== Test Helpers =====
//
// The following methods are ONLY for testing within the crate.

#[cfg(test)]
#[allow(dead_code)] // Not every helper is used by every test module
impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    /// Create TuiApp for testing without terminal initialization.
    pub(crate) fn new_for_test(
        terminal: Terminal<B>,
        app_state: AppState,
        key_bindings: KeyBindings,
    ) -> Self {
        Self {
            terminal,
            app_state,
            key_bindings,
            palette: Palette::with_color_config(ColorConfig::from_env_and_args(true)),
        }
    }

    /// Application state (test-only accessor).
    pub(crate) fn state(&self) -> &AppState {
        &self.app_state
    }

    /// Mutable application state (test-only accessor).
    pub(crate) fn state_mut(&mut self) -> &mut AppState {
        &mut self.app_state
    }

    /// Handle a single keyboard event. Returns true if app should quit.
    pub(crate) fn handle_key_test(&mut self, key: KeyEvent) -> bool {
        self.handle_key(key)
    }

    /// Handle a single mouse event.
    pub(crate) fn handle_mouse_test(&mut self, mouse: MouseEvent) {
        self.handle_mouse(mouse)
    }

    /// Apply arrived page results, as one event loop tick does.
    pub(crate) fn tick_test(&mut self) -> bool {
        self.poll_directory()
    }

    /// Render a single frame to the backend.
    pub(crate) fn render_test(&mut self) -> Result<(), TuiError> {
        self.draw()
    }

    /// Terminal, for buffer inspection.
    pub(crate) fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }
}

/// Initialize and run the TUI application.
///
/// Handles terminal setup, runs the event loop, and restores the terminal on exit
/// even if the loop failed. Logging must be initialized by the caller.
pub fn run_app(
    app_state: AppState,
    key_bindings: KeyBindings,
    palette: Palette,
) -> Result<(), TuiError> {
    let mut app = TuiApp::new(app_state, key_bindings, palette)?;

    let result = app.run();

    // Always restore terminal state
    restore_terminal()?;

    result
}

/// Restore terminal to normal state
///
/// Disables raw mode, mouse capture, and leaves alternate screen
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(crossterm::event::DisableMouseCapture)?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}
