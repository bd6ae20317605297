//! Application state and screen transitions.
//!
//! AppState is the root state type. It holds which screen is showing and the
//! configuration needed to mount a directory session when the gate accepts.

use super::auth::{CredentialGate, LoginError, LoginForm};
use super::directory::{DirectoryConfig, DirectorySession};
use tracing::{info, warn};

// ===== Screen =====

/// The screen currently shown.
///
/// # State Machine
///
/// - `Login` → `Directory` when the credential gate accepts (`submit_login`)
/// - `Directory` → `Login` on logout; the session and its in-flight fetch are dropped
#[derive(Debug)]
pub enum Screen {
    /// Credential form.
    Login(LoginForm),
    /// Mounted member list.
    Directory(DirectorySession),
}

impl Screen {
    /// The directory session, if mounted.
    pub fn directory(&self) -> Option<&DirectorySession> {
        match self {
            Screen::Directory(session) => Some(session),
            Screen::Login(_) => None,
        }
    }

    /// Mutable directory session, if mounted.
    pub fn directory_mut(&mut self) -> Option<&mut DirectorySession> {
        match self {
            Screen::Directory(session) => Some(session),
            Screen::Login(_) => None,
        }
    }

    /// The login form, if showing.
    pub fn login(&self) -> Option<&LoginForm> {
        match self {
            Screen::Login(form) => Some(form),
            Screen::Directory(_) => None,
        }
    }
}

// ===== AppState =====

/// Application state.
#[derive(Debug)]
pub struct AppState {
    /// Screen currently shown.
    pub screen: Screen,

    /// Whether the help overlay is visible (directory screen only).
    pub help_visible: bool,

    /// Set when the user asked to quit.
    pub should_quit: bool,

    gate: CredentialGate,
    directory: DirectoryConfig,
}

impl AppState {
    /// Start on an empty login form.
    pub fn new(directory: DirectoryConfig) -> Self {
        Self::with_gate(directory, CredentialGate::default())
    }

    /// Start on an empty login form with a custom gate.
    pub fn with_gate(directory: DirectoryConfig, gate: CredentialGate) -> Self {
        Self {
            screen: Screen::Login(LoginForm::new()),
            help_visible: false,
            should_quit: false,
            gate,
            directory,
        }
    }

    /// Check the login form against the gate; on success mount the directory.
    ///
    /// Does nothing if the login form is not showing.
    ///
    /// # Errors
    ///
    /// Returns the refusal, which is also recorded on the form for display.
    pub fn submit_login(&mut self) -> Result<(), LoginError> {
        let Screen::Login(form) = &mut self.screen else {
            return Ok(());
        };

        match self.gate.verify(form.credentials()) {
            Ok(()) => {
                info!("Login accepted");
                self.screen = Screen::Directory(DirectorySession::mount(&self.directory));
                Ok(())
            }
            Err(err) => {
                warn!(reason = %err, "Login refused");
                form.reject(err);
                Err(err)
            }
        }
    }

    /// Unmount the directory and return to an empty login form.
    pub fn logout(&mut self) {
        if matches!(self.screen, Screen::Directory(_)) {
            info!("Logged out");
            self.help_visible = false;
            self.screen = Screen::Login(LoginForm::new());
        }
    }

    /// True while the directory is mounted.
    pub fn is_logged_in(&self) -> bool {
        matches!(self.screen, Screen::Directory(_))
    }
}
