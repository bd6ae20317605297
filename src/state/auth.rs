//! Credential gate and login form state.
//!
//! Authentication is a mock: the gate accepts exactly one email/password/company triple.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::fmt;
use thiserror::Error;

/// Email accepted by the demo gate.
pub const DEMO_EMAIL: &str = "admin@roster.dev";
/// Password accepted by the demo gate.
pub const DEMO_PASSWORD: &str = "roster123";
/// Company accepted by the demo gate.
pub const DEMO_COMPANY: &str = "Roster";

/// One input on the login form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Field {
    /// Email address.
    #[default]
    Email,
    /// Password (rendered masked).
    Password,
    /// Company name.
    Company,
}

impl Field {
    /// All fields in form order.
    pub const ALL: [Field; 3] = [Field::Email, Field::Password, Field::Company];

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Field::Email => "Email",
            Field::Password => "Password",
            Field::Company => "Company",
        }
    }

    /// Next field, wrapping around.
    pub fn next(self) -> Self {
        match self {
            Field::Email => Field::Password,
            Field::Password => Field::Company,
            Field::Company => Field::Email,
        }
    }

    /// Previous field, wrapping around.
    pub fn prev(self) -> Self {
        match self {
            Field::Email => Field::Company,
            Field::Password => Field::Email,
            Field::Company => Field::Password,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Why a login attempt was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LoginError {
    /// A field was blank.
    #[error("{0} is required")]
    MissingField(Field),

    /// The email is not shaped like `local@domain`.
    #[error("Enter a valid email address")]
    InvalidEmail,

    /// Well-formed input that does not match the accepted credentials.
    #[error("Invalid email, password or company")]
    Rejected,
}

/// The three strings submitted by the login form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Credentials {
    /// Email address.
    pub email: String,
    /// Password.
    pub password: String,
    /// Company name.
    pub company: String,
}

impl Credentials {
    /// Build credentials from string slices.
    pub fn new(email: &str, password: &str, company: &str) -> Self {
        Self {
            email: email.to_string(),
            password: password.to_string(),
            company: company.to_string(),
        }
    }

    fn get(&self, field: Field) -> &str {
        match field {
            Field::Email => &self.email,
            Field::Password => &self.password,
            Field::Company => &self.company,
        }
    }
}

/// Check field shape before comparing against the gate.
///
/// # Errors
///
/// `MissingField` for the first blank field in form order, then `InvalidEmail`.
pub fn validate(credentials: &Credentials) -> Result<(), LoginError> {
    if let Some(field) = Field::ALL
        .into_iter()
        .find(|field| credentials.get(*field).trim().is_empty())
    {
        return Err(LoginError::MissingField(field));
    }

    match credentials.email.trim().split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() && !domain.contains('@') => {
            Ok(())
        }
        _ => Err(LoginError::InvalidEmail),
    }
}

/// Accepts exactly one credential triple.
#[derive(Debug, Clone)]
pub struct CredentialGate {
    accepted: Credentials,
}

impl Default for CredentialGate {
    fn default() -> Self {
        Self::new(Credentials::new(DEMO_EMAIL, DEMO_PASSWORD, DEMO_COMPANY))
    }
}

impl CredentialGate {
    /// Gate accepting `accepted`.
    pub fn new(accepted: Credentials) -> Self {
        Self { accepted }
    }

    /// Validate and compare.
    ///
    /// Email and company match case-insensitively after trimming; the password must
    /// match exactly.
    ///
    /// # Errors
    ///
    /// See [`LoginError`].
    pub fn verify(&self, credentials: &Credentials) -> Result<(), LoginError> {
        validate(credentials)?;

        let email_ok = credentials
            .email
            .trim()
            .eq_ignore_ascii_case(self.accepted.email.trim());
        let company_ok = credentials
            .company
            .trim()
            .eq_ignore_ascii_case(self.accepted.company.trim());
        let password_ok = credentials.password == self.accepted.password;

        if email_ok && password_ok && company_ok {
            Ok(())
        } else {
            Err(LoginError::Rejected)
        }
    }
}

/// What the login form wants done after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginInput {
    /// Keep editing.
    Editing,
    /// Submit the current credentials.
    Submit,
    /// Leave the application.
    Cancel,
}

/// Editable login form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    values: Credentials,
    focus: Field,
    error: Option<LoginError>,
}

impl LoginForm {
    /// Empty form focused on the email field.
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently focused field.
    pub fn focus(&self) -> Field {
        self.focus
    }

    /// Raw value of `field`.
    pub fn value(&self, field: Field) -> &str {
        self.values.get(field)
    }

    /// Error from the last refused submission, if any.
    pub fn error(&self) -> Option<LoginError> {
        self.error
    }

    /// Current input as credentials.
    pub fn credentials(&self) -> &Credentials {
        &self.values
    }

    /// Record a refused submission: show the error, clear the password and focus the
    /// offending field.
    pub fn reject(&mut self, error: LoginError) {
        self.values.password.clear();
        self.focus = match error {
            LoginError::MissingField(field) => field,
            LoginError::InvalidEmail => Field::Email,
            LoginError::Rejected => Field::Password,
        };
        self.error = Some(error);
    }

    fn value_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Email => &mut self.values.email,
            Field::Password => &mut self.values.password,
            Field::Company => &mut self.values.company,
        }
    }

    /// Apply one key press.
    pub fn handle_key(&mut self, key: KeyEvent) -> LoginInput {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Char('c') if ctrl => LoginInput::Cancel,
            KeyCode::Esc => LoginInput::Cancel,
            KeyCode::Enter => LoginInput::Submit,
            KeyCode::Tab | KeyCode::Down => {
                self.focus = self.focus.next();
                LoginInput::Editing
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = self.focus.prev();
                LoginInput::Editing
            }
            KeyCode::Backspace => {
                let focus = self.focus;
                self.value_mut(focus).pop();
                LoginInput::Editing
            }
            KeyCode::Char(ch) if !ctrl => {
                let focus = self.focus;
                self.value_mut(focus).push(ch);
                self.error = None;
                LoginInput::Editing
            }
            _ => LoginInput::Editing,
        }
    }
}
