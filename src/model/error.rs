//! Error types for roster.
//!
//! This module defines the error taxonomy using `thiserror`. Errors compose via
//! `?` and `From` conversions.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level application error returned to `main`
//!   - [`ConfigError`] - Config file resolution and validation failures
//!   - [`LoggingError`] - Tracing subscriber setup failures
//!   - [`TuiError`] - Terminal/TUI failures
//! - [`FetchError`] - Failure to load one page of members (never fatal)
//!
//! # Error Recovery Strategy
//!
//! Page fetch errors are **soft**: the pagination controller logs them, clears its
//! in-flight flag and leaves everything else untouched, so the next scroll towards the
//! bottom retries the same page. The list footer shows the last failure until a page
//! loads. Config, logging and terminal errors are fatal and propagate to `main`.

use crate::config::ConfigError;
use crate::logging::LoggingError;
use crate::view::TuiError;
use thiserror::Error;

/// Top-level application error encompassing all fatal failure modes.
///
/// # Examples
///
/// ```no_run
/// use roster::model::error::AppError;
///
/// fn run_app() -> Result<(), AppError> {
///     let file = roster::config::load_config_with_precedence(None)?;
///     let config = roster::config::validate_config(roster::config::merge_config(file))?;
///     roster::logging::init(&config.log_file_path)?;
///     Ok(())
/// }
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded or failed validation.
    ///
    /// **Recovery**: none; the message names the offending file or key and the process
    /// exits before the terminal is touched.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The tracing subscriber could not be installed.
    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    /// Terminal or TUI rendering error.
    ///
    /// Raised by the crossterm/ratatui layer (raw mode, alternate screen, draw failures).
    /// Terminal state is restored before this reaches `main`.
    #[error("Terminal error: {0}")]
    Tui(#[from] TuiError),

    /// The async runtime used for page fetches could not be started.
    #[error("Failed to start async runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

/// Failure to load one page from the member source.
///
/// Transport failures and malformed bodies are treated identically by the pagination
/// controller: logged, then recovered from by a later request for the same page. The
/// variants exist so the log line says which of the two happened.
///
/// Reasons are carried as strings, so the type is `Clone` and crosses the completion
/// channel as-is.
///
/// # Examples
///
/// ```
/// use roster::model::error::FetchError;
///
/// let err = FetchError::Status { status: 503 };
/// assert!(err.to_string().contains("503"));
/// assert!(err.is_transport());
/// ```
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    /// The request never produced a response (DNS, connect, TLS, timeout).
    #[error("Request failed: {reason}")]
    Transport {
        /// Underlying client error message.
        reason: String,
    },

    /// The server answered with a non-success HTTP status.
    #[error("Server returned HTTP {status}")]
    Status {
        /// HTTP status code.
        status: u16,
    },

    /// The body was not a JSON array of member objects.
    #[error("Malformed response body: {reason}")]
    Decode {
        /// Decoder error message.
        reason: String,
    },
}

impl FetchError {
    /// True for failures at the network/HTTP layer, false for malformed bodies.
    pub fn is_transport(&self) -> bool {
        !matches!(self, FetchError::Decode { .. })
    }
}
