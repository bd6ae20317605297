//! Layout dimension constants for TUI rendering.
//!
//! Centralized location for all layout-related numeric values to enable
//! consistent tuning across the application.

use std::time::Duration;

/// Height of the title bar above the member list.
pub const HEADER_HEIGHT: u16 = 1;

/// Height of the status bar in lines.
///
/// Single line for list status and keyboard hints.
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// Width of the login form box, borders included.
pub const LOGIN_FORM_WIDTH: u16 = 56;

/// Height of the login form box, borders included.
pub const LOGIN_FORM_HEIGHT: u16 = 13;

/// Width of the label column on the login form.
pub const LOGIN_LABEL_WIDTH: u16 = 11;

/// Width percentage for help overlay popup.
pub const HELP_POPUP_WIDTH_PERCENT: u16 = 60;

/// Height percentage for help overlay popup.
pub const HELP_POPUP_HEIGHT_PERCENT: u16 = 70;

/// How long the event loop waits for input before polling fetch results.
pub const TICK_INTERVAL: Duration = Duration::from_millis(100);
