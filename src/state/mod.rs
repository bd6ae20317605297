//! UI and pagination state.
//!
//! Everything here is testable without a terminal. The only asynchronous part is the
//! fetch task spawned by the pagination controller; its result is applied back on the
//! owning thread.

pub mod app_state;
pub mod auth;
pub mod directory;
pub mod list_state;
pub mod pagination;
pub mod scroll_trigger;

// Re-export for convenience
pub use app_state::{AppState, Screen};
pub use auth::{CredentialGate, Credentials, Field, LoginError, LoginForm, LoginInput};
pub use directory::{DirectoryConfig, DirectorySession};
pub use list_state::{ListSnapshot, ListState, Transition};
pub use pagination::{PaginationController, PaginationSettings, RequestOutcome};
pub use scroll_trigger::{ScrollMetrics, ScrollTrigger};
