//! Internal test modules - whitebox tests with crate access
//!
//! Harness-based acceptance tests drive a `TuiApp` on a `TestBackend` with key and
//! mouse events, against an in-memory member source.
