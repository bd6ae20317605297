//! Tests for log file setup.

use super::*;
use serial_test::serial;
use std::fs;

#[test]
#[serial(tracing_init)]
fn init_creates_log_directory_if_missing() {
    let test_dir = std::env::temp_dir().join("roster_test_logs_create");
    let log_file = test_dir.join("nested").join("test.log");

    let _ = fs::remove_dir_all(&test_dir);

    // May fail with SubscriberAlreadySet if another test got there first
    let _ = init(&log_file);

    assert!(
        log_file.parent().is_some_and(Path::exists),
        "Log directory should be created: {test_dir:?}"
    );

    let _ = fs::remove_dir_all(&test_dir);
}

#[test]
#[serial(tracing_init)]
fn init_succeeds_when_directory_already_exists() {
    let test_dir = std::env::temp_dir().join("roster_test_logs_exists");
    let log_file = test_dir.join("test.log");

    let _ = fs::create_dir_all(&test_dir);

    let result = init(&log_file);

    assert!(
        !matches!(result, Err(LoggingError::DirectoryCreation { .. })),
        "Existing directory must not be an error: {result:?}"
    );
    assert!(test_dir.exists());

    let _ = fs::remove_dir_all(&test_dir);
}

#[test]
#[serial(tracing_init)]
fn second_init_reports_subscriber_already_set() {
    let test_dir = std::env::temp_dir().join("roster_test_logs_twice");
    let log_file = test_dir.join("twice.log");

    let _ = init(&log_file);
    let second = init(&log_file);

    assert!(matches!(second, Err(LoggingError::SubscriberAlreadySet)));

    let _ = fs::remove_dir_all(&test_dir);
}

#[test]
fn path_without_file_name_is_invalid() {
    let result = init(Path::new("/"));

    assert!(matches!(result, Err(LoggingError::InvalidPath(_))));
}

#[test]
fn default_filter_parses() {
    assert!(DEFAULT_FILTER.parse::<EnvFilter>().is_ok());
}

#[test]
fn default_filter_quiets_http_internals() {
    assert!(DEFAULT_FILTER.starts_with("info"));
    assert!(DEFAULT_FILTER.contains("reqwest=warn"));
}
