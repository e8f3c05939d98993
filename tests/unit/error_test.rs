//! Tests for error types

use throttle_concurrents::core::ThrottleError;

#[test]
fn test_empty_category_name_error() {
    let err = ThrottleError::EmptyCategoryName;
    assert_eq!(format!("{}", err), "empty category names are not allowed");
    assert_eq!(err.as_label(), "empty_category_name");
}

#[test]
fn test_duplicate_category_error() {
    let err = ThrottleError::DuplicateCategory("db".to_string());
    assert_eq!(format!("{}", err), "duplicate category: db");
}

#[test]
fn test_invalid_config_error() {
    let err = ThrottleError::InvalidConfig("parse error".to_string());
    assert_eq!(format!("{}", err), "invalid config: parse error");
}

#[test]
fn test_slot_error() {
    let err = ThrottleError::Slot("no free executor".to_string());
    assert_eq!(format!("{}", err), "slot error: no free executor");
    assert_eq!(err.as_label(), "slot");
}
