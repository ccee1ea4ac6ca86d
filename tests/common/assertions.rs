//! Custom assertion utilities for tests.

/// Assert that a result is Ok and return the inner value.
///
/// # Panics
///
/// Panics with `context` and the error if the result is `Err`.
#[allow(dead_code)]
pub fn assert_ok<T, E: std::fmt::Debug>(result: Result<T, E>, context: &str) -> T {
    match result {
        Ok(v) => v,
        Err(e) => panic!("{} failed: {:?}", context, e),
    }
}

/// Assert that an error's message contains `expected_text`.
#[allow(dead_code)]
pub fn assert_error_contains<E: std::fmt::Display>(error: &E, expected_text: &str) {
    let message = error.to_string();
    assert!(
        message.contains(expected_text),
        "expected error containing '{}', got: {}",
        expected_text,
        message
    );
}

/// Assert that two floats agree within `tolerance`.
#[allow(dead_code)]
pub fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {} (+/- {}), got {}",
        expected,
        tolerance,
        actual
    );
}
