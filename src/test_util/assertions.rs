//! Assertion helpers for verifying parser diagnostics in tests.

use crate::{ErrorKind, SyntaxError};

/// Assert that a parser produced no errors.
///
/// # Examples
///
/// ```rust,no_run
/// # #[cfg(feature = "test-support")]
/// # {
/// use esql_parser::{parse_str, test_util::assert_no_parse_errors};
/// assert_no_parse_errors(parse_str("FROM a").errors());
/// # }
/// ```
///
/// # Panics
/// Panics if `errors` is not empty.
#[track_caller]
pub fn assert_no_parse_errors<E: std::fmt::Debug>(errors: &[E]) {
    assert!(errors.is_empty(), "Parse errors: {errors:?}");
}

/// Assert that exactly one error of `kind` was reported and that its
/// message contains `pattern`. Returns the error for further checks.
///
/// # Panics
/// Panics if there is not exactly one error, or if its kind or message
/// differ.
#[track_caller]
pub fn assert_single_error<'a>(
    errors: &'a [SyntaxError],
    kind: ErrorKind,
    pattern: &str,
) -> &'a SyntaxError {
    let [error] = errors else {
        panic!("expected one error, got {errors:?}");
    };
    assert_eq!(error.kind, kind, "unexpected error kind in {error:?}");
    assert!(
        error.message.contains(pattern),
        "expected error to contain '{pattern}', got '{}'",
        error.message
    );
    error
}

/// Assert that `error` points at the given line and column.
///
/// # Panics
/// Panics if the offending token is elsewhere.
#[track_caller]
pub fn assert_error_at(error: &SyntaxError, line: u32, column: u32) {
    assert_eq!(
        (error.offending_token.line, error.offending_token.column),
        (line, column),
        "error reported at the wrong position: {error}"
    );
}
