//! Helpers for parsing fixtures and asserting parser diagnostics in tests.
//!
//! These functions reduce boilerplate when comparing statements and
//! expressions through their s-expression form and when checking that a
//! failure surfaces the expected error kind and message.

mod assertions;
mod parsing;

pub use assertions::{assert_error_at, assert_no_parse_errors, assert_single_error};
pub use parsing::{expr_sexpr, parse_ok, query_sexpr, where_condition, where_sexpr};

use crate::{Token, tokenize_with_trivia};

/// Tokenize `src` with trivia using [`tokenize_with_trivia`].
///
/// # Examples
///
/// ```rust,no_run
/// # #[cfg(feature = "test-support")]
/// # {
/// use esql_parser::test_util::tokenize;
/// assert!(tokenize("FROM logs").len() > 2);
/// # }
/// ```
#[must_use]
pub fn tokenize(src: &str) -> Vec<Token> {
    tokenize_with_trivia(src)
}
