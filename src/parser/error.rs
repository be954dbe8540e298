//! Syntax diagnostics produced by the parser.
//!
//! Messages use the wording ES|QL tooling already matches on:
//! `mismatched input 'x' expecting {...}`, `missing X at 'y'` and so on.

use thiserror::Error;

use crate::{Span, Token, TokenSet};

/// Classification of a syntax error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The current token is not in the expected set and no single-token
    /// repair applies.
    MismatchedInput,
    /// An unexpected token was skipped (single-token deletion).
    ExtraneousInput,
    /// An expected token was assumed present (single-token insertion).
    MissingToken,
    /// No alternative of a decision matches the lookahead.
    NoViableAlternative,
    /// Expressions or subqueries nest deeper than the configured limit.
    NestingTooDeep,
}

/// A syntax error with the offending token and the kinds expected there.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {}:{} {}", .offending_token.line, .offending_token.column, .message)]
pub struct SyntaxError {
    pub kind: ErrorKind,
    pub message: String,
    pub offending_token: Token,
    pub expected: TokenSet,
}

impl SyntaxError {
    pub(crate) fn mismatched(token: Token, expected: TokenSet) -> Self {
        let message = format!(
            "mismatched input '{}' expecting {expected}",
            token.display_text()
        );
        Self::new(ErrorKind::MismatchedInput, message, token, expected)
    }

    pub(crate) fn extraneous(token: Token, expected: TokenSet) -> Self {
        let message = format!(
            "extraneous input '{}' expecting {expected}",
            token.display_text()
        );
        Self::new(ErrorKind::ExtraneousInput, message, token, expected)
    }

    pub(crate) fn missing(token: Token, expected: TokenSet) -> Self {
        let message = format!("missing {expected} at '{}'", token.display_text());
        Self::new(ErrorKind::MissingToken, message, token, expected)
    }

    /// `input` is the text from the start of the failed decision up to and
    /// including the offending token.
    pub(crate) fn no_viable_alternative(token: Token, input: &str, expected: TokenSet) -> Self {
        let message = format!("no viable alternative at input '{input}'");
        Self::new(ErrorKind::NoViableAlternative, message, token, expected)
    }

    pub(crate) fn nesting_too_deep(token: Token, max_depth: usize) -> Self {
        let message = format!(
            "nesting deeper than {max_depth} levels at '{}'",
            token.display_text()
        );
        Self::new(ErrorKind::NestingTooDeep, message, token, TokenSet::EMPTY)
    }

    fn new(kind: ErrorKind, message: String, offending_token: Token, expected: TokenSet) -> Self {
        Self {
            kind,
            message,
            offending_token,
            expected,
        }
    }

    /// Byte range of the offending token.
    #[must_use]
    pub fn span(&self) -> Span {
        self.offending_token.span.clone()
    }
}
