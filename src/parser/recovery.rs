//! Error reporting and recovery.
//!
//! Recovery is bounded to one edit per mismatch. When the token after the
//! offending one is expected, the offending token is deleted. When the
//! offending token ends the stage (or is in the caller's follow set), the
//! expected token is conjured. Otherwise the rule aborts with [`Abort`]
//! and the enclosing command resynchronises at the next stage boundary.
//!
//! Once an error is reported further reports are dropped until a token is
//! matched normally, so a single mistake yields a single diagnostic.

use log::debug;

use crate::parser::ast::TokenSpan;
use crate::parser::core::Parser;
use crate::parser::error::SyntaxError;
use crate::{SyntaxKind, Token, TokenSet};

/// Marker for a rule that could not be repaired locally. The diagnostic has
/// already been recorded when this is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Abort;

pub(crate) type PResult<T> = Result<T, Abort>;

impl Parser<'_> {
    /// Match a token of `kind`, repairing a single-token mistake if possible.
    pub(crate) fn expect(&mut self, kind: SyntaxKind) -> PResult<Token> {
        self.expect_set(TokenSet::single(kind), TokenSet::EMPTY)
    }

    /// Match any token in `expected`.
    ///
    /// `follow` lists tokens that may legitimately come after the expected
    /// one; seeing one of them triggers single-token insertion.
    pub(crate) fn expect_set(&mut self, expected: TokenSet, follow: TokenSet) -> PResult<Token> {
        if self.at_set(expected) {
            return Ok(self.bump());
        }
        let current = self.ts.current().clone();
        if self.config.recover {
            if !self.at_boundary() && expected.contains(self.ts.lookahead(1).kind) {
                debug!(
                    "deleting '{}' at {}:{}",
                    current.display_text(),
                    current.line,
                    current.column
                );
                self.report(SyntaxError::extraneous(current, expected));
                self.ts.advance();
                return Ok(self.bump());
            }
            if self.at_boundary() || follow.contains(current.kind) {
                debug!(
                    "inserting {expected} before '{}' at {}:{}",
                    current.display_text(),
                    current.line,
                    current.column
                );
                let conjured = conjure(expected, &current);
                self.report(SyntaxError::missing(current, expected));
                return Ok(conjured);
            }
        }
        self.report(SyntaxError::mismatched(current, expected));
        Err(Abort)
    }

    /// Report a failed decision that started at token index `start`.
    pub(crate) fn no_viable_alternative(&mut self, start: usize, expected: TokenSet) -> Abort {
        let token = self.ts.current().clone();
        let input = self.ts.text_between(start, self.ts.index());
        self.report(SyntaxError::no_viable_alternative(token, &input, expected));
        Abort
    }

    /// Record `error` unless an earlier report is still unresolved.
    pub(crate) fn report(&mut self, error: SyntaxError) {
        if self.error_recovery {
            debug!("suppressing follow-on error: {error}");
            return;
        }
        self.error_recovery = true;
        if !self.config.recover {
            self.halted = true;
        }
        self.errors.push(error);
    }

    /// Skip to the next stage boundary and record the region starting at
    /// `start` as an error node.
    ///
    /// With recovery disabled everything up to EOF is skipped.
    pub(crate) fn resync(&mut self, start: usize) -> TokenSpan {
        while !self.ts.at_eof() && (self.halted || !self.at_boundary()) {
            self.ts.advance();
        }
        let span = self.span_from(start);
        debug!(
            "resynchronised at '{}' after skipping tokens {}..{}",
            self.ts.current().display_text(),
            span.start,
            span.end
        );
        self.record(SyntaxKind::N_ERROR, span);
        span
    }

    /// Report and skip tokens left over after a complete command.
    pub(crate) fn skip_extraneous(&mut self) {
        let start = self.ts.index();
        let token = self.ts.current().clone();
        let expected = self.query_follow();
        self.report(SyntaxError::extraneous(token, expected));
        self.resync(start);
    }
}

/// Placeholder for a token assumed present during single-token insertion.
fn conjure(expected: TokenSet, at: &Token) -> Token {
    let kind = expected.iter().next().unwrap_or(SyntaxKind::N_ERROR);
    Token::new(
        kind,
        format!("<missing {kind}>"),
        at.start()..at.start(),
        at.line,
        at.column,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ParserConfig;
    use crate::parser::error::ErrorKind;
    use crate::tokenizer::{LexerMode, tokenize_in_mode};
    use rstest::rstest;

    fn expression_tokens(src: &str) -> Vec<Token> {
        tokenize_in_mode(src, LexerMode::Expression)
    }

    #[rstest]
    fn deletion_skips_one_token() {
        let tokens = expression_tokens("a , )");
        let mut parser = Parser::new(&tokens, ParserConfig::default());
        parser.bump();
        let matched = parser
            .expect(SyntaxKind::T_RP)
            .unwrap_or_else(|_| panic!("deletion should recover"));
        assert_eq!(matched.kind, SyntaxKind::T_RP);
        let (errors, _) = parser.finish();
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.first().map(|e| e.kind),
            Some(ErrorKind::ExtraneousInput)
        );
    }

    #[rstest]
    fn insertion_at_boundary_conjures_token() {
        let tokens = expression_tokens("a");
        let mut parser = Parser::new(&tokens, ParserConfig::default());
        parser.bump();
        let conjured = parser
            .expect(SyntaxKind::T_RP)
            .unwrap_or_else(|_| panic!("insertion should recover"));
        assert_eq!(conjured.text, "<missing ')'>");
        let (errors, _) = parser.finish();
        assert_eq!(
            errors.first().map(|e| e.message.as_str()),
            Some("missing ')' at '<EOF>'")
        );
    }

    #[rstest]
    fn repeated_reports_are_suppressed_until_a_match() {
        let tokens = expression_tokens("a b c");
        let mut parser = Parser::new(&tokens, ParserConfig::default());
        assert!(parser.expect(SyntaxKind::T_COMMA).is_err());
        assert!(parser.expect(SyntaxKind::T_COMMA).is_err());
        parser.bump();
        assert!(parser.expect(SyntaxKind::T_COMMA).is_err());
        let (errors, _) = parser.finish();
        assert_eq!(errors.len(), 2);
    }

    #[rstest]
    fn disabled_recovery_never_repairs() {
        let tokens = expression_tokens("a");
        let config = ParserConfig::default().with_recovery(false);
        let mut parser = Parser::new(&tokens, config);
        parser.bump();
        assert_eq!(parser.expect(SyntaxKind::T_RP), Err(Abort));
        assert!(parser.halted);
    }
}
