//! Recursive-descent parser producing a typed AST and a rowan CST.
//!
//! This module contains the entry points for parsing ES|QL. The parser
//! consumes a token slice produced by a mode-aware lexer (the crate's
//! reference [`tokenizer`](crate::tokenizer) or any compatible one), builds a
//! [`SingleStatement`](ast::SingleStatement) and collects [`SyntaxError`]s.
//! Hidden tokens are skipped by the grammar but kept in the green tree so
//! the CST reproduces the input exactly.

pub mod ast;
mod command;
mod core;
mod cst_builder;
mod error;
mod expression;
mod recovery;
pub mod token_stream;

#[cfg(test)]
mod tests;

use log::debug;

use crate::Token;
use crate::tokenizer::{LexerMode, tokenize_in_mode, tokenize_with_trivia};

use self::core::Parser;

pub use cst_builder::{Parsed, SyntaxNode};
pub use error::{ErrorKind, SyntaxError};

/// Nesting limit used by [`ParserConfig::default`].
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Parser options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    /// Maximum nesting of expressions and subqueries before parsing fails
    /// with [`ErrorKind::NestingTooDeep`].
    pub max_depth: usize,
    /// Whether to repair single-token mistakes and resynchronise at pipes.
    /// When disabled parsing stops at the first error.
    pub recover: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            recover: true,
        }
    }
}

impl ParserConfig {
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    #[must_use]
    pub fn with_recovery(mut self, recover: bool) -> Self {
        self.recover = recover;
        self
    }
}

/// Parse a token slice with the default configuration.
#[must_use]
pub fn parse(tokens: &[Token]) -> Parsed {
    parse_with_config(tokens, &ParserConfig::default())
}

/// Parse a token slice.
///
/// Parsing never fails outright: invalid input produces a best-effort tree
/// with `Error` nodes and a non-empty [`Parsed::errors`].
#[must_use]
pub fn parse_with_config(tokens: &[Token], config: &ParserConfig) -> Parsed {
    let mut parser = Parser::new(tokens, *config);
    let statement = parser.single_statement();
    let (errors, nodes) = parser.finish();
    debug!(
        "parsed {} tokens with {} error(s) and {} node span(s)",
        tokens.len(),
        errors.len(),
        nodes.len()
    );
    let green = cst_builder::build_green_tree(tokens, &nodes);
    Parsed::new(statement, errors, green)
}

/// Tokenise `src` with the reference tokenizer and parse it.
///
/// ```
/// use esql_parser::parse_str;
///
/// let parsed = parse_str("FROM logs | WHERE status >= 500 | LIMIT 10");
/// assert!(parsed.is_ok());
/// assert_eq!(
///     parsed.statement().to_sexpr(),
///     "(pipe (pipe (from logs) (where (>= status 500))) (limit 10))"
/// );
/// ```
#[must_use]
pub fn parse_str(src: &str) -> Parsed {
    parse(&tokenize_with_trivia(src))
}

/// Parse a standalone expression such as `a + 1 > b AND NOT c`.
///
/// The input is lexed in expression mode and must consist of a single
/// expression. `IN`, `LIKE` and `RLIKE` belong to `WHERE` and are not
/// accepted here.
///
/// # Errors
///
/// Returns the collected diagnostics if the expression is invalid or is
/// followed by further tokens.
pub fn parse_expression(src: &str) -> Result<ast::BooleanExpression, Vec<SyntaxError>> {
    let tokens = tokenize_in_mode(src, LexerMode::Expression);
    let mut parser = Parser::new(&tokens, ParserConfig::default());
    let result = parser.standalone_expression();
    let (errors, _) = parser.finish();
    match result {
        Ok(expression) if errors.is_empty() => Ok(expression),
        _ => Err(errors),
    }
}
