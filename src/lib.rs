//! Library crate for the ES|QL parser.
//!
//! Exposes the syntax kinds, the token model, a mode-aware reference
//! tokenizer and the hand-written recursive-descent parser that turns a
//! token stream into a typed AST plus diagnostics.

#![forbid(unsafe_code)]

pub mod language;
pub mod parser;
pub mod token;
pub mod tokenizer;

// Only expose test utilities to tests and opt-in consumers.
#[cfg(any(test, feature = "test-support"))]
#[doc(hidden)]
pub mod test_util;

pub use language::{EsqlLanguage, SyntaxKind, TokenSet};
pub use parser::{
    ErrorKind, Parsed, ParserConfig, SyntaxError, ast, parse, parse_expression, parse_str,
    parse_with_config,
};
pub use token::Token;
pub use tokenizer::{
    LexerMode, Span, tokenize_in_mode, tokenize_with_trivia, tokenize_without_trivia,
};
