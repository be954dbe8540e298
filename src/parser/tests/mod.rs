//! Tests for parser components and integration scenarios.

mod recovery;

use super::token_stream::TokenStream;
use crate::{SyntaxKind, Token, test_util::tokenize};
use rstest::{fixture, rstest};

#[fixture]
fn pipeline_tokens() -> Vec<Token> {
    tokenize("FROM a // note\n| LIMIT 5")
}

/// The stream only ever stops on significant tokens.
#[rstest]
fn stream_skips_hidden_tokens(pipeline_tokens: Vec<Token>) {
    let mut stream = TokenStream::new(&pipeline_tokens);
    let mut kinds = Vec::new();
    while !stream.at_eof() {
        kinds.push(stream.advance().kind);
    }
    assert_eq!(
        kinds,
        [
            SyntaxKind::K_FROM,
            SyntaxKind::T_SRC_UNQUOTED_IDENTIFIER,
            SyntaxKind::T_PIPE,
            SyntaxKind::K_LIMIT,
            SyntaxKind::T_INTEGER_LITERAL,
        ]
    );
    assert_eq!(stream.kind(), SyntaxKind::T_EOF);
}

#[rstest]
fn lookahead_counts_significant_tokens(pipeline_tokens: Vec<Token>) {
    let stream = TokenStream::new(&pipeline_tokens);
    assert_eq!(stream.lookahead(0), stream.current());
    assert_eq!(stream.lookahead(2).kind, SyntaxKind::T_PIPE);
    assert_eq!(stream.lookahead(10).kind, SyntaxKind::T_EOF);
}

#[rstest]
fn indices_refer_to_the_full_slice(pipeline_tokens: Vec<Token>) {
    let mut stream = TokenStream::new(&pipeline_tokens);
    stream.advance();
    assert_eq!(stream.index(), 2);
    assert_eq!(stream.previous_index(), Some(0));
    stream.advance();
    assert_eq!(stream.index(), 6);
    assert_eq!(stream.text_between(0, 2), "FROM a");
}

#[rstest]
fn reset_restores_a_mark(pipeline_tokens: Vec<Token>) {
    let mut stream = TokenStream::new(&pipeline_tokens);
    stream.advance();
    let mark = stream.mark();
    stream.advance();
    stream.advance();
    stream.reset(mark);
    assert_eq!(stream.kind(), SyntaxKind::T_SRC_UNQUOTED_IDENTIFIER);
    assert_eq!(stream.previous_index(), Some(0));
}

#[rstest]
fn advancing_at_eof_is_idempotent() {
    let tokens = tokenize("FROM a");
    let mut stream = TokenStream::new(&tokens);
    stream.advance();
    stream.advance();
    assert!(stream.at_eof());
    assert!(stream.advance().is_eof());
    assert!(stream.advance().is_eof());
    assert_eq!(stream.previous_index(), Some(2));
}

#[rstest]
fn missing_eof_is_synthesised() {
    let mut tokens = tokenize("FROM a");
    tokens.retain(|token| !token.is_eof());
    let mut stream = TokenStream::new(&tokens);
    stream.advance();
    stream.advance();
    let eof = stream.current();
    assert!(eof.is_eof());
    assert_eq!(eof.start(), 6);
}
