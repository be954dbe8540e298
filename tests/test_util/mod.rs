//! Shared helpers for the integration tests.
//!
//! They mirror part of `esql_parser::test_util` without requiring the
//! `test-support` feature, so the tests compile against the public API only.

#![expect(
    dead_code,
    reason = "helpers are reused across multiple tests so some may be unused"
)]

use esql_parser::{
    EsqlLanguage, ErrorKind, SyntaxError, SyntaxKind, ast::SingleStatement, parse_str,
    tokenize_without_trivia,
};

/// Parse `src`, panicking with the diagnostics if any were reported.
#[track_caller]
#[must_use]
pub fn parse_clean(src: &str) -> SingleStatement {
    match parse_str(src).into_result() {
        Ok(statement) => statement,
        Err(errors) => panic!("failed to parse {src:?}: {errors:?}"),
    }
}

/// S-expression of a statement that must parse cleanly.
#[track_caller]
#[must_use]
pub fn sexpr(src: &str) -> String {
    parse_clean(src).to_sexpr()
}

/// Messages of every diagnostic reported for `src`.
#[must_use]
pub fn error_messages(src: &str) -> Vec<String> {
    parse_str(src)
        .errors()
        .iter()
        .map(|e| e.message.clone())
        .collect()
}

/// Kinds of the significant tokens of `src`, EOF included.
#[must_use]
pub fn kinds(src: &str) -> Vec<SyntaxKind> {
    tokenize_without_trivia(src).iter().map(|t| t.kind).collect()
}

/// Assert that `errors` holds exactly one error of `kind` whose message
/// contains `pattern`.
#[track_caller]
pub fn assert_only_error(errors: &[SyntaxError], kind: ErrorKind, pattern: &str) {
    let [error] = errors else {
        panic!("expected one error, got {errors:?}");
    };
    assert_eq!(error.kind, kind, "unexpected error kind in {error:?}");
    assert!(
        error.message.contains(pattern),
        "expected error to contain '{pattern}', got '{}'",
        error.message
    );
}

/// Collect the text of a syntax subtree.
///
/// Iterates with an explicit stack so deeply nested inputs do not risk
/// recursion overflow.
#[must_use]
pub fn pretty_print(node: &rowan::SyntaxNode<EsqlLanguage>) -> String {
    let mut out = String::new();
    let mut stack = vec![rowan::SyntaxElement::Node(node.clone())];

    while let Some(item) = stack.pop() {
        match item {
            rowan::SyntaxElement::Token(t) => out.push_str(t.text()),
            rowan::SyntaxElement::Node(n) => {
                let children: Vec<rowan::SyntaxElement<EsqlLanguage>> =
                    n.children_with_tokens().collect();
                for child in children.into_iter().rev() {
                    stack.push(child);
                }
            }
        }
    }

    out
}
