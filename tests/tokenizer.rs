//! Integration tests for the mode-aware reference tokenizer.

mod test_util;

use esql_parser::{LexerMode, SyntaxKind, tokenize_in_mode, tokenize_with_trivia};
use rstest::{fixture, rstest};
use test_util::kinds;

use SyntaxKind as K;

#[fixture]
fn query() -> &'static str {
    "FROM logs-* // all\n| WHERE a > 1"
}

#[rstest]
fn trivia_concatenates_back_to_source(query: &str) {
    let text: String = tokenize_with_trivia(query)
        .iter()
        .map(|t| t.text.as_str())
        .collect();
    assert_eq!(text, query);
}

#[rstest]
fn byte_spans_index_the_source(query: &str) {
    for token in tokenize_with_trivia(query) {
        assert_eq!(query.get(token.span.clone()), Some(token.text.as_str()));
    }
}

#[rstest]
fn eof_is_always_last() {
    let tokens = tokenize_with_trivia("");
    assert_eq!(tokens.len(), 1);
    assert!(tokens.first().is_some_and(|t| t.is_eof() && t.text.is_empty()));
}

#[rstest]
#[case("FROM a-b.c*", vec![K::K_FROM, K::T_SRC_UNQUOTED_IDENTIFIER, K::T_EOF])]
#[case("from `x y`", vec![K::K_FROM, K::T_SRC_QUOTED_IDENTIFIER, K::T_EOF])]
#[case(
    "ROW a = 1.5e3",
    vec![K::K_ROW, K::T_UNQUOTED_IDENTIFIER, K::T_ASSIGN, K::T_DECIMAL_LITERAL, K::T_EOF]
)]
#[case(
    "EVAL x = avg(y) + round(z)",
    vec![
        K::K_EVAL, K::T_UNQUOTED_IDENTIFIER, K::T_ASSIGN, K::T_UNARY_FUNCTION, K::T_LP,
        K::T_UNQUOTED_IDENTIFIER, K::T_RP, K::T_PLUS, K::T_MATH_FUNCTION, K::T_LP,
        K::T_UNQUOTED_IDENTIFIER, K::T_RP, K::T_EOF,
    ]
)]
#[case(
    "WHERE is_null(a) AND b != \"c\"",
    vec![
        K::K_WHERE, K::T_WHERE_FUNCTIONS, K::T_LP, K::T_UNQUOTED_IDENTIFIER, K::T_RP, K::K_AND,
        K::T_UNQUOTED_IDENTIFIER, K::T_COMPARISON_OPERATOR, K::T_STRING, K::T_EOF,
    ]
)]
#[case(
    "SORT a desc NULLS first",
    vec![
        K::K_SORT, K::T_UNQUOTED_IDENTIFIER, K::T_ORDERING, K::K_NULLS,
        K::T_NULLS_ORDERING_DIRECTION, K::T_EOF,
    ]
)]
#[case(
    "ENRICH p ON f WITH n = e",
    vec![
        K::K_ENRICH, K::T_ENR_UNQUOTED_IDENTIFIER, K::K_ON, K::T_ENR_UNQUOTED_IDENTIFIER,
        K::K_WITH, K::T_ENR_UNQUOTED_IDENTIFIER, K::T_ASSIGN, K::T_ENR_UNQUOTED_IDENTIFIER,
        K::T_EOF,
    ]
)]
fn modes_classify_words(#[case] src: &str, #[case] expected: Vec<SyntaxKind>) {
    assert_eq!(kinds(src), expected);
}

#[rstest]
fn pipe_returns_to_command_keywords() {
    assert_eq!(
        kinds("FROM where | where where"),
        vec![
            K::K_FROM,
            K::T_SRC_UNQUOTED_IDENTIFIER,
            K::T_PIPE,
            K::K_WHERE,
            K::T_UNQUOTED_IDENTIFIER,
            K::T_EOF,
        ]
    );
}

#[rstest]
fn unknown_command_word_stays_in_default_mode() {
    assert_eq!(
        kinds("FROM a | bogus limit"),
        vec![
            K::K_FROM,
            K::T_SRC_UNQUOTED_IDENTIFIER,
            K::T_PIPE,
            K::T_UNQUOTED_IDENTIFIER,
            K::K_LIMIT,
            K::T_EOF,
        ]
    );
}

#[rstest]
fn expression_mode_starts_without_a_command() {
    let tokens = tokenize_in_mode("not x in (1)", LexerMode::Expression);
    let kinds: Vec<_> = tokens
        .iter()
        .filter(|t| !t.kind.is_trivia())
        .map(|t| t.kind)
        .collect();
    assert_eq!(
        kinds,
        [
            K::K_NOT,
            K::T_UNQUOTED_IDENTIFIER,
            K::K_IN,
            K::T_LP,
            K::T_INTEGER_LITERAL,
            K::T_RP,
            K::T_EOF,
        ]
    );
}

#[rstest]
fn comments_are_hidden() {
    let tokens = tokenize_with_trivia("ROW /* a */ b // c");
    let hidden: Vec<_> = tokens
        .iter()
        .filter(|t| t.kind.is_trivia())
        .map(|t| t.kind)
        .collect();
    assert_eq!(
        hidden,
        [K::T_WS, K::T_MULTILINE_COMMENT, K::T_WS, K::T_WS, K::T_LINE_COMMENT]
    );
}
