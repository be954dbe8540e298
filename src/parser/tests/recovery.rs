//! Diagnostics and the trees built while recovering from them.

use crate::parser::ast::{ProcessingCommand, Query};
use crate::parser::core::{BOOLEAN_START, OPERATOR_START, WHERE_START};
use crate::parser::{ErrorKind, ParserConfig};
use crate::test_util::{assert_error_at, assert_single_error};
use crate::{
    SyntaxKind, TokenSet, parse_expression, parse_str, parse_with_config, tokenize_with_trivia,
};
use rstest::rstest;

#[rstest]
#[case(
    "FROM | LIMIT 1",
    ErrorKind::MissingToken,
    "missing {SRC_UNQUOTED_IDENTIFIER, SRC_QUOTED_IDENTIFIER} at '|'",
    "(pipe (from <missing SRC_UNQUOTED_IDENTIFIER>) (limit 1))"
)]
#[case(
    "FROM a | LIMIT x | KEEP b",
    ErrorKind::MismatchedInput,
    "mismatched input 'x' expecting INTEGER_LITERAL",
    "(pipe (pipe (from a) (error)) (keep b))"
)]
#[case(
    "FROM a | LIMIT , 5",
    ErrorKind::ExtraneousInput,
    "extraneous input ',' expecting INTEGER_LITERAL",
    "(pipe (from a) (limit 5))"
)]
#[case(
    "FROM a | WHERE (b > 1 | LIMIT 1",
    ErrorKind::MissingToken,
    "missing ')' at '|'",
    "(pipe (pipe (from a) (where (group (> b 1)))) (limit 1))"
)]
#[case(
    "FROM a | FOO b | LIMIT 1",
    ErrorKind::NoViableAlternative,
    "no viable alternative at input 'FOO'",
    "(pipe (pipe (from a) (error)) (limit 1))"
)]
#[case(
    "FROM a | WHERE a NOT b",
    ErrorKind::ExtraneousInput,
    "extraneous input 'NOT' expecting {'|', <EOF>}",
    "(pipe (from a) (where a))"
)]
#[case(
    "EXPLAIN [ FROM a",
    ErrorKind::MissingToken,
    "missing ']' at '<EOF>'",
    "(explain (from a))"
)]
#[case(
    "EXPLAIN [ FROM a b ]",
    ErrorKind::ExtraneousInput,
    "extraneous input 'b' expecting {'|', ']'}",
    "(explain (from a))"
)]
fn single_mistakes_are_repaired(
    #[case] src: &str,
    #[case] kind: ErrorKind,
    #[case] message: &str,
    #[case] sexpr: &str,
) {
    let parsed = parse_str(src);
    assert_single_error(parsed.errors(), kind, message);
    assert_eq!(parsed.statement().to_sexpr(), sexpr);
}

#[rstest]
#[case("FROM a | WHERE", WHERE_START)]
#[case("FROM a | WHERE b AND NOT", WHERE_START)]
#[case("FROM a | EVAL x =", BOOLEAN_START)]
#[case("ROW a = 1 +", OPERATOR_START)]
#[case("ROW a = 1 > -", OPERATOR_START)]
fn expression_starts_list_every_alternative(#[case] src: &str, #[case] expected: TokenSet) {
    let parsed = parse_str(src);
    let error = assert_single_error(parsed.errors(), ErrorKind::NoViableAlternative, "<EOF>");
    assert_eq!(error.expected, expected);
}

#[rstest]
fn where_functions_are_only_expected_inside_where() {
    let parsed = parse_str("FROM a | EVAL x = NOT");
    let error = assert_single_error(parsed.errors(), ErrorKind::NoViableAlternative, "<EOF>");
    assert!(error.expected.contains(SyntaxKind::K_NOT));
    assert!(error.expected.contains(SyntaxKind::T_MATH_FUNCTION));
    assert!(!error.expected.contains(SyntaxKind::T_WHERE_FUNCTIONS));
}

#[rstest]
fn conjured_nulls_direction_is_left_unset() {
    let parsed = parse_str("FROM a | SORT b DESC NULLS");
    assert_single_error(
        parsed.errors(),
        ErrorKind::MissingToken,
        "missing NULLS_ORDERING_DIRECTION at '<EOF>'",
    );
    let Query::Composite {
        command: ProcessingCommand::Sort(sort),
        ..
    } = &parsed.statement().query
    else {
        panic!("expected SORT, got {:?}", parsed.statement().query);
    };
    let order = sort.orders.first().unwrap_or_else(|| panic!("missing order"));
    assert_eq!(order.nulls, None);
    assert_eq!(parsed.statement().to_sexpr(), "(pipe (from a) (sort (order b desc)))");
}

#[rstest]
fn missing_source_is_reported_at_the_pipe() {
    let parsed = parse_str("FROM | LIMIT 1");
    let error = assert_single_error(parsed.errors(), ErrorKind::MissingToken, "missing");
    assert_error_at(error, 1, 5);
    assert_eq!(error.to_string(), format!("line 1:5 {}", error.message));
}

#[rstest]
fn each_stage_reports_its_own_error() {
    let parsed = parse_str("FROM a\n| LIMIT x\n| LIMIT y");
    let positions: Vec<_> = parsed
        .errors()
        .iter()
        .map(|e| (e.offending_token.line, e.offending_token.column))
        .collect();
    assert_eq!(positions, [(2, 8), (3, 8)]);
}

#[rstest]
#[case("SHOW foo", "no viable alternative at input 'SHOW foo'")]
#[case("SHOW", "no viable alternative at input 'SHOW<EOF>'")]
fn show_needs_a_target(#[case] src: &str, #[case] message: &str) {
    let parsed = parse_str(src);
    assert_single_error(parsed.errors(), ErrorKind::NoViableAlternative, message);
    assert_eq!(parsed.statement().to_sexpr(), "(error)");
}

#[rstest]
fn disabled_recovery_stops_at_the_first_error() {
    let tokens = tokenize_with_trivia("FROM | LIMIT 1 | LIMIT x");
    let config = ParserConfig::default().with_recovery(false);
    let parsed = parse_with_config(&tokens, &config);
    assert_single_error(
        parsed.errors(),
        ErrorKind::MismatchedInput,
        "mismatched input '|' expecting {SRC_UNQUOTED_IDENTIFIER, SRC_QUOTED_IDENTIFIER}",
    );
    assert_eq!(parsed.statement().to_sexpr(), "(error)");
}

#[rstest]
fn deep_nesting_fails_cleanly() {
    let src = format!("{}1{}", "(".repeat(200), ")".repeat(200));
    let errors = parse_expression(&src).err().unwrap_or_default();
    assert_eq!(
        errors.first().map(|e| e.kind),
        Some(ErrorKind::NestingTooDeep)
    );
}

#[rstest]
#[case("ROW a = 1", true)]
#[case("ROW a = ((1))", false)]
fn max_depth_is_configurable(#[case] src: &str, #[case] ok: bool) {
    let tokens = tokenize_with_trivia(src);
    let config = ParserConfig::default().with_max_depth(4);
    let parsed = parse_with_config(&tokens, &config);
    assert_eq!(parsed.is_ok(), ok, "{:?}", parsed.errors());
    if !ok {
        assert_single_error(parsed.errors(), ErrorKind::NestingTooDeep, "nesting deeper than 4");
    }
}

#[rstest]
fn erroneous_input_still_yields_error_nodes_in_the_cst() {
    let parsed = parse_str("FROM a | FOO b | LIMIT 1");
    let has_error = parsed
        .syntax()
        .descendants()
        .any(|node| node.kind() == SyntaxKind::N_ERROR);
    assert!(has_error);
    assert_eq!(parsed.syntax().text().to_string(), "FROM a | FOO b | LIMIT 1");
}
