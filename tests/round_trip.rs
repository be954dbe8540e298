//! The CST reproduces its input and `Display` output re-parses to the same
//! tree.

mod test_util;

use esql_parser::parse_str;
use rstest::rstest;
use test_util::{parse_clean, pretty_print};

#[rstest]
#[case("FROM a")]
#[case("from logs-*, `quoted``name` | limit 10")]
#[case("ROW a = 1, b = [1.5, 2], c = \"s\", d = true, e = null")]
#[case("FROM a | WHERE (a OR b) AND NOT c IN (1, 2)")]
#[case("FROM a | WHERE ip LIKE \"10.*\" OR cidr_match(ip, \"10.0.0.0/8\", \"192.168.0.0/16\")")]
#[case("FROM a | EVAL x = -a + b * (c - 1), y = round(x, 2), z = date_trunc(t, 2 hours)")]
#[case("FROM a | STATS n = count(x), avg(y) BY g | SORT n DESC NULLS FIRST, g")]
#[case("FROM a | DISSECT m \"%{a} %{b}\" append_separator = \"-\" | GROK m \"%{WORD:w}\"")]
#[case("FROM a | RENAME b = c.d | DROP e | PROJECT f | MV_EXPAND g")]
#[case("FROM a | ENRICH p ON k WITH n = v, w")]
#[case("EXPLAIN [ FROM a | WHERE b == 1 ] | LIMIT 5")]
#[case("SHOW FUNCTIONS")]
fn display_reparses_to_the_same_tree(#[case] src: &str) {
    let first = parse_clean(src);
    let printed = first.to_string();
    let second = parse_clean(&printed);
    assert_eq!(first.to_sexpr(), second.to_sexpr(), "printed as {printed:?}");
    assert_eq!(second.to_string(), printed);
}

#[rstest]
#[case("")]
#[case("FROM a")]
#[case("  FROM a  /* block */ |\n\tLIMIT 1 // trailing")]
#[case("FROM a | WHERE ( b")]
#[case("FROM a | BOGUS b c | LIMIT 1")]
#[case("ROW a = #")]
#[case("EXPLAIN [ FROM a | LIMIT ] ]")]
fn cst_reproduces_input(#[case] src: &str) {
    let parsed = parse_str(src);
    assert_eq!(pretty_print(&parsed.syntax()), src);
    assert_eq!(parsed.syntax().text().to_string(), src);
}

/// `head` applied left-nested `n` times: `(head (head first item) item)`.
fn nested_sexpr(head: &str, first: &str, item: &str, n: usize) -> String {
    format!(
        "{}{first}{}",
        format!("({head} ").repeat(n),
        format!(" {item})").repeat(n)
    )
}

#[rstest]
#[case::conjunction(
    format!("FROM t | WHERE a{}", " AND a".repeat(20_000)),
    format!("(pipe (from t) (where {}))", nested_sexpr("and", "a", "a", 20_000))
)]
#[case::sum(
    format!("ROW x = 1{}", " + 1".repeat(20_000)),
    format!("(row (= x {}))", nested_sexpr("+", "1", "1", 20_000))
)]
#[case::pipeline(
    format!("FROM t{}", " | LIMIT 1".repeat(20_000)),
    nested_sexpr("pipe", "(from t)", "(limit 1)", 20_000)
)]
fn long_chains_render_and_reparse(#[case] src: String, #[case] expected: String) {
    let statement = parse_clean(&src);
    assert_eq!(statement.to_sexpr(), expected);
    let printed = statement.to_string();
    assert_eq!(printed, src);
    assert_eq!(parse_clean(&printed).to_sexpr(), expected);
}
