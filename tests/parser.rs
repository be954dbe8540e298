//! Integration tests for complete ES|QL statements.

mod test_util;

use esql_parser::ast::{
    Constant, ProcessingCommand, QualifiedName, Query, SourceCommand, Visitor, walk_statement,
};
use esql_parser::{SyntaxKind, parse_str};
use rstest::{fixture, rstest};
use test_util::{parse_clean, sexpr};

#[fixture]
fn web_logs() -> &'static str {
    concat!(
        "FROM web-logs-*, `archive`\n",
        "| WHERE status >= 500 AND url.path LIKE \"/api/*\"\n",
        "| EVAL latency_s = latency_ms / 1000, bucket = date_trunc(@timestamp, 1 day)\n",
        "| STATS errors = count(status), slowest = max(latency_s) BY bucket, host.name\n",
        "| SORT errors DESC NULLS LAST\n",
        "| LIMIT 20",
    )
}

#[rstest]
fn full_pipeline(web_logs: &str) {
    assert_eq!(
        sexpr(web_logs),
        concat!(
            "(pipe (pipe (pipe (pipe (pipe ",
            "(from web-logs-* `archive`) ",
            "(where (and (>= status 500) (like url.path \"/api/*\")))) ",
            "(eval (= latency_s (/ latency_ms 1000)) ",
            "(= bucket (call date_trunc @timestamp (span 1 day))))) ",
            "(stats (fields (= errors (call count status)) (= slowest (call max latency_s))) ",
            "(by bucket host.name))) ",
            "(sort (order errors desc nulls_last))) ",
            "(limit 20))",
        )
    );
}

#[rstest]
fn pipeline_exposes_commands_in_order(web_logs: &str) {
    let statement = parse_clean(web_logs);
    assert!(matches!(statement.query.source(), SourceCommand::From(_)));
    let names: Vec<_> = statement
        .query
        .processing_commands()
        .iter()
        .map(|command| match command {
            ProcessingCommand::Where(_) => "where",
            ProcessingCommand::Eval(_) => "eval",
            ProcessingCommand::Stats(_) => "stats",
            ProcessingCommand::Sort(_) => "sort",
            ProcessingCommand::Limit(_) => "limit",
            _ => "other",
        })
        .collect();
    assert_eq!(names, ["where", "eval", "stats", "sort", "limit"]);
    assert_eq!(
        statement.index_pattern().as_deref(),
        Some("web-logs-*,archive")
    );
}

#[rstest]
#[case(
    "ROW a = 1, b = \"two\", c = [true, false]",
    "(row (= a 1) (= b \"two\") (= c (list true false)))"
)]
#[case("row x = null", "(row (= x null))")]
#[case("SHOW INFO", "(show info)")]
#[case("SHOW FUNCTIONS | LIMIT 3", "(pipe (show functions) (limit 3))")]
#[case("FROM a | DROP b, c.d", "(pipe (from a) (drop b c.d))")]
#[case(
    "FROM a | RENAME new = old | MV_EXPAND tags",
    "(pipe (pipe (from a) (rename (= new old))) (mv_expand tags))"
)]
#[case(
    "FROM a | GROK message \"%{IP:ip} %{WORD:verb}\" | KEEP ip, verb",
    "(pipe (pipe (from a) (grok message \"%{IP:ip} %{WORD:verb}\")) (keep ip verb))"
)]
#[case("FROM a | STATS BY g", "(pipe (from a) (stats (by g)))")]
#[case("FROM a | STATS", "(pipe (from a) (stats))")]
fn commands(#[case] src: &str, #[case] expected: &str) {
    assert_eq!(sexpr(src), expected);
}

#[rstest]
#[case("FROM a | WHERE NOT a AND b OR c", "(or (and (not a) b) c)")]
#[case("FROM a | WHERE a + b * c > d", "(> (+ a (* b c)) d)")]
#[case("FROM a | WHERE -a * -b < 0", "(< (* (- a) (- b)) 0)")]
#[case("FROM a | WHERE (a OR b) AND c", "(and (group (or a b)) c)")]
#[case("FROM a | WHERE x IN (1, 2) OR y NOT LIKE \"z\"", "(or (in x 1 2) (not_like y \"z\"))")]
fn where_precedence(#[case] src: &str, #[case] condition: &str) {
    assert_eq!(sexpr(src), format!("(pipe (from a) (where {condition}))"));
}

#[rstest]
#[case("FROM a | KEEP b, c", "FROM a | PROJECT b, c")]
#[case("from a | keep b", "from a | project b")]
fn keep_and_project_are_equivalent(#[case] keep: &str, #[case] project: &str) {
    assert_eq!(sexpr(keep), sexpr(project));
}

#[rstest]
#[case("FROM a | ENRICH p", "(enrich p)")]
#[case("FROM a | ENRICH p ON f", "(enrich p (on f))")]
#[case("FROM a | ENRICH p WITH x", "(enrich p (with x))")]
#[case("FROM a | ENRICH p ON f WITH y = x, z", "(enrich p (on f) (with (= y x) z))")]
#[case("FROM a | ENRICH `my-policy` ON `f`", "(enrich `my-policy` (on `f`))")]
fn enrich_forms(#[case] src: &str, #[case] command: &str) {
    assert_eq!(sexpr(src), format!("(pipe (from a) {command})"));
}

#[rstest]
fn enrich_is_followed_by_another_stage() {
    assert_eq!(
        sexpr("FROM a | ENRICH p ON f | WHERE f > 1"),
        "(pipe (pipe (from a) (enrich p (on f))) (where (> f 1)))"
    );
}

#[rstest]
fn show_is_a_complete_source() {
    let parsed = parse_str("SHOW INFO");
    assert!(parsed.is_ok());
    let Query::SingleCommand(SourceCommand::Show(show)) = &parsed.statement().query else {
        panic!("expected SHOW, got {:?}", parsed.statement().query);
    };
    assert_eq!(show.keyword.kind, SyntaxKind::K_SHOW);
}

#[rstest]
#[case("EXPLAIN [ FROM a ]", "(explain (from a))")]
#[case("EXPLAIN [FROM a|LIMIT 1]|LIMIT 2", "(pipe (explain (pipe (from a) (limit 1))) (limit 2))")]
#[case(
    "EXPLAIN [ ROW a = [1, 2] | WHERE a IN (1) ]",
    "(explain (pipe (row (= a (list 1 2))) (where (in a 1))))"
)]
fn explain_subqueries(#[case] src: &str, #[case] expected: &str) {
    assert_eq!(sexpr(src), expected);
}

#[rstest]
#[case("FROM logs", Some("logs"))]
#[case("FROM logs-*,metrics-* | LIMIT 1", Some("logs-*,metrics-*"))]
#[case("EXPLAIN [ FROM inner ]", Some("inner"))]
#[case("ROW a = 1", None)]
fn index_pattern(#[case] src: &str, #[case] expected: Option<&str>) {
    assert_eq!(parse_clean(src).index_pattern().as_deref(), expected);
}

#[derive(Default)]
struct Collector {
    names: Vec<String>,
    constants: usize,
}

impl Visitor for Collector {
    fn visit_qualified_name(&mut self, name: &QualifiedName) {
        self.names.push(name.name());
    }

    fn visit_constant(&mut self, _constant: &Constant) {
        self.constants += 1;
    }
}

#[rstest]
fn visitor_sees_names_and_constants_in_source_order(web_logs: &str) {
    let statement = parse_clean(web_logs);
    let mut collector = Collector::default();
    walk_statement(&mut collector, &statement);
    assert_eq!(
        collector.names,
        [
            "status",
            "url.path",
            "latency_ms",
            "@timestamp",
            "status",
            "latency_s",
            "bucket",
            "host.name",
            "errors",
        ]
    );
    assert_eq!(collector.constants, 2);
}
