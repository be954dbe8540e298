//! S-expression rendering used by tests and the `esql-parse` binary.
//!
//! Names, numbers and strings appear as written; every other node becomes
//! a parenthesised form headed by a lower-case tag, e.g.
//! `(pipe (from logs) (where (== a 1)))`. WHERE functions are tagged
//! `where_fn` to keep them apart from ordinary `call`s.

use super::{
    BooleanExpression, BooleanOp, Constant, Field, FunctionArgument, FunctionCall,
    MathFunctionArgument, NullsOrdering, OperatorExpression, OrderExpression, Ordering,
    PrimaryExpression, ProcessingCommand, QualifiedName, Query, RegexKind, ShowTarget,
    SingleStatement, SourceCommand, ValueExpression,
};

fn form<I>(head: &str, items: I) -> String
where
    I: IntoIterator<Item = String>,
{
    let mut out = format!("({head}");
    for item in items {
        out.push(' ');
        out.push_str(&item);
    }
    out.push(')');
    out
}

fn names(names: &[QualifiedName]) -> impl Iterator<Item = String> + '_ {
    names.iter().map(QualifiedName::to_sexpr)
}

fn call<A>(call: &FunctionCall<A>, arg: impl Fn(&A) -> String) -> String {
    form(
        "call",
        std::iter::once(call.name.raw.clone()).chain(call.args.iter().map(arg)),
    )
}

/// Render a left-nested chain without recursing along its spine:
/// `first` with `[(op1, r1), (op2, r2)]` becomes `(op2 (op1 first r1) r2)`.
fn left_nested<T>(first: &T, rest: &[(&str, &T)], render: impl Fn(&T) -> String) -> String {
    let mut out = String::new();
    for (head, _) in rest.iter().rev() {
        out.push('(');
        out.push_str(head);
        out.push(' ');
    }
    out.push_str(&render(first));
    for (_, right) in rest {
        out.push(' ');
        out.push_str(&render(right));
        out.push(')');
    }
    out
}

impl SingleStatement {
    #[must_use]
    pub fn to_sexpr(&self) -> String {
        self.query.to_sexpr()
    }
}

impl Query {
    #[must_use]
    pub fn to_sexpr(&self) -> String {
        let source = self.source().to_sexpr();
        let commands: Vec<_> = self
            .processing_commands()
            .into_iter()
            .map(ProcessingCommand::to_sexpr)
            .collect();
        let rest: Vec<_> = commands.iter().map(|command| ("pipe", command)).collect();
        left_nested(&source, &rest, String::clone)
    }
}

impl SourceCommand {
    #[must_use]
    pub fn to_sexpr(&self) -> String {
        match self {
            Self::Explain(explain) => format!("(explain {})", explain.query.to_sexpr()),
            Self::From(from) => form("from", from.sources.iter().map(|s| s.raw.clone())),
            Self::Row(row) => form("row", row.fields.iter().map(Field::to_sexpr)),
            Self::Show(show) => match show.target {
                ShowTarget::Info => "(show info)".to_string(),
                ShowTarget::Functions => "(show functions)".to_string(),
            },
            Self::Error(_) => "(error)".to_string(),
        }
    }
}

impl ProcessingCommand {
    #[must_use]
    pub fn to_sexpr(&self) -> String {
        match self {
            Self::Eval(eval) => form("eval", eval.fields.iter().map(Field::to_sexpr)),
            Self::Limit(limit) => format!("(limit {})", limit.count.raw),
            Self::Keep(keep) => form("keep", names(&keep.fields)),
            Self::Rename(rename) => form(
                "rename",
                rename.clauses.iter().map(|clause| {
                    format!(
                        "(= {} {})",
                        clause.new_name.raw,
                        clause.old_name.to_sexpr()
                    )
                }),
            ),
            Self::Drop(drop) => form("drop", names(&drop.fields)),
            Self::Dissect(dissect) => {
                let options = dissect.options.iter().flatten().map(|option| {
                    format!("(= {} {})", option.name.raw, option.value.to_sexpr())
                });
                form(
                    "dissect",
                    names(&dissect.fields)
                        .chain(std::iter::once(dissect.pattern.raw.clone()))
                        .chain(options),
                )
            }
            Self::Grok(grok) => form(
                "grok",
                names(&grok.fields).chain(std::iter::once(grok.pattern.raw.clone())),
            ),
            Self::Sort(sort) => form("sort", sort.orders.iter().map(OrderExpression::to_sexpr)),
            Self::Stats(stats) => {
                let fields = stats
                    .fields
                    .as_ref()
                    .map(|fields| form("fields", fields.iter().map(Field::to_sexpr)));
                let grouping = stats
                    .grouping
                    .as_ref()
                    .map(|grouping| form("by", names(grouping)));
                form("stats", fields.into_iter().chain(grouping))
            }
            Self::Where(filter) => format!("(where {})", filter.condition.to_sexpr()),
            Self::MvExpand(expand) => form("mv_expand", names(&expand.fields)),
            Self::Enrich(enrich) => {
                let on = enrich
                    .match_field
                    .as_ref()
                    .map(|field| format!("(on {})", field.raw));
                let with = enrich.with.as_ref().map(|clauses| {
                    form(
                        "with",
                        clauses.iter().map(|clause| match &clause.new_name {
                            Some(name) => {
                                format!("(= {} {})", name.raw, clause.enrich_field.raw)
                            }
                            None => clause.enrich_field.raw.clone(),
                        }),
                    )
                });
                form(
                    "enrich",
                    std::iter::once(enrich.policy.raw.clone())
                        .chain(on)
                        .chain(with),
                )
            }
            Self::Error(_) => "(error)".to_string(),
        }
    }
}

impl Field {
    #[must_use]
    pub fn to_sexpr(&self) -> String {
        match &self.name {
            Some(name) => format!("(= {} {})", name.raw, self.expression.to_sexpr()),
            None => self.expression.to_sexpr(),
        }
    }
}

impl OrderExpression {
    /// A bare expression when no modifiers are given, otherwise
    /// `(order expr asc nulls_last)` with the modifiers present.
    #[must_use]
    pub fn to_sexpr(&self) -> String {
        if self.ordering.is_none() && self.nulls.is_none() {
            return self.expression.to_sexpr();
        }
        let ordering = self.ordering.map(|ordering| match ordering {
            Ordering::Asc => "asc".to_string(),
            Ordering::Desc => "desc".to_string(),
        });
        let nulls = self.nulls.map(|nulls| match nulls {
            NullsOrdering::First => "nulls_first".to_string(),
            NullsOrdering::Last => "nulls_last".to_string(),
        });
        form(
            "order",
            std::iter::once(self.expression.to_sexpr())
                .chain(ordering)
                .chain(nulls),
        )
    }
}

impl BooleanExpression {
    #[must_use]
    pub fn to_sexpr(&self) -> String {
        match self {
            Self::Not { operand, .. } => format!("(not {})", operand.to_sexpr()),
            Self::Value(value) => value.to_sexpr(),
            Self::And { .. } | Self::Or { .. } => {
                let (first, rest) = self.left_chain();
                let rest: Vec<_> = rest
                    .into_iter()
                    .map(|(op, right)| {
                        let head = match op {
                            BooleanOp::And => "and",
                            BooleanOp::Or => "or",
                        };
                        (head, right)
                    })
                    .collect();
                left_nested(first, &rest, Self::to_sexpr)
            }
            Self::In {
                value, not, list, ..
            } => {
                let head = if not.is_some() { "not_in" } else { "in" };
                let items = list.iter().map(ValueExpression::to_sexpr);
                form(head, std::iter::once(value.to_sexpr()).chain(items))
            }
            Self::RegexMatch {
                value,
                not,
                kind,
                pattern,
                ..
            } => {
                let head = match (kind, not.is_some()) {
                    (RegexKind::Like, false) => "like",
                    (RegexKind::Like, true) => "not_like",
                    (RegexKind::Rlike, false) => "rlike",
                    (RegexKind::Rlike, true) => "not_rlike",
                };
                format!("({head} {} {})", value.to_sexpr(), pattern.raw)
            }
            Self::WhereFunction(function) => form(
                "where_fn",
                [function.name.raw.clone(), function.field.to_sexpr()]
                    .into_iter()
                    .chain(function.args.iter().map(FunctionArgument::to_sexpr)),
            ),
        }
    }
}

impl ValueExpression {
    #[must_use]
    pub fn to_sexpr(&self) -> String {
        match self {
            Self::Operator(operator) => operator.to_sexpr(),
            Self::Comparison {
                left, op, right, ..
            } => format!("({} {} {})", op.symbol(), left.to_sexpr(), right.to_sexpr()),
        }
    }
}

impl OperatorExpression {
    #[must_use]
    pub fn to_sexpr(&self) -> String {
        match self {
            Self::Primary(primary) => primary.to_sexpr(),
            Self::MathFn(f) => call(f, FunctionArgument::to_sexpr),
            Self::MathEvalFn(f) => call(f, MathFunctionArgument::to_sexpr),
            Self::Unary { sign, operand, .. } => {
                format!("({} {})", sign.symbol(), operand.to_sexpr())
            }
            Self::Binary { .. } => {
                let (first, rest) = self.left_chain();
                let rest: Vec<_> = rest
                    .into_iter()
                    .map(|(op, right)| (op.symbol(), right))
                    .collect();
                left_nested(first, &rest, Self::to_sexpr)
            }
        }
    }
}

impl PrimaryExpression {
    #[must_use]
    pub fn to_sexpr(&self) -> String {
        match self {
            Self::Constant(constant) => constant.to_sexpr(),
            Self::QualifiedName(name) => name.to_sexpr(),
            Self::Paren { expression, .. } => format!("(group {})", expression.to_sexpr()),
            Self::FunctionCall(f) => call(f, BooleanExpression::to_sexpr),
        }
    }
}

impl FunctionArgument {
    #[must_use]
    pub fn to_sexpr(&self) -> String {
        match self {
            Self::QualifiedName(name) => name.to_sexpr(),
            Self::String(string) => string.raw.clone(),
            Self::Numeric(number) => number.raw.clone(),
        }
    }
}

impl MathFunctionArgument {
    #[must_use]
    pub fn to_sexpr(&self) -> String {
        match self {
            Self::Value(value) => value.to_sexpr(),
            Self::TimeSpan(span) => format!("(span {} {})", span.value.raw, span.unit),
        }
    }
}

impl Constant {
    #[must_use]
    pub fn to_sexpr(&self) -> String {
        match self {
            Self::Null(_) => "null".to_string(),
            Self::Numeric(number) => number.raw.clone(),
            Self::Boolean(boolean) => boolean.value.to_string(),
            Self::String(string) => string.raw.clone(),
            Self::NumericArray { values, .. } => {
                form("list", values.iter().map(|v| v.raw.clone()))
            }
            Self::BooleanArray { values, .. } => {
                form("list", values.iter().map(|v| v.value.to_string()))
            }
            Self::StringArray { values, .. } => {
                form("list", values.iter().map(|v| v.raw.clone()))
            }
        }
    }
}

impl QualifiedName {
    #[must_use]
    pub fn to_sexpr(&self) -> String {
        self.parts
            .iter()
            .map(|part| part.raw.as_str())
            .collect::<Vec<_>>()
            .join(".")
    }
}

#[cfg(test)]
mod tests {
    use crate::parse_str;
    use rstest::rstest;

    #[rstest]
    #[case("FROM a | LIMIT 1 | KEEP b", "(pipe (pipe (from a) (limit 1)) (keep b))")]
    #[case("FROM a | STATS BY b", "(pipe (from a) (stats (by b)))")]
    #[case("FROM a | STATS", "(pipe (from a) (stats))")]
    #[case("FROM a | SORT b ASC, c", "(pipe (from a) (sort (order b asc) c))")]
    #[case("SHOW FUNCTIONS", "(show functions)")]
    #[case("FROM a | ENRICH p WITH x", "(pipe (from a) (enrich p (with x)))")]
    #[case("ROW a = round(1.5, 0)", "(row (= a (call round 1.5 0)))")]
    fn commands_render(#[case] src: &str, #[case] expected: &str) {
        let parsed = parse_str(src);
        assert!(parsed.errors().is_empty(), "{:?}", parsed.errors());
        assert_eq!(parsed.statement().to_sexpr(), expected);
    }
}
