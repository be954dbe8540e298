//! Re-serialisation of AST nodes as ES|QL text.
//!
//! Output uses upper-case keywords and single spaces, and keeps identifiers,
//! numbers and strings exactly as written. Parentheses come from explicit
//! [`PrimaryExpression::Paren`] nodes, so printing and re-parsing a valid
//! statement yields the same tree.

use std::fmt::{self, Display, Formatter};

use super::{
    BooleanExpression, BooleanValue, CommandOption, Constant, DissectCommand, EnrichCommand,
    EnrichWithClause, Field, FunctionArgument, FunctionCall, Identifier, MathFunctionArgument,
    NullsOrdering, NumericValue, OperatorExpression, OrderExpression, Ordering,
    PrimaryExpression, ProcessingCommand, QualifiedName, Query, RegexKind, RenameClause,
    ShowTarget, SingleStatement, SortCommand, SourceCommand, StatsCommand, StringLiteral,
    TimeSpan, ValueExpression, WhereFunction,
};

fn write_list<T: Display>(f: &mut Formatter<'_>, items: &[T]) -> fmt::Result {
    for (idx, item) in items.iter().enumerate() {
        if idx > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl Display for SingleStatement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.query)
    }
}

impl Display for Query {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source())?;
        for command in self.processing_commands() {
            write!(f, " | {command}")?;
        }
        Ok(())
    }
}

impl Display for SourceCommand {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Explain(explain) => write!(f, "EXPLAIN [ {} ]", explain.query),
            Self::From(from) => {
                f.write_str("FROM ")?;
                write_list(f, &from.sources)
            }
            Self::Row(row) => {
                f.write_str("ROW ")?;
                write_list(f, &row.fields)
            }
            Self::Show(show) => match show.target {
                ShowTarget::Info => f.write_str("SHOW INFO"),
                ShowTarget::Functions => f.write_str("SHOW FUNCTIONS"),
            },
            Self::Error(_) => f.write_str("<error>"),
        }
    }
}

impl Display for ProcessingCommand {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Eval(eval) => {
                f.write_str("EVAL ")?;
                write_list(f, &eval.fields)
            }
            Self::Limit(limit) => write!(f, "LIMIT {}", limit.count),
            Self::Keep(keep) => {
                write!(f, "{} ", keep.keyword.text.to_ascii_uppercase())?;
                write_list(f, &keep.fields)
            }
            Self::Rename(rename) => {
                f.write_str("RENAME ")?;
                write_list(f, &rename.clauses)
            }
            Self::Drop(drop) => {
                f.write_str("DROP ")?;
                write_list(f, &drop.fields)
            }
            Self::Dissect(dissect) => write!(f, "{dissect}"),
            Self::Grok(grok) => {
                f.write_str("GROK ")?;
                write_list(f, &grok.fields)?;
                write!(f, " {}", grok.pattern)
            }
            Self::Sort(sort) => write!(f, "{sort}"),
            Self::Stats(stats) => write!(f, "{stats}"),
            Self::Where(filter) => write!(f, "WHERE {}", filter.condition),
            Self::MvExpand(expand) => {
                f.write_str("MV_EXPAND ")?;
                write_list(f, &expand.fields)
            }
            Self::Enrich(enrich) => write!(f, "{enrich}"),
            Self::Error(_) => f.write_str("<error>"),
        }
    }
}

impl Display for DissectCommand {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("DISSECT ")?;
        write_list(f, &self.fields)?;
        write!(f, " {}", self.pattern)?;
        if let Some(options) = &self.options {
            f.write_str(" ")?;
            write_list(f, options)?;
        }
        Ok(())
    }
}

impl Display for SortCommand {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("SORT ")?;
        write_list(f, &self.orders)
    }
}

impl Display for StatsCommand {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("STATS")?;
        if let Some(fields) = &self.fields {
            f.write_str(" ")?;
            write_list(f, fields)?;
        }
        if let Some(grouping) = &self.grouping {
            f.write_str(" BY ")?;
            write_list(f, grouping)?;
        }
        Ok(())
    }
}

impl Display for EnrichCommand {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "ENRICH {}", self.policy)?;
        if let Some(field) = &self.match_field {
            write!(f, " ON {field}")?;
        }
        if let Some(with) = &self.with {
            f.write_str(" WITH ")?;
            write_list(f, with)?;
        }
        Ok(())
    }
}

impl Display for EnrichWithClause {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.new_name {
            write!(f, "{name} = ")?;
        }
        write!(f, "{}", self.enrich_field)
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.name {
            write!(f, "{name} = ")?;
        }
        write!(f, "{}", self.expression)
    }
}

impl Display for RenameClause {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.new_name, self.old_name)
    }
}

impl Display for CommandOption {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.name, self.value)
    }
}

impl Display for OrderExpression {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.expression)?;
        match self.ordering {
            Some(Ordering::Asc) => f.write_str(" ASC")?,
            Some(Ordering::Desc) => f.write_str(" DESC")?,
            None => {}
        }
        match self.nulls {
            Some(NullsOrdering::First) => f.write_str(" NULLS FIRST"),
            Some(NullsOrdering::Last) => f.write_str(" NULLS LAST"),
            None => Ok(()),
        }
    }
}

impl Display for BooleanExpression {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Not { operand, .. } => write!(f, "NOT {operand}"),
            Self::Value(value) => write!(f, "{value}"),
            Self::And { .. } | Self::Or { .. } => {
                let (first, rest) = self.left_chain();
                write!(f, "{first}")?;
                for (op, right) in rest {
                    write!(f, " {} {right}", op.keyword())?;
                }
                Ok(())
            }
            Self::In {
                value, not, list, ..
            } => {
                let not = if not.is_some() { " NOT" } else { "" };
                write!(f, "{value}{not} IN (")?;
                write_list(f, list)?;
                f.write_str(")")
            }
            Self::RegexMatch {
                value,
                not,
                kind,
                pattern,
                ..
            } => {
                let not = if not.is_some() { " NOT" } else { "" };
                let keyword = match kind {
                    RegexKind::Like => "LIKE",
                    RegexKind::Rlike => "RLIKE",
                };
                write!(f, "{value}{not} {keyword} {pattern}")
            }
            Self::WhereFunction(function) => write!(f, "{function}"),
        }
    }
}

impl Display for WhereFunction {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}", self.name, self.field)?;
        for arg in &self.args {
            write!(f, ", {arg}")?;
        }
        f.write_str(")")
    }
}

impl Display for ValueExpression {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Operator(operator) => write!(f, "{operator}"),
            Self::Comparison {
                left, op, right, ..
            } => write!(f, "{left} {} {right}", op.symbol()),
        }
    }
}

impl Display for OperatorExpression {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primary(primary) => write!(f, "{primary}"),
            Self::MathFn(call) => write!(f, "{call}"),
            Self::MathEvalFn(call) => write!(f, "{call}"),
            Self::Unary { sign, operand, .. } => write!(f, "{}{operand}", sign.symbol()),
            Self::Binary { .. } => {
                let (first, rest) = self.left_chain();
                write!(f, "{first}")?;
                for (op, right) in rest {
                    write!(f, " {} {right}", op.symbol())?;
                }
                Ok(())
            }
        }
    }
}

impl Display for PrimaryExpression {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant(constant) => write!(f, "{constant}"),
            Self::QualifiedName(name) => write!(f, "{name}"),
            Self::Paren { expression, .. } => write!(f, "({expression})"),
            Self::FunctionCall(call) => write!(f, "{call}"),
        }
    }
}

impl<A: Display> Display for FunctionCall<A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        write_list(f, &self.args)?;
        f.write_str(")")
    }
}

impl Display for FunctionArgument {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::QualifiedName(name) => write!(f, "{name}"),
            Self::String(string) => write!(f, "{string}"),
            Self::Numeric(number) => write!(f, "{number}"),
        }
    }
}

impl Display for MathFunctionArgument {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => write!(f, "{value}"),
            Self::TimeSpan(span) => write!(f, "{span}"),
        }
    }
}

impl Display for TimeSpan {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}

impl Display for Constant {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null(_) => f.write_str("NULL"),
            Self::Numeric(number) => write!(f, "{number}"),
            Self::Boolean(boolean) => write!(f, "{boolean}"),
            Self::String(string) => write!(f, "{string}"),
            Self::NumericArray { values, .. } => {
                f.write_str("[")?;
                write_list(f, values)?;
                f.write_str("]")
            }
            Self::BooleanArray { values, .. } => {
                f.write_str("[")?;
                write_list(f, values)?;
                f.write_str("]")
            }
            Self::StringArray { values, .. } => {
                f.write_str("[")?;
                write_list(f, values)?;
                f.write_str("]")
            }
        }
    }
}

impl Display for NumericValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl Display for StringLiteral {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl Display for BooleanValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl Display for Identifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl Display for QualifiedName {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (idx, part) in self.parts.iter().enumerate() {
            if idx > 0 {
                f.write_str(".")?;
            }
            write!(f, "{part}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::parse_str;
    use rstest::rstest;

    #[rstest]
    #[case("from a,b|limit 10", "FROM a, b | LIMIT 10")]
    #[case("row x=1+2*3", "ROW x = 1 + 2 * 3")]
    #[case(
        "from a | where not x in (1,2) and y like \"a*\"",
        "FROM a | WHERE NOT x IN (1, 2) AND y LIKE \"a*\""
    )]
    #[case("from a | where x not rlike \"b.*\"", "FROM a | WHERE x NOT RLIKE \"b.*\"")]
    #[case("from a | sort x desc nulls first, y", "FROM a | SORT x DESC NULLS FIRST, y")]
    #[case("from a | stats avg(b) by c", "FROM a | STATS avg(b) BY c")]
    #[case("from a | project b", "FROM a | PROJECT b")]
    #[case("explain [from a|keep b]", "EXPLAIN [ FROM a | KEEP b ]")]
    #[case("row a = [true, false], b = null", "ROW a = [true, false], b = NULL")]
    #[case("from a | eval d = date_trunc(t, 1 hour)", "FROM a | EVAL d = date_trunc(t, 1 hour)")]
    #[case("from a | enrich p on f with n=e", "FROM a | ENRICH p ON f WITH n = e")]
    #[case(
        "from a | dissect b \"%{c}\" append_separator=\"-\"",
        "FROM a | DISSECT b \"%{c}\" append_separator = \"-\""
    )]
    fn statements_render_canonically(#[case] src: &str, #[case] expected: &str) {
        let parsed = parse_str(src);
        assert!(parsed.errors().is_empty(), "{:?}", parsed.errors());
        assert_eq!(parsed.statement().to_string(), expected);
    }
}
