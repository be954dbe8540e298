//! Parse fixtures straight into comparable forms.

use crate::ast::{BooleanExpression, ProcessingCommand, Query, SingleStatement};
use crate::{parse_expression, parse_str};

/// Parse `src`, panicking with the diagnostics if any were reported.
///
/// # Panics
/// Panics if parsing reports an error.
#[track_caller]
#[must_use]
pub fn parse_ok(src: &str) -> SingleStatement {
    match parse_str(src).into_result() {
        Ok(statement) => statement,
        Err(errors) => panic!("failed to parse {src:?}: {errors:?}"),
    }
}

/// S-expression of a statement that must parse cleanly.
///
/// # Panics
/// Panics if parsing reports an error.
#[track_caller]
#[must_use]
pub fn query_sexpr(src: &str) -> String {
    parse_ok(src).to_sexpr()
}

/// S-expression of a standalone expression.
///
/// # Panics
/// Panics if the expression is invalid.
#[track_caller]
#[must_use]
pub fn expr_sexpr(src: &str) -> String {
    match parse_expression(src) {
        Ok(expression) => expression.to_sexpr(),
        Err(errors) => panic!("failed to parse expression {src:?}: {errors:?}"),
    }
}

/// Condition of `FROM t | WHERE <condition>`.
///
/// # Panics
/// Panics if parsing fails or the statement has no `WHERE` stage.
#[track_caller]
#[must_use]
pub fn where_condition(condition: &str) -> BooleanExpression {
    let statement = parse_ok(&format!("FROM t | WHERE {condition}"));
    match &statement.query {
        Query::Composite {
            command: ProcessingCommand::Where(filter),
            ..
        } => filter.condition.clone(),
        other => panic!("expected a WHERE stage, got {other:?}"),
    }
}

/// S-expression of a `WHERE` condition, so predicates can be checked.
///
/// # Panics
/// Panics if parsing fails.
#[track_caller]
#[must_use]
pub fn where_sexpr(condition: &str) -> String {
    where_condition(condition).to_sexpr()
}
