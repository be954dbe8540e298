//! Read-only AST traversal.
//!
//! Implement [`Visitor`] and override the `visit_*` methods of interest.
//! Call the matching `walk_*` function from an override to keep descending,
//! or leave it out to prune that subtree. Children are visited in source
//! order.
//!
//! Left-nested chains are walked as one node: a pipeline visits its source
//! and then each processing command, and a run of `AND`/`OR` or of binary
//! arithmetic visits its operands in turn. The inner links of such a chain
//! are not passed to `visit_query` or the expression methods.
//!
//! ```
//! use esql_parser::ast::{QualifiedName, Visitor, walk_statement};
//! use esql_parser::parse_str;
//!
//! #[derive(Default)]
//! struct Fields(Vec<String>);
//!
//! impl Visitor for Fields {
//!     fn visit_qualified_name(&mut self, name: &QualifiedName) {
//!         self.0.push(name.name());
//!     }
//! }
//!
//! let parsed = parse_str("FROM logs | WHERE a.b > 1 | KEEP c");
//! let mut fields = Fields::default();
//! walk_statement(&mut fields, parsed.statement());
//! assert_eq!(fields.0, ["a.b", "c"]);
//! ```

use super::{
    BooleanExpression, CommandOption, Constant, Field, FunctionArgument, Identifier,
    MathFunctionArgument, OperatorExpression, PrimaryExpression, ProcessingCommand,
    QualifiedName, Query, SingleStatement, SourceCommand, ValueExpression,
};

pub trait Visitor: Sized {
    fn visit_statement(&mut self, statement: &SingleStatement) {
        walk_statement(self, statement);
    }

    fn visit_query(&mut self, query: &Query) {
        walk_query(self, query);
    }

    fn visit_source_command(&mut self, command: &SourceCommand) {
        walk_source_command(self, command);
    }

    fn visit_processing_command(&mut self, command: &ProcessingCommand) {
        walk_processing_command(self, command);
    }

    fn visit_field(&mut self, field: &Field) {
        walk_field(self, field);
    }

    fn visit_boolean_expression(&mut self, expression: &BooleanExpression) {
        walk_boolean_expression(self, expression);
    }

    fn visit_value_expression(&mut self, expression: &ValueExpression) {
        walk_value_expression(self, expression);
    }

    fn visit_operator_expression(&mut self, expression: &OperatorExpression) {
        walk_operator_expression(self, expression);
    }

    fn visit_primary_expression(&mut self, expression: &PrimaryExpression) {
        walk_primary_expression(self, expression);
    }

    fn visit_function_argument(&mut self, argument: &FunctionArgument) {
        walk_function_argument(self, argument);
    }

    fn visit_math_function_argument(&mut self, argument: &MathFunctionArgument) {
        walk_math_function_argument(self, argument);
    }

    fn visit_qualified_name(&mut self, name: &QualifiedName) {
        walk_qualified_name(self, name);
    }

    fn visit_identifier(&mut self, _identifier: &Identifier) {}

    fn visit_constant(&mut self, _constant: &Constant) {}
}

pub fn walk_statement<V: Visitor>(visitor: &mut V, statement: &SingleStatement) {
    visitor.visit_query(&statement.query);
}

pub fn walk_query<V: Visitor>(visitor: &mut V, query: &Query) {
    visitor.visit_source_command(query.source());
    for command in query.processing_commands() {
        visitor.visit_processing_command(command);
    }
}

pub fn walk_source_command<V: Visitor>(visitor: &mut V, command: &SourceCommand) {
    match command {
        SourceCommand::Explain(explain) => visitor.visit_query(&explain.query),
        SourceCommand::From(from) => {
            for source in &from.sources {
                visitor.visit_identifier(source);
            }
        }
        SourceCommand::Row(row) => {
            for field in &row.fields {
                visitor.visit_field(field);
            }
        }
        SourceCommand::Show(_) | SourceCommand::Error(_) => {}
    }
}

pub fn walk_processing_command<V: Visitor>(visitor: &mut V, command: &ProcessingCommand) {
    match command {
        ProcessingCommand::Eval(eval) => {
            for field in &eval.fields {
                visitor.visit_field(field);
            }
        }
        ProcessingCommand::Stats(stats) => {
            for field in stats.fields.iter().flatten() {
                visitor.visit_field(field);
            }
            for name in stats.grouping.iter().flatten() {
                visitor.visit_qualified_name(name);
            }
        }
        ProcessingCommand::Keep(keep) => walk_names(visitor, &keep.fields),
        ProcessingCommand::Drop(drop) => walk_names(visitor, &drop.fields),
        ProcessingCommand::MvExpand(expand) => walk_names(visitor, &expand.fields),
        ProcessingCommand::Rename(rename) => {
            for clause in &rename.clauses {
                visitor.visit_identifier(&clause.new_name);
                visitor.visit_qualified_name(&clause.old_name);
            }
        }
        ProcessingCommand::Dissect(dissect) => {
            walk_names(visitor, &dissect.fields);
            for option in dissect.options.iter().flatten() {
                walk_command_option(visitor, option);
            }
        }
        ProcessingCommand::Grok(grok) => walk_names(visitor, &grok.fields),
        ProcessingCommand::Sort(sort) => {
            for order in &sort.orders {
                visitor.visit_boolean_expression(&order.expression);
            }
        }
        ProcessingCommand::Where(filter) => visitor.visit_boolean_expression(&filter.condition),
        ProcessingCommand::Enrich(enrich) => {
            visitor.visit_identifier(&enrich.policy);
            if let Some(field) = &enrich.match_field {
                visitor.visit_identifier(field);
            }
            for clause in enrich.with.iter().flatten() {
                if let Some(name) = &clause.new_name {
                    visitor.visit_identifier(name);
                }
                visitor.visit_identifier(&clause.enrich_field);
            }
        }
        ProcessingCommand::Limit(_) | ProcessingCommand::Error(_) => {}
    }
}

fn walk_names<V: Visitor>(visitor: &mut V, names: &[QualifiedName]) {
    for name in names {
        visitor.visit_qualified_name(name);
    }
}

fn walk_command_option<V: Visitor>(visitor: &mut V, option: &CommandOption) {
    visitor.visit_identifier(&option.name);
    visitor.visit_constant(&option.value);
}

pub fn walk_field<V: Visitor>(visitor: &mut V, field: &Field) {
    if let Some(name) = &field.name {
        visitor.visit_identifier(name);
    }
    visitor.visit_boolean_expression(&field.expression);
}

pub fn walk_boolean_expression<V: Visitor>(visitor: &mut V, expression: &BooleanExpression) {
    match expression {
        BooleanExpression::Not { operand, .. } => visitor.visit_boolean_expression(operand),
        BooleanExpression::Value(value) => visitor.visit_value_expression(value),
        BooleanExpression::And { .. } | BooleanExpression::Or { .. } => {
            let (first, rest) = expression.left_chain();
            visitor.visit_boolean_expression(first);
            for (_, right) in rest {
                visitor.visit_boolean_expression(right);
            }
        }
        BooleanExpression::In { value, list, .. } => {
            visitor.visit_value_expression(value);
            for item in list {
                visitor.visit_value_expression(item);
            }
        }
        BooleanExpression::RegexMatch { value, .. } => visitor.visit_value_expression(value),
        BooleanExpression::WhereFunction(function) => {
            visitor.visit_identifier(&function.name);
            visitor.visit_qualified_name(&function.field);
            for argument in &function.args {
                visitor.visit_function_argument(argument);
            }
        }
    }
}

pub fn walk_value_expression<V: Visitor>(visitor: &mut V, expression: &ValueExpression) {
    match expression {
        ValueExpression::Operator(operator) => visitor.visit_operator_expression(operator),
        ValueExpression::Comparison { left, right, .. } => {
            visitor.visit_operator_expression(left);
            visitor.visit_operator_expression(right);
        }
    }
}

pub fn walk_operator_expression<V: Visitor>(visitor: &mut V, expression: &OperatorExpression) {
    match expression {
        OperatorExpression::Primary(primary) => visitor.visit_primary_expression(primary),
        OperatorExpression::MathFn(call) => {
            visitor.visit_identifier(&call.name);
            for argument in &call.args {
                visitor.visit_function_argument(argument);
            }
        }
        OperatorExpression::MathEvalFn(call) => {
            visitor.visit_identifier(&call.name);
            for argument in &call.args {
                visitor.visit_math_function_argument(argument);
            }
        }
        OperatorExpression::Unary { operand, .. } => visitor.visit_operator_expression(operand),
        OperatorExpression::Binary { .. } => {
            let (first, rest) = expression.left_chain();
            visitor.visit_operator_expression(first);
            for (_, right) in rest {
                visitor.visit_operator_expression(right);
            }
        }
    }
}

pub fn walk_primary_expression<V: Visitor>(visitor: &mut V, expression: &PrimaryExpression) {
    match expression {
        PrimaryExpression::Constant(constant) => visitor.visit_constant(constant),
        PrimaryExpression::QualifiedName(name) => visitor.visit_qualified_name(name),
        PrimaryExpression::Paren { expression, .. } => visitor.visit_boolean_expression(expression),
        PrimaryExpression::FunctionCall(call) => {
            visitor.visit_identifier(&call.name);
            for argument in &call.args {
                visitor.visit_boolean_expression(argument);
            }
        }
    }
}

pub fn walk_function_argument<V: Visitor>(visitor: &mut V, argument: &FunctionArgument) {
    if let FunctionArgument::QualifiedName(name) = argument {
        visitor.visit_qualified_name(name);
    }
}

pub fn walk_math_function_argument<V: Visitor>(visitor: &mut V, argument: &MathFunctionArgument) {
    if let MathFunctionArgument::Value(value) = argument {
        visitor.visit_value_expression(value);
    }
}

pub fn walk_qualified_name<V: Visitor>(visitor: &mut V, name: &QualifiedName) {
    for part in &name.parts {
        visitor.visit_identifier(part);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_str;
    use rstest::rstest;

    #[derive(Default)]
    struct Identifiers(Vec<String>);

    impl Visitor for Identifiers {
        fn visit_identifier(&mut self, identifier: &Identifier) {
            self.0.push(identifier.name());
        }
    }

    #[derive(Default)]
    struct Constants(usize);

    impl Visitor for Constants {
        fn visit_constant(&mut self, _constant: &Constant) {
            self.0 += 1;
        }
    }

    #[rstest]
    #[case("FROM idx | EVAL x = a + b", &["idx", "x", "a", "b"])]
    #[case("FROM idx | RENAME n = o.p", &["idx", "n", "o", "p"])]
    #[case("FROM idx | STATS c = count(f) BY g", &["idx", "c", "count", "f", "g"])]
    #[case("EXPLAIN [ FROM inner | KEEP k ]", &["inner", "k"])]
    #[case("FROM idx | ENRICH pol ON m WITH n = e", &["idx", "pol", "m", "n", "e"])]
    fn identifiers_in_source_order(#[case] src: &str, #[case] expected: &[&str]) {
        let parsed = parse_str(src);
        assert!(parsed.errors().is_empty(), "{:?}", parsed.errors());
        let mut visitor = Identifiers::default();
        visitor.visit_statement(parsed.statement());
        assert_eq!(visitor.0, expected);
    }

    #[rstest]
    fn constants_are_counted() {
        let parsed = parse_str("ROW a = 1, b = [1, 2], c = null | WHERE d IN (3, 4)");
        let mut visitor = Constants::default();
        visitor.visit_statement(parsed.statement());
        assert_eq!(visitor.0, 5);
    }

    #[rstest]
    fn long_chains_are_walked_in_order() {
        let terms = 20_000;
        let src = format!(
            "ROW x = 1{} | WHERE a{}{}",
            " - 2".repeat(terms),
            " OR b".repeat(terms),
            " | KEEP c".repeat(terms)
        );
        let parsed = parse_str(&src);
        assert!(parsed.errors().is_empty(), "{:?}", parsed.errors());

        let mut constants = Constants::default();
        constants.visit_statement(parsed.statement());
        assert_eq!(constants.0, terms + 1);

        let mut identifiers = Identifiers::default();
        identifiers.visit_statement(parsed.statement());
        assert_eq!(identifiers.0.len(), 2 + 2 * terms);
        assert_eq!(identifiers.0.get(..3), Some(&["x", "a", "b"].map(String::from)[..]));
        assert_eq!(identifiers.0.last().map(String::as_str), Some("c"));
    }
}
