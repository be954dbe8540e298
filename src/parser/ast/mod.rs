//! Typed AST for ES|QL statements.
//!
//! Nodes own their children and are never mutated after the parser builds
//! them. Every node can report the [`TokenSpan`] it covers, expressed as
//! indices into the token slice handed to the parser (trivia included), so
//! diagnostics and source extraction work without re-lexing.
//!
//! Nodes implement [`std::fmt::Display`] by re-serialising themselves as
//! ES|QL text, and expose `to_sexpr` for compact structural assertions.

mod command;
mod display;
mod expr;
mod literal;
mod names;
mod precedence;
mod query;
mod sexpr;
mod visit;

pub use command::{
    CommandOption, DissectCommand, DropCommand, EnrichCommand, EnrichWithClause, EvalCommand,
    ExplainCommand, Field, FromCommand, GrokCommand, KeepCommand, LimitCommand, MvExpandCommand,
    NullsOrdering, OrderExpression, Ordering, ProcessingCommand, RenameClause, RenameCommand,
    RowCommand, ShowCommand, ShowTarget, SortCommand, SourceCommand, StatsCommand, WhereCommand,
};
pub use expr::{
    ArithmeticOp, BooleanExpression, BooleanOp, ComparisonOp, FunctionArgument, FunctionCall,
    MathFunctionArgument, OperatorExpression, PrimaryExpression, RegexKind, Sign, TimeSpan,
    ValueExpression, WhereFunction,
};
pub use literal::{BooleanValue, Constant, NumericKind, NumericValue, StringLiteral};
pub use names::{Identifier, QualifiedName};
pub(crate) use precedence::{
    BOOLEAN_NOT_BP, UNARY_SIGN_BP, arithmetic_binding_power, boolean_binding_power,
};
pub use query::{Query, SingleStatement};
pub use visit::{
    Visitor, walk_boolean_expression, walk_field, walk_function_argument,
    walk_math_function_argument, walk_operator_expression, walk_primary_expression,
    walk_processing_command, walk_qualified_name, walk_query, walk_source_command,
    walk_statement, walk_value_expression,
};

/// Half-open range of token indices covered by a node.
///
/// Indices refer to the token slice passed to the parser and count hidden
/// tokens, so `tokens[span.start..span.end]` is exactly the node's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TokenSpan {
    pub start: usize,
    pub end: usize,
}

impl TokenSpan {
    #[must_use]
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Span covering both `self` and `other`.
    #[must_use]
    pub fn cover(self, other: Self) -> Self {
        Self::new(self.start.min(other.start), self.end.max(other.end))
    }

    /// Index of the first token.
    #[must_use]
    pub fn start(self) -> usize {
        self.start
    }

    /// Index of the last token, inclusive. Empty spans report their start.
    #[must_use]
    pub fn stop(self) -> usize {
        self.end.saturating_sub(1).max(self.start)
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.start >= self.end
    }

    /// Number of tokens covered, trivia included.
    #[must_use]
    pub fn len(self) -> usize {
        self.end.saturating_sub(self.start)
    }
}

/// Nodes that know which tokens they cover.
pub trait Spanned {
    fn span(&self) -> TokenSpan;
}
