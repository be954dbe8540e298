//! Command nodes: one struct per pipeline stage.

use super::{
    BooleanExpression, Constant, Identifier, NumericValue, QualifiedName, Query, Spanned,
    StringLiteral, TokenSpan,
};
use crate::Token;

/// Commands that can start a query.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SourceCommand {
    Explain(ExplainCommand),
    From(FromCommand),
    Row(RowCommand),
    Show(ShowCommand),
    /// Tokens skipped after a command could not be parsed.
    Error(TokenSpan),
}

/// Commands that can follow a pipe.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ProcessingCommand {
    Eval(EvalCommand),
    Limit(LimitCommand),
    Keep(KeepCommand),
    Rename(RenameCommand),
    Drop(DropCommand),
    Dissect(DissectCommand),
    Grok(GrokCommand),
    Sort(SortCommand),
    Stats(StatsCommand),
    Where(WhereCommand),
    MvExpand(MvExpandCommand),
    Enrich(EnrichCommand),
    /// Tokens skipped after a command could not be parsed.
    Error(TokenSpan),
}

/// `EXPLAIN [ query ]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExplainCommand {
    pub keyword: Token,
    pub query: Box<Query>,
    pub span: TokenSpan,
}

/// `FROM index (, index)*`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FromCommand {
    pub keyword: Token,
    pub sources: Vec<Identifier>,
    pub span: TokenSpan,
}

impl FromCommand {
    /// Source names joined with commas, e.g. `logs-*,metrics`.
    #[must_use]
    pub fn index_pattern(&self) -> String {
        self.sources
            .iter()
            .map(Identifier::name)
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// `ROW field (, field)*`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RowCommand {
    pub keyword: Token,
    pub fields: Vec<Field>,
    pub span: TokenSpan,
}

/// What `SHOW` lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShowTarget {
    Info,
    Functions,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShowCommand {
    pub keyword: Token,
    pub target: ShowTarget,
    pub span: TokenSpan,
}

/// An expression, optionally bound to a name: `x = a + 1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Field {
    pub name: Option<Identifier>,
    pub expression: BooleanExpression,
    pub span: TokenSpan,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EvalCommand {
    pub keyword: Token,
    pub fields: Vec<Field>,
    pub span: TokenSpan,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LimitCommand {
    pub keyword: Token,
    pub count: NumericValue,
    pub span: TokenSpan,
}

/// `KEEP` or its older spelling `PROJECT`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeepCommand {
    /// The keyword as written, `KEEP` or `PROJECT`.
    pub keyword: Token,
    pub fields: Vec<QualifiedName>,
    pub span: TokenSpan,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DropCommand {
    pub keyword: Token,
    pub fields: Vec<QualifiedName>,
    pub span: TokenSpan,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RenameCommand {
    pub keyword: Token,
    pub clauses: Vec<RenameClause>,
    pub span: TokenSpan,
}

/// `new_name = old.name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RenameClause {
    pub new_name: Identifier,
    pub old_name: QualifiedName,
    pub span: TokenSpan,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DissectCommand {
    pub keyword: Token,
    pub fields: Vec<QualifiedName>,
    pub pattern: StringLiteral,
    pub options: Option<Vec<CommandOption>>,
    pub span: TokenSpan,
}

/// `name = constant`, e.g. `append_separator = "-"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CommandOption {
    pub name: Identifier,
    pub value: Constant,
    pub span: TokenSpan,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GrokCommand {
    pub keyword: Token,
    pub fields: Vec<QualifiedName>,
    pub pattern: StringLiteral,
    pub span: TokenSpan,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SortCommand {
    pub keyword: Token,
    pub orders: Vec<OrderExpression>,
    pub span: TokenSpan,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ordering {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NullsOrdering {
    First,
    Last,
}

impl NullsOrdering {
    /// Classify the text of a `NULLS_ORDERING_DIRECTION` token.
    ///
    /// Placeholder text left by error recovery yields `None`.
    #[must_use]
    pub fn from_text(text: &str) -> Option<Self> {
        if text.eq_ignore_ascii_case("first") {
            Some(Self::First)
        } else if text.eq_ignore_ascii_case("last") {
            Some(Self::Last)
        } else {
            None
        }
    }
}

/// `expression (ASC | DESC)? (NULLS (FIRST | LAST))?`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OrderExpression {
    pub expression: BooleanExpression,
    pub ordering: Option<Ordering>,
    pub nulls: Option<NullsOrdering>,
    pub span: TokenSpan,
}

/// `STATS fields? (BY names)?`. Both parts are optional.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StatsCommand {
    pub keyword: Token,
    pub fields: Option<Vec<Field>>,
    pub grouping: Option<Vec<QualifiedName>>,
    pub span: TokenSpan,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WhereCommand {
    pub keyword: Token,
    pub condition: BooleanExpression,
    pub span: TokenSpan,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MvExpandCommand {
    pub keyword: Token,
    pub fields: Vec<QualifiedName>,
    pub span: TokenSpan,
}

/// `ENRICH policy (ON field)? (WITH clause (, clause)*)?`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnrichCommand {
    pub keyword: Token,
    pub policy: Identifier,
    pub match_field: Option<Identifier>,
    pub with: Option<Vec<EnrichWithClause>>,
    pub span: TokenSpan,
}

/// `(new_name =)? enrich_field`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnrichWithClause {
    pub new_name: Option<Identifier>,
    pub enrich_field: Identifier,
    pub span: TokenSpan,
}

impl Spanned for SourceCommand {
    fn span(&self) -> TokenSpan {
        match self {
            Self::Explain(c) => c.span,
            Self::From(c) => c.span,
            Self::Row(c) => c.span,
            Self::Show(c) => c.span,
            Self::Error(span) => *span,
        }
    }
}

impl Spanned for ProcessingCommand {
    fn span(&self) -> TokenSpan {
        match self {
            Self::Eval(c) => c.span,
            Self::Limit(c) => c.span,
            Self::Keep(c) => c.span,
            Self::Rename(c) => c.span,
            Self::Drop(c) => c.span,
            Self::Dissect(c) => c.span,
            Self::Grok(c) => c.span,
            Self::Sort(c) => c.span,
            Self::Stats(c) => c.span,
            Self::Where(c) => c.span,
            Self::MvExpand(c) => c.span,
            Self::Enrich(c) => c.span,
            Self::Error(span) => *span,
        }
    }
}

impl Spanned for Field {
    fn span(&self) -> TokenSpan {
        self.span
    }
}

impl Spanned for OrderExpression {
    fn span(&self) -> TokenSpan {
        self.span
    }
}
