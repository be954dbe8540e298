//! Statement and query nodes.

use std::mem;

use super::{ProcessingCommand, SourceCommand, Spanned, TokenSpan};
use crate::Token;

/// A complete statement: one query followed by end of input.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SingleStatement {
    pub query: Query,
    pub eof: Token,
    pub span: TokenSpan,
}

impl SingleStatement {
    /// Index pattern of the leading `FROM`, looking through `EXPLAIN`.
    ///
    /// ```
    /// use esql_parser::parse_str;
    ///
    /// let parsed = parse_str("FROM logs-*, metrics | LIMIT 10");
    /// assert_eq!(parsed.statement().index_pattern().as_deref(), Some("logs-*,metrics"));
    /// ```
    #[must_use]
    pub fn index_pattern(&self) -> Option<String> {
        self.query.index_pattern()
    }
}

/// A pipeline. Pipes nest to the left: `a | b | c` is
/// `Composite(Composite(a, b), c)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Query {
    SingleCommand(SourceCommand),
    Composite {
        query: Box<Query>,
        pipe: Token,
        command: ProcessingCommand,
    },
}

impl Query {
    /// The command that starts the pipeline.
    #[must_use]
    pub fn source(&self) -> &SourceCommand {
        let mut query = self;
        loop {
            match query {
                Self::SingleCommand(source) => return source,
                Self::Composite { query: inner, .. } => query = inner,
            }
        }
    }

    /// Processing commands in pipeline order.
    #[must_use]
    pub fn processing_commands(&self) -> Vec<&ProcessingCommand> {
        let mut commands = Vec::new();
        let mut query = self;
        while let Self::Composite {
            query: inner,
            command,
            ..
        } = query
        {
            commands.push(command);
            query = inner;
        }
        commands.reverse();
        commands
    }

    /// Index pattern of the leading `FROM`, looking through `EXPLAIN`.
    #[must_use]
    pub fn index_pattern(&self) -> Option<String> {
        match self.source() {
            SourceCommand::From(from) => Some(from.index_pattern()),
            SourceCommand::Explain(explain) => explain.query.index_pattern(),
            SourceCommand::Row(_) | SourceCommand::Show(_) | SourceCommand::Error(_) => None,
        }
    }
}

impl Spanned for Query {
    fn span(&self) -> TokenSpan {
        match self {
            Self::SingleCommand(source) => source.span(),
            Self::Composite { command, .. } => self.source().span().cover(command.span()),
        }
    }
}

impl Drop for Query {
    fn drop(&mut self) {
        let mut next = take_inner(self);
        while let Some(mut query) = next {
            next = take_inner(&mut query);
        }
    }
}

/// Detach the inner query of a pipe, leaving a placeholder behind.
fn take_inner(query: &mut Query) -> Option<Query> {
    match query {
        Query::Composite { query: inner, .. } => Some(mem::replace(
            inner.as_mut(),
            Query::SingleCommand(SourceCommand::Error(TokenSpan::default())),
        )),
        Query::SingleCommand(_) => None,
    }
}

impl Spanned for SingleStatement {
    fn span(&self) -> TokenSpan {
        self.span
    }
}
