//! Statement, query and command rules.
//!
//! A query is a source command followed by any number of `| command`
//! stages. Each stage is parsed independently: when a command cannot be
//! repaired locally its tokens up to the next pipe are wrapped in an error
//! node and parsing resumes with the following stage.

mod names;
mod processing;
mod source;

use log::trace;

use crate::SyntaxKind;
use crate::parser::ast::{
    ProcessingCommand, Query, SingleStatement, SourceCommand, Spanned, TokenSpan,
};
use crate::parser::core::{PROCESSING_COMMANDS, Parser, SOURCE_COMMANDS};
use crate::parser::recovery::PResult;

impl Parser<'_> {
    /// `query EOF`.
    pub(crate) fn single_statement(&mut self) -> SingleStatement {
        let query = self.query();
        let eof = self.ts.current().clone();
        let end = (self.ts.index() + 1).min(self.ts.tokens().len());
        SingleStatement {
            query,
            eof,
            span: TokenSpan::new(0, end),
        }
    }

    /// `sourceCommand (| processingCommand)*`.
    ///
    /// Stops at end of input, or at `]` inside an `EXPLAIN` subquery.
    pub(crate) fn query(&mut self) -> Query {
        let mut query = Query::SingleCommand(self.source_command_stage());
        loop {
            if self.at(SyntaxKind::T_PIPE) {
                let pipe = self.bump();
                let command = self.processing_command_stage();
                query = Query::Composite {
                    query: Box::new(query),
                    pipe,
                    command,
                };
            } else if self.at_boundary() {
                break;
            } else {
                self.skip_extraneous();
            }
        }
        query
    }

    fn source_command_stage(&mut self) -> SourceCommand {
        let start = self.ts.index();
        match self.source_command() {
            Ok(command) => {
                self.record(SyntaxKind::N_SOURCE_COMMAND, command.span());
                command
            }
            Err(_) => SourceCommand::Error(self.resync(start)),
        }
    }

    fn processing_command_stage(&mut self) -> ProcessingCommand {
        let start = self.ts.index();
        match self.processing_command() {
            Ok(command) => {
                self.record(SyntaxKind::N_PROCESSING_COMMAND, command.span());
                command
            }
            Err(_) => ProcessingCommand::Error(self.resync(start)),
        }
    }

    fn source_command(&mut self) -> PResult<SourceCommand> {
        let start = self.ts.index();
        trace!("source command at '{}'", self.ts.current().display_text());
        match self.ts.kind() {
            SyntaxKind::K_EXPLAIN => self.explain_command().map(SourceCommand::Explain),
            SyntaxKind::K_FROM => self.from_command().map(SourceCommand::From),
            SyntaxKind::K_ROW => self.row_command().map(SourceCommand::Row),
            SyntaxKind::K_SHOW => self.show_command().map(SourceCommand::Show),
            _ => Err(self.no_viable_alternative(start, SOURCE_COMMANDS)),
        }
    }

    fn processing_command(&mut self) -> PResult<ProcessingCommand> {
        let start = self.ts.index();
        trace!("processing command at '{}'", self.ts.current().display_text());
        match self.ts.kind() {
            SyntaxKind::K_EVAL => self.eval_command().map(ProcessingCommand::Eval),
            SyntaxKind::K_LIMIT => self.limit_command().map(ProcessingCommand::Limit),
            SyntaxKind::K_KEEP | SyntaxKind::K_PROJECT => {
                self.keep_command().map(ProcessingCommand::Keep)
            }
            SyntaxKind::K_RENAME => self.rename_command().map(ProcessingCommand::Rename),
            SyntaxKind::K_DROP => self.drop_command().map(ProcessingCommand::Drop),
            SyntaxKind::K_DISSECT => self.dissect_command().map(ProcessingCommand::Dissect),
            SyntaxKind::K_GROK => self.grok_command().map(ProcessingCommand::Grok),
            SyntaxKind::K_SORT => self.sort_command().map(ProcessingCommand::Sort),
            SyntaxKind::K_STATS => self.stats_command().map(ProcessingCommand::Stats),
            SyntaxKind::K_WHERE => self.where_command().map(ProcessingCommand::Where),
            SyntaxKind::K_MV_EXPAND => self.mv_expand_command().map(ProcessingCommand::MvExpand),
            SyntaxKind::K_ENRICH => self.enrich_command().map(ProcessingCommand::Enrich),
            _ => Err(self.no_viable_alternative(start, PROCESSING_COMMANDS)),
        }
    }
}
