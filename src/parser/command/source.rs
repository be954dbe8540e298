//! Source commands: `EXPLAIN`, `FROM`, `ROW` and `SHOW`.

use crate::SyntaxKind;
use crate::TokenSet;
use crate::parser::ast::{ExplainCommand, FromCommand, Query, RowCommand, ShowCommand, ShowTarget};
use crate::parser::core::Parser;
use crate::parser::recovery::PResult;

const SHOW_TARGETS: TokenSet = TokenSet::new(&[SyntaxKind::K_INFO, SyntaxKind::K_FUNCTIONS]);

impl Parser<'_> {
    pub(super) fn explain_command(&mut self) -> PResult<ExplainCommand> {
        let start = self.ts.index();
        let keyword = self.bump();
        let query = self.subquery()?;
        Ok(ExplainCommand {
            keyword,
            query: Box::new(query),
            span: self.span_from(start),
        })
    }

    /// `[ query ]`.
    fn subquery(&mut self) -> PResult<Query> {
        let start = self.ts.index();
        self.expect(SyntaxKind::T_OPENING_BRACKET)?;
        let query = self.nested(|p| {
            p.subquery_depth += 1;
            let query = p.query();
            p.subquery_depth -= 1;
            Ok(query)
        })?;
        self.expect(SyntaxKind::T_CLOSING_BRACKET)?;
        self.record(SyntaxKind::N_SUBQUERY, self.span_from(start));
        Ok(query)
    }

    pub(super) fn from_command(&mut self) -> PResult<FromCommand> {
        let start = self.ts.index();
        let keyword = self.bump();
        let sources = self.comma_separated(Self::source_identifier)?;
        Ok(FromCommand {
            keyword,
            sources,
            span: self.span_from(start),
        })
    }

    pub(super) fn row_command(&mut self) -> PResult<RowCommand> {
        let start = self.ts.index();
        let keyword = self.bump();
        let fields = self.fields()?;
        Ok(RowCommand {
            keyword,
            fields,
            span: self.span_from(start),
        })
    }

    /// `SHOW INFO` or `SHOW FUNCTIONS`.
    pub(super) fn show_command(&mut self) -> PResult<ShowCommand> {
        let start = self.ts.index();
        let target = match self.ts.lookahead(1).kind {
            SyntaxKind::K_INFO => ShowTarget::Info,
            SyntaxKind::K_FUNCTIONS => ShowTarget::Functions,
            _ => {
                self.ts.advance();
                return Err(self.no_viable_alternative(start, SHOW_TARGETS));
            }
        };
        let keyword = self.bump();
        self.bump();
        Ok(ShowCommand {
            keyword,
            target,
            span: self.span_from(start),
        })
    }
}
