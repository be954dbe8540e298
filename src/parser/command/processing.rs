//! Commands that follow a pipe.

use std::mem;

use crate::SyntaxKind;
use crate::parser::ast::{
    DissectCommand, DropCommand, EnrichCommand, EvalCommand, GrokCommand, KeepCommand,
    LimitCommand, MvExpandCommand, NullsOrdering, OrderExpression, Ordering, RenameCommand,
    SortCommand, StatsCommand, WhereCommand,
};
use crate::parser::core::{BOOLEAN_START, IDENTIFIER, Parser};
use crate::parser::recovery::PResult;

impl Parser<'_> {
    pub(super) fn eval_command(&mut self) -> PResult<EvalCommand> {
        let start = self.ts.index();
        let keyword = self.bump();
        let fields = self.fields()?;
        Ok(EvalCommand {
            keyword,
            fields,
            span: self.span_from(start),
        })
    }

    pub(super) fn limit_command(&mut self) -> PResult<LimitCommand> {
        let start = self.ts.index();
        let keyword = self.bump();
        let count = self.integer_value()?;
        Ok(LimitCommand {
            keyword,
            count,
            span: self.span_from(start),
        })
    }

    /// `KEEP` and `PROJECT` share one rule.
    pub(super) fn keep_command(&mut self) -> PResult<KeepCommand> {
        let start = self.ts.index();
        let keyword = self.bump();
        let fields = self.qualified_names()?;
        Ok(KeepCommand {
            keyword,
            fields,
            span: self.span_from(start),
        })
    }

    pub(super) fn rename_command(&mut self) -> PResult<RenameCommand> {
        let start = self.ts.index();
        let keyword = self.bump();
        let clauses = self.comma_separated(Self::rename_clause)?;
        Ok(RenameCommand {
            keyword,
            clauses,
            span: self.span_from(start),
        })
    }

    pub(super) fn drop_command(&mut self) -> PResult<DropCommand> {
        let start = self.ts.index();
        let keyword = self.bump();
        let fields = self.qualified_names()?;
        Ok(DropCommand {
            keyword,
            fields,
            span: self.span_from(start),
        })
    }

    /// `DISSECT fields "pattern" (option (, option)*)?`.
    pub(super) fn dissect_command(&mut self) -> PResult<DissectCommand> {
        let start = self.ts.index();
        let keyword = self.bump();
        let fields = self.qualified_names()?;
        let pattern = self.string_literal()?;
        let options = if self.at_set(IDENTIFIER) {
            Some(self.comma_separated(Self::command_option)?)
        } else {
            None
        };
        Ok(DissectCommand {
            keyword,
            fields,
            pattern,
            options,
            span: self.span_from(start),
        })
    }

    pub(super) fn grok_command(&mut self) -> PResult<GrokCommand> {
        let start = self.ts.index();
        let keyword = self.bump();
        let fields = self.qualified_names()?;
        let pattern = self.string_literal()?;
        Ok(GrokCommand {
            keyword,
            fields,
            pattern,
            span: self.span_from(start),
        })
    }

    pub(super) fn sort_command(&mut self) -> PResult<SortCommand> {
        let start = self.ts.index();
        let keyword = self.bump();
        let orders = self.comma_separated(Self::order_expression)?;
        Ok(SortCommand {
            keyword,
            orders,
            span: self.span_from(start),
        })
    }

    /// `booleanExpression (ASC | DESC)? (NULLS (FIRST | LAST))?`.
    fn order_expression(&mut self) -> PResult<OrderExpression> {
        let start = self.ts.index();
        let expression = self.boolean_expression(0)?;
        let ordering = self.eat(SyntaxKind::T_ORDERING).map(|token| {
            if token.text.eq_ignore_ascii_case("desc") {
                Ordering::Desc
            } else {
                Ordering::Asc
            }
        });
        let nulls = if self.eat(SyntaxKind::K_NULLS).is_some() {
            let direction = self.expect(SyntaxKind::T_NULLS_ORDERING_DIRECTION)?;
            NullsOrdering::from_text(&direction.text)
        } else {
            None
        };
        Ok(OrderExpression {
            expression,
            ordering,
            nulls,
            span: self.span_from(start),
        })
    }

    /// `STATS fields? (BY qualifiedNames)?`.
    pub(super) fn stats_command(&mut self) -> PResult<StatsCommand> {
        let start = self.ts.index();
        let keyword = self.bump();
        let fields = if self.at_set(BOOLEAN_START) {
            Some(self.fields()?)
        } else {
            None
        };
        let grouping = if self.eat(SyntaxKind::K_BY).is_some() {
            Some(self.qualified_names()?)
        } else {
            None
        };
        Ok(StatsCommand {
            keyword,
            fields,
            grouping,
            span: self.span_from(start),
        })
    }

    /// `WHERE booleanExpression`, with the WHERE-only predicates enabled.
    pub(super) fn where_command(&mut self) -> PResult<WhereCommand> {
        let start = self.ts.index();
        let keyword = self.bump();
        let outer = mem::replace(&mut self.where_predicates, true);
        let condition = self.boolean_expression(0);
        self.where_predicates = outer;
        Ok(WhereCommand {
            keyword,
            condition: condition?,
            span: self.span_from(start),
        })
    }

    pub(super) fn mv_expand_command(&mut self) -> PResult<MvExpandCommand> {
        let start = self.ts.index();
        let keyword = self.bump();
        let fields = self.qualified_names()?;
        Ok(MvExpandCommand {
            keyword,
            fields,
            span: self.span_from(start),
        })
    }

    /// `ENRICH policy (ON field)? (WITH clause (, clause)*)?`.
    pub(super) fn enrich_command(&mut self) -> PResult<EnrichCommand> {
        let start = self.ts.index();
        let keyword = self.bump();
        let policy = self.enrich_identifier()?;
        let match_field = if self.eat(SyntaxKind::K_ON).is_some() {
            Some(self.enrich_identifier()?)
        } else {
            None
        };
        let with = if self.eat(SyntaxKind::K_WITH).is_some() {
            Some(self.comma_separated(Self::enrich_with_clause)?)
        } else {
            None
        };
        Ok(EnrichCommand {
            keyword,
            policy,
            match_field,
            with,
            span: self.span_from(start),
        })
    }
}
