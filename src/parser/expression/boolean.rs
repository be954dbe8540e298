//! Boolean expressions and the WHERE-only predicates.

use crate::SyntaxKind;
use crate::parser::ast::{
    BOOLEAN_NOT_BP, BooleanExpression, Identifier, RegexKind, ValueExpression, WhereFunction,
    boolean_binding_power,
};
use crate::parser::core::{BOOLEAN_START, OPERATOR_START, Parser, WHERE_START};
use crate::parser::recovery::PResult;

impl Parser<'_> {
    /// Parse a boolean expression whose infix operators bind at least as
    /// tightly as `min_bp`.
    pub(crate) fn boolean_expression(&mut self, min_bp: u8) -> PResult<BooleanExpression> {
        self.nested(|p| {
            let lhs = p.boolean_operand()?;
            p.boolean_infix(lhs, min_bp)
        })
    }

    fn boolean_operand(&mut self) -> PResult<BooleanExpression> {
        let start = self.ts.index();
        match self.ts.kind() {
            SyntaxKind::K_NOT => {
                let operator = self.bump();
                let operand = self.boolean_expression(BOOLEAN_NOT_BP)?;
                Ok(BooleanExpression::Not {
                    operator,
                    operand: Box::new(operand),
                    span: self.span_from(start),
                })
            }
            SyntaxKind::T_WHERE_FUNCTIONS if self.where_predicates => {
                self.where_function().map(BooleanExpression::WhereFunction)
            }
            kind if !OPERATOR_START.contains(kind) => {
                let expected = if self.where_predicates {
                    WHERE_START
                } else {
                    BOOLEAN_START
                };
                Err(self.no_viable_alternative(start, expected))
            }
            _ => {
                let value = self.value_expression()?;
                if self.where_predicates {
                    self.where_predicate(value, start)
                } else {
                    Ok(BooleanExpression::Value(value))
                }
            }
        }
    }

    fn boolean_infix(
        &mut self,
        mut lhs: BooleanExpression,
        min_bp: u8,
    ) -> PResult<BooleanExpression> {
        while let Some((l_bp, r_bp, op)) = boolean_binding_power(self.ts.kind()) {
            if l_bp < min_bp {
                break;
            }
            let operator = self.bump();
            let rhs = self.boolean_expression(r_bp)?;
            lhs = BooleanExpression::binary(op, lhs, operator, rhs);
        }
        Ok(lhs)
    }

    /// Extend a value operand with `NOT? IN (...)` or `NOT? (R)LIKE "..."`.
    ///
    /// A `NOT` that is not followed by one of the predicate keywords is put
    /// back, leaving the operand untouched.
    fn where_predicate(
        &mut self,
        value: ValueExpression,
        start: usize,
    ) -> PResult<BooleanExpression> {
        let mark = self.ts.mark();
        let not = self.at(SyntaxKind::K_NOT).then(|| self.ts.advance());
        match self.ts.kind() {
            SyntaxKind::K_IN => {
                self.bump();
                self.expect(SyntaxKind::T_LP)?;
                let list = self.comma_separated(Self::value_expression)?;
                self.expect(SyntaxKind::T_RP)?;
                Ok(BooleanExpression::In {
                    value,
                    not,
                    list,
                    span: self.span_from(start),
                })
            }
            SyntaxKind::K_LIKE | SyntaxKind::K_RLIKE => {
                let kind = if self.bump().kind == SyntaxKind::K_LIKE {
                    RegexKind::Like
                } else {
                    RegexKind::Rlike
                };
                let pattern = self.string_literal()?;
                Ok(BooleanExpression::RegexMatch {
                    value,
                    not,
                    kind,
                    pattern,
                    span: self.span_from(start),
                })
            }
            _ => {
                self.ts.reset(mark);
                Ok(BooleanExpression::Value(value))
            }
        }
    }

    /// `WHERE_FUNCTIONS ( qualifiedName (, argument)* )`.
    fn where_function(&mut self) -> PResult<WhereFunction> {
        let start = self.ts.index();
        let token = self.bump();
        let name = Identifier::from_token(&token, self.span_from(start));
        self.expect(SyntaxKind::T_LP)?;
        let field = self.qualified_name()?;
        let mut args = Vec::new();
        while self.eat(SyntaxKind::T_COMMA).is_some() {
            args.push(self.function_argument()?);
        }
        self.expect(SyntaxKind::T_RP)?;
        Ok(WhereFunction {
            name,
            field,
            args,
            span: self.span_from(start),
        })
    }
}
