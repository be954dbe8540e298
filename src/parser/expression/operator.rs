//! Arithmetic and comparison expressions.

use crate::parser::ast::{
    ComparisonOp, OperatorExpression, Sign, UNARY_SIGN_BP, ValueExpression,
    arithmetic_binding_power,
};
use crate::parser::core::{OPERATOR_START, PRIMARY_START, Parser};
use crate::parser::error::SyntaxError;
use crate::parser::recovery::{Abort, PResult};
use crate::{SyntaxKind, TokenSet};

impl Parser<'_> {
    /// `operatorExpression (COMPARISON_OPERATOR operatorExpression)?`.
    ///
    /// Comparisons do not chain: `a < b < c` stops after `a < b`.
    pub(crate) fn value_expression(&mut self) -> PResult<ValueExpression> {
        let left = self.operator_expression(0)?;
        if !self.at(SyntaxKind::T_COMPARISON_OPERATOR) {
            return Ok(ValueExpression::Operator(left));
        }
        let operator = self.bump();
        let Some(op) = ComparisonOp::from_text(&operator.text) else {
            self.report(SyntaxError::mismatched(
                operator,
                TokenSet::single(SyntaxKind::T_COMPARISON_OPERATOR),
            ));
            return Err(Abort);
        };
        let right = self.operator_expression(0)?;
        Ok(ValueExpression::Comparison {
            left,
            op,
            operator,
            right,
        })
    }

    /// Parse arithmetic whose infix operators bind at least as tightly as
    /// `min_bp`.
    pub(crate) fn operator_expression(&mut self, min_bp: u8) -> PResult<OperatorExpression> {
        self.nested(|p| {
            let lhs = p.operator_operand()?;
            p.operator_infix(lhs, min_bp)
        })
    }

    fn operator_operand(&mut self) -> PResult<OperatorExpression> {
        let start = self.ts.index();
        match self.ts.kind() {
            SyntaxKind::T_PLUS | SyntaxKind::T_MINUS => {
                let operator = self.bump();
                let sign = if operator.kind == SyntaxKind::T_PLUS {
                    Sign::Plus
                } else {
                    Sign::Minus
                };
                let operand = self.operator_expression(UNARY_SIGN_BP)?;
                Ok(OperatorExpression::Unary {
                    sign,
                    operator,
                    operand: Box::new(operand),
                    span: self.span_from(start),
                })
            }
            SyntaxKind::T_UNARY_FUNCTION => self.math_fn().map(OperatorExpression::MathFn),
            SyntaxKind::T_MATH_FUNCTION => {
                self.math_eval_fn().map(OperatorExpression::MathEvalFn)
            }
            kind if PRIMARY_START.contains(kind) => {
                self.primary_expression().map(OperatorExpression::Primary)
            }
            _ => Err(self.no_viable_alternative(start, OPERATOR_START)),
        }
    }

    fn operator_infix(
        &mut self,
        mut lhs: OperatorExpression,
        min_bp: u8,
    ) -> PResult<OperatorExpression> {
        while let Some((l_bp, r_bp, op)) = arithmetic_binding_power(self.ts.kind()) {
            if l_bp < min_bp {
                break;
            }
            let operator = self.bump();
            let rhs = self.operator_expression(r_bp)?;
            lhs = OperatorExpression::Binary {
                op,
                operator,
                left: Box::new(lhs),
                right: Box::new(rhs),
            };
        }
        Ok(lhs)
    }
}
