//! Precedence-climbing parser for ES|QL expressions.
//!
//! The grammar's left-recursive rules become binding-power loops:
//! [`boolean`] folds `AND`/`OR` over `NOT` and value operands (adding the
//! WHERE predicates when enabled), [`operator`] folds arithmetic over unary
//! signs and function calls and handles the single optional comparison, and
//! [`primary`] parses constants, field names, parenthesised expressions and
//! calls. All of them are `impl` blocks on the shared parser so commands
//! and expressions can recurse into each other.

mod boolean;
mod operator;
mod primary;

use crate::SyntaxKind;
use crate::TokenSet;
use crate::parser::ast::BooleanExpression;
use crate::parser::core::Parser;
use crate::parser::error::SyntaxError;
use crate::parser::recovery::{Abort, PResult};

impl Parser<'_> {
    /// Parse a standalone expression that must span the whole input.
    pub(crate) fn standalone_expression(&mut self) -> PResult<BooleanExpression> {
        let expression = self.boolean_expression(0)?;
        if !self.ts.at_eof() {
            let token = self.ts.current().clone();
            self.report(SyntaxError::extraneous(
                token,
                TokenSet::single(SyntaxKind::T_EOF),
            ));
            return Err(Abort);
        }
        Ok(expression)
    }
}
