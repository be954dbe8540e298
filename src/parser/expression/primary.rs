//! Leaf expressions, constants and function calls.

use crate::SyntaxKind;
use crate::TokenSet;
use crate::parser::ast::{
    BooleanExpression, BooleanValue, Constant, FunctionArgument, FunctionCall, Identifier,
    MathFunctionArgument, NumericKind, NumericValue, PrimaryExpression, StringLiteral, TimeSpan,
};
use crate::parser::core::{CONSTANT_START, IDENTIFIER, NUMBER, PRIMARY_START, Parser};
use crate::parser::recovery::PResult;

const LIST_ELEMENT_START: TokenSet = NUMBER.union(TokenSet::new(&[
    SyntaxKind::T_BOOLEAN_VALUE,
    SyntaxKind::T_STRING,
]));

const FUNCTION_ARGUMENT_START: TokenSet = IDENTIFIER
    .union(NUMBER)
    .union(TokenSet::single(SyntaxKind::T_STRING));

/// Elements collected for a bracketed list before its span is known.
enum ListValues {
    Numeric(Vec<NumericValue>),
    Boolean(Vec<BooleanValue>),
    String(Vec<StringLiteral>),
}

impl Parser<'_> {
    pub(crate) fn primary_expression(&mut self) -> PResult<PrimaryExpression> {
        let start = self.ts.index();
        match self.ts.kind() {
            kind if CONSTANT_START.contains(kind) => {
                self.constant().map(PrimaryExpression::Constant)
            }
            SyntaxKind::T_LP => {
                self.bump();
                let expression = self.boolean_expression(0)?;
                self.expect(SyntaxKind::T_RP)?;
                Ok(PrimaryExpression::Paren {
                    expression: Box::new(expression),
                    span: self.span_from(start),
                })
            }
            kind if IDENTIFIER.contains(kind) => {
                if self.nth_at(1, SyntaxKind::T_LP) {
                    self.function_call().map(PrimaryExpression::FunctionCall)
                } else {
                    self.qualified_name().map(PrimaryExpression::QualifiedName)
                }
            }
            _ => Err(self.no_viable_alternative(start, PRIMARY_START)),
        }
    }

    /// `identifier ( (booleanExpression (, booleanExpression)*)? )`.
    fn function_call(&mut self) -> PResult<FunctionCall<BooleanExpression>> {
        let start = self.ts.index();
        let name = self.identifier()?;
        self.expect(SyntaxKind::T_LP)?;
        let args = if self.at(SyntaxKind::T_RP) {
            Vec::new()
        } else {
            self.comma_separated(|p| p.boolean_expression(0))?
        };
        self.expect(SyntaxKind::T_RP)?;
        Ok(FunctionCall {
            name,
            args,
            span: self.span_from(start),
        })
    }

    /// Aggregation call: `avg(bytes)`, `count(x)`.
    pub(crate) fn math_fn(&mut self) -> PResult<FunctionCall<FunctionArgument>> {
        self.call_with(Self::function_argument)
    }

    /// Scalar call: `round(x, 2)`, `date_trunc(@timestamp, 1 hour)`.
    pub(crate) fn math_eval_fn(&mut self) -> PResult<FunctionCall<MathFunctionArgument>> {
        self.call_with(Self::math_function_argument)
    }

    /// Shared shape of classified calls: keyword-like name, then a possibly
    /// empty argument list.
    fn call_with<A>(
        &mut self,
        mut argument: impl FnMut(&mut Self) -> PResult<A>,
    ) -> PResult<FunctionCall<A>> {
        let start = self.ts.index();
        let token = self.bump();
        let name = Identifier::from_token(&token, self.span_from(start));
        self.expect(SyntaxKind::T_LP)?;
        let args = if self.at(SyntaxKind::T_RP) {
            Vec::new()
        } else {
            self.comma_separated(&mut argument)?
        };
        self.expect(SyntaxKind::T_RP)?;
        Ok(FunctionCall {
            name,
            args,
            span: self.span_from(start),
        })
    }

    /// A field name, string or number.
    pub(crate) fn function_argument(&mut self) -> PResult<FunctionArgument> {
        let start = self.ts.index();
        match self.ts.kind() {
            SyntaxKind::T_STRING => self.string_literal().map(FunctionArgument::String),
            kind if NUMBER.contains(kind) => self.numeric_value().map(FunctionArgument::Numeric),
            kind if IDENTIFIER.contains(kind) => {
                self.qualified_name().map(FunctionArgument::QualifiedName)
            }
            _ => Err(self.no_viable_alternative(start, FUNCTION_ARGUMENT_START)),
        }
    }

    /// A value expression, or a number followed by a date unit.
    fn math_function_argument(&mut self) -> PResult<MathFunctionArgument> {
        if self.at_set(NUMBER) && self.nth_at(1, SyntaxKind::T_DATE_LITERAL) {
            let start = self.ts.index();
            let value = self.numeric_value()?;
            let unit = self.bump().text;
            return Ok(MathFunctionArgument::TimeSpan(TimeSpan {
                value,
                unit,
                span: self.span_from(start),
            }));
        }
        self.value_expression().map(MathFunctionArgument::Value)
    }

    pub(crate) fn constant(&mut self) -> PResult<Constant> {
        let start = self.ts.index();
        match self.ts.kind() {
            SyntaxKind::K_NULL => {
                self.bump();
                Ok(Constant::Null(self.span_from(start)))
            }
            SyntaxKind::T_BOOLEAN_VALUE => self.boolean_value().map(Constant::Boolean),
            SyntaxKind::T_STRING => self.string_literal().map(Constant::String),
            SyntaxKind::T_OPENING_BRACKET => self.constant_list(),
            kind if NUMBER.contains(kind) => self.numeric_value().map(Constant::Numeric),
            _ => Err(self.no_viable_alternative(start, CONSTANT_START)),
        }
    }

    /// `[ v (, v)* ]` where every element has the class of the first.
    fn constant_list(&mut self) -> PResult<Constant> {
        let start = self.ts.index();
        self.bump();
        let values = match self.ts.kind() {
            SyntaxKind::T_BOOLEAN_VALUE => {
                ListValues::Boolean(self.comma_separated(Self::boolean_value)?)
            }
            SyntaxKind::T_STRING => ListValues::String(self.comma_separated(Self::string_literal)?),
            kind if NUMBER.contains(kind) => {
                ListValues::Numeric(self.comma_separated(Self::numeric_value)?)
            }
            _ => return Err(self.no_viable_alternative(start, LIST_ELEMENT_START)),
        };
        self.expect(SyntaxKind::T_CLOSING_BRACKET)?;
        let span = self.span_from(start);
        Ok(match values {
            ListValues::Numeric(values) => Constant::NumericArray { values, span },
            ListValues::Boolean(values) => Constant::BooleanArray { values, span },
            ListValues::String(values) => Constant::StringArray { values, span },
        })
    }

    pub(crate) fn numeric_value(&mut self) -> PResult<NumericValue> {
        let start = self.ts.index();
        let token = self.expect_set(NUMBER, TokenSet::EMPTY)?;
        let kind = if token.kind == SyntaxKind::T_DECIMAL_LITERAL {
            NumericKind::Decimal
        } else {
            NumericKind::Integer
        };
        Ok(NumericValue {
            raw: token.text,
            kind,
            span: self.span_from(start),
        })
    }

    /// An integer literal, as required by `LIMIT`.
    pub(crate) fn integer_value(&mut self) -> PResult<NumericValue> {
        let start = self.ts.index();
        let token = self.expect(SyntaxKind::T_INTEGER_LITERAL)?;
        Ok(NumericValue {
            raw: token.text,
            kind: NumericKind::Integer,
            span: self.span_from(start),
        })
    }

    pub(crate) fn string_literal(&mut self) -> PResult<StringLiteral> {
        let start = self.ts.index();
        let token = self.expect(SyntaxKind::T_STRING)?;
        Ok(StringLiteral {
            raw: token.text,
            span: self.span_from(start),
        })
    }

    fn boolean_value(&mut self) -> PResult<BooleanValue> {
        let start = self.ts.index();
        let token = self.expect(SyntaxKind::T_BOOLEAN_VALUE)?;
        Ok(BooleanValue {
            value: token.text.eq_ignore_ascii_case("true"),
            span: self.span_from(start),
        })
    }
}
