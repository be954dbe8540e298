//! Expression AST.
//!
//! The three precedence layers of the grammar map onto three node types:
//! [`BooleanExpression`] (`NOT`, `AND`, `OR` and the WHERE predicates),
//! [`ValueExpression`] (an optional comparison) and [`OperatorExpression`]
//! (arithmetic). Leaves are [`PrimaryExpression`]s.

use std::mem;

use super::{
    Constant, Identifier, NumericValue, QualifiedName, Spanned, StringLiteral, TokenSpan,
};
use crate::Token;

/// Boolean connectives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BooleanOp {
    And,
    Or,
}

impl BooleanOp {
    #[must_use]
    pub fn keyword(self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
        }
    }
}

/// Binary arithmetic operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArithmeticOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

impl ArithmeticOp {
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
        }
    }
}

/// Prefix sign operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sign {
    Plus,
    Minus,
}

impl Sign {
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Plus => "+",
            Self::Minus => "-",
        }
    }
}

/// Comparison operators carried by `COMPARISON_OPERATOR` tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComparisonOp {
    Eq,
    Neq,
    Lt,
    Lte,
    Gt,
    Gte,
}

impl ComparisonOp {
    /// Classify the text of a `COMPARISON_OPERATOR` token.
    #[must_use]
    pub fn from_text(text: &str) -> Option<Self> {
        match text {
            "==" => Some(Self::Eq),
            "!=" => Some(Self::Neq),
            "<" => Some(Self::Lt),
            "<=" => Some(Self::Lte),
            ">" => Some(Self::Gt),
            ">=" => Some(Self::Gte),
            _ => None,
        }
    }

    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Eq => "==",
            Self::Neq => "!=",
            Self::Lt => "<",
            Self::Lte => "<=",
            Self::Gt => ">",
            Self::Gte => ">=",
        }
    }
}

/// `LIKE` or `RLIKE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegexKind {
    Like,
    Rlike,
}

/// A boolean expression.
///
/// `In`, `RegexMatch` and `WhereFunction` are only produced inside `WHERE`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BooleanExpression {
    Not {
        operator: Token,
        operand: Box<Self>,
        span: TokenSpan,
    },
    Value(ValueExpression),
    And {
        left: Box<Self>,
        operator: Token,
        right: Box<Self>,
    },
    Or {
        left: Box<Self>,
        operator: Token,
        right: Box<Self>,
    },
    /// `value NOT? IN (v, ...)`.
    In {
        value: ValueExpression,
        not: Option<Token>,
        list: Vec<ValueExpression>,
        span: TokenSpan,
    },
    /// `value NOT? LIKE "pattern"` or the `RLIKE` form.
    RegexMatch {
        value: ValueExpression,
        not: Option<Token>,
        kind: RegexKind,
        pattern: StringLiteral,
        span: TokenSpan,
    },
    WhereFunction(WhereFunction),
}

impl BooleanExpression {
    /// Split a run of `AND`/`OR` nodes along its left edge.
    ///
    /// Returns the leftmost operand and the connectives with their right
    /// operands in source order, so `a AND b OR c` yields
    /// `(a, [(And, b), (Or, c)])`. Any other node yields itself and an
    /// empty list.
    #[must_use]
    pub fn left_chain(&self) -> (&Self, Vec<(BooleanOp, &Self)>) {
        let mut rest = Vec::new();
        let mut node = self;
        loop {
            match node {
                Self::And { left, right, .. } => {
                    rest.push((BooleanOp::And, right.as_ref()));
                    node = left;
                }
                Self::Or { left, right, .. } => {
                    rest.push((BooleanOp::Or, right.as_ref()));
                    node = left;
                }
                _ => break,
            }
        }
        rest.reverse();
        (node, rest)
    }

    fn leftmost(&self) -> &Self {
        let mut node = self;
        while let Self::And { left, .. } | Self::Or { left, .. } = node {
            node = left;
        }
        node
    }

    fn take_left(&mut self) -> Option<Self> {
        match self {
            Self::And { left, .. } | Self::Or { left, .. } => {
                let leaf = Self::Value(ValueExpression::Operator(OperatorExpression::leaf()));
                Some(mem::replace(left.as_mut(), leaf))
            }
            _ => None,
        }
    }

    pub(crate) fn binary(op: BooleanOp, left: Self, operator: Token, right: Self) -> Self {
        let (left, right) = (Box::new(left), Box::new(right));
        match op {
            BooleanOp::And => Self::And {
                left,
                operator,
                right,
            },
            BooleanOp::Or => Self::Or {
                left,
                operator,
                right,
            },
        }
    }
}

/// An arithmetic expression, optionally compared with a second one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValueExpression {
    Operator(OperatorExpression),
    Comparison {
        left: OperatorExpression,
        op: ComparisonOp,
        operator: Token,
        right: OperatorExpression,
    },
}

/// Arithmetic expression tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OperatorExpression {
    Primary(PrimaryExpression),
    /// Aggregation call such as `avg(bytes)` (`UNARY_FUNCTION`).
    MathFn(FunctionCall<FunctionArgument>),
    /// Scalar call such as `round(x, 2)` (`MATH_FUNCTION`).
    MathEvalFn(FunctionCall<MathFunctionArgument>),
    Unary {
        sign: Sign,
        operator: Token,
        operand: Box<Self>,
        span: TokenSpan,
    },
    Binary {
        op: ArithmeticOp,
        operator: Token,
        left: Box<Self>,
        right: Box<Self>,
    },
}

impl OperatorExpression {
    /// Split a run of binary arithmetic nodes along its left edge, as
    /// [`BooleanExpression::left_chain`] does for `AND`/`OR`.
    #[must_use]
    pub fn left_chain(&self) -> (&Self, Vec<(ArithmeticOp, &Self)>) {
        let mut rest = Vec::new();
        let mut node = self;
        while let Self::Binary {
            op, left, right, ..
        } = node
        {
            rest.push((*op, right.as_ref()));
            node = left;
        }
        rest.reverse();
        (node, rest)
    }

    fn leftmost(&self) -> &Self {
        let mut node = self;
        while let Self::Binary { left, .. } = node {
            node = left;
        }
        node
    }

    fn leaf() -> Self {
        Self::Primary(PrimaryExpression::Constant(Constant::Null(TokenSpan::default())))
    }

    fn take_left(&mut self) -> Option<Self> {
        match self {
            Self::Binary { left, .. } => Some(mem::replace(left.as_mut(), Self::leaf())),
            _ => None,
        }
    }
}

// Left spines of parsed chains have no depth bound; drop them with a loop.
impl Drop for BooleanExpression {
    fn drop(&mut self) {
        let mut next = self.take_left();
        while let Some(mut node) = next {
            next = node.take_left();
        }
    }
}

impl Drop for OperatorExpression {
    fn drop(&mut self) {
        let mut next = self.take_left();
        while let Some(mut node) = next {
            next = node.take_left();
        }
    }
}

/// Leaf expressions.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PrimaryExpression {
    Constant(Constant),
    QualifiedName(QualifiedName),
    Paren {
        expression: Box<BooleanExpression>,
        span: TokenSpan,
    },
    /// Call of a function the lexer does not classify, e.g. `to_string(x)`.
    FunctionCall(FunctionCall<BooleanExpression>),
}

/// A function name followed by a parenthesised argument list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FunctionCall<A> {
    pub name: Identifier,
    pub args: Vec<A>,
    pub span: TokenSpan,
}

/// Argument of an aggregation or WHERE function: a field or a literal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FunctionArgument {
    QualifiedName(QualifiedName),
    String(StringLiteral),
    Numeric(NumericValue),
}

/// Argument of a scalar function.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MathFunctionArgument {
    Value(ValueExpression),
    TimeSpan(TimeSpan),
}

/// A number followed by a date unit, e.g. `1 day`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TimeSpan {
    pub value: NumericValue,
    /// Unit as written (`DATE_LITERAL`).
    pub unit: String,
    pub span: TokenSpan,
}

/// `cidr_match(ip, "10.0.0.0/8")` and friends.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WhereFunction {
    pub name: Identifier,
    pub field: QualifiedName,
    pub args: Vec<FunctionArgument>,
    pub span: TokenSpan,
}

impl Spanned for BooleanExpression {
    fn span(&self) -> TokenSpan {
        match self {
            Self::Not { span, .. } | Self::In { span, .. } | Self::RegexMatch { span, .. } => *span,
            Self::Value(v) => v.span(),
            Self::And { right, .. } | Self::Or { right, .. } => {
                self.leftmost().span().cover(right.span())
            }
            Self::WhereFunction(f) => f.span,
        }
    }
}

impl Spanned for ValueExpression {
    fn span(&self) -> TokenSpan {
        match self {
            Self::Operator(o) => o.span(),
            Self::Comparison { left, right, .. } => left.span().cover(right.span()),
        }
    }
}

impl Spanned for OperatorExpression {
    fn span(&self) -> TokenSpan {
        match self {
            Self::Primary(p) => p.span(),
            Self::MathFn(f) => f.span,
            Self::MathEvalFn(f) => f.span,
            Self::Unary { span, .. } => *span,
            Self::Binary { right, .. } => self.leftmost().span().cover(right.span()),
        }
    }
}

impl Spanned for PrimaryExpression {
    fn span(&self) -> TokenSpan {
        match self {
            Self::Constant(c) => c.span(),
            Self::QualifiedName(q) => q.span,
            Self::Paren { span, .. } => *span,
            Self::FunctionCall(f) => f.span,
        }
    }
}

impl Spanned for FunctionArgument {
    fn span(&self) -> TokenSpan {
        match self {
            Self::QualifiedName(q) => q.span,
            Self::String(s) => s.span,
            Self::Numeric(n) => n.span,
        }
    }
}

impl Spanned for MathFunctionArgument {
    fn span(&self) -> TokenSpan {
        match self {
            Self::Value(v) => v.span(),
            Self::TimeSpan(t) => t.span,
        }
    }
}

impl<A> Spanned for FunctionCall<A> {
    fn span(&self) -> TokenSpan {
        self.span
    }
}

impl Spanned for WhereFunction {
    fn span(&self) -> TokenSpan {
        self.span
    }
}
