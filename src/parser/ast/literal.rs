//! Literal nodes: numbers, strings, booleans and constant lists.

use super::{Spanned, TokenSpan};

/// Lexical class of a numeric literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericKind {
    Integer,
    Decimal,
}

/// A numeric literal, stored as written.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NumericValue {
    pub raw: String,
    pub kind: NumericKind,
    pub span: TokenSpan,
}

impl NumericValue {
    /// The value as an unsigned integer, if it is an integer literal that
    /// fits in `u64`.
    #[must_use]
    pub fn as_u64(&self) -> Option<u64> {
        match self.kind {
            NumericKind::Integer => self.raw.parse().ok(),
            NumericKind::Decimal => None,
        }
    }

    /// The value as a float. Integer literals convert too.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        self.raw.parse().ok()
    }
}

/// A string literal, quotes included.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StringLiteral {
    pub raw: String,
    pub span: TokenSpan,
}

impl StringLiteral {
    /// The literal's value with quotes removed and escapes resolved.
    ///
    /// Triple-quoted strings are taken verbatim.
    #[must_use]
    pub fn value(&self) -> String {
        if let Some(inner) = self
            .raw
            .strip_prefix("\"\"\"")
            .and_then(|s| s.strip_suffix("\"\"\""))
        {
            return inner.to_string();
        }
        let inner = self
            .raw
            .strip_prefix('"')
            .and_then(|s| s.strip_suffix('"'))
            .unwrap_or(&self.raw);
        unescape(inner)
    }
}

fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

/// `true` or `false`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BooleanValue {
    pub value: bool,
    pub span: TokenSpan,
}

/// A constant value.
///
/// Lists are homogeneous: the first element decides which list variant is
/// built and the remaining elements must be of the same class.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Constant {
    Null(TokenSpan),
    Numeric(NumericValue),
    Boolean(BooleanValue),
    String(StringLiteral),
    NumericArray {
        values: Vec<NumericValue>,
        span: TokenSpan,
    },
    BooleanArray {
        values: Vec<BooleanValue>,
        span: TokenSpan,
    },
    StringArray {
        values: Vec<StringLiteral>,
        span: TokenSpan,
    },
}

impl Spanned for NumericValue {
    fn span(&self) -> TokenSpan {
        self.span
    }
}

impl Spanned for StringLiteral {
    fn span(&self) -> TokenSpan {
        self.span
    }
}

impl Spanned for BooleanValue {
    fn span(&self) -> TokenSpan {
        self.span
    }
}

impl Spanned for Constant {
    fn span(&self) -> TokenSpan {
        match self {
            Self::Null(span)
            | Self::NumericArray { span, .. }
            | Self::BooleanArray { span, .. }
            | Self::StringArray { span, .. } => *span,
            Self::Numeric(n) => n.span,
            Self::Boolean(b) => b.span,
            Self::String(s) => s.span,
        }
    }
}
