//! `rowan` integration and ES|QL syntax kinds.
//!
//! This module defines the `SyntaxKind` enum covering every token the lexer
//! can emit (in any of its modes) plus the handful of node kinds used by the
//! lossless CST. The `EsqlLanguage` newtype implements `rowan::Language`
//! using conversions provided by `num_derive`. [`TokenSet`] is a constant
//! bitset over token kinds used for expected-token reporting.

use std::fmt;

use num_derive::{FromPrimitive as FromPrimitiveDerive, ToPrimitive as ToPrimitiveDerive};
use num_traits::{FromPrimitive, ToPrimitive};
use rowan::Language as RowanLanguage;
use rowan::SyntaxKind as RowanSyntaxKind;

/// Every possible token or node in the ES|QL syntax tree.
///
/// Token kinds mirror the symbolic names of the ES|QL lexer. Identifier
/// kinds are split by lexer mode: plain identifiers, source identifiers
/// (after `FROM`) and enrich identifiers (after `ENRICH`) are lexically
/// different and must never be reclassified by the parser.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    FromPrimitiveDerive,
    ToPrimitiveDerive,
)]
#[repr(u16)]
#[expect(non_camel_case_types, reason = "token naming follows the ES|QL lexer")]
pub enum SyntaxKind {
    // Trivia (hidden channel)
    T_WS,
    T_LINE_COMMENT,
    T_MULTILINE_COMMENT,
    // Tokens
    T_PIPE,
    T_STRING,
    T_INTEGER_LITERAL,
    T_DECIMAL_LITERAL,
    T_DATE_LITERAL,
    T_ASSIGN,
    T_COMMA,
    T_DOT,
    T_LP,
    T_RP,
    T_OPENING_BRACKET,
    T_CLOSING_BRACKET,
    T_BOOLEAN_VALUE,
    T_COMPARISON_OPERATOR,
    T_PLUS,
    T_MINUS,
    T_ASTERISK,
    T_SLASH,
    T_PERCENT,
    T_ORDERING,
    T_NULLS_ORDERING_DIRECTION,
    T_MATH_FUNCTION,
    T_UNARY_FUNCTION,
    T_WHERE_FUNCTIONS,
    T_UNQUOTED_IDENTIFIER,
    T_QUOTED_IDENTIFIER,
    T_SRC_UNQUOTED_IDENTIFIER,
    T_SRC_QUOTED_IDENTIFIER,
    T_ENR_UNQUOTED_IDENTIFIER,
    T_ENR_QUOTED_IDENTIFIER,
    T_EOF,
    // Command keywords
    K_DISSECT,
    K_GROK,
    K_EVAL,
    K_EXPLAIN,
    K_FROM,
    K_ROW,
    K_STATS,
    K_WHERE,
    K_SORT,
    K_LIMIT,
    K_KEEP,
    K_PROJECT,
    K_DROP,
    K_RENAME,
    K_SHOW,
    K_ENRICH,
    K_MV_EXPAND,
    // Expression keywords
    K_BY,
    K_AND,
    K_OR,
    K_NOT,
    K_LIKE,
    K_RLIKE,
    K_IN,
    K_NULL,
    K_INFO,
    K_FUNCTIONS,
    K_NULLS,
    K_ON,
    K_WITH,
    // Nodes
    N_SINGLE_STATEMENT,
    N_SOURCE_COMMAND,
    N_PROCESSING_COMMAND,
    N_SUBQUERY,
    // Special
    N_ERROR,
}

impl SyntaxKind {
    /// Whether the kind lives on the hidden channel and is skipped by the parser.
    #[must_use]
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::T_WS | Self::T_LINE_COMMENT | Self::T_MULTILINE_COMMENT)
    }

    /// Whether the kind is a keyword (command or expression).
    #[must_use]
    pub fn is_keyword(self) -> bool {
        (Self::K_DISSECT..=Self::K_WITH).contains(&self)
    }

    /// Human-readable name used in diagnostics.
    ///
    /// Fixed-text tokens render as their quoted literal, keywords as their
    /// upper-case spelling and everything else as the lexer's symbolic name.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::T_PIPE => "'|'",
            Self::T_ASSIGN => "'='",
            Self::T_COMMA => "','",
            Self::T_DOT => "'.'",
            Self::T_LP => "'('",
            Self::T_RP => "')'",
            Self::T_OPENING_BRACKET => "'['",
            Self::T_CLOSING_BRACKET => "']'",
            Self::T_PLUS => "'+'",
            Self::T_MINUS => "'-'",
            Self::T_ASTERISK => "'*'",
            Self::T_SLASH => "'/'",
            Self::T_PERCENT => "'%'",
            Self::T_EOF => "<EOF>",
            Self::T_WS => "WS",
            Self::T_LINE_COMMENT => "LINE_COMMENT",
            Self::T_MULTILINE_COMMENT => "MULTILINE_COMMENT",
            Self::T_STRING => "STRING",
            Self::T_INTEGER_LITERAL => "INTEGER_LITERAL",
            Self::T_DECIMAL_LITERAL => "DECIMAL_LITERAL",
            Self::T_DATE_LITERAL => "DATE_LITERAL",
            Self::T_BOOLEAN_VALUE => "BOOLEAN_VALUE",
            Self::T_COMPARISON_OPERATOR => "COMPARISON_OPERATOR",
            Self::T_ORDERING => "ORDERING",
            Self::T_NULLS_ORDERING_DIRECTION => "NULLS_ORDERING_DIRECTION",
            Self::T_MATH_FUNCTION => "MATH_FUNCTION",
            Self::T_UNARY_FUNCTION => "UNARY_FUNCTION",
            Self::T_WHERE_FUNCTIONS => "WHERE_FUNCTIONS",
            Self::T_UNQUOTED_IDENTIFIER => "UNQUOTED_IDENTIFIER",
            Self::T_QUOTED_IDENTIFIER => "QUOTED_IDENTIFIER",
            Self::T_SRC_UNQUOTED_IDENTIFIER => "SRC_UNQUOTED_IDENTIFIER",
            Self::T_SRC_QUOTED_IDENTIFIER => "SRC_QUOTED_IDENTIFIER",
            Self::T_ENR_UNQUOTED_IDENTIFIER => "ENR_UNQUOTED_IDENTIFIER",
            Self::T_ENR_QUOTED_IDENTIFIER => "ENR_QUOTED_IDENTIFIER",
            Self::K_DISSECT => "DISSECT",
            Self::K_GROK => "GROK",
            Self::K_EVAL => "EVAL",
            Self::K_EXPLAIN => "EXPLAIN",
            Self::K_FROM => "FROM",
            Self::K_ROW => "ROW",
            Self::K_STATS => "STATS",
            Self::K_WHERE => "WHERE",
            Self::K_SORT => "SORT",
            Self::K_LIMIT => "LIMIT",
            Self::K_KEEP => "KEEP",
            Self::K_PROJECT => "PROJECT",
            Self::K_DROP => "DROP",
            Self::K_RENAME => "RENAME",
            Self::K_SHOW => "SHOW",
            Self::K_ENRICH => "ENRICH",
            Self::K_MV_EXPAND => "MV_EXPAND",
            Self::K_BY => "BY",
            Self::K_AND => "AND",
            Self::K_OR => "OR",
            Self::K_NOT => "NOT",
            Self::K_LIKE => "LIKE",
            Self::K_RLIKE => "RLIKE",
            Self::K_IN => "IN",
            Self::K_NULL => "NULL",
            Self::K_INFO => "INFO",
            Self::K_FUNCTIONS => "FUNCTIONS",
            Self::K_NULLS => "NULLS",
            Self::K_ON => "ON",
            Self::K_WITH => "WITH",
            Self::N_SINGLE_STATEMENT => "singleStatement",
            Self::N_SOURCE_COMMAND => "sourceCommand",
            Self::N_PROCESSING_COMMAND => "processingCommand",
            Self::N_SUBQUERY => "subqueryExpression",
            Self::N_ERROR => "ERROR",
        }
    }
}

impl fmt::Display for SyntaxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Newtype wrapper allowing `rowan` to store `SyntaxKind` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EsqlLanguage;

impl RowanLanguage for EsqlLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: RowanSyntaxKind) -> Self::Kind {
        SyntaxKind::from_u16(raw.0).unwrap_or(SyntaxKind::N_ERROR)
    }

    fn kind_to_raw(kind: Self::Kind) -> RowanSyntaxKind {
        RowanSyntaxKind(
            kind.to_u16()
                .unwrap_or_else(|| unreachable!("all SyntaxKind variants map to u16")),
        )
    }
}

/// Immutable set of token kinds.
///
/// Backed by a `u128`, which comfortably holds every token and keyword kind.
/// Node kinds are never members.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TokenSet(u128);

impl TokenSet {
    /// The empty set.
    pub const EMPTY: Self = Self(0);

    /// Build a set from a slice of kinds. Usable in `const` context.
    #[must_use]
    pub const fn new(kinds: &[SyntaxKind]) -> Self {
        let mut bits = 0u128;
        let mut rest = kinds;
        while let [kind, tail @ ..] = rest {
            bits |= Self::bit(*kind);
            rest = tail;
        }
        Self(bits)
    }

    /// A set holding exactly one kind.
    #[must_use]
    pub const fn single(kind: SyntaxKind) -> Self {
        Self(Self::bit(kind))
    }

    const fn bit(kind: SyntaxKind) -> u128 {
        let raw = kind as u16;
        if raw < 128 { 1 << raw } else { 0 }
    }

    /// Whether `kind` is a member.
    #[must_use]
    pub const fn contains(self, kind: SyntaxKind) -> bool {
        self.0 & Self::bit(kind) != 0
    }

    /// Set union.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Whether the set has no members.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of members.
    #[must_use]
    pub const fn len(self) -> u32 {
        self.0.count_ones()
    }

    /// Iterate members in declaration order.
    pub fn iter(self) -> impl Iterator<Item = SyntaxKind> {
        (0..128u16)
            .filter(move |raw| self.0 & (1u128 << raw) != 0)
            .filter_map(SyntaxKind::from_u16)
    }
}

impl fmt::Debug for TokenSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// A single kind renders bare, several kinds in braces.
impl fmt::Display for TokenSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.len() == 1 {
            if let Some(kind) = self.iter().next() {
                return write!(f, "{kind}");
            }
        }
        f.write_str("{")?;
        for (i, kind) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{kind}")?;
        }
        f.write_str("}")
    }
}

impl FromIterator<SyntaxKind> for TokenSet {
    fn from_iter<T: IntoIterator<Item = SyntaxKind>>(iter: T) -> Self {
        iter.into_iter()
            .fold(Self::EMPTY, |set, kind| set.union(Self::single(kind)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn kinds_round_trip_through_rowan() {
        let raw = EsqlLanguage::kind_to_raw(SyntaxKind::K_ENRICH);
        assert_eq!(EsqlLanguage::kind_from_raw(raw), SyntaxKind::K_ENRICH);
    }

    #[rstest]
    fn last_token_kind_fits_in_set() {
        let set = TokenSet::single(SyntaxKind::K_WITH);
        assert!(set.contains(SyntaxKind::K_WITH));
        assert!(!set.contains(SyntaxKind::K_ON));
    }

    #[rstest]
    #[case(TokenSet::single(SyntaxKind::T_PIPE), "'|'")]
    #[case(TokenSet::new(&[SyntaxKind::T_PIPE, SyntaxKind::T_EOF]), "{'|', <EOF>}")]
    #[case(TokenSet::EMPTY, "{}")]
    fn token_sets_render_in_diagnostics(#[case] set: TokenSet, #[case] expected: &str) {
        assert_eq!(set.to_string(), expected);
    }

    #[rstest]
    fn union_and_len() {
        let set = TokenSet::single(SyntaxKind::K_AND).union(TokenSet::single(SyntaxKind::K_OR));
        assert_eq!(set.len(), 2);
        assert_eq!(
            set.iter().collect::<Vec<_>>(),
            vec![SyntaxKind::K_AND, SyntaxKind::K_OR]
        );
    }

    #[rstest]
    #[case(SyntaxKind::T_WS, true)]
    #[case(SyntaxKind::T_MULTILINE_COMMENT, true)]
    #[case(SyntaxKind::T_PIPE, false)]
    fn trivia_classification(#[case] kind: SyntaxKind, #[case] expected: bool) {
        assert_eq!(kind.is_trivia(), expected);
    }
}
