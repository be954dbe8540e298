//! Identifier nodes.

use super::{Spanned, TokenSpan};
use crate::{SyntaxKind, Token};

/// An identifier as written, with its lexical origin.
///
/// Plain, source (`FROM`) and enrich (`ENRICH`) identifiers share this node;
/// [`kind`](Self::kind) keeps the token kind the lexer assigned.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier {
    /// Text as written, backquotes included.
    pub raw: String,
    /// Whether the identifier was backquoted.
    pub quoted: bool,
    pub kind: SyntaxKind,
    pub span: TokenSpan,
}

impl Identifier {
    pub(crate) fn from_token(token: &Token, span: TokenSpan) -> Self {
        let quoted = matches!(
            token.kind,
            SyntaxKind::T_QUOTED_IDENTIFIER
                | SyntaxKind::T_SRC_QUOTED_IDENTIFIER
                | SyntaxKind::T_ENR_QUOTED_IDENTIFIER
        );
        Self {
            raw: token.text.clone(),
            quoted,
            kind: token.kind,
            span,
        }
    }

    /// The identifier's name with quoting removed.
    ///
    /// ```
    /// use esql_parser::parse_str;
    /// use esql_parser::ast::{Query, SourceCommand};
    ///
    /// let parsed = parse_str("FROM `my``index`");
    /// let Query::SingleCommand(SourceCommand::From(from)) = &parsed.statement().query else {
    ///     panic!("expected FROM");
    /// };
    /// assert_eq!(from.sources[0].name(), "my`index");
    /// ```
    #[must_use]
    pub fn name(&self) -> String {
        if !self.quoted {
            return self.raw.clone();
        }
        self.raw
            .strip_prefix('`')
            .and_then(|s| s.strip_suffix('`'))
            .map_or_else(|| self.raw.clone(), |inner| inner.replace("``", "`"))
    }
}

impl Spanned for Identifier {
    fn span(&self) -> TokenSpan {
        self.span
    }
}

/// Dotted field reference such as `client.ip`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QualifiedName {
    pub parts: Vec<Identifier>,
    pub span: TokenSpan,
}

impl QualifiedName {
    /// Unquoted parts joined with `.`.
    #[must_use]
    pub fn name(&self) -> String {
        self.parts
            .iter()
            .map(Identifier::name)
            .collect::<Vec<_>>()
            .join(".")
    }
}

impl Spanned for QualifiedName {
    fn span(&self) -> TokenSpan {
        self.span
    }
}
