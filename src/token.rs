//! Token model shared by the tokenizer and the parser.
//!
//! A [`Token`] is the unit the parser consumes. It is produced by a lexer
//! that already knows which lexical mode it is in, so its [`SyntaxKind`] is
//! final: the parser never re-lexes or reclassifies a token.

use crate::{Span, SyntaxKind};

/// A lexed token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    /// Mode-specific token kind.
    pub kind: SyntaxKind,
    /// Source text covered by the token.
    pub text: String,
    /// Byte range within the source.
    pub span: Span,
    /// 1-based line of the first character.
    pub line: u32,
    /// 0-based column (in characters) of the first character.
    pub column: u32,
}

impl Token {
    /// Construct a token.
    #[must_use]
    pub fn new(
        kind: SyntaxKind,
        text: impl Into<String>,
        span: Span,
        line: u32,
        column: u32,
    ) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
            line,
            column,
        }
    }

    /// An end-of-input sentinel positioned at byte offset `at`.
    #[must_use]
    pub fn eof(at: usize, line: u32, column: u32) -> Self {
        Self::new(SyntaxKind::T_EOF, "", at..at, line, column)
    }

    /// Byte offset of the first character.
    #[must_use]
    pub fn start(&self) -> usize {
        self.span.start
    }

    /// Byte offset one past the last character.
    #[must_use]
    pub fn stop(&self) -> usize {
        self.span.end
    }

    /// Whether this is the EOF sentinel.
    #[must_use]
    pub fn is_eof(&self) -> bool {
        self.kind == SyntaxKind::T_EOF
    }

    /// Text as shown in diagnostics: `<EOF>` for the sentinel.
    #[must_use]
    pub fn display_text(&self) -> &str {
        if self.is_eof() { "<EOF>" } else { &self.text }
    }
}
