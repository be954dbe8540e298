//! Token stream utilities.
//!
//! Provides a cursor over a slice of [`Token`]s that hides trivia from the
//! grammar rules. Hidden-channel tokens keep their indices, so spans recorded
//! by the parser can be mapped straight back onto the original slice.
//!
//! ```
//! use esql_parser::tokenize_with_trivia;
//! use esql_parser::parser::token_stream::TokenStream;
//! use esql_parser::SyntaxKind;
//!
//! let tokens = tokenize_with_trivia("FROM logs | LIMIT 1");
//! let mut stream = TokenStream::new(&tokens);
//! assert_eq!(stream.current().kind, SyntaxKind::K_FROM);
//! assert_eq!(stream.lookahead(1).kind, SyntaxKind::T_SRC_UNQUOTED_IDENTIFIER);
//! let from = stream.advance();
//! assert_eq!(from.text, "FROM");
//! assert_eq!(stream.index(), 2);
//! ```

use crate::{SyntaxKind, Token};

/// Saved cursor position produced by [`TokenStream::mark`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mark {
    pos: usize,
    previous: Option<usize>,
}

/// Cursor over significant tokens.
#[derive(Debug)]
pub struct TokenStream<'t> {
    tokens: &'t [Token],
    eof: Token,
    end: usize,
    pos: usize,
    previous: Option<usize>,
}

impl<'t> TokenStream<'t> {
    /// Constructs a stream positioned on the first significant token.
    ///
    /// Tokens after the first `T_EOF` are ignored. When the slice carries no
    /// EOF token one is synthesised just past the last token.
    #[must_use]
    pub fn new(tokens: &'t [Token]) -> Self {
        let end = tokens
            .iter()
            .position(Token::is_eof)
            .unwrap_or(tokens.len());
        let eof = tokens.get(end).cloned().unwrap_or_else(|| {
            tokens.last().map_or_else(
                || Token::eof(0, 1, 0),
                |last| {
                    let width = u32::try_from(last.text.chars().count()).unwrap_or(u32::MAX);
                    Token::eof(last.stop(), last.line, last.column.saturating_add(width))
                },
            )
        });
        let pos = skip_hidden(tokens, 0, end);
        Self {
            tokens,
            eof,
            end,
            pos,
            previous: None,
        }
    }

    /// The token under the cursor. At the end of input this is the EOF
    /// sentinel.
    #[must_use]
    pub fn current(&self) -> &Token {
        self.token_at(self.pos)
    }

    /// Kind of the token under the cursor.
    #[must_use]
    pub fn kind(&self) -> SyntaxKind {
        self.current().kind
    }

    /// The significant token `k` positions ahead of the cursor.
    ///
    /// `lookahead(0)` is [`current`](Self::current). Looking past the end
    /// yields the EOF sentinel.
    #[must_use]
    pub fn lookahead(&self, k: usize) -> &Token {
        let mut pos = self.pos;
        for _ in 0..k {
            if pos >= self.end {
                break;
            }
            pos = skip_hidden(self.tokens, pos + 1, self.end);
        }
        self.token_at(pos)
    }

    /// Consume the current token and return it.
    ///
    /// The cursor never moves past EOF; advancing there returns the sentinel
    /// again.
    pub fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if self.pos < self.end {
            self.previous = Some(self.pos);
            self.pos = skip_hidden(self.tokens, self.pos + 1, self.end);
        }
        token
    }

    /// Remember the cursor position for later [`reset`](Self::reset).
    #[must_use]
    pub fn mark(&self) -> Mark {
        Mark {
            pos: self.pos,
            previous: self.previous,
        }
    }

    /// Rewind to a position returned by [`mark`](Self::mark).
    pub fn reset(&mut self, mark: Mark) {
        self.pos = mark.pos;
        self.previous = mark.previous;
    }

    /// Index of the current token in the underlying slice.
    #[must_use]
    pub fn index(&self) -> usize {
        self.pos
    }

    /// Index of the most recently consumed significant token.
    #[must_use]
    pub fn previous_index(&self) -> Option<usize> {
        self.previous
    }

    /// Whether the cursor sits on the EOF sentinel.
    #[must_use]
    pub fn at_eof(&self) -> bool {
        self.pos >= self.end
    }

    /// The underlying token slice, trivia included.
    #[must_use]
    pub fn tokens(&self) -> &'t [Token] {
        self.tokens
    }

    /// Concatenated text of the tokens from `start` up to and including
    /// `stop`, hidden tokens included. EOF renders as `<EOF>`.
    #[must_use]
    pub fn text_between(&self, start: usize, stop: usize) -> String {
        let mut text = String::new();
        for idx in start..=stop.max(start) {
            let token = self.token_at(idx);
            text.push_str(token.display_text());
            if token.is_eof() {
                break;
            }
        }
        text
    }

    fn token_at(&self, idx: usize) -> &Token {
        if idx >= self.end {
            return &self.eof;
        }
        self.tokens.get(idx).unwrap_or(&self.eof)
    }
}

/// First index at or after `from` holding a significant token, or `end`.
fn skip_hidden(tokens: &[Token], from: usize, end: usize) -> usize {
    tokens
        .iter()
        .enumerate()
        .take(end)
        .skip(from)
        .find(|(_, t)| !t.kind.is_trivia())
        .map_or(end, |(idx, _)| idx)
}
