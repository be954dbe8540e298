//! Reference tokenizer for ES|QL source.
//!
//! The parser only needs a token stream. This module is the tokenizer used
//! by [`crate::parse_str`] and by the test suite. It converts text into
//! [`Token`]s with `logos`, one token enum per lexical family, and drives a
//! small mode stack that mirrors the ES|QL lexer:
//!
//! - the default mode recognises command keywords only;
//! - `FROM` switches to source mode, where index patterns such as
//!   `logs-*` are single identifiers;
//! - `ENRICH` switches to enrich mode (`ON`, `WITH`, policy names);
//! - every other command switches to expression mode;
//! - `|` returns to the default mode, and `EXPLAIN [` opens a nested
//!   default-mode frame closed by the matching `]`.
//!
//! Keywords are case-insensitive and resolved through one `phf` map per mode.

use logos::Logos;
use phf::phf_map;

use crate::{SyntaxKind, Token};

/// Byte range of a token within the source text.
pub type Span = std::ops::Range<usize>;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum ExprLex {
    #[regex(r"[ \t\r\n]+")]
    Whitespace,
    #[regex(r"//[^\n]*")]
    LineComment,
    #[regex(r"/\*([^*]|\*[^/])*\*/", priority = 2)]
    MultilineComment,
    #[regex(r"[A-Za-z][A-Za-z0-9_]*|[_@][A-Za-z0-9_]+")]
    Word,
    #[regex(r"`([^`]|``)*`")]
    Quoted,
    #[regex(r#""([^"\\\r\n]|\\.)*""#)]
    #[regex(r#""""([^"]|"[^"]|""[^"])*""""#)]
    String,
    #[regex(r"[0-9]+")]
    Integer,
    #[regex(r"[0-9]+\.[0-9]*([eE][+-]?[0-9]+)?|\.[0-9]+([eE][+-]?[0-9]+)?|[0-9]+[eE][+-]?[0-9]+")]
    Decimal,
    #[token("|")]
    Pipe,
    #[token("=")]
    Assign,
    #[regex(r"==|!=|<=?|>=?")]
    Comparison,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Asterisk,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
}

/// Source mode: everything up to a delimiter is one index pattern.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum SourceLex {
    #[regex(r"[ \t\r\n]+")]
    Whitespace,
    #[regex(r"//[^\n]*")]
    LineComment,
    #[regex(r"/\*([^*]|\*[^/])*\*/", priority = 2)]
    MultilineComment,
    #[regex(r"[^ \t\r\n,|\[\]`=/]+")]
    Unquoted,
    #[regex(r"`([^`]|``)*`")]
    Quoted,
    #[token("|")]
    Pipe,
    #[token(",")]
    Comma,
    #[token("]")]
    RBracket,
}

/// Enrich mode: policy and field names plus `ON`, `WITH` and `=`.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum EnrichLex {
    #[regex(r"[ \t\r\n]+")]
    Whitespace,
    #[regex(r"//[^\n]*")]
    LineComment,
    #[regex(r"/\*([^*]|\*[^/])*\*/", priority = 2)]
    MultilineComment,
    #[regex(r"[^ \t\r\n,|\[\]`=/]+")]
    Unquoted,
    #[regex(r"`([^`]|``)*`")]
    Quoted,
    #[token("|")]
    Pipe,
    #[token(",")]
    Comma,
    #[token("=")]
    Assign,
    #[token("]")]
    RBracket,
}

/// Command keywords recognised at the start of a pipeline stage.
static COMMAND_KEYWORDS: phf::Map<&'static str, SyntaxKind> = phf_map! {
    "dissect" => SyntaxKind::K_DISSECT,
    "grok" => SyntaxKind::K_GROK,
    "eval" => SyntaxKind::K_EVAL,
    "explain" => SyntaxKind::K_EXPLAIN,
    "from" => SyntaxKind::K_FROM,
    "row" => SyntaxKind::K_ROW,
    "stats" => SyntaxKind::K_STATS,
    "where" => SyntaxKind::K_WHERE,
    "sort" => SyntaxKind::K_SORT,
    "limit" => SyntaxKind::K_LIMIT,
    "keep" => SyntaxKind::K_KEEP,
    "project" => SyntaxKind::K_PROJECT,
    "drop" => SyntaxKind::K_DROP,
    "rename" => SyntaxKind::K_RENAME,
    "show" => SyntaxKind::K_SHOW,
    "enrich" => SyntaxKind::K_ENRICH,
    "mv_expand" => SyntaxKind::K_MV_EXPAND,
};

/// Words with a dedicated kind in expression mode.
///
/// Function names are split into the three lexical classes the grammar
/// distinguishes: aggregations (`UNARY_FUNCTION`), scalar functions whose
/// arguments may be arbitrary expressions (`MATH_FUNCTION`) and the
/// WHERE-only predicates (`WHERE_FUNCTIONS`).
static EXPRESSION_KEYWORDS: phf::Map<&'static str, SyntaxKind> = phf_map! {
    "by" => SyntaxKind::K_BY,
    "and" => SyntaxKind::K_AND,
    "or" => SyntaxKind::K_OR,
    "not" => SyntaxKind::K_NOT,
    "like" => SyntaxKind::K_LIKE,
    "rlike" => SyntaxKind::K_RLIKE,
    "in" => SyntaxKind::K_IN,
    "null" => SyntaxKind::K_NULL,
    "info" => SyntaxKind::K_INFO,
    "functions" => SyntaxKind::K_FUNCTIONS,
    "nulls" => SyntaxKind::K_NULLS,
    "true" => SyntaxKind::T_BOOLEAN_VALUE,
    "false" => SyntaxKind::T_BOOLEAN_VALUE,
    "asc" => SyntaxKind::T_ORDERING,
    "desc" => SyntaxKind::T_ORDERING,
    "first" => SyntaxKind::T_NULLS_ORDERING_DIRECTION,
    "last" => SyntaxKind::T_NULLS_ORDERING_DIRECTION,
    "millisecond" => SyntaxKind::T_DATE_LITERAL,
    "milliseconds" => SyntaxKind::T_DATE_LITERAL,
    "second" => SyntaxKind::T_DATE_LITERAL,
    "seconds" => SyntaxKind::T_DATE_LITERAL,
    "minute" => SyntaxKind::T_DATE_LITERAL,
    "minutes" => SyntaxKind::T_DATE_LITERAL,
    "hour" => SyntaxKind::T_DATE_LITERAL,
    "hours" => SyntaxKind::T_DATE_LITERAL,
    "day" => SyntaxKind::T_DATE_LITERAL,
    "days" => SyntaxKind::T_DATE_LITERAL,
    "week" => SyntaxKind::T_DATE_LITERAL,
    "weeks" => SyntaxKind::T_DATE_LITERAL,
    "month" => SyntaxKind::T_DATE_LITERAL,
    "months" => SyntaxKind::T_DATE_LITERAL,
    "year" => SyntaxKind::T_DATE_LITERAL,
    "years" => SyntaxKind::T_DATE_LITERAL,
    "avg" => SyntaxKind::T_UNARY_FUNCTION,
    "min" => SyntaxKind::T_UNARY_FUNCTION,
    "max" => SyntaxKind::T_UNARY_FUNCTION,
    "sum" => SyntaxKind::T_UNARY_FUNCTION,
    "count" => SyntaxKind::T_UNARY_FUNCTION,
    "count_distinct" => SyntaxKind::T_UNARY_FUNCTION,
    "median" => SyntaxKind::T_UNARY_FUNCTION,
    "median_absolute_deviation" => SyntaxKind::T_UNARY_FUNCTION,
    "round" => SyntaxKind::T_MATH_FUNCTION,
    "abs" => SyntaxKind::T_MATH_FUNCTION,
    "pow" => SyntaxKind::T_MATH_FUNCTION,
    "log10" => SyntaxKind::T_MATH_FUNCTION,
    "concat" => SyntaxKind::T_MATH_FUNCTION,
    "substring" => SyntaxKind::T_MATH_FUNCTION,
    "starts_with" => SyntaxKind::T_MATH_FUNCTION,
    "length" => SyntaxKind::T_MATH_FUNCTION,
    "date_format" => SyntaxKind::T_MATH_FUNCTION,
    "date_trunc" => SyntaxKind::T_MATH_FUNCTION,
    "auto_bucket" => SyntaxKind::T_MATH_FUNCTION,
    "is_finite" => SyntaxKind::T_MATH_FUNCTION,
    "is_infinite" => SyntaxKind::T_MATH_FUNCTION,
    "is_nan" => SyntaxKind::T_MATH_FUNCTION,
    "case" => SyntaxKind::T_MATH_FUNCTION,
    "split" => SyntaxKind::T_MATH_FUNCTION,
    "cidr_match" => SyntaxKind::T_WHERE_FUNCTIONS,
    "is_null" => SyntaxKind::T_WHERE_FUNCTIONS,
};

static ENRICH_KEYWORDS: phf::Map<&'static str, SyntaxKind> = phf_map! {
    "on" => SyntaxKind::K_ON,
    "with" => SyntaxKind::K_WITH,
};

fn keyword_kind(map: &phf::Map<&'static str, SyntaxKind>, word: &str) -> Option<SyntaxKind> {
    map.get(word.to_ascii_lowercase().as_str()).copied()
}

/// Lexer mode to start tokenising in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LexerMode {
    /// Start of a pipeline stage: only command keywords are recognised.
    #[default]
    Default,
    /// Inside a command's expression arguments.
    Expression,
    /// Inside `FROM`'s source list.
    Source,
    /// Inside `ENRICH`'s clauses.
    Enrich,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Default,
    Explain,
    Expression,
    Source,
    Enrich,
}

impl From<LexerMode> for Mode {
    fn from(mode: LexerMode) -> Self {
        match mode {
            LexerMode::Default => Self::Default,
            LexerMode::Expression => Self::Expression,
            LexerMode::Source => Self::Source,
            LexerMode::Enrich => Self::Enrich,
        }
    }
}

/// One entry of the mode stack. `brackets` counts open list brackets so a
/// `]` closing a constant list is not mistaken for the end of `EXPLAIN [ ]`.
#[derive(Debug, Clone, Copy)]
struct Frame {
    mode: Mode,
    brackets: usize,
}

/// A token as classified by a mode-specific `logos` enum, before keyword
/// resolution and mode transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Raw {
    Kind(SyntaxKind),
    Word,
    OpenBracket,
    CloseBracket,
    Pipe,
    Error,
}

/// Lex a single token at the start of `rest` with the `logos` enum `T`.
///
/// Returns the classified token (or `None` on a lexical error) and its
/// length in bytes.
fn lex_one<'s, T>(rest: &'s str) -> Option<(Option<T>, usize)>
where
    T: Logos<'s, Source = str>,
    T::Extras: Default,
{
    let mut lexer = T::lexer(rest);
    let result = lexer.next()?;
    let len = lexer.span().end;
    Some((result.ok(), len))
}

fn raw_expr(token: ExprLex) -> Raw {
    match token {
        ExprLex::Whitespace => Raw::Kind(SyntaxKind::T_WS),
        ExprLex::LineComment => Raw::Kind(SyntaxKind::T_LINE_COMMENT),
        ExprLex::MultilineComment => Raw::Kind(SyntaxKind::T_MULTILINE_COMMENT),
        ExprLex::Word => Raw::Word,
        ExprLex::Quoted => Raw::Kind(SyntaxKind::T_QUOTED_IDENTIFIER),
        ExprLex::String => Raw::Kind(SyntaxKind::T_STRING),
        ExprLex::Integer => Raw::Kind(SyntaxKind::T_INTEGER_LITERAL),
        ExprLex::Decimal => Raw::Kind(SyntaxKind::T_DECIMAL_LITERAL),
        ExprLex::Pipe => Raw::Pipe,
        ExprLex::Assign => Raw::Kind(SyntaxKind::T_ASSIGN),
        ExprLex::Comparison => Raw::Kind(SyntaxKind::T_COMPARISON_OPERATOR),
        ExprLex::Plus => Raw::Kind(SyntaxKind::T_PLUS),
        ExprLex::Minus => Raw::Kind(SyntaxKind::T_MINUS),
        ExprLex::Asterisk => Raw::Kind(SyntaxKind::T_ASTERISK),
        ExprLex::Slash => Raw::Kind(SyntaxKind::T_SLASH),
        ExprLex::Percent => Raw::Kind(SyntaxKind::T_PERCENT),
        ExprLex::Comma => Raw::Kind(SyntaxKind::T_COMMA),
        ExprLex::Dot => Raw::Kind(SyntaxKind::T_DOT),
        ExprLex::LParen => Raw::Kind(SyntaxKind::T_LP),
        ExprLex::RParen => Raw::Kind(SyntaxKind::T_RP),
        ExprLex::LBracket => Raw::OpenBracket,
        ExprLex::RBracket => Raw::CloseBracket,
    }
}

fn raw_source(token: SourceLex) -> Raw {
    match token {
        SourceLex::Whitespace => Raw::Kind(SyntaxKind::T_WS),
        SourceLex::LineComment => Raw::Kind(SyntaxKind::T_LINE_COMMENT),
        SourceLex::MultilineComment => Raw::Kind(SyntaxKind::T_MULTILINE_COMMENT),
        SourceLex::Unquoted => Raw::Kind(SyntaxKind::T_SRC_UNQUOTED_IDENTIFIER),
        SourceLex::Quoted => Raw::Kind(SyntaxKind::T_SRC_QUOTED_IDENTIFIER),
        SourceLex::Pipe => Raw::Pipe,
        SourceLex::Comma => Raw::Kind(SyntaxKind::T_COMMA),
        SourceLex::RBracket => Raw::CloseBracket,
    }
}

fn raw_enrich(token: EnrichLex) -> Raw {
    match token {
        EnrichLex::Whitespace => Raw::Kind(SyntaxKind::T_WS),
        EnrichLex::LineComment => Raw::Kind(SyntaxKind::T_LINE_COMMENT),
        EnrichLex::MultilineComment => Raw::Kind(SyntaxKind::T_MULTILINE_COMMENT),
        EnrichLex::Unquoted => Raw::Word,
        EnrichLex::Quoted => Raw::Kind(SyntaxKind::T_ENR_QUOTED_IDENTIFIER),
        EnrichLex::Pipe => Raw::Pipe,
        EnrichLex::Comma => Raw::Kind(SyntaxKind::T_COMMA),
        EnrichLex::Assign => Raw::Kind(SyntaxKind::T_ASSIGN),
        EnrichLex::RBracket => Raw::CloseBracket,
    }
}

/// Mode-stack driven tokenizer state.
struct Tokenizer<'a> {
    src: &'a str,
    pos: usize,
    line: u32,
    column: u32,
    frames: Vec<Frame>,
    out: Vec<Token>,
}

impl<'a> Tokenizer<'a> {
    fn new(src: &'a str, mode: LexerMode) -> Self {
        Self {
            src,
            pos: 0,
            line: 1,
            column: 0,
            frames: vec![Frame {
                mode: mode.into(),
                brackets: 0,
            }],
            out: Vec::new(),
        }
    }

    fn mode(&self) -> Mode {
        self.frames.last().map_or(Mode::Default, |f| f.mode)
    }

    fn set_mode(&mut self, mode: Mode) {
        if let Some(frame) = self.frames.last_mut() {
            frame.mode = mode;
        }
    }

    fn run(mut self) -> Vec<Token> {
        let src = self.src;
        while let Some(rest) = src.get(self.pos..) {
            if rest.is_empty() {
                break;
            }
            let lexed = match self.mode() {
                Mode::Source => lex_one::<SourceLex>(rest)
                    .map(|(t, len)| (t.map_or(Raw::Error, raw_source), len)),
                Mode::Enrich => lex_one::<EnrichLex>(rest)
                    .map(|(t, len)| (t.map_or(Raw::Error, raw_enrich), len)),
                Mode::Default | Mode::Explain | Mode::Expression => {
                    lex_one::<ExprLex>(rest).map(|(t, len)| (t.map_or(Raw::Error, raw_expr), len))
                }
            };
            let Some((raw, len)) = lexed else { break };
            let len = if len == 0 { first_char_len(rest) } else { len };
            let span = self.pos..self.pos + len;
            let text = src.get(span.clone()).unwrap_or_default();
            let kind = self.classify(raw, text);
            self.push(kind, span);
        }
        let eof = Token::eof(self.src.len(), self.line, self.column);
        self.out.push(eof);
        self.out
    }

    /// Resolve keywords and apply mode transitions for one raw token.
    fn classify(&mut self, raw: Raw, text: &str) -> SyntaxKind {
        match raw {
            Raw::Kind(kind) => kind,
            Raw::Error => SyntaxKind::N_ERROR,
            Raw::Word => self.classify_word(text),
            Raw::Pipe => {
                self.set_mode(Mode::Default);
                SyntaxKind::T_PIPE
            }
            Raw::OpenBracket => {
                if self.mode() == Mode::Explain {
                    self.set_mode(Mode::Expression);
                    self.frames.push(Frame {
                        mode: Mode::Default,
                        brackets: 0,
                    });
                } else if let Some(frame) = self.frames.last_mut() {
                    frame.brackets += 1;
                }
                SyntaxKind::T_OPENING_BRACKET
            }
            Raw::CloseBracket => {
                let in_list = self.frames.last().is_some_and(|f| f.brackets > 0);
                if in_list {
                    if let Some(frame) = self.frames.last_mut() {
                        frame.brackets -= 1;
                    }
                } else if self.frames.len() > 1 {
                    self.frames.pop();
                }
                SyntaxKind::T_CLOSING_BRACKET
            }
        }
    }

    fn classify_word(&mut self, text: &str) -> SyntaxKind {
        match self.mode() {
            Mode::Default => {
                let Some(kind) = keyword_kind(&COMMAND_KEYWORDS, text) else {
                    return SyntaxKind::T_UNQUOTED_IDENTIFIER;
                };
                let next = match kind {
                    SyntaxKind::K_FROM => Mode::Source,
                    SyntaxKind::K_ENRICH => Mode::Enrich,
                    SyntaxKind::K_EXPLAIN => Mode::Explain,
                    _ => Mode::Expression,
                };
                self.set_mode(next);
                kind
            }
            Mode::Enrich => keyword_kind(&ENRICH_KEYWORDS, text)
                .unwrap_or(SyntaxKind::T_ENR_UNQUOTED_IDENTIFIER),
            Mode::Source => SyntaxKind::T_SRC_UNQUOTED_IDENTIFIER,
            Mode::Explain | Mode::Expression => keyword_kind(&EXPRESSION_KEYWORDS, text)
                .unwrap_or(SyntaxKind::T_UNQUOTED_IDENTIFIER),
        }
    }

    fn push(&mut self, kind: SyntaxKind, span: Span) {
        let src = self.src;
        let text = src.get(span.clone()).unwrap_or_default();
        let token = Token::new(kind, text, span.clone(), self.line, self.column);
        for ch in text.chars() {
            if ch == '\n' {
                self.line += 1;
                self.column = 0;
            } else {
                self.column += 1;
            }
        }
        self.pos = span.end;
        self.out.push(token);
    }
}

fn first_char_len(rest: &str) -> usize {
    rest.chars().next().map_or(1, char::len_utf8)
}

/// Tokenise ES|QL source, starting in `mode`, keeping trivia.
///
/// The result always ends with a single `T_EOF` token.
#[must_use]
pub fn tokenize_in_mode(src: &str, mode: LexerMode) -> Vec<Token> {
    Tokenizer::new(src, mode).run()
}

/// Tokenise the provided ES|QL query.
///
/// # Examples
///
/// ```rust
/// use esql_parser::{tokenize_with_trivia, SyntaxKind};
///
/// let tokens = tokenize_with_trivia("FROM logs-* | LIMIT 1");
/// assert_eq!(tokens[0].kind, SyntaxKind::K_FROM);
/// assert_eq!(tokens[2].kind, SyntaxKind::T_SRC_UNQUOTED_IDENTIFIER);
/// assert_eq!(tokens[2].text, "logs-*");
/// ```
///
/// This variant retains whitespace and comment tokens, so the token texts
/// concatenate back to the source.
#[must_use]
pub fn tokenize_with_trivia(src: &str) -> Vec<Token> {
    tokenize_in_mode(src, LexerMode::Default)
}

/// Tokenise the query, excluding whitespace and comments.
///
/// # Examples
///
/// ```rust
/// use esql_parser::{tokenize_without_trivia, SyntaxKind};
///
/// let tokens = tokenize_without_trivia("ROW a = 1");
/// assert!(!tokens.iter().any(|t| t.kind == SyntaxKind::T_WS));
/// ```
#[must_use]
pub fn tokenize_without_trivia(src: &str) -> Vec<Token> {
    tokenize_with_trivia(src)
        .into_iter()
        .filter(|t| !t.kind.is_trivia())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn kinds(src: &str) -> Vec<SyntaxKind> {
        tokenize_without_trivia(src).iter().map(|t| t.kind).collect()
    }

    #[rstest]
    fn explain_brackets_open_a_nested_default_frame() {
        use SyntaxKind as K;
        assert_eq!(
            kinds("EXPLAIN [FROM a | LIMIT 1] | LIMIT 2"),
            vec![
                K::K_EXPLAIN,
                K::T_OPENING_BRACKET,
                K::K_FROM,
                K::T_SRC_UNQUOTED_IDENTIFIER,
                K::T_PIPE,
                K::K_LIMIT,
                K::T_INTEGER_LITERAL,
                K::T_CLOSING_BRACKET,
                K::T_PIPE,
                K::K_LIMIT,
                K::T_INTEGER_LITERAL,
                K::T_EOF,
            ]
        );
    }

    #[rstest]
    fn list_brackets_do_not_close_explain() {
        use SyntaxKind as K;
        assert_eq!(
            kinds("EXPLAIN [ROW a = [1, 2]]"),
            vec![
                K::K_EXPLAIN,
                K::T_OPENING_BRACKET,
                K::K_ROW,
                K::T_UNQUOTED_IDENTIFIER,
                K::T_ASSIGN,
                K::T_OPENING_BRACKET,
                K::T_INTEGER_LITERAL,
                K::T_COMMA,
                K::T_INTEGER_LITERAL,
                K::T_CLOSING_BRACKET,
                K::T_CLOSING_BRACKET,
                K::T_EOF,
            ]
        );
    }

    #[rstest]
    fn line_and_column_track_newlines() {
        let tokens = tokenize_without_trivia("FROM a\n| LIMIT 1");
        let limit = tokens
            .iter()
            .find(|t| t.kind == SyntaxKind::K_LIMIT)
            .unwrap_or_else(|| panic!("LIMIT token missing"));
        assert_eq!((limit.line, limit.column), (2, 2));
    }

    #[rstest]
    fn unknown_character_produces_error_token() {
        assert_eq!(
            kinds("ROW a = #"),
            vec![
                SyntaxKind::K_ROW,
                SyntaxKind::T_UNQUOTED_IDENTIFIER,
                SyntaxKind::T_ASSIGN,
                SyntaxKind::N_ERROR,
                SyntaxKind::T_EOF,
            ]
        );
    }
}
