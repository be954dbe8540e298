//! Parser state shared by the command and expression rules.
//!
//! The grammar rules live in `impl Parser` blocks spread over the
//! `command` and `expression` modules. This module owns the state they
//! share and the small cursor helpers every rule uses.

use crate::parser::ParserConfig;
use crate::parser::ast::TokenSpan;
use crate::parser::error::SyntaxError;
use crate::parser::recovery::{Abort, PResult};
use crate::parser::token_stream::TokenStream;
use crate::{SyntaxKind, Token, TokenSet};

/// Plain identifiers used in expressions and command arguments.
pub(super) const IDENTIFIER: TokenSet = TokenSet::new(&[
    SyntaxKind::T_UNQUOTED_IDENTIFIER,
    SyntaxKind::T_QUOTED_IDENTIFIER,
]);

/// Index patterns after `FROM`.
pub(super) const SOURCE_IDENTIFIER: TokenSet = TokenSet::new(&[
    SyntaxKind::T_SRC_UNQUOTED_IDENTIFIER,
    SyntaxKind::T_SRC_QUOTED_IDENTIFIER,
]);

/// Policy and field names after `ENRICH`.
pub(super) const ENRICH_IDENTIFIER: TokenSet = TokenSet::new(&[
    SyntaxKind::T_ENR_UNQUOTED_IDENTIFIER,
    SyntaxKind::T_ENR_QUOTED_IDENTIFIER,
]);

pub(super) const NUMBER: TokenSet =
    TokenSet::new(&[SyntaxKind::T_INTEGER_LITERAL, SyntaxKind::T_DECIMAL_LITERAL]);

pub(super) const CONSTANT_START: TokenSet = TokenSet::new(&[
    SyntaxKind::K_NULL,
    SyntaxKind::T_INTEGER_LITERAL,
    SyntaxKind::T_DECIMAL_LITERAL,
    SyntaxKind::T_BOOLEAN_VALUE,
    SyntaxKind::T_STRING,
    SyntaxKind::T_OPENING_BRACKET,
]);

pub(super) const PRIMARY_START: TokenSet = CONSTANT_START
    .union(IDENTIFIER)
    .union(TokenSet::single(SyntaxKind::T_LP));

pub(super) const OPERATOR_START: TokenSet = PRIMARY_START.union(TokenSet::new(&[
    SyntaxKind::T_PLUS,
    SyntaxKind::T_MINUS,
    SyntaxKind::T_UNARY_FUNCTION,
    SyntaxKind::T_MATH_FUNCTION,
]));

pub(super) const BOOLEAN_START: TokenSet =
    OPERATOR_START.union(TokenSet::single(SyntaxKind::K_NOT));

pub(super) const WHERE_START: TokenSet =
    BOOLEAN_START.union(TokenSet::single(SyntaxKind::T_WHERE_FUNCTIONS));

pub(super) const SOURCE_COMMANDS: TokenSet = TokenSet::new(&[
    SyntaxKind::K_EXPLAIN,
    SyntaxKind::K_FROM,
    SyntaxKind::K_ROW,
    SyntaxKind::K_SHOW,
]);

pub(super) const PROCESSING_COMMANDS: TokenSet = TokenSet::new(&[
    SyntaxKind::K_EVAL,
    SyntaxKind::K_LIMIT,
    SyntaxKind::K_KEEP,
    SyntaxKind::K_PROJECT,
    SyntaxKind::K_RENAME,
    SyntaxKind::K_DROP,
    SyntaxKind::K_DISSECT,
    SyntaxKind::K_GROK,
    SyntaxKind::K_SORT,
    SyntaxKind::K_STATS,
    SyntaxKind::K_WHERE,
    SyntaxKind::K_MV_EXPAND,
    SyntaxKind::K_ENRICH,
]);

/// Recursive-descent parser over a token slice.
pub(crate) struct Parser<'t> {
    pub(super) ts: TokenStream<'t>,
    pub(super) config: ParserConfig,
    pub(super) errors: Vec<SyntaxError>,
    /// Set once an error is reported; cleared by the next normal match.
    pub(super) error_recovery: bool,
    /// Set when recovery is disabled and an error has been reported.
    pub(super) halted: bool,
    pub(super) depth: usize,
    /// Number of enclosing `EXPLAIN [ ... ]` subqueries.
    pub(super) subquery_depth: usize,
    /// Whether `IN`, `LIKE`, `RLIKE` and WHERE functions are accepted.
    pub(super) where_predicates: bool,
    /// CST node spans recorded for the green tree.
    pub(super) nodes: Vec<(SyntaxKind, TokenSpan)>,
}

impl<'t> Parser<'t> {
    pub(crate) fn new(tokens: &'t [Token], config: ParserConfig) -> Self {
        Self {
            ts: TokenStream::new(tokens),
            config,
            errors: Vec::new(),
            error_recovery: false,
            halted: false,
            depth: 0,
            subquery_depth: 0,
            where_predicates: false,
            nodes: Vec::new(),
        }
    }

    /// Hand back the diagnostics and recorded node spans.
    pub(crate) fn finish(self) -> (Vec<SyntaxError>, Vec<(SyntaxKind, TokenSpan)>) {
        (self.errors, self.nodes)
    }

    pub(crate) fn at(&self, kind: SyntaxKind) -> bool {
        self.ts.kind() == kind
    }

    pub(crate) fn at_set(&self, set: TokenSet) -> bool {
        set.contains(self.ts.kind())
    }

    pub(crate) fn nth_at(&self, k: usize, kind: SyntaxKind) -> bool {
        self.ts.lookahead(k).kind == kind
    }

    /// Consume the current token as a successful match.
    pub(crate) fn bump(&mut self) -> Token {
        self.error_recovery = false;
        self.ts.advance()
    }

    pub(crate) fn eat(&mut self, kind: SyntaxKind) -> Option<Token> {
        self.at(kind).then(|| self.bump())
    }

    /// Whether the current token ends a pipeline stage.
    pub(crate) fn at_boundary(&self) -> bool {
        match self.ts.kind() {
            SyntaxKind::T_PIPE | SyntaxKind::T_EOF => true,
            SyntaxKind::T_CLOSING_BRACKET => self.subquery_depth > 0,
            _ => false,
        }
    }

    /// Tokens that may follow a complete query at this nesting level.
    pub(crate) fn query_follow(&self) -> TokenSet {
        if self.subquery_depth > 0 {
            TokenSet::new(&[SyntaxKind::T_PIPE, SyntaxKind::T_CLOSING_BRACKET])
        } else {
            TokenSet::new(&[SyntaxKind::T_PIPE, SyntaxKind::T_EOF])
        }
    }

    /// Span from token index `start` through the last consumed token.
    pub(crate) fn span_from(&self, start: usize) -> TokenSpan {
        let end = self
            .ts
            .previous_index()
            .map_or(start, |idx| (idx + 1).max(start));
        TokenSpan::new(start, end)
    }

    pub(crate) fn record(&mut self, kind: SyntaxKind, span: TokenSpan) {
        self.nodes.push((kind, span));
    }

    /// Run `rule` one nesting level deeper, failing once the configured
    /// maximum depth is reached.
    pub(crate) fn nested<T>(&mut self, rule: impl FnOnce(&mut Self) -> PResult<T>) -> PResult<T> {
        if self.depth >= self.config.max_depth {
            let token = self.ts.current().clone();
            self.report(SyntaxError::nesting_too_deep(token, self.config.max_depth));
            return Err(Abort);
        }
        self.depth += 1;
        let result = rule(self);
        self.depth -= 1;
        result
    }
}
