//! Build a `rowan` green tree from tokens and recorded node spans.

use log::warn;
use rowan::{GreenNode, GreenNodeBuilder, Language};

use crate::parser::ast::TokenSpan;
use crate::{EsqlLanguage, Span, SyntaxKind, Token};

/// Node spans ordered for a single left-to-right pass: by start, outermost
/// first.
fn sorted_spans(nodes: &[(SyntaxKind, TokenSpan)]) -> Vec<(SyntaxKind, TokenSpan)> {
    let mut spans: Vec<_> = nodes
        .iter()
        .copied()
        .filter(|(_, span)| !span.is_empty())
        .collect();
    spans.sort_by(|(_, a), (_, b)| a.start.cmp(&b.start).then(b.end.cmp(&a.end)));
    spans
}

fn validate_token_span(span: &Span, previous_end: usize) -> bool {
    if span.start <= span.end && span.start >= previous_end {
        true
    } else {
        warn!("token span {span:?} overlaps the previous token ending at {previous_end}");
        false
    }
}

/// Construct the CST from the token stream and the node spans recorded by
/// the parser.
///
/// Every token becomes a leaf, so the tree text is the concatenation of the
/// token texts whatever the spans say. Spans that would cross an already
/// open node are closed with it.
pub(crate) fn build_green_tree(tokens: &[Token], nodes: &[(SyntaxKind, TokenSpan)]) -> GreenNode {
    let mut builder = GreenNodeBuilder::new();
    builder.start_node(EsqlLanguage::kind_to_raw(SyntaxKind::N_SINGLE_STATEMENT));

    let spans = sorted_spans(nodes);
    let mut pending = spans.iter().peekable();
    let mut open: Vec<usize> = Vec::new();
    let mut previous_end = 0;

    for (idx, token) in tokens.iter().enumerate() {
        while open.last().is_some_and(|&end| end <= idx) {
            builder.finish_node();
            open.pop();
        }
        while let Some(&(kind, span)) = pending.next_if(|(_, span)| span.start <= idx) {
            if span.start < idx {
                warn!(
                    "{kind:?} span {}..{} starts inside an earlier node",
                    span.start, span.end
                );
                continue;
            }
            builder.start_node(EsqlLanguage::kind_to_raw(kind));
            open.push(span.end);
        }

        if validate_token_span(&token.span, previous_end) {
            previous_end = token.span.end;
        }
        push_token(&mut builder, token);
    }

    for _ in open {
        builder.finish_node();
    }
    builder.finish_node();
    builder.finish()
}

fn push_token(builder: &mut GreenNodeBuilder, token: &Token) {
    let raw = EsqlLanguage::kind_to_raw(token.kind);
    if token.kind == SyntaxKind::N_ERROR {
        push_error_wrapped(builder, raw, &token.text);
    } else {
        builder.token(raw, &token.text);
    }
}

fn push_error_wrapped(builder: &mut GreenNodeBuilder, raw: rowan::SyntaxKind, text: &str) {
    builder.start_node(EsqlLanguage::kind_to_raw(SyntaxKind::N_ERROR));
    builder.token(raw, text);
    builder.finish_node();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::cst_builder::SyntaxNode;
    use crate::tokenize_with_trivia;
    use rstest::rstest;

    fn children(node: &SyntaxNode) -> Vec<SyntaxKind> {
        node.children().map(|child| child.kind()).collect()
    }

    #[rstest]
    fn tree_text_matches_tokens() {
        let src = "FROM a // c\n| WHERE x > 1";
        let tokens = tokenize_with_trivia(src);
        let nodes = [
            (SyntaxKind::N_SOURCE_COMMAND, TokenSpan::new(0, 3)),
            (SyntaxKind::N_PROCESSING_COMMAND, TokenSpan::new(8, 15)),
        ];
        let root = SyntaxNode::new_root(build_green_tree(&tokens, &nodes));
        assert_eq!(root.text().to_string(), src);
        assert_eq!(
            children(&root),
            [SyntaxKind::N_SOURCE_COMMAND, SyntaxKind::N_PROCESSING_COMMAND]
        );
    }

    #[rstest]
    fn nested_spans_nest() {
        let src = "EXPLAIN [ FROM a ]";
        let tokens = tokenize_with_trivia(src);
        let nodes = [
            (SyntaxKind::N_SOURCE_COMMAND, TokenSpan::new(4, 7)),
            (SyntaxKind::N_SUBQUERY, TokenSpan::new(2, 9)),
            (SyntaxKind::N_SOURCE_COMMAND, TokenSpan::new(0, 9)),
        ];
        let root = SyntaxNode::new_root(build_green_tree(&tokens, &nodes));
        let outer = root.first_child().unwrap_or_else(|| panic!("missing command node"));
        assert_eq!(children(&outer), [SyntaxKind::N_SUBQUERY]);
        assert_eq!(root.text().to_string(), src);
    }

    #[rstest]
    fn empty_spans_are_skipped() {
        let tokens = tokenize_with_trivia("FROM a");
        let nodes = [(SyntaxKind::N_ERROR, TokenSpan::new(1, 1))];
        let root = SyntaxNode::new_root(build_green_tree(&tokens, &nodes));
        assert!(children(&root).is_empty());
    }

    #[rstest]
    fn overlapping_token_is_still_pushed() {
        let mut tokens = tokenize_with_trivia("FROM a");
        tokens.insert(1, Token::new(SyntaxKind::T_WS, " ", 0..1, 1, 0));
        let root = SyntaxNode::new_root(build_green_tree(&tokens, &[]));
        assert_eq!(root.text().to_string(), "FROM  a");
    }
}
