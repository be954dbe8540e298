//! CST construction utilities.
//!
//! Provides [`Parsed`] and [`build_green_tree`].

use rowan::GreenNode;

use crate::EsqlLanguage;
use crate::parser::ast::SingleStatement;
use crate::parser::error::SyntaxError;

mod tree;

pub(crate) use self::tree::build_green_tree;

/// Concrete syntax node over the ES|QL green tree.
pub type SyntaxNode = rowan::SyntaxNode<EsqlLanguage>;

/// Result of a parse operation.
///
/// Parsing always produces a statement. When errors were reported the
/// statement is the best-effort tree built during recovery.
#[derive(Debug)]
pub struct Parsed {
    statement: SingleStatement,
    errors: Vec<SyntaxError>,
    green: GreenNode,
}

impl Parsed {
    pub(crate) fn new(
        statement: SingleStatement,
        errors: Vec<SyntaxError>,
        green: GreenNode,
    ) -> Self {
        Self {
            statement,
            errors,
            green,
        }
    }

    /// Access the typed AST.
    #[must_use]
    pub fn statement(&self) -> &SingleStatement {
        &self.statement
    }

    /// Diagnostics in the order they were reported.
    #[must_use]
    pub fn errors(&self) -> &[SyntaxError] {
        &self.errors
    }

    /// Whether the input parsed without any diagnostics.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// The statement if no errors were reported, otherwise the diagnostics.
    ///
    /// # Errors
    ///
    /// Returns every reported [`SyntaxError`] when the input was invalid.
    pub fn into_result(self) -> Result<SingleStatement, Vec<SyntaxError>> {
        if self.errors.is_empty() {
            Ok(self.statement)
        } else {
            Err(self.errors)
        }
    }

    /// Access the `rowan` green tree.
    #[must_use]
    pub fn green(&self) -> &GreenNode {
        &self.green
    }

    /// Root of the lossless CST. Its text equals the concatenated token
    /// texts.
    #[must_use]
    pub fn syntax(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.green.clone())
    }
}
