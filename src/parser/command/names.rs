//! Identifiers, qualified names and the small clauses built from them.

use crate::SyntaxKind;
use crate::TokenSet;
use crate::parser::ast::{
    CommandOption, EnrichWithClause, Field, Identifier, QualifiedName, RenameClause,
};
use crate::parser::core::{ENRICH_IDENTIFIER, IDENTIFIER, Parser, SOURCE_IDENTIFIER};
use crate::parser::recovery::PResult;

impl Parser<'_> {
    /// Parse `item (, item)*`.
    pub(crate) fn comma_separated<T>(
        &mut self,
        mut item: impl FnMut(&mut Self) -> PResult<T>,
    ) -> PResult<Vec<T>> {
        let mut items = vec![item(self)?];
        while self.eat(SyntaxKind::T_COMMA).is_some() {
            items.push(item(self)?);
        }
        Ok(items)
    }

    pub(crate) fn identifier(&mut self) -> PResult<Identifier> {
        self.identifier_in(IDENTIFIER)
    }

    pub(crate) fn source_identifier(&mut self) -> PResult<Identifier> {
        self.identifier_in(SOURCE_IDENTIFIER)
    }

    pub(crate) fn enrich_identifier(&mut self) -> PResult<Identifier> {
        self.identifier_in(ENRICH_IDENTIFIER)
    }

    fn identifier_in(&mut self, kinds: TokenSet) -> PResult<Identifier> {
        let start = self.ts.index();
        let token = self.expect_set(kinds, TokenSet::EMPTY)?;
        Ok(Identifier::from_token(&token, self.span_from(start)))
    }

    /// `identifier (. identifier)*`.
    pub(crate) fn qualified_name(&mut self) -> PResult<QualifiedName> {
        let start = self.ts.index();
        let mut parts = vec![self.identifier()?];
        while self.eat(SyntaxKind::T_DOT).is_some() {
            parts.push(self.identifier()?);
        }
        Ok(QualifiedName {
            parts,
            span: self.span_from(start),
        })
    }

    pub(crate) fn qualified_names(&mut self) -> PResult<Vec<QualifiedName>> {
        self.comma_separated(Self::qualified_name)
    }

    /// `(identifier =)? booleanExpression`.
    pub(crate) fn field(&mut self) -> PResult<Field> {
        let start = self.ts.index();
        let name = if self.at_set(IDENTIFIER) && self.nth_at(1, SyntaxKind::T_ASSIGN) {
            let name = self.identifier()?;
            self.bump();
            Some(name)
        } else {
            None
        };
        let expression = self.boolean_expression(0)?;
        Ok(Field {
            name,
            expression,
            span: self.span_from(start),
        })
    }

    pub(crate) fn fields(&mut self) -> PResult<Vec<Field>> {
        self.comma_separated(Self::field)
    }

    /// `new_name = old.name`.
    pub(crate) fn rename_clause(&mut self) -> PResult<RenameClause> {
        let start = self.ts.index();
        let new_name = self.identifier()?;
        self.expect(SyntaxKind::T_ASSIGN)?;
        let old_name = self.qualified_name()?;
        Ok(RenameClause {
            new_name,
            old_name,
            span: self.span_from(start),
        })
    }

    /// `identifier = constant`.
    pub(crate) fn command_option(&mut self) -> PResult<CommandOption> {
        let start = self.ts.index();
        let name = self.identifier()?;
        self.expect(SyntaxKind::T_ASSIGN)?;
        let value = self.constant()?;
        Ok(CommandOption {
            name,
            value,
            span: self.span_from(start),
        })
    }

    /// `(new_name =)? enrich_field`.
    pub(crate) fn enrich_with_clause(&mut self) -> PResult<EnrichWithClause> {
        let start = self.ts.index();
        let new_name =
            if self.at_set(ENRICH_IDENTIFIER) && self.nth_at(1, SyntaxKind::T_ASSIGN) {
                let name = self.enrich_identifier()?;
                self.bump();
                Some(name)
            } else {
                None
            };
        let enrich_field = self.enrich_identifier()?;
        Ok(EnrichWithClause {
            new_name,
            enrich_field,
            span: self.span_from(start),
        })
    }
}
