//! Program skeleton, table definitions and relationships.
//!
//! Implements these productions of `grammar/v1.md`:
//! - `program`      := DEF TABLES `table_def`+ END DEF RELATIONSHIPS
//!   `relationship`* END `query`*
//! - `table_def`    := IDENT `{` `column`* `}`
//! - `column`       := (`[` PRIMARY `]`)? IDENT `:` `type` `;`
//! - `type`         := INT | FLOAT | BOOL | STRING
//! - `relationship` := IDENT `.` (MANY | ONE) `(` IDENT `)` `;`
//!
//! With symbol validation on, every table is registered when its name is
//! read and every column is appended once its declaration is complete.
//! Relationships must name two declared tables.

use crate::core::parser::config::ParseResult;
use crate::core::parser::query_parser::QueryParser;
use crate::core::parser::stream::TokenStream;
use crate::core::scanner::tokens::{Token, TokenKind};
use crate::core::semantic_analyzer::symbol_table::{
    Cardinality, ColumnSymbol, DataType,
};

impl<S: TokenStream> QueryParser<'_, S> {
    /// Parses a whole program up to, not including, `EOF`.
    pub(crate) fn program(&mut self) -> ParseResult<()> {
        self.expect(TokenKind::DefKeyword)?;
        self.expect(TokenKind::TablesKeyword)?;
        self.table_def()?;
        while self.at(TokenKind::Identifier) {
            self.table_def()?;
        }
        self.expect(TokenKind::EndKeyword)?;

        self.expect(TokenKind::DefKeyword)?;
        self.expect(TokenKind::RelationshipsKeyword)?;
        while self.at(TokenKind::Identifier) {
            self.relationship()?;
        }
        self.expect(TokenKind::EndKeyword)?;

        while self.at(TokenKind::Identifier) {
            self.query()?;
        }
        Ok(())
    }

    pub(crate) fn table_def(&mut self) -> ParseResult<()> {
        let name = self.expect(TokenKind::Identifier)?;
        tracing::debug!(table = name.lexeme(), line = name.line(), "table definition");

        if self.options.validate_symbols {
            self.symbols
                .register_table(name.lexeme())
                .map_err(|err| self.symbol_error(err, &name))?;
        }

        self.expect(TokenKind::LeftBrace)?;
        while self.at_any(&[TokenKind::LeftBracket, TokenKind::Identifier]) {
            self.column(&name)?;
        }
        self.expect(TokenKind::RightBrace)?;

        self.summary.tables += 1;
        Ok(())
    }

    fn column(&mut self, table: &Token) -> ParseResult<()> {
        let primary_key = self.at(TokenKind::LeftBracket);
        if primary_key {
            self.advance();
            self.expect(TokenKind::PrimaryKeyword)?;
            self.expect(TokenKind::RightBracket)?;
        }

        let name = self.expect(TokenKind::Identifier)?;
        self.expect(TokenKind::Colon)?;
        let data_type = self.data_type()?;
        self.expect(TokenKind::Semicolon)?;

        if self.options.validate_symbols {
            let column = ColumnSymbol::new(name.clone(), data_type, primary_key);
            self.symbols
                .add_column(table.lexeme(), column)
                .map_err(|err| self.symbol_error(err, &name))?;
        }
        Ok(())
    }

    pub(crate) fn data_type(&mut self) -> ParseResult<DataType> {
        let kind = self.choose(
            "type",
            &[
                TokenKind::IntKeyword,
                TokenKind::FloatKeyword,
                TokenKind::BoolKeyword,
                TokenKind::StringKeyword,
            ],
        )?;
        self.expect(kind)?;

        Ok(match kind {
            TokenKind::IntKeyword => DataType::Int,
            TokenKind::FloatKeyword => DataType::Float,
            TokenKind::BoolKeyword => DataType::Bool,
            _ => DataType::String,
        })
    }

    pub(crate) fn relationship(&mut self) -> ParseResult<()> {
        let owner = self.expect(TokenKind::Identifier)?;
        tracing::debug!(owner = owner.lexeme(), line = owner.line(), "relationship");

        if self.options.validate_symbols {
            self.symbols
                .columns(owner.lexeme())
                .map_err(|err| self.symbol_error(err, &owner))?;
        }

        self.expect(TokenKind::Dot)?;
        let kind = self.choose(
            "relationship",
            &[TokenKind::ManyKeyword, TokenKind::OneKeyword],
        )?;
        self.expect(kind)?;
        let cardinality = if kind == TokenKind::ManyKeyword {
            Cardinality::Many
        } else {
            Cardinality::One
        };

        self.expect(TokenKind::LeftParens)?;
        let target = self.expect(TokenKind::Identifier)?;
        self.expect(TokenKind::RightParens)?;
        self.expect(TokenKind::Semicolon)?;

        if self.options.validate_symbols {
            self.symbols
                .add_relationship(owner.lexeme(), cardinality, target.lexeme())
                .map_err(|err| self.symbol_error(err, &target))?;
        }

        self.summary.relationships += 1;
        Ok(())
    }
}
