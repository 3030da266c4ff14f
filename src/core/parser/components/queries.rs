//! Queries against declared tables.
//!
//! Implements these productions of `grammar/v1.md`:
//! - `query`        := IDENT `.` (`insert` | `update` | `select`)
//! - `insert`       := ADD `(` `json` `)` `;`
//! - `update`       := UPDATE `(` `json` `)` `filter`
//! - `select`       := SELECT `(` IDENT (`,` IDENT)* `)` `filter`
//! - `filter`       := `;` | `.` WHERE `(` `or_expr` `)` `;`
//! - `json`         := `{` (`json_element` (`,` `json_element`)*)? `}`
//! - `json_element` := IDENT `:` `or_expr`
//!
//! The table a query names becomes the scope for the rest of the query:
//! selected columns, JSON keys and identifiers inside expressions must all
//! be columns of that table.

use crate::core::parser::config::ParseResult;
use crate::core::parser::query_parser::QueryParser;
use crate::core::parser::stream::TokenStream;
use crate::core::scanner::tokens::TokenKind;

impl<S: TokenStream> QueryParser<'_, S> {
    pub(crate) fn query(&mut self) -> ParseResult<()> {
        let table = self.expect(TokenKind::Identifier)?;
        tracing::debug!(table = table.lexeme(), line = table.line(), "query");

        if self.options.validate_symbols {
            self.symbols
                .columns(table.lexeme())
                .map_err(|err| self.symbol_error(err, &table))?;
        }
        self.current_table = Some(table.lexeme().to_string());

        self.expect(TokenKind::Dot)?;
        let kind = self.choose(
            "query",
            &[
                TokenKind::AddKeyword,
                TokenKind::UpdateKeyword,
                TokenKind::SelectKeyword,
            ],
        )?;
        match kind {
            TokenKind::AddKeyword => self.insert()?,
            TokenKind::UpdateKeyword => self.update()?,
            _ => self.select()?,
        }

        self.current_table = None;
        self.summary.queries += 1;
        Ok(())
    }

    fn insert(&mut self) -> ParseResult<()> {
        self.expect(TokenKind::AddKeyword)?;
        self.expect(TokenKind::LeftParens)?;
        self.json()?;
        self.expect(TokenKind::RightParens)?;
        self.expect(TokenKind::Semicolon)?;
        Ok(())
    }

    fn update(&mut self) -> ParseResult<()> {
        self.expect(TokenKind::UpdateKeyword)?;
        self.expect(TokenKind::LeftParens)?;
        self.json()?;
        self.expect(TokenKind::RightParens)?;
        self.filter()
    }

    fn select(&mut self) -> ParseResult<()> {
        self.expect(TokenKind::SelectKeyword)?;
        self.expect(TokenKind::LeftParens)?;
        loop {
            let column = self.expect(TokenKind::Identifier)?;
            self.resolve_column(&column)?;
            if !self.at(TokenKind::Comma) {
                break;
            }
            self.advance();
        }
        self.expect(TokenKind::RightParens)?;
        self.filter()
    }

    /// Either ends the query or reads a `.where(...)` clause.
    fn filter(&mut self) -> ParseResult<()> {
        let kind = self
            .choose("filter", &[TokenKind::Semicolon, TokenKind::Dot])?;
        if kind == TokenKind::Semicolon {
            self.expect(TokenKind::Semicolon)?;
            return Ok(());
        }

        self.expect(TokenKind::Dot)?;
        self.expect(TokenKind::WhereKeyword)?;
        self.expect(TokenKind::LeftParens)?;
        self.or_expr()?;
        self.expect(TokenKind::RightParens)?;
        self.expect(TokenKind::Semicolon)?;
        Ok(())
    }

    pub(crate) fn json(&mut self) -> ParseResult<()> {
        self.expect(TokenKind::LeftBrace)?;
        if self.at(TokenKind::Identifier) {
            self.json_element()?;
            while self.at(TokenKind::Comma) {
                self.advance();
                self.json_element()?;
            }
        }
        self.expect(TokenKind::RightBrace)?;
        Ok(())
    }

    fn json_element(&mut self) -> ParseResult<()> {
        let key = self.expect(TokenKind::Identifier)?;
        self.resolve_column(&key)?;
        self.expect(TokenKind::Colon)?;
        self.or_expr()
    }
}
