//! The grammar engine: a predictive, one-token-lookahead parser.
//!
//! `QueryParser` owns a single lookahead token and pulls the next one from
//! its `TokenStream` only after consuming the current one. Every decision,
//! which branch to take and whether a repetition continues, is made by
//! comparing the lookahead's kind; nothing is ever un-read. The productions
//! themselves live in `components`.
//!
//! The first violation ends the parse. It is logged through the injected
//! `Logger` and returned as a `ParseError`; there is no resynchronization.
//!
//! When `ParserOptions::validate_symbols` is set, declarations are recorded
//! in the caller's `SymbolTable` as they are read and later references are
//! resolved against it. The table is borrowed for one parse; after a failed
//! parse it may hold the declarations read so far.
//!
//! ## Examples
//! ```
//! # use std::sync::Arc;
//! # use query_builder_rs::core::logging::MemoryLogger;
//! # use query_builder_rs::core::parser::QueryParser;
//! # use query_builder_rs::core::scanner::Lexer;
//! # use query_builder_rs::core::semantic_analyzer::SymbolTable;
//! let logger = Arc::new(MemoryLogger::new());
//! let source = "def tables T { id: int; } end def relationships end T.select(id);";
//! let lexer = Lexer::default_for_input(source, logger.clone());
//! let mut symbols = SymbolTable::new();
//!
//! let summary = QueryParser::new(lexer, &mut symbols, logger).parse().unwrap();
//! assert_eq!(summary.queries, 1);
//! assert!(symbols.column("T", "id").is_ok());
//! ```

use std::sync::Arc;

use crate::core::logging::Logger;
use crate::core::parser::config::{
    AlternativePolicy, ParseError, ParseResult, ParseSummary, ParserOptions,
};
use crate::core::parser::stream::TokenStream;
use crate::core::scanner::tokens::{Token, TokenKind};
use crate::core::semantic_analyzer::symbol_table::{SymbolError, SymbolTable};

/// Recursive-descent parser over a `TokenStream`.
#[derive(Debug)]
pub struct QueryParser<'s, S: TokenStream> {
    stream: S,
    pub(super) lookahead: Token,
    pub(super) symbols: &'s mut SymbolTable,
    pub(super) options: ParserOptions,
    logger: Arc<dyn Logger>,
    /// Table named by the query being parsed, if any.
    pub(super) current_table: Option<String>,
    /// Open parenthesised sub-expressions.
    pub(super) depth: usize,
    pub(super) summary: ParseSummary,
}

impl<'s, S: TokenStream> QueryParser<'s, S> {
    /// Create a parser with default options.
    ///
    /// The first token is pulled from `stream` immediately.
    pub fn new(
        stream: S,
        symbols: &'s mut SymbolTable,
        logger: Arc<dyn Logger>,
    ) -> Self {
        Self::with_options(stream, symbols, logger, ParserOptions::default())
    }

    pub fn with_options(
        mut stream: S,
        symbols: &'s mut SymbolTable,
        logger: Arc<dyn Logger>,
        options: ParserOptions,
    ) -> Self {
        let lookahead = stream.next_token();
        Self {
            stream,
            lookahead,
            symbols,
            options,
            logger,
            current_table: None,
            depth: 0,
            summary: ParseSummary::default(),
        }
    }

    #[must_use]
    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// Parse a whole program.
    ///
    /// # Errors
    ///
    /// Returns the first syntax or symbol violation encountered. The
    /// error has already been reported to the logger.
    pub fn parse(mut self) -> ParseResult<ParseSummary> {
        self.program()?;
        self.expect(TokenKind::EOF)?;

        let summary = self.summary;
        tracing::debug!(?summary, "program accepted");
        self.logger.info(&format!(
            "Parse succeeded: {} tables, {} relationships, {} queries",
            summary.tables, summary.relationships, summary.queries
        ));
        Ok(summary)
    }

    /// True if the lookahead has kind `kind`.
    pub(super) fn at(&self, kind: TokenKind) -> bool {
        self.lookahead.is(kind)
    }

    pub(super) fn at_any(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.lookahead.kind())
    }

    /// Replace the lookahead with the next token and return the old one.
    pub(super) fn advance(&mut self) -> Token {
        let next = self.stream.next_token();
        std::mem::replace(&mut self.lookahead, next)
    }

    /// Consume the lookahead if it has kind `expected`.
    pub(super) fn expect(&mut self, expected: TokenKind) -> ParseResult<Token> {
        if self.at(expected) {
            return Ok(self.advance());
        }
        Err(self.fail(ParseError::UnexpectedToken {
            expected,
            found: self.lookahead.kind(),
            lexeme: self.lookahead.lexeme().to_string(),
            line: self.lookahead.line(),
            column: self.lookahead.column(),
        }))
    }

    /// Pick the alternative of `rule` that starts with the lookahead.
    ///
    /// `alternatives` lists the first tokens of each branch; the last entry
    /// is the branch taken when nothing matches under
    /// `AlternativePolicy::AssumeDefault`. Nothing is consumed.
    pub(super) fn choose(
        &self,
        rule: &'static str,
        alternatives: &[TokenKind],
    ) -> ParseResult<TokenKind> {
        let found = self.lookahead.kind();
        if alternatives.contains(&found) {
            return Ok(found);
        }
        match (self.options.alternative_policy, alternatives.last()) {
            (AlternativePolicy::AssumeDefault, Some(&fallback)) => Ok(fallback),
            _ => Err(self.fail(ParseError::NoAlternative {
                rule,
                expected: alternatives.to_vec(),
                found,
                lexeme: self.lookahead.lexeme().to_string(),
                line: self.lookahead.line(),
                column: self.lookahead.column(),
            })),
        }
    }

    /// Turn a symbol table violation at `at` into a logged `ParseError`.
    pub(super) fn symbol_error(&self, error: SymbolError, at: &Token) -> ParseError {
        self.fail(ParseError::Symbol {
            error,
            line: at.line(),
            column: at.column(),
        })
    }

    /// Resolve `name` as a column of the table the current query targets.
    pub(super) fn resolve_column(&self, name: &Token) -> ParseResult<()> {
        if !self.options.validate_symbols {
            return Ok(());
        }
        let Some(table) = self.current_table.as_deref() else {
            return Ok(());
        };
        match self.symbols.column(table, name.lexeme()) {
            Ok(_) => Ok(()),
            Err(err) => Err(self.symbol_error(err, name)),
        }
    }

    /// Log a fatal error and hand it back for propagation.
    pub(super) fn fail(&self, err: ParseError) -> ParseError {
        tracing::debug!(error = %err, "parse aborted");
        self.logger.error(&err.to_string());
        err
    }
}
