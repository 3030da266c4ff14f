//! Scanner-Parser Integration Test Utilities
//!
//! Helpers for driving the whole pipeline, from raw source text through
//! the scanner and parser into a fresh symbol table, and for inspecting
//! what ended up in the logger.

use std::fs;
use std::sync::Arc;

use query_builder_rs::core::logging::MemoryLogger;
use query_builder_rs::core::parser::config::{
    ParseError, ParseSummary, ParserOptions,
};
use query_builder_rs::core::parser::query_parser::QueryParser;
use query_builder_rs::core::scanner::lexer::Lexer;
use query_builder_rs::core::scanner::tokens::{Token, TokenKind};
use query_builder_rs::core::semantic_analyzer::symbol_table::SymbolTable;

/// Everything a single end-to-end run produced.
#[derive(Debug)]
pub struct EndToEndResult {
    pub result: Result<ParseSummary, ParseError>,
    pub symbols: SymbolTable,
    pub logger: Arc<MemoryLogger>,
}

impl EndToEndResult {
    pub fn is_accepted(&self) -> bool {
        self.result.is_ok()
    }

    pub fn error(&self) -> &ParseError {
        match &self.result {
            Err(err) => err,
            Ok(summary) => panic!("program was accepted: {summary:?}"),
        }
    }
}

/// Parse a program end-to-end with default options.
pub fn parse_program_end_to_end(input: &str) -> EndToEndResult {
    parse_program_with_options(input, ParserOptions::default())
}

/// Parse a program end-to-end with explicit options.
pub fn parse_program_with_options(
    input: &str,
    options: ParserOptions,
) -> EndToEndResult {
    let logger = Arc::new(MemoryLogger::new());
    let mut symbols = SymbolTable::new();
    let lexer = Lexer::default_for_input(input, logger.clone());
    let result =
        QueryParser::with_options(lexer, &mut symbols, logger.clone(), options)
            .parse();
    EndToEndResult {
        result,
        symbols,
        logger,
    }
}

/// Scan `input` to completion, returning tokens (EOF included) and the
/// logger that collected lexical diagnostics.
pub fn scan_tokens(input: &str) -> (Vec<Token>, Arc<MemoryLogger>) {
    let logger = Arc::new(MemoryLogger::new());
    let tokens = Lexer::tokenize(input, logger.clone()).collect();
    (tokens, logger)
}

pub fn token_kinds(input: &str) -> Vec<TokenKind> {
    scan_tokens(input).0.iter().map(Token::kind).collect()
}

pub fn load_fixture(path: &str) -> String {
    fs::read_to_string(format!("tests/fixtures/programs/{path}"))
        .unwrap_or_else(|_| panic!("Failed to load fixture: {path}"))
}

/// Assert that two independent runs over `input` end in the same state.
pub fn assert_deterministic(input: &str) {
    let first = parse_program_end_to_end(input);
    let second = parse_program_end_to_end(input);
    assert_eq!(first.result, second.result);
    assert_eq!(first.symbols, second.symbols);
    assert_eq!(first.logger.entries(), second.logger.entries());
}
