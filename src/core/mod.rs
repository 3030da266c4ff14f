//! Compiler front end for the query language.
//!
//! - `scanner`: characters to tokens, with recoverable lexical diagnostics.
//! - `parser`: tokens to an accepted program or a fatal `ParseError`.
//! - `semantic_analyzer`: the symbol table of tables, columns and
//!   relationships filled and consulted during the parse.
//! - `logging`: the diagnostic sink shared by scanner and parser.
//!
//! `check_source` wires the stages together for the common case.
//!
//! ## Examples
//! ```
//! # use std::sync::Arc;
//! # use query_builder_rs::core::check_source;
//! # use query_builder_rs::core::logging::MemoryLogger;
//! let logger = Arc::new(MemoryLogger::new());
//! let symbols = check_source(
//!     "def tables T { id: int; } end def relationships end T.select(id);",
//!     logger,
//! )
//! .unwrap();
//! assert_eq!(symbols.table_names().collect::<Vec<_>>(), vec!["T"]);
//! ```

pub mod logging;
pub mod parser;
pub mod scanner;
pub mod semantic_analyzer;

use std::sync::Arc;

use crate::core::logging::Logger;
use crate::core::parser::{ParseError, ParserOptions, QueryParser};
use crate::core::scanner::Lexer;
use crate::core::semantic_analyzer::SymbolTable;

/// Scan and parse `source` with default options in a fresh symbol table.
///
/// # Errors
///
/// Returns the first fatal `ParseError`. Lexical diagnostics do not fail
/// the call; they only reach `logger`.
pub fn check_source(
    source: &str,
    logger: Arc<dyn Logger>,
) -> Result<SymbolTable, ParseError> {
    check_source_with(source, logger, ParserOptions::default())
}

/// Like `check_source`, with explicit parser options.
///
/// # Errors
///
/// Returns the first fatal `ParseError`.
pub fn check_source_with(
    source: &str,
    logger: Arc<dyn Logger>,
    options: ParserOptions,
) -> Result<SymbolTable, ParseError> {
    let mut symbols = SymbolTable::new();
    let lexer = Lexer::default_for_input(source, Arc::clone(&logger));
    QueryParser::with_options(lexer, &mut symbols, logger, options).parse()?;
    Ok(symbols)
}
