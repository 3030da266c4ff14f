//! Grammar productions of the query language.
//!
//! Each file extends `QueryParser` with the productions of one family of
//! constructs from `grammar/v1.md`:
//!
//! - `declarations`: the program skeleton, table definitions with their
//!   columns and types, and relationship declarations.
//! - `queries`: `add`, `update` and `select` queries, argument lists,
//!   JSON objects and the optional `.where(...)` filter.
//! - `expressions`: the operator precedence chain from `||` down to
//!   operands.
//!
//! Productions are plain methods returning `ParseResult`. They decide by
//! looking at the lookahead only and propagate the first error with `?`.
//!
//! ## Examples
//! ```
//! # use std::sync::Arc;
//! # use query_builder_rs::core::logging::MemoryLogger;
//! # use query_builder_rs::core::parser::{ParseError, QueryParser};
//! # use query_builder_rs::core::scanner::{Lexer, TokenKind};
//! # use query_builder_rs::core::semantic_analyzer::SymbolTable;
//! let logger = Arc::new(MemoryLogger::new());
//! let source = "def tables T { id: int; } def relationships end";
//! let lexer = Lexer::default_for_input(source, logger.clone());
//! let mut symbols = SymbolTable::new();
//!
//! let err = QueryParser::new(lexer, &mut symbols, logger).parse().unwrap_err();
//! assert!(matches!(
//!     err,
//!     ParseError::UnexpectedToken {
//!         expected: TokenKind::EndKeyword,
//!         found: TokenKind::DefKeyword,
//!         ..
//!     }
//! ));
//! ```

pub mod declarations;
pub mod expressions;
pub mod queries;
