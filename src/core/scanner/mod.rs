//! Scan source text into tokens, one token per request.
//!
//! The scanner is the first stage of the pipeline. It turns raw program
//! text into `Token` values carrying their kind, exact lexeme, 1-based line
//! and 0-based column. Tokens are produced lazily: the parser pulls the next
//! one only when it needs a new lookahead.
//!
//! This module provides the position cursor and lexer (`lexer`) and the
//! token model and keyword table (`tokens`). Common items are re-exported
//! so callers can write
//! `query_builder_rs::core::scanner::{Lexer, Token, TokenKind, ...}`.
//!
//! Whitespace separates tokens and is otherwise ignored. Malformed input is
//! reported to the injected logger and skipped; the scanner itself never
//! fails. Exactly one kind of terminal token exists, `EOF`, and it is
//! returned for every request after input is exhausted.
//!
//! ## Examples
//! ```
//! # use std::sync::Arc;
//! # use query_builder_rs::core::logging::TracingLogger;
//! # use query_builder_rs::core::scanner::{Lexer, TokenKind};
//! let mut lexer = Lexer::default_for_input("def tables", Arc::new(TracingLogger));
//! assert_eq!(lexer.next_token().kind(), TokenKind::DefKeyword);
//! assert_eq!(lexer.next_token().kind(), TokenKind::TablesKeyword);
//! assert_eq!(lexer.next_token().kind(), TokenKind::EOF);
//! ```
pub mod lexer;
pub mod tokens;

pub use lexer::*;
pub use tokens::*;
