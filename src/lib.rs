#![deny(clippy::expect_used)] // using deny so that test code can use it
#![deny(clippy::style)]
#![deny(clippy::unwrap_used)] // using deny so that test code can use it
#![deny(unsafe_code)]
#![forbid(clippy::allow_attributes)]
#![deny(clippy::pedantic)]
#![forbid(clippy::complexity)]
#![forbid(clippy::correctness)]
#![forbid(clippy::perf)]
#![forbid(clippy::suspicious)]
#![forbid(future_incompatible)]

pub mod core;

pub use crate::core::check_source;
pub use crate::core::logging::{Logger, MemoryLogger, TracingLogger};
pub use crate::core::parser::{ParseError, ParserOptions, QueryParser};
pub use crate::core::scanner::{Lexer, Token, TokenKind};
pub use crate::core::semantic_analyzer::SymbolTable;
