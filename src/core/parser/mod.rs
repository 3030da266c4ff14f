//! Parser for the query language.
//!
//! `QueryParser` pulls tokens from a `TokenStream`, checks them against the
//! grammar in `grammar/v1.md` and, unless disabled in `ParserOptions`,
//! records declarations in and resolves references against a
//! `SymbolTable`. A parse accepts the whole program or stops at the first
//! `ParseError`.

pub mod components;
pub mod config;
pub mod grammar;
pub mod query_parser;
pub mod stream;

pub use config::{
    AlternativePolicy, ParseError, ParseResult, ParseSummary, ParserOptions,
};
pub use query_parser::QueryParser;
pub use stream::{TokenStream, VectorTokenStream};
