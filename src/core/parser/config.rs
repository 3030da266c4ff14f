//! Configure the parser and describe how a parse ends.
//!
//! `ParserOptions` holds the knobs callers may turn: whether declarations
//! and references are checked against the symbol table, how a failed choice
//! between alternatives is reported, and how deep parenthesised
//! expressions may nest. `ParseError` is the single fatal failure a parse
//! can produce; `ParseSummary` is what an accepted program reports.
//!
//! A parse stops at the first `ParseError`. There is no recovery and no
//! partial result.
//!
//! ## Examples
//! ```
//! # use query_builder_rs::core::parser::config::*;
//! # use query_builder_rs::core::scanner::TokenKind;
//! let opts = ParserOptions::default()
//!     .with_validate_symbols(false)
//!     .with_alternative_policy(AlternativePolicy::ListAlternatives);
//! assert!(!opts.validate_symbols);
//!
//! let err = ParseError::UnexpectedToken {
//!     expected: TokenKind::EndKeyword,
//!     found: TokenKind::DefKeyword,
//!     lexeme: "def".into(),
//!     line: 1,
//!     column: 30,
//! };
//! assert_eq!(
//!     err.to_string(),
//!     "Syntax Error! expected token EndKeyword but found DefKeyword on line 1 and column 30"
//! );
//! ```

use thiserror::Error;

use crate::core::scanner::tokens::TokenKind;
use crate::core::semantic_analyzer::symbol_table::SymbolError;

/// How a lookahead that matches none of a rule's alternatives is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlternativePolicy {
    /// Take the rule's default branch and report a mismatch against it,
    /// e.g. `expected token StringLiteral` for a bad expression operand.
    #[default]
    AssumeDefault,
    /// Report `ParseError::NoAlternative` listing every accepted kind.
    ListAlternatives,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserOptions {
    /// Register declarations and resolve references in the symbol table.
    pub validate_symbols: bool,
    /// Diagnostic style for rules with several alternatives.
    pub alternative_policy: AlternativePolicy,
    /// Maximum nesting of parenthesised expressions.
    pub max_expression_depth: usize,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            validate_symbols: true,
            alternative_policy: AlternativePolicy::AssumeDefault,
            max_expression_depth: 256,
        }
    }
}

impl ParserOptions {
    #[must_use]
    pub fn with_validate_symbols(mut self, validate: bool) -> Self {
        self.validate_symbols = validate;
        self
    }

    #[must_use]
    pub fn with_alternative_policy(mut self, policy: AlternativePolicy) -> Self {
        self.alternative_policy = policy;
        self
    }

    #[must_use]
    pub fn with_max_expression_depth(mut self, depth: usize) -> Self {
        self.max_expression_depth = depth;
        self
    }
}

/// Counts reported for an accepted program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParseSummary {
    pub tables: usize,
    pub relationships: usize,
    pub queries: usize,
}

/// Fatal error that ends a parse.
///
/// Every variant carries the 1-based line and 0-based column of the token
/// the parser was looking at when it gave up.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The lookahead is not the one token kind the grammar allows here.
    #[error(
        "Syntax Error! expected token {expected} but found {found} on line {line} and column {column}"
    )]
    UnexpectedToken {
        expected: TokenKind,
        found: TokenKind,
        lexeme: String,
        line: u32,
        column: u32,
    },

    /// The lookahead starts none of the alternatives of `rule`.
    #[error(
        "Syntax Error! expected one of {} in {rule} but found {found} on line {line} and column {column}",
        join_kinds(.expected)
    )]
    NoAlternative {
        rule: &'static str,
        expected: Vec<TokenKind>,
        found: TokenKind,
        lexeme: String,
        line: u32,
        column: u32,
    },

    /// Parenthesised expressions nest deeper than the configured limit.
    #[error(
        "Syntax Error! expression nesting exceeds {limit} levels on line {line} and column {column}"
    )]
    NestingTooDeep { limit: usize, line: u32, column: u32 },

    /// A declaration or reference violates the symbol table.
    #[error("{error} on line {line} and column {column}")]
    Symbol {
        #[source]
        error: SymbolError,
        line: u32,
        column: u32,
    },
}

impl ParseError {
    #[must_use]
    pub fn line(&self) -> u32 {
        match self {
            Self::UnexpectedToken { line, .. }
            | Self::NoAlternative { line, .. }
            | Self::NestingTooDeep { line, .. }
            | Self::Symbol { line, .. } => *line,
        }
    }

    #[must_use]
    pub fn column(&self) -> u32 {
        match self {
            Self::UnexpectedToken { column, .. }
            | Self::NoAlternative { column, .. }
            | Self::NestingTooDeep { column, .. }
            | Self::Symbol { column, .. } => *column,
        }
    }
}

fn join_kinds(kinds: &[TokenKind]) -> String {
    kinds
        .iter()
        .map(|kind| kind.name())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result alias used by every grammar production.
pub type ParseResult<T> = Result<T, ParseError>;
