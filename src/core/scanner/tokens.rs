//! Lexical token definitions for the table/query definition language.
//!
//! This module declares the closed set of token kinds, the keyword table,
//! and the immutable `Token` value emitted by the scanner.
//!
//! # Model
//! - `TokenKind` enumerates every kind the scanner can produce: keywords,
//!   literals, operators and punctuation, and the end-of-input marker.
//! - `Token` pairs a kind with its exact lexeme and the position where the
//!   scanner finished building it.
//!
//! # Coordinates
//! Lines are 1-based. Columns are 0-based and point at the last character
//! of the token (the cursor column minus one, clamped at zero). Both are
//! what diagnostics print, so they must not be re-based by consumers.
//!
//! # Equality
//! `Token` equality is structural: kind, lexeme and position all take part.
//! Grammar decisions compare `Token::kind()` explicitly.

use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

use compiler_macros::EnumKindName;

/// Character returned by the cursor once input is exhausted.
pub const SENTINEL: char = '\0';

/// Lexeme carried by the end-of-input token.
pub const EOF_LEXEME: &str = "\0";

/// Lexical token kinds recognized by the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumKindName)]
pub enum TokenKind {
    // Keywords
    /// The `def` keyword.
    DefKeyword,
    /// The `tables` keyword.
    TablesKeyword,
    /// The `end` keyword.
    EndKeyword,
    /// The `primary` keyword.
    PrimaryKeyword,
    /// The `many` keyword.
    ManyKeyword,
    /// The `one` keyword.
    OneKeyword,
    /// The `int` keyword.
    IntKeyword,
    /// The `float` keyword.
    FloatKeyword,
    /// The `string` keyword.
    StringKeyword,
    /// The `bool` keyword.
    BoolKeyword,
    /// The `add` keyword.
    AddKeyword,
    /// The `update` keyword.
    UpdateKeyword,
    /// The `delete` keyword.
    DeleteKeyword,
    /// The `join` keyword.
    JoinKeyword,
    /// The `where` keyword.
    WhereKeyword,
    /// The `select` keyword.
    SelectKeyword,
    /// The `true` keyword.
    TrueKeyword,
    /// The `false` keyword.
    FalseKeyword,
    /// The `as` keyword.
    AsKeyword,
    /// The `relationships` keyword.
    RelationshipsKeyword,

    // Literals
    /// A name that is not a keyword.
    Identifier,
    /// A run of digits.
    IntConstant,
    /// Digits, a dot, and optional digits.
    FloatConstant,
    /// A single-quoted string, quotes included.
    StringLiteral,

    // Operators
    /// `/`
    Division,
    /// `<`
    LessThan,
    /// `<=`
    LessOrEqualThan,
    /// `>`
    GreaterThan,
    /// `>=`
    GreaterOrEqualThan,
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Multiplication,
    /// `=`
    Equal,
    /// `&&`
    LogicalAnd,
    /// `||`
    LogicalOr,

    // Punctuation
    /// `:`
    Colon,
    /// `;`
    Semicolon,
    /// `(`
    LeftParens,
    /// `)`
    RightParens,
    /// `{`
    LeftBrace,
    /// `}`
    RightBrace,
    /// `[`
    LeftBracket,
    /// `]`
    RightBracket,
    /// `,`
    Comma,
    /// `.`
    Dot,

    // End of File
    /// End-of-input marker, emitted forever once input is consumed.
    EOF,
}

impl TokenKind {
    /// Returns `true` for the reserved words of the language.
    #[must_use]
    pub fn is_keyword(self) -> bool {
        keywords().values().any(|kind| *kind == self)
    }
}

/// Look up `text` in the keyword table.
///
/// Matching is case-sensitive: `Def` is an identifier.
///
/// ## Examples
/// ```
/// # use query_builder_rs::core::scanner::{keyword_kind, TokenKind};
/// assert_eq!(keyword_kind("where"), Some(TokenKind::WhereKeyword));
/// assert_eq!(keyword_kind("Where"), None);
/// ```
#[must_use]
pub fn keyword_kind(text: &str) -> Option<TokenKind> {
    keywords().get(text).copied()
}

fn keywords() -> &'static HashMap<&'static str, TokenKind> {
    static MAP: OnceLock<HashMap<&'static str, TokenKind>> = OnceLock::new();
    MAP.get_or_init(|| {
        HashMap::from([
            ("def", TokenKind::DefKeyword),
            ("tables", TokenKind::TablesKeyword),
            ("end", TokenKind::EndKeyword),
            ("primary", TokenKind::PrimaryKeyword),
            ("many", TokenKind::ManyKeyword),
            ("one", TokenKind::OneKeyword),
            ("int", TokenKind::IntKeyword),
            ("float", TokenKind::FloatKeyword),
            ("string", TokenKind::StringKeyword),
            ("bool", TokenKind::BoolKeyword),
            ("add", TokenKind::AddKeyword),
            ("update", TokenKind::UpdateKeyword),
            ("delete", TokenKind::DeleteKeyword),
            ("join", TokenKind::JoinKeyword),
            ("where", TokenKind::WhereKeyword),
            ("select", TokenKind::SelectKeyword),
            ("true", TokenKind::TrueKeyword),
            ("false", TokenKind::FalseKeyword),
            ("as", TokenKind::AsKeyword),
            ("relationships", TokenKind::RelationshipsKeyword),
        ])
    })
}

/// A lexical token: kind, exact source text, and position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    kind: TokenKind,
    lexeme: String,
    line: u32,
    column: u32,
}

impl Token {
    /// Constructs a new `Token`.
    ///
    /// # Parameters
    ///
    /// * `kind`: The token kind.
    /// * `lexeme`: The matched source text.
    /// * `line`: 1-based line.
    /// * `column`: 0-based column of the token's last character.
    #[must_use]
    pub fn new(
        kind: TokenKind,
        lexeme: impl Into<String>,
        line: u32,
        column: u32,
    ) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            line,
            column,
        }
    }

    /// Constructs the end-of-input token at the given position.
    #[must_use]
    pub fn eof(line: u32, column: u32) -> Self {
        Self::new(TokenKind::EOF, EOF_LEXEME, line, column)
    }

    /// Returns the token kind.
    #[must_use]
    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// Returns the exact source text of the token.
    #[must_use]
    pub fn lexeme(&self) -> &str {
        &self.lexeme
    }

    /// Returns the 1-based line.
    #[must_use]
    pub fn line(&self) -> u32 {
        self.line
    }

    /// Returns the 0-based column.
    #[must_use]
    pub fn column(&self) -> u32 {
        self.column
    }

    /// Returns `true` when the token has the given kind.
    #[must_use]
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} '{}' (line {}, column {})",
            self.kind,
            self.lexeme.escape_default(),
            self.line,
            self.column
        )
    }
}
