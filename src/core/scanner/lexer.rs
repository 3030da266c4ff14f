//! Tokenize source text into a lazily produced stream of tokens.
//!
//! Input is read through a `CharacterStream`, the position cursor: it
//! hands out one character at a time, offers a single character of
//! lookahead, and returns the `SENTINEL` forever once input runs out. The
//! lexer delegates token boundaries to an ordered set of
//! `TokenRecognizer`s; the first recognizer that can handle the current
//! character wins. `Lexer::next_token` produces exactly one token per call.
//!
//! Error recovery: lexical problems never stop the scan. A malformed `&&`
//! or `||`, an unterminated string, or a character no recognizer accepts is
//! reported to the injected `Logger` as a `LexError`, the partial lexeme is
//! dropped, and scanning resumes with the next character. No token is
//! emitted for the failed attempt.
//!
//! Token positions use the cursor *after* the token was built: the line is
//! reported 1-based and the column is the cursor column minus one (clamped
//! at zero), i.e. the column of the token's last character.
//!
//! ## Examples
//! ```
//! # use std::sync::Arc;
//! # use query_builder_rs::core::logging::MemoryLogger;
//! # use query_builder_rs::core::scanner::{Lexer, TokenKind};
//! let logger = Arc::new(MemoryLogger::new());
//! let kinds: Vec<_> = Lexer::tokenize("T.select(id);", logger)
//!     .map(|t| t.kind())
//!     .collect();
//! assert_eq!(kinds.first(), Some(&TokenKind::Identifier));
//! assert_eq!(kinds.last(), Some(&TokenKind::EOF));
//! ```

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::core::logging::Logger;
use crate::core::scanner::tokens::{
    EOF_LEXEME, SENTINEL, Token, TokenKind, keyword_kind,
};

/// Cursor location inside the input.
///
/// `line` is 0-based and grows by one per newline consumed; `column` counts
/// characters consumed on the current line and resets to 0 after a newline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    /// Create a position from a 0-based line and a column.
    #[must_use]
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    /// Line printed on tokens and diagnostics (1-based).
    #[must_use]
    pub fn reported_line(&self) -> u32 {
        self.line + 1
    }

    /// Column printed on tokens: one back from the cursor, never negative.
    #[must_use]
    pub fn token_column(&self) -> u32 {
        self.column.saturating_sub(1)
    }
}

/// Recoverable lexical diagnostic.
///
/// These are logged by the lexer and never abort scanning.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    /// The second half of `&&` or `||` did not match the first.
    #[error(
        "Expected {expected} but {} was found, line: {line} and column: {column}",
        .found.escape_default()
    )]
    CharacterMismatch {
        expected: char,
        found: char,
        line: u32,
        column: u32,
    },

    /// No recognizer accepts the character.
    #[error(
        "Invalid character {} in line: {line} and column: {column}",
        .character.escape_default()
    )]
    InvalidCharacter { character: char, line: u32, column: u32 },
}

impl LexError {
    fn mismatch(expected: char, found: char, at: Position) -> Self {
        Self::CharacterMismatch {
            expected,
            found,
            line: at.reported_line(),
            column: at.column,
        }
    }
}

/// Navigate characters with position tracking.
///
/// `peek()` inspects the next character without consuming it; `advance()`
/// consumes and returns it. Both return `SENTINEL` at end of input, and
/// advancing past the end is a no-op. Implementations must keep `position`
/// consistent with the characters consumed so far.
pub trait CharacterStream: fmt::Debug + Send {
    /// Returns the next character, or `SENTINEL` at end of input.
    fn peek(&self) -> char;

    /// Consumes and returns the next character, or `SENTINEL` at end.
    fn advance(&mut self) -> char;

    /// Returns the cursor position after the characters consumed so far.
    fn position(&self) -> Position;
}

/// Provide a `CharacterStream` over a UTF-8 `&str`.
///
/// ## Examples
/// ```
/// # use query_builder_rs::core::scanner::{CharacterStream, StringCharacterStream};
/// let mut s = StringCharacterStream::new("a\nb");
/// assert_eq!(s.advance(), 'a');
/// assert_eq!(s.advance(), '\n');
/// assert_eq!(s.position().line, 1);
/// assert_eq!(s.position().column, 0);
/// assert_eq!(s.peek(), 'b');
/// ```
#[derive(Debug, Clone)]
pub struct StringCharacterStream {
    // Pre-collected Unicode scalar values.
    chars: Vec<char>,
    // Index of the next character to hand out.
    offset: usize,
    position: Position,
}

impl StringCharacterStream {
    /// Creates a stream over `input`.
    #[must_use]
    pub fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            offset: 0,
            position: Position::default(),
        }
    }
}

impl CharacterStream for StringCharacterStream {
    fn peek(&self) -> char {
        self.chars.get(self.offset).copied().unwrap_or(SENTINEL)
    }

    fn advance(&mut self) -> char {
        let Some(&ch) = self.chars.get(self.offset) else {
            return SENTINEL;
        };
        self.offset += 1;
        if ch == '\n' {
            self.position.line += 1;
            self.position.column = 0;
        } else {
            self.position.column += 1;
        }
        ch
    }

    fn position(&self) -> Position {
        self.position
    }
}

/// Kind and text produced by a successful recognizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recognized {
    pub kind: TokenKind,
    pub lexeme: String,
}

impl Recognized {
    fn new(kind: TokenKind, lexeme: impl Into<String>) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
        }
    }
}

/// Recognize one lexical family at the current position.
///
/// `can_handle` must not advance the stream. `consume` advances exactly
/// over the characters it accepts; on error it may leave characters it
/// peeked at unconsumed so the lexer resumes from them.
///
/// ## Errors
/// `consume` returns a `LexError` when the input starts like this family
/// but is malformed.
pub trait TokenRecognizer: fmt::Debug + Send + Sync {
    /// Returns `true` if a token of this family starts at the cursor.
    fn can_handle(&self, input: &dyn CharacterStream) -> bool;

    /// Consumes a complete token and returns its kind and lexeme.
    ///
    /// # Errors
    /// Returns `LexError` if the input is malformed for this recognizer.
    fn consume(
        &self,
        input: &mut dyn CharacterStream,
    ) -> Result<Recognized, LexError>;
}

/// Return the default recognizers in priority order.
#[must_use]
pub fn default_recognizers() -> Vec<Box<dyn TokenRecognizer>> {
    vec![
        Box::new(IdentifierRecognizer),
        Box::new(NumberLiteralRecognizer),
        Box::new(PunctuationRecognizer),
        Box::new(RelationalOperatorRecognizer),
        Box::new(StringLiteralRecognizer),
        Box::new(LogicalOperatorRecognizer),
    ]
}

/// Recognize identifiers and keywords.
///
/// A word starts with a letter and continues greedily over letters and
/// digits. The finished word is looked up in the keyword table; anything
/// not found there is an `Identifier`. Underscores are not word characters.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdentifierRecognizer;

impl TokenRecognizer for IdentifierRecognizer {
    fn can_handle(&self, input: &dyn CharacterStream) -> bool {
        input.peek().is_alphabetic()
    }

    fn consume(
        &self,
        input: &mut dyn CharacterStream,
    ) -> Result<Recognized, LexError> {
        let mut word = String::new();
        while input.peek().is_alphanumeric() {
            word.push(input.advance());
        }
        let kind = keyword_kind(&word).unwrap_or(TokenKind::Identifier);
        Ok(Recognized::new(kind, word))
    }
}

/// Recognize integer and floating-point constants.
///
/// `D+` is an `IntConstant`. A dot right after the digits is always
/// consumed and turns the token into a `FloatConstant`, even when no
/// digits follow it (`7.` is a float).
#[derive(Debug, Default, Clone, Copy)]
pub struct NumberLiteralRecognizer;

impl NumberLiteralRecognizer {
    fn consume_digits(input: &mut dyn CharacterStream, number: &mut String) {
        while input.peek().is_ascii_digit() {
            number.push(input.advance());
        }
    }
}

impl TokenRecognizer for NumberLiteralRecognizer {
    fn can_handle(&self, input: &dyn CharacterStream) -> bool {
        input.peek().is_ascii_digit()
    }

    fn consume(
        &self,
        input: &mut dyn CharacterStream,
    ) -> Result<Recognized, LexError> {
        let mut number = String::new();
        Self::consume_digits(input, &mut number);

        if input.peek() != '.' {
            return Ok(Recognized::new(TokenKind::IntConstant, number));
        }

        number.push(input.advance());
        Self::consume_digits(input, &mut number);
        Ok(Recognized::new(TokenKind::FloatConstant, number))
    }
}

/// Recognize single-character operators and punctuation.
#[derive(Debug, Default, Clone, Copy)]
pub struct PunctuationRecognizer;

impl PunctuationRecognizer {
    fn kind_of(ch: char) -> Option<TokenKind> {
        let kind = match ch {
            '/' => TokenKind::Division,
            ':' => TokenKind::Colon,
            ';' => TokenKind::Semicolon,
            '(' => TokenKind::LeftParens,
            ')' => TokenKind::RightParens,
            '{' => TokenKind::LeftBrace,
            '}' => TokenKind::RightBrace,
            '[' => TokenKind::LeftBracket,
            ']' => TokenKind::RightBracket,
            ',' => TokenKind::Comma,
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Multiplication,
            '=' => TokenKind::Equal,
            '.' => TokenKind::Dot,
            _ => return None,
        };
        Some(kind)
    }
}

impl TokenRecognizer for PunctuationRecognizer {
    fn can_handle(&self, input: &dyn CharacterStream) -> bool {
        Self::kind_of(input.peek()).is_some()
    }

    fn consume(
        &self,
        input: &mut dyn CharacterStream,
    ) -> Result<Recognized, LexError> {
        let ch = input.advance();
        match Self::kind_of(ch) {
            Some(kind) => Ok(Recognized::new(kind, ch.to_string())),
            None => Err(LexError::InvalidCharacter {
                character: ch,
                line: input.position().reported_line(),
                column: input.position().column,
            }),
        }
    }
}

/// Recognize `<`, `<=`, `>` and `>=`.
///
/// The character after `<` or `>` is only consumed when it is `=`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RelationalOperatorRecognizer;

impl TokenRecognizer for RelationalOperatorRecognizer {
    fn can_handle(&self, input: &dyn CharacterStream) -> bool {
        matches!(input.peek(), '<' | '>')
    }

    fn consume(
        &self,
        input: &mut dyn CharacterStream,
    ) -> Result<Recognized, LexError> {
        let base = input.advance();
        let or_equal = input.peek() == '=';
        if or_equal {
            input.advance();
        }

        let recognized = match (base, or_equal) {
            ('<', false) => Recognized::new(TokenKind::LessThan, "<"),
            ('<', true) => Recognized::new(TokenKind::LessOrEqualThan, "<="),
            ('>', false) => Recognized::new(TokenKind::GreaterThan, ">"),
            ('>', true) => Recognized::new(TokenKind::GreaterOrEqualThan, ">="),
            (other, _) => {
                return Err(LexError::InvalidCharacter {
                    character: other,
                    line: input.position().reported_line(),
                    column: input.position().column,
                });
            }
        };
        Ok(recognized)
    }
}

/// Recognize single-quoted string literals.
///
/// The lexeme keeps both quotes. There are no escape sequences; the first
/// `'` after the opening one closes the literal.
///
/// ## Errors
/// Returns `InvalidCharacter` for the sentinel if input ends first, at the
/// end-of-input position. Everything up to the end has been consumed by
/// then.
#[derive(Debug, Default, Clone, Copy)]
pub struct StringLiteralRecognizer;

impl TokenRecognizer for StringLiteralRecognizer {
    fn can_handle(&self, input: &dyn CharacterStream) -> bool {
        input.peek() == '\''
    }

    fn consume(
        &self,
        input: &mut dyn CharacterStream,
    ) -> Result<Recognized, LexError> {
        let mut literal = String::new();
        literal.push(input.advance()); // opening quote

        loop {
            match input.advance() {
                '\'' => {
                    literal.push('\'');
                    return Ok(Recognized::new(
                        TokenKind::StringLiteral,
                        literal,
                    ));
                }
                SENTINEL => {
                    let at = input.position();
                    return Err(LexError::InvalidCharacter {
                        character: SENTINEL,
                        line: at.reported_line(),
                        column: at.column,
                    });
                }
                ch => literal.push(ch),
            }
        }
    }
}

/// Recognize `&&` and `||`.
///
/// ## Errors
/// Returns `CharacterMismatch` when the second character differs from the
/// first. Only the first character is consumed in that case, so scanning
/// resumes at the mismatching character.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogicalOperatorRecognizer;

impl TokenRecognizer for LogicalOperatorRecognizer {
    fn can_handle(&self, input: &dyn CharacterStream) -> bool {
        matches!(input.peek(), '&' | '|')
    }

    fn consume(
        &self,
        input: &mut dyn CharacterStream,
    ) -> Result<Recognized, LexError> {
        let first = input.advance();
        let second = input.peek();
        if second != first {
            return Err(LexError::mismatch(first, second, input.position()));
        }
        input.advance();

        let kind = if first == '&' {
            TokenKind::LogicalAnd
        } else {
            TokenKind::LogicalOr
        };
        Ok(Recognized::new(kind, format!("{first}{second}")))
    }
}

/// The scanner: pull tokens out of a character stream one at a time.
#[derive(Debug)]
pub struct Lexer {
    input: Box<dyn CharacterStream>,
    // Checked in order; the first that can handle the cursor wins.
    recognizers: Vec<Box<dyn TokenRecognizer>>,
    logger: Arc<dyn Logger>,
}

impl Lexer {
    /// Create a lexer from a stream, recognizer list and diagnostic sink.
    #[must_use]
    pub fn new(
        input: Box<dyn CharacterStream>,
        recognizers: Vec<Box<dyn TokenRecognizer>>,
        logger: Arc<dyn Logger>,
    ) -> Self {
        Self {
            input,
            recognizers,
            logger,
        }
    }

    /// Create a lexer for `source` with the default recognizers.
    #[must_use]
    pub fn default_for_input(source: &str, logger: Arc<dyn Logger>) -> Self {
        Self::new(
            Box::new(StringCharacterStream::new(source)),
            default_recognizers(),
            logger,
        )
    }

    /// Produce the next token.
    ///
    /// Whitespace is skipped first. Lexical errors are logged and skipped.
    /// Once input is exhausted every call returns the same `EOF` token.
    pub fn next_token(&mut self) -> Token {
        loop {
            while self.input.peek().is_whitespace() {
                self.input.advance();
            }

            if self.input.peek() == SENTINEL {
                return self.build_token(TokenKind::EOF, EOF_LEXEME.to_string());
            }

            let recognizer = self
                .recognizers
                .iter()
                .find(|r| r.can_handle(&*self.input));

            match recognizer {
                Some(recognizer) => {
                    match recognizer.consume(&mut *self.input) {
                        Ok(Recognized { kind, lexeme }) => {
                            return self.build_token(kind, lexeme);
                        }
                        Err(err) => self.report(&err),
                    }
                }
                None => {
                    let character = self.input.advance();
                    let at = self.input.position();
                    self.report(&LexError::InvalidCharacter {
                        character,
                        line: at.reported_line(),
                        column: at.column,
                    });
                }
            }
        }
    }

    /// Current cursor position.
    #[must_use]
    pub fn position(&self) -> Position {
        self.input.position()
    }

    fn build_token(&self, kind: TokenKind, lexeme: String) -> Token {
        let at = self.input.position();
        let token =
            Token::new(kind, lexeme, at.reported_line(), at.token_column());
        tracing::trace!(
            kind = %token.kind(),
            lexeme = %token.lexeme().escape_default(),
            line = token.line(),
            column = token.column(),
            "token"
        );
        token
    }

    fn report(&self, err: &LexError) {
        tracing::debug!(error = %err, "recovering from lexical error");
        self.logger.error(&err.to_string());
    }
}

/// Iterate over tokens produced by a `Lexer`.
///
/// Yields every token up to and including the first `EOF`, then stops.
#[derive(Debug)]
pub struct LexerIterator {
    lexer: Lexer,
    finished: bool,
}

impl LexerIterator {
    /// Create an iterator from a lexer.
    #[must_use]
    pub fn new(lexer: Lexer) -> Self {
        Self {
            lexer,
            finished: false,
        }
    }
}

impl Iterator for LexerIterator {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let token = self.lexer.next_token();
        if token.is(TokenKind::EOF) {
            self.finished = true;
        }
        Some(token)
    }
}

impl Lexer {
    /// Return an iterator that tokenizes `source`.
    #[must_use]
    pub fn tokenize(source: &str, logger: Arc<dyn Logger>) -> LexerIterator {
        LexerIterator::new(Self::default_for_input(source, logger))
    }
}
