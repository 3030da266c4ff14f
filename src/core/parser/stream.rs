//! Feed tokens to the parser one at a time.
//!
//! The parser only ever asks for the next token; it keeps its own single
//! token of lookahead and never backtracks. `TokenStream` captures exactly
//! that. The scanner implements it directly, so a parse pulls tokens lazily
//! from source text. `VectorTokenStream` replays a prepared list of tokens,
//! which is handy when a test wants to drive the grammar without going
//! through the scanner.
//!
//! Like the scanner, a stream keeps answering with `EOF` after it runs dry.
//!
//! ## Examples
//! ```
//! # use query_builder_rs::core::parser::stream::{TokenStream, VectorTokenStream};
//! # use query_builder_rs::core::scanner::{Token, TokenKind};
//! let mut s = VectorTokenStream::new(vec![
//!     Token::new(TokenKind::DefKeyword, "def", 1, 2),
//! ]);
//! assert_eq!(s.next_token().kind(), TokenKind::DefKeyword);
//! assert_eq!(s.next_token().kind(), TokenKind::EOF);
//! assert_eq!(s.next_token().kind(), TokenKind::EOF);
//! ```

use crate::core::scanner::lexer::Lexer;
use crate::core::scanner::tokens::Token;

/// Pull-based source of tokens.
pub trait TokenStream {
    /// Consume and return the next token; `EOF` once exhausted.
    fn next_token(&mut self) -> Token;
}

impl TokenStream for Lexer {
    fn next_token(&mut self) -> Token {
        Lexer::next_token(self)
    }
}

impl<S: TokenStream + ?Sized> TokenStream for Box<S> {
    fn next_token(&mut self) -> Token {
        (**self).next_token()
    }
}

impl<S: TokenStream + ?Sized> TokenStream for &mut S {
    fn next_token(&mut self) -> Token {
        (**self).next_token()
    }
}

/// A token stream backed by a vector of tokens.
///
/// After the last token has been handed out, every call returns an `EOF`
/// placed at the last token's position (or line 1, column 0 when the
/// vector is empty). An explicit `EOF` in the vector is returned as is.
#[derive(Debug, Clone)]
pub struct VectorTokenStream {
    tokens: Vec<Token>,
    position: usize,
}

impl VectorTokenStream {
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            position: 0,
        }
    }

    fn trailing_eof(&self) -> Token {
        match self.tokens.last() {
            Some(last) => Token::eof(last.line(), last.column()),
            None => Token::eof(1, 0),
        }
    }
}

impl TokenStream for VectorTokenStream {
    fn next_token(&mut self) -> Token {
        match self.tokens.get(self.position) {
            Some(token) => {
                self.position += 1;
                token.clone()
            }
            None => self.trailing_eof(),
        }
    }
}
