//! Lexical Recovery Tests
//!
//! Malformed characters are reported and skipped; scanning, and therefore
//! parsing, carries on with the next valid token.

use query_builder_rs::core::scanner::tokens::TokenKind;

use crate::scanner_parser::{
    load_fixture, parse_program_end_to_end, scan_tokens, token_kinds,
};

#[test]
fn mixed_stream_across_lines() {
    use TokenKind::*;

    let source = "T.select(id, name).where(id<=2 && name = 'x' || id>3.5);\n\
                  U.add({ [k]: -1 + 2*3/4 });";
    let (tokens, logger) = scan_tokens(source);
    let kinds: Vec<_> = tokens.iter().map(|t| t.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            Identifier, Dot, SelectKeyword, LeftParens, Identifier, Comma,
            Identifier, RightParens, Dot, WhereKeyword, LeftParens, Identifier,
            LessOrEqualThan, IntConstant, LogicalAnd, Identifier, Equal,
            StringLiteral, LogicalOr, Identifier, GreaterThan, FloatConstant,
            RightParens, Semicolon,
            Identifier, Dot, AddKeyword, LeftParens, LeftBrace, LeftBracket,
            Identifier, RightBracket, Colon, Minus, IntConstant, Plus,
            IntConstant, Multiplication, IntConstant, Division, IntConstant,
            RightBrace, RightParens, Semicolon, EOF,
        ]
    );
    assert!(logger.errors().is_empty());

    let second_line = &tokens[24];
    assert_eq!(second_line.lexeme(), "U");
    assert_eq!((second_line.line(), second_line.column()), (2, 0));
    let last = &tokens[tokens.len() - 2];
    assert_eq!((last.line(), last.column()), (2, 26));
}

#[test]
fn keywords_win_over_identifiers() {
    let words = [
        "def", "tables", "end", "primary", "many", "one", "int", "float",
        "string", "bool", "add", "update", "delete", "join", "where", "select",
        "true", "false", "as", "relationships",
    ];
    for word in words {
        let kinds = token_kinds(word);
        assert!(kinds[0].is_keyword(), "{word} scanned as {:?}", kinds[0]);
    }
    assert_eq!(token_kinds("Def")[0], TokenKind::Identifier);
    assert_eq!(token_kinds("tables2")[0], TokenKind::Identifier);
}

#[test]
fn numbers() {
    let (tokens, _) = scan_tokens("42 4.2 42.");
    let described: Vec<_> =
        tokens.iter().map(|t| (t.kind(), t.lexeme().to_string())).collect();
    assert_eq!(
        described,
        vec![
            (TokenKind::IntConstant, "42".to_string()),
            (TokenKind::FloatConstant, "4.2".to_string()),
            (TokenKind::FloatConstant, "42.".to_string()),
            (TokenKind::EOF, "\0".to_string()),
        ]
    );
}

#[test]
fn single_ampersand_is_skipped_not_fatal() {
    let (tokens, logger) = scan_tokens("& id");
    assert_eq!(tokens[0].kind(), TokenKind::Identifier);
    assert_eq!(tokens[0].lexeme(), "id");
    assert!(!tokens.iter().any(|t| t.is(TokenKind::LogicalAnd)));
    assert_eq!(
        logger.errors(),
        vec!["Expected & but   was found, line: 1 and column: 1"]
    );
}

#[test]
fn stray_characters_do_not_stop_the_parse() {
    let result =
        parse_program_end_to_end(&load_fixture("lexical/stray_characters.qb"));
    assert!(result.is_accepted(), "{:?}", result.result);
    assert_eq!(
        result.logger.errors(),
        vec!["Invalid character # in line: 2 and column: 20"]
    );
}

#[test]
fn unterminated_string_ends_input() {
    let (tokens, logger) = scan_tokens("id 'open");
    let kinds: Vec<_> = tokens.iter().map(|t| t.kind()).collect();
    assert_eq!(kinds, vec![TokenKind::Identifier, TokenKind::EOF]);
    assert_eq!(
        logger.errors(),
        vec!["Invalid character \\0 in line: 1 and column: 8"]
    );
}
