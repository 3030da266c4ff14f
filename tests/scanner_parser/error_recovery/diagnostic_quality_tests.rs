//! Diagnostic Quality Tests
//!
//! The parser stops at the first violation. These tests pin down the
//! message, position and logging of that one error.

use query_builder_rs::core::parser::config::ParseError;
use query_builder_rs::core::scanner::tokens::TokenKind;
use query_builder_rs::core::semantic_analyzer::symbol_table::SymbolError;

use crate::scanner_parser::{load_fixture, parse_program_end_to_end};

#[test]
fn missing_end_before_relationships() {
    let result = parse_program_end_to_end(
        "def tables T { id: int; } def relationships end T.select(id);",
    );
    let err = result.error();
    assert_eq!(
        err.to_string(),
        "Syntax Error! expected token EndKeyword but found DefKeyword on line 1 and column 28"
    );
    assert_eq!(result.logger.errors(), vec![err.to_string()]);
    assert!(result.logger.infos().is_empty());
}

#[test]
fn missing_end_fixture_reports_line() {
    let result = parse_program_end_to_end(&load_fixture("invalid/missing_end.qb"));
    assert_eq!(
        result.error().to_string(),
        "Syntax Error! expected token EndKeyword but found DefKeyword on line 3 and column 2"
    );
}

#[test]
fn undefined_column_fixture() {
    let result =
        parse_program_end_to_end(&load_fixture("invalid/undefined_column.qb"));
    assert_eq!(
        result.error(),
        &ParseError::Symbol {
            error: SymbolError::ColumnNotFound {
                table: "users".into(),
                column: "email".into(),
            },
            line: 6,
            column: 27,
        }
    );
}

#[test]
fn first_error_wins() {
    let result = parse_program_end_to_end(
        "def tables T { id: int } end def relationships end T.select(;",
    );
    match result.error() {
        ParseError::UnexpectedToken {
            expected, found, ..
        } => {
            assert_eq!(*expected, TokenKind::Semicolon);
            assert_eq!(*found, TokenKind::RightBrace);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(result.logger.errors().len(), 1);
}

#[test]
fn premature_end_of_input() {
    let result = parse_program_end_to_end("def tables T { id: int;");
    match result.error() {
        ParseError::UnexpectedToken { found, lexeme, .. } => {
            assert_eq!(*found, TokenKind::EOF);
            assert_eq!(lexeme, "\0");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn registry_keeps_partial_state_after_failure() {
    let result = parse_program_end_to_end(
        "def tables A { x: int; } B { y: } end def relationships end",
    );
    assert!(!result.is_accepted());
    assert!(result.symbols.contains_table("A"));
    assert!(result.symbols.contains_table("B"));
    assert!(result.symbols.columns("B").expect("B").is_empty());
}
