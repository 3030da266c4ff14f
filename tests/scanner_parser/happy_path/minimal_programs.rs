//! Minimal Program Tests
//!
//! Smallest programs the grammar accepts, and the expression chain.

use crate::scanner_parser::parse_program_end_to_end;

#[test]
fn select_only_program() {
    let result = parse_program_end_to_end(
        "def tables T { id: int; } end def relationships end T.select(id);",
    );
    let summary = result.result.expect("program should be accepted");
    assert_eq!(summary.tables, 1);
    assert_eq!(summary.relationships, 0);
    assert_eq!(summary.queries, 1);
    assert!(result.logger.errors().is_empty());
}

#[test]
fn where_clause_exercises_full_expression_chain() {
    let result = parse_program_end_to_end(
        "def tables T { id: int; } end def relationships end \
         T.select(id).where(id = 1 && id < 10);",
    );
    assert!(result.is_accepted(), "{:?}", result.result);
}

#[test]
fn program_without_queries() {
    let result =
        parse_program_end_to_end("def tables T { } end def relationships end");
    assert_eq!(result.result.expect("accepted").queries, 0);
    assert!(result.symbols.contains_table("T"));
}

#[test]
fn whitespace_and_newlines_are_insignificant() {
    let result = parse_program_end_to_end(
        "def\ntables\n\tT\n{\n  id\n:\nint\n;\n}\nend\ndef relationships end\n\
         T\n.\nselect\n(\nid\n)\n;\n",
    );
    assert!(result.is_accepted(), "{:?}", result.result);
}

#[test]
fn acceptance_is_logged_once() {
    let result = parse_program_end_to_end(
        "def tables A { x: int; } B { y: int; } end \
         def relationships A.one(B); end A.select(x); B.select(y);",
    );
    assert_eq!(
        result.logger.infos(),
        vec!["Parse succeeded: 2 tables, 1 relationships, 2 queries"]
    );
}
