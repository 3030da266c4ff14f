//! Fixture-Based Program Tests
//!
//! Programs under `tests/fixtures/programs/valid` must be accepted and
//! leave the expected declarations in the symbol table.

use query_builder_rs::core::semantic_analyzer::symbol_table::{
    Cardinality, DataType,
};

use crate::scanner_parser::{load_fixture, parse_program_end_to_end};

#[test]
fn minimal_fixture() {
    let result = parse_program_end_to_end(&load_fixture("valid/minimal.qb"));
    assert!(result.is_accepted(), "{:?}", result.result);
}

#[test]
fn blog_fixture() {
    let result = parse_program_end_to_end(&load_fixture("valid/blog.qb"));
    let summary = result.result.expect("blog program should be accepted");
    assert_eq!(summary.tables, 2);
    assert_eq!(summary.relationships, 2);
    assert_eq!(summary.queries, 6);

    let symbols = &result.symbols;
    assert_eq!(symbols.table_names().collect::<Vec<_>>(), vec!["users", "posts"]);

    let karma = symbols.column("users", "karma").expect("karma column");
    assert_eq!(karma.data_type, DataType::Float);
    assert!(!karma.primary_key);
    assert_eq!(karma.name.line(), 5);

    let id = symbols.column("posts", "id").expect("id column");
    assert!(id.primary_key);

    let relationships = symbols.relationships();
    assert_eq!(relationships.len(), 2);
    assert_eq!(
        (
            relationships[0].owner.as_str(),
            relationships[0].cardinality,
            relationships[0].target.as_str()
        ),
        ("users", Cardinality::Many, "posts")
    );
    assert_eq!(relationships[1].cardinality, Cardinality::One);
}
