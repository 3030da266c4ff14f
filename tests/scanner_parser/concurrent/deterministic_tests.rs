//! Deterministic Parsing Tests
//!
//! Each parse owns its symbol table. Running the same program twice, or on
//! several threads at once, must give identical results.

use std::sync::Arc;
use std::thread;

use query_builder_rs::core::check_source;
use query_builder_rs::core::logging::MemoryLogger;

use crate::scanner_parser::{assert_deterministic, load_fixture};

#[test]
fn same_program_twice_gives_equal_registries() {
    assert_deterministic(
        "def tables T { id: int; } end def relationships end T.select(id);",
    );
    assert_deterministic(&load_fixture("valid/blog.qb"));
}

#[test]
fn failing_program_twice_gives_equal_errors() {
    assert_deterministic(&load_fixture("invalid/missing_end.qb"));
    assert_deterministic(&load_fixture("lexical/stray_characters.qb"));
}

#[test]
fn parallel_sessions_do_not_share_state() {
    let source = Arc::new(load_fixture("valid/blog.qb"));
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let source = Arc::clone(&source);
            thread::spawn(move || {
                check_source(&source, Arc::new(MemoryLogger::new()))
                    .expect("blog program should be accepted")
            })
        })
        .collect();

    let tables: Vec<_> = handles
        .into_iter()
        .map(|handle| handle.join().expect("parser thread panicked"))
        .collect();
    for symbols in &tables[1..] {
        assert_eq!(symbols, &tables[0]);
    }
}
