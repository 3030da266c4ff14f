//! Parser Configuration Tests
//!
//! Behavior selected through `ParserOptions`.

use query_builder_rs::core::parser::config::{
    AlternativePolicy, ParseError, ParserOptions,
};
use query_builder_rs::core::scanner::tokens::TokenKind;

use crate::scanner_parser::{load_fixture, parse_program_with_options};

#[test]
fn syntax_only_skips_resolution() {
    let options = ParserOptions::default().with_validate_symbols(false);
    let result = parse_program_with_options(
        &load_fixture("invalid/undefined_column.qb"),
        options,
    );
    assert!(result.is_accepted(), "{:?}", result.result);
    assert_eq!(result.symbols.table_count(), 0);
}

#[test]
fn syntax_only_still_rejects_bad_syntax() {
    let options = ParserOptions::default().with_validate_symbols(false);
    let result =
        parse_program_with_options(&load_fixture("invalid/missing_end.qb"), options);
    assert!(matches!(
        result.error(),
        ParseError::UnexpectedToken {
            expected: TokenKind::EndKeyword,
            ..
        }
    ));
}

#[test]
fn alternative_policies_differ_only_in_reporting() {
    let source = "def tables T { id: int; } end def relationships end \
                  T.select(id).where(id < );";

    let assumed =
        parse_program_with_options(source, ParserOptions::default());
    let listed = parse_program_with_options(
        source,
        ParserOptions::default()
            .with_alternative_policy(AlternativePolicy::ListAlternatives),
    );

    assert!(matches!(
        assumed.error(),
        ParseError::UnexpectedToken {
            expected: TokenKind::StringLiteral,
            found: TokenKind::RightParens,
            ..
        }
    ));
    match listed.error() {
        ParseError::NoAlternative {
            rule, expected, found, ..
        } => {
            assert_eq!(*rule, "factor");
            assert!(expected.contains(&TokenKind::IntConstant));
            assert_eq!(*found, TokenKind::RightParens);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(assumed.error().line(), listed.error().line());
    assert_eq!(assumed.error().column(), listed.error().column());
}

#[test]
fn expression_depth_is_configurable() {
    let source = "def tables T { id: int; } end def relationships end \
                  T.select(id).where(((((id)))) = 1);";

    let shallow = parse_program_with_options(
        source,
        ParserOptions::default().with_max_expression_depth(3),
    );
    assert!(matches!(
        shallow.error(),
        ParseError::NestingTooDeep { limit: 3, .. }
    ));

    let deep = parse_program_with_options(
        source,
        ParserOptions::default().with_max_expression_depth(4),
    );
    assert!(deep.is_accepted(), "{:?}", deep.result);
}
