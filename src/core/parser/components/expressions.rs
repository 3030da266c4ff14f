//! Expression parsing with operator precedence.
//!
//! Binding strength from loosest to tightest:
//!
//! | level      | operators            |
//! |------------|----------------------|
//! | `or_expr`  | `\|\|`               |
//! | `and_expr` | `&&`                 |
//! | `eq_expr`  | `=`                  |
//! | `rel_expr` | `<` `>` `<=` `>=`    |
//! | `add_expr` | `+` `-`              |
//! | `mul_expr` | `*` `/`              |
//! | `factor`   | operands, `( ... )`  |
//!
//! Every binary level is left-associative and parsed iteratively: one
//! operand, then `(operator operand)*` while the lookahead is one of the
//! level's operators. Equality is a single `=`. There are no unary
//! operators.

use crate::core::parser::config::{ParseError, ParseResult};
use crate::core::parser::query_parser::QueryParser;
use crate::core::parser::stream::TokenStream;
use crate::core::scanner::tokens::TokenKind;

const FACTOR_START: &[TokenKind] = &[
    TokenKind::LeftParens,
    TokenKind::Identifier,
    TokenKind::IntConstant,
    TokenKind::FloatConstant,
    TokenKind::TrueKeyword,
    TokenKind::FalseKeyword,
    TokenKind::StringLiteral,
];

impl<S: TokenStream> QueryParser<'_, S> {
    pub(crate) fn or_expr(&mut self) -> ParseResult<()> {
        self.left_assoc(&[TokenKind::LogicalOr], Self::and_expr)
    }

    fn and_expr(&mut self) -> ParseResult<()> {
        self.left_assoc(&[TokenKind::LogicalAnd], Self::eq_expr)
    }

    fn eq_expr(&mut self) -> ParseResult<()> {
        self.left_assoc(&[TokenKind::Equal], Self::rel_expr)
    }

    fn rel_expr(&mut self) -> ParseResult<()> {
        self.left_assoc(
            &[
                TokenKind::LessThan,
                TokenKind::GreaterThan,
                TokenKind::LessOrEqualThan,
                TokenKind::GreaterOrEqualThan,
            ],
            Self::add_expr,
        )
    }

    fn add_expr(&mut self) -> ParseResult<()> {
        self.left_assoc(&[TokenKind::Plus, TokenKind::Minus], Self::mul_expr)
    }

    fn mul_expr(&mut self) -> ParseResult<()> {
        self.left_assoc(
            &[TokenKind::Multiplication, TokenKind::Division],
            Self::factor,
        )
    }

    /// `operand (op operand)*` for any `op` in `operators`.
    fn left_assoc(
        &mut self,
        operators: &[TokenKind],
        operand: fn(&mut Self) -> ParseResult<()>,
    ) -> ParseResult<()> {
        operand(self)?;
        while self.at_any(operators) {
            self.advance();
            operand(self)?;
        }
        Ok(())
    }

    pub(crate) fn factor(&mut self) -> ParseResult<()> {
        match self.choose("factor", FACTOR_START)? {
            TokenKind::LeftParens => {
                let open = self.expect(TokenKind::LeftParens)?;
                let limit = self.options.max_expression_depth;
                if self.depth >= limit {
                    return Err(self.fail(ParseError::NestingTooDeep {
                        limit,
                        line: open.line(),
                        column: open.column(),
                    }));
                }

                self.depth += 1;
                let inner = self.or_expr();
                self.depth -= 1;
                inner?;
                self.expect(TokenKind::RightParens)?;
            }
            TokenKind::Identifier => {
                let name = self.expect(TokenKind::Identifier)?;
                self.resolve_column(&name)?;
            }
            literal => {
                self.expect(literal)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![expect(clippy::unwrap_used)]

    use std::sync::Arc;

    use super::super::test_support::{parse, parse_with, with_schema};
    use crate::core::logging::MemoryLogger;
    use crate::core::parser::config::{
        AlternativePolicy, ParseError, ParserOptions,
    };
    use crate::core::parser::query_parser::QueryParser;
    use crate::core::parser::stream::VectorTokenStream;
    use crate::core::scanner::tokens::{Token, TokenKind};
    use crate::core::semantic_analyzer::symbol_table::SymbolTable;

    fn where_clause(expr: &str) -> String {
        with_schema(&format!("T.select(id).where({expr});"))
    }

    #[test]
    fn full_operator_chain() {
        for expr in [
            "id = 1 && id < 10",
            "id <= 2 || id >= 3 && name = 'n'",
            "(id + 1) * 2 - id / 4 > 0",
            "true = false",
            "id = 1.5 || id = 2.",
            "((id))",
        ] {
            let out = parse(&where_clause(expr));
            assert!(out.result.is_ok(), "{expr}: {:?}", out.result);
        }
    }

    #[test]
    fn factor_drives_from_token_stream() {
        let logger = Arc::new(MemoryLogger::new());
        let mut symbols = SymbolTable::new();
        let stream = VectorTokenStream::new(vec![
            Token::new(TokenKind::IntConstant, "1", 1, 0),
            Token::new(TokenKind::Plus, "+", 1, 2),
            Token::new(TokenKind::FloatConstant, "2.5", 1, 6),
            Token::new(TokenKind::Multiplication, "*", 1, 8),
            Token::new(TokenKind::StringLiteral, "'s'", 1, 12),
        ]);
        let options = ParserOptions::default().with_validate_symbols(false);
        let mut parser =
            QueryParser::with_options(stream, &mut symbols, logger.clone(), options);

        parser.or_expr().unwrap();
        assert!(parser.at(TokenKind::EOF));
        assert!(logger.errors().is_empty());
    }

    #[test]
    fn missing_operand_reports_string_literal() {
        let out = parse(&where_clause("id = "));
        assert!(matches!(
            out.result.unwrap_err(),
            ParseError::UnexpectedToken {
                expected: TokenKind::StringLiteral,
                found: TokenKind::RightParens,
                ..
            }
        ));
    }

    #[test]
    fn missing_operand_lists_alternatives_when_asked() {
        let out = parse_with(
            &where_clause("id = ;"),
            ParserOptions::default()
                .with_alternative_policy(AlternativePolicy::ListAlternatives),
        );
        match out.result.unwrap_err() {
            ParseError::NoAlternative {
                rule,
                expected,
                found,
                ..
            } => {
                assert_eq!(rule, "factor");
                assert_eq!(expected.len(), 7);
                assert_eq!(found, TokenKind::Semicolon);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn double_equals_is_not_equality() {
        let out = parse(&where_clause("id == 1"));
        assert!(matches!(
            out.result.unwrap_err(),
            ParseError::UnexpectedToken {
                expected: TokenKind::StringLiteral,
                found: TokenKind::Equal,
                ..
            }
        ));
    }

    #[test]
    fn unbalanced_parens() {
        let out = parse(&where_clause("(id = 1"));
        assert!(matches!(
            out.result.unwrap_err(),
            ParseError::UnexpectedToken {
                expected: TokenKind::RightParens,
                found: TokenKind::Semicolon,
                ..
            }
        ));
    }

    #[test]
    fn unknown_column_in_filter() {
        let out = parse(&where_clause("id = 1 && missing < 10"));
        let err = out.result.unwrap_err();
        assert!(err.to_string().starts_with(
            "missing not found in current context of table T on line 1"
        ));
    }

    #[test]
    fn nesting_limit() {
        let options = ParserOptions::default().with_max_expression_depth(2);

        let ok = parse_with(&where_clause("((id))"), options.clone());
        assert!(ok.result.is_ok());

        let out = parse_with(&where_clause("(((id)))"), options);
        assert!(matches!(
            out.result.unwrap_err(),
            ParseError::NestingTooDeep { limit: 2, .. }
        ));
        assert_eq!(out.logger.errors().len(), 1);
    }

    #[test]
    fn deep_nesting_within_default_limit() {
        let expr = format!("{}id{}", "(".repeat(100), ")".repeat(100));
        assert!(parse(&where_clause(&expr)).result.is_ok());

        let expr = format!("{}id{}", "(".repeat(300), ")".repeat(300));
        assert!(matches!(
            parse(&where_clause(&expr)).result.unwrap_err(),
            ParseError::NestingTooDeep { limit: 256, .. }
        ));
    }
}
