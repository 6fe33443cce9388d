#[cfg(test)]
mod scanner_tests {
    use pretty_assertions::assert_eq;

    use rox::error::LoxError;
    use rox::scanner::*;
    use rox::token::*;

    fn assert_token_sequence(source: &str, expected: &[(TokenType, &str)]) {
        let tokens: Vec<Token> = scan(source).filter_map(Result::ok).collect();

        assert_eq!(tokens.len(), expected.len());

        for (actual, (expected_type, expected_lexeme)) in tokens.iter().zip(expected.iter()) {
            assert_eq!(actual.token_type, *expected_type);
            assert_eq!(actual.lexeme, *expected_lexeme);
        }
    }

    #[test]
    fn test_scanner_01_symbols() {
        assert_token_sequence(
            "({*.,+*})",
            &[
                (TokenType::LEFT_PAREN, "("),
                (TokenType::LEFT_BRACE, "{"),
                (TokenType::STAR, "*"),
                (TokenType::DOT, "."),
                (TokenType::COMMA, ","),
                (TokenType::PLUS, "+"),
                (TokenType::STAR, "*"),
                (TokenType::RIGHT_BRACE, "}"),
                (TokenType::RIGHT_PAREN, ")"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_scanner_02_one_or_two_char_operators() {
        assert_token_sequence(
            "! != = == < <= > >= /",
            &[
                (TokenType::BANG, "!"),
                (TokenType::BANG_EQUAL, "!="),
                (TokenType::EQUAL, "="),
                (TokenType::EQUAL_EQUAL, "=="),
                (TokenType::LESS, "<"),
                (TokenType::LESS_EQUAL, "<="),
                (TokenType::GREATER, ">"),
                (TokenType::GREATER_EQUAL, ">="),
                (TokenType::SLASH, "/"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_scanner_03_keywords_and_identifiers() {
        assert_token_sequence(
            "var _x fun funky while andy and nil",
            &[
                (TokenType::VAR, "var"),
                (TokenType::IDENTIFIER, "_x"),
                (TokenType::FUN, "fun"),
                (TokenType::IDENTIFIER, "funky"),
                (TokenType::WHILE, "while"),
                (TokenType::IDENTIFIER, "andy"),
                (TokenType::AND, "and"),
                (TokenType::NIL, "nil"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_comment_produces_no_token() {
        assert_token_sequence(
            "// comment\n1;",
            &[
                (TokenType::NUMBER, "1"),
                (TokenType::SEMICOLON, ";"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_offsets_point_at_lexeme_start() {
        let source = "var answer = 42;\nprint \"hi\";";
        let tokens: Vec<Token> = scan(source).filter_map(Result::ok).collect();

        for token in &tokens {
            assert_eq!(&source[token.offset..token.offset + token.lexeme.len()], token.lexeme);
        }

        assert_eq!(tokens.last().map(|t| t.offset), Some(source.len()));
    }

    #[test]
    fn test_number_literals() {
        let tokens: Vec<Token> = scan("123 45.67 8.").filter_map(Result::ok).collect();

        assert_eq!(tokens[0].literal, Some(LiteralValue::Number(123.0)));
        assert_eq!(tokens[1].literal, Some(LiteralValue::Number(45.67)));

        // A trailing dot is not part of the number.
        assert_eq!(tokens[2].lexeme, "8");
        assert_eq!(tokens[3].token_type, TokenType::DOT);
    }

    #[test]
    fn test_leading_dot_is_not_a_number() {
        assert_token_sequence(
            ".5",
            &[
                (TokenType::DOT, "."),
                (TokenType::NUMBER, "5"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_string_literal_spans_lines() {
        let tokens: Vec<Token> = scan("\"a\nb\"").filter_map(Result::ok).collect();

        assert_eq!(tokens[0].token_type, TokenType::STRING);
        assert_eq!(tokens[0].lexeme, "\"a\nb\"");
        assert_eq!(tokens[0].literal, Some(LiteralValue::Str("a\nb".into())));
    }

    #[test]
    fn test_unterminated_string_reports_start() {
        let results: Vec<_> = scan("1 \"never closed").collect();

        assert_eq!(results.len(), 3);
        assert!(matches!(
            &results[1],
            Err(LoxError::Lex { message, offset: 2 }) if message == "Unterminated string."
        ));
        assert!(matches!(&results[2], Ok(t) if t.token_type == TokenType::EOF));
    }

    #[test]
    fn test_unexpected_chars_token_sequence() {
        let results: Vec<_> = scan(",.$(#").collect();

        // COMMA, DOT, error '$', LEFT_PAREN, error '#', EOF
        assert_eq!(results.len(), 6, "Expected 6 items in result");

        assert_token_matches(&results[0], TokenType::COMMA, ",");
        assert_token_matches(&results[1], TokenType::DOT, ".");
        assert_token_matches(&results[3], TokenType::LEFT_PAREN, "(");
        assert_token_matches(&results[5], TokenType::EOF, "");

        let errors: Vec<&LoxError> = results.iter().filter_map(|r| r.as_ref().err()).collect();
        assert_eq!(errors.len(), 2, "Expected 2 error messages");

        assert_eq!(errors[0].offset(), Some(2));
        assert_eq!(errors[1].offset(), Some(4));

        for err in errors {
            assert_eq!(err.to_string(), "Unexpected character.");
        }

        fn assert_token_matches(
            result: &Result<Token, LoxError>,
            expected_type: TokenType,
            expected_lexeme: &str,
        ) {
            match result {
                Ok(token) => {
                    assert_eq!(token.token_type, expected_type);
                    assert_eq!(token.lexeme, expected_lexeme);
                }
                Err(e) => panic!("Expected token but got error: {}", e),
            }
        }
    }

    #[test]
    fn test_multibyte_character_is_one_error() {
        let (tokens, errors) = scan_all("é 1");

        assert_eq!(errors.len(), 1);
        assert_eq!(tokens[0].lexeme, "1");
        assert_eq!(tokens[0].offset, 3);
    }

    #[test]
    fn test_scan_is_repeatable() {
        let source = "fun f(a) { return a * 2; } print f(3);";

        let (first, _) = scan_all(source);
        let (second, _) = scan_all(source);

        assert_eq!(first, second);
    }

    #[test]
    fn test_token_display() {
        let tokens: Vec<Token> = scan("3 2.5 \"s\" x").filter_map(Result::ok).collect();
        let shown: Vec<String> = tokens.iter().map(ToString::to_string).collect();

        assert_eq!(
            shown,
            vec![
                "NUMBER 3 3.0",
                "NUMBER 2.5 2.5",
                "STRING \"s\" s",
                "IDENTIFIER x null",
                "EOF  null",
            ]
        );
    }
}
