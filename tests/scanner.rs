#[cfg(test)]
mod scanner_tests {
    use rlox_tw as lox;

    use lox::error::Phase;
    use lox::scanner::*;
    use lox::token::*;

    fn assert_token_sequence(source: &str, expected: &[(TokenType, &str)]) {
        let scanner = Scanner::new(source);
        let tokens: Vec<_> = scanner.filter_map(Result::ok).collect();

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
    fn test_two_character_operators() {
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
    fn test_keywords_and_identifiers() {
        assert_token_sequence(
            "class fun var_1 _x orchid or this super",
            &[
                (TokenType::CLASS, "class"),
                (TokenType::FUN, "fun"),
                (TokenType::IDENTIFIER, "var_1"),
                (TokenType::IDENTIFIER, "_x"),
                (TokenType::IDENTIFIER, "orchid"),
                (TokenType::OR, "or"),
                (TokenType::THIS, "this"),
                (TokenType::SUPER, "super"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_numbers_keep_trailing_dot_separate() {
        let tokens: Vec<Token> = Scanner::new("12.5 7. .5").filter_map(Result::ok).collect();

        assert!(matches!(tokens[0].token_type, TokenType::NUMBER(n) if n == 12.5));
        assert!(matches!(tokens[1].token_type, TokenType::NUMBER(n) if n == 7.0));
        assert_eq!(tokens[1].lexeme, "7");
        assert_eq!(tokens[2].token_type, TokenType::DOT);
        assert_eq!(tokens[3].token_type, TokenType::DOT);
        assert!(matches!(tokens[4].token_type, TokenType::NUMBER(n) if n == 5.0));
    }

    #[test]
    fn test_comments_and_line_counting() {
        let source = "// leading comment\nvar a; // trailing\n\n\"two\nlines\" a";
        let tokens: Vec<Token> = Scanner::new(source).filter_map(Result::ok).collect();

        assert_eq!(tokens[0].token_type, TokenType::VAR);
        assert_eq!(tokens[0].line, 2);
        assert!(matches!(&tokens[3].token_type, TokenType::STRING(s) if s == "two\nlines"));
        assert_eq!(tokens[3].line, 5);
        assert_eq!(tokens[4].lexeme, "a");
        assert_eq!(tokens[4].line, 5);
        assert_eq!(tokens.last().map(|t| t.line), Some(5));
    }

    #[test]
    fn test_unexpected_chars_token_sequence() {
        let source = ",.$(#";
        let results: Vec<_> = Scanner::new(source).collect();

        // COMMA, DOT, error, LEFT_PAREN, error, EOF
        assert_eq!(results.len(), 6, "Expected 6 items in result");

        assert_token_matches(&results[0], TokenType::COMMA, ",");
        assert_token_matches(&results[1], TokenType::DOT, ".");
        assert_token_matches(&results[3], TokenType::LEFT_PAREN, "(");
        assert_token_matches(&results[5], TokenType::EOF, "");

        let errors: Vec<_> = results.iter().filter_map(|r| r.as_ref().err()).collect();
        assert_eq!(errors.len(), 2, "Expected 2 error messages");

        for err in errors {
            assert_eq!(err.phase, Phase::Lex);
            assert_eq!(err.to_string(), "[line 1] Error: Unexpected character.");
        }

        fn assert_token_matches(
            result: &Result<Token, lox::Diagnostic>,
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
        let (tokens, diagnostics) = scan_tokens("a é b");

        assert_eq!(diagnostics.len(), 1);
        let lexemes: Vec<&str> = tokens.iter().map(|t| t.lexeme.as_str()).collect();
        assert_eq!(lexemes, vec!["a", "b", ""]);
    }

    #[test]
    fn test_unterminated_string() {
        let (tokens, diagnostics) = scan_tokens("print \"oops\n");

        assert_eq!(tokens.len(), 2); // PRINT, EOF
        let messages: Vec<String> = diagnostics.iter().map(|d| d.to_string()).collect();
        assert_eq!(messages, vec!["[line 2] Error: Unterminated string."]);
    }

    #[test]
    fn test_token_display() {
        let tokens: Vec<Token> = Scanner::new("42 3.5 \"hi\" x")
            .filter_map(Result::ok)
            .collect();
        let shown: Vec<String> = tokens.iter().map(|t| t.to_string()).collect();

        assert_eq!(
            shown,
            vec![
                "NUMBER 42 42.0",
                "NUMBER 3.5 3.5",
                "STRING \"hi\" hi",
                "IDENTIFIER x null",
                "EOF  null",
            ]
        );
    }

    #[test]
    fn test_rescanning_lexemes_is_stable() {
        let source = "fun add(a, b) { return a + b * 2.5; }\nprint add(1, 2) >= 3 and !nil;";
        let first: Vec<Token> = Scanner::new(source).filter_map(Result::ok).collect();

        let rebuilt: String = first
            .iter()
            .map(|t| t.lexeme.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        let second: Vec<Token> = Scanner::new(&rebuilt).filter_map(Result::ok).collect();

        let kinds = |tokens: &[Token]| -> Vec<(String, String)> {
            tokens
                .iter()
                .map(|t| (t.token_type.name().to_string(), t.lexeme.clone()))
                .collect()
        };
        assert_eq!(kinds(&first), kinds(&second));
    }

    #[test]
    fn test_iterator_is_fused() {
        let mut scanner = Scanner::new("");
        assert!(matches!(scanner.next(), Some(Ok(ref t)) if t.token_type == TokenType::EOF));
        assert!(scanner.next().is_none());
        assert!(scanner.next().is_none());
    }
}
