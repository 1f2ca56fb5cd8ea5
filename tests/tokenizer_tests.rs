use std::rc::Rc;

use pyrite::options::OptionsBuilder;
use pyrite::{tokenize, Source, Token};

fn tokens_of(source: &str) -> Vec<Token> {
    let source = Rc::new(Source::new_from_string("<test>", source.to_owned()));
    let options = OptionsBuilder::new().build();
    tokenize(&source, &options)
        .map(|lexed| lexed.expect("lexer error").0)
        .collect()
}

fn lex_error(source: &str) -> String {
    let source = Rc::new(Source::new_from_string("<test>", source.to_owned()));
    let options = OptionsBuilder::new().build();
    for lexed in tokenize(&source, &options) {
        if let Err(err) = lexed {
            return format!("{}", err);
        }
    }
    panic!("expected a lexer error for source");
}

#[test]
fn test_simple_statement_tokens() {
    let tokens = tokens_of("let x = 42;");
    assert_eq!(
        tokens,
        vec![
            Token::Identifier("let".to_owned()),
            Token::Identifier("x".to_owned()),
            Token::Equals,
            Token::NumberLiteral(42.0),
            Token::Semicolon,
            Token::Eof,
        ]
    );
}

#[test]
fn test_stream_ends_with_eof_once() {
    let tokens = tokens_of("a");
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens.last(), Some(&Token::Eof));
}

#[test]
fn test_slash_after_value_is_division() {
    let tokens = tokens_of("a / b");
    assert!(tokens.contains(&Token::Divide));

    let tokens = tokens_of("(a) / 2");
    assert!(tokens.contains(&Token::Divide));
}

#[test]
fn test_slash_in_expression_position_is_regexp() {
    let tokens = tokens_of("x = /ab+c/gi");
    assert!(tokens.iter().any(|token| matches!(
        token,
        Token::RegExpLiteral { pattern, flags } if pattern == "ab+c" && flags == "gi"
    )));

    // After a keyword that expects an expression
    let tokens = tokens_of("return /a/");
    assert!(tokens.iter().any(|token| matches!(token, Token::RegExpLiteral { .. })));

    // After the closing paren of a statement head
    let tokens = tokens_of("if (x) /a/");
    assert!(tokens.iter().any(|token| matches!(token, Token::RegExpLiteral { .. })));
}

#[test]
fn test_regexp_with_class_containing_slash() {
    let tokens = tokens_of("x = /[/]/");
    assert!(tokens.iter().any(|token| matches!(
        token,
        Token::RegExpLiteral { pattern, .. } if pattern == "[/]"
    )));
}

#[test]
fn test_braces_after_function_body_allow_regexp() {
    // The brace closing a function declaration returns to statement position
    let tokens = tokens_of("function f() {} /a/");
    assert!(tokens.iter().any(|token| matches!(token, Token::RegExpLiteral { .. })));

    // The brace closing a function expression does not
    let tokens = tokens_of("x = function f() {} / 2");
    assert!(tokens.contains(&Token::Divide));
}

#[test]
fn test_template_tokens() {
    let tokens = tokens_of("`a${b}c`");
    assert_eq!(
        tokens,
        vec![
            Token::BackQuote,
            Token::TemplateChunk { raw: "a".to_owned(), cooked: Some("a".to_owned()) },
            Token::DollarBrace,
            Token::Identifier("b".to_owned()),
            Token::RightBrace,
            Token::TemplateChunk { raw: "c".to_owned(), cooked: Some("c".to_owned()) },
            Token::BackQuote,
            Token::Eof,
        ]
    );
}

#[test]
fn test_template_with_nested_braces() {
    let tokens = tokens_of("`${ {a: 1} }`");
    let chunk_count = tokens
        .iter()
        .filter(|token| matches!(token, Token::TemplateChunk { .. }))
        .count();
    assert_eq!(chunk_count, 2);
    assert_eq!(tokens.last(), Some(&Token::Eof));
}

#[test]
fn test_template_escape_decoding() {
    let tokens = tokens_of("`a\\n\\u0062`");
    assert!(tokens.iter().any(|token| matches!(
        token,
        Token::TemplateChunk { cooked: Some(cooked), .. } if cooked == "a\nb"
    )));
}

#[test]
fn test_unterminated_template() {
    let message = lex_error("`abc");
    assert!(message.contains("Unterminated template"), "unexpected message: {}", message);
}

#[test]
fn test_string_escapes() {
    let tokens = tokens_of(r#""a\nb\x41B\u{43}""#);
    assert_eq!(tokens[0], Token::StringLiteral("a\nbABC".to_owned()));
}

#[test]
fn test_string_line_continuation() {
    let tokens = tokens_of("\"a\\\nb\"");
    assert_eq!(tokens[0], Token::StringLiteral("ab".to_owned()));
}

#[test]
fn test_unterminated_string() {
    let message = lex_error("\"abc\nd\"");
    assert!(message.contains("Unterminated string"), "unexpected message: {}", message);
}

#[test]
fn test_numeric_literals() {
    assert_eq!(tokens_of("0xFF")[0], Token::NumberLiteral(255.0));
    assert_eq!(tokens_of("0b101")[0], Token::NumberLiteral(5.0));
    assert_eq!(tokens_of("0o17")[0], Token::NumberLiteral(15.0));
    assert_eq!(tokens_of("1.5e2")[0], Token::NumberLiteral(150.0));
    assert_eq!(tokens_of(".25")[0], Token::NumberLiteral(0.25));
    assert_eq!(tokens_of("1_000")[0], Token::NumberLiteral(1000.0));
}

#[test]
fn test_identifier_after_number_is_an_error() {
    let message = lex_error("3in x");
    assert!(
        message.contains("Identifier directly after number"),
        "unexpected message: {}",
        message
    );
}

#[test]
fn test_compound_operators() {
    let tokens = tokens_of("a >>>= b");
    assert!(tokens.contains(&Token::ShiftRightLogicalEq));

    let tokens = tokens_of("a **= b");
    assert!(tokens.contains(&Token::ExponentEq));

    let tokens = tokens_of("a ??= b");
    assert!(tokens.contains(&Token::NullishCoalesceEq));
}

#[test]
fn test_question_dot_vs_conditional() {
    let tokens = tokens_of("a?.b");
    assert!(tokens.contains(&Token::QuestionDot));

    // `?.5` is a conditional with a fractional consequent
    let tokens = tokens_of("x?.5:y");
    assert!(tokens.contains(&Token::Question));
    assert!(tokens.contains(&Token::NumberLiteral(0.5)));
}

#[test]
fn test_comments_are_skipped() {
    let tokens = tokens_of("a // comment\n/* block\ncomment */ b");
    assert_eq!(
        tokens,
        vec![
            Token::Identifier("a".to_owned()),
            Token::Identifier("b".to_owned()),
            Token::Eof,
        ]
    );
}

#[test]
fn test_unterminated_block_comment() {
    let message = lex_error("/* never closed");
    assert!(message.contains("Unterminated comment"), "unexpected message: {}", message);
}

#[test]
fn test_identifiers_with_escapes() {
    let tokens = tokens_of("\\u0061bc");
    assert_eq!(tokens[0], Token::Identifier("abc".to_owned()));

    let tokens = tokens_of("ab\\u{63}");
    assert_eq!(tokens[0], Token::Identifier("abc".to_owned()));
}

#[test]
fn test_unicode_identifiers() {
    let tokens = tokens_of("caf\u{e9} = 1");
    assert_eq!(tokens[0], Token::Identifier("caf\u{e9}".to_owned()));
}

#[test]
fn test_keywords_lex_as_keyword_tokens() {
    let tokens = tokens_of("if else for function class");
    assert_eq!(
        tokens,
        vec![
            Token::If,
            Token::Else,
            Token::For,
            Token::Function,
            Token::Class,
            Token::Eof,
        ]
    );
}

#[test]
fn test_contextual_keywords_lex_as_identifiers() {
    let tokens = tokens_of("async of let static yield await");
    for token in &tokens[..6] {
        assert!(matches!(token, Token::Identifier(_)), "expected identifier, got {:?}", token);
    }
}
