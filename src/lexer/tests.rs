//! Unit tests for the lexer module.
//!
//! Covers keywords, literals, operators, comments, spans and error cases.

use super::{lexer::tokenize, tokens::TokenKind};

#[test]
fn test_tokenize_keywords() {
    let source = "var const fun if else for while continue break return".to_string();
    let tokens = tokenize(source, Some("test.kl".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Var);
    assert_eq!(tokens[1].kind, TokenKind::Const);
    assert_eq!(tokens[2].kind, TokenKind::Fun);
    assert_eq!(tokens[3].kind, TokenKind::If);
    assert_eq!(tokens[4].kind, TokenKind::Else);
    assert_eq!(tokens[5].kind, TokenKind::For);
    assert_eq!(tokens[6].kind, TokenKind::While);
    assert_eq!(tokens[7].kind, TokenKind::Continue);
    assert_eq!(tokens[8].kind, TokenKind::Break);
    assert_eq!(tokens[9].kind, TokenKind::Return);
    assert_eq!(tokens[10].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_else_if() {
    let source = "else if else   if elseif else iffy".to_string();
    let tokens = tokenize(source, Some("test.kl".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::ElseIf);
    assert_eq!(tokens[1].kind, TokenKind::ElseIf);
    assert_eq!(tokens[2].kind, TokenKind::Identifier);
    assert_eq!(tokens[2].value, "elseif");
    assert_eq!(tokens[3].kind, TokenKind::Else);
    assert_eq!(tokens[4].kind, TokenKind::Identifier);
    assert_eq!(tokens[4].value, "iffy");
}

#[test]
fn test_tokenize_types_and_bools() {
    let source = "int float bool string char true false".to_string();
    let tokens = tokenize(source, Some("test.kl".to_string())).unwrap();

    for token in &tokens[0..5] {
        assert_eq!(token.kind, TokenKind::Type);
    }
    assert_eq!(tokens[2].value, "bool");
    assert_eq!(tokens[5].kind, TokenKind::Bool);
    assert_eq!(tokens[5].value, "true");
    assert_eq!(tokens[6].kind, TokenKind::Bool);
    assert_eq!(tokens[6].value, "false");
}

#[test]
fn test_tokenize_identifiers() {
    let source = "foo baz_123 _underscore CamelCase integer".to_string();
    let tokens = tokenize(source, Some("test.kl".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[0].value, "foo");
    assert_eq!(tokens[1].value, "baz_123");
    assert_eq!(tokens[2].value, "_underscore");
    assert_eq!(tokens[3].value, "CamelCase");
    assert_eq!(tokens[4].kind, TokenKind::Identifier);
    assert_eq!(tokens[4].value, "integer");
    assert_eq!(tokens[5].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_numbers() {
    let source = "42 3.14 0 100.5".to_string();
    let tokens = tokenize(source, Some("test.kl".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Integer);
    assert_eq!(tokens[0].value, "42");
    assert_eq!(tokens[1].kind, TokenKind::Float);
    assert_eq!(tokens[1].value, "3.14");
    assert_eq!(tokens[2].kind, TokenKind::Integer);
    assert_eq!(tokens[3].kind, TokenKind::Float);
    assert_eq!(tokens[3].value, "100.5");
    assert_eq!(tokens[4].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_strings_and_chars() {
    let source = r#""hello" "multiple words" "" 'a' '' "keep\n""#.to_string();
    let tokens = tokenize(source, Some("test.kl".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].value, "hello");
    assert_eq!(tokens[1].value, "multiple words");
    assert_eq!(tokens[2].kind, TokenKind::String);
    assert_eq!(tokens[2].value, "");
    assert_eq!(tokens[3].kind, TokenKind::Char);
    assert_eq!(tokens[3].value, "a");
    assert_eq!(tokens[4].kind, TokenKind::Char);
    assert_eq!(tokens[4].value, "");
    // No escape processing
    assert_eq!(tokens[5].value, "keep\\n");
}

#[test]
fn test_tokenize_operators() {
    let source = "+ - * / % == != < > <= >= = && || & | !".to_string();
    let tokens = tokenize(source, Some("test.kl".to_string())).unwrap();

    let expected = [
        TokenKind::Plus,
        TokenKind::Dash,
        TokenKind::Star,
        TokenKind::Slash,
        TokenKind::Percent,
        TokenKind::Equals,
        TokenKind::NotEquals,
        TokenKind::Less,
        TokenKind::Greater,
        TokenKind::LessEquals,
        TokenKind::GreaterEquals,
        TokenKind::Assignment,
        TokenKind::AndAnd,
        TokenKind::OrOr,
        TokenKind::And,
        TokenKind::Or,
        TokenKind::Not,
        TokenKind::EOF,
    ];

    let kinds: Vec<TokenKind> = tokens.iter().map(|token| token.kind).collect();
    assert_eq!(kinds, expected);
}

#[test]
fn test_tokenize_compound_operators() {
    let source = "++ -- += -= *= /= %=".to_string();
    let tokens = tokenize(source, Some("test.kl".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::PlusPlus);
    assert_eq!(tokens[1].kind, TokenKind::MinusMinus);
    assert_eq!(tokens[2].kind, TokenKind::PlusEquals);
    assert_eq!(tokens[3].kind, TokenKind::MinusEquals);
    assert_eq!(tokens[4].kind, TokenKind::StarEquals);
    assert_eq!(tokens[5].kind, TokenKind::SlashEquals);
    assert_eq!(tokens[6].kind, TokenKind::PercentEquals);
}

#[test]
fn test_tokenize_punctuation() {
    let source = "( ) { } [ ] . , ; :".to_string();
    let tokens = tokenize(source, Some("test.kl".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::OpenParen);
    assert_eq!(tokens[1].kind, TokenKind::CloseParen);
    assert_eq!(tokens[2].kind, TokenKind::OpenCurly);
    assert_eq!(tokens[3].kind, TokenKind::CloseCurly);
    assert_eq!(tokens[4].kind, TokenKind::OpenBracket);
    assert_eq!(tokens[5].kind, TokenKind::CloseBracket);
    assert_eq!(tokens[6].kind, TokenKind::Dot);
    assert_eq!(tokens[7].kind, TokenKind::Comma);
    assert_eq!(tokens[8].kind, TokenKind::Semicolon);
    assert_eq!(tokens[9].kind, TokenKind::Colon);
    assert_eq!(tokens[10].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_comments() {
    let source = "var x: int = 5; // this is a comment\nx++;".to_string();
    let tokens = tokenize(source, Some("test.kl".to_string())).unwrap();

    assert_eq!(tokens[6].kind, TokenKind::Semicolon);
    assert_eq!(tokens[7].kind, TokenKind::Identifier);
    assert_eq!(tokens[7].value, "x");
    assert_eq!(tokens[8].kind, TokenKind::PlusPlus);
    assert_eq!(tokens[9].kind, TokenKind::Semicolon);
    assert_eq!(tokens[10].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_function_declaration() {
    let source = "fun: add(a: int, b: int): (int) { return: a + b; }".to_string();
    let tokens = tokenize(source, Some("test.kl".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Fun);
    assert_eq!(tokens[1].kind, TokenKind::Colon);
    assert_eq!(tokens[2].kind, TokenKind::Identifier);
    assert_eq!(tokens[2].value, "add");
    assert_eq!(tokens[3].kind, TokenKind::OpenParen);
    assert_eq!(tokens[4].value, "a");
    assert_eq!(tokens[6].kind, TokenKind::Type);
}

#[test]
fn test_tokenize_spans() {
    let source = "var  abc".to_string();
    let tokens = tokenize(source, Some("test.kl".to_string())).unwrap();

    assert_eq!(tokens[0].span.start.0, 0);
    assert_eq!(tokens[0].span.end.0, 3);
    assert_eq!(tokens[1].span.start.0, 5);
    assert_eq!(tokens[1].span.end.0, 8);
    assert_eq!(tokens[2].span.start.0, 8);
    assert_eq!(tokens[1].span.start.1.as_str(), "test.kl");
}

#[test]
fn test_tokenize_default_file_name() {
    let tokens = tokenize("x".to_string(), None).unwrap();
    assert_eq!(tokens[0].span.start.1.as_str(), "shell");
}

#[test]
fn test_tokenize_unrecognized_token() {
    let source = "var x: int = @".to_string();
    let result = tokenize(source, Some("test.kl".to_string()));

    let error = result.unwrap_err();
    assert_eq!(error.get_error_name(), "UnrecognisedToken");
    assert_eq!(error.get_position().0, 13);
}

#[test]
fn test_tokenize_empty_source() {
    let tokens = tokenize(String::new(), Some("test.kl".to_string())).unwrap();

    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::EOF);
}

#[test]
fn test_token_display() {
    let source = r#""hi" 'c' 12"#.to_string();
    let tokens = tokenize(source, Some("test.kl".to_string())).unwrap();

    assert_eq!(tokens[0].to_string(), "\"hi\"");
    assert_eq!(tokens[1].to_string(), "'c'");
    assert_eq!(tokens[2].to_string(), "12");
}
