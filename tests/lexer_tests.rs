use tacc::error::ErrorKind;
use tacc::lexer::{Lexer, TokenKind};

fn kinds(input: &str) -> Vec<TokenKind> {
    Lexer::tokenize(input)
        .expect("lexing should succeed")
        .into_iter()
        .map(|t| t.kind)
        .collect()
}

#[test]
fn declaration() {
    assert_eq!(
        kinds("int x = 42;"),
        vec![
            TokenKind::Int,
            TokenKind::Ident("x".to_string()),
            TokenKind::Equal,
            TokenKind::Num(42),
            TokenKind::SemiColon,
        ]
    );
}

#[test]
fn operators_prefer_two_symbols() {
    assert_eq!(
        kinds("a <= b >= c == d != e < f > g = h"),
        vec![
            TokenKind::Ident("a".to_string()),
            TokenKind::LessEqual,
            TokenKind::Ident("b".to_string()),
            TokenKind::GreaterEqual,
            TokenKind::Ident("c".to_string()),
            TokenKind::DoubleEqual,
            TokenKind::Ident("d".to_string()),
            TokenKind::NotEqual,
            TokenKind::Ident("e".to_string()),
            TokenKind::LessThan,
            TokenKind::Ident("f".to_string()),
            TokenKind::GreaterThan,
            TokenKind::Ident("g".to_string()),
            TokenKind::Equal,
            TokenKind::Ident("h".to_string()),
        ]
    );
}

#[test]
fn keywords_and_identifiers() {
    assert_eq!(
        kinds("while while_x _tmp return void bool char float for"),
        vec![
            TokenKind::While,
            TokenKind::Ident("while_x".to_string()),
            TokenKind::Ident("_tmp".to_string()),
            TokenKind::Return,
            TokenKind::Void,
            TokenKind::Bool,
            TokenKind::Char,
            TokenKind::Float,
            TokenKind::For,
        ]
    );
}

#[test]
fn float_and_int_literals() {
    assert_eq!(
        kinds("3.25 7 0.5"),
        vec![
            TokenKind::FloatNum(3.25),
            TokenKind::Num(7),
            TokenKind::FloatNum(0.5),
        ]
    );
}

#[test]
fn string_literal_keeps_escapes() {
    assert_eq!(
        kinds(r#""hi \"there\"""#),
        vec![TokenKind::Str(r#"hi \"there\""#.to_string())]
    );
}

#[test]
fn lines_and_comments() {
    let input = "int a;\n// comment\n/* block\n comment */ int b;\n\n c";
    let tokens = Lexer::tokenize(input).unwrap();

    let lines: Vec<_> = tokens.iter().map(|t| t.line).collect();
    assert_eq!(lines, vec![1, 1, 1, 4, 4, 4, 6]);
    assert_eq!(tokens[4].kind, TokenKind::Ident("b".to_string()));
}

#[test]
fn all_illegal_characters_are_reported() {
    let errors = Lexer::tokenize("int @x;\nx = 1 # 2;").unwrap_err();

    assert_eq!(errors.len(), 2);
    assert!(errors.iter().all(|e| e.kind() == ErrorKind::LexicalError));
    assert_eq!(errors[0].line(), 1);
    assert_eq!(errors[1].line(), 2);
    assert_eq!(
        errors[0].to_string(),
        "Lexical Error: Illegal character '@' (line 1)"
    );
}

#[test]
fn dangling_dot_is_illegal() {
    let errors = Lexer::tokenize("1.").unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind(), ErrorKind::LexicalError);
}

#[test]
fn unterminated_string() {
    let errors = Lexer::tokenize("int x;\n\"abc").unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].line(), 2);
}

#[test]
fn unterminated_block_comment() {
    let errors = Lexer::tokenize("/* never closed").unwrap_err();
    assert_eq!(errors[0].kind(), ErrorKind::LexicalError);
}

#[test]
fn integer_overflow() {
    let errors = Lexer::tokenize("99999999999999999999999").unwrap_err();
    assert_eq!(errors[0].kind(), ErrorKind::LexicalError);
}

#[test]
fn float_overflow() {
    let input = format!("1{}.0", "0".repeat(400));
    let errors = Lexer::tokenize(&input).unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind(), ErrorKind::LexicalError);
}
