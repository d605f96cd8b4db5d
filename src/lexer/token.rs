use std::fmt;

use phf::phf_map;

pub static KEYWORDS: phf::Map<&str, TokenKind> = phf_map! {
    "int" => TokenKind::Int,
    "float" => TokenKind::Float,
    "char" => TokenKind::Char,
    "bool" => TokenKind::Bool,
    "void" => TokenKind::Void,
    "if" => TokenKind::If,
    "else" => TokenKind::Else,
    "while" => TokenKind::While,
    "return" => TokenKind::Return,
    "for" => TokenKind::For,
};

pub static TWO_SYMBOLS_TOKENS: phf::Map<&str, TokenKind> = phf_map! {
    "==" => TokenKind::DoubleEqual,
    "!=" => TokenKind::NotEqual,
    "<=" => TokenKind::LessEqual,
    ">=" => TokenKind::GreaterEqual,
};

pub static ONE_SYMBOL_TOKENS: phf::Map<char, TokenKind> = phf_map! {
    '+' => TokenKind::Plus,
    '-' => TokenKind::Minus,
    '*' => TokenKind::Star,
    '/' => TokenKind::Slash,
    '=' => TokenKind::Equal,
    '<' => TokenKind::LessThan,
    '>' => TokenKind::GreaterThan,
    '(' => TokenKind::OpenParen,
    ')' => TokenKind::CloseParen,
    '{' => TokenKind::OpenCurlyBrace,
    '}' => TokenKind::CloseCurlyBrace,
    ';' => TokenKind::SemiColon,
    ',' => TokenKind::Comma,
};

#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    Num(i64),
    FloatNum(f64),
    Str(String),
    Ident(String),

    Int,
    Float,
    Char,
    Bool,
    Void,
    If,
    Else,
    While,
    Return,
    For,

    Plus,
    Minus,
    Star,
    Slash,
    Equal,

    DoubleEqual,
    NotEqual,
    LessThan,
    LessEqual,
    GreaterThan,
    GreaterEqual,

    OpenParen,
    CloseParen,
    OpenCurlyBrace,
    CloseCurlyBrace,
    SemiColon,
    Comma,
}

impl TokenKind {
    pub fn is_type_specifier(&self) -> bool {
        matches!(
            self,
            TokenKind::Int | TokenKind::Float | TokenKind::Char | TokenKind::Bool | TokenKind::Void
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TokenKind::Num(n) => return write!(f, "number '{n}'"),
            TokenKind::FloatNum(n) => return write!(f, "number '{n:?}'"),
            TokenKind::Str(s) => return write!(f, "string \"{s}\""),
            TokenKind::Ident(name) => return write!(f, "identifier '{name}'"),
            TokenKind::Int => "int",
            TokenKind::Float => "float",
            TokenKind::Char => "char",
            TokenKind::Bool => "bool",
            TokenKind::Void => "void",
            TokenKind::If => "if",
            TokenKind::Else => "else",
            TokenKind::While => "while",
            TokenKind::Return => "return",
            TokenKind::For => "for",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Equal => "=",
            TokenKind::DoubleEqual => "==",
            TokenKind::NotEqual => "!=",
            TokenKind::LessThan => "<",
            TokenKind::LessEqual => "<=",
            TokenKind::GreaterThan => ">",
            TokenKind::GreaterEqual => ">=",
            TokenKind::OpenParen => "(",
            TokenKind::CloseParen => ")",
            TokenKind::OpenCurlyBrace => "{",
            TokenKind::CloseCurlyBrace => "}",
            TokenKind::SemiColon => ";",
            TokenKind::Comma => ",",
        };
        write!(f, "'{s}'")
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub line: usize,
}
