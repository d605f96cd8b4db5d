use tracing::debug;

use crate::error::CompileError;

use super::{
    token::{KEYWORDS, ONE_SYMBOL_TOKENS, TWO_SYMBOLS_TOKENS},
    Token, TokenKind,
};

#[derive(Debug)]
pub struct Lexer {
    tokens: Vec<Token>,
    errors: Vec<CompileError>,
    index: usize,
    line: usize,
}

impl Lexer {
    fn new() -> Self {
        Self {
            tokens: vec![],
            errors: vec![],
            index: 0,
            line: 1,
        }
    }

    fn new_token(&mut self, kind: TokenKind, len: usize) {
        self.tokens.push(Token {
            kind,
            line: self.line,
        });
        self.index += len;
    }

    fn error(&mut self, message: String, line: usize) {
        self.errors.push(CompileError::Lexical { message, line });
    }

    fn parse_number(&mut self, chars: &[char]) {
        let int_part: String = chars.iter().take_while(|c| c.is_ascii_digit()).collect();
        let len = int_part.len();

        let has_fraction =
            chars.get(len) == Some(&'.') && chars.get(len + 1).is_some_and(|c| c.is_ascii_digit());
        if has_fraction {
            let frac_part: String = chars[len + 1..]
                .iter()
                .take_while(|c| c.is_ascii_digit())
                .collect();
            let s = format!("{int_part}.{frac_part}");
            match s.parse::<f64>() {
                Ok(value) if value.is_finite() => {
                    self.new_token(TokenKind::FloatNum(value), s.len())
                }
                _ => {
                    self.error(format!("Float literal '{s}' is too large"), self.line);
                    self.index += s.len();
                }
            }
            return;
        }

        match int_part.parse() {
            Ok(value) => self.new_token(TokenKind::Num(value), len),
            Err(_) => {
                self.error(format!("Integer literal '{int_part}' is too large"), self.line);
                self.index += len;
            }
        }
    }

    fn parse_identifier(&mut self, chars: &[char]) {
        let s: String = chars
            .iter()
            .take_while(|&&c| c.is_ascii_alphanumeric() || c == '_')
            .collect();

        if let Some(kind) = KEYWORDS.get(s.as_str()) {
            self.new_token(kind.clone(), s.len());
        } else {
            let len = s.len();
            self.new_token(TokenKind::Ident(s), len);
        }
    }

    /// Scans a string literal. The quotes are stripped and escapes are kept verbatim.
    fn parse_string(&mut self, chars: &[char]) {
        let start_line = self.line;
        let mut value = String::new();
        let mut i = 1;

        while i < chars.len() {
            match chars[i] {
                '"' => {
                    self.tokens.push(Token {
                        kind: TokenKind::Str(value),
                        line: start_line,
                    });
                    self.index += i + 1;
                    return;
                }
                '\\' if i + 1 < chars.len() => {
                    value.push('\\');
                    value.push(chars[i + 1]);
                    if chars[i + 1] == '\n' {
                        self.line += 1;
                    }
                    i += 2;
                }
                c => {
                    if c == '\n' {
                        self.line += 1;
                    }
                    value.push(c);
                    i += 1;
                }
            }
        }

        self.error("Unterminated string literal".to_string(), start_line);
        self.index += chars.len();
    }

    fn skip_line_comment(&mut self, chars: &[char]) {
        self.index += chars.iter().take_while(|&&c| c != '\n').count();
    }

    fn skip_block_comment(&mut self, chars: &[char]) {
        let start_line = self.line;
        let mut i = 2;

        while i < chars.len() {
            if chars[i] == '*' && chars.get(i + 1) == Some(&'/') {
                self.index += i + 2;
                return;
            }
            if chars[i] == '\n' {
                self.line += 1;
            }
            i += 1;
        }

        self.error("Unterminated block comment".to_string(), start_line);
        self.index += chars.len();
    }

    fn _tokenize(&mut self, s: &str) {
        let chars: Vec<_> = s.chars().collect();

        while self.index < chars.len() {
            let rest = &chars[self.index..];
            let c = rest[0];
            let c2 = rest.iter().take(2).collect::<String>();

            if c == '\n' {
                self.line += 1;
                self.index += 1;
            } else if c == ' ' || c == '\t' || c == '\r' {
                self.index += 1;
            } else if c2 == "//" {
                self.skip_line_comment(rest);
            } else if c2 == "/*" {
                self.skip_block_comment(rest);
            } else if c.is_ascii_digit() {
                self.parse_number(rest);
            } else if c.is_ascii_alphabetic() || c == '_' {
                self.parse_identifier(rest);
            } else if c == '"' {
                self.parse_string(rest);
            } else if let Some(kind) = TWO_SYMBOLS_TOKENS.get(c2.as_str()) {
                self.new_token(kind.clone(), 2);
            } else if let Some(kind) = ONE_SYMBOL_TOKENS.get(&c) {
                self.new_token(kind.clone(), 1);
            } else {
                self.error(format!("Illegal character '{c}'"), self.line);
                self.index += 1;
            }
        }
    }

    /// Splits `s` into tokens, collecting every lexical error instead of stopping at the first.
    pub fn tokenize(s: &str) -> Result<Vec<Token>, Vec<CompileError>> {
        let mut lexer = Lexer::new();
        lexer._tokenize(s);

        debug!(
            tokens = lexer.tokens.len(),
            errors = lexer.errors.len(),
            "lexing finished"
        );
        if lexer.errors.is_empty() {
            Ok(lexer.tokens)
        } else {
            Err(lexer.errors)
        }
    }
}
