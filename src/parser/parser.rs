use tracing::debug;

use crate::error::CompileError;
use crate::lexer::{Token, TokenKind};

use super::{BinOpKind, Block, Expr, Function, Literal, Param, Program, Stmt, TypeSpecifier};

type ParseResult<T> = Result<T, CompileError>;

/// Deepest nesting of blocks, parenthesized expressions and unary operators accepted.
const MAX_NESTING: usize = 128;

#[derive(Debug)]
pub struct Parser {
    tokens: Vec<Token>,
    index: usize,
    depth: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            index: 0,
            depth: 0,
        }
    }

    /// Parses the whole token stream, stopping at the first syntax error.
    pub fn parse(&mut self) -> ParseResult<Program> {
        let program = self.parse_program()?;
        debug!(functions = program.0.len(), "parsing finished");
        Ok(program)
    }

    fn is_eof(&self) -> bool {
        self.index >= self.tokens.len()
    }

    fn peek(&self) -> Option<&TokenKind> {
        self.tokens.get(self.index).map(|t| &t.kind)
    }

    fn peek_nth(&self, n: usize) -> Option<&TokenKind> {
        self.tokens.get(self.index + n).map(|t| &t.kind)
    }

    /// Line of the current token, or of the last token once the input is exhausted.
    fn line(&self) -> usize {
        self.tokens
            .get(self.index)
            .or_else(|| self.tokens.last())
            .map(|t| t.line)
            .unwrap_or(1)
    }

    fn unexpected(&self) -> CompileError {
        match self.tokens.get(self.index) {
            Some(t) => CompileError::Syntax {
                found: t.kind.to_string(),
                line: t.line,
            },
            None => CompileError::UnexpectedEof { line: self.line() },
        }
    }

    fn consume(&mut self, kind: &TokenKind) -> bool {
        if self.peek() != Some(kind) {
            return false;
        }
        self.index += 1;
        true
    }

    fn expect(&mut self, kind: &TokenKind) -> ParseResult<()> {
        if self.consume(kind) {
            Ok(())
        } else {
            Err(self.unexpected())
        }
    }

    fn expect_ident(&mut self) -> ParseResult<String> {
        if let Some(TokenKind::Ident(name)) = self.peek() {
            let name = name.clone();
            self.index += 1;
            return Ok(name);
        }
        Err(self.unexpected())
    }

    /// Runs `f` one nesting level deeper. Past [MAX_NESTING] the current token is reported
    /// as unexpected.
    fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> ParseResult<T>) -> ParseResult<T> {
        if self.depth >= MAX_NESTING {
            return Err(self.unexpected());
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    fn expect_type_specifier(&mut self) -> ParseResult<TypeSpecifier> {
        let ty = match self.peek() {
            Some(TokenKind::Int) => TypeSpecifier::Int,
            Some(TokenKind::Float) => TypeSpecifier::Float,
            Some(TokenKind::Char) => TypeSpecifier::Char,
            Some(TokenKind::Bool) => TypeSpecifier::Bool,
            Some(TokenKind::Void) => TypeSpecifier::Void,
            _ => return Err(self.unexpected()),
        };
        self.index += 1;
        Ok(ty)
    }

    /// program = func+
    fn parse_program(&mut self) -> ParseResult<Program> {
        let mut funcs = vec![self.parse_func()?];

        while !self.is_eof() {
            funcs.push(self.parse_func()?);
        }

        Ok(Program(funcs))
    }

    /// func = type ident "(" params? ")" block
    fn parse_func(&mut self) -> ParseResult<Function> {
        let line = self.line();
        let ty = self.expect_type_specifier()?;
        let name = self.expect_ident()?;

        self.expect(&TokenKind::OpenParen)?;
        let params = if self.consume(&TokenKind::CloseParen) {
            vec![]
        } else {
            let params = self.parse_params()?;
            self.expect(&TokenKind::CloseParen)?;
            params
        };

        let body = self.parse_block()?;

        Ok(Function {
            ty,
            name,
            params,
            body,
            line,
        })
    }

    /// params = param ("," param)*
    /// param  = type ident
    fn parse_params(&mut self) -> ParseResult<Vec<Param>> {
        let mut params = vec![];
        loop {
            let line = self.line();
            let ty = self.expect_type_specifier()?;
            let name = self.expect_ident()?;
            params.push(Param { ty, name, line });

            if !self.consume(&TokenKind::Comma) {
                return Ok(params);
            }
        }
    }

    /// block = "{" stmt* "}"
    fn parse_block(&mut self) -> ParseResult<Block> {
        self.nested(Self::parse_block_body)
    }

    fn parse_block_body(&mut self) -> ParseResult<Block> {
        let line = self.line();
        self.expect(&TokenKind::OpenCurlyBrace)?;

        let mut stmts = vec![];
        while !self.consume(&TokenKind::CloseCurlyBrace) {
            if self.is_eof() {
                return Err(self.unexpected());
            }
            stmts.push(self.parse_stmt()?);
        }

        Ok(Block::new(stmts, line))
    }

    /// stmt = type ident ("=" expr)? ";"
    ///      | ident "=" expr ";"
    ///      | expr ";"
    ///      | "return" expr? ";"
    ///      | "if" "(" expr ")" block ("else" block)?
    ///      | "while" "(" expr ")" block
    ///      | block
    fn parse_stmt(&mut self) -> ParseResult<Stmt> {
        let line = self.line();

        match self.peek() {
            Some(TokenKind::OpenCurlyBrace) => Ok(Stmt::Block(self.parse_block()?)),
            Some(TokenKind::If) => self.parse_if(),
            Some(TokenKind::While) => {
                self.index += 1;
                self.expect(&TokenKind::OpenParen)?;
                let cond = self.parse_expr()?;
                self.expect(&TokenKind::CloseParen)?;
                let body = self.parse_block()?;
                Ok(Stmt::While { cond, body, line })
            }
            Some(TokenKind::Return) => {
                self.index += 1;
                let value = if self.consume(&TokenKind::SemiColon) {
                    None
                } else {
                    let expr = self.parse_expr()?;
                    self.expect(&TokenKind::SemiColon)?;
                    Some(expr)
                };
                Ok(Stmt::Return { value, line })
            }
            Some(kind) if kind.is_type_specifier() => self.parse_declaration(),
            Some(TokenKind::Ident(_)) if self.peek_nth(1) == Some(&TokenKind::Equal) => {
                let name = self.expect_ident()?;
                self.expect(&TokenKind::Equal)?;
                let value = self.parse_expr()?;
                self.expect(&TokenKind::SemiColon)?;
                Ok(Stmt::Assignment { name, value, line })
            }
            _ => {
                let expr = self.parse_expr()?;
                self.expect(&TokenKind::SemiColon)?;
                Ok(Stmt::Expr(expr))
            }
        }
    }

    fn parse_if(&mut self) -> ParseResult<Stmt> {
        let line = self.line();
        self.expect(&TokenKind::If)?;
        self.expect(&TokenKind::OpenParen)?;
        let cond = self.parse_expr()?;
        self.expect(&TokenKind::CloseParen)?;
        let then = self.parse_block()?;

        if self.consume(&TokenKind::Else) {
            let otherwise = self.parse_block()?;
            Ok(Stmt::IfElse {
                cond,
                then,
                otherwise,
                line,
            })
        } else {
            Ok(Stmt::If { cond, then, line })
        }
    }

    fn parse_declaration(&mut self) -> ParseResult<Stmt> {
        let line = self.line();
        let ty = self.expect_type_specifier()?;
        let name = self.expect_ident()?;

        let init = if self.consume(&TokenKind::Equal) {
            Some(self.parse_expr()?)
        } else {
            None
        };
        self.expect(&TokenKind::SemiColon)?;

        Ok(Stmt::Declaration {
            ty,
            name,
            init,
            line,
        })
    }

    /// expr = equality
    fn parse_expr(&mut self) -> ParseResult<Expr> {
        self.nested(Self::parse_equality)
    }

    /// Parses `next ((op) next)*` as a left-associative chain.
    fn parse_left_assoc(
        &mut self,
        ops: &[(TokenKind, BinOpKind)],
        next: fn(&mut Self) -> ParseResult<Expr>,
    ) -> ParseResult<Expr> {
        let mut node = next(self)?;

        'outer: loop {
            for (token, op) in ops {
                let line = self.line();
                if self.consume(token) {
                    let rhs = next(self)?;
                    node = Expr::binary(*op, node, rhs, line);
                    continue 'outer;
                }
            }
            return Ok(node);
        }
    }

    /// equality = relational ("==" relational | "!=" relational)*
    fn parse_equality(&mut self) -> ParseResult<Expr> {
        self.parse_left_assoc(
            &[
                (TokenKind::DoubleEqual, BinOpKind::Equal),
                (TokenKind::NotEqual, BinOpKind::NotEqual),
            ],
            Self::parse_relational,
        )
    }

    /// relational = add ("<" add | "<=" add | ">" add | ">=" add)*
    fn parse_relational(&mut self) -> ParseResult<Expr> {
        self.parse_left_assoc(
            &[
                (TokenKind::LessThan, BinOpKind::LessThan),
                (TokenKind::LessEqual, BinOpKind::LessEqual),
                (TokenKind::GreaterThan, BinOpKind::GreaterThan),
                (TokenKind::GreaterEqual, BinOpKind::GreaterEqual),
            ],
            Self::parse_add,
        )
    }

    /// add = mul ("+" mul | "-" mul)*
    fn parse_add(&mut self) -> ParseResult<Expr> {
        self.parse_left_assoc(
            &[
                (TokenKind::Plus, BinOpKind::Add),
                (TokenKind::Minus, BinOpKind::Sub),
            ],
            Self::parse_mul,
        )
    }

    /// mul = unary ("*" unary | "/" unary)*
    fn parse_mul(&mut self) -> ParseResult<Expr> {
        self.parse_left_assoc(
            &[
                (TokenKind::Star, BinOpKind::Mul),
                (TokenKind::Slash, BinOpKind::Div),
            ],
            Self::parse_unary,
        )
    }

    /// unary = ("+" | "-") unary
    ///       | primary
    fn parse_unary(&mut self) -> ParseResult<Expr> {
        let line = self.line();
        if self.consume(&TokenKind::Plus) {
            self.nested(Self::parse_unary)
        } else if self.consume(&TokenKind::Minus) {
            Ok(Expr::Neg {
                operand: Box::new(self.nested(Self::parse_unary)?),
                line,
            })
        } else {
            self.parse_primary()
        }
    }

    /// primary = num | float | string
    ///         | ident ("(" (expr ("," expr)*)? ")")?
    ///         | "(" expr ")"
    fn parse_primary(&mut self) -> ParseResult<Expr> {
        let line = self.line();
        let Some(kind) = self.peek().cloned() else {
            return Err(self.unexpected());
        };

        match kind {
            TokenKind::OpenParen => {
                self.index += 1;
                let expr = self.parse_expr()?;
                self.expect(&TokenKind::CloseParen)?;
                Ok(expr)
            }
            TokenKind::Num(num) => {
                self.index += 1;
                Ok(Expr::Literal {
                    value: Literal::Int(num),
                    line,
                })
            }
            TokenKind::FloatNum(num) => {
                self.index += 1;
                Ok(Expr::Literal {
                    value: Literal::Float(num),
                    line,
                })
            }
            TokenKind::Str(value) => {
                self.index += 1;
                Ok(Expr::StringLiteral { value, line })
            }
            TokenKind::Ident(name) => {
                self.index += 1;
                self.parse_ident(name, line)
            }
            _ => Err(self.unexpected()),
        }
    }

    fn parse_ident(&mut self, name: String, line: usize) -> ParseResult<Expr> {
        if !self.consume(&TokenKind::OpenParen) {
            return Ok(Expr::Variable { name, line });
        }

        let mut args = vec![];
        if !self.consume(&TokenKind::CloseParen) {
            args.push(self.parse_expr()?);
            while self.consume(&TokenKind::Comma) {
                args.push(self.parse_expr()?);
            }
            self.expect(&TokenKind::CloseParen)?;
        }

        Ok(Expr::Call { name, args, line })
    }
}
