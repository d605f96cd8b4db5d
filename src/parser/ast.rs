use std::fmt;

use super::Expr;

#[derive(Clone, Debug, PartialEq)]
pub struct Program(pub Vec<Function>);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypeSpecifier {
    Int,
    Float,
    Char,
    Bool,
    Void,
}

impl fmt::Display for TypeSpecifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TypeSpecifier::Int => "int",
            TypeSpecifier::Float => "float",
            TypeSpecifier::Char => "char",
            TypeSpecifier::Bool => "bool",
            TypeSpecifier::Void => "void",
        };
        write!(f, "{s}")
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Function {
    pub ty: TypeSpecifier,
    pub name: String,
    pub params: Vec<Param>,
    pub body: Block,
    pub line: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Param {
    pub ty: TypeSpecifier,
    pub name: String,
    pub line: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Block {
    pub stmts: Vec<Stmt>,
    pub line: usize,
}

impl Block {
    pub fn new(stmts: Vec<Stmt>, line: usize) -> Self {
        Self { stmts, line }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Stmt {
    Declaration {
        ty: TypeSpecifier,
        name: String,
        init: Option<Expr>,
        line: usize,
    },
    Assignment {
        name: String,
        value: Expr,
        line: usize,
    },
    Expr(Expr),
    Return {
        value: Option<Expr>,
        line: usize,
    },
    If {
        cond: Expr,
        then: Block,
        line: usize,
    },
    IfElse {
        cond: Expr,
        then: Block,
        otherwise: Block,
        line: usize,
    },
    While {
        cond: Expr,
        body: Block,
        line: usize,
    },
    Block(Block),
}

impl Stmt {
    pub fn line(&self) -> usize {
        match self {
            Stmt::Declaration { line, .. }
            | Stmt::Assignment { line, .. }
            | Stmt::Return { line, .. }
            | Stmt::If { line, .. }
            | Stmt::IfElse { line, .. }
            | Stmt::While { line, .. } => *line,
            Stmt::Expr(expr) => expr.line(),
            Stmt::Block(block) => block.line,
        }
    }
}
