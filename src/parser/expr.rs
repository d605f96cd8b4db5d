use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Literal {
    Int(i64),
    Float(f64),
}

impl Literal {
    pub fn is_zero(&self) -> bool {
        match self {
            Literal::Int(n) => *n == 0,
            Literal::Float(n) => *n == 0.0,
        }
    }

    pub fn is_one(&self) -> bool {
        match self {
            Literal::Int(n) => *n == 1,
            Literal::Float(n) => *n == 1.0,
        }
    }

    pub fn is_truthy(&self) -> bool {
        !self.is_zero()
    }

    /// Whether the value can be written as a decimal constant. Infinities and NaN cannot.
    pub fn is_finite(&self) -> bool {
        match self {
            Literal::Int(_) => true,
            Literal::Float(n) => n.is_finite(),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Int(n) => write!(f, "{n}"),
            // `Display` for f64 never uses an exponent; the fractional part is added back
            // so 2.0 is not printed as an integer
            Literal::Float(n) if n.fract() == 0.0 => write!(f, "{n}.0"),
            Literal::Float(n) => write!(f, "{n}"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinOpKind {
    Add,
    Sub,
    Mul,
    Div,
    Equal,
    NotEqual,
    LessThan,
    GreaterThan,
    LessEqual,
    GreaterEqual,
}

impl BinOpKind {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinOpKind::Add => "+",
            BinOpKind::Sub => "-",
            BinOpKind::Mul => "*",
            BinOpKind::Div => "/",
            BinOpKind::Equal => "==",
            BinOpKind::NotEqual => "!=",
            BinOpKind::LessThan => "<",
            BinOpKind::GreaterThan => ">",
            BinOpKind::LessEqual => "<=",
            BinOpKind::GreaterEqual => ">=",
        }
    }
}

impl fmt::Display for BinOpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Literal {
        value: Literal,
        line: usize,
    },
    StringLiteral {
        value: String,
        line: usize,
    },
    Variable {
        name: String,
        line: usize,
    },
    Call {
        name: String,
        args: Vec<Expr>,
        line: usize,
    },
    Neg {
        operand: Box<Expr>,
        line: usize,
    },
    Binary {
        op: BinOpKind,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
        line: usize,
    },
}

impl Expr {
    pub fn int(value: i64, line: usize) -> Self {
        Expr::Literal {
            value: Literal::Int(value),
            line,
        }
    }

    pub fn binary(op: BinOpKind, lhs: Expr, rhs: Expr, line: usize) -> Self {
        Expr::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
            line,
        }
    }

    pub fn line(&self) -> usize {
        match self {
            Expr::Literal { line, .. }
            | Expr::StringLiteral { line, .. }
            | Expr::Variable { line, .. }
            | Expr::Call { line, .. }
            | Expr::Neg { line, .. }
            | Expr::Binary { line, .. } => *line,
        }
    }

    /// Returns the literal value if this expression is a `Literal` leaf.
    pub fn as_literal(&self) -> Option<Literal> {
        match self {
            Expr::Literal { value, .. } => Some(*value),
            _ => None,
        }
    }
}
