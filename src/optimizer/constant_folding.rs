use crate::parser::{BinOpKind, Expr, Literal, Program};

use super::{map_children, map_program_exprs, Pass};

/// Replaces operators whose operands are all literals with the computed literal.
pub struct ConstantFolding {
    rewrites: usize,
}

impl ConstantFolding {
    pub fn new() -> Self {
        Self { rewrites: 0 }
    }

    fn fold(&mut self, expr: Expr) -> Expr {
        let expr = map_children(expr, &mut |e| self.fold(e));

        match expr {
            Expr::Binary { op, lhs, rhs, line } => match (lhs.as_literal(), rhs.as_literal()) {
                (Some(a), Some(b)) => {
                    let value = evaluate(op, a, b);
                    // an overflowing float has no decimal form, so the operation is kept
                    if !value.is_finite() {
                        return Expr::Binary { op, lhs, rhs, line };
                    }
                    self.rewrites += 1;
                    Expr::Literal { value, line }
                }
                _ => Expr::Binary { op, lhs, rhs, line },
            },
            Expr::Neg { operand, line } => match operand.as_literal() {
                Some(value) => {
                    self.rewrites += 1;
                    Expr::Literal {
                        value: negate(value),
                        line,
                    }
                }
                None => Expr::Neg { operand, line },
            },
            expr => expr,
        }
    }
}

impl Default for ConstantFolding {
    fn default() -> Self {
        Self::new()
    }
}

impl Pass for ConstantFolding {
    fn name(&self) -> &'static str {
        "constant-folding"
    }

    fn run(&mut self, program: Program) -> (Program, usize) {
        self.rewrites = 0;
        let program = map_program_exprs(program, &mut |e| self.fold(e));
        (program, self.rewrites)
    }
}

fn compare<T: PartialOrd>(op: BinOpKind, a: T, b: T) -> bool {
    match op {
        BinOpKind::Equal => a == b,
        BinOpKind::NotEqual => a != b,
        BinOpKind::LessThan => a < b,
        BinOpKind::GreaterThan => a > b,
        BinOpKind::LessEqual => a <= b,
        BinOpKind::GreaterEqual => a >= b,
        BinOpKind::Add | BinOpKind::Sub | BinOpKind::Mul | BinOpKind::Div => {
            unreachable!("{op} is not a comparison")
        }
    }
}

fn as_f64(value: Literal) -> f64 {
    match value {
        Literal::Int(n) => n as f64,
        Literal::Float(n) => n,
    }
}

/// Computes `a op b`.
///
/// Two ints give an int (wrapping, with truncating division); a float on either side
/// gives a float. Comparisons give `0` or `1`. Division by a zero literal gives `0`
/// instead of an error.
pub fn evaluate(op: BinOpKind, a: Literal, b: Literal) -> Literal {
    if op == BinOpKind::Div && b.is_zero() {
        return Literal::Int(0);
    }

    match (a, b) {
        (Literal::Int(a), Literal::Int(b)) => match op {
            BinOpKind::Add => Literal::Int(a.wrapping_add(b)),
            BinOpKind::Sub => Literal::Int(a.wrapping_sub(b)),
            BinOpKind::Mul => Literal::Int(a.wrapping_mul(b)),
            BinOpKind::Div => Literal::Int(a.wrapping_div(b)),
            _ => Literal::Int(compare(op, a, b) as i64),
        },
        (a, b) => {
            let (a, b) = (as_f64(a), as_f64(b));
            match op {
                BinOpKind::Add => Literal::Float(a + b),
                BinOpKind::Sub => Literal::Float(a - b),
                BinOpKind::Mul => Literal::Float(a * b),
                BinOpKind::Div => Literal::Float(a / b),
                _ => Literal::Int(compare(op, a, b) as i64),
            }
        }
    }
}

pub fn negate(value: Literal) -> Literal {
    match value {
        Literal::Int(n) => Literal::Int(n.wrapping_neg()),
        Literal::Float(n) => Literal::Float(-n),
    }
}
