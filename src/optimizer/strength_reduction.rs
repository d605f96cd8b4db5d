use crate::parser::{BinOpKind, Expr, Program};

use super::{map_children, map_program_exprs, Pass};

/// Removes arithmetic identities: `x+0`, `0+x`, `x-0`, `x*1`, `1*x`, `x/1` become `x`,
/// and `x*0`, `0*x` become `0`.
pub struct StrengthReduction {
    rewrites: usize,
}

impl StrengthReduction {
    pub fn new() -> Self {
        Self { rewrites: 0 }
    }

    fn reduce(&mut self, expr: Expr) -> Expr {
        let expr = map_children(expr, &mut |e| self.reduce(e));
        let (op, lhs, rhs, line) = match expr {
            Expr::Binary { op, lhs, rhs, line } => (op, lhs, rhs, line),
            expr => return expr,
        };

        let is_zero = |e: &Expr| e.as_literal().is_some_and(|v| v.is_zero());
        let is_one = |e: &Expr| e.as_literal().is_some_and(|v| v.is_one());

        let reduced = match op {
            BinOpKind::Add if is_zero(&lhs) => *rhs,
            BinOpKind::Add if is_zero(&rhs) => *lhs,
            BinOpKind::Sub if is_zero(&rhs) => *lhs,
            BinOpKind::Mul if is_one(&lhs) => *rhs,
            BinOpKind::Mul if is_one(&rhs) => *lhs,
            BinOpKind::Mul if is_zero(&lhs) || is_zero(&rhs) => Expr::int(0, line),
            BinOpKind::Div if is_one(&rhs) => *lhs,
            _ => return Expr::Binary { op, lhs, rhs, line },
        };

        self.rewrites += 1;
        reduced
    }
}

impl Default for StrengthReduction {
    fn default() -> Self {
        Self::new()
    }
}

impl Pass for StrengthReduction {
    fn name(&self) -> &'static str {
        "strength-reduction"
    }

    fn run(&mut self, program: Program) -> (Program, usize) {
        self.rewrites = 0;
        let program = map_program_exprs(program, &mut |e| self.reduce(e));
        (program, self.rewrites)
    }
}
