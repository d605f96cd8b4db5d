//! AST optimization passes.
//!
//! Four passes run in a fixed order: constant folding, constant propagation, dead code
//! elimination and strength reduction. The four together form a round, and rounds repeat
//! until one makes no rewrite, so optimizing the output again changes nothing.

mod constant_folding;
mod constant_propagation;
mod dead_code;
mod strength_reduction;

pub use constant_folding::*;
pub use constant_propagation::*;
pub use dead_code::*;
pub use strength_reduction::*;

use tracing::{debug, info};

use crate::parser::{Block, Expr, Function, Program, Stmt};

pub trait Pass {
    fn name(&self) -> &'static str;

    /// Rewrites `program`, returning the new tree and the number of rewrites made.
    fn run(&mut self, program: Program) -> (Program, usize);
}

pub struct Optimizer {
    folding: ConstantFolding,
    propagation: ConstantPropagation,
    dead_code: DeadCodeElimination,
    strength: StrengthReduction,
}

impl Optimizer {
    pub fn new() -> Self {
        Self {
            folding: ConstantFolding::new(),
            propagation: ConstantPropagation::new(),
            dead_code: DeadCodeElimination::new(),
            strength: StrengthReduction::new(),
        }
    }

    /// Optimizes `program`, returning the rewritten tree and the number of statements
    /// removed as unreachable.
    pub fn optimize(mut self, mut program: Program) -> (Program, usize) {
        let mut round = 0;

        // Every rewrite shrinks the tree or removes a variable reference, so this ends.
        loop {
            round += 1;
            let mut round_rewrites = 0;

            let passes: [&mut dyn Pass; 4] = [
                &mut self.folding,
                &mut self.propagation,
                &mut self.dead_code,
                &mut self.strength,
            ];
            for pass in passes {
                let (rewritten, rewrites) = pass.run(program);
                program = rewritten;
                debug!(pass = pass.name(), round, rewrites, "pass finished");
                round_rewrites += rewrites;
            }

            if round_rewrites == 0 {
                break;
            }
        }

        let removed = self.dead_code.removed();
        info!(rounds = round, removed, "optimization finished");
        (program, removed)
    }
}

impl Default for Optimizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Rebuilds the direct children of `expr` with `f`.
pub(crate) fn map_children<F: FnMut(Expr) -> Expr>(expr: Expr, f: &mut F) -> Expr {
    match expr {
        Expr::Call { name, args, line } => Expr::Call {
            name,
            args: args.into_iter().map(&mut *f).collect(),
            line,
        },
        Expr::Neg { operand, line } => Expr::Neg {
            operand: Box::new(f(*operand)),
            line,
        },
        Expr::Binary { op, lhs, rhs, line } => {
            let lhs = f(*lhs);
            let rhs = f(*rhs);
            Expr::binary(op, lhs, rhs, line)
        }
        leaf @ (Expr::Literal { .. } | Expr::StringLiteral { .. } | Expr::Variable { .. }) => {
            leaf
        }
    }
}

/// Rebuilds every top-level expression of `program` with `f`, keeping all statements.
pub(crate) fn map_program_exprs<F: FnMut(Expr) -> Expr>(program: Program, f: &mut F) -> Program {
    Program(
        program
            .0
            .into_iter()
            .map(|func| Function {
                body: map_block_exprs(func.body, f),
                ..func
            })
            .collect(),
    )
}

fn map_block_exprs<F: FnMut(Expr) -> Expr>(block: Block, f: &mut F) -> Block {
    Block {
        stmts: block
            .stmts
            .into_iter()
            .map(|stmt| map_stmt_exprs(stmt, f))
            .collect(),
        line: block.line,
    }
}

fn map_stmt_exprs<F: FnMut(Expr) -> Expr>(stmt: Stmt, f: &mut F) -> Stmt {
    match stmt {
        Stmt::Declaration {
            ty,
            name,
            init,
            line,
        } => Stmt::Declaration {
            ty,
            name,
            init: init.map(&mut *f),
            line,
        },
        Stmt::Assignment { name, value, line } => Stmt::Assignment {
            name,
            value: f(value),
            line,
        },
        Stmt::Expr(expr) => Stmt::Expr(f(expr)),
        Stmt::Return { value, line } => Stmt::Return {
            value: value.map(&mut *f),
            line,
        },
        Stmt::If { cond, then, line } => Stmt::If {
            cond: f(cond),
            then: map_block_exprs(then, f),
            line,
        },
        Stmt::IfElse {
            cond,
            then,
            otherwise,
            line,
        } => Stmt::IfElse {
            cond: f(cond),
            then: map_block_exprs(then, f),
            otherwise: map_block_exprs(otherwise, f),
            line,
        },
        Stmt::While { cond, body, line } => Stmt::While {
            cond: f(cond),
            body: map_block_exprs(body, f),
            line,
        },
        Stmt::Block(block) => Stmt::Block(map_block_exprs(block, f)),
    }
}
