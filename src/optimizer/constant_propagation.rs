use std::collections::HashMap;

use crate::parser::{Block, Expr, Function, Literal, Program, Stmt};

use super::{map_children, Pass};

/// Replaces variable reads with the literal last assigned to that name.
///
/// The name to literal mapping is flow-insensitive: it is filled in program order, is not
/// scoped to blocks or functions, and is not forked or merged across `if`/`while` branches.
/// It starts empty on every run.
pub struct ConstantPropagation {
    constants: HashMap<String, Literal>,
    rewrites: usize,
}

impl ConstantPropagation {
    pub fn new() -> Self {
        Self {
            constants: HashMap::new(),
            rewrites: 0,
        }
    }

    /// Records `name` as bound to `value` when it is a literal.
    fn declare(&mut self, name: &str, value: Option<&Expr>) {
        if let Some(literal) = value.and_then(Expr::as_literal) {
            self.constants.insert(name.to_string(), literal);
        }
    }

    /// Records `name` as bound to `value` when it is a literal, and forgets it otherwise.
    fn assign(&mut self, name: &str, value: &Expr) {
        match value.as_literal() {
            Some(literal) => {
                self.constants.insert(name.to_string(), literal);
            }
            None => {
                self.constants.remove(name);
            }
        }
    }

    fn propagate_func(&mut self, func: Function) -> Function {
        Function {
            body: self.propagate_block(func.body),
            ..func
        }
    }

    fn propagate_block(&mut self, block: Block) -> Block {
        Block {
            stmts: block
                .stmts
                .into_iter()
                .map(|stmt| self.propagate_stmt(stmt))
                .collect(),
            line: block.line,
        }
    }

    fn propagate_stmt(&mut self, stmt: Stmt) -> Stmt {
        match stmt {
            Stmt::Declaration {
                ty,
                name,
                init,
                line,
            } => {
                self.declare(&name, init.as_ref());
                Stmt::Declaration {
                    ty,
                    name,
                    init: init.map(|e| self.propagate_expr(e)),
                    line,
                }
            }
            Stmt::Assignment { name, value, line } => {
                self.assign(&name, &value);
                Stmt::Assignment {
                    name,
                    value: self.propagate_expr(value),
                    line,
                }
            }
            Stmt::Expr(expr) => Stmt::Expr(self.propagate_expr(expr)),
            Stmt::Return { value, line } => Stmt::Return {
                value: value.map(|e| self.propagate_expr(e)),
                line,
            },
            Stmt::If { cond, then, line } => Stmt::If {
                cond: self.propagate_expr(cond),
                then: self.propagate_block(then),
                line,
            },
            Stmt::IfElse {
                cond,
                then,
                otherwise,
                line,
            } => Stmt::IfElse {
                cond: self.propagate_expr(cond),
                then: self.propagate_block(then),
                otherwise: self.propagate_block(otherwise),
                line,
            },
            Stmt::While { cond, body, line } => Stmt::While {
                cond: self.propagate_expr(cond),
                body: self.propagate_block(body),
                line,
            },
            Stmt::Block(block) => Stmt::Block(self.propagate_block(block)),
        }
    }

    fn propagate_expr(&mut self, expr: Expr) -> Expr {
        match expr {
            Expr::Variable { name, line } => match self.constants.get(&name) {
                Some(value) => {
                    self.rewrites += 1;
                    Expr::Literal {
                        value: *value,
                        line,
                    }
                }
                None => Expr::Variable { name, line },
            },
            expr => map_children(expr, &mut |e| self.propagate_expr(e)),
        }
    }
}

impl Default for ConstantPropagation {
    fn default() -> Self {
        Self::new()
    }
}

impl Pass for ConstantPropagation {
    fn name(&self) -> &'static str {
        "constant-propagation"
    }

    fn run(&mut self, program: Program) -> (Program, usize) {
        self.rewrites = 0;
        self.constants.clear();
        let program = Program(
            program
                .0
                .into_iter()
                .map(|func| self.propagate_func(func))
                .collect(),
        );
        (program, self.rewrites)
    }
}
