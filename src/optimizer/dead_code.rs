use tracing::trace;

use crate::parser::{Block, Function, Program, Stmt};

use super::Pass;

/// Drops unreachable statements, collapses `if`s on literal conditions and removes
/// blocks left empty.
pub struct DeadCodeElimination {
    removed: usize,
    rewrites: usize,
}

impl DeadCodeElimination {
    pub fn new() -> Self {
        Self {
            removed: 0,
            rewrites: 0,
        }
    }

    /// Statements dropped for following a `return`, over every run of this pass.
    pub fn removed(&self) -> usize {
        self.removed
    }

    fn eliminate_block(&mut self, block: Block) -> Block {
        let mut stmts = vec![];
        let mut iter = block.stmts.into_iter();

        while let Some(stmt) = iter.next() {
            let is_return = matches!(stmt, Stmt::Return { .. });
            if let Some(stmt) = self.eliminate_stmt(stmt) {
                stmts.push(stmt);
            }

            if is_return {
                let dropped = iter.count();
                if dropped > 0 {
                    trace!(line = block.line, dropped, "dropping statements after return");
                }
                self.removed += dropped;
                self.rewrites += dropped;
                break;
            }
        }

        Block::new(stmts, block.line)
    }

    /// Turns a processed block into a statement, or into nothing when it is empty.
    fn collapse(&mut self, block: Block) -> Option<Stmt> {
        if block.stmts.is_empty() {
            self.rewrites += 1;
            None
        } else {
            Some(Stmt::Block(block))
        }
    }

    fn eliminate_stmt(&mut self, stmt: Stmt) -> Option<Stmt> {
        match stmt {
            Stmt::If { cond, then, line } => {
                let then = self.eliminate_block(then);
                match cond.as_literal() {
                    Some(value) => {
                        self.rewrites += 1;
                        if value.is_truthy() {
                            self.collapse(then)
                        } else {
                            None
                        }
                    }
                    None => Some(Stmt::If { cond, then, line }),
                }
            }
            Stmt::IfElse {
                cond,
                then,
                otherwise,
                line,
            } => {
                let then = self.eliminate_block(then);
                let otherwise = self.eliminate_block(otherwise);
                match cond.as_literal() {
                    Some(value) => {
                        self.rewrites += 1;
                        if value.is_truthy() {
                            self.collapse(then)
                        } else {
                            self.collapse(otherwise)
                        }
                    }
                    None => Some(Stmt::IfElse {
                        cond,
                        then,
                        otherwise,
                        line,
                    }),
                }
            }
            Stmt::While { cond, body, line } => Some(Stmt::While {
                cond,
                body: self.eliminate_block(body),
                line,
            }),
            Stmt::Block(block) => {
                let block = self.eliminate_block(block);
                self.collapse(block)
            }
            stmt => Some(stmt),
        }
    }
}

impl Default for DeadCodeElimination {
    fn default() -> Self {
        Self::new()
    }
}

impl Pass for DeadCodeElimination {
    fn name(&self) -> &'static str {
        "dead-code-elimination"
    }

    fn run(&mut self, program: Program) -> (Program, usize) {
        self.rewrites = 0;
        let program = Program(
            program
                .0
                .into_iter()
                .map(|func| Function {
                    body: self.eliminate_block(func.body),
                    ..func
                })
                .collect(),
        );
        (program, self.rewrites)
    }
}
