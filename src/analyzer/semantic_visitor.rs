use tracing::{debug, info};

use crate::error::CompileError;
use crate::parser::{Block, Expr, Function, Program, Stmt};

use super::{ScopeId, Symbol, SymbolTable, Ty};

/// Outcome of semantic analysis. Any diagnostic makes the analysis a failure.
#[derive(Debug)]
pub struct Analysis {
    pub diagnostics: Vec<CompileError>,
    pub symbol_table: SymbolTable,
}

impl Analysis {
    pub fn is_ok(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

pub struct SemanticVisitor {
    symbol_table: SymbolTable,
    scope: ScopeId,
    diagnostics: Vec<CompileError>,
}

impl SemanticVisitor {
    pub fn new() -> Self {
        Self {
            symbol_table: SymbolTable::new(),
            scope: SymbolTable::GLOBAL,
            diagnostics: vec![],
        }
    }

    /// Checks every function of `program`, collecting all diagnostics rather than
    /// stopping at the first one.
    pub fn visit_program(mut self, program: &Program) -> Analysis {
        for func in program.0.iter() {
            self.visit_func_def(func);
        }

        info!(
            scopes = self.symbol_table.scopes().len(),
            diagnostics = self.diagnostics.len(),
            "semantic analysis finished"
        );
        Analysis {
            diagnostics: self.diagnostics,
            symbol_table: self.symbol_table,
        }
    }

    fn declare(&mut self, symbol: Symbol, line: usize) {
        if let Err(symbol) = self.symbol_table.declare(self.scope, symbol) {
            self.diagnostics.push(CompileError::DuplicateDeclaration {
                name: symbol.name,
                line,
            });
        }
    }

    fn visit_func_def(&mut self, func: &Function) {
        debug!(name = %func.name, params = func.params.len(), "checking function");

        let params = func
            .params
            .iter()
            .map(|p| (p.name.clone(), Ty::from(p.ty)))
            .collect();
        self.declare(
            Symbol::function(&func.name, Ty::from(func.ty), params),
            func.line,
        );

        // Parameters and the top-level statements of the body share one scope.
        let enclosing = self.scope;
        self.scope = self.symbol_table.push_scope(enclosing);
        for param in func.params.iter() {
            self.declare(Symbol::variable(&param.name, Ty::from(param.ty)), param.line);
        }
        for stmt in func.body.stmts.iter() {
            self.visit_stmt(stmt);
        }
        self.scope = enclosing;
    }

    fn visit_block(&mut self, block: &Block) {
        let enclosing = self.scope;
        self.scope = self.symbol_table.push_scope(enclosing);
        for stmt in block.stmts.iter() {
            self.visit_stmt(stmt);
        }
        self.scope = enclosing;
    }

    fn visit_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Declaration {
                ty,
                name,
                init,
                line,
            } => {
                if let Some(expr) = init {
                    self.visit_expr(expr);
                }
                self.declare(Symbol::variable(name, Ty::from(*ty)), *line);
            }
            Stmt::Assignment { name, value, line } => {
                self.visit_variable(name, *line);
                self.visit_expr(value);
            }
            Stmt::Expr(expr) => self.visit_expr(expr),
            Stmt::Return { value, .. } => {
                if let Some(expr) = value {
                    self.visit_expr(expr);
                }
            }
            Stmt::If { cond, then, .. } => {
                self.visit_expr(cond);
                self.visit_block(then);
            }
            Stmt::IfElse {
                cond,
                then,
                otherwise,
                ..
            } => {
                self.visit_expr(cond);
                self.visit_block(then);
                self.visit_block(otherwise);
            }
            Stmt::While { cond, body, .. } => {
                self.visit_expr(cond);
                self.visit_block(body);
            }
            Stmt::Block(block) => self.visit_block(block),
        }
    }

    /// A name read or assigned must resolve to a variable; a function does not count.
    fn visit_variable(&mut self, name: &str, line: usize) {
        let is_variable = self
            .symbol_table
            .lookup(self.scope, name)
            .is_some_and(|symbol| !symbol.is_function());
        if !is_variable {
            self.diagnostics.push(CompileError::UndeclaredVariable {
                name: name.to_string(),
                line,
            });
        }
    }

    fn visit_call(&mut self, name: &str, args: &[Expr], line: usize) {
        match self.symbol_table.lookup(self.scope, name) {
            Some(symbol) if symbol.is_function() => {
                let expected = symbol.arity();
                if expected != args.len() {
                    self.diagnostics.push(CompileError::Arity {
                        name: name.to_string(),
                        expected,
                        found: args.len(),
                        line,
                    });
                }
            }
            _ => self.diagnostics.push(CompileError::UndeclaredFunction {
                name: name.to_string(),
                line,
            }),
        }

        for arg in args {
            self.visit_expr(arg);
        }
    }

    fn visit_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Literal { .. } | Expr::StringLiteral { .. } => (),
            Expr::Variable { name, line } => self.visit_variable(name, *line),
            Expr::Call { name, args, line } => self.visit_call(name, args, *line),
            Expr::Neg { operand, .. } => self.visit_expr(operand),
            Expr::Binary { lhs, rhs, .. } => {
                self.visit_expr(lhs);
                self.visit_expr(rhs);
            }
        }
    }
}

impl Default for SemanticVisitor {
    fn default() -> Self {
        Self::new()
    }
}
