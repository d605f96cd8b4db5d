use tracing::{info, trace};

use crate::parser::{BinOpKind, Block, Expr, Function, Literal, Program, Stmt, TypeSpecifier};

use super::{Instruction, Label, Operand, Temp};

/// Where `return` statements of the function being generated jump to.
#[derive(Clone, Copy, Debug)]
struct FunctionContext {
    return_label: Label,
    return_temp: Option<Temp>,
}

/// Lowers an optimized AST into three-address instructions.
///
/// `generate` consumes the generator, so the temporary and label counters of one
/// compilation can never leak into another.
pub struct Codegen {
    temp_index: usize,
    label_index: usize,
    code: Vec<Instruction>,
    current: Option<FunctionContext>,
}

impl Codegen {
    pub fn new() -> Self {
        Self {
            temp_index: 0,
            label_index: 0,
            code: vec![],
            current: None,
        }
    }

    pub fn generate(mut self, program: Program) -> Vec<Instruction> {
        for func in program.0 {
            self.gen_func(func);
        }

        info!(
            instructions = self.code.len(),
            temps = self.temp_index,
            labels = self.label_index,
            "code generation finished"
        );
        self.code
    }

    fn new_temp(&mut self) -> Temp {
        self.temp_index += 1;
        Temp(self.temp_index)
    }

    fn new_label(&mut self) -> Label {
        self.label_index += 1;
        Label(self.label_index)
    }

    fn emit(&mut self, instruction: Instruction) {
        trace!(%instruction, "emit");
        self.code.push(instruction);
    }

    fn gen_func(
        &mut self,
        Function {
            ty,
            name,
            params,
            body,
            line: _,
        }: Function,
    ) {
        let context = FunctionContext {
            return_label: self.new_label(),
            return_temp: if ty == TypeSpecifier::Void {
                None
            } else {
                Some(self.new_temp())
            },
        };
        let enclosing = self.current.replace(context);

        self.emit(Instruction::Func(name));
        for param in params {
            self.emit(Instruction::FuncParam(param.name));
        }

        self.gen_block(body);

        if ty == TypeSpecifier::Void {
            self.emit(Instruction::Return);
        }
        self.emit(Instruction::Label(context.return_label));

        self.current = enclosing;
    }

    fn gen_block(&mut self, block: Block) {
        for stmt in block.stmts {
            self.gen_stmt(stmt);
        }
    }

    fn gen_stmt(&mut self, stmt: Stmt) {
        match stmt {
            Stmt::Declaration { name, init, .. } => {
                if let Some(expr) = init {
                    let src = self.gen_expr(expr);
                    self.emit(Instruction::Assign {
                        dst: Operand::Var(name),
                        src,
                    });
                }
            }
            Stmt::Assignment { name, value, .. } => {
                let src = self.gen_expr(value);
                self.emit(Instruction::Assign {
                    dst: Operand::Var(name),
                    src,
                });
            }
            Stmt::Expr(expr) => {
                self.gen_expr(expr);
            }
            Stmt::Return { value, .. } => self.gen_return(value),
            Stmt::If { cond, then, .. } => self.gen_if(cond, then, None),
            Stmt::IfElse {
                cond,
                then,
                otherwise,
                ..
            } => self.gen_if(cond, then, Some(otherwise)),
            Stmt::While { cond, body, .. } => self.gen_while(cond, body),
            Stmt::Block(block) => self.gen_block(block),
        }
    }

    fn gen_return(&mut self, value: Option<Expr>) {
        let Some(context) = self.current else {
            unreachable!("return outside of a function body");
        };

        if let Some(expr) = value {
            let src = self.gen_expr(expr);
            if let Some(temp) = context.return_temp {
                self.emit(Instruction::Assign {
                    dst: temp.into(),
                    src,
                });
            }
        }
        self.emit(Instruction::Goto(context.return_label));
    }

    fn gen_if(&mut self, cond: Expr, then: Block, otherwise: Option<Block>) {
        let false_label = self.new_label();
        let end_label = self.new_label();

        let cond = self.gen_expr(cond);
        self.emit(Instruction::IfNotGoto {
            cond,
            target: false_label,
        });
        self.gen_block(then);
        self.emit(Instruction::Goto(end_label));
        self.emit(Instruction::Label(false_label));
        if let Some(otherwise) = otherwise {
            self.gen_block(otherwise);
        }
        self.emit(Instruction::Label(end_label));
    }

    /// The condition sits at the bottom of the loop and is reached first through an
    /// unconditional jump, so it is tested before the first iteration.
    fn gen_while(&mut self, cond: Expr, body: Block) {
        let start_label = self.new_label();
        let cond_label = self.new_label();
        let end_label = self.new_label();

        self.emit(Instruction::Goto(cond_label));
        self.emit(Instruction::Label(start_label));
        self.gen_block(body);
        self.emit(Instruction::Label(cond_label));
        let cond = self.gen_expr(cond);
        self.emit(Instruction::IfGoto {
            cond,
            target: start_label,
        });
        self.emit(Instruction::Label(end_label));
    }

    fn gen_call(&mut self, name: String, args: Vec<Expr>) -> Operand {
        let argc = args.len();
        for arg in args {
            let arg = self.gen_expr(arg);
            self.emit(Instruction::Param(arg));
        }

        let dst = self.new_temp();
        self.emit(Instruction::Call {
            dst,
            func: name,
            argc,
        });
        dst.into()
    }

    fn gen_binary(&mut self, op: BinOpKind, lhs: Operand, rhs: Operand) -> Operand {
        let dst = self.new_temp();
        self.emit(Instruction::Binary { dst, op, lhs, rhs });
        dst.into()
    }

    /// Generates `expr` and returns the operand holding its value. Operands are always
    /// evaluated left to right.
    fn gen_expr(&mut self, expr: Expr) -> Operand {
        match expr {
            Expr::Literal { value, .. } => Operand::Const(value),
            Expr::Variable { name, .. } => Operand::Var(name),
            Expr::StringLiteral { value, .. } => {
                let dst = self.new_temp();
                self.emit(Instruction::Assign {
                    dst: dst.into(),
                    src: Operand::Str(value),
                });
                dst.into()
            }
            Expr::Call { name, args, .. } => self.gen_call(name, args),
            Expr::Neg { operand, .. } => {
                let operand = self.gen_expr(*operand);
                self.gen_binary(BinOpKind::Sub, Operand::Const(Literal::Int(0)), operand)
            }
            Expr::Binary { op, lhs, rhs, .. } => {
                let lhs = self.gen_expr(*lhs);
                let rhs = self.gen_expr(*rhs);
                self.gen_binary(op, lhs, rhs)
            }
        }
    }
}

impl Default for Codegen {
    fn default() -> Self {
        Self::new()
    }
}
