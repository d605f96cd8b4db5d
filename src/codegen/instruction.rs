use std::fmt;

use crate::parser::{BinOpKind, Literal};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Temp(pub usize);

impl fmt::Display for Temp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Label(pub usize);

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{}", self.0)
    }
}

/// A value an instruction reads: a temporary, a named variable, a numeric constant or
/// a string.
#[derive(Clone, Debug, PartialEq)]
pub enum Operand {
    Temp(Temp),
    Var(String),
    Const(Literal),
    Str(String),
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Temp(t) => write!(f, "{t}"),
            Operand::Var(name) => write!(f, "{name}"),
            Operand::Const(value) => write!(f, "{value}"),
            Operand::Str(s) => write!(f, "\"{s}\""),
        }
    }
}

impl From<Temp> for Operand {
    fn from(temp: Temp) -> Self {
        Operand::Temp(temp)
    }
}

/// One three-address instruction. `Display` gives the textual form the back end reads.
#[derive(Clone, Debug, PartialEq)]
pub enum Instruction {
    /// `dst = src`
    Assign { dst: Operand, src: Operand },
    /// `dst = lhs OP rhs`
    Binary {
        dst: Temp,
        op: BinOpKind,
        lhs: Operand,
        rhs: Operand,
    },
    /// `LN:`
    Label(Label),
    /// `goto LN`
    Goto(Label),
    /// `if COND goto LN`
    IfGoto { cond: Operand, target: Label },
    /// `if not COND goto LN`
    IfNotGoto { cond: Operand, target: Label },
    /// `param x`, pushing a call argument
    Param(Operand),
    /// `dst = call f, argc`
    Call { dst: Temp, func: String, argc: usize },
    /// `func NAME:`
    Func(String),
    /// `param NAME`, declaring a formal parameter
    FuncParam(String),
    /// `return`
    Return,
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::Assign { dst, src } => write!(f, "{dst} = {src}"),
            Instruction::Binary { dst, op, lhs, rhs } => write!(f, "{dst} = {lhs} {op} {rhs}"),
            Instruction::Label(label) => write!(f, "{label}:"),
            Instruction::Goto(label) => write!(f, "goto {label}"),
            Instruction::IfGoto { cond, target } => write!(f, "if {cond} goto {target}"),
            Instruction::IfNotGoto { cond, target } => write!(f, "if not {cond} goto {target}"),
            Instruction::Param(arg) => write!(f, "param {arg}"),
            Instruction::Call { dst, func, argc } => write!(f, "{dst} = call {func}, {argc}"),
            Instruction::Func(name) => write!(f, "func {name}:"),
            Instruction::FuncParam(name) => write!(f, "param {name}"),
            Instruction::Return => write!(f, "return"),
        }
    }
}

/// Renders `instructions` one per line.
pub fn render(instructions: &[Instruction]) -> String {
    instructions
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}
