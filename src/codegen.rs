mod codegen;
mod instruction;

pub use codegen::*;
pub use instruction::*;
