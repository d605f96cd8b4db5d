pub mod analyzer;
pub mod codegen;
pub mod error;
pub mod lexer;
pub mod logger;
pub mod optimizer;
pub mod parser;

use tracing::info;

use analyzer::{SemanticVisitor, SymbolTable};
use codegen::{Codegen, Instruction};
use error::CompileError;
use lexer::Lexer;
use optimizer::Optimizer;
use parser::Parser;

#[derive(Clone, Debug)]
pub struct CompileOptions {
    /// Run the optimizer between analysis and code generation.
    pub optimize: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self { optimize: true }
    }
}

#[derive(Debug)]
pub struct Compilation {
    pub instructions: Vec<Instruction>,
    /// Statements the optimizer dropped as unreachable.
    pub removed: usize,
    pub symbol_table: SymbolTable,
}

/// Runs the whole pipeline on `user_input`. Each stage runs only if every earlier one
/// succeeded, so no IR is produced for an erroneous program.
pub fn compile(
    user_input: &str,
    options: &CompileOptions,
) -> Result<Compilation, Vec<CompileError>> {
    let tokens = Lexer::tokenize(user_input)?;

    let mut parser = Parser::new(tokens);
    let program = parser.parse().map_err(|e| vec![e])?;

    let analysis = SemanticVisitor::new().visit_program(&program);
    if !analysis.is_ok() {
        return Err(analysis.diagnostics);
    }

    let (program, removed) = if options.optimize {
        Optimizer::new().optimize(program)
    } else {
        (program, 0)
    };

    let instructions = Codegen::new().generate(program);
    info!(instructions = instructions.len(), removed, "compilation finished");

    Ok(Compilation {
        instructions,
        removed,
        symbol_table: analysis.symbol_table,
    })
}
