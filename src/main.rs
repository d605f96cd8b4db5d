use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use clap_stdin::FileOrStdin;

use tacc::analyzer::SemanticVisitor;
use tacc::error::CompileError;
use tacc::lexer::Lexer;
use tacc::logger::{self, LogLevel};
use tacc::{codegen, parser, CompileOptions};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Emit {
    /// The token stream
    Tokens,
    /// The parsed syntax tree
    Ast,
    /// The scopes built by semantic analysis
    Symbols,
    /// Three-address code
    Ir,
}

/// Compiles a small C-like language into three-address code
#[derive(Parser, Debug)]
#[command(name = "tacc", version, long_about = None)]
struct Args {
    /// Source file, or `-` to read from stdin
    #[arg(value_name = "INPUT", default_value = "-")]
    input: FileOrStdin,

    /// What to print on stdout
    #[arg(long, value_enum, default_value_t = Emit::Ir)]
    emit: Emit,

    /// Skip the optimizer
    #[arg(long)]
    no_optimize: bool,

    /// Log more (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn report(errors: Vec<CompileError>) -> ! {
    for e in errors {
        eprintln!("{e}");
    }
    std::process::exit(1);
}

fn main() -> Result<()> {
    let args = Args::parse();
    logger::init(LogLevel::from_verbosity(args.verbose));

    let user_input = args
        .input
        .contents()
        .context("Failed to read the input")?;

    match args.emit {
        Emit::Tokens => {
            let tokens = Lexer::tokenize(&user_input).unwrap_or_else(|e| report(e));
            for token in tokens {
                println!("{:>4}  {:?}", token.line, token.kind);
            }
        }
        Emit::Ast => {
            let tokens = Lexer::tokenize(&user_input).unwrap_or_else(|e| report(e));
            let program = parser::Parser::new(tokens)
                .parse()
                .unwrap_or_else(|e| report(vec![e]));
            println!("{:#?}", program);
        }
        Emit::Symbols => {
            let tokens = Lexer::tokenize(&user_input).unwrap_or_else(|e| report(e));
            let program = parser::Parser::new(tokens)
                .parse()
                .unwrap_or_else(|e| report(vec![e]));
            let analysis = SemanticVisitor::new().visit_program(&program);
            print!("{}", analysis.symbol_table);
            if !analysis.is_ok() {
                report(analysis.diagnostics);
            }
        }
        Emit::Ir => {
            let options = CompileOptions {
                optimize: !args.no_optimize,
            };
            let compilation = tacc::compile(&user_input, &options).unwrap_or_else(|e| report(e));
            println!("{}", codegen::render(&compilation.instructions));
        }
    }

    Ok(())
}
