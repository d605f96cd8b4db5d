use thiserror::Error;

/// The enumerable kind of a [CompileError].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    LexicalError,
    SyntaxError,
    DuplicateDeclaration,
    UndeclaredVariable,
    UndeclaredFunction,
    ArityError,
}

#[derive(Clone, Debug, PartialEq, Error)]
pub enum CompileError {
    #[error("Lexical Error: {message} (line {line})")]
    Lexical { message: String, line: usize },

    #[error("Syntax Error: unexpected {found} (line {line})")]
    Syntax { found: String, line: usize },

    #[error("Syntax Error: unexpected end of input (line {line})")]
    UnexpectedEof { line: usize },

    #[error("Semantic Error: '{name}' is already declared in this scope (line {line})")]
    DuplicateDeclaration { name: String, line: usize },

    #[error("Semantic Error: variable '{name}' is not declared (line {line})")]
    UndeclaredVariable { name: String, line: usize },

    #[error("Semantic Error: function '{name}' is not declared (line {line})")]
    UndeclaredFunction { name: String, line: usize },

    #[error(
        "Semantic Error: function '{name}' expects {expected} argument(s) but {found} were given (line {line})"
    )]
    Arity {
        name: String,
        expected: usize,
        found: usize,
        line: usize,
    },
}

impl CompileError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CompileError::Lexical { .. } => ErrorKind::LexicalError,
            CompileError::Syntax { .. } | CompileError::UnexpectedEof { .. } => {
                ErrorKind::SyntaxError
            }
            CompileError::DuplicateDeclaration { .. } => ErrorKind::DuplicateDeclaration,
            CompileError::UndeclaredVariable { .. } => ErrorKind::UndeclaredVariable,
            CompileError::UndeclaredFunction { .. } => ErrorKind::UndeclaredFunction,
            CompileError::Arity { .. } => ErrorKind::ArityError,
        }
    }

    pub fn line(&self) -> usize {
        match self {
            CompileError::Lexical { line, .. }
            | CompileError::Syntax { line, .. }
            | CompileError::UnexpectedEof { line }
            | CompileError::DuplicateDeclaration { line, .. }
            | CompileError::UndeclaredVariable { line, .. }
            | CompileError::UndeclaredFunction { line, .. }
            | CompileError::Arity { line, .. } => *line,
        }
    }
}
