mod semantic_visitor;
mod symbol_table;
mod ty;

pub use semantic_visitor::*;
pub use symbol_table::*;
pub use ty::*;
