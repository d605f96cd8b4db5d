use std::fmt;

use crate::parser::TypeSpecifier;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ty {
    Void,
    Bool,
    Char,
    Int,
    Float,
}

impl From<TypeSpecifier> for Ty {
    fn from(spec: TypeSpecifier) -> Self {
        match spec {
            TypeSpecifier::Void => Ty::Void,
            TypeSpecifier::Bool => Ty::Bool,
            TypeSpecifier::Char => Ty::Char,
            TypeSpecifier::Int => Ty::Int,
            TypeSpecifier::Float => Ty::Float,
        }
    }
}

impl fmt::Display for Ty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ty::Void => write!(f, "void"),
            Ty::Bool => write!(f, "bool"),
            Ty::Char => write!(f, "char"),
            Ty::Int => write!(f, "int"),
            Ty::Float => write!(f, "float"),
        }
    }
}
