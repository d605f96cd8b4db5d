use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;

use super::Ty;

/// A declared name: a variable, a parameter or a function.
#[derive(Clone, Debug, PartialEq)]
pub struct Symbol {
    pub name: String,
    /// Declared type of a variable, or the return type of a function.
    pub ty: Ty,
    /// Parameter list, present only for functions.
    pub params: Option<Vec<(String, Ty)>>,
}

impl Symbol {
    pub fn variable(name: &str, ty: Ty) -> Self {
        Self {
            name: name.to_string(),
            ty,
            params: None,
        }
    }

    pub fn function(name: &str, ty: Ty, params: Vec<(String, Ty)>) -> Self {
        Self {
            name: name.to_string(),
            ty,
            params: Some(params),
        }
    }

    pub fn is_function(&self) -> bool {
        self.params.is_some()
    }

    pub fn arity(&self) -> usize {
        self.params.as_ref().map_or(0, Vec::len)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.params {
            None => write!(f, "{} {}", self.ty, self.name),
            Some(params) => {
                write!(f, "func {} {}(", self.ty, self.name)?;
                for (i, (name, ty)) in params.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{ty} {name}")?;
                }
                write!(f, ")")
            }
        }
    }
}

/// Index of a [Scope] inside its [SymbolTable].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScopeId(pub usize);

#[derive(Clone, Debug)]
pub struct Scope {
    pub depth: usize,
    pub parent: Option<ScopeId>,
    symbols: HashMap<String, Symbol>,
}

impl Scope {
    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.symbols.get(name)
    }

    pub fn symbols(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.values()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

/// Arena of lexical scopes. Each scope refers to its enclosing scope by index, so the
/// chain is walked outward without any ownership cycle.
#[derive(Clone, Debug)]
pub struct SymbolTable {
    scopes: Vec<Scope>,
}

impl SymbolTable {
    pub const GLOBAL: ScopeId = ScopeId(0);

    pub fn new() -> Self {
        Self {
            scopes: vec![Scope {
                depth: 0,
                parent: None,
                symbols: HashMap::new(),
            }],
        }
    }

    pub fn scope(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.0]
    }

    pub fn scopes(&self) -> &[Scope] {
        &self.scopes
    }

    /// Opens a scope nested one level deeper than `parent`.
    pub fn push_scope(&mut self, parent: ScopeId) -> ScopeId {
        let depth = self.scope(parent).depth + 1;
        self.scopes.push(Scope {
            depth,
            parent: Some(parent),
            symbols: HashMap::new(),
        });
        ScopeId(self.scopes.len() - 1)
    }

    /// Inserts `symbol` into `scope`. Only that scope is checked for an existing
    /// declaration, so shadowing an outer name is allowed. The rejected symbol is
    /// handed back on a duplicate.
    pub fn declare(&mut self, scope: ScopeId, symbol: Symbol) -> Result<(), Symbol> {
        match self.scopes[scope.0].symbols.entry(symbol.name.clone()) {
            Entry::Occupied(_) => Err(symbol),
            Entry::Vacant(entry) => {
                entry.insert(symbol);
                Ok(())
            }
        }
    }

    /// Finds the nearest declaration of `name`, walking outward from `scope`.
    pub fn lookup(&self, scope: ScopeId, name: &str) -> Option<&Symbol> {
        let mut current = Some(scope);
        while let Some(id) = current {
            let scope = self.scope(id);
            if let Some(symbol) = scope.get(name) {
                return Some(symbol);
            }
            current = scope.parent;
        }
        None
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SymbolTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, scope) in self.scopes.iter().enumerate() {
            let indent = "  ".repeat(scope.depth);
            match scope.parent {
                Some(parent) => writeln!(
                    f,
                    "{indent}scope {i} (depth {}, parent {})",
                    scope.depth, parent.0
                )?,
                None => writeln!(f, "{indent}scope {i} (global)")?,
            }

            let mut symbols: Vec<_> = scope.symbols().collect();
            symbols.sort_by(|a, b| a.name.cmp(&b.name));
            for symbol in symbols {
                writeln!(f, "{indent}  {symbol}")?;
            }
        }
        Ok(())
    }
}
