// tamarin-vm - Symbol table for the Tamarin compiler
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Lexically-scoped symbol table.
//!
//! Scopes form a chain through outer references, one table per function
//! being compiled. Resolution walks outward; when a name is found as a
//! local (or free) of an enclosing function, the enclosed table records
//! it in its ordered free list and hands back a `Free` symbol, which is
//! what the compiler later uses to build closures.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Where a symbol lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolScope {
    /// A slot in the globals slab.
    Global,
    /// A slot in the current frame's locals area.
    Local,
    /// An index into the built-in registry.
    Builtin,
    /// A captured variable of the current closure.
    Free,
    /// The name of the function currently being compiled; loads as the
    /// running closure itself.
    Function,
}

/// A resolved name: its scope and the index to address it with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    pub name: String,
    pub scope: SymbolScope,
    pub index: usize,
}

/// A scope's symbol table, chained to its enclosing scope.
///
/// Tables are cheaply cloneable handles onto shared state, so the
/// compiler can hold the current table while enclosed scopes keep their
/// outer references alive.
#[derive(Debug, Clone)]
pub struct SymbolTable {
    inner: Rc<RefCell<TableInner>>,
}

#[derive(Debug)]
struct TableInner {
    outer: Option<SymbolTable>,
    store: HashMap<String, Symbol>,
    num_definitions: usize,
    free_symbols: Vec<Symbol>,
}

impl SymbolTable {
    /// Create the global (outermost) table.
    pub fn new() -> Self {
        SymbolTable {
            inner: Rc::new(RefCell::new(TableInner {
                outer: None,
                store: HashMap::new(),
                num_definitions: 0,
                free_symbols: Vec::new(),
            })),
        }
    }

    /// Create a table enclosed by `outer`, for a nested function scope.
    #[must_use]
    pub fn new_enclosed(outer: &SymbolTable) -> Self {
        SymbolTable {
            inner: Rc::new(RefCell::new(TableInner {
                outer: Some(outer.clone()),
                store: HashMap::new(),
                num_definitions: 0,
                free_symbols: Vec::new(),
            })),
        }
    }

    /// The enclosing table, if any.
    pub fn outer(&self) -> Option<SymbolTable> {
        self.inner.borrow().outer.clone()
    }

    /// Define a name in this scope: global in the outermost table, local
    /// otherwise. The index is the running definition count.
    pub fn define(&self, name: &str) -> Symbol {
        let mut inner = self.inner.borrow_mut();
        let scope = if inner.outer.is_none() {
            SymbolScope::Global
        } else {
            SymbolScope::Local
        };
        let symbol = Symbol {
            name: name.to_string(),
            scope,
            index: inner.num_definitions,
        };
        inner.store.insert(name.to_string(), symbol.clone());
        inner.num_definitions += 1;
        symbol
    }

    /// Register a built-in at its fixed registry index. Does not count
    /// toward local definitions.
    pub fn define_builtin(&self, index: usize, name: &str) -> Symbol {
        let symbol = Symbol {
            name: name.to_string(),
            scope: SymbolScope::Builtin,
            index,
        };
        self.inner
            .borrow_mut()
            .store
            .insert(name.to_string(), symbol.clone());
        symbol
    }

    /// Register the enclosing `let` name of the function being compiled.
    /// A later `define` of the same name in this table shadows it.
    pub fn define_function_name(&self, name: &str) -> Symbol {
        let symbol = Symbol {
            name: name.to_string(),
            scope: SymbolScope::Function,
            index: 0,
        };
        self.inner
            .borrow_mut()
            .store
            .insert(name.to_string(), symbol.clone());
        symbol
    }

    /// Resolve a name, walking the outer chain.
    ///
    /// A name found as Local or Free in an enclosing scope is converted
    /// into a Free symbol of this scope (appended to the free list);
    /// globals and built-ins resolve unchanged from any depth.
    pub fn resolve(&self, name: &str) -> Option<Symbol> {
        if let Some(symbol) = self.inner.borrow().store.get(name) {
            return Some(symbol.clone());
        }
        let outer = self.outer()?;
        let symbol = outer.resolve(name)?;
        if matches!(symbol.scope, SymbolScope::Global | SymbolScope::Builtin) {
            return Some(symbol);
        }
        Some(self.define_free(symbol))
    }

    fn define_free(&self, original: Symbol) -> Symbol {
        let mut inner = self.inner.borrow_mut();
        inner.free_symbols.push(original.clone());
        let symbol = Symbol {
            name: original.name,
            scope: SymbolScope::Free,
            index: inner.free_symbols.len() - 1,
        };
        inner.store.insert(symbol.name.clone(), symbol.clone());
        symbol
    }

    /// Number of names defined in this scope (parameters included).
    pub fn num_definitions(&self) -> usize {
        self.inner.borrow().num_definitions
    }

    /// The symbols captured from enclosing scopes, in capture order.
    /// Each entry is the symbol as it resolved in the *outer* scope,
    /// which is what the compiler emits loads for when building the
    /// closure.
    pub fn free_symbols(&self) -> Vec<Symbol> {
        self.inner.borrow().free_symbols.clone()
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}
