// tamarin-core - Environment for lexical scoping
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Environment for variable bindings with lexical scoping.
//!
//! Used by the tree-walking evaluator; the compiled path replaces this
//! with symbol-table indices resolved at compile time.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::object::Object;

/// A lexical environment for variable bindings.
///
/// Environments form a chain through parent references. Each environment
/// has its own bindings map and optionally a parent environment for outer
/// scope lookup; function values capture the environment they were
/// defined in.
#[derive(Debug, Clone)]
pub struct Env {
    inner: Rc<RefCell<EnvInner>>,
}

#[derive(Debug)]
struct EnvInner {
    bindings: HashMap<String, Object>,
    parent: Option<Env>,
}

impl Env {
    /// Create a new root environment with no parent.
    pub fn new() -> Self {
        Env {
            inner: Rc::new(RefCell::new(EnvInner {
                bindings: HashMap::new(),
                parent: None,
            })),
        }
    }

    /// Create a child environment with this environment as parent.
    #[must_use]
    pub fn child(&self) -> Self {
        Env {
            inner: Rc::new(RefCell::new(EnvInner {
                bindings: HashMap::new(),
                parent: Some(self.clone()),
            })),
        }
    }

    /// Define a binding in this environment (not a parent).
    pub fn define(&self, name: impl Into<String>, value: Object) {
        self.inner.borrow_mut().bindings.insert(name.into(), value);
    }

    /// Look up a name in this environment or the parent chain.
    /// Uses iterative traversal to avoid stack overflow on deep chains.
    pub fn lookup(&self, name: &str) -> Option<Object> {
        let mut current = self.clone();
        loop {
            let inner = current.inner.borrow();
            if let Some(value) = inner.bindings.get(name) {
                return Some(value.clone());
            }
            let parent = inner.parent.clone();
            drop(inner);
            match parent {
                Some(p) => current = p,
                None => return None,
            }
        }
    }
}

impl Default for Env {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_define_and_lookup() {
        let env = Env::new();
        env.define("x", Object::Integer(42));
        assert_eq!(env.lookup("x"), Some(Object::Integer(42)));
    }

    #[test]
    fn test_undefined_name() {
        let env = Env::new();
        assert_eq!(env.lookup("x"), None);
    }

    #[test]
    fn test_child_inherits_parent() {
        let parent = Env::new();
        parent.define("x", Object::Integer(42));

        let child = parent.child();
        assert_eq!(child.lookup("x"), Some(Object::Integer(42)));
    }

    #[test]
    fn test_child_shadows_parent() {
        let parent = Env::new();
        parent.define("x", Object::Integer(42));

        let child = parent.child();
        child.define("x", Object::Integer(100));

        assert_eq!(child.lookup("x"), Some(Object::Integer(100)));
        assert_eq!(parent.lookup("x"), Some(Object::Integer(42)));
    }
}
