// tamarin-core - Runtime value model for Tamarin
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Runtime values.
//!
//! `Object` is the single tagged value type shared by the tree-walking
//! evaluator and the VM. Arrays and hashes use persistent collections,
//! so the clone-heavy stack discipline of the VM shares structure instead
//! of deep-copying; `push` and `rest` return new arrays the same way.
//!
//! `ReturnValue` and `Error` only occur on the evaluator path; the VM
//! reports failures from `run` instead of materialising error values.

use std::fmt;
use std::rc::Rc;

use im::{OrdMap, Vector};

use tamarin_parser::ast::BlockStatement;

use crate::code::Instructions;
use crate::env::Env;

/// The type tag of a value, as spelled in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ObjectKind {
    Integer,
    Boolean,
    Null,
    Str,
    Array,
    Hash,
    ReturnValue,
    Error,
    Function,
    CompiledFunction,
    Closure,
    Builtin,
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ObjectKind::Integer => "INTEGER",
            ObjectKind::Boolean => "BOOLEAN",
            ObjectKind::Null => "NULL",
            ObjectKind::Str => "STRING",
            ObjectKind::Array => "ARRAY",
            ObjectKind::Hash => "HASH",
            ObjectKind::ReturnValue => "RETURN_VALUE",
            ObjectKind::Error => "ERROR",
            ObjectKind::Function => "FUNCTION",
            ObjectKind::CompiledFunction => "COMPILED_FUNCTION",
            ObjectKind::Closure => "CLOSURE",
            ObjectKind::Builtin => "BUILTIN",
        };
        f.write_str(name)
    }
}

/// A hash table key: the value's type tag plus a 64-bit digest.
///
/// Integers are bit-cast, booleans map to 0/1, strings use FNV-1a over
/// their bytes. Only those three kinds are hashable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HashKey {
    pub kind: ObjectKind,
    pub value: u64,
}

/// A key/value entry in a hash, preserving the original key object.
#[derive(Debug, Clone, PartialEq)]
pub struct HashPair {
    pub key: Object,
    pub value: Object,
}

/// A function value on the evaluator path: parameters, body, and the
/// environment captured at definition time.
#[derive(Debug, Clone)]
pub struct Function {
    pub parameters: Vec<String>,
    pub body: BlockStatement,
    pub env: Env,
}

/// The output of compiling one function body.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledFunction {
    pub instructions: Instructions,
    /// Local slots to reserve on call, parameters included.
    pub num_locals: usize,
    pub num_parameters: usize,
}

/// A compiled function paired with the values of its free variables,
/// captured by value at construction time.
#[derive(Debug, Clone)]
pub struct Closure {
    pub func: Rc<CompiledFunction>,
    pub free: Vec<Object>,
}

/// Signature of a native built-in. `None` means "no value" and surfaces
/// as `null`.
pub type BuiltinFn = fn(&[Object]) -> Option<Object>;

/// A named native function.
#[derive(Debug, Clone, Copy)]
pub struct Builtin {
    pub name: &'static str,
    pub func: BuiltinFn,
}

impl PartialEq for Builtin {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

/// A Tamarin runtime value.
#[derive(Debug, Clone)]
pub enum Object {
    Integer(i64),
    Boolean(bool),
    Null,
    Str(Rc<String>),
    Array(Vector<Object>),
    Hash(OrdMap<HashKey, HashPair>),
    /// Wrapper carrying a `return` value up through nested blocks
    /// (evaluator only).
    ReturnValue(Box<Object>),
    /// An in-language error (evaluator only).
    Error(String),
    /// A user function with its captured environment (evaluator only).
    Function(Rc<Function>),
    CompiledFunction(Rc<CompiledFunction>),
    Closure(Rc<Closure>),
    Builtin(Builtin),
}

impl Object {
    /// Build a string value.
    pub fn string(value: impl Into<String>) -> Object {
        Object::Str(Rc::new(value.into()))
    }

    /// Build an array value.
    pub fn array(elements: impl IntoIterator<Item = Object>) -> Object {
        Object::Array(elements.into_iter().collect())
    }

    /// The value's type tag.
    pub fn kind(&self) -> ObjectKind {
        match self {
            Object::Integer(_) => ObjectKind::Integer,
            Object::Boolean(_) => ObjectKind::Boolean,
            Object::Null => ObjectKind::Null,
            Object::Str(_) => ObjectKind::Str,
            Object::Array(_) => ObjectKind::Array,
            Object::Hash(_) => ObjectKind::Hash,
            Object::ReturnValue(_) => ObjectKind::ReturnValue,
            Object::Error(_) => ObjectKind::Error,
            Object::Function(_) => ObjectKind::Function,
            Object::CompiledFunction(_) => ObjectKind::CompiledFunction,
            Object::Closure(_) => ObjectKind::Closure,
            Object::Builtin(_) => ObjectKind::Builtin,
        }
    }

    /// The value's hash key, for kinds that can key a hash.
    pub fn hash_key(&self) -> Option<HashKey> {
        match self {
            Object::Integer(value) => Some(HashKey {
                kind: ObjectKind::Integer,
                value: *value as u64,
            }),
            Object::Boolean(value) => Some(HashKey {
                kind: ObjectKind::Boolean,
                value: u64::from(*value),
            }),
            Object::Str(value) => Some(HashKey {
                kind: ObjectKind::Str,
                value: fnv1a64(value.as_bytes()),
            }),
            _ => None,
        }
    }

    /// Whether a condition treats this value as true: everything except
    /// `false` and `null`, including 0 and empty containers.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Object::Boolean(false) | Object::Null)
    }

    /// Whether this is an evaluator error value.
    pub fn is_error(&self) -> bool {
        matches!(self, Object::Error(_))
    }
}

impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Object::Integer(a), Object::Integer(b)) => a == b,
            (Object::Boolean(a), Object::Boolean(b)) => a == b,
            (Object::Null, Object::Null) => true,
            (Object::Str(a), Object::Str(b)) => a == b,
            (Object::Array(a), Object::Array(b)) => a == b,
            (Object::Hash(a), Object::Hash(b)) => a == b,
            (Object::ReturnValue(a), Object::ReturnValue(b)) => a == b,
            (Object::Error(a), Object::Error(b)) => a == b,
            // Function-like values compare by identity.
            (Object::Function(a), Object::Function(b)) => Rc::ptr_eq(a, b),
            (Object::CompiledFunction(a), Object::CompiledFunction(b)) => Rc::ptr_eq(a, b),
            (Object::Closure(a), Object::Closure(b)) => Rc::ptr_eq(a, b),
            (Object::Builtin(a), Object::Builtin(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Object::Integer(value) => write!(f, "{}", value),
            Object::Boolean(value) => write!(f, "{}", value),
            Object::Null => f.write_str("null"),
            Object::Str(value) => f.write_str(value),
            Object::Array(elements) => {
                let rendered: Vec<String> = elements.iter().map(|e| e.to_string()).collect();
                write!(f, "[{}]", rendered.join(", "))
            }
            Object::Hash(pairs) => {
                let rendered: Vec<String> = pairs
                    .values()
                    .map(|pair| format!("{}: {}", pair.key, pair.value))
                    .collect();
                write!(f, "{{{}}}", rendered.join(", "))
            }
            Object::ReturnValue(value) => write!(f, "{}", value),
            Object::Error(message) => write!(f, "ERROR: {}", message),
            Object::Function(function) => {
                write!(
                    f,
                    "fn({}) {{\n{}\n}}",
                    function.parameters.join(", "),
                    function.body
                )
            }
            Object::CompiledFunction(_) => f.write_str("#<compiled-fn>"),
            Object::Closure(_) => f.write_str("#<closure>"),
            Object::Builtin(builtin) => write!(f, "#<builtin {}>", builtin.name),
        }
    }
}

/// 64-bit FNV-1a over a byte slice.
fn fnv1a64(bytes: &[u8]) -> u64 {
    const OFFSET_BASIS: u64 = 0xcbf29ce484222325;
    const PRIME: u64 = 0x100000001b3;
    let mut hash = OFFSET_BASIS;
    for byte in bytes {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(PRIME);
    }
    hash
}
